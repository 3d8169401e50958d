//! 单元测试共用的载体构造与故障注入工具。

use crate::constants::{BMP_HEADER_SIZE, HEIGHT_OFFSET, WIDTH_OFFSET};
use rand::RngCore;
use std::io::{self, Read, Write};

/// 构造一个头部声明 `width × height` 的 24 位 BMP，像素字节随机。
pub(crate) fn carrier(width: i32, height: i32) -> Vec<u8> {
    let pixels = (width.unsigned_abs() * height.unsigned_abs() * 3) as usize;
    let mut bytes = vec![0u8; BMP_HEADER_SIZE + pixels];
    rand::rng().fill_bytes(&mut bytes);
    bytes[0..2].copy_from_slice(b"BM");
    bytes[WIDTH_OFFSET..WIDTH_OFFSET + 4].copy_from_slice(&width.to_le_bytes());
    bytes[HEIGHT_OFFSET..HEIGHT_OFFSET + 4].copy_from_slice(&height.to_le_bytes());
    bytes
}

/// 每次写入都失败的输出。
pub(crate) struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk unplugged"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 先正常提供 `good` 个字节，之后的读取全部失败。
pub(crate) struct FailingReader<'a> {
    data: &'a [u8],
    good: usize,
}

impl<'a> FailingReader<'a> {
    pub(crate) fn new(data: &'a [u8], good: usize) -> Self {
        Self { data, good }
    }
}

impl Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.good == 0 {
            return Err(io::Error::other("sector unreadable"));
        }
        let n = buf.len().min(self.good).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.good -= n;
        Ok(n)
    }
}
