//! # 编码器
//!
//! 以流的方式读取载体字节，把容器逐位写入像素字节的最低位，
//! 再原样复制剩余字节。阶段顺序固定：
//! 检查容量 → 复制头部 → 魔术标记 → 扩展名长度 → 扩展名 → 载荷长度 → 载荷 → 剩余数据。
//! 任一阶段失败都会立即终止整个操作。

use crate::capacity;
use crate::config::CodecConfig;
use crate::constants::{BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_SIZE};
use crate::container::{Container, Field};
use crate::error::{Stage, StegoError};
use crate::lsb::{pack_byte, pack_size};
use std::io::{self, Read, Write};

/// 一次成功编码的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// 头部声明的可用载体字节数。
    pub capacity: u64,
    /// 容器占用的载体字节数 (含头部)。
    pub required: u64,
    /// 原样复制的剩余字节数。
    pub remainder: u64,
}

/// 流式编码器，持有载体输入与隐写输出。
pub struct Encoder<R, W> {
    carrier: R,
    dest: W,
    offset: u64,
}

impl<R: Read, W: Write> Encoder<R, W> {
    pub fn new(carrier: R, dest: W) -> Self {
        Self {
            carrier,
            dest,
            offset: 0,
        }
    }

    /// 执行完整的编码流水线。
    ///
    /// 容量检查先于任何写入，容量不足时 `dest` 不会收到任何字节。
    ///
    /// # Errors
    ///
    /// * [`StegoError::InsufficientCapacity`] - 载体容纳不下容器。
    /// * [`StegoError::ShortRead`] - 载体在某个字段完成之前耗尽。
    /// * [`StegoError::Io`] - 读写失败。
    pub fn encode(
        mut self,
        container: &Container,
        config: &CodecConfig,
    ) -> Result<EncodeSummary, StegoError> {
        let header = self.read_header()?;

        let capacity = capacity::carrier_capacity(&header);
        let required = container.required_bytes(config);
        if !capacity::has_capacity(
            capacity,
            config.magic().len() as u64,
            container.extension().len() as u64,
            container.payload().len() as u64,
        ) {
            return Err(StegoError::InsufficientCapacity { required, capacity });
        }

        self.write(&header, Stage::Header)?;

        for (stage, field) in container.fields(config) {
            self.encode_field(stage, field)?;
        }

        let remainder = self.copy_remainder()?;
        self.dest
            .flush()
            .map_err(|source| StegoError::Io {
                stage: Stage::Remainder,
                source,
            })?;

        Ok(EncodeSummary {
            capacity,
            required,
            remainder,
        })
    }

    fn read_header(&mut self) -> Result<[u8; BMP_HEADER_SIZE], StegoError> {
        let mut header = [0u8; BMP_HEADER_SIZE];
        self.read_block(&mut header, Stage::Header)?;
        Ok(header)
    }

    fn encode_field(&mut self, stage: Stage, field: Field<'_>) -> Result<(), StegoError> {
        match field {
            Field::Magic(bytes) | Field::Bytes(bytes) => {
                let mut block = [0u8; CARRIER_BYTES_PER_BYTE];
                bytes.iter().try_for_each(|&byte| {
                    self.read_block(&mut block, stage)?;
                    pack_byte(byte, &mut block);
                    self.write(&block, stage)
                })
            }
            Field::Length(value) => {
                let mut block = [0u8; CARRIER_BYTES_PER_SIZE];
                self.read_block(&mut block, stage)?;
                pack_size(value, &mut block);
                self.write(&block, stage)
            }
        }
    }

    fn copy_remainder(&mut self) -> Result<u64, StegoError> {
        io::copy(&mut self.carrier, &mut self.dest).map_err(|source| StegoError::Io {
            stage: Stage::Remainder,
            source,
        })
    }

    fn read_block(&mut self, block: &mut [u8], stage: Stage) -> Result<(), StegoError> {
        self.carrier
            .read_exact(block)
            .map_err(|err| StegoError::from_read(err, stage, self.offset))?;
        self.offset += block.len() as u64;
        Ok(())
    }

    fn write(&mut self, block: &[u8], stage: Stage) -> Result<(), StegoError> {
        self.dest
            .write_all(block)
            .map_err(|source| StegoError::Io { stage, source })
    }
}

/// 便捷函数：把 `container` 编码进 `carrier`，结果写入 `dest`。
pub fn encode<R: Read, W: Write>(
    carrier: R,
    dest: W,
    container: &Container,
    config: &CodecConfig,
) -> Result<EncodeSummary, StegoError> {
    Encoder::new(carrier, dest).encode(container, config)
}
