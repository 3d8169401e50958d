//! # 解码器
//!
//! 跳过头部后按 [`LAYOUT`] 的顺序逐字段读取像素字节的最低位，
//! 先校验魔术标记，再依次恢复扩展名与载荷。
//! 只有全部字段都成功读出时才返回 [`Container`]，调用方据此再写出文件。

use crate::config::CodecConfig;
use crate::constants::{BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_SIZE};
use crate::container::{Container, FieldKind, LAYOUT};
use crate::error::{Stage, StegoError};
use crate::lsb::{unpack_byte, unpack_size};
use std::io::Read;

/// 流式解码器，持有隐写图像输入。
pub struct Decoder<R> {
    stego: R,
    offset: u64,
}

impl<R: Read> Decoder<R> {
    pub fn new(stego: R) -> Self {
        Self { stego, offset: 0 }
    }

    /// 执行完整的解码流水线。
    ///
    /// # Errors
    ///
    /// * [`StegoError::NotAStegoFile`] - 魔术标记不匹配。
    /// * [`StegoError::ShortRead`] - 某个字段完成之前输入已耗尽。
    /// * [`StegoError::InvalidExtension`] - 扩展名字节不是合法 UTF-8。
    /// * [`StegoError::ExtensionMismatch`] - 配置了期望扩展名且与解码结果不一致。
    /// * [`StegoError::Io`] - 读取失败。
    pub fn decode(mut self, config: &CodecConfig) -> Result<Container, StegoError> {
        self.skip_header()?;

        let mut lengths = [0u32; 2];
        let mut sections: [Vec<u8>; 2] = Default::default();
        for (stage, kind) in LAYOUT {
            match kind {
                FieldKind::Magic => self.verify_magic(config.magic())?,
                FieldKind::Length(section) => lengths[section as usize] = self.read_size(stage)?,
                FieldKind::Bytes(section) => {
                    let len = lengths[section as usize] as usize;
                    sections[section as usize] = self.read_bytes(len, stage)?;
                }
            }
        }

        let [extension, payload] = sections;
        let container = Container::from_raw(extension, payload)?;
        if let Some(expected) = config.expected_extension() {
            if expected != container.extension() {
                return Err(StegoError::ExtensionMismatch {
                    expected: expected.to_string(),
                    found: container.extension().to_string(),
                });
            }
        }

        Ok(container)
    }

    fn skip_header(&mut self) -> Result<(), StegoError> {
        let mut header = [0u8; BMP_HEADER_SIZE];
        self.read_block(&mut header, Stage::Header)
    }

    fn verify_magic(&mut self, expected: &[u8]) -> Result<(), StegoError> {
        let found = self.read_bytes(expected.len(), Stage::Magic)?;
        if found != expected {
            return Err(StegoError::NotAStegoFile { found });
        }
        Ok(())
    }

    fn read_size(&mut self, stage: Stage) -> Result<u32, StegoError> {
        let mut block = [0u8; CARRIER_BYTES_PER_SIZE];
        self.read_block(&mut block, stage)?;
        Ok(unpack_size(&block))
    }

    fn read_bytes(&mut self, len: usize, stage: Stage) -> Result<Vec<u8>, StegoError> {
        // 长度来自未经校验的数据，不按它预分配
        let mut bytes = Vec::new();
        let mut block = [0u8; CARRIER_BYTES_PER_BYTE];
        for _ in 0..len {
            self.read_block(&mut block, stage)?;
            bytes.push(unpack_byte(&block));
        }
        Ok(bytes)
    }

    fn read_block(&mut self, block: &mut [u8], stage: Stage) -> Result<(), StegoError> {
        self.stego
            .read_exact(block)
            .map_err(|err| StegoError::from_read(err, stage, self.offset))?;
        self.offset += block.len() as u64;
        Ok(())
    }
}

/// 便捷函数：从 `stego` 中解码出隐藏的容器。
pub fn decode<R: Read>(stego: R, config: &CodecConfig) -> Result<Container, StegoError> {
    Decoder::new(stego).decode(config)
}
