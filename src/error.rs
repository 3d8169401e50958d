//! # 错误类型模块
//!
//! [`StegoError`] 覆盖编码与解码流水线中的所有失败情况。
//! 每个与阶段相关的错误都携带 [`Stage`]，便于定位失败发生的位置。

use std::fmt;
use std::io;
use thiserror::Error;

/// 流水线中的阶段，对应容器中的各个字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Header,
    Magic,
    ExtensionLength,
    Extension,
    PayloadLength,
    Payload,
    Remainder,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Header => "BMP header",
            Self::Magic => "magic marker",
            Self::ExtensionLength => "extension length",
            Self::Extension => "extension",
            Self::PayloadLength => "payload length",
            Self::Payload => "payload",
            Self::Remainder => "remaining pixel data",
        };
        f.write_str(name)
    }
}

/// 隐写编码或解码过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("I/O error while processing the {stage}: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: io::Error,
    },

    #[error("Not enough space in the image: required {required} bytes, available {capacity}")]
    InsufficientCapacity { required: u64, capacity: u64 },

    #[error("Carrier exhausted while processing the {stage} at carrier byte offset {offset}")]
    ShortRead { stage: Stage, offset: u64 },

    #[error("Not a stego file: magic marker mismatch (found {found:?})")]
    NotAStegoFile { found: Vec<u8> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Extension bytes {found:?} are not valid UTF-8")]
    InvalidExtension { found: Vec<u8> },

    #[error("Decoded extension {found:?} does not match the expected {expected:?}")]
    ExtensionMismatch { expected: String, found: String },

    #[error("The {stage} is {len} bytes long, which does not fit a 32-bit length field")]
    PayloadTooLarge { stage: Stage, len: usize },
}

impl StegoError {
    /// 将读取时的 I/O 错误归类：提前到达文件末尾视为 `ShortRead`。
    pub(crate) fn from_read(err: io::Error, stage: Stage, offset: u64) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::ShortRead { stage, offset },
            _ => Self::Io { stage, source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_is_a_short_read_and_anything_else_is_io() {
        let eof = io::Error::from(io::ErrorKind::UnexpectedEof);
        assert!(matches!(
            StegoError::from_read(eof, Stage::Extension, 120),
            StegoError::ShortRead {
                stage: Stage::Extension,
                offset: 120
            }
        ));

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(
            StegoError::from_read(denied, Stage::Payload, 8),
            StegoError::Io {
                stage: Stage::Payload,
                ref source,
            } if source.kind() == io::ErrorKind::PermissionDenied
        ));
    }
}
