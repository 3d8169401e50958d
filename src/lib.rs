//! # bmp_stego 库
//!
//! 本库包含 BMP LSB 隐写工具的核心逻辑：位打包、容量规划、
//! 容器布局以及流式的编码器与解码器。

// 声明库包含的所有模块。

pub mod capacity;
pub mod cli;
pub mod config;
pub mod constants;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod handler;
pub mod lsb;

#[cfg(test)]
mod test_support;

pub use config::CodecConfig;
pub use container::Container;
pub use decoder::decode;
pub use encoder::{EncodeSummary, encode};
pub use error::{Stage, StegoError};
