//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::config::CodecConfig;
use crate::constants::DEFAULT_MAGIC;
use crate::error::StegoError;
use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在未压缩的 BMP 图像中隐藏或恢复任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在未压缩的 BMP 图像中隐藏或恢复任意文件。"
)]
pub struct Cli {
    /// 用于标识隐写数据的魔术标记，编码和解码时必须一致。
    #[arg(long, global = true, default_value = DEFAULT_MAGIC)]
    pub magic: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 根据命令行参数构造本次运行的编解码配置。
    pub fn codec_config(&self) -> Result<CodecConfig, StegoError> {
        let config = CodecConfig::new(self.magic.as_bytes())?;
        Ok(match &self.command {
            Commands::Decode(DecodeArgs {
                expect_ext: Some(ext),
                ..
            }) => config.with_expected_extension(ext.as_str()),
            _ => config,
        })
    }
}

/// 可用的子命令：encode (隐藏) 和 decode (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将任意文件隐藏到 BMP 图像的像素数据中。
    Encode(EncodeArgs),

    /// 从经过隐写的 BMP 图像中恢复隐藏的文件。
    Decode(DecodeArgs),
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 用作载体的 BMP 图像路径。
    pub carrier: PathBuf,

    /// 要隐藏的秘密文件路径，其扩展名会一并嵌入。
    pub secret: PathBuf,

    /// 隐写图像的输出路径。默认为载体所在目录下的 `stego.bmp`。
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏数据的 BMP 图像路径。
    pub stego: PathBuf,

    /// 恢复文件的输出路径。默认为 `decoded_secret` 加上解码出的扩展名。
    pub output: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 要求解码出的扩展名与此值一致 (例如 `.txt`)。
    #[arg(long, value_name = "EXT")]
    pub expect_ext: Option<String>,
}
