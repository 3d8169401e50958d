//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心编解码流水线以及向用户报告结果。
//! 输出文件只在整个流水线成功之后才写入，失败时不会留下新的目标文件。

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::config::CodecConfig;
use crate::constants::{DEFAULT_DECODED_STEM, DEFAULT_STEGO_NAME, SUPPORTED_CARRIER_EXTENSIONS};
use crate::container::{Container, extension_of};
use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::StegoError;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// 处理 'Encode' 命令的执行逻辑。
///
/// 负责读取载体图像和秘密文件、检查容量、调用编码流水线，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `EncodeArgs` 结构体。
/// * `config` - 本次运行的编解码配置。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 载体不是 BMP 文件，或目标文件已存在且未指定 `--force`。
/// * 无法读取载体图像或秘密文件。
/// * 图像没有足够的空间来隐藏秘密文件。
/// * 编码流水线在执行过程中失败。
/// * 无法写入到目标图像文件。
pub fn handle_encode(args: EncodeArgs, config: &CodecConfig) -> Result<()> {
    ensure_bmp_path(&args.carrier)?;

    let dest = args
        .dest
        .unwrap_or_else(|| sibling(&args.carrier, DEFAULT_STEGO_NAME));
    ensure_writable(&dest, args.force)?;

    let picture = fs::read(&args.carrier).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.carrier.to_string_lossy().red().bold()
        )
    })?;

    let secret = fs::read(&args.secret).with_context(|| {
        format!(
            "Unable to read secret file: {}",
            args.secret.to_string_lossy().red().bold()
        )
    })?;

    let container = Container::new(extension_of(&args.secret)?, secret)?;

    let mut stego = Vec::with_capacity(picture.len());
    let summary = encode(picture.as_slice(), &mut stego, &container, config).with_context(|| {
        format!(
            "Failed to hide '{}' in '{}'.",
            args.secret.to_string_lossy().red().bold(),
            args.carrier.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, stego).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Hidden {} bytes with extension '{}' ({} of {} carrier bytes used).",
        container.payload().len().to_string().green().bold(),
        container.extension().green(),
        summary.required.to_string().green().bold(),
        summary.capacity.to_string().green().bold()
    );
    println!(
        "The file has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、校验魔术标记并恢复扩展名与载荷，
/// 最后将恢复的内容写入输出文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `DecodeArgs` 结构体。
/// * `config` - 本次运行的编解码配置。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输入不是 BMP 文件，或输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 图像中没有隐藏数据，或数据被截断。
/// * 无法写入到输出文件。
pub fn handle_decode(args: DecodeArgs, config: &CodecConfig) -> Result<()> {
    ensure_bmp_path(&args.stego)?;

    if let Some(output) = &args.output {
        ensure_writable(output, args.force)?;
    }

    let picture = fs::read(&args.stego).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.stego.to_string_lossy().red().bold()
        )
    })?;

    let container = decode(picture.as_slice(), config).with_context(|| {
        format!(
            "Failed to recover hidden data from '{}'. \nThe image may not contain a hidden file or is corrupted.",
            args.stego.to_string_lossy().red().bold()
        )
    })?;

    let output = match args.output {
        Some(output) => output,
        None => {
            let output = sibling(&args.stego, &default_output_name(container.extension()));
            ensure_writable(&output, args.force)?;
            output
        }
    };

    println!(
        "Recovered {} bytes with extension '{}'.",
        container.payload().len().to_string().green().bold(),
        container.extension().green()
    );

    fs::write(&output, container.into_payload()).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The file has been successfully recovered and saved: {}",
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

fn ensure_bmp_path(path: &Path) -> Result<(), StegoError> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_CARRIER_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });
    if supported {
        Ok(())
    } else {
        Err(StegoError::InvalidArgument(format!(
            "'{}' is not a BMP image (expected one of: {})",
            path.display(),
            SUPPORTED_CARRIER_EXTENSIONS.join(", ")
        )))
    }
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 解码默认输出的文件名：`decoded_secret` 加上解码出的扩展名。
///
/// 扩展名来自不可信的隐写数据，拼接后若不是单一的普通文件名
/// (含路径分隔符、`..` 或 NUL)，退回到不带扩展名的 `decoded_secret`。
fn default_output_name(extension: &str) -> String {
    let name = format!("{DEFAULT_DECODED_STEM}{extension}");
    let mut components = Path::new(&name).components();
    let plain = !name.contains(['/', '\\', '\0'])
        && matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
    if plain {
        name
    } else {
        println!(
            "{} decoded extension {:?} is not a plain file name; saving without it.",
            "Warning:".yellow().bold(),
            extension
        );
        DEFAULT_DECODED_STEM.to_string()
    }
}

/// 在 `path` 所在目录下生成名为 `name` 的路径。
fn sibling(path: &Path, name: &str) -> PathBuf {
    path.parent()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}
