//! # 容器布局
//!
//! 隐藏数据在像素字节中依次排列为：
//! 魔术标记 → 扩展名长度 → 扩展名 → 载荷长度 → 载荷。
//! 编码器 ([`Container::fields`]) 和解码器都遍历同一张 [`LAYOUT`] 表。

use crate::config::CodecConfig;
use crate::constants::{BMP_HEADER_SIZE, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_SIZE};
use crate::error::{Stage, StegoError};
use std::path::Path;

/// 长度前缀的数据段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Extension,
    Payload,
}

/// 字段的种类。`Length` 与 `Bytes` 通过 [`Section`] 配对。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Magic,
    Length(Section),
    Bytes(Section),
}

/// 容器字段的固定顺序。
pub const LAYOUT: [(Stage, FieldKind); 5] = [
    (Stage::Magic, FieldKind::Magic),
    (Stage::ExtensionLength, FieldKind::Length(Section::Extension)),
    (Stage::Extension, FieldKind::Bytes(Section::Extension)),
    (Stage::PayloadLength, FieldKind::Length(Section::Payload)),
    (Stage::Payload, FieldKind::Bytes(Section::Payload)),
];

/// 待写入的单个字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Magic(&'a [u8]),
    Length(u32),
    Bytes(&'a [u8]),
}

impl Field<'_> {
    /// 该字段占用的载体字节数。
    pub fn carrier_len(&self) -> u64 {
        match self {
            Field::Magic(bytes) | Field::Bytes(bytes) => {
                bytes.len() as u64 * CARRIER_BYTES_PER_BYTE as u64
            }
            Field::Length(_) => CARRIER_BYTES_PER_SIZE as u64,
        }
    }
}

/// 一次编码/解码所携带的秘密文件：扩展名加上原始字节。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    extension: String,
    payload: Vec<u8>,
}

impl Container {
    /// # Errors
    ///
    /// 扩展名或载荷长度超出 `u32` 范围时返回 [`StegoError::PayloadTooLarge`]。
    pub fn new(extension: impl Into<String>, payload: Vec<u8>) -> Result<Self, StegoError> {
        let extension = extension.into();
        length_field(Stage::ExtensionLength, extension.len())?;
        length_field(Stage::PayloadLength, payload.len())?;
        Ok(Self { extension, payload })
    }

    /// 由解码出的原始扩展名字节构造容器。
    ///
    /// # Errors
    ///
    /// 扩展名不是合法 UTF-8 时返回 [`StegoError::InvalidExtension`]，不做有损替换。
    pub fn from_raw(extension: Vec<u8>, payload: Vec<u8>) -> Result<Self, StegoError> {
        let extension = String::from_utf8(extension)
            .map_err(|err| StegoError::InvalidExtension { found: err.into_bytes() })?;
        Self::new(extension, payload)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    fn section(&self, section: Section) -> &[u8] {
        match section {
            Section::Extension => self.extension.as_bytes(),
            Section::Payload => &self.payload,
        }
    }

    /// 按 [`LAYOUT`] 的顺序给出各字段。
    pub fn fields<'a>(&'a self, config: &'a CodecConfig) -> [(Stage, Field<'a>); 5] {
        LAYOUT.map(|(stage, kind)| {
            let field = match kind {
                FieldKind::Magic => Field::Magic(config.magic()),
                // `new` 已保证两个长度都能放进 u32
                FieldKind::Length(section) => Field::Length(self.section(section).len() as u32),
                FieldKind::Bytes(section) => Field::Bytes(self.section(section)),
            };
            (stage, field)
        })
    }

    /// 写入该容器所需的载体字节数 (含头部)。
    pub fn required_bytes(&self, config: &CodecConfig) -> u64 {
        self.fields(config)
            .iter()
            .fold(BMP_HEADER_SIZE as u64, |total, (_, field)| {
                total.saturating_add(field.carrier_len())
            })
    }
}

pub(crate) fn length_field(stage: Stage, len: usize) -> Result<u32, StegoError> {
    u32::try_from(len).map_err(|_| StegoError::PayloadTooLarge { stage, len })
}

/// 取文件名中最后一个 `.` 及其之后的部分作为扩展名；没有 `.` 时返回空串。
///
/// # Errors
///
/// 扩展名部分不是合法 UTF-8 时返回 [`StegoError::InvalidExtension`]。
pub fn extension_of(path: &Path) -> Result<String, StegoError> {
    let Some(name) = path.file_name() else {
        return Ok(String::new());
    };
    let name = name.as_encoded_bytes();
    match name.iter().rposition(|&b| b == b'.') {
        Some(idx) => String::from_utf8(name[idx..].to_vec())
            .map_err(|err| StegoError::InvalidExtension { found: err.into_bytes() }),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity;

    #[test]
    fn extension_comes_from_last_dot_of_file_name() -> Result<(), StegoError> {
        assert_eq!(extension_of(Path::new("secret.txt"))?, ".txt");
        assert_eq!(extension_of(Path::new("archive.tar.gz"))?, ".gz");
        assert_eq!(extension_of(Path::new("dir.d/notes"))?, "");
        assert_eq!(extension_of(Path::new(".bashrc"))?, ".bashrc");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_extension_is_rejected_not_replaced() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"secret.\xff"));
        assert!(matches!(
            extension_of(path),
            Err(StegoError::InvalidExtension { ref found }) if found.as_slice() == b".\xff"
        ));

        // 文件名主体不是 UTF-8 不影响扩展名
        let path = Path::new(OsStr::from_bytes(b"\xffsecret.txt"));
        assert!(matches!(extension_of(path), Ok(ref ext) if ext == ".txt"));
    }

    #[test]
    fn raw_extension_must_be_utf8() -> Result<(), StegoError> {
        assert!(matches!(
            Container::from_raw(vec![0x2e, 0xff], b"data".to_vec()),
            Err(StegoError::InvalidExtension { ref found }) if found.as_slice() == [0x2e, 0xff]
        ));
        let container = Container::from_raw(b".txt".to_vec(), b"data".to_vec())?;
        assert_eq!(container.extension(), ".txt");
        Ok(())
    }

    #[test]
    fn fields_follow_the_layout() -> Result<(), StegoError> {
        let config = CodecConfig::default();
        let container = Container::new(".txt", b"hi".to_vec())?;
        let fields = container.fields(&config);

        let stages: Vec<Stage> = fields.iter().map(|(stage, _)| *stage).collect();
        let layout: Vec<Stage> = LAYOUT.iter().map(|(stage, _)| *stage).collect();
        assert_eq!(stages, layout);

        assert_eq!(fields[0].1, Field::Magic(b"#*"));
        assert_eq!(fields[1].1, Field::Length(4));
        assert_eq!(fields[2].1, Field::Bytes(b".txt"));
        assert_eq!(fields[3].1, Field::Length(2));
        assert_eq!(fields[4].1, Field::Bytes(b"hi"));
        Ok(())
    }

    #[test]
    fn required_bytes_agree_with_the_planner() -> Result<(), StegoError> {
        let config = CodecConfig::default();
        let container = Container::new(".txt", b"hi".to_vec())?;
        assert_eq!(container.required_bytes(&config), 218);
        assert_eq!(
            container.required_bytes(&config),
            capacity::required_bytes(2, 4, 2)
        );
        Ok(())
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn lengths_beyond_u32_do_not_fit_the_length_field() {
        let len = u32::MAX as usize + 1;
        assert!(matches!(
            length_field(Stage::PayloadLength, len),
            Err(StegoError::PayloadTooLarge {
                stage: Stage::PayloadLength,
                len: l,
            }) if l == len
        ));
        assert_eq!(length_field(Stage::PayloadLength, u32::MAX as usize).ok(), Some(u32::MAX));
    }
}
