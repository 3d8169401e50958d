//! # 编解码配置
//!
//! 魔术标记等全局参数在启动时构造一次，之后以共享引用传递，不再修改。

use crate::constants::DEFAULT_MAGIC;
use crate::error::StegoError;

/// 编码与解码共用的不可变配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    magic: Vec<u8>,
    expected_extension: Option<String>,
}

impl CodecConfig {
    /// 使用自定义魔术标记构造配置。
    ///
    /// # Errors
    ///
    /// 魔术标记为空时返回 [`StegoError::InvalidArgument`]。
    pub fn new(magic: impl Into<Vec<u8>>) -> Result<Self, StegoError> {
        let magic = magic.into();
        if magic.is_empty() {
            return Err(StegoError::InvalidArgument(
                "the magic marker must not be empty".to_string(),
            ));
        }
        Ok(Self {
            magic,
            expected_extension: None,
        })
    }

    /// 要求解码出的扩展名必须等于 `extension`，作为附加的完整性检查。
    pub fn with_expected_extension(mut self, extension: impl Into<String>) -> Self {
        self.expected_extension = Some(extension.into());
        self
    }

    pub fn magic(&self) -> &[u8] {
        &self.magic
    }

    pub fn expected_extension(&self) -> Option<&str> {
        self.expected_extension.as_deref()
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            magic: DEFAULT_MAGIC.as_bytes().to_vec(),
            expected_extension: None,
        }
    }
}
