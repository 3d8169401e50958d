/// BMP 文件的标准头部大小 (字节)。
/// 头部原样复制，隐写从像素数据开始。
pub const BMP_HEADER_SIZE: usize = 54;

/// 头部中图像宽度的偏移量 (4 字节小端序)。
pub const WIDTH_OFFSET: usize = 18;

/// 头部中图像高度的偏移量 (4 字节小端序)。
pub const HEIGHT_OFFSET: usize = 22;

/// 每个像素的字节数 (未压缩 24 位 RGB)。
pub const BYTES_PER_PIXEL: u64 = 3;

/// 隐写单个字节所需的载体字节数。
/// 每个载体字节只存储 1 bit，因此 8 bits 需要 8 个载体字节。
pub const CARRIER_BYTES_PER_BYTE: usize = 8;

/// 隐写一个 `u32` 长度字段所需的载体字节数 (32 bits)。
pub const CARRIER_BYTES_PER_SIZE: usize = 32;

/// 默认的魔术标记，用于确认图像中确实嵌入了数据。
pub const DEFAULT_MAGIC: &str = "#*";

/// 可作为载体的图像扩展名。
pub const SUPPORTED_CARRIER_EXTENSIONS: &[&str] = &["bmp"];

/// 未指定输出路径时，隐写图像的默认文件名。
pub const DEFAULT_STEGO_NAME: &str = "stego.bmp";

/// 未指定输出路径时，恢复文件的默认文件名 (不含扩展名)。
pub const DEFAULT_DECODED_STEM: &str = "decoded_secret";
