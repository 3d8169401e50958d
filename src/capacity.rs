//! # 容量规划
//!
//! 在写入任何字段之前判断载体能否容纳整个容器。

use crate::constants::{
    BMP_HEADER_SIZE, BYTES_PER_PIXEL, CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_SIZE,
    HEIGHT_OFFSET, WIDTH_OFFSET,
};

/// 容器所需的载体字节数 (包括 54 字节的头部)。
pub fn required_bytes(magic_len: u64, extension_len: u64, payload_len: u64) -> u64 {
    let per_byte = CARRIER_BYTES_PER_BYTE as u64;
    let per_size = CARRIER_BYTES_PER_SIZE as u64;
    (BMP_HEADER_SIZE as u64)
        .saturating_add(magic_len.saturating_mul(per_byte))
        .saturating_add(per_size)
        .saturating_add(extension_len.saturating_mul(per_byte))
        .saturating_add(per_size)
        .saturating_add(payload_len.saturating_mul(per_byte))
}

/// 载体容量严格大于所需字节数时返回 `true`；相等时拒绝。
pub fn has_capacity(capacity: u64, magic_len: u64, extension_len: u64, payload_len: u64) -> bool {
    capacity > required_bytes(magic_len, extension_len, payload_len)
}

/// 从 BMP 头部读取宽高并计算可用字节数 (宽 × 高 × 3)。
///
/// 宽高按有符号小端整数读取并取绝对值，自上而下存储的位图高度为负数。
pub fn carrier_capacity(header: &[u8; BMP_HEADER_SIZE]) -> u64 {
    let width = read_dimension(header, WIDTH_OFFSET);
    let height = read_dimension(header, HEIGHT_OFFSET);
    width * height * BYTES_PER_PIXEL
}

fn read_dimension(header: &[u8; BMP_HEADER_SIZE], offset: usize) -> u64 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&header[offset..offset + 4]);
    u64::from(i32::from_le_bytes(raw).unsigned_abs())
}
