//! # LSB 位打包
//!
//! 将一个字节或一个 `u32` 逐位写入一组连续载体字节的最低有效位，
//! 以及其逆操作。最高位映射到第一个载体字节。

use crate::constants::{CARRIER_BYTES_PER_BYTE, CARRIER_BYTES_PER_SIZE};

/// 把 `value` 的 8 个 bit (高位在前) 写入 `carrier` 各字节的最低位。
/// 载体字节的高 7 位保持不变。
pub fn pack_byte(value: u8, carrier: &mut [u8; CARRIER_BYTES_PER_BYTE]) {
    pack_bits(u32::from(value), carrier);
}

/// 从 8 个载体字节的最低位重建一个字节。
pub fn unpack_byte(carrier: &[u8; CARRIER_BYTES_PER_BYTE]) -> u8 {
    carrier
        .iter()
        .fold(0u8, |acc, &byte| (acc << 1) | (byte & 0x1))
}

/// 把 `value` 的 32 个 bit 写入 `carrier`，bit 31 对应第 0 个载体字节。
pub fn pack_size(value: u32, carrier: &mut [u8; CARRIER_BYTES_PER_SIZE]) {
    pack_bits(value, carrier);
}

/// 从 32 个载体字节的最低位重建一个 `u32`。
pub fn unpack_size(carrier: &[u8; CARRIER_BYTES_PER_SIZE]) -> u32 {
    carrier
        .iter()
        .fold(0u32, |acc, &byte| (acc << 1) | u32::from(byte & 0x1))
}

fn pack_bits(value: u32, carrier: &mut [u8]) {
    let width = carrier.len();
    for (i, byte) in carrier.iter_mut().enumerate() {
        let bit = ((value >> (width - 1 - i)) & 0x1) as u8;
        *byte = (*byte & 0xFE) | bit;
    }
}
