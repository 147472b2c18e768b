//! Low-level byte and bit access used by the compiled codec.
//!
//! Offsets are relative to the slice passed in. Callers bounds-check the
//! record window once up front; these helpers index directly.
//!
//! Bits are addressed LSB-first: bit 0 is the low bit of its byte.

use crate::{prim::PrimType, value::Value};

/// Reads bit `bit` (0 = LSB) of the byte at `byte_index`.
pub fn read_bit_at(data: &[u8], byte_index: usize, bit: u8) -> bool {
    (data[byte_index] >> bit) & 1 == 1
}

/// Sets bit `bit` (0 = LSB) of the byte at `byte_index`. Other bits are kept.
pub fn set_bit_at(data: &mut [u8], byte_index: usize, bit: u8) {
    data[byte_index] |= 1 << bit;
}

/// Writes `value` at `offset` in host byte order, using exactly its type's size.
pub fn write_scalar(data: &mut [u8], offset: usize, value: Value) {
    match value {
        Value::Bool(v) => put(data, offset, &[v as u8]),
        Value::I8(v) => put(data, offset, &v.to_ne_bytes()),
        Value::U8(v) => put(data, offset, &[v]),
        Value::I16(v) => put(data, offset, &v.to_ne_bytes()),
        Value::U16(v) => put(data, offset, &v.to_ne_bytes()),
        Value::I32(v) => put(data, offset, &v.to_ne_bytes()),
        Value::U32(v) => put(data, offset, &v.to_ne_bytes()),
        Value::I64(v) => put(data, offset, &v.to_ne_bytes()),
        Value::U64(v) => put(data, offset, &v.to_ne_bytes()),
        Value::F32(v) => put(data, offset, &v.to_ne_bytes()),
        Value::F64(v) => put(data, offset, &v.to_ne_bytes()),
        Value::Char16(v) => put(data, offset, &v.to_ne_bytes()),
    }
}

/// Reads a `ty` value at `offset` in host byte order.
pub fn read_scalar(data: &[u8], offset: usize, ty: PrimType) -> Value {
    match ty {
        PrimType::Bool => Value::Bool(data[offset] != 0),
        PrimType::I8 => Value::I8(i8::from_ne_bytes(window(data, offset))),
        PrimType::U8 => Value::U8(data[offset]),
        PrimType::I16 => Value::I16(i16::from_ne_bytes(window(data, offset))),
        PrimType::U16 => Value::U16(u16::from_ne_bytes(window(data, offset))),
        PrimType::I32 => Value::I32(i32::from_ne_bytes(window(data, offset))),
        PrimType::U32 => Value::U32(u32::from_ne_bytes(window(data, offset))),
        PrimType::I64 => Value::I64(i64::from_ne_bytes(window(data, offset))),
        PrimType::U64 => Value::U64(u64::from_ne_bytes(window(data, offset))),
        PrimType::F32 => Value::F32(f32::from_ne_bytes(window(data, offset))),
        PrimType::F64 => Value::F64(f64::from_ne_bytes(window(data, offset))),
        PrimType::Char16 => Value::Char16(u16::from_ne_bytes(window(data, offset))),
    }
}

fn put(data: &mut [u8], offset: usize, bytes: &[u8]) {
    data[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn window<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bit_at() {
        let data = [0b0000_0101];
        assert!(read_bit_at(&data, 0, 0));
        assert!(!read_bit_at(&data, 0, 1));
        assert!(read_bit_at(&data, 0, 2));
    }

    #[test]
    fn test_set_bit_keeps_other_bits() {
        let mut data = [0b1000_0001, 0];
        set_bit_at(&mut data, 0, 3);
        assert_eq!(data, [0b1000_1001, 0]);
    }

    #[test]
    fn test_write_scalar_host_order() {
        let mut data = [0u8; 6];
        write_scalar(&mut data, 1, Value::I32(-2));
        assert_eq!(data[0], 0);
        assert_eq!(&data[1..5], &(-2i32).to_ne_bytes());
        assert_eq!(data[5], 0);
    }

    #[test]
    fn test_read_scalar() {
        let mut data = [0u8; 9];
        data[1..9].copy_from_slice(&1.25f64.to_ne_bytes());
        assert_eq!(read_scalar(&data, 1, PrimType::F64), Value::F64(1.25));

        data[0] = 0xff;
        assert_eq!(read_scalar(&data, 0, PrimType::I8), Value::I8(-1));
        assert_eq!(read_scalar(&data, 0, PrimType::U8), Value::U8(255));
    }

    #[test]
    fn test_read_bool_byte() {
        assert_eq!(read_scalar(&[2], 0, PrimType::Bool), Value::Bool(true));
        assert_eq!(read_scalar(&[0], 0, PrimType::Bool), Value::Bool(false));
    }
}
