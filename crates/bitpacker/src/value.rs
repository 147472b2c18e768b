//! Field values as they move between records and the codec.

use crate::prim::PrimType;

/// A single field value, tagged with its backing type.
///
/// Enum fields travel as the variant of their underlying integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Char16(u16),
}

impl Value {
    /// The backing type this value is stored as.
    pub fn prim_type(&self) -> PrimType {
        match self {
            Value::Bool(_) => PrimType::Bool,
            Value::I8(_) => PrimType::I8,
            Value::U8(_) => PrimType::U8,
            Value::I16(_) => PrimType::I16,
            Value::U16(_) => PrimType::U16,
            Value::I32(_) => PrimType::I32,
            Value::U32(_) => PrimType::U32,
            Value::I64(_) => PrimType::I64,
            Value::U64(_) => PrimType::U64,
            Value::F32(_) => PrimType::F32,
            Value::F64(_) => PrimType::F64,
            Value::Char16(_) => PrimType::Char16,
        }
    }
}

/// A UTF-16 code unit field.
///
/// Rust's `char` is a full scalar value, so two-byte character fields use this
/// wrapper instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeUnit(pub u16);

impl CodeUnit {
    /// Returns the unit as a `char`, or `None` for a lone surrogate.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0 as u32)
    }
}

impl From<u16> for CodeUnit {
    fn from(value: u16) -> Self {
        CodeUnit(value)
    }
}

impl TryFrom<char> for CodeUnit {
    type Error = char;

    /// Fails with the input when it lies outside the basic multilingual plane.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        u16::try_from(value as u32)
            .map(CodeUnit)
            .map_err(|_| value)
    }
}

/// The raw integer of an enum field that matches none of its declared values.
///
/// Only the `from_repr` generated by [crate::bitpack_enum!] builds one, so a
/// declared value is never held here and every enum re-encodes and decodes to
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownRepr<R>(pub(crate) R);

impl<R: Copy> UnknownRepr<R> {
    pub fn get(self) -> R {
        self.0
    }
}
