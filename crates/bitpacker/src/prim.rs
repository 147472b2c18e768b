//! Primitive backing types and the declared types fields can carry.

use std::fmt;

/// A primitive type the codec knows how to convert to and from bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimType {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// A UTF-16 code unit.
    Char16,
}

impl PrimType {
    /// Size of the type in bytes when stored in a layout.
    ///
    /// Booleans report one byte; bit-packed booleans share theirs.
    pub const fn size(self) -> usize {
        match self {
            PrimType::Bool | PrimType::I8 | PrimType::U8 => 1,
            PrimType::I16 | PrimType::U16 | PrimType::Char16 => 2,
            PrimType::I32 | PrimType::U32 | PrimType::F32 => 4,
            PrimType::I64 | PrimType::U64 | PrimType::F64 => 8,
        }
    }

    /// True for the signed and unsigned integer types, the only valid enum backings.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            PrimType::I8
                | PrimType::U8
                | PrimType::I16
                | PrimType::U16
                | PrimType::I32
                | PrimType::U32
                | PrimType::I64
                | PrimType::U64
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            PrimType::Bool => "bool",
            PrimType::I8 => "i8",
            PrimType::U8 => "u8",
            PrimType::I16 => "i16",
            PrimType::U16 => "u16",
            PrimType::I32 => "i32",
            PrimType::U32 => "u32",
            PrimType::I64 => "i64",
            PrimType::U64 => "u64",
            PrimType::F32 => "f32",
            PrimType::F64 => "f64",
            PrimType::Char16 => "char16",
        }
    }
}

impl fmt::Display for PrimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type a field is declared with, before the compiler resolves its backing type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Prim(PrimType),
    /// An enumerated type stored as its underlying integer.
    Enum { name: String, underlying: PrimType },
    /// Any other type, named for diagnostics. Never packable.
    Unsupported(String),
}

impl DeclaredType {
    pub fn is_bool(&self) -> bool {
        matches!(self, DeclaredType::Prim(PrimType::Bool))
    }
}

impl From<PrimType> for DeclaredType {
    fn from(value: PrimType) -> Self {
        DeclaredType::Prim(value)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Prim(prim) => write!(f, "{prim}"),
            DeclaredType::Enum { name, underlying } => write!(f, "{name} ({underlying})"),
            DeclaredType::Unsupported(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(PrimType::Bool.size(), 1);
        assert_eq!(PrimType::Char16.size(), 2);
        assert_eq!(PrimType::F32.size(), 4);
        assert_eq!(PrimType::U64.size(), 8);
    }

    #[test]
    fn test_is_integer() {
        assert!(PrimType::I8.is_integer());
        assert!(PrimType::U64.is_integer());
        assert!(!PrimType::Bool.is_integer());
        assert!(!PrimType::F64.is_integer());
        assert!(!PrimType::Char16.is_integer());
    }

    #[test]
    fn test_declared_type_display() {
        let ty = DeclaredType::Enum {
            name: "Color".to_string(),
            underlying: PrimType::U8,
        };
        assert_eq!(ty.to_string(), "Color (u8)");
        assert_eq!(DeclaredType::Unsupported("String".into()).to_string(), "String");
    }
}
