//! Field descriptors: the input to the layout compiler.

use crate::{
    errors::CompileError,
    prim::{DeclaredType, PrimType},
};

/// A single named, typed field of a record schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Used for layout ordering and diagnostics.
    pub name: String,
    /// The type the field is declared with.
    pub ty: DeclaredType,
    /// Excluded fields take no space and are never read or written.
    pub include: bool,
}

impl FieldDescriptor {
    /// An included field.
    pub fn new(name: impl Into<String>, ty: impl Into<DeclaredType>) -> Self {
        FieldDescriptor {
            name: name.into(),
            ty: ty.into(),
            include: true,
        }
    }

    /// A field that stays on the record but out of the layout.
    pub fn excluded(name: impl Into<String>, ty: impl Into<DeclaredType>) -> Self {
        FieldDescriptor {
            include: false,
            ..Self::new(name, ty)
        }
    }

    /// Resolves the primitive type the codec stores this field as.
    pub fn backing_type(&self) -> Result<PrimType, CompileError> {
        match &self.ty {
            DeclaredType::Prim(prim) => Ok(*prim),
            DeclaredType::Enum { underlying, .. } if underlying.is_integer() => Ok(*underlying),
            DeclaredType::Enum { underlying, .. } => Err(CompileError::InvalidEnumBacking {
                field: self.name.clone(),
                underlying: *underlying,
            }),
            DeclaredType::Unsupported(ty) => Err(CompileError::UnsupportedType {
                field: self.name.clone(),
                ty: ty.clone(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldDef> for FieldDescriptor {
    fn from(value: crate::serde::FieldDef) -> Self {
        FieldDescriptor {
            name: value.name,
            ty: value.ty.into(),
            include: value.include,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_type_of_enum() {
        let field = FieldDescriptor::new(
            "color",
            DeclaredType::Enum {
                name: "Color".to_string(),
                underlying: PrimType::I16,
            },
        );
        assert_eq!(field.backing_type(), Ok(PrimType::I16));
    }

    #[test]
    fn test_backing_type_rejects_float_enum() {
        let field = FieldDescriptor::new(
            "ratio",
            DeclaredType::Enum {
                name: "Ratio".to_string(),
                underlying: PrimType::F32,
            },
        );
        assert_eq!(
            field.backing_type(),
            Err(CompileError::InvalidEnumBacking {
                field: "ratio".to_string(),
                underlying: PrimType::F32,
            })
        );
    }

    #[test]
    fn test_excluded() {
        let field = FieldDescriptor::excluded("label", DeclaredType::Unsupported("String".into()));
        assert!(!field.include);
        assert_eq!(field.name, "label");
    }
}
