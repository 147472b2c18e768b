//! JSON‑deserializable schema description.
//!
//! These types describe a record schema so it can ship as data (for example a
//! schema file next to your application) and be compiled with
//! [`Schema::from_def`](crate::schema::Schema::from_def).
//!
//! ```json
//! {
//!   "mode": "CompactBools",
//!   "fields": [
//!     { "name": "id", "ty": { "type": "UInt16" } },
//!     { "name": "state", "ty": { "type": "Enum", "name": "State", "underlying": "UInt8" } },
//!     { "name": "online", "ty": { "type": "Bool" } },
//!     { "name": "note", "ty": { "type": "Unsupported", "name": "String" }, "include": false }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    layout::PackMode,
    prim::{DeclaredType, PrimType},
};

/// How boolean fields are stored.
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy)]
pub enum PackModeDef {
    #[default]
    /// One byte per boolean.
    NoCompaction,
    /// Up to eight booleans per byte.
    CompactBools,
}

/// Underlying type of an enum field. Non-integers fail to compile.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub enum PrimDef {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    /// UTF‑16 code unit.
    Char16,
}

/// Declared type of a field.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum TypeDef {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    /// UTF‑16 code unit.
    Char16,
    /// An enumerated type stored as its underlying integer.
    Enum { name: String, underlying: PrimDef },
    /// A type the packer cannot store; only valid on excluded fields.
    Unsupported { name: String },
}

/// Top‑level schema definition.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchemaDef {
    #[serde(default)]
    pub mode: PackModeDef,
    /// Fields in declaration order; the layout sorts them by name.
    pub fields: Vec<FieldDef>,
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeDef,
    /// Excluded fields take no space in the layout.
    #[serde(default = "default_include")]
    pub include: bool,
}

fn default_include() -> bool {
    true
}

impl From<PackModeDef> for PackMode {
    fn from(value: PackModeDef) -> Self {
        match value {
            PackModeDef::NoCompaction => PackMode::NoCompaction,
            PackModeDef::CompactBools => PackMode::CompactBools,
        }
    }
}

impl From<PrimDef> for PrimType {
    fn from(value: PrimDef) -> Self {
        match value {
            PrimDef::Bool => PrimType::Bool,
            PrimDef::Int8 => PrimType::I8,
            PrimDef::UInt8 => PrimType::U8,
            PrimDef::Int16 => PrimType::I16,
            PrimDef::UInt16 => PrimType::U16,
            PrimDef::Int32 => PrimType::I32,
            PrimDef::UInt32 => PrimType::U32,
            PrimDef::Int64 => PrimType::I64,
            PrimDef::UInt64 => PrimType::U64,
            PrimDef::Float32 => PrimType::F32,
            PrimDef::Float64 => PrimType::F64,
            PrimDef::Char16 => PrimType::Char16,
        }
    }
}

impl From<TypeDef> for DeclaredType {
    fn from(value: TypeDef) -> Self {
        let prim = match value {
            TypeDef::Bool => PrimType::Bool,
            TypeDef::Int8 => PrimType::I8,
            TypeDef::UInt8 => PrimType::U8,
            TypeDef::Int16 => PrimType::I16,
            TypeDef::UInt16 => PrimType::U16,
            TypeDef::Int32 => PrimType::I32,
            TypeDef::UInt32 => PrimType::U32,
            TypeDef::Int64 => PrimType::I64,
            TypeDef::UInt64 => PrimType::U64,
            TypeDef::Float32 => PrimType::F32,
            TypeDef::Float64 => PrimType::F64,
            TypeDef::Char16 => PrimType::Char16,
            TypeDef::Enum { name, underlying } => {
                return DeclaredType::Enum {
                    name,
                    underlying: underlying.into(),
                };
            }
            TypeDef::Unsupported { name } => return DeclaredType::Unsupported(name),
        };
        DeclaredType::Prim(prim)
    }
}
