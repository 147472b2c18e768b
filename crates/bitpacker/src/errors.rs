//! Error types for layout compilation and for reading and writing records.

use thiserror::Error;

use crate::prim::PrimType;

/// Errors produced when compiling field descriptors into a [crate::layout::Layout].
///
/// These are configuration errors: the schema must be fixed, retrying won't help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The field's declared type is outside the supported primitive set.
    #[error("cannot bit pack field `{field}` of type {ty}: it is not a supported type")]
    UnsupportedType { field: String, ty: String },
    /// An enum field's underlying type is not an integer.
    #[error("cannot bit pack enum field `{field}`: underlying type {underlying} is not an integer")]
    InvalidEnumBacking { field: String, underlying: PrimType },
    /// An included field has an empty name.
    #[error("field name must not be empty")]
    InvalidFieldName,
    /// Two included fields share a name, so their order is ambiguous.
    #[error("field `{0}` is declared more than once")]
    DuplicateFieldName(String),
}

/// Errors produced when decoding a record from bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// Fewer than the layout's total size remain after the offset.
    #[error(
        "cannot get record from bytes: expected {needed} and got {remaining} remaining bytes after offset"
    )]
    InsufficientBuffer { needed: usize, remaining: usize },
}

/// Errors produced when encoding a record into bytes.
///
/// Every variant is raised before the buffer is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// Fewer than the layout's total size remain after the offset.
    #[error(
        "cannot write record to byte array: needed {needed} bytes, and there are only {remaining} remaining bytes after offset"
    )]
    InsufficientBuffer { needed: usize, remaining: usize },
    /// The record has no value for a field in the layout.
    #[error("record has no value for field `{0}`")]
    MissingField(String),
    /// The record's value does not have the field's backing type.
    #[error("field `{field}` expects a {expected} value, got {found}")]
    TypeMismatch {
        field: String,
        expected: PrimType,
        found: PrimType,
    },
}

/// Any error raised through the [crate::record::BitPack] convenience methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
