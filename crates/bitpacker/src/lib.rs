//! # bitpacker
//!
//! Compiles flat records (integers, floats, UTF-16 code units, enums and
//! booleans) into a deterministic fixed-size binary layout, and encodes and
//! decodes records against that exact layout.
//!
//! Fields are placed in byte-wise name order, non-booleans first, each at the
//! next free byte offset. Booleans follow, either one byte each or, with
//! [PackMode::CompactBools], eight to a byte. Multi-byte numbers use the host's
//! native byte order. The stream carries no framing or schema: encoder and
//! decoder must agree on the layout out of band.
//!
//! Layouts are compiled once per record type and cached for the life of the
//! process; every later call reuses the compiled codec.
//!
//! ## Example
//!
//! ```
//! use bitpacker::{bitpack, bitpack_enum, BitPack};
//!
//! bitpack_enum! {
//!     pub enum Phase: u8 {
//!         Idle = 0,
//!         Active = 1,
//!     }
//! }
//!
//! bitpack! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Reading: CompactBools {
//!         pub sensor: u16,
//!         pub value: f32,
//!         pub phase: Phase,
//!         pub calibrated: bool,
//!         pub stale: bool,
//!     }
//! }
//!
//! let reading = Reading { sensor: 3, value: 0.25, phase: Phase::Active, calibrated: true, stale: false };
//!
//! // phase (1) + sensor (2) + value (4) + one byte of flags
//! assert_eq!(Reading::total_bytes().unwrap(), 8);
//!
//! let mut buffer = [0u8; 16];
//! reading.write_to_byte_array(&mut buffer, 4).unwrap();
//! assert_eq!(Reading::from_bytes(&buffer, 4).unwrap(), reading);
//! ```
//!
//! Schemas only known at runtime use [Schema] with name-to-[Value] maps.

pub mod bits;
pub mod compiled;
pub mod errors;
pub mod field;
pub mod layout;
pub mod prim;
pub mod record;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;
pub mod value;

pub use compiled::{Codec, Op};
pub use errors::{CompileError, Error, ReadError, WriteError};
pub use field::FieldDescriptor;
pub use layout::{FieldPlacement, Layout, PackMode};
pub use prim::{DeclaredType, PrimType};
pub use record::{BitPack, PackField, Packer};
pub use schema::{DynamicRecord, Schema};
pub use value::{CodeUnit, UnknownRepr, Value};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;

    use crate::UnknownRepr;

    /// Wraps a raw value that `from_repr` found no declared variant for.
    pub fn unknown_repr<R>(raw: R) -> UnknownRepr<R> {
        UnknownRepr(raw)
    }
}
