//! The codec engine: a [Layout] lowered into one specialized operation per
//! field, then run against byte buffers.

use crate::{
    bits,
    errors::{ReadError, WriteError},
    layout::{FieldPlacement, Layout, PackMode},
    prim::PrimType,
    value::Value,
};

/// How a single field is moved between a [Value] and the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// A one-byte integer, stored directly.
    Byte { signed: bool },
    /// A multi-byte number, stored in host byte order.
    Scalar(PrimType),
    /// A boolean occupying a whole byte: 1 or 0 on write, non-zero on read.
    BoolByte,
    /// A bit-packed boolean at this bit (0 = LSB) of its byte. Writing only
    /// ever sets the bit.
    Flag(u8),
}

impl Op {
    fn for_placement(placement: &FieldPlacement, mode: PackMode) -> Self {
        match placement.backing {
            PrimType::Bool if mode == PackMode::CompactBools => Op::Flag(placement.bit),
            PrimType::Bool => Op::BoolByte,
            PrimType::I8 => Op::Byte { signed: true },
            PrimType::U8 => Op::Byte { signed: false },
            prim => Op::Scalar(prim),
        }
    }
}

/// A compiled layout, ready to encode and decode records.
///
/// Built once per schema; immutable and shareable across threads afterwards.
#[derive(Debug, Clone)]
pub struct Codec {
    layout: Layout,
    ops: Vec<Op>,
}

impl From<Layout> for Codec {
    fn from(layout: Layout) -> Self {
        Codec::new(layout)
    }
}

impl Codec {
    pub fn new(layout: Layout) -> Self {
        let ops = layout
            .placements()
            .iter()
            .map(|placement| Op::for_placement(placement, layout.mode()))
            .collect();

        Codec { layout, ops }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn total_size(&self) -> usize {
        self.layout.total_size()
    }

    /// The compiled operations, aligned with [Layout::placements].
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Encodes a record into `buffer[offset..offset + total_size]`.
    ///
    /// `get` supplies the value of each placed field. Every value is fetched
    /// and type-checked before the first byte is written, so on error the
    /// buffer is untouched. Bytes outside the window are never touched.
    ///
    /// Compacted booleans are OR-ed into their byte; pass a zeroed window.
    pub fn encode<F>(&self, buffer: &mut [u8], offset: usize, mut get: F) -> Result<(), WriteError>
    where
        F: FnMut(&FieldPlacement) -> Result<Value, WriteError>,
    {
        let values = self
            .layout
            .placements()
            .iter()
            .map(|placement| {
                let value = get(placement)?;
                if value.prim_type() != placement.backing {
                    return Err(WriteError::TypeMismatch {
                        field: placement.name.clone(),
                        expected: placement.backing,
                        found: value.prim_type(),
                    });
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let needed = self.total_size();
        let Some(range) = record_window(buffer.len(), offset, needed) else {
            return Err(WriteError::InsufficientBuffer {
                needed,
                remaining: buffer.len().saturating_sub(offset),
            });
        };
        let window = &mut buffer[range];

        for ((placement, op), value) in self.layout.placements().iter().zip(&self.ops).zip(values) {
            match (*op, value) {
                (Op::Flag(bit), Value::Bool(true)) => {
                    bits::set_bit_at(window, placement.offset, bit)
                }
                (Op::Flag(_), _) => {}
                (_, value) => bits::write_scalar(window, placement.offset, value),
            }
        }

        Ok(())
    }

    /// Decodes a record from `buffer[offset..offset + total_size]`.
    ///
    /// `set` receives each placed field's value. Enum values arrive as their
    /// raw underlying integer; nothing checks them against known variants.
    pub fn decode<F>(&self, buffer: &[u8], offset: usize, mut set: F) -> Result<(), ReadError>
    where
        F: FnMut(&FieldPlacement, Value),
    {
        let needed = self.total_size();
        let Some(range) = record_window(buffer.len(), offset, needed) else {
            return Err(ReadError::InsufficientBuffer {
                needed,
                remaining: buffer.len().saturating_sub(offset),
            });
        };
        let window = &buffer[range];

        for (placement, op) in self.layout.placements().iter().zip(&self.ops) {
            let offset = placement.offset;
            let value = match *op {
                Op::Flag(bit) => Value::Bool(bits::read_bit_at(window, offset, bit)),
                Op::BoolByte => bits::read_scalar(window, offset, PrimType::Bool),
                Op::Byte { signed: true } => bits::read_scalar(window, offset, PrimType::I8),
                Op::Byte { signed: false } => bits::read_scalar(window, offset, PrimType::U8),
                Op::Scalar(prim) => bits::read_scalar(window, offset, prim),
            };
            set(placement, value);
        }

        Ok(())
    }
}

/// The byte range a record occupies, or `None` if it doesn't fit.
fn record_window(len: usize, offset: usize, size: usize) -> Option<std::ops::Range<usize>> {
    offset
        .checked_add(size)
        .filter(|&end| end <= len)
        .map(|end| offset..end)
}
