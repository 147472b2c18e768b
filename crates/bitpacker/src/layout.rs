//! The layout compiler: assigns every included field a byte offset (and, for
//! bit-packed booleans, a bit index) inside a fixed-size record.
//!
//! ## Ordering
//!
//! Fields are sorted by name using byte-wise comparison, so the same schema
//! always yields the same layout no matter the declaration order. Non-boolean
//! fields come first, in sorted order, each advancing the offset by its size.
//! Booleans follow, one byte each under [PackMode::NoCompaction], or eight to a
//! byte (bit 0 first) under [PackMode::CompactBools].

use tracing::{debug, trace, warn};

use crate::{errors::CompileError, field::FieldDescriptor, prim::PrimType};

/// How boolean fields are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackMode {
    /// Every boolean occupies a full byte.
    #[default]
    NoCompaction,
    /// Booleans are bit-packed, up to eight per byte.
    CompactBools,
}

/// Where a single field lives inside a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlacement {
    pub name: String,
    /// Position of the field in the descriptor slice the layout was compiled from.
    pub index: usize,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Bit within the byte at `offset`. Only meaningful for compacted booleans.
    pub bit: u8,
    /// The primitive the value is converted through.
    pub backing: PrimType,
    /// Bytes occupied. Compacted booleans report the byte they share.
    pub size: usize,
}

impl FieldPlacement {
    pub fn is_bool(&self) -> bool {
        self.backing == PrimType::Bool
    }
}

/// A compiled, immutable placement table and the record size it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    mode: PackMode,
    total_size: usize,
    placements: Vec<FieldPlacement>,
}

impl Layout {
    /// Compiles field descriptors into a layout.
    ///
    /// Fails if an included field has an empty or duplicate name, or a type
    /// outside the supported primitive set. Excluded fields are ignored.
    pub fn compile(fields: &[FieldDescriptor], mode: PackMode) -> Result<Self, CompileError> {
        Self::build(fields, mode)
            .inspect(|layout| {
                debug!(
                    fields = layout.placements.len(),
                    total_size = layout.total_size,
                    ?mode,
                    "compiled layout"
                );
                for placement in &layout.placements {
                    trace!(
                        name = %placement.name,
                        offset = placement.offset,
                        bit = placement.bit,
                        backing = %placement.backing,
                        "placed field"
                    );
                }
            })
            .inspect_err(|err| warn!(%err, "rejected schema"))
    }

    fn build(fields: &[FieldDescriptor], mode: PackMode) -> Result<Self, CompileError> {
        let mut eligible: Vec<(usize, &FieldDescriptor)> = fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.include)
            .collect();

        // `str` ordering is byte-wise; the sort is stable.
        eligible.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

        for (_, field) in &eligible {
            if field.name.is_empty() {
                return Err(CompileError::InvalidFieldName);
            }
        }
        if let Some(pair) = eligible.windows(2).find(|pair| pair[0].1.name == pair[1].1.name) {
            return Err(CompileError::DuplicateFieldName(pair[0].1.name.clone()));
        }

        let (bools, scalars): (Vec<_>, Vec<_>) =
            eligible.into_iter().partition(|(_, field)| field.ty.is_bool());

        let mut placements = Vec::with_capacity(bools.len() + scalars.len());
        let mut offset = 0;

        for (index, field) in scalars {
            let backing = field.backing_type()?;
            let size = backing.size();

            placements.push(FieldPlacement {
                name: field.name.clone(),
                index,
                offset,
                bit: 0,
                backing,
                size,
            });

            offset += size;
        }

        let mut bit = 0u8;
        for (index, field) in bools {
            placements.push(FieldPlacement {
                name: field.name.clone(),
                index,
                offset,
                bit,
                backing: PrimType::Bool,
                size: 1,
            });

            bit = match mode {
                PackMode::NoCompaction => 8,
                PackMode::CompactBools => bit + 1,
            };

            if bit == 8 {
                offset += 1;
                bit = 0;
            }
        }

        // A partially filled trailing byte still counts.
        if bit > 0 {
            offset += 1;
        }

        Ok(Layout {
            mode,
            total_size: offset,
            placements,
        })
    }

    pub fn mode(&self) -> PackMode {
        self.mode
    }

    /// Size in bytes of every record encoded with this layout.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Placements in processing order: non-booleans, then booleans, each sorted by name.
    pub fn placements(&self) -> &[FieldPlacement] {
        &self.placements
    }

    /// Looks up a placement by field name.
    pub fn get(&self, name: &str) -> Option<&FieldPlacement> {
        self.placements.iter().find(|placement| placement.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
