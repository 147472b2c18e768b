//! Schema: a layout compiled from field descriptors built at runtime, used to
//! encode and decode records held as name-to-value maps.

use std::collections::BTreeMap;

use crate::{
    compiled::Codec,
    errors::{CompileError, ReadError, WriteError},
    field::FieldDescriptor,
    layout::{Layout, PackMode},
    value::Value,
};

/// A record whose fields are looked up by name.
pub type DynamicRecord = BTreeMap<String, Value>;

/// A compiled schema. Use [Schema::compile] to build one from [FieldDescriptor]s,
/// then [Schema::encode] and [Schema::parse] to move records in and out of bytes.
#[derive(Debug, Clone)]
pub struct Schema {
    codec: Codec,
}

impl Schema {
    /// Compiles descriptors into a schema. Fails if any included field is invalid.
    pub fn compile(fields: &[FieldDescriptor], mode: PackMode) -> Result<Self, CompileError> {
        Ok(Schema {
            codec: Codec::new(Layout::compile(fields, mode)?),
        })
    }

    /// Compiles a deserialized schema definition.
    #[cfg(feature = "serde")]
    pub fn from_def(def: crate::serde::SchemaDef) -> Result<Self, CompileError> {
        let mode = def.mode.into();
        let fields: Vec<FieldDescriptor> = def.fields.into_iter().map(Into::into).collect();
        Self::compile(&fields, mode)
    }

    pub fn layout(&self) -> &Layout {
        self.codec.layout()
    }

    pub fn total_size(&self) -> usize {
        self.codec.total_size()
    }

    /// Encodes `record` into a new buffer of exactly [Schema::total_size].
    ///
    /// Every placed field must be present with a value of its backing type;
    /// extra entries are ignored.
    pub fn encode(&self, record: &DynamicRecord) -> Result<Vec<u8>, WriteError> {
        let mut bytes = vec![0; self.total_size()];
        self.write(record, &mut bytes, 0)?;
        Ok(bytes)
    }

    /// Encodes `record` into `buffer` starting at `offset`, touching nothing else.
    pub fn write(
        &self,
        record: &DynamicRecord,
        buffer: &mut [u8],
        offset: usize,
    ) -> Result<(), WriteError> {
        self.codec.encode(buffer, offset, |placement| {
            record
                .get(&placement.name)
                .copied()
                .ok_or_else(|| WriteError::MissingField(placement.name.clone()))
        })
    }

    /// Decodes the record at `offset`. Enum fields come back as their raw integer.
    pub fn parse(&self, data: &[u8], offset: usize) -> Result<DynamicRecord, ReadError> {
        let mut map = BTreeMap::new();
        self.codec.decode(data, offset, |placement, value| {
            map.insert(placement.name.clone(), value);
        })?;
        Ok(map)
    }
}
