//! Typed records: the [BitPack] trait, the per-type [Packer], and the
//! [crate::bitpack!] and [crate::bitpack_enum!] macros that implement them.

use std::{any::type_name, marker::PhantomData};

use tracing::debug;

use crate::{
    compiled::Codec,
    errors::{CompileError, Error, ReadError, WriteError},
    field::FieldDescriptor,
    layout::{Layout, PackMode},
    prim::{DeclaredType, PrimType},
    value::{CodeUnit, Value},
};

/// A Rust type that can be stored in a packed field.
pub trait PackField: Sized {
    /// The primitive the field is converted through.
    const BACKING: PrimType;

    fn declared_type() -> DeclaredType {
        DeclaredType::Prim(Self::BACKING)
    }

    fn to_value(&self) -> Value;

    /// Returns `None` if `value` is not a [PackField::BACKING] value.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_pack_field {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl PackField for $ty {
                const BACKING: PrimType = PrimType::$prim;

                fn to_value(&self) -> Value {
                    Value::$prim(*self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$prim(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_pack_field! {
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl PackField for CodeUnit {
    const BACKING: PrimType = PrimType::Char16;

    fn to_value(&self) -> Value {
        Value::Char16(self.0)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Char16(v) => Some(CodeUnit(v)),
            _ => None,
        }
    }
}

/// A record type with a fixed binary layout.
///
/// Usually implemented with [crate::bitpack!]. A hand-written implementation
/// lists its fields in [BitPack::fields] and reads and writes them by their
/// index in that list. [BitPack::packer] must memoize its result in a static so
/// the layout is compiled once per process.
pub trait BitPack: Default + Sized + 'static {
    /// Whether booleans are bit-packed.
    const MODE: PackMode = PackMode::NoCompaction;

    /// The record's field table, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    /// The value of the field at `index` in [BitPack::fields].
    fn get_field(&self, index: usize) -> Option<Value>;

    /// Stores `value` into the field at `index` in [BitPack::fields].
    fn set_field(&mut self, index: usize, value: Value);

    /// The compiled packer for this type.
    fn packer() -> Result<&'static Packer<Self>, CompileError>;

    fn total_bytes() -> Result<usize, CompileError> {
        Ok(Self::packer()?.total_bytes())
    }

    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(Self::packer()?.to_bytes(self)?)
    }

    fn write_to_byte_array(&self, buffer: &mut [u8], offset: usize) -> Result<(), Error> {
        Ok(Self::packer()?.write_to_byte_array(self, buffer, offset)?)
    }

    fn from_bytes(buffer: &[u8], offset: usize) -> Result<Self, Error> {
        Ok(Self::packer()?.from_bytes(buffer, offset)?)
    }
}

/// The compiled codec for one record type.
pub struct Packer<T> {
    codec: Codec,
    _record: PhantomData<fn() -> T>,
}

impl<T: BitPack> Packer<T> {
    /// Compiles `T`'s field table. [BitPack::packer] caches the result.
    pub fn compile() -> Result<Self, CompileError> {
        let layout = Layout::compile(&T::fields(), T::MODE)?;
        debug!(
            record = type_name::<T>(),
            total_bytes = layout.total_size(),
            "compiled packer"
        );

        Ok(Packer {
            codec: Codec::new(layout),
            _record: PhantomData,
        })
    }

    pub fn layout(&self) -> &Layout {
        self.codec.layout()
    }

    pub fn mode(&self) -> PackMode {
        self.codec.layout().mode()
    }

    /// Size in bytes of every encoded `T`.
    pub fn total_bytes(&self) -> usize {
        self.codec.total_size()
    }

    /// Encodes `record` into a new buffer of exactly [Packer::total_bytes].
    pub fn to_bytes(&self, record: &T) -> Result<Vec<u8>, WriteError> {
        let mut bytes = vec![0; self.total_bytes()];
        self.write_to_byte_array(record, &mut bytes, 0)?;
        Ok(bytes)
    }

    /// Encodes `record` into `buffer` starting at `offset`.
    ///
    /// Nothing outside `buffer[offset..offset + total_bytes]` is touched, and
    /// nothing at all if the window doesn't fit. Bit-packed booleans are only
    /// ever set, so the window should start zeroed.
    pub fn write_to_byte_array(
        &self,
        record: &T,
        buffer: &mut [u8],
        offset: usize,
    ) -> Result<(), WriteError> {
        self.codec.encode(buffer, offset, |placement| {
            record
                .get_field(placement.index)
                .ok_or_else(|| WriteError::MissingField(placement.name.clone()))
        })
    }

    /// Decodes a new `T` from `buffer` starting at `offset`.
    pub fn from_bytes(&self, buffer: &[u8], offset: usize) -> Result<T, ReadError> {
        let mut record = T::default();
        self.codec.decode(buffer, offset, |placement, value| {
            record.set_field(placement.index, value)
        })?;
        Ok(record)
    }
}

/// Declares a struct and implements [BitPack] for it.
///
/// Every field is packed, so every field type must implement [PackField]. The
/// struct must implement `Default`. An optional `: Mode` after the name picks
/// the [PackMode].
///
/// ```
/// use bitpacker::{bitpack, BitPack};
///
/// bitpack! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Status: CompactBools {
///         pub code: u16,
///         pub ready: bool,
///         pub faulted: bool,
///     }
/// }
///
/// assert_eq!(Status::total_bytes().unwrap(), 3);
///
/// let status = Status { code: 7, ready: true, faulted: false };
/// let bytes = status.to_bytes().unwrap();
/// assert_eq!(bytes[2], 0b10);
/// assert_eq!(Status::from_bytes(&bytes, 0).unwrap(), status);
/// ```
#[macro_export]
macro_rules! bitpack {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(: $mode:ident)? {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::BitPack for $name {
            $(const MODE: $crate::PackMode = $crate::PackMode::$mode;)?

            fn fields() -> ::std::vec::Vec<$crate::FieldDescriptor> {
                ::std::vec![
                    $(
                        $crate::FieldDescriptor::new(
                            ::std::stringify!($field),
                            <$ty as $crate::PackField>::declared_type(),
                        ),
                    )*
                ]
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn get_field(&self, index: usize) -> ::std::option::Option<$crate::Value> {
                let mut i = 0usize;
                $(
                    if index == i {
                        return ::std::option::Option::Some(
                            $crate::PackField::to_value(&self.$field),
                        );
                    }
                    i += 1;
                )*
                ::std::option::Option::None
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn set_field(&mut self, index: usize, value: $crate::Value) {
                let mut i = 0usize;
                $(
                    if index == i {
                        if let ::std::option::Option::Some(v) =
                            <$ty as $crate::PackField>::from_value(value)
                        {
                            self.$field = v;
                        }
                        return;
                    }
                    i += 1;
                )*
            }

            fn packer() -> ::std::result::Result<
                &'static $crate::Packer<Self>,
                $crate::CompileError,
            > {
                static PACKER: $crate::__private::Lazy<
                    ::std::result::Result<$crate::Packer<$name>, $crate::CompileError>,
                > = $crate::__private::Lazy::new(|| $crate::Packer::<$name>::compile());

                PACKER.as_ref().map_err(::std::clone::Clone::clone)
            }
        }
    };
}

/// Declares an enum stored as an integer, implementing [PackField] for it.
///
/// The enum gains an `Unknown(UnknownRepr<repr>)` variant: decoded integers
/// that match no declared value land there instead of being rejected. Only
/// `from_repr` builds it, and only for undeclared values. The first variant is
/// the `Default`. `Debug, Clone, Copy, PartialEq, Eq, Hash` are derived.
///
/// ```
/// use bitpacker::{bitpack_enum, PackField, Value};
///
/// bitpack_enum! {
///     pub enum Color: u8 {
///         Red = 1,
///         Green = 2,
///     }
/// }
///
/// assert_eq!(Color::Green.to_value(), Value::U8(2));
/// assert_eq!(Color::from_repr(2), Color::Green);
/// assert_eq!(Color::from_repr(9).to_repr(), 9);
/// assert!(matches!(Color::from_repr(9), Color::Unknown(raw) if raw.get() == 9));
/// ```
#[macro_export]
macro_rules! bitpack_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $(#[$first_meta:meta])*
            $first:ident = $first_value:expr
            $(
                ,
                $(#[$variant_meta:meta])*
                $variant:ident = $value:expr
            )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(#[$first_meta])*
            $first,
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            /// A raw value matching no declared variant.
            Unknown($crate::UnknownRepr<$repr>),
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                $name::$first
            }
        }

        impl $name {
            pub fn to_repr(&self) -> $repr {
                match self {
                    $name::$first => $first_value,
                    $($name::$variant => $value,)*
                    $name::Unknown(raw) => raw.get(),
                }
            }

            pub fn from_repr(raw: $repr) -> Self {
                if raw == $first_value {
                    return $name::$first;
                }
                $(
                    if raw == $value {
                        return $name::$variant;
                    }
                )*
                $name::Unknown($crate::__private::unknown_repr(raw))
            }
        }

        impl $crate::PackField for $name {
            const BACKING: $crate::PrimType = <$repr as $crate::PackField>::BACKING;

            fn declared_type() -> $crate::DeclaredType {
                $crate::DeclaredType::Enum {
                    name: ::std::string::ToString::to_string(::std::stringify!($name)),
                    underlying: Self::BACKING,
                }
            }

            fn to_value(&self) -> $crate::Value {
                $crate::PackField::to_value(&self.to_repr())
            }

            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                <$repr as $crate::PackField>::from_value(value).map($name::from_repr)
            }
        }
    };
}
