//! Binary type descriptors
//!
//! This module defines [`BinType`], the trait shared by every descriptor in
//! the crate, and [`TypeTag`], the closed set of descriptor kinds.
//!
//! A descriptor binds a reader, a writer, a tag, and shape metadata to a
//! declared value type ([`BinType::Value`], also reachable as
//! [`Static<B>`]). Composite descriptors own their children by value, so that
//! a schema is an ownership tree whose traversal is statically dispatched.
//! Descriptors carry no mutable state: once built, they can be reused for
//! any number of calls, on any number of threads.

use std::fmt::{Display, Formatter};

use crate::error::ReadResult;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::{ByteCounter, Target};

/// Closed set of descriptor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    Bool,
    Str,
    U8,
    U16,
    U32,
    I32,
    F32,
    F64,
    Enum,
    Struct,
    Tuple,
    Union,
    Vec,
    Option,
    Nullable,
}

impl TypeTag {
    /// Name of the tag as it appears in exported schema metadata
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Bool => "Bool",
            TypeTag::Str => "Str",
            TypeTag::U8 => "U8",
            TypeTag::U16 => "U16",
            TypeTag::U32 => "U32",
            TypeTag::I32 => "I32",
            TypeTag::F32 => "F32",
            TypeTag::F64 => "F64",
            TypeTag::Enum => "Enum",
            TypeTag::Struct => "Struct",
            TypeTag::Tuple => "Tuple",
            TypeTag::Union => "Union",
            TypeTag::Vec => "Vec",
            TypeTag::Option => "Option",
            TypeTag::Nullable => "Nullable",
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for immutable descriptors of a binary wire layout
///
/// Implementing [`BinType`] requires the definitions of [`read`], [`write`],
/// and [`schema`], along with the associated [`TAG`]. The remaining methods
/// are conveniences built on top of those, and should not need overriding.
///
/// # Invariants
///
/// For every value `v` of the declared value type, reading back the bytes
/// produced by `write(v)` must yield a value equal to `v` (modulo the
/// single-precision rounding of `F32`), and must consume exactly the bytes
/// that were written. Writing must be deterministic: equal values always
/// produce byte-identical output.
///
/// [`read`]: BinType::read
/// [`write`]: BinType::write
/// [`schema`]: BinType::schema
/// [`TAG`]: BinType::TAG
pub trait BinType {
    /// Host type of the values this descriptor encodes
    type Value;

    /// Kind of this descriptor
    const TAG: TypeTag;

    /// Consumes the encoding of one value from the cursor of `sink`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ReadError`](crate::error::ReadError) raised by a
    /// nested reader, unmodified.
    fn read(&self, sink: &mut Sink) -> ReadResult<Self::Value>;

    /// Appends the encoding of `val` to `tgt`, returning the number of bytes written
    fn write<W: Target>(&self, tgt: &mut W, val: &Self::Value) -> usize;

    /// Shape metadata of this descriptor, as a dynamic [`Schema`] tree
    fn schema(&self) -> Schema;

    /// Kind of this descriptor
    #[inline]
    fn tag(&self) -> TypeTag {
        Self::TAG
    }

    /// Computes, without allocation, the exact number of bytes in the
    /// encoding of `val`.
    #[must_use]
    fn encoded_len(&self, val: &Self::Value) -> usize {
        let mut ctr: ByteCounter = std::io::sink();
        self.write(&mut ctr, val)
    }

    /// Writes `val` at the cursor of an existing sink
    fn encode_into(&self, sink: &mut Sink, val: &Self::Value) -> usize {
        self.write(sink, val)
    }

    /// Encodes `val` into a freshly allocated buffer sized to fit exactly.
    #[must_use]
    fn to_bytes(&self, val: &Self::Value) -> Vec<u8> {
        let mut sink = Sink::new(self.encoded_len(val));
        let _n = self.write(&mut sink, val);
        debug_assert_eq!(_n, sink.capacity());
        sink.into_vec()
    }

    /// Decodes one value from the start of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by [`read`](BinType::read). When the
    /// `check_complete_read` feature is enabled, also fails with
    /// [`ReadError::Trailing`](crate::error::ReadError::Trailing) if bytes
    /// remain after the value.
    fn decode(&self, bytes: impl Into<Vec<u8>>) -> ReadResult<Self::Value> {
        let mut sink = Sink::from_bytes(bytes);
        let ret = self.read(&mut sink)?;
        sink.finish()?;
        Ok(ret)
    }
}

/// Value type declared by the descriptor type `B`
pub type Static<B> = <B as BinType>::Value;
