//! Named-field records
//!
//! A [`Struct<R>`] descriptor encodes values of a record type `R`, whose
//! fields are written back-to-back in declaration order. The field list,
//! along with the descriptor of each field, is provided by the [`Record`]
//! implementation of `R`, which is normally derived:
//!
//! ```
//! use binform::{BinType, Record, Struct};
//!
//! #[derive(Record, Debug, PartialEq)]
//! pub struct Point {
//!     x: u32,
//!     label: String,
//! }
//!
//! let bytes = Struct::<Point>::new().to_bytes(&Point { x: 1, label: "a".into() });
//! assert_eq!(bytes, vec![1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, b'a']);
//! ```
//!
//! Field order is part of the wire contract: reordering the fields of a
//! record changes its encoding.

use std::marker::PhantomData;

use crate::core::{BinType, TypeTag};
use crate::error::ReadResult;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;

/// Host types that can be encoded field-by-field as a record
///
/// Implementations must write and read the fields in the same order,
/// which must also be the order of [`FIELDS`](Record::FIELDS) and
/// [`field_schemas`](Record::field_schemas).
pub trait Record: Sized + 'static {
    /// Field names, in declaration order
    const FIELDS: &'static [&'static str];

    fn write_fields<W: Target>(&self, tgt: &mut W) -> usize;

    fn read_fields(sink: &mut Sink) -> ReadResult<Self>;

    /// Name and shape metadata of each field, in declaration order
    fn field_schemas() -> Vec<(String, Schema)>;
}

/// Descriptor of the record type `R`
pub struct Struct<R>(PhantomData<fn() -> R>);

impl<R> Struct<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R: Record> Struct<R> {
    /// Field names, in declaration order
    #[must_use]
    pub fn fields(&self) -> &'static [&'static str] {
        R::FIELDS
    }
}

impl<R> Default for Struct<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Struct<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Struct<R> {}

impl<R> std::fmt::Debug for Struct<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Struct<{}>", std::any::type_name::<R>())
    }
}

impl<R: Record> BinType for Struct<R> {
    type Value = R;

    const TAG: TypeTag = TypeTag::Struct;

    #[inline]
    fn read(&self, sink: &mut Sink) -> ReadResult<R> {
        R::read_fields(sink)
    }

    #[inline]
    fn write<W: Target>(&self, tgt: &mut W, val: &R) -> usize {
        val.write_fields(tgt)
    }

    fn schema(&self) -> Schema {
        Schema::Struct {
            fields: R::field_schemas().into_iter().collect(),
        }
    }
}
