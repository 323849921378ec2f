//! Statically-typed binary schema combinators
//!
//! # Overview
//!
//! This library defines a compact binary wire format along with a small
//! combinator language for describing the layout of values in it. Every
//! description is a *descriptor*, an immutable value implementing
//! [`BinType`], which knows how to write values of its declared Rust type
//! into a growable [`Sink`], and how to read them back. Composite
//! descriptors ([`Tuple`], [`Struct`], [`Union`], [`Vector`], ...) own their
//! children, so that the descriptor of a whole message is a single tree that
//! can be stored in a `static`, shared across threads, and reused for any
//! number of encode and decode calls.
//!
//! The value type of a descriptor is reachable as [`Static<B>`]. For records
//! and tagged sums, it is a user-declared Rust type produced by
//! [`derive(Record)`](Record), [`bin_enum!`], or [`bin_union!`]; for every
//! other descriptor, it is a plain Rust type (`bool`, `String`, `Vec<T>`,
//! tuples, ...). The [`Native`] trait goes the other way, from a Rust type to
//! its canonical descriptor.
//!
//! Alongside the static layer, the [`Schema`] tree offers a runtime view of
//! the same descriptors, both as exportable shape metadata and as a dynamic
//! codec over [`Value`]s, producing byte-identical output.
//!
//! # Wire format
//!
//! All multi-byte scalars use the byte order declared by the sink, which is
//! little-endian by default. Strings and sequences are preceded by an 8-byte
//! length frame whose high 32 bits are always zero. Optional and nullable
//! values are preceded by a one-byte discriminant, and enums and unions by
//! the `u32` declaration index of their variant. Tuples and records are the
//! plain concatenation of their components, in declaration order.
//!
//! ```
//! use binform::{BinType, Bool, Str, Tuple, Vector};
//!
//! let pairs = Vector(Tuple((Bool, Str)));
//! let bytes = pairs.to_bytes(&vec![(true, "a".to_owned())]);
//! assert_eq!(bytes.len(), 8 + 1 + 8 + 1);
//! assert_eq!(pairs.decode(bytes).unwrap(), vec![(true, "a".to_owned())]);
//! ```

extern crate self as binform;

pub mod adt;
pub mod combinator;
pub mod core;
pub mod error;
pub mod native;
pub mod prelude;
pub mod prim;
pub mod retype;
pub mod schema;
pub mod sink;
pub mod target;
pub mod types;

pub use crate::core::{BinType, Static, TypeTag};
pub use crate::error::{ReadError, ReadResult, SchemaError, UnknownVariant, WriteError, WriteResult};
pub use crate::native::Native;
pub use crate::retype::{Retype, Retypeable};
pub use crate::schema::{Schema, Value};
pub use crate::sink::{Endianness, Sink};
pub use crate::target::{ByteCounter, Target};
pub use crate::types::{
    Bool, Enum, MaybeNull, Nullable, Optional, Record, Str, Struct, Tuple, Union, UnionVariants,
    Variants, Vector, F32, F64, I32, U16, U32, U8,
};

pub use ::lazy_static::lazy_static;
pub use ::record_derive::Record;
