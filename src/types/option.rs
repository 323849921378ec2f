//! Optional and nullable wrappers
//!
//! [`Optional<T>`] and [`Nullable<T>`] share one wire shape: a discriminant
//! byte (`0` absent, `1` present), followed by the payload when present.
//! They differ only in their host type; the absent case of `Optional<T>` is
//! `None` (a value that was never set), while the absent case of
//! `Nullable<T>` is [`MaybeNull::Null`] (a value explicitly set to nothing).

use crate::combinator::{read_opt, write_opt};
use crate::core::{BinType, TypeTag};
use crate::error::ReadResult;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;

/// Host type of [`Nullable<T>`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MaybeNull<T> {
    #[default]
    Null,
    Value(T),
}

impl<T> MaybeNull<T> {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, MaybeNull::Null)
    }

    /// Borrows the payload, if any
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            MaybeNull::Null => None,
            MaybeNull::Value(val) => Some(val),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            MaybeNull::Null => None,
            MaybeNull::Value(val) => Some(val),
        }
    }
}

impl<T> From<Option<T>> for MaybeNull<T> {
    fn from(val: Option<T>) -> Self {
        match val {
            Some(val) => MaybeNull::Value(val),
            None => MaybeNull::Null,
        }
    }
}

impl<T> From<MaybeNull<T>> for Option<T> {
    fn from(val: MaybeNull<T>) -> Self {
        val.into_option()
    }
}

/// Value of `T` that may be absent (`None`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Optional<T>(pub T);

impl<T: BinType> BinType for Optional<T> {
    type Value = Option<T::Value>;

    const TAG: TypeTag = TypeTag::Option;

    fn read(&self, sink: &mut Sink) -> ReadResult<Self::Value> {
        read_opt(sink, |s| self.0.read(s))
    }

    fn write<W: Target>(&self, tgt: &mut W, val: &Self::Value) -> usize {
        write_opt(tgt, val.as_ref(), |t, v| self.0.write(t, v))
    }

    fn schema(&self) -> Schema {
        Schema::option(self.0.schema())
    }
}

/// Value of `T` that may be null ([`MaybeNull::Null`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nullable<T>(pub T);

impl<T: BinType> BinType for Nullable<T> {
    type Value = MaybeNull<T::Value>;

    const TAG: TypeTag = TypeTag::Nullable;

    fn read(&self, sink: &mut Sink) -> ReadResult<Self::Value> {
        Ok(read_opt(sink, |s| self.0.read(s))?.into())
    }

    fn write<W: Target>(&self, tgt: &mut W, val: &Self::Value) -> usize {
        write_opt(tgt, val.as_option(), |t, v| self.0.write(t, v))
    }

    fn schema(&self) -> Schema {
        Schema::nullable(self.0.schema())
    }
}
