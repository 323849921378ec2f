//! Error types
//!
//! This module contains the error types returned by the fallible
//! operations of this crate:
//!
//!   * [`ReadError`] for every decoding operation, static or dynamic
//!   * [`WriteError`] for encoding a dynamic [`Value`](crate::schema::Value)
//!     against a [`Schema`](crate::schema::Schema)
//!   * [`SchemaError`] for rejected dynamic schema construction
//!   * [`UnknownVariant`] for name lookups on generated enums
//!
//! Static descriptors cannot fail to write, as their value types are
//! exactly the domain of the wire format; numeric values that exceed a
//! fixed width wrap around rather than producing an error.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};
use std::string::FromUtf8Error;

use crate::core::TypeTag;

/// Enumeration over all errors that may be encountered while reading a value
/// from a [`Sink`](crate::sink::Sink).
///
/// Every variant is fatal for the decode call in which it is raised; no
/// partially decoded value is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReadError {
    /// Union or enum discriminant outside of the declared variant list
    BadDiscriminant {
        type_name: String,
        index: u32,
        count: usize,
    },
    /// Attempted to consume bytes beyond the valid region of the sink
    UnexpectedEnd {
        offset: usize,
        requested: usize,
        available: usize,
    },
    /// Length frame whose high 32 bits were not zero
    WideLength { value: u64 },
    /// String payload that is not valid UTF-8
    InvalidUtf8(FromUtf8Error),
    /// Bytes left over after a complete top-level decode
    Trailing { residual: usize },
}

impl ReadError {
    /// Constructs a [`ReadError::BadDiscriminant`] naming the type `T`
    pub fn bad_discriminant<T: ?Sized>(index: u32, count: usize) -> Self {
        Self::bad_discriminant_named(std::any::type_name::<T>(), index, count)
    }

    /// Constructs a [`ReadError::BadDiscriminant`] with an explicit type-name
    pub fn bad_discriminant_named(type_name: impl Into<String>, index: u32, count: usize) -> Self {
        let type_name = type_name.into();
        tracing::debug!(%type_name, index, count, "discriminant out of range");
        Self::BadDiscriminant {
            type_name,
            index,
            count,
        }
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ReadError::BadDiscriminant {
                type_name,
                index,
                count,
            } => write!(
                f,
                "invalid discriminant {index} for `{type_name}` ({count} variants declared)"
            ),
            ReadError::UnexpectedEnd {
                offset,
                requested,
                available,
            } => {
                if *available == 0 {
                    write!(
                        f,
                        "cannot read {requested} bytes at offset {offset}: sink has been fully consumed"
                    )
                } else {
                    write!(
                        f,
                        "cannot read {requested} bytes at offset {offset}: only {available} bytes remaining"
                    )
                }
            }
            ReadError::WideLength { value } => {
                write!(f, "length frame {value:#018x} exceeds 32 bits")
            }
            ReadError::InvalidUtf8(err) => write!(f, "string payload is not valid UTF-8: {err}"),
            ReadError::Trailing { residual } => {
                write!(f, "{residual} bytes left over after decoding value")
            }
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::InvalidUtf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FromUtf8Error> for ReadError {
    fn from(err: FromUtf8Error) -> Self {
        Self::InvalidUtf8(err)
    }
}

/// Type alias for Result with an error type of [`ReadError`]
pub type ReadResult<T> = std::result::Result<T, ReadError>;

/// Errors raised when a dynamic [`Value`](crate::schema::Value) does not fit
/// the [`Schema`](crate::schema::Schema) it is being written against.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WriteError {
    /// Value of the wrong kind for the schema node
    Mismatch {
        expected: TypeTag,
        found: &'static str,
    },
    /// Enum name or union tag not declared by the schema
    UnknownVariant { expected: TypeTag, name: String },
    /// Required struct field absent from the value
    MissingField { field: String },
    /// Tuple value with the wrong number of components
    Arity { expected: usize, actual: usize },
    /// Payload-carrying union variant given without a payload
    MissingPayload { tag: String },
    /// Unit union variant given a payload
    UnexpectedPayload { tag: String },
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            WriteError::Mismatch { expected, found } => {
                write!(f, "cannot write {found} value as {expected}")
            }
            WriteError::UnknownVariant { expected, name } => {
                write!(f, "`{name}` is not a declared variant of this {expected}")
            }
            WriteError::MissingField { field } => write!(f, "struct value is missing field `{field}`"),
            WriteError::Arity { expected, actual } => {
                write!(f, "{actual}-component value written to {expected}-component tuple")
            }
            WriteError::MissingPayload { tag } => write!(f, "union variant `{tag}` requires a payload"),
            WriteError::UnexpectedPayload { tag } => {
                write!(f, "unit union variant `{tag}` cannot carry a payload")
            }
        }
    }
}

impl Error for WriteError {}

/// Type alias for Result with an error type of [`WriteError`]
pub type WriteResult<T> = std::result::Result<T, WriteError>;

/// Errors raised when constructing an invalid dynamic schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Tuples require at least two components
    TupleArity { actual: usize },
    /// Field, variant, or enum name declared twice
    Duplicate { name: String },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            SchemaError::TupleArity { actual } => {
                write!(f, "tuple requires at least 2 components, got {actual}")
            }
            SchemaError::Duplicate { name } => write!(f, "name `{name}` declared more than once"),
        }
    }
}

impl Error for SchemaError {}

/// Error returned when parsing a name that is not a variant of a generated enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub type_name: &'static str,
    pub name: String,
}

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "`{}` is not a variant of `{}`", self.name, self.type_name)
    }
}

impl Error for UnknownVariant {}

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn errors_threadsafe() {
        dummy::<ReadError>();
        dummy::<WriteError>();
        dummy::<SchemaError>();
    }

    #[test]
    fn bad_discriminant_names_type() {
        let err = ReadError::bad_discriminant::<bool>(7, 2);
        assert_eq!(err.to_string(), "invalid discriminant 7 for `bool` (2 variants declared)");
    }

    #[test]
    fn unexpected_end_message() {
        let err = ReadError::UnexpectedEnd {
            offset: 4,
            requested: 8,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "cannot read 8 bytes at offset 4: sink has been fully consumed"
        );
    }
}
