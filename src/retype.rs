//! Value-type aliasing for composite descriptors
//!
//! A [`Retype<B, A>`] wraps a tuple or record descriptor `B`, exposing the
//! alias type `A` as its value type instead of `B`'s own. The alias must be
//! convertible from, and viewable as, the base value type; in practice it is a
//! newtype around it. Retyping has no effect on the wire: the bytes, the
//! tag, and the schema metadata are all those of `B`.
//!
//! ```
//! use binform::{BinType, Retypeable, Tuple, F64};
//!
//! #[derive(Debug, PartialEq)]
//! struct Point((f64, f64));
//!
//! impl From<(f64, f64)> for Point {
//!     fn from(xy: (f64, f64)) -> Self {
//!         Point(xy)
//!     }
//! }
//!
//! impl AsRef<(f64, f64)> for Point {
//!     fn as_ref(&self) -> &(f64, f64) {
//!         &self.0
//!     }
//! }
//!
//! let point = Tuple((F64, F64)).retype::<Point>();
//! let bytes = point.to_bytes(&point.make((1.0, 2.0)));
//! assert_eq!(bytes, Tuple((F64, F64)).to_bytes(&(1.0, 2.0)));
//! assert_eq!(point.decode(bytes).unwrap(), Point((1.0, 2.0)));
//! ```
//!
//! To use an alias as a record field or a collection element, declare its
//! canonical descriptor with [`bin_alias!`](crate::bin_alias).

use std::marker::PhantomData;

use crate::core::{BinType, TypeTag};
use crate::error::ReadResult;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;
use crate::types::{Record, Struct, Tuple};

/// Descriptors whose value type may be rebound to an alias
pub trait Retypeable: BinType + Sized {
    /// Rebinds the value type of this descriptor to `A`
    fn retype<A>(self) -> Retype<Self, A>
    where
        A: From<Self::Value> + AsRef<Self::Value>,
    {
        Retype {
            base: self,
            _alias: PhantomData,
        }
    }
}

impl<C> Retypeable for Tuple<C> where Tuple<C>: BinType {}

impl<R: Record> Retypeable for Struct<R> {}

/// Declares the retyped descriptor of each alias as its [`Native`](crate::Native) descriptor
///
/// Each entry `Alias => Base` names the alias type and the base value type it
/// wraps; the base must be a tuple or a record.
///
/// ```
/// use binform::{bin_alias, BinType, Native, Record, Struct};
///
/// #[derive(Debug, PartialEq)]
/// pub struct Span((u32, u32));
///
/// impl From<(u32, u32)> for Span {
///     fn from(val: (u32, u32)) -> Self {
///         Span(val)
///     }
/// }
///
/// impl AsRef<(u32, u32)> for Span {
///     fn as_ref(&self) -> &(u32, u32) {
///         &self.0
///     }
/// }
///
/// bin_alias! { Span => (u32, u32) }
///
/// #[derive(Record, Debug, PartialEq)]
/// pub struct Token {
///     span: Span,
///     text: String,
/// }
///
/// let tok = Struct::<Token>::new();
/// let val = Token { span: Span((0, 2)), text: "ab".into() };
/// assert_eq!(tok.decode(tok.to_bytes(&val)).unwrap(), val);
/// assert_eq!(Span::bintype().to_bytes(&Span((1, 2))).len(), 8);
/// ```
#[macro_export]
macro_rules! bin_alias {
    ( $( $alias:ty => $base:ty ),+ $(,)? ) => {
        $(
            impl $crate::native::Native for $alias {
                type BinType = $crate::retype::Retype<<$base as $crate::native::Native>::BinType, $alias>;

                fn bintype() -> Self::BinType {
                    $crate::retype::Retypeable::retype::<$alias>(
                        <$base as $crate::native::Native>::bintype(),
                    )
                }
            }
        )+
    };
}

/// Descriptor `B` with its value type rebound to `A`
pub struct Retype<B, A> {
    base: B,
    _alias: PhantomData<fn() -> A>,
}

impl<B: BinType, A> Retype<B, A>
where
    A: From<B::Value> + AsRef<B::Value>,
{
    /// Builds an alias value from a value of the base descriptor
    pub fn make(&self, base: B::Value) -> A {
        A::from(base)
    }

    /// Descriptor being retyped
    pub fn base(&self) -> &B {
        &self.base
    }
}

impl<B: Default, A> Default for Retype<B, A> {
    fn default() -> Self {
        Self {
            base: B::default(),
            _alias: PhantomData,
        }
    }
}

impl<B: Clone, A> Clone for Retype<B, A> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _alias: PhantomData,
        }
    }
}

impl<B: Copy, A> Copy for Retype<B, A> {}

impl<B: std::fmt::Debug, A> std::fmt::Debug for Retype<B, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retype")
            .field("base", &self.base)
            .field("alias", &std::any::type_name::<A>())
            .finish()
    }
}

impl<B: BinType, A> BinType for Retype<B, A>
where
    A: From<B::Value> + AsRef<B::Value>,
{
    type Value = A;

    const TAG: TypeTag = B::TAG;

    fn read(&self, sink: &mut Sink) -> ReadResult<A> {
        self.base.read(sink).map(A::from)
    }

    fn write<W: Target>(&self, tgt: &mut W, val: &A) -> usize {
        self.base.write(tgt, val.as_ref())
    }

    fn schema(&self) -> Schema {
        self.base.schema()
    }
}
