//! Descriptor constructors
//!
//! Every descriptor type of the crate lives in a submodule of `types`:
//!
//!   * scalar leaves: [`Bool`], [`Str`], [`U8`], [`U16`], [`U32`], [`I32`], [`F32`], [`F64`]
//!   * wrappers over the combinator codec: [`Vector`], [`Optional`], [`Nullable`]
//!   * composites: [`Tuple`], [`Struct`], [`Enum`], [`Union`]
//!
//! Scalars are unit structs, and wrappers and composites own their child
//! descriptors directly. `Struct`, `Enum`, and `Union` are parameterized over a
//! host type that lists its own fields or variants in declaration order; such
//! host types are normally produced by [`derive(Record)`](crate::Record),
//! [`bin_enum!`](crate::bin_enum), and [`bin_union!`](crate::bin_union).

pub mod enums;
pub mod option;
pub mod record;
pub mod scalar;
pub mod tuple;
pub mod union;
pub mod vector;

pub use enums::{Enum, Variants};
pub use option::{MaybeNull, Nullable, Optional};
pub use record::{Record, Struct};
pub use scalar::{Bool, Str, F32, F64, I32, U16, U32, U8};
pub use tuple::Tuple;
pub use union::{Union, UnionVariants};
pub use vector::Vector;
