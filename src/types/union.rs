//! Tagged sums
//!
//! A [`Union<U>`] descriptor encodes a Rust enum `U` whose variants are
//! either unit variants or carry a single payload described by a child
//! descriptor. The wire form is the `u32` declaration index of the variant,
//! followed by the payload when the variant has one. Such enums are declared
//! with [`bin_union!`](crate::bin_union), whose variants double as the
//! per-variant value constructors.

use std::marker::PhantomData;

use crate::core::{BinType, TypeTag};
use crate::error::{ReadError, ReadResult};
use crate::prim::read_u32;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;

/// Enums whose variants are encoded as a declaration index plus optional payload
pub trait UnionVariants: Sized + 'static {
    /// Variant tags, in declaration order
    const TAGS: &'static [&'static str];

    /// Declaration index of this value's variant
    fn discriminant(&self) -> u32;

    /// Writes the discriminant followed by the payload, if any
    fn write_variant<W: Target>(&self, tgt: &mut W) -> usize;

    /// Reads the payload of the variant at declaration index `index`.
    ///
    /// Returns `None` if no variant has that index.
    fn read_variant(index: u32, sink: &mut Sink) -> Option<ReadResult<Self>>;

    /// Tag and payload shape of each variant, in declaration order
    fn variant_schemas() -> Vec<(String, Option<Schema>)>;

    /// Tag of this value's variant
    fn tag(&self) -> &'static str {
        Self::TAGS[self.discriminant() as usize]
    }
}

/// Descriptor of the tagged sum `U`
pub struct Union<U>(PhantomData<fn() -> U>);

impl<U> Union<U> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<U: UnionVariants> Union<U> {
    /// Variant tags, in declaration order
    #[must_use]
    pub fn variants(&self) -> &'static [&'static str] {
        U::TAGS
    }
}

impl<U> Default for Union<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> Clone for Union<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Union<U> {}

impl<U> std::fmt::Debug for Union<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Union<{}>", std::any::type_name::<U>())
    }
}

impl<U: UnionVariants> BinType for Union<U> {
    type Value = U;

    const TAG: TypeTag = TypeTag::Union;

    fn read(&self, sink: &mut Sink) -> ReadResult<U> {
        let index = read_u32(sink)?;
        U::read_variant(index, sink)
            .unwrap_or_else(|| Err(ReadError::bad_discriminant::<U>(index, U::TAGS.len())))
    }

    fn write<W: Target>(&self, tgt: &mut W, val: &U) -> usize {
        val.write_variant(tgt)
    }

    fn schema(&self) -> Schema {
        Schema::Union {
            variants: U::variant_schemas().into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{Bool, F64, Str, Tuple};

    crate::bin_union! {
        pub enum Sample {
            Unit,
            B(Bool),
            S(Str),
        }
    }

    crate::bin_union! {
        enum Inner {
            B(Bool),
            S(Tuple<(Bool, F64)>),
            Color(Tuple<(F64, F64, F64)>),
        }
    }

    fn save_and_restore<U: UnionVariants>(val: &U) -> U {
        let u = Union::<U>::new();
        let mut sink = Sink::new(1);
        u.write(&mut sink, val);
        sink.rewind();
        u.read(&mut sink).unwrap()
    }

    #[test]
    fn per_variant_round_trip() {
        assert_eq!(save_and_restore(&Sample::Unit), Sample::Unit);
        assert_eq!(save_and_restore(&Sample::B(false)), Sample::B(false));
        assert_eq!(save_and_restore(&Sample::S("a".into())), Sample::S("a".into()));
        assert_eq!(Sample::S("a".into()).tag(), "S");
        assert_eq!(Sample::Unit.tag(), "Unit");
    }

    #[test]
    fn discriminant_is_declaration_index() {
        let u = Union::<Sample>::new();
        assert_eq!(u.to_bytes(&Sample::Unit), vec![0, 0, 0, 0]);
        assert_eq!(u.to_bytes(&Sample::B(true)), vec![1, 0, 0, 0, 1]);
        assert_eq!(
            u.to_bytes(&Sample::S("a".into())),
            vec![2, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, b'a']
        );
    }

    #[test]
    fn tuple_payloads() {
        let val = Inner::Color((0.5, 1.5, -2.0));
        assert_eq!(save_and_restore(&val), val);
        let val = Inner::S((true, 3.25));
        assert_eq!(save_and_restore(&val), val);
    }

    #[test]
    fn out_of_range_is_fatal() {
        let err = Union::<Sample>::new().decode(vec![3, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, ReadError::BadDiscriminant { index: 3, count: 3, .. }));
    }

    #[test]
    fn variants_metadata() {
        assert_eq!(Union::<Sample>::new().variants(), &["Unit", "B", "S"]);
        let Schema::Union { variants } = Union::<Sample>::new().schema() else {
            panic!("expected union schema");
        };
        assert_eq!(
            variants.into_iter().collect::<Vec<_>>(),
            vec![
                ("Unit".to_owned(), None),
                ("B".to_owned(), Some(Schema::Bool)),
                ("S".to_owned(), Some(Schema::Str)),
            ]
        );
    }
}
