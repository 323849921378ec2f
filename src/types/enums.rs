//! Closed string enumerations
//!
//! An [`Enum<E>`] descriptor encodes a fieldless Rust enum `E` as the `u32`
//! index of its variant in declaration order. The variant names form the
//! closed set of values, so that each variant maps to its own name. Such
//! enums are declared with [`bin_enum!`](crate::bin_enum).

use std::marker::PhantomData;

use crate::core::{BinType, TypeTag};
use crate::error::{ReadError, ReadResult};
use crate::prim::{read_u32, write_u32};
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;

/// Fieldless enums whose variants are indexed in declaration order
pub trait Variants: Sized + Copy + 'static {
    /// Variant names, in declaration order
    const NAMES: &'static [&'static str];

    /// Declaration index of this variant
    fn index(&self) -> u32;

    /// Variant at declaration index `index`, if there is one
    fn from_index(index: u32) -> Option<Self>;

    /// Name of this variant
    fn name(&self) -> &'static str {
        Self::NAMES[self.index() as usize]
    }

    /// Variant with the given name, if there is one
    fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .and_then(|i| Self::from_index(i as u32))
    }
}

/// Descriptor of the enumeration `E`
pub struct Enum<E>(PhantomData<fn() -> E>);

impl<E> Enum<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: Variants> Enum<E> {
    /// Variant names, in declaration order
    #[must_use]
    pub fn variants(&self) -> &'static [&'static str] {
        E::NAMES
    }
}

impl<E> Default for Enum<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Enum<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Enum<E> {}

impl<E> std::fmt::Debug for Enum<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enum<{}>", std::any::type_name::<E>())
    }
}

impl<E: Variants> BinType for Enum<E> {
    type Value = E;

    const TAG: TypeTag = TypeTag::Enum;

    fn read(&self, sink: &mut Sink) -> ReadResult<E> {
        let index = read_u32(sink)?;
        E::from_index(index).ok_or_else(|| ReadError::bad_discriminant::<E>(index, E::NAMES.len()))
    }

    fn write<W: Target>(&self, tgt: &mut W, val: &E) -> usize {
        write_u32(tgt, val.index())
    }

    fn schema(&self) -> Schema {
        Schema::Enum {
            variants: E::NAMES.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    crate::bin_enum! {
        pub enum AorB { A, B }
    }

    #[test]
    fn self_mapping() {
        assert_eq!(AorB::A.as_str(), "A");
        assert_eq!(AorB::B.to_string(), "B");
        assert_eq!("B".parse::<AorB>(), Ok(AorB::B));
        assert!("C".parse::<AorB>().is_err());
        assert_eq!(AorB::from_name("A"), Some(AorB::A));
    }

    #[test]
    fn round_trip() {
        let e = Enum::<AorB>::new();
        assert_eq!(e.to_bytes(&AorB::A), vec![0, 0, 0, 0]);
        assert_eq!(e.to_bytes(&AorB::B), vec![1, 0, 0, 0]);
        assert_eq!(e.decode(vec![1, 0, 0, 0]).unwrap(), AorB::B);
    }

    #[test]
    fn out_of_range_is_fatal() {
        let err = Enum::<AorB>::new().decode(vec![2, 0, 0, 0]).unwrap_err();
        match err {
            ReadError::BadDiscriminant {
                type_name,
                index,
                count,
            } => {
                assert!(type_name.ends_with("AorB"));
                assert_eq!((index, count), (2, 2));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn variants_metadata() {
        assert_eq!(Enum::<AorB>::new().variants(), &["A", "B"]);
        assert_eq!(
            Enum::<AorB>::new().schema(),
            Schema::Enum {
                variants: vec!["A".into(), "B".into()]
            }
        );
    }
}
