//! Host types with a canonical descriptor
//!
//! [`Native`] associates a Rust type with the descriptor that encodes it, so
//! that the descriptor of a record field (or of any value) can be inferred from
//! its type alone. This is how [`derive(Record)`](crate::Record) determines
//! the wire layout of each field.

use crate::core::BinType;
use crate::types::*;

/// Rust types whose canonical descriptor is `Self::BinType`
///
/// The canonical descriptor of a type is the one whose declared value type
/// is that very type, so that every descriptor of the crate has exactly one
/// native counterpart and vice versa.
pub trait Native: Sized {
    type BinType: BinType<Value = Self>;

    fn bintype() -> Self::BinType;
}

macro_rules! native_leaf {
    ( $( $t:ty => $bt:ident ),+ $(,)? ) => {
        $(
            impl Native for $t {
                type BinType = $bt;

                #[inline]
                fn bintype() -> $bt {
                    $bt
                }
            }
        )+
    };
}

native_leaf! {
    bool => Bool,
    String => Str,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    i32 => I32,
    f32 => F32,
    f64 => F64,
}

impl<T: Native> Native for Vec<T> {
    type BinType = Vector<T::BinType>;

    fn bintype() -> Self::BinType {
        Vector(T::bintype())
    }
}

impl<T: Native> Native for Option<T> {
    type BinType = Optional<T::BinType>;

    fn bintype() -> Self::BinType {
        Optional(T::bintype())
    }
}

impl<T: Native> Native for MaybeNull<T> {
    type BinType = Nullable<T::BinType>;

    fn bintype() -> Self::BinType {
        Nullable(T::bintype())
    }
}

macro_rules! native_tuple {
    ( $( ( $( $t:ident ),+ ) )+ ) => {
        $(
            impl<$( $t: Native ),+> Native for ( $( $t, )+ ) {
                type BinType = Tuple<( $( $t::BinType, )+ )>;

                fn bintype() -> Self::BinType {
                    Tuple(( $( $t::bintype(), )+ ))
                }
            }
        )+
    };
}

native_tuple! {
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
    (A, B, C, D, E, F)
    (A, B, C, D, E, F, G)
    (A, B, C, D, E, F, G, H)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schema::Schema;

    fn schema_of<T: Native>() -> Schema {
        T::bintype().schema()
    }

    #[test]
    fn inferred_shapes() {
        assert_eq!(schema_of::<u16>(), Schema::U16);
        assert_eq!(schema_of::<Vec<String>>(), Schema::vec(Schema::Str));
        assert_eq!(
            schema_of::<Option<MaybeNull<f32>>>(),
            Schema::option(Schema::nullable(Schema::F32))
        );
        assert_eq!(
            schema_of::<(bool, i32, f64)>(),
            Schema::Tuple {
                components: vec![Schema::Bool, Schema::I32, Schema::F64]
            }
        );
    }

    #[test]
    fn inferred_round_trip() {
        let val: Vec<(u8, Option<String>)> = vec![(1, None), (2, Some("b".into()))];
        let bt = <Vec<(u8, Option<String>)>>::bintype();
        assert_eq!(bt.decode(bt.to_bytes(&val)).unwrap(), val);
    }
}
