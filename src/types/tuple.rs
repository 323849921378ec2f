//! Fixed-arity heterogeneous tuples
//!
//! [`Tuple<C>`] wraps a Rust tuple `C` of component descriptors, for arities
//! 2 through 8. Its value type is the Rust tuple of the components' value
//! types, so a tuple expression is itself the value constructor. Components
//! are written and read positionally, with every arity fully unrolled.

use crate::core::{BinType, TypeTag};
use crate::error::ReadResult;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;

/// Concatenation of the component descriptors in `C`, in positional order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tuple<C>(pub C);

impl<C> Tuple<C> {
    pub const fn new(components: C) -> Self {
        Self(components)
    }

    /// Component descriptors, as a Rust tuple
    pub const fn components(&self) -> &C {
        &self.0
    }
}

macro_rules! tuple_impl {
    ( $( ( $( $t:ident $i:tt ),+ ) )+ ) => {
        $(
            impl<$( $t: BinType ),+> BinType for Tuple<( $( $t, )+ )> {
                type Value = ( $( $t::Value, )+ );

                const TAG: TypeTag = TypeTag::Tuple;

                fn read(&self, sink: &mut Sink) -> ReadResult<Self::Value> {
                    Ok(( $( self.0.$i.read(sink)?, )+ ))
                }

                fn write<W: Target>(&self, tgt: &mut W, val: &Self::Value) -> usize {
                    0 $( + self.0.$i.write(tgt, &val.$i) )+
                }

                fn schema(&self) -> Schema {
                    Schema::Tuple {
                        components: vec![ $( self.0.$i.schema() ),+ ],
                    }
                }
            }
        )+
    };
}

tuple_impl! {
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
}
