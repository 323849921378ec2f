//! Scalar leaf descriptors
//!
//! Each descriptor here is a unit struct delegating directly to the
//! corresponding pair of functions in [`prim`](crate::prim).

use crate::core::{BinType, TypeTag};
use crate::error::ReadResult;
use crate::prim;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;

macro_rules! scalar {
    ( $( $(#[$meta:meta])* $name:ident : $val:ty => $read:path, $write:path );+ $(;)? ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $name;

            impl BinType for $name {
                type Value = $val;

                const TAG: TypeTag = TypeTag::$name;

                #[inline]
                fn read(&self, sink: &mut Sink) -> ReadResult<$val> {
                    $read(sink)
                }

                #[inline]
                fn write<W: Target>(&self, tgt: &mut W, val: &$val) -> usize {
                    $write(tgt, *val)
                }

                fn schema(&self) -> Schema {
                    Schema::$name
                }
            }
        )+
    };
}

scalar! {
    /// One byte, `0` or `1`
    Bool: bool => prim::read_bool, prim::write_bool;
    /// One unsigned byte
    U8: u8 => prim::read_u8, prim::write_u8;
    /// Two-byte unsigned integer
    U16: u16 => prim::read_u16, prim::write_u16;
    /// Four-byte unsigned integer
    U32: u32 => prim::read_u32, prim::write_u32;
    /// Four-byte two's-complement integer
    I32: i32 => prim::read_i32, prim::write_i32;
    /// IEEE-754 single precision
    F32: f32 => prim::read_f32, prim::write_f32;
    /// IEEE-754 double precision
    F64: f64 => prim::read_f64, prim::write_f64;
}

/// UTF-8 string behind a wide length frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Str;

impl BinType for Str {
    type Value = String;

    const TAG: TypeTag = TypeTag::Str;

    #[inline]
    fn read(&self, sink: &mut Sink) -> ReadResult<String> {
        prim::read_str(sink)
    }

    #[inline]
    fn write<W: Target>(&self, tgt: &mut W, val: &String) -> usize {
        prim::write_str(tgt, val)
    }

    fn schema(&self) -> Schema {
        Schema::Str
    }
}
