//! Declarative generators for enumerations and tagged sums
//!
//! [`bin_enum!`] and [`bin_union!`] each declare a native Rust enum along with
//! the trait implementations that let it be encoded through
//! [`Enum`](crate::types::Enum) and [`Union`](crate::types::Union)
//! respectively. In both cases the wire discriminant of a variant is its
//! declaration index, so reordering variants changes the encoding.

/// Declares a fieldless enum encoded as an [`Enum`](crate::types::Enum)
///
/// Each variant maps to its own name, through `as_str`, [`Display`], and
/// [`FromStr`].
///
/// ```
/// use binform::{bin_enum, BinType, Enum};
///
/// bin_enum! {
///     pub enum Direction { North, East, South, West }
/// }
///
/// assert_eq!(Direction::South.as_str(), "South");
/// assert_eq!(Enum::<Direction>::new().to_bytes(&Direction::South), vec![2, 0, 0, 0]);
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[macro_export]
macro_rules! bin_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $vname:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $vname ),+
        }

        impl $name {
            /// Name of this variant
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$vname => stringify!($vname) ),+
                }
            }
        }

        impl $crate::types::Variants for $name {
            const NAMES: &'static [&'static str] = &[ $( stringify!($vname) ),+ ];

            #[inline]
            fn index(&self) -> u32 {
                *self as u32
            }

            fn from_index(index: u32) -> ::std::option::Option<Self> {
                const VARIANTS: &[$name] = &[ $( $name::$vname ),+ ];
                VARIANTS.get(index as usize).copied()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::UnknownVariant;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::types::Variants>::from_name(s).ok_or_else(|| {
                    $crate::error::UnknownVariant {
                        type_name: stringify!($name),
                        name: s.to_owned(),
                    }
                })
            }
        }

        impl $crate::native::Native for $name {
            type BinType = $crate::types::Enum<$name>;

            fn bintype() -> Self::BinType {
                $crate::types::Enum::new()
            }
        }
    };
}

/// Declares a tagged sum encoded as a [`Union`](crate::types::Union)
///
/// Each variant is either a unit variant, or a single-payload variant whose
/// payload is described by the descriptor type given in parentheses. The
/// generated variant holds the value type of that descriptor.
///
/// ```
/// use binform::{bin_union, BinType, Bool, Str, Union};
///
/// bin_union! {
///     pub enum Event {
///         Ping,
///         Toggle(Bool),
///         Say(Str),
///     }
/// }
///
/// let u = Union::<Event>::new();
/// assert_eq!(u.to_bytes(&Event::Toggle(true)), vec![1, 0, 0, 0, 1]);
/// assert_eq!(u.decode(vec![0, 0, 0, 0]).unwrap(), Event::Ping);
/// ```
#[macro_export]
macro_rules! bin_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $vname:ident $( ( $bt:ty ) )? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $vname $( ( <$bt as $crate::BinType>::Value ) )? ),+
        }

        const _: () = {
            #[allow(non_camel_case_types, dead_code)]
            enum __Disc {
                $( $vname ),+
            }

            impl $crate::types::UnionVariants for $name {
                const TAGS: &'static [&'static str] = &[ $( stringify!($vname) ),+ ];

                fn discriminant(&self) -> u32 {
                    match self {
                        $( $name::$vname { .. } => __Disc::$vname as u32 ),+
                    }
                }

                fn write_variant<W: $crate::Target>(&self, tgt: &mut W) -> usize {
                    match self {
                        $(
                            $crate::__union_pat!($name, $vname $(, $bt)?; payload) => {
                                $crate::__union_write!(tgt, __Disc::$vname as u32, payload $(, $bt)?)
                            }
                        )+
                    }
                }

                fn read_variant(
                    index: u32,
                    sink: &mut $crate::Sink,
                ) -> ::std::option::Option<$crate::error::ReadResult<Self>> {
                    $(
                        if index == __Disc::$vname as u32 {
                            return ::std::option::Option::Some(
                                $crate::__union_read!($name, $vname, sink $(, $bt)?)
                            );
                        }
                    )+
                    ::std::option::Option::None
                }

                fn variant_schemas() -> ::std::vec::Vec<(
                    ::std::string::String,
                    ::std::option::Option<$crate::Schema>,
                )> {
                    ::std::vec![
                        $( (stringify!($vname).to_owned(), $crate::__union_schema!($($bt)?)) ),+
                    ]
                }
            }

            impl $crate::native::Native for $name {
                type BinType = $crate::types::Union<$name>;

                fn bintype() -> Self::BinType {
                    $crate::types::Union::new()
                }
            }
        };
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __union_pat {
    ($name:ident, $vname:ident; $p:ident) => {
        $name::$vname
    };
    ($name:ident, $vname:ident, $bt:ty; $p:ident) => {
        $name::$vname($p)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __union_write {
    ($tgt:ident, $idx:expr, $p:ident) => {
        $crate::prim::write_u32($tgt, $idx)
    };
    ($tgt:ident, $idx:expr, $p:ident, $bt:ty) => {
        $crate::prim::write_u32($tgt, $idx)
            + $crate::BinType::write(&<$bt as ::std::default::Default>::default(), $tgt, $p)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __union_read {
    ($name:ident, $vname:ident, $sink:ident) => {
        ::std::result::Result::Ok($name::$vname)
    };
    ($name:ident, $vname:ident, $sink:ident, $bt:ty) => {
        $crate::BinType::read(&<$bt as ::std::default::Default>::default(), $sink).map($name::$vname)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __union_schema {
    () => {
        ::std::option::Option::None
    };
    ($bt:ty) => {
        ::std::option::Option::Some($crate::BinType::schema(
            &<$bt as ::std::default::Default>::default(),
        ))
    };
}
