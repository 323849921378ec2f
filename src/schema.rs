//! Dynamic schema trees
//!
//! [`Schema`] is the runtime counterpart to the static descriptors of
//! [`types`](crate::types): a tree of descriptor nodes that can be built at
//! runtime, inspected, and exported as metadata for code generation. Every
//! static descriptor renders itself into a [`Schema`] via
//! [`BinType::schema`](crate::core::BinType::schema).
//!
//! A [`Schema`] can also encode and decode dynamically typed [`Value`]s. The
//! bytes produced are identical to those produced by the equivalent static
//! descriptor, so that either layer can read what the other wrote.
//!
//! Because a [`Value`] is not constrained by its schema at compile time,
//! dynamic writes are fallible, and return [`WriteError`] when the value does
//! not fit the schema node it is written against. Integer schemas accept any
//! [`Value::Int`] and narrow it by wrapping around, and struct values are
//! matched to fields by name, so their key order is irrelevant.

use indexmap::IndexMap;

use crate::combinator::{read_opt, read_seq, write_opt, write_seq};
use crate::core::TypeTag;
use crate::error::{ReadError, ReadResult, SchemaError, WriteError, WriteResult};
use crate::prim::*;
use crate::sink::Sink;
use crate::target::{ByteCounter, Target};

/// Runtime descriptor node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde_impls",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "tag")
)]
pub enum Schema {
    Bool,
    Str,
    U8,
    U16,
    U32,
    I32,
    F32,
    F64,
    Enum {
        variants: Vec<String>,
    },
    Struct {
        fields: IndexMap<String, Schema>,
    },
    Tuple {
        components: Vec<Schema>,
    },
    Union {
        variants: IndexMap<String, Option<Schema>>,
    },
    Vec {
        #[cfg_attr(feature = "serde_impls", serde(rename = "type"))]
        ty: Box<Schema>,
    },
    Option {
        #[cfg_attr(feature = "serde_impls", serde(rename = "type"))]
        ty: Box<Schema>,
    },
    Nullable {
        #[cfg_attr(feature = "serde_impls", serde(rename = "type"))]
        ty: Box<Schema>,
    },
}

/// Dynamically typed value, as read and written by a [`Schema`]
///
/// Enumeration values are represented by their variant name, as a
/// [`Value::Str`]. Absent optional values are [`Value::Undefined`], and absent
/// nullable values are [`Value::Null`]. A present optional value is the
/// value itself, except when the optional directly wraps another optional:
/// there it is [`Value::Some`], so that a present-but-absent inner value stays
/// distinct from an absent outer one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
    Tuple(Vec<Value>),
    Struct(IndexMap<String, Value>),
    Union {
        tag: String,
        val: Option<Box<Value>>,
    },
    Vec(Vec<Value>),
    Some(Box<Value>),
    Undefined,
    Null,
}

impl Value {
    /// Unit variant `tag` of a union
    pub fn unit(tag: impl Into<String>) -> Self {
        Value::Union {
            tag: tag.into(),
            val: None,
        }
    }

    /// Payload-carrying variant `tag` of a union
    pub fn tagged(tag: impl Into<String>, val: Value) -> Self {
        Value::Union {
            tag: tag.into(),
            val: Some(Box::new(val)),
        }
    }

    /// Short name of the kind of this value, for error reporting
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Tuple(_) => "tuple",
            Value::Struct(_) => "struct",
            Value::Union { .. } => "union",
            Value::Vec(_) => "vec",
            Value::Some(_) => "some",
            Value::Undefined => "undefined",
            Value::Null => "null",
        }
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Str(val.to_owned())
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::Str(val)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Int(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Float(val)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Struct(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Collects `(name, item)` pairs into an ordered map, rejecting repeated names
fn unique<T>(
    items: impl IntoIterator<Item = (impl Into<String>, T)>,
) -> Result<IndexMap<String, T>, SchemaError> {
    let mut ret = IndexMap::new();
    for (name, item) in items {
        let name = name.into();
        if ret.contains_key(&name) {
            return Err(SchemaError::Duplicate { name });
        }
        ret.insert(name, item);
    }
    Ok(ret)
}

impl Schema {
    #[must_use]
    pub fn vec(ty: Schema) -> Self {
        Schema::Vec { ty: Box::new(ty) }
    }

    #[must_use]
    pub fn option(ty: Schema) -> Self {
        Schema::Option { ty: Box::new(ty) }
    }

    #[must_use]
    pub fn nullable(ty: Schema) -> Self {
        Schema::Nullable { ty: Box::new(ty) }
    }

    /// Tuple of the given components, which must number at least two.
    pub fn tuple(components: Vec<Schema>) -> Result<Self, SchemaError> {
        if components.len() < 2 {
            return Err(SchemaError::TupleArity {
                actual: components.len(),
            });
        }
        Ok(Schema::Tuple { components })
    }

    /// Struct with the given fields, in wire order.
    pub fn structure(
        fields: impl IntoIterator<Item = (impl Into<String>, Schema)>,
    ) -> Result<Self, SchemaError> {
        Ok(Schema::Struct {
            fields: unique(fields)?,
        })
    }

    /// Union with the given variants, in declaration order.
    ///
    /// Variants mapped to `None` are unit variants.
    pub fn union(
        variants: impl IntoIterator<Item = (impl Into<String>, Option<Schema>)>,
    ) -> Result<Self, SchemaError> {
        Ok(Schema::Union {
            variants: unique(variants)?,
        })
    }

    /// Enumeration over the given names, in declaration order.
    pub fn enumeration(
        variants: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, SchemaError> {
        let variants = unique(variants.into_iter().map(|name| (name, ())))?;
        Ok(Schema::Enum {
            variants: variants.into_keys().collect(),
        })
    }

    /// Kind of this schema node
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        match self {
            Schema::Bool => TypeTag::Bool,
            Schema::Str => TypeTag::Str,
            Schema::U8 => TypeTag::U8,
            Schema::U16 => TypeTag::U16,
            Schema::U32 => TypeTag::U32,
            Schema::I32 => TypeTag::I32,
            Schema::F32 => TypeTag::F32,
            Schema::F64 => TypeTag::F64,
            Schema::Enum { .. } => TypeTag::Enum,
            Schema::Struct { .. } => TypeTag::Struct,
            Schema::Tuple { .. } => TypeTag::Tuple,
            Schema::Union { .. } => TypeTag::Union,
            Schema::Vec { .. } => TypeTag::Vec,
            Schema::Option { .. } => TypeTag::Option,
            Schema::Nullable { .. } => TypeTag::Nullable,
        }
    }

    /// Consumes the encoding of one value from the cursor of `sink`.
    pub fn read(&self, sink: &mut Sink) -> ReadResult<Value> {
        Ok(match self {
            Schema::Bool => Value::Bool(read_bool(sink)?),
            Schema::Str => Value::Str(read_str(sink)?),
            Schema::U8 => Value::Int(read_u8(sink)?.into()),
            Schema::U16 => Value::Int(read_u16(sink)?.into()),
            Schema::U32 => Value::Int(read_u32(sink)?.into()),
            Schema::I32 => Value::Int(read_i32(sink)?.into()),
            Schema::F32 => Value::Float(read_f32(sink)?.into()),
            Schema::F64 => Value::Float(read_f64(sink)?),
            Schema::Enum { variants } => {
                let index = read_u32(sink)?;
                match variants.get(index as usize) {
                    Some(name) => Value::Str(name.clone()),
                    None => {
                        return Err(ReadError::bad_discriminant_named(
                            "Enum",
                            index,
                            variants.len(),
                        ))
                    }
                }
            }
            Schema::Struct { fields } => {
                let mut ret = IndexMap::with_capacity(fields.len());
                for (name, field) in fields {
                    ret.insert(name.clone(), field.read(sink)?);
                }
                Value::Struct(ret)
            }
            Schema::Tuple { components } => Value::Tuple(
                components
                    .iter()
                    .map(|c| c.read(sink))
                    .collect::<ReadResult<_>>()?,
            ),
            Schema::Union { variants } => {
                let index = read_u32(sink)?;
                let Some((tag, payload)) = variants.get_index(index as usize) else {
                    return Err(ReadError::bad_discriminant_named(
                        "Union",
                        index,
                        variants.len(),
                    ));
                };
                let val = match payload {
                    Some(payload) => Some(Box::new(payload.read(sink)?)),
                    None => None,
                };
                Value::Union {
                    tag: tag.clone(),
                    val,
                }
            }
            Schema::Vec { ty } => Value::Vec(read_seq(sink, |s| ty.read(s))?),
            Schema::Option { ty } => match read_opt(sink, |s| ty.read(s))? {
                Some(val) if ty.tag() == TypeTag::Option => Value::Some(Box::new(val)),
                Some(val) => val,
                None => Value::Undefined,
            },
            Schema::Nullable { ty } => read_opt(sink, |s| ty.read(s))?.unwrap_or(Value::Null),
        })
    }

    /// Appends the encoding of `val` to `tgt`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if `val` does not fit this schema. The bytes
    /// of any components preceding the offending one will already have been
    /// pushed to `tgt`; use [`to_bytes`](Schema::to_bytes) to validate before
    /// writing anything.
    pub fn write<W: Target>(&self, tgt: &mut W, val: &Value) -> WriteResult<usize> {
        let ret = self.write_value(tgt, val);
        if let Err(err) = &ret {
            tracing::debug!(schema = %self.tag(), value = val.kind(), %err, "dynamic write failed");
        }
        ret
    }

    fn mismatch(&self, val: &Value) -> WriteError {
        WriteError::Mismatch {
            expected: self.tag(),
            found: val.kind(),
        }
    }

    fn int_of(&self, val: &Value) -> WriteResult<i64> {
        match val {
            Value::Int(i) => Ok(*i),
            Value::Float(f) => Ok(*f as i64),
            _ => Err(self.mismatch(val)),
        }
    }

    fn float_of(&self, val: &Value) -> WriteResult<f64> {
        match val {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            _ => Err(self.mismatch(val)),
        }
    }

    fn write_value<W: Target>(&self, tgt: &mut W, val: &Value) -> WriteResult<usize> {
        match self {
            Schema::Bool => match val {
                Value::Bool(b) => Ok(write_bool(tgt, *b)),
                _ => Err(self.mismatch(val)),
            },
            Schema::Str => match val {
                Value::Str(s) => Ok(write_str(tgt, s)),
                _ => Err(self.mismatch(val)),
            },
            Schema::U8 => Ok(write_u8(tgt, wrap_u8(self.int_of(val)?))),
            Schema::U16 => Ok(write_u16(tgt, wrap_u16(self.int_of(val)?))),
            Schema::U32 => Ok(write_u32(tgt, wrap_u32(self.int_of(val)?))),
            Schema::I32 => Ok(write_i32(tgt, wrap_i32(self.int_of(val)?))),
            Schema::F32 => Ok(write_f32(tgt, self.float_of(val)? as f32)),
            Schema::F64 => Ok(write_f64(tgt, self.float_of(val)?)),
            Schema::Enum { variants } => {
                let Value::Str(name) = val else {
                    return Err(self.mismatch(val));
                };
                match variants.iter().position(|v| v == name) {
                    Some(index) => Ok(write_u32(tgt, index as u32)),
                    None => Err(WriteError::UnknownVariant {
                        expected: TypeTag::Enum,
                        name: name.clone(),
                    }),
                }
            }
            Schema::Struct { fields } => {
                let Value::Struct(map) = val else {
                    return Err(self.mismatch(val));
                };
                let mut ret = 0;
                for (name, field) in fields {
                    ret += match (map.get(name), field) {
                        (Some(v), _) => field.write_value(tgt, v)?,
                        (None, Schema::Option { .. }) => field.write_value(tgt, &Value::Undefined)?,
                        (None, _) => {
                            return Err(WriteError::MissingField {
                                field: name.clone(),
                            })
                        }
                    };
                }
                Ok(ret)
            }
            Schema::Tuple { components } => {
                let Value::Tuple(items) = val else {
                    return Err(self.mismatch(val));
                };
                if items.len() != components.len() {
                    return Err(WriteError::Arity {
                        expected: components.len(),
                        actual: items.len(),
                    });
                }
                let mut ret = 0;
                for (component, item) in components.iter().zip(items) {
                    ret += component.write_value(tgt, item)?;
                }
                Ok(ret)
            }
            Schema::Union { variants } => {
                let Value::Union { tag, val: payload } = val else {
                    return Err(self.mismatch(val));
                };
                let Some((index, _, ty)) = variants.get_full(tag) else {
                    return Err(WriteError::UnknownVariant {
                        expected: TypeTag::Union,
                        name: tag.clone(),
                    });
                };
                match (ty, payload) {
                    (None, None) => Ok(write_u32(tgt, index as u32)),
                    (Some(ty), Some(payload)) => {
                        Ok(write_u32(tgt, index as u32) + ty.write_value(tgt, payload)?)
                    }
                    (Some(_), None) => Err(WriteError::MissingPayload { tag: tag.clone() }),
                    (None, Some(_)) => Err(WriteError::UnexpectedPayload { tag: tag.clone() }),
                }
            }
            Schema::Vec { ty } => {
                let Value::Vec(items) = val else {
                    return Err(self.mismatch(val));
                };
                let mut err = None;
                let ret = write_seq(tgt, items, |tgt, item| match ty.write_value(tgt, item) {
                    Ok(n) => n,
                    Err(e) => {
                        err.get_or_insert(e);
                        0
                    }
                });
                match err {
                    Some(e) => Err(e),
                    None => Ok(ret),
                }
            }
            Schema::Option { ty } => match val {
                Value::Undefined => Ok(write_opt::<W, Value, _>(tgt, None, |_, _| 0)),
                Value::Some(present) => self.write_present(tgt, ty, present),
                present => self.write_present(tgt, ty, present),
            },
            Schema::Nullable { ty } => match val {
                Value::Null => Ok(write_opt::<W, Value, _>(tgt, None, |_, _| 0)),
                present => self.write_present(tgt, ty, present),
            },
        }
    }

    fn write_present<W: Target>(&self, tgt: &mut W, ty: &Schema, val: &Value) -> WriteResult<usize> {
        let mut ret = Ok(0);
        let n = write_opt(tgt, Some(val), |tgt, val| match ty.write_value(tgt, val) {
            Ok(n) => n,
            Err(e) => {
                ret = Err(e);
                0
            }
        });
        ret.map(|_| n)
    }

    /// Computes the exact number of bytes in the encoding of `val`.
    pub fn encoded_len(&self, val: &Value) -> WriteResult<usize> {
        let mut ctr: ByteCounter = std::io::sink();
        self.write(&mut ctr, val)
    }

    /// Encodes `val` into a freshly allocated buffer sized to fit exactly.
    ///
    /// Nothing is allocated unless `val` fits this schema.
    pub fn to_bytes(&self, val: &Value) -> WriteResult<Vec<u8>> {
        let mut sink = Sink::new(self.encoded_len(val)?);
        self.write_value(&mut sink, val)?;
        Ok(sink.into_vec())
    }

    /// Decodes one value from the start of `bytes`.
    pub fn decode(&self, bytes: impl Into<Vec<u8>>) -> ReadResult<Value> {
        let mut sink = Sink::from_bytes(bytes);
        let ret = self.read(&mut sink)?;
        sink.finish()?;
        Ok(ret)
    }
}
