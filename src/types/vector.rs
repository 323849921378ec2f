use crate::combinator::{read_seq, write_seq};
use crate::core::{BinType, TypeTag};
use crate::error::ReadResult;
use crate::schema::Schema;
use crate::sink::Sink;
use crate::target::Target;

/// Homogeneous variable-length sequence of `T`-described elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector<T>(pub T);

impl<T> Vector<T> {
    pub const fn new(elem: T) -> Self {
        Self(elem)
    }

    /// Descriptor of the elements
    pub const fn elem(&self) -> &T {
        &self.0
    }
}

impl<T: BinType> BinType for Vector<T> {
    type Value = Vec<T::Value>;

    const TAG: TypeTag = TypeTag::Vec;

    fn read(&self, sink: &mut Sink) -> ReadResult<Self::Value> {
        read_seq(sink, |s| self.0.read(s))
    }

    fn write<W: Target>(&self, tgt: &mut W, val: &Self::Value) -> usize {
        write_seq(tgt, val, |t, elem| self.0.write(t, elem))
    }

    fn schema(&self) -> Schema {
        Schema::vec(self.0.schema())
    }
}
