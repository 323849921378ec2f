//! Combinator codec
//!
//! Higher-order helpers lifting an element writer/reader into a writer/reader
//! for sequences and optional values:
//!
//!   * sequence: `[wide count][count × element]`
//!   * optional: `[1-byte discriminant][element if 1]`
//!
//! Nullable values share the optional wire shape, and are lifted through the
//! same helpers by the [`Nullable`](crate::types::Nullable) descriptor.

use crate::error::ReadResult;
use crate::prim::{read_len, read_u8, write_len, write_u8};
use crate::sink::Sink;
use crate::target::Target;

/// Writes the element count followed by every element, in order
pub fn write_seq<W, T, F>(tgt: &mut W, seq: &[T], mut write_elem: F) -> usize
where
    W: Target,
    F: FnMut(&mut W, &T) -> usize,
{
    seq.iter()
        .fold(write_len(tgt, seq.len()), |acc, elem| acc + write_elem(tgt, elem))
}

/// Reads an element count, then exactly that many elements into a fresh `Vec`.
pub fn read_seq<T, F>(sink: &mut Sink, mut read_elem: F) -> ReadResult<Vec<T>>
where
    F: FnMut(&mut Sink) -> ReadResult<T>,
{
    let count = read_len(sink)?;
    let mut ret = Vec::with_capacity(count.min(sink.remaining()));
    for _ in 0..count {
        ret.push(read_elem(sink)?);
    }
    Ok(ret)
}

/// Writes `0` for an absent value, or `1` followed by the element
pub fn write_opt<W, T, F>(tgt: &mut W, val: Option<&T>, write_elem: F) -> usize
where
    W: Target,
    F: FnOnce(&mut W, &T) -> usize,
{
    match val {
        Some(elem) => write_u8(tgt, 1) + write_elem(tgt, elem),
        None => write_u8(tgt, 0),
    }
}

/// Reads a discriminant byte, then the element if the byte is `1`.
///
/// Any other discriminant byte is read as an absent value.
pub fn read_opt<T, F>(sink: &mut Sink, read_elem: F) -> ReadResult<Option<T>>
where
    F: FnOnce(&mut Sink) -> ReadResult<T>,
{
    match read_u8(sink)? {
        1 => Ok(Some(read_elem(sink)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prim::{read_bool, write_bool};

    #[test]
    fn seq_layout() {
        let mut sink = Sink::new(1);
        let n = write_seq(&mut sink, &[true, false], |s, b| write_bool(s, *b));
        assert_eq!(n, 10);
        assert_eq!(sink.to_hex(), "02000000000000000100");
        sink.rewind();
        assert_eq!(read_seq(&mut sink, read_bool).unwrap(), vec![true, false]);
    }

    #[test]
    fn empty_seq() {
        let mut sink = Sink::new(0);
        write_seq::<_, bool, _>(&mut sink, &[], |s, b| write_bool(s, *b));
        sink.rewind();
        assert_eq!(read_seq(&mut sink, read_bool).unwrap(), Vec::<bool>::new());
    }

    #[test]
    fn oversized_count_fails_without_allocating() {
        let mut sink = Sink::from_bytes(vec![0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0, 1]);
        assert!(read_seq(&mut sink, read_bool).is_err());
    }

    #[test]
    fn opt_layout() {
        let mut sink = Sink::new(0);
        write_opt(&mut sink, Some(&true), |s, b| write_bool(s, *b));
        write_opt::<_, bool, _>(&mut sink, None, |s, b| write_bool(s, *b));
        assert_eq!(sink.to_hex(), "010100");
        sink.rewind();
        assert_eq!(read_opt(&mut sink, read_bool).unwrap(), Some(true));
        assert_eq!(read_opt(&mut sink, read_bool).unwrap(), None);
    }
}
