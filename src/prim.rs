//! Scalar codec
//!
//! Stateless encode/decode pairs for every fixed-width scalar of the wire
//! format, the wide length frame, and UTF-8 strings. Writers are generic over
//! [`Target`] and return the number of bytes written; readers consume from a
//! [`Sink`] and fail only when the valid region is exhausted (or, for strings
//! and lengths, when the payload is malformed).
//!
//! All multi-byte values use the byte order declared by the target or sink.

use crate::error::{ReadError, ReadResult};
use crate::sink::Sink;
use crate::target::Target;

/// Mask of the bits of a wide length frame that carry the value
const LEN_MASK: u64 = 0xffff_ffff;

pub fn write_bool<W: Target>(tgt: &mut W, val: bool) -> usize {
    write_u8(tgt, u8::from(val))
}

/// Reads a boolean, treating `1` as `true` and any other byte as `false`.
pub fn read_bool(sink: &mut Sink) -> ReadResult<bool> {
    Ok(read_u8(sink)? == 1)
}

#[inline]
pub fn write_u8<W: Target>(tgt: &mut W, val: u8) -> usize {
    tgt.push_one(val)
}

#[inline]
pub fn read_u8(sink: &mut Sink) -> ReadResult<u8> {
    let [b] = sink.take::<1>()?;
    Ok(b)
}

pub fn write_u16<W: Target>(tgt: &mut W, val: u16) -> usize {
    let bytes = tgt.endianness().u16_bytes(val);
    tgt.push_many(bytes)
}

pub fn read_u16(sink: &mut Sink) -> ReadResult<u16> {
    let bytes = sink.take::<2>()?;
    Ok(sink.endianness().u16_from(bytes))
}

pub fn write_u32<W: Target>(tgt: &mut W, val: u32) -> usize {
    let bytes = tgt.endianness().u32_bytes(val);
    tgt.push_many(bytes)
}

pub fn read_u32(sink: &mut Sink) -> ReadResult<u32> {
    let bytes = sink.take::<4>()?;
    Ok(sink.endianness().u32_from(bytes))
}

/// Writes an `i32` as the two's-complement bit pattern of a `u32`
pub fn write_i32<W: Target>(tgt: &mut W, val: i32) -> usize {
    write_u32(tgt, val as u32)
}

pub fn read_i32(sink: &mut Sink) -> ReadResult<i32> {
    Ok(read_u32(sink)? as i32)
}

pub fn write_f32<W: Target>(tgt: &mut W, val: f32) -> usize {
    write_u32(tgt, val.to_bits())
}

pub fn read_f32(sink: &mut Sink) -> ReadResult<f32> {
    Ok(f32::from_bits(read_u32(sink)?))
}

pub fn write_f64<W: Target>(tgt: &mut W, val: f64) -> usize {
    let bytes = tgt.endianness().u64_bytes(val.to_bits());
    tgt.push_many(bytes)
}

pub fn read_f64(sink: &mut Sink) -> ReadResult<f64> {
    let bytes = sink.take::<8>()?;
    Ok(f64::from_bits(sink.endianness().u64_from(bytes)))
}

/// Writes a length or element count into an 8-byte wide frame.
///
/// Only the low 32 bits of `len` are kept; the high 32 bits of the frame are
/// always written as zero, so that readers expecting a full 64-bit length
/// never observe stale bytes.
pub fn write_len<W: Target>(tgt: &mut W, len: usize) -> usize {
    debug_assert!(len as u64 <= LEN_MASK, "length {len} exceeds 32 bits");
    let bytes = tgt.endianness().u64_bytes(len as u64 & LEN_MASK);
    tgt.push_many(bytes)
}

/// Reads an 8-byte wide length frame.
///
/// # Errors
///
/// Returns [`ReadError::WideLength`] if any of the high 32 bits are set.
pub fn read_len(sink: &mut Sink) -> ReadResult<usize> {
    let bytes = sink.take::<8>()?;
    let value = sink.endianness().u64_from(bytes);
    if value & !LEN_MASK != 0 {
        return Err(ReadError::WideLength { value });
    }
    Ok(value as usize)
}

/// Writes a string as its UTF-8 byte length followed by its UTF-8 bytes
pub fn write_str<W: Target>(tgt: &mut W, val: &str) -> usize {
    tgt.anticipate(8 + val.len());
    write_len(tgt, val.len()) + tgt.push_all(val.as_bytes())
}

pub fn read_str(sink: &mut Sink) -> ReadResult<String> {
    let len = read_len(sink)?;
    let bytes = sink.take_slice(len)?.to_vec();
    Ok(String::from_utf8(bytes)?)
}

/// Narrows `val` to `u8` modulo 2^8
#[inline]
#[must_use]
pub const fn wrap_u8(val: i64) -> u8 {
    val as u8
}

/// Narrows `val` to `u16` modulo 2^16
#[inline]
#[must_use]
pub const fn wrap_u16(val: i64) -> u16 {
    val as u16
}

/// Narrows `val` to `u32` modulo 2^32
#[inline]
#[must_use]
pub const fn wrap_u32(val: i64) -> u32 {
    val as u32
}

/// Narrows `val` to `i32` modulo 2^32, reinterpreted as two's complement
#[inline]
#[must_use]
pub const fn wrap_i32(val: i64) -> i32 {
    val as i32
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sink::Endianness;

    fn written(f: impl FnOnce(&mut Sink) -> usize) -> (String, usize) {
        let mut sink = Sink::new(1);
        let n = f(&mut sink);
        (sink.to_hex(), n)
    }

    #[test]
    fn fixed_widths() {
        assert_eq!(written(|s| write_bool(s, true)), ("01".into(), 1));
        assert_eq!(written(|s| write_u8(s, 0xfe)), ("fe".into(), 1));
        assert_eq!(written(|s| write_u16(s, 0x0102)), ("0201".into(), 2));
        assert_eq!(written(|s| write_u32(s, 1)), ("01000000".into(), 4));
        assert_eq!(written(|s| write_i32(s, -1)), ("ffffffff".into(), 4));
        assert_eq!(written(|s| write_f32(s, 1.0)), ("0000803f".into(), 4));
        assert_eq!(written(|s| write_f64(s, 1.0)), ("000000000000f03f".into(), 8));
    }

    #[test]
    fn wide_length_high_bytes_zero() {
        assert_eq!(written(|s| write_len(s, 3)), ("0300000000000000".into(), 8));
        let mut sink = Sink::with_endianness(0, Endianness::Big);
        write_len(&mut sink, 3);
        assert_eq!(sink.to_hex(), "0000000000000003");
    }

    #[test]
    fn wide_length_rejects_high_bits() {
        let mut sink = Sink::from_bytes(vec![1, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(
            read_len(&mut sink),
            Err(ReadError::WideLength {
                value: 0x0000_0001_0000_0001
            })
        );
    }

    #[test]
    fn string_length_is_utf8_bytes() {
        let (hex, n) = written(|s| write_str(s, "é"));
        assert_eq!(hex, "0200000000000000c3a9");
        assert_eq!(n, 10);
    }

    #[test]
    fn string_round_trip() {
        for val in ["", "abc", "привет, мир"] {
            let mut sink = Sink::new(0);
            write_str(&mut sink, val);
            sink.rewind();
            assert_eq!(read_str(&mut sink).unwrap(), val);
        }
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let mut sink = Sink::from_bytes(vec![1, 0, 0, 0, 0, 0, 0, 0, 0xff]);
        assert!(matches!(read_str(&mut sink), Err(ReadError::InvalidUtf8(_))));
    }

    #[test]
    fn truncated_string_fails() {
        let mut sink = Sink::from_bytes(vec![4, 0, 0, 0, 0, 0, 0, 0, b'a']);
        assert!(matches!(read_str(&mut sink), Err(ReadError::UnexpectedEnd { .. })));
    }

    #[test]
    fn bool_reads_only_one_as_true() {
        let mut sink = Sink::from_bytes(vec![1, 0, 2]);
        assert!(read_bool(&mut sink).unwrap());
        assert!(!read_bool(&mut sink).unwrap());
        assert!(!read_bool(&mut sink).unwrap());
    }

    #[test]
    fn big_endian_scalars() {
        let mut sink = Sink::with_endianness(0, Endianness::Big);
        write_u16(&mut sink, 0x0102);
        write_i32(&mut sink, -2);
        write_f64(&mut sink, -0.5);
        assert_eq!(sink.to_hex(), "0102fffffffebfe0000000000000");
        sink.rewind();
        assert_eq!(read_u16(&mut sink).unwrap(), 0x0102);
        assert_eq!(read_i32(&mut sink).unwrap(), -2);
        assert_eq!(read_f64(&mut sink).unwrap(), -0.5);
    }

    #[test]
    fn wrapping() {
        assert_eq!(wrap_u8(255 + 2), 1);
        assert_eq!(wrap_u16((1 << 16) + 1), 1);
        assert_eq!(wrap_u32((1 << 32) + 1), 1);
        assert_eq!(wrap_i32(1 << 31), i32::MIN);
        assert_eq!(wrap_u8(-1), 255);
    }
}
