//! Growable byte buffer with a cursor
//!
//! [`Sink`] is the boundary handle of the codec: encoders push bytes into it
//! at the cursor, decoders consume bytes from it starting at the cursor.
//!
//! # Storage and Growth
//!
//! A `Sink` owns a zero-initialized storage region whose length is its
//! *capacity*. Writes never run past the capacity: before `n` bytes are
//! written, [`Sink::reserve`] grows the storage to
//! `max(2 × capacity, capacity + n)` whenever fewer than `n` bytes remain
//! after the cursor, keeping the bytes already present. This makes growth
//! amortized O(1) per byte over the lifetime of a sink, starting from any
//! initial capacity (including zero).
//!
//! # Valid Region
//!
//! Alongside the cursor, a `Sink` tracks the furthest offset that has ever
//! been written (or, for sinks built with [`Sink::from_bytes`], the length of
//! the provided buffer). Reads are checked against this mark, and fail with
//! [`ReadError::UnexpectedEnd`] rather than yielding stale storage.

use crate::error::{ReadError, ReadResult};
use crate::target::Target;

/// Byte order of every multi-byte scalar stored in a [`Sink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

macro_rules! endian_conv {
    ( $( $t:ty => $enc:ident, $dec:ident, $n:literal );+ $(;)? ) => {
        impl Endianness {
            $(
                #[doc = concat!("Converts a `", stringify!($t), "` into its bytes in this byte order")]
                #[inline]
                #[must_use]
                pub const fn $enc(self, val: $t) -> [u8; $n] {
                    match self {
                        Endianness::Little => val.to_le_bytes(),
                        Endianness::Big => val.to_be_bytes(),
                    }
                }

                #[doc = concat!("Reassembles a `", stringify!($t), "` from its bytes in this byte order")]
                #[inline]
                #[must_use]
                pub const fn $dec(self, bytes: [u8; $n]) -> $t {
                    match self {
                        Endianness::Little => <$t>::from_le_bytes(bytes),
                        Endianness::Big => <$t>::from_be_bytes(bytes),
                    }
                }
            )+
        }
    };
}

endian_conv! {
    u16 => u16_bytes, u16_from, 2;
    u32 => u32_bytes, u32_from, 4;
    u64 => u64_bytes, u64_from, 8;
}

/// Owned growable byte buffer with a cursor and a fixed byte order
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Sink {
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
    endian: Endianness,
}

impl Sink {
    /// Creates an empty little-endian `Sink` with `capacity` bytes of storage
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_endianness(capacity, Endianness::Little)
    }

    /// Creates an empty `Sink` with `capacity` bytes of storage and the
    /// specified byte order
    #[must_use]
    pub fn with_endianness(capacity: usize, endian: Endianness) -> Self {
        Self {
            buf: vec![0; capacity],
            pos: 0,
            filled: 0,
            endian,
        }
    }

    /// Wraps an encoded little-endian buffer for reading, positioned at its start
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes_with(bytes, Endianness::Little)
    }

    /// Wraps an encoded buffer of the specified byte order for reading,
    /// positioned at its start
    #[must_use]
    pub fn from_bytes_with(bytes: impl Into<Vec<u8>>, endian: Endianness) -> Self {
        let buf = bytes.into();
        let filled = buf.len();
        Self {
            buf,
            pos: 0,
            filled,
            endian,
        }
    }

    /// Current size of the storage region
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Current cursor offset
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies beyond the current capacity.
    pub fn set_position(&mut self, pos: usize) {
        assert!(
            pos <= self.capacity(),
            "cannot move cursor to {pos} in sink of capacity {}",
            self.capacity()
        );
        self.pos = pos;
    }

    /// Moves the cursor back to the start, keeping the valid region intact
    /// so that previously written bytes can be read back.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Discards all written bytes while keeping the storage, so that the
    /// sink can be reused for another encode call.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.filled = 0;
    }

    /// Byte order of this sink
    #[inline]
    #[must_use]
    pub fn endianness(&self) -> Endianness {
        self.endian
    }

    /// Number of valid bytes left to read after the cursor
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.filled.saturating_sub(self.pos)
    }

    /// Valid region of the sink, i.e. every byte written so far.
    ///
    /// This extends up to the furthest offset ever written, so moving the
    /// cursor back to patch earlier bytes does not cut off what follows.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// Consumes the sink, returning its valid region
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.filled);
        self.buf
    }

    /// Lowercase hexadecimal rendering of [`written`](Self::written)
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.written().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Guarantees that at least `n` bytes of storage are free after the cursor.
    ///
    /// When growth is needed, the new capacity is the larger of twice the
    /// current capacity and the current capacity plus `n`.
    pub fn reserve(&mut self, n: usize) {
        let cap = self.buf.len();
        if cap - self.pos >= n {
            return;
        }
        let new_cap = std::cmp::max(cap * 2, cap + n);
        tracing::trace!(from = cap, to = new_cap, "growing sink storage");
        self.buf.resize(new_cap, 0);
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.pos += n;
        if self.pos > self.filled {
            self.filled = self.pos;
        }
    }

    fn check(&self, requested: usize) -> ReadResult<usize> {
        match self.pos.checked_add(requested) {
            Some(end) if end <= self.filled => Ok(end),
            _ => Err(ReadError::UnexpectedEnd {
                offset: self.pos,
                requested,
                available: self.remaining(),
            }),
        }
    }

    /// Consumes exactly `N` bytes from the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEnd`] if fewer than `N` valid bytes remain.
    pub fn take<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let end = self.check(N)?;
        let mut ret = [0u8; N];
        ret.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(ret)
    }

    /// Consumes `n` bytes from the cursor, returning them as a borrowed slice.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnexpectedEnd`] if fewer than `n` valid bytes remain.
    pub fn take_slice(&mut self, n: usize) -> ReadResult<&[u8]> {
        let start = self.pos;
        let end = self.check(n)?;
        self.pos = end;
        Ok(&self.buf[start..end])
    }

    cfg_if::cfg_if! {
        if #[cfg(feature = "check_complete_read")] {
            /// Checks that no valid bytes remain after a top-level decode.
            ///
            /// # Errors
            ///
            /// Returns [`ReadError::Trailing`] if the cursor has not reached
            /// the end of the valid region.
            pub fn finish(&self) -> ReadResult<()> {
                match self.remaining() {
                    0 => Ok(()),
                    residual => Err(ReadError::Trailing { residual }),
                }
            }
        } else {
            /// Checks that no valid bytes remain after a top-level decode.
            ///
            /// Trailing bytes are only rejected when the `check_complete_read`
            /// feature is enabled; otherwise this always succeeds.
            #[inline(always)]
            pub fn finish(&self) -> ReadResult<()> {
                Ok(())
            }
        }
    }
}

impl From<Sink> for Vec<u8> {
    fn from(sink: Sink) -> Self {
        sink.into_vec()
    }
}

impl Target for Sink {
    /// Calls [`Sink::reserve`]
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn endianness(&self) -> Endianness {
        self.endian
    }

    fn push_one(&mut self, b: u8) -> usize {
        self.reserve(1);
        self.buf[self.pos] = b;
        self.advance(1);
        1
    }

    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.reserve(N);
        self.buf[self.pos..self.pos + N].copy_from_slice(&arr);
        self.advance(N);
        N
    }

    fn push_all(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len();
        self.reserve(n);
        self.buf[self.pos..self.pos + n].copy_from_slice(bytes);
        self.advance(n);
        n
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn growth_doubles_or_fits() {
        let mut sink = Sink::new(4);
        sink.push_many([0; 3]);
        sink.reserve(2);
        assert_eq!(sink.capacity(), 8);
        sink.reserve(100);
        assert_eq!(sink.capacity(), 8 + 100);
    }

    #[test]
    fn reserve_is_noop_with_room() {
        let mut sink = Sink::new(16);
        sink.reserve(16);
        assert_eq!(sink.capacity(), 16);
    }

    #[test]
    fn grows_from_empty() {
        let mut sink = Sink::new(0);
        sink.push_all(b"hello");
        assert_eq!(sink.written(), b"hello");
        assert!(sink.capacity() >= 5);
    }

    #[test]
    fn overwrite_after_reposition() {
        let mut sink = Sink::new(8);
        sink.push_many([2; 8]);
        sink.set_position(0);
        sink.push_many(Endianness::Little.u64_bytes(1));
        assert_eq!(sink.to_hex(), "0100000000000000");
    }

    #[test]
    fn rewind_reads_back() {
        let mut sink = Sink::new(1);
        sink.push_all(&[1, 2, 3]);
        sink.rewind();
        assert_eq!(sink.take::<2>().unwrap(), [1, 2]);
        assert_eq!(sink.remaining(), 1);
    }

    #[test]
    fn read_past_end_fails() {
        let mut sink = Sink::from_bytes(vec![0xaa, 0xbb]);
        assert_eq!(
            sink.take::<4>(),
            Err(ReadError::UnexpectedEnd {
                offset: 0,
                requested: 4,
                available: 2
            })
        );
        assert_eq!(sink.take_slice(2).unwrap(), &[0xaa, 0xbb]);
        assert!(sink.take::<1>().is_err());
    }

    #[test]
    fn stale_storage_is_not_readable() {
        let mut sink = Sink::new(64);
        sink.push_one(7);
        sink.rewind();
        assert_eq!(sink.take::<1>().unwrap(), [7]);
        assert!(sink.take::<1>().is_err());
    }

    #[test]
    fn reset_discards() {
        let mut sink = Sink::new(2);
        sink.push_all(b"abc");
        let cap = sink.capacity();
        sink.reset();
        assert_eq!(sink.position(), 0);
        assert_eq!(sink.remaining(), 0);
        assert_eq!(sink.capacity(), cap);
    }

    #[test]
    fn endianness_round_trip() {
        assert_eq!(Endianness::Big.u32_bytes(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(Endianness::Little.u32_bytes(0x0102_0304), [4, 3, 2, 1]);
        assert_eq!(Endianness::Big.u16_from([0x12, 0x34]), 0x1234);
    }

    #[test]
    fn into_vec_truncates() {
        let mut sink = Sink::new(32);
        sink.push_all(b"xy");
        assert_eq!(Vec::from(sink), b"xy".to_vec());
    }

    #[test]
    fn patching_keeps_tail() {
        let mut sink = Sink::new(0);
        sink.push_many([0; 4]);
        sink.push_all(b"body");
        sink.set_position(0);
        sink.push_many(Endianness::Little.u32_bytes(4));
        assert_eq!(sink.position(), 4);
        assert_eq!(sink.written(), b"\x04\0\0\0body");
        assert_eq!(sink.into_vec(), b"\x04\0\0\0body".to_vec());
    }
}
