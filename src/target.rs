//! Write-side buffer abstraction
//!
//! Every encoder in this crate is generic over [`Target`], which is
//! implemented by [`Sink`](crate::sink::Sink), by plain `Vec<u8>` buffers
//! (append-only, little-endian), and by [`ByteCounter`], which only counts.

use crate::sink::Endianness;

/// Trait for byte-oriented buffers with incremental append operations
///
/// In most ways, it is convenient to think of `Target` as an analogous trait to
/// [`std::io::Write`]. The principal difference between the two is the fact
/// that the `push_XXX` methods on `Target` are infallible and total; while
/// they return a `usize` value representing the number of bytes written, this
/// is used only for summary book-keeping on the caller side.
///
/// All implementors of `Target` must define these methods as infallible and total.
pub trait Target {
    /// Ensures that at least `extra` more bytes can be pushed without
    /// further growth.
    ///
    /// For structures without a notion of capacity this is a no-op.
    fn anticipate(&mut self, extra: usize);

    /// Byte order used for every multi-byte scalar pushed to this target
    fn endianness(&self) -> Endianness;

    /// Appends a single byte, returning `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends the bytes in a known-length array, returning `N`.
    ///
    /// The operational semantics of this method should be indistinguishable from repeated
    /// calls to `push_one` over every element of the array in order:
    ///
    /// ```ignore
    /// x.push_many(*b"Rust") === x.push_one(b'R') + x.push_one(b'u') + x.push_one(b's') + x.push_one(b't')
    /// ```
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;

    /// Appends the bytes in an arbitrary-length byte-slice, returning its length.
    fn push_all(&mut self, buf: &[u8]) -> usize;
}

/// Alias for `std::io::Sink` that is used to count the number of
/// bytes required to serialize a value, without performing any
/// memory operations.
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline(always)]
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend(&arr);
        N
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counter_counts() {
        let mut ctr: ByteCounter = std::io::sink();
        assert_eq!(ctr.push_one(0) + ctr.push_many([1, 2, 3]) + ctr.push_all(b"four"), 8);
    }

    #[test]
    fn vec_appends() {
        let mut buf = vec![0xffu8];
        assert_eq!(buf.push_many(*b"ab") + buf.push_all(b"c"), 3);
        assert_eq!(buf, vec![0xff, b'a', b'b', b'c']);
    }
}
