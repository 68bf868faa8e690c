// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::padding_for;
use crate::error::{Error, Result};

/// Generate aligned little-endian read methods for fixed-width primitives.
macro_rules! impl_read_le {
    ($name:ident, $type:ty) => {
        #[doc = concat!("Read a `", stringify!($type), "`, aligned to its width.")]
        pub fn $name(&mut self) -> Result<$type> {
            Ok(<$type>::from_le_bytes(self.take_array()?))
        }
    };
}

/// CDR reader over a borrowed input buffer (zero-copy)
///
/// Never reads past the end of the slice: every read checks the remaining
/// length first and reports [`Error::DecodeUnderflow`] instead.
pub struct CdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> CdrReader<'a> {
    /// Create a reader; offsets and alignment start at `buf[0]`.
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far (including padding)
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True once every byte has been consumed
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, alignment: usize, size: usize) -> Result<&'a [u8]> {
        let pad = padding_for(self.pos, alignment);
        let needed = pad.saturating_add(size);
        if needed > self.remaining() {
            return Err(Error::DecodeUnderflow {
                offset: self.pos,
                needed,
                remaining: self.remaining(),
            });
        }
        let start = self.pos + pad;
        self.pos = start + size;
        Ok(&self.buf[start..start + size])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N, N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(bytes);
        Ok(arr)
    }

    /// Skip padding up to `alignment` (power of two).
    pub fn align(&mut self, alignment: usize) -> Result<()> {
        self.take(alignment, 0).map(|_| ())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1, 1)?[0])
    }

    /// Read a single signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_le_bytes(self.take_array()?))
    }

    /// Read a boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    impl_read_le!(read_u16, u16);
    impl_read_le!(read_i16, i16);
    impl_read_le!(read_u32, u32);
    impl_read_le!(read_i32, i32);
    impl_read_le!(read_u64, u64);
    impl_read_le!(read_i64, i64);
    impl_read_le!(read_f32, f32);
    impl_read_le!(read_f64, f64);

    /// Borrow `count` raw bytes (no alignment).
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(1, count)
    }

    /// Read a u32 element count and check it against the remaining input.
    ///
    /// `min_element_size` is the smallest number of bytes one element can
    /// occupy on the wire. A count that cannot possibly fit is rejected
    /// before the caller touches any element storage.
    pub fn read_count(&mut self, min_element_size: usize) -> Result<usize> {
        let offset = self.pos;
        let count = self.read_u32()? as usize;
        let needed = count.saturating_mul(min_element_size);
        if needed > self.remaining() {
            return Err(Error::DecodeUnderflow {
                offset,
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(count)
    }

    /// Read a length-prefixed, NUL-terminated string, borrowed from the input.
    ///
    /// A zero length prefix decodes as the empty string.
    pub fn read_string(&mut self) -> Result<&'a str> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok("");
        }
        let bytes = self.take(1, len)?;
        let (text, terminator) = bytes.split_at(len - 1);
        if terminator != [0] {
            return Err(Error::InvalidData {
                reason: "string is missing its NUL terminator",
            });
        }
        core::str::from_utf8(text).map_err(|_| Error::InvalidData {
            reason: "string is not valid UTF-8",
        })
    }
}
