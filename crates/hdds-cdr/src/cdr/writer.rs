// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::padding_for;
use crate::error::{Error, Result};

/// Generate aligned little-endian write methods for fixed-width primitives.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        #[doc = concat!("Write a `", stringify!($type), "`, aligned to its width.")]
        pub fn $name(&mut self, value: $type) -> Result<()> {
            self.put(&value.to_le_bytes())
        }
    };
}

/// CDR writer over a caller-owned, fixed-capacity buffer
///
/// # Example
///
/// ```
/// use hdds_cdr::cdr::CdrWriter;
///
/// let mut buf = [0u8; 16];
/// let mut writer = CdrWriter::new(&mut buf);
/// writer.write_u8(1).unwrap();
/// writer.write_u32(42).unwrap();
/// assert_eq!(writer.position(), 8);
/// ```
pub struct CdrWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
    counting: bool,
}

/// Placeholder for a sequence count written before its elements.
///
/// Returned by [`CdrWriter::begin_sequence`]; the count is patched in by
/// [`CdrWriter::finish_sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a sequence count placeholder must be finished"]
pub struct SequenceMark {
    offset: usize,
}

impl<'a> CdrWriter<'a> {
    /// Create a writer over `buf`; offsets and alignment start at `buf[0]`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            counting: false,
        }
    }

    /// Create a measuring writer that tracks position but stores nothing.
    ///
    /// Capacity is unbounded, so only invalid values can make it fail.
    pub fn counting() -> CdrWriter<'static> {
        CdrWriter {
            buf: &mut [],
            pos: 0,
            counting: true,
        }
    }

    /// Bytes written so far (including padding)
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes still available; `usize::MAX` for a counting writer
    pub fn remaining(&self) -> usize {
        if self.counting {
            usize::MAX
        } else {
            self.buf.len() - self.pos
        }
    }

    /// True if this writer only measures
    pub const fn is_counting(&self) -> bool {
        self.counting
    }

    /// Check room for `pad + size` bytes and zero the padding.
    ///
    /// Returns the aligned start offset. The cursor is not moved.
    fn reserve(&mut self, alignment: usize, size: usize) -> Result<usize> {
        let pad = padding_for(self.pos, alignment);
        let needed = pad.checked_add(size).ok_or(Error::InvalidData {
            reason: "encoded length overflows usize",
        })?;
        if self.counting {
            return Ok(self.pos + pad);
        }
        if needed > self.buf.len() - self.pos {
            return Err(Error::EncodeOverflow {
                offset: self.pos,
                needed,
                capacity: self.buf.len(),
            });
        }
        self.buf[self.pos..self.pos + pad].fill(0);
        Ok(self.pos + pad)
    }

    fn put<const N: usize>(&mut self, bytes: &[u8; N]) -> Result<()> {
        let start = self.reserve(N, N)?;
        if !self.counting {
            self.buf[start..start + N].copy_from_slice(bytes);
        }
        self.pos = start + N;
        Ok(())
    }

    /// Align the cursor to `alignment` (power of two), zero-filling padding.
    pub fn align(&mut self, alignment: usize) -> Result<()> {
        self.pos = self.reserve(alignment, 0)?;
        Ok(())
    }

    /// Write a single byte (no alignment).
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(&[value])
    }

    /// Write a single signed byte.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    /// Write a boolean as one byte (0 or 1).
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.put(&[u8::from(value)])
    }

    impl_write_le!(write_u16, u16);
    impl_write_le!(write_i16, i16);
    impl_write_le!(write_u32, u32);
    impl_write_le!(write_i32, i32);
    impl_write_le!(write_u64, u64);
    impl_write_le!(write_i64, i64);
    impl_write_le!(write_f32, f32);
    impl_write_le!(write_f64, f64);

    /// Write raw bytes back-to-back, no alignment and no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let start = self.reserve(1, bytes.len())?;
        if !self.counting {
            self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        }
        self.pos = start + bytes.len();
        Ok(())
    }

    /// Write a sequence/array element count as a u32.
    pub fn write_count(&mut self, count: usize) -> Result<()> {
        let count = u32::try_from(count).map_err(|_| Error::InvalidData {
            reason: "element count exceeds u32::MAX",
        })?;
        self.write_u32(count)
    }

    /// Write a string: u32 length including NUL, bytes, NUL.
    ///
    /// The whole string is bounds-checked up front, so an overflow never
    /// leaves a dangling length prefix behind.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let wire_len = bytes
            .len()
            .checked_add(1)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(Error::InvalidData {
                reason: "string length exceeds u32::MAX",
            })?;
        let start = self.reserve(4, 4 + bytes.len() + 1)?;
        if !self.counting {
            let end = start + 4 + bytes.len();
            self.buf[start..start + 4].copy_from_slice(&wire_len.to_le_bytes());
            self.buf[start + 4..end].copy_from_slice(bytes);
            self.buf[end] = 0;
        }
        self.pos = start + 4 + bytes.len() + 1;
        Ok(())
    }

    /// Reserve a u32 count whose value is not known yet.
    ///
    /// Write the elements next, then call [`finish_sequence`](Self::finish_sequence).
    pub fn begin_sequence(&mut self) -> Result<SequenceMark> {
        let start = self.reserve(4, 4)?;
        if !self.counting {
            self.buf[start..start + 4].fill(0);
        }
        self.pos = start + 4;
        Ok(SequenceMark { offset: start })
    }

    /// Patch the element count into a placeholder from `begin_sequence`.
    pub fn finish_sequence(&mut self, mark: SequenceMark, count: usize) -> Result<()> {
        let count = u32::try_from(count).map_err(|_| Error::InvalidData {
            reason: "element count exceeds u32::MAX",
        })?;
        if self.counting {
            return Ok(());
        }
        let end = mark
            .offset
            .checked_add(4)
            .filter(|end| *end <= self.pos)
            .ok_or(Error::InvalidData {
                reason: "sequence mark does not belong to this writer",
            })?;
        self.buf[mark.offset..end].copy_from_slice(&count.to_le_bytes());
        Ok(())
    }

    /// Consume the writer and return the number of bytes written.
    pub fn finish(self) -> usize {
        self.pos
    }
}
