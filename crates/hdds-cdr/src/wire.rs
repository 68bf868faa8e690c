// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type wire encoding contract and the base-type implementations.
//!
//! Layout rules:
//! - primitives: little-endian, aligned to their own width
//! - strings: u32 length (including NUL) + bytes + NUL
//! - `[T; N]`: N elements back-to-back, no count
//! - `Sequence<T>`: u32 count + elements (see `sequence.rs`)
//! - compound types: fields in declaration order, no names or tags
//!
//! Generated schema types implement both traits by delegating field by field.

use crate::cdr::{CdrReader, CdrWriter};
use crate::error::Result;

/// Encode a value into a CDR payload
pub trait CdrEncode {
    /// Append this value at the writer's cursor.
    ///
    /// # Errors
    ///
    /// Returns `EncodeOverflow` if the buffer is too small, or `InvalidData`
    /// if a length does not fit its u32 prefix.
    fn encode(&self, w: &mut CdrWriter<'_>) -> Result<()>;
}

/// Decode a value in place from a CDR payload
///
/// Decoding writes into an existing value instead of returning a new one, so
/// sequences can fill storage the caller already owns. `'de` is the lifetime
/// of the input bytes; borrowed strings point into them.
pub trait CdrDecode<'de> {
    /// Smallest number of bytes one value can occupy on the wire
    ///
    /// Used to reject impossible sequence counts before decoding elements.
    /// Alignment padding is ignored, so this is a lower bound.
    const MIN_WIRE_SIZE: usize;

    /// Overwrite `self` with the value at the reader's cursor.
    ///
    /// # Errors
    ///
    /// Returns `DecodeUnderflow` if the input ends early, `SequenceCapacity`
    /// if a sequence does not fit its storage, or `InvalidData`.
    fn decode_into(&mut self, r: &mut CdrReader<'de>) -> Result<()>;
}

macro_rules! impl_primitive_codec {
    ($type:ty, $write:ident, $read:ident, $size:expr) => {
        impl CdrEncode for $type {
            #[inline]
            fn encode(&self, w: &mut CdrWriter<'_>) -> Result<()> {
                w.$write(*self)
            }
        }

        impl<'de> CdrDecode<'de> for $type {
            const MIN_WIRE_SIZE: usize = $size;

            #[inline]
            fn decode_into(&mut self, r: &mut CdrReader<'de>) -> Result<()> {
                *self = r.$read()?;
                Ok(())
            }
        }
    };
}

impl_primitive_codec!(bool, write_bool, read_bool, 1);
impl_primitive_codec!(u8, write_u8, read_u8, 1);
impl_primitive_codec!(i8, write_i8, read_i8, 1);
impl_primitive_codec!(u16, write_u16, read_u16, 2);
impl_primitive_codec!(i16, write_i16, read_i16, 2);
impl_primitive_codec!(u32, write_u32, read_u32, 4);
impl_primitive_codec!(i32, write_i32, read_i32, 4);
impl_primitive_codec!(u64, write_u64, read_u64, 8);
impl_primitive_codec!(i64, write_i64, read_i64, 8);
impl_primitive_codec!(f32, write_f32, read_f32, 4);
impl_primitive_codec!(f64, write_f64, read_f64, 8);

impl CdrEncode for str {
    fn encode(&self, w: &mut CdrWriter<'_>) -> Result<()> {
        w.write_string(self)
    }
}

impl<T: CdrEncode + ?Sized> CdrEncode for &T {
    #[inline]
    fn encode(&self, w: &mut CdrWriter<'_>) -> Result<()> {
        (**self).encode(w)
    }
}

impl<'de> CdrDecode<'de> for &'de str {
    // Length prefix alone; a zero length is the empty string.
    const MIN_WIRE_SIZE: usize = 4;

    fn decode_into(&mut self, r: &mut CdrReader<'de>) -> Result<()> {
        *self = r.read_string()?;
        Ok(())
    }
}

impl<T: CdrEncode, const N: usize> CdrEncode for [T; N] {
    fn encode(&self, w: &mut CdrWriter<'_>) -> Result<()> {
        for element in self {
            element.encode(w)?;
        }
        Ok(())
    }
}

impl<'de, T: CdrDecode<'de>, const N: usize> CdrDecode<'de> for [T; N] {
    const MIN_WIRE_SIZE: usize = N * T::MIN_WIRE_SIZE;

    fn decode_into(&mut self, r: &mut CdrReader<'de>) -> Result<()> {
        for element in self.iter_mut() {
            element.decode_into(r)?;
        }
        Ok(())
    }
}
