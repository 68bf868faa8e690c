// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Top-level entry points: envelope header + type-directed payload codec.
//!
//! Every encoded message starts with a 4-byte representation identifier.
//! This codec supports exactly one: CDR little-endian with zero options,
//! `00 01 00 00`. The payload follows immediately; its alignment restarts
//! at the first payload byte.

use crate::cdr::{CdrReader, CdrWriter};
use crate::dispatch::Serdes;
use crate::error::{Error, Result};
use crate::wire::{CdrDecode, CdrEncode};

/// Envelope header size in bytes
pub const HEADER_LEN: usize = 4;

/// Representation identifier for CDR little-endian, options 0
pub const CDR_LE_HEADER: [u8; HEADER_LEN] = [0x00, 0x01, 0x00, 0x00];

/// Encode `msg` into `buf`, header first.
///
/// Returns the total number of bytes written (header + payload).
///
/// # Errors
///
/// `EncodeOverflow` if `buf` cannot hold the header or any part of the
/// payload; bytes after the failing field are left untouched.
///
/// # Example
///
/// ```
/// use hdds_cdr::{serialize, Sequence};
///
/// let mut buf = [0u8; 32];
/// let len = serialize(&mut buf, &Sequence::new(&[1u8, 2, 3])).unwrap();
/// assert_eq!(&buf[..len], &[0, 1, 0, 0, 3, 0, 0, 0, 1, 2, 3]);
/// ```
pub fn serialize<T>(buf: &mut [u8], msg: &T) -> Result<usize>
where
    T: Serdes + CdrEncode + ?Sized,
{
    let capacity = buf.len();
    let Some((header, payload)) = buf.split_first_chunk_mut::<HEADER_LEN>() else {
        return Err(Error::EncodeOverflow {
            offset: 0,
            needed: HEADER_LEN,
            capacity,
        });
    };
    *header = CDR_LE_HEADER;

    let mut writer = CdrWriter::new(payload);
    msg.encode(&mut writer)?;
    let len = HEADER_LEN + writer.finish();

    #[cfg(feature = "log")]
    log::trace!(
        "[cdr] serialized {} bytes into {} byte buffer",
        len,
        capacity
    );
    Ok(len)
}

/// Decode `bytes` into `msg`, validating the header first.
///
/// Sequences inside `msg` must already carry enough storage; strings are
/// borrowed from `bytes`. Trailing bytes after the payload are ignored.
///
/// # Errors
///
/// - `HeaderMismatch` if `bytes` is shorter than the header or the header is
///   not `00 01 00 00` (checked before any payload byte is read)
/// - `DecodeUnderflow` if the payload is truncated
/// - `SequenceCapacity` if a sequence does not fit its storage
/// - `InvalidData` for malformed strings
pub fn deserialize<'de, T>(bytes: &'de [u8], msg: &mut T) -> Result<()>
where
    T: Serdes + CdrDecode<'de>,
{
    let payload = check_header(bytes)?;
    let mut reader = CdrReader::new(payload);
    msg.decode_into(&mut reader)?;

    #[cfg(feature = "log")]
    log::trace!(
        "[cdr] deserialized {} of {} payload bytes",
        reader.position(),
        payload.len()
    );
    Ok(())
}

/// Exact number of bytes `serialize` would write for `msg`, header included.
///
/// Use it to size a buffer up front.
pub fn encoded_size<T>(msg: &T) -> Result<usize>
where
    T: Serdes + CdrEncode + ?Sized,
{
    let mut writer = CdrWriter::counting();
    msg.encode(&mut writer)?;
    Ok(HEADER_LEN + writer.finish())
}

/// Validate the envelope header and return the payload slice.
pub fn check_header(bytes: &[u8]) -> Result<&[u8]> {
    match bytes.split_first_chunk::<HEADER_LEN>() {
        Some((header, payload)) if *header == CDR_LE_HEADER => Ok(payload),
        Some((header, _)) => {
            #[cfg(feature = "log")]
            log::debug!("[cdr] rejected representation header {:02x?}", header);
            Err(Error::HeaderMismatch { found: *header })
        }
        None => {
            let mut found = [0u8; HEADER_LEN];
            found[..bytes.len()].copy_from_slice(bytes);
            #[cfg(feature = "log")]
            log::debug!("[cdr] input of {} bytes has no header", bytes.len());
            Err(Error::HeaderMismatch { found })
        }
    }
}
