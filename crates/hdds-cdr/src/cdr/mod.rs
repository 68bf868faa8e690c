// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounds-checked CDR byte buffer (little-endian, fixed capacity).
//!
//! `CdrWriter` and `CdrReader` are the primitive layer under the generated
//! codecs. They know nothing about schemas: they align, append and read
//! fixed-width values, strings and raw bytes.
//!
//! Alignment is relative to the start of the slice they wrap. The envelope
//! layer hands them the payload slice (after the 4-byte header), which
//! matches the CDR rule that alignment restarts after the encapsulation
//! header.
//!
//! Capacity is checked before any byte is touched, so a failing call leaves
//! everything from the failure point onward unwritten.

mod reader;
mod writer;

pub use reader::CdrReader;
pub use writer::{CdrWriter, SequenceMark};

/// Padding needed to bring `offset` up to `alignment` (a power of two).
#[inline]
pub(crate) const fn padding_for(offset: usize, alignment: usize) -> usize {
    if alignment <= 1 {
        return 0;
    }
    let mask = alignment - 1;
    ((offset + mask) & !mask) - offset
}
