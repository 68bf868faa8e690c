// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for the CDR codec.
//!
//! Every variant is `Copy` and carries only integers or `&'static str`, so
//! reporting a failure never allocates.

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = core::result::Result<T, Error>;

/// Runtime codec error
///
/// Offsets are relative to the start of the payload (the byte right after the
/// 4-byte envelope header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Destination buffer cannot hold the next field, padding or element
    #[error("encode overflow at offset {offset}: need {needed} bytes, capacity {capacity}")]
    EncodeOverflow {
        offset: usize,
        needed: usize,
        capacity: usize,
    },

    /// Input ends before the declared or derived length
    #[error("decode underflow at offset {offset}: need {needed} bytes, {remaining} remaining")]
    DecodeUnderflow {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// Envelope header missing or not the supported representation
    #[error("representation header mismatch: found {found:02x?}")]
    HeaderMismatch { found: [u8; 4] },

    /// Decoded sequence count exceeds the storage supplied by the caller
    #[error("sequence of {count} elements exceeds caller capacity {capacity}")]
    SequenceCapacity { count: usize, capacity: usize },

    /// Bytes are present but do not form a valid value
    #[error("invalid data: {reason}")]
    InvalidData { reason: &'static str },

    /// Peer advertised a different name or hash for the same type
    #[error("type identity mismatch")]
    IdentityMismatch,
}

impl Error {
    /// True for failures caused by running out of bytes or space.
    ///
    /// Transports use this to tell "buffer too small, retry with a bigger one"
    /// apart from corrupt input.
    pub const fn is_capacity(&self) -> bool {
        matches!(
            self,
            Error::EncodeOverflow { .. } | Error::SequenceCapacity { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_variants() {
        let err = Error::EncodeOverflow {
            offset: 12,
            needed: 4,
            capacity: 14,
        };
        assert_eq!(
            err.to_string(),
            "encode overflow at offset 12: need 4 bytes, capacity 14"
        );

        let err = Error::DecodeUnderflow {
            offset: 4,
            needed: 8,
            remaining: 3,
        };
        assert_eq!(
            err.to_string(),
            "decode underflow at offset 4: need 8 bytes, 3 remaining"
        );

        let err = Error::HeaderMismatch {
            found: [0x00, 0x00, 0x00, 0x00],
        };
        assert!(err.to_string().starts_with("representation header mismatch"));

        let err = Error::InvalidData {
            reason: "string is not valid UTF-8",
        };
        assert_eq!(err.to_string(), "invalid data: string is not valid UTF-8");
    }

    #[test]
    fn test_capacity_classification() {
        assert!(Error::EncodeOverflow {
            offset: 0,
            needed: 1,
            capacity: 0
        }
        .is_capacity());
        assert!(Error::SequenceCapacity {
            count: 3,
            capacity: 2
        }
        .is_capacity());
        assert!(!Error::IdentityMismatch.is_capacity());
        assert!(!Error::DecodeUnderflow {
            offset: 0,
            needed: 4,
            remaining: 0
        }
        .is_capacity());
    }
}
