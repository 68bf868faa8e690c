// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # HDDS CDR - Schema-driven CDR codec
//!
//! Declare message and service types once, in a table, and get for each of
//! them a storage struct, a matched encode/decode pair, a type descriptor and
//! a middleware identity (name + hash).
//!
//! ## Design Constraints
//!
//! - **No heap allocations**: every buffer and sequence storage is owned by
//!   the caller
//! - **No runtime type tags**: the codec is picked by the value's static type
//! - **`no_std` compatible**
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------+
//! |  schema! { .. }  /  hdds-cdr-gen        |  type table -> generated impls
//! +-----------------------------------------+
//!           v
//! +-----------------------------------------+
//! |  serialize / deserialize (envelope)     |  4-byte header + dispatch
//! +-----------------------------------------+
//!           v                    ^
//! +-----------------------------------------+
//! |  CdrEncode / CdrDecode (wire rules)     |  fields, arrays, sequences
//! +-----------------------------------------+
//!           v                    ^
//! +-----------------------------------------+
//! |  CdrWriter / CdrReader (byte buffer)    |  aligned LE primitives
//! +-----------------------------------------+
//! ```
//!
//! ## Example
//!
//! ```
//! use hdds_cdr::{deserialize, schema, serialize, Sequence};
//!
//! schema! {
//!     message Blob = ("demo::msg::dds_::Blob_", "RIHS01_00") {
//!         id: uint32,
//!         payload: sequence<uint8>,
//!     }
//! }
//!
//! let data = [1u8, 2, 3];
//! let msg = Blob { id: 7, payload: Sequence::new(&data) };
//! let mut buf = [0u8; 64];
//! let len = serialize(&mut buf, &msg).unwrap();
//! assert_eq!(&buf[..len], &[0, 1, 0, 0, 7, 0, 0, 0, 3, 0, 0, 0, 1, 2, 3]);
//!
//! let mut storage = [0u8; 8];
//! let mut rx = Blob { id: 0, payload: Sequence::with_storage(&mut storage) };
//! deserialize(&buf[..len], &mut rx).unwrap();
//! assert_eq!(rx, msg);
//! ```
//!
//! ## Feature Flags
//!
//! - `log` (default) -- trace/debug records through the `log` facade
//! - `std` -- `std::error::Error` for [`Error`]

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]

// Generated code names this crate as `::hdds_cdr`, including in our own tests.
extern crate self as hdds_cdr;

/// Bounds-checked CDR writer/reader (the primitive byte buffer)
pub mod cdr;

/// Type descriptors and the `Describe` trait
pub mod descriptor;

/// Top-level dispatch marker and service trait
pub mod dispatch;

/// Envelope header and top-level serialize/deserialize
pub mod envelope;

/// Error types
pub mod error;

/// Type identity (name + hash)
pub mod identity;

/// Generic sequence container
pub mod sequence;

/// Per-type wire encoding traits
pub mod wire;

pub use crate::cdr::{CdrReader, CdrWriter, SequenceMark};
pub use crate::descriptor::{
    descriptor_of, Cardinality, Describe, FieldDescriptor, PrimitiveKind, TypeDescriptor,
    TypeKind,
};
pub use crate::dispatch::{Serdes, ServiceType};
pub use crate::envelope::{
    check_header, deserialize, encoded_size, serialize, CDR_LE_HEADER, HEADER_LEN,
};
pub use crate::error::{Error, Result};
pub use crate::identity::{identity, type_hash, type_name, NamedType, TypeIdentity};
pub use crate::sequence::Sequence;
pub use crate::wire::{CdrDecode, CdrEncode};

/// Schema table macro (see `hdds-cdr-codegen`)
pub use hdds_cdr_codegen::schema;

#[doc(hidden)]
pub use crate::dispatch::__private;

/// Version of HDDS CDR
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
