// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type identity table: the (name, hash) pair each message and service type
//! advertises so two endpoints can confirm they serialize the same shape.
//!
//! Both strings are opaque. The codec stores and exposes them; it never
//! computes or parses the hash, and the encode/decode path never reads them.

use core::fmt;

use crate::error::{Error, Result};

/// Immutable (name, hash) pair of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    /// Fully qualified middleware type name, e.g. `std_msgs::msg::dds_::String_`
    pub name: &'static str,
    /// Type hash string, e.g. `RIHS01_df668c74...`
    pub hash: &'static str,
}

impl TypeIdentity {
    pub const fn new(name: &'static str, hash: &'static str) -> Self {
        Self { name, hash }
    }

    /// True if a peer advertised the same name and hash.
    pub fn matches(&self, name: &str, hash: &str) -> bool {
        self.name == name && self.hash == hash
    }

    /// Check a peer's advertised identity before exchanging data.
    ///
    /// The wire format is positional, so a schema mismatch would otherwise be
    /// decoded as valid-looking garbage.
    pub fn verify(&self, name: &str, hash: &str) -> Result<()> {
        if self.matches(name, hash) {
            Ok(())
        } else {
            #[cfg(feature = "log")]
            log::debug!(
                "[cdr] identity mismatch: local {}/{} remote {}/{}",
                self.name,
                self.hash,
                name,
                hash
            );
            Err(Error::IdentityMismatch)
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hash)
    }
}

/// A message, alias or service type with a middleware identity
///
/// Implemented by the schema compiler; read with zero runtime cost.
pub trait NamedType {
    const TYPE_NAME: &'static str;
    const TYPE_HASH: &'static str;
    const IDENTITY: TypeIdentity = TypeIdentity::new(Self::TYPE_NAME, Self::TYPE_HASH);
}

/// Identity of `T`
pub const fn identity<T: NamedType + ?Sized>() -> TypeIdentity {
    T::IDENTITY
}

/// Middleware type name of `T`
pub const fn type_name<T: NamedType + ?Sized>() -> &'static str {
    T::TYPE_NAME
}

/// Type hash string of `T`
pub const fn type_hash<T: NamedType + ?Sized>() -> &'static str {
    T::TYPE_HASH
}
