// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-directed dispatch.
//!
//! `Serdes` marks every type that may be handed to the top-level
//! `serialize`/`deserialize` entry points: base types, strings, sequences of
//! any dispatchable type, and every type the schema compiler generates. The
//! choice of codec is made by monomorphization, so nothing is tagged on the
//! wire and an undeclared type is a compile error.
//!
//! The trait is sealed through `__private::Sealed`, which only this crate
//! and the generated code implement.

use crate::sequence::Sequence;
use crate::wire::{CdrDecode, CdrEncode};

#[doc(hidden)]
pub mod __private {
    /// Seal for [`Serdes`](super::Serdes); implemented by generated code only.
    pub trait Sealed {}
}

/// A declared type with a top-level codec
pub trait Serdes: __private::Sealed {}

/// A service type: independent request and reply types plus one identity
///
/// Request and reply are separate compound types. Encoding one never touches
/// the other.
pub trait ServiceType: crate::identity::NamedType {
    type Request<'a>: Serdes + CdrEncode + CdrDecode<'a>;
    type Reply<'a>: Serdes + CdrEncode + CdrDecode<'a>;
}

macro_rules! impl_serdes {
    ($($type:ty),* $(,)?) => {
        $(
            impl __private::Sealed for $type {}
            impl Serdes for $type {}
        )*
    };
}

impl_serdes!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, str, &str);

impl<T: Serdes> __private::Sealed for Sequence<'_, T> {}
impl<T: Serdes> Serdes for Sequence<'_, T> {}
