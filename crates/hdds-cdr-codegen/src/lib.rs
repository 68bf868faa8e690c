// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # hdds-cdr-codegen
//!
//! The `schema!` proc-macro behind `hdds_cdr::schema!`. Parsing lives here;
//! validation and code generation are shared with `hdds-cdr-gen` through
//! `hdds-cdr-schema`.

extern crate proc_macro;

mod parse;

use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Declare message, alias and service types in one table.
///
/// For each `message` the macro generates a `pub struct` with public fields
/// plus `Default`, `Debug`, `PartialEq`, `CdrEncode`, `CdrDecode`,
/// `Describe`, `NamedType` and the `Serdes` dispatch marker. A type that
/// transitively holds a `string` or a `sequence<T>` gets a `'a` lifetime.
///
/// An `alias` becomes a `#[repr(transparent)]` newtype. A `service` becomes
/// `NameRequest`, `NameReply` and a `Name` marker implementing `ServiceType`.
///
/// Field types: base types (`bool char int8 uint8 int16 uint16 int32 uint32
/// int64 uint64 float32 float64 string`, or their Rust spellings), types of
/// the same table (in any order), `[T; N]` and `sequence<T>`.
///
/// Example:
/// ```ignore
/// hdds_cdr::schema! {
///     message Time = ("builtin_interfaces::msg::dds_::Time_", "RIHS01_b106") {
///         sec: int32,
///         nanosec: uint32,
///     }
///
///     alias Label = ("demo::msg::dds_::Label_", "RIHS01_00") string;
///
///     service AddTwoInts = ("example_interfaces::srv::dds_::AddTwoInts_", "RIHS01_e118") {
///         request { a: int64, b: int64 }
///         reply { sum: int64 }
///     }
/// }
/// ```
///
/// Schema errors (unknown or duplicate types, cycles, zero-length arrays,
/// services used as field types, empty type names) are reported as compile
/// errors at the offending declaration.
#[proc_macro]
pub fn schema(input: TokenStream) -> TokenStream {
    let table = parse_macro_input!(input as parse::SchemaTable);
    table.expand().into()
}
