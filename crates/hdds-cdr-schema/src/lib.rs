// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # HDDS CDR Schema - type table compiler
//!
//! Build-time half of `hdds-cdr`: the schema model, its validation, and the
//! Rust code generated for every declared type. Used by the `schema!`
//! proc-macro (`hdds-cdr-codegen`) and the `hdds-cdr-gen` tool.
//!
//! ```text
//! schema! table ---+
//!                  +--> Schema --compile()--> CompiledSchema --expand()--> TokenStream
//! YAML file -------+        ^                       |
//!                           +---- Display ----------+ (table source)
//! ```
//!
//! ## Example
//!
//! ```
//! use hdds_cdr_schema::{FieldDef, FieldType, Identity, MessageDef, Schema, TypeDef};
//!
//! let mut schema = Schema::new();
//! schema.push(TypeDef::Message(MessageDef {
//!     name: "Blob".into(),
//!     identity: Identity::new("demo::msg::dds_::Blob_", "RIHS01_00"),
//!     fields: vec![
//!         FieldDef::new("id", FieldType::parse("uint32").unwrap()),
//!         FieldDef::new("payload", FieldType::parse("sequence<uint8>").unwrap()),
//!     ],
//!     docs: Vec::new(),
//! }));
//!
//! let compiled = schema.compile().unwrap();
//! assert!(compiled.borrows("Blob"));
//! assert!(compiled.expand().to_string().contains("pub struct Blob"));
//! ```

/// Schema errors
pub mod error;

/// Code generation
mod generate;

/// Schema table model
pub mod model;

/// Table-syntax rendering
mod render;

/// Validation and lifetime inference
pub mod validate;

/// YAML schema files
#[cfg(feature = "yaml")]
pub mod yaml;

pub use crate::error::SchemaError;
pub use crate::model::{
    AliasDef, BaseType, Cardinality, FieldDef, FieldType, Identity, MessageDef, Schema,
    ServiceDef, TypeDef, TypeRef,
};
pub use crate::validate::CompiledSchema;
