// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema file tooling for `hdds-cdr`.
//!
//! Loads YAML schema files, validates them and renders either a
//! `hdds_cdr::schema!` table or the fully expanded Rust items.
//!
//! # build.rs usage
//!
//! ```ignore
//! let code = hdds_cdr_gen::generate_file("schema/sensors.yaml".as_ref(), hdds_cdr_gen::Mode::Expanded)?;
//! let out = std::path::Path::new(&std::env::var("OUT_DIR")?).join("sensors.rs");
//! std::fs::write(out, code)?;
//! // then in the crate: include!(concat!(env!("OUT_DIR"), "/sensors.rs"));
//! ```

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context};
use hdds_cdr_schema::{CompiledSchema, FieldDef, Schema, SchemaError, TypeDef};

/// Output flavour of [`generate_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// `hdds_cdr::schema! { .. }` invocation (needs the proc-macro at build time)
    #[default]
    Table,
    /// Generated structs and trait impls, ready for `include!`
    Expanded,
}

/// Read and parse a YAML schema file (syntax only).
pub fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let yaml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    let schema = Schema::from_yaml(&yaml)
        .with_context(|| format!("failed to parse schema file {}", path.display()))?;
    tracing::debug!(
        "loaded {} type(s) from {}",
        schema.types.len(),
        path.display()
    );
    Ok(schema)
}

/// Every validation problem in the file; empty means the schema compiles.
pub fn check_file(path: &Path) -> anyhow::Result<Vec<SchemaError>> {
    Ok(load_schema(path)?.diagnostics())
}

/// Load, validate and compile a schema file.
///
/// Fails with every diagnostic in the message, one per line.
pub fn compile_file(path: &Path) -> anyhow::Result<CompiledSchema> {
    let schema = load_schema(path)?;
    let errors = schema.diagnostics();
    if !errors.is_empty() {
        let mut message = format!("{} is invalid:", path.display());
        for err in &errors {
            let _ = write!(message, "\n  - {err}");
        }
        bail!(message);
    }
    Ok(schema.compile()?)
}

/// Generate Rust source for the schema file at `path`.
pub fn generate_file(path: &Path, mode: Mode) -> anyhow::Result<String> {
    let compiled = compile_file(path)?;
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    tracing::info!(
        "generating {:?} output for {} type(s) from {}",
        mode,
        compiled.schema().types.len(),
        file_name
    );
    Ok(render(&compiled, mode, &file_name))
}

/// Render an already compiled schema.
pub fn render(compiled: &CompiledSchema, mode: Mode, source: &str) -> String {
    let body = match mode {
        Mode::Table => compiled.schema().to_table_source(),
        Mode::Expanded => compiled.expand().to_string(),
    };
    format!(
        "// Generated by hdds-cdr-gen from {source}. Do not edit.\n\n{}\n",
        body.trim_end()
    )
}

/// Human-readable summary: identity, lifetime and field layout per type.
pub fn describe(compiled: &CompiledSchema) -> String {
    let mut out = String::new();
    for def in &compiled.schema().types {
        let identity = def.identity();
        match def {
            TypeDef::Message(message) => {
                let _ = writeln!(
                    out,
                    "message {}{}",
                    message.name,
                    lifetime(compiled, &message.name)
                );
                write_identity(&mut out, &identity.type_name, &identity.type_hash);
                write_fields(&mut out, compiled, "fields", &message.fields);
            }
            TypeDef::Alias(alias) => {
                let _ = writeln!(
                    out,
                    "alias {}{} = {}",
                    alias.name,
                    lifetime(compiled, &alias.name),
                    alias.target
                );
                write_identity(&mut out, &identity.type_name, &identity.type_hash);
            }
            TypeDef::Service(service) => {
                let _ = writeln!(out, "service {}", service.name);
                write_identity(&mut out, &identity.type_name, &identity.type_hash);
                let request = service.request_name();
                let reply = service.reply_name();
                let request_head = format!("request {request}{}", lifetime(compiled, &request));
                let reply_head = format!("reply {reply}{}", lifetime(compiled, &reply));
                write_fields(&mut out, compiled, &request_head, &service.request);
                write_fields(&mut out, compiled, &reply_head, &service.reply);
            }
        }
        out.push('\n');
    }
    out
}

fn lifetime(compiled: &CompiledSchema, name: &str) -> &'static str {
    if compiled.borrows(name) {
        "<'a>"
    } else {
        ""
    }
}

fn write_identity(out: &mut String, type_name: &str, type_hash: &str) {
    let _ = writeln!(out, "  type_name: {type_name}");
    let _ = writeln!(out, "  type_hash: {type_hash}");
}

fn write_fields(out: &mut String, compiled: &CompiledSchema, head: &str, fields: &[FieldDef]) {
    if fields.is_empty() {
        let _ = writeln!(out, "  {head}: (empty)");
        return;
    }
    let _ = writeln!(out, "  {head}:");
    let width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for field in fields {
        let size = if compiled.field_borrows(field) {
            "variable"
        } else {
            "fixed"
        };
        let ty = field.ty.to_string();
        let _ = writeln!(out, "    {:<width$}  {:<24} {size}", field.name, ty);
    }
}
