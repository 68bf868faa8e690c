// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Render a schema back to `schema!` table syntax.

use std::fmt::{self, Write as _};

use crate::model::{FieldDef, Schema, TypeDef};

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_docs(f, self.docs(), "")?;
        let identity = self.identity();
        write!(
            f,
            "{} {} = ({:?}, {:?})",
            keyword(self),
            self.name(),
            identity.type_name,
            identity.type_hash
        )?;
        match self {
            TypeDef::Message(m) => {
                f.write_str(" {\n")?;
                write_fields(f, &m.fields, "    ")?;
                f.write_str("}")
            }
            TypeDef::Alias(a) => write!(f, " {};", a.target),
            TypeDef::Service(s) => {
                f.write_str(" {\n    request {\n")?;
                write_fields(f, &s.request, "        ")?;
                f.write_str("    }\n    reply {\n")?;
                write_fields(f, &s.reply, "        ")?;
                f.write_str("    }\n}")
            }
        }
    }
}

/// The entries of the table, one blank line apart
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, def) in self.types.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{def}")?;
        }
        Ok(())
    }
}

impl Schema {
    /// Full `hdds_cdr::schema! { .. }` invocation, ready to paste into a
    /// source file.
    pub fn to_table_source(&self) -> String {
        let mut out = String::from("hdds_cdr::schema! {\n");
        let body = self.to_string();
        for line in body.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "    {line}");
            }
        }
        out.push_str("}\n");
        out
    }
}

fn keyword(def: &TypeDef) -> &'static str {
    match def {
        TypeDef::Message(_) => "message",
        TypeDef::Alias(_) => "alias",
        TypeDef::Service(_) => "service",
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[FieldDef], indent: &str) -> fmt::Result {
    for field in fields {
        write_docs(f, &field.docs, indent)?;
        writeln!(f, "{indent}{}: {},", field.name, field.ty)?;
    }
    Ok(())
}

fn write_docs(f: &mut fmt::Formatter<'_>, docs: &[String], indent: &str) -> fmt::Result {
    for line in docs {
        if line.is_empty() {
            writeln!(f, "{indent}///")?;
        } else {
            writeln!(f, "{indent}/// {line}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AliasDef, FieldType, Identity, MessageDef, ServiceDef, TypeRef};

    #[test]
    fn test_render_table() {
        let mut header = FieldDef::new("stamp", FieldType::parse("Time").unwrap());
        header.docs.push("Acquisition time".into());
        let schema = Schema {
            types: vec![
                TypeDef::Message(MessageDef {
                    name: "Scan".into(),
                    identity: Identity::new("demo::msg::dds_::Scan_", "RIHS01_aa"),
                    fields: vec![
                        header,
                        FieldDef::new("ranges", FieldType::parse("sequence<float32>").unwrap()),
                    ],
                    docs: vec!["One laser sweep".into()],
                }),
                TypeDef::Alias(AliasDef {
                    name: "Time".into(),
                    identity: Identity::new("demo::msg::dds_::Time_", "RIHS01_bb"),
                    target: TypeRef::from_name("uint64"),
                    docs: Vec::new(),
                }),
                TypeDef::Service(ServiceDef {
                    name: "Trigger".into(),
                    identity: Identity::new("demo::srv::dds_::Trigger_", "RIHS01_cc"),
                    request: Vec::new(),
                    reply: vec![FieldDef::new("message", FieldType::parse("string").unwrap())],
                    docs: Vec::new(),
                }),
            ],
        };

        let expected = r#"hdds_cdr::schema! {
    /// One laser sweep
    message Scan = ("demo::msg::dds_::Scan_", "RIHS01_aa") {
        /// Acquisition time
        stamp: Time,
        ranges: sequence<float32>,
    }

    alias Time = ("demo::msg::dds_::Time_", "RIHS01_bb") uint64;

    service Trigger = ("demo::srv::dds_::Trigger_", "RIHS01_cc") {
        request {
        }
        reply {
            message: string,
        }
    }
}
"#;
        assert_eq!(schema.to_table_source(), expected);
    }
}
