// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! YAML schema files.
//!
//! ```yaml
//! messages:
//!   - name: Time
//!     type_name: builtin_interfaces::msg::dds_::Time_
//!     type_hash: RIHS01_...
//!     fields:
//!       - { name: sec, type: int32 }
//!       - { name: nanosec, type: uint32 }
//! aliases:
//!   - { name: Seconds, type_name: ..., type_hash: ..., type: int64 }
//! services:
//!   - name: AddTwoInts
//!     type_name: ...
//!     type_hash: ...
//!     request: [ { name: a, type: int64 }, { name: b, type: int64 } ]
//!     reply: [ { name: sum, type: int64 } ]
//! ```
//!
//! Entries keep their file order inside each section; messages come first,
//! then aliases, then services. References between sections are resolved
//! by validation, so order does not matter.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::model::{
    AliasDef, Cardinality, FieldDef, FieldType, Identity, MessageDef, Schema, ServiceDef, TypeDef,
};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    messages: Vec<MessageEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<AliasEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    services: Vec<ServiceEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MessageEntry {
    name: String,
    type_name: String,
    type_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasEntry {
    name: String,
    type_name: String,
    type_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
    #[serde(rename = "type")]
    target: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceEntry {
    name: String,
    type_name: String,
    type_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
    #[serde(default)]
    request: Vec<FieldEntry>,
    #[serde(default)]
    reply: Vec<FieldEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldEntry {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
}

impl Schema {
    /// Parse a YAML schema document.
    ///
    /// Only syntax is checked here; call [`Schema::compile`] to validate.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let file: SchemaFile = serde_yaml::from_str(yaml)?;
        let mut schema = Schema::new();

        for entry in file.messages {
            schema.push(TypeDef::Message(MessageDef {
                name: entry.name,
                identity: Identity::new(entry.type_name, entry.type_hash),
                fields: fields_from_entries(entry.fields)?,
                docs: doc_lines(entry.doc),
            }));
        }
        for entry in file.aliases {
            let target = FieldType::parse(&entry.target)?;
            if target.cardinality != Cardinality::Scalar {
                return Err(SchemaError::InvalidTypeSyntax {
                    text: entry.target,
                    reason: "an alias names a single value",
                });
            }
            schema.push(TypeDef::Alias(AliasDef {
                name: entry.name,
                identity: Identity::new(entry.type_name, entry.type_hash),
                target: target.element,
                docs: doc_lines(entry.doc),
            }));
        }
        for entry in file.services {
            schema.push(TypeDef::Service(ServiceDef {
                name: entry.name,
                identity: Identity::new(entry.type_name, entry.type_hash),
                request: fields_from_entries(entry.request)?,
                reply: fields_from_entries(entry.reply)?,
                docs: doc_lines(entry.doc),
            }));
        }
        Ok(schema)
    }

    /// Serialize back to the YAML schema format.
    pub fn to_yaml(&self) -> Result<String, SchemaError> {
        let mut file = SchemaFile::default();
        for def in &self.types {
            let identity = def.identity().clone();
            let doc = join_docs(def.docs());
            match def {
                TypeDef::Message(m) => file.messages.push(MessageEntry {
                    name: m.name.clone(),
                    type_name: identity.type_name,
                    type_hash: identity.type_hash,
                    doc,
                    fields: entries_from_fields(&m.fields),
                }),
                TypeDef::Alias(a) => file.aliases.push(AliasEntry {
                    name: a.name.clone(),
                    type_name: identity.type_name,
                    type_hash: identity.type_hash,
                    doc,
                    target: a.target.to_string(),
                }),
                TypeDef::Service(s) => file.services.push(ServiceEntry {
                    name: s.name.clone(),
                    type_name: identity.type_name,
                    type_hash: identity.type_hash,
                    doc,
                    request: entries_from_fields(&s.request),
                    reply: entries_from_fields(&s.reply),
                }),
            }
        }
        Ok(serde_yaml::to_string(&file)?)
    }
}

fn fields_from_entries(entries: Vec<FieldEntry>) -> Result<Vec<FieldDef>, SchemaError> {
    entries
        .into_iter()
        .map(|entry| {
            Ok(FieldDef {
                ty: FieldType::parse(&entry.ty)?,
                name: entry.name,
                docs: doc_lines(entry.doc),
            })
        })
        .collect()
}

fn entries_from_fields(fields: &[FieldDef]) -> Vec<FieldEntry> {
    fields
        .iter()
        .map(|field| FieldEntry {
            name: field.name.clone(),
            ty: field.ty.to_string(),
            doc: join_docs(&field.docs),
        })
        .collect()
}

fn doc_lines(doc: Option<String>) -> Vec<String> {
    doc.map(|text| text.trim_end().lines().map(str::to_string).collect())
        .unwrap_or_default()
}

fn join_docs(docs: &[String]) -> Option<String> {
    (!docs.is_empty()).then(|| docs.join("\n"))
}
