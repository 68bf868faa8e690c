// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema validation and lifetime inference.
//!
//! A table is checked as a whole, so references may point forward or
//! backward. Validation never stops at the first problem; `diagnostics`
//! returns everything wrong with the table, `compile` fails on the first.

use std::collections::{HashMap, HashSet};

use crate::error::SchemaError;
use crate::model::{is_identifier, BaseType, Cardinality, FieldDef, Schema, TypeDef, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    /// Message or alias: usable as a field type
    Value,
    /// Service marker
    Service,
    /// Generated `*Request` / `*Reply` struct
    ServicePart,
}

/// A validated schema plus the inferred lifetime of every generated struct
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    schema: Schema,
    borrowed: HashSet<String>,
    sequenced: HashSet<String>,
}

impl CompiledSchema {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }

    /// True if the generated struct `name` carries a `'a` lifetime, i.e. it
    /// transitively holds a string or a sequence.
    pub fn borrows(&self, name: &str) -> bool {
        self.borrowed.contains(name)
    }

    /// True if the generated struct `name` holds no sequence and can derive
    /// `Clone` and `Copy`.
    pub fn is_copy(&self, name: &str) -> bool {
        !self.sequenced.contains(name)
    }

    /// True if a field of this type makes its owner borrow.
    pub fn field_borrows(&self, field: &FieldDef) -> bool {
        field.ty.cardinality == Cardinality::Sequence || self.element_borrows(&field.ty.element)
    }

    pub fn element_borrows(&self, element: &TypeRef) -> bool {
        match element {
            TypeRef::Base(base) => *base == BaseType::String,
            TypeRef::Named(name) => self.borrows(name),
        }
    }
}

impl Schema {
    /// Every problem in the table, in declaration order.
    pub fn diagnostics(&self) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        let index = self.index(&mut errors);

        for def in &self.types {
            match def {
                TypeDef::Message(m) => check_fields(&m.name, &m.fields, &index, &mut errors),
                TypeDef::Alias(a) => check_element(&a.name, &a.target, &index, &mut errors),
                TypeDef::Service(s) => {
                    check_fields(&s.request_name(), &s.request, &index, &mut errors);
                    check_fields(&s.reply_name(), &s.reply, &index, &mut errors);
                }
            }
        }

        self.check_cycles(&mut errors);
        errors
    }

    /// Validate the table and infer lifetimes.
    pub fn compile(self) -> Result<CompiledSchema, SchemaError> {
        if let Some(first) = self.diagnostics().into_iter().next() {
            return Err(first);
        }

        let mut borrowed = HashSet::new();
        let mut sequenced = HashSet::new();
        let mut memo = HashMap::new();
        let mut record = |name: String, shape: Shape| {
            if shape.borrows {
                borrowed.insert(name.clone());
            }
            if shape.sequence {
                sequenced.insert(name);
            }
        };
        for def in &self.types {
            match def {
                TypeDef::Message(_) | TypeDef::Alias(_) => {
                    record(def.name().to_string(), self.value_shape(def.name(), &mut memo));
                }
                TypeDef::Service(s) => {
                    record(s.request_name(), self.fields_shape(&s.request, &mut memo));
                    record(s.reply_name(), self.fields_shape(&s.reply, &mut memo));
                }
            }
        }

        log::debug!(
            "[schema] compiled {} types, {} with borrowed data",
            self.types.len(),
            borrowed.len()
        );
        Ok(CompiledSchema {
            schema: self,
            borrowed,
            sequenced,
        })
    }

    fn index(&self, errors: &mut Vec<SchemaError>) -> HashMap<String, Entry> {
        let mut index = HashMap::new();
        let mut declare = |name: String, entry: Entry, errors: &mut Vec<SchemaError>| {
            // A base spelling always resolves to the builtin, never to a declared type.
            if BaseType::from_name(&name).is_some() {
                errors.push(SchemaError::ReservedTypeName { name: name.clone() });
            }
            if index.insert(name.clone(), entry).is_some() {
                errors.push(SchemaError::DuplicateType { name });
            }
        };

        for def in &self.types {
            let name = def.name();
            if !is_identifier(name) {
                errors.push(SchemaError::InvalidIdentifier {
                    name: name.to_string(),
                });
            }
            if def.identity().type_name.trim().is_empty() {
                errors.push(SchemaError::EmptyIdentity {
                    name: name.to_string(),
                });
            }
            match def {
                TypeDef::Message(_) | TypeDef::Alias(_) => {
                    declare(name.to_string(), Entry::Value, errors)
                }
                TypeDef::Service(s) => {
                    declare(s.name.clone(), Entry::Service, errors);
                    declare(s.request_name(), Entry::ServicePart, errors);
                    declare(s.reply_name(), Entry::ServicePart, errors);
                }
            }
        }
        index
    }

    fn check_cycles(&self, errors: &mut Vec<SchemaError>) {
        let edges: HashMap<&str, Vec<&str>> = self
            .types
            .iter()
            .filter_map(|def| {
                let targets: Vec<&TypeRef> = match def {
                    TypeDef::Message(m) => m.fields.iter().map(|f| &f.ty.element).collect(),
                    TypeDef::Alias(a) => vec![&a.target],
                    TypeDef::Service(_) => return None,
                };
                let names = targets
                    .into_iter()
                    .filter_map(|t| match t {
                        TypeRef::Named(n) => Some(n.as_str()),
                        TypeRef::Base(_) => None,
                    })
                    .collect();
                Some((def.name(), names))
            })
            .collect();

        let mut done: HashSet<&str> = HashSet::new();
        for def in &self.types {
            let mut path = Vec::new();
            find_cycle(def.name(), &edges, &mut path, &mut done, errors);
        }
    }

    fn value_shape<'s>(&'s self, name: &'s str, memo: &mut HashMap<&'s str, Shape>) -> Shape {
        if let Some(&known) = memo.get(name) {
            return known;
        }
        let shape = match self.get(name) {
            Some(TypeDef::Message(m)) => self.fields_shape(&m.fields, memo),
            Some(TypeDef::Alias(a)) => self.element_shape(&a.target, memo),
            _ => Shape::default(),
        };
        memo.insert(name, shape);
        shape
    }

    fn fields_shape<'s>(
        &'s self,
        fields: &'s [FieldDef],
        memo: &mut HashMap<&'s str, Shape>,
    ) -> Shape {
        fields.iter().fold(Shape::default(), |acc, f| {
            let mut shape = self.element_shape(&f.ty.element, memo);
            if f.ty.cardinality == Cardinality::Sequence {
                shape = Shape {
                    borrows: true,
                    sequence: true,
                };
            }
            acc.merge(shape)
        })
    }

    fn element_shape<'s>(
        &'s self,
        element: &'s TypeRef,
        memo: &mut HashMap<&'s str, Shape>,
    ) -> Shape {
        match element {
            TypeRef::Base(base) => Shape {
                borrows: *base == BaseType::String,
                sequence: false,
            },
            TypeRef::Named(name) => self.value_shape(name, memo),
        }
    }
}

/// What a type transitively holds
#[derive(Debug, Clone, Copy, Default)]
struct Shape {
    /// A string or a sequence: needs `'a`
    borrows: bool,
    /// A sequence: exclusive storage, so no `Clone`/`Copy`
    sequence: bool,
}

impl Shape {
    fn merge(self, other: Shape) -> Shape {
        Shape {
            borrows: self.borrows || other.borrows,
            sequence: self.sequence || other.sequence,
        }
    }
}

fn check_fields(
    owner: &str,
    fields: &[FieldDef],
    index: &HashMap<String, Entry>,
    errors: &mut Vec<SchemaError>,
) {
    let mut seen = HashSet::new();
    for field in fields {
        let location = format!("{owner}.{}", field.name);
        if !is_identifier(&field.name) {
            errors.push(SchemaError::InvalidIdentifier {
                name: location.clone(),
            });
        }
        if !seen.insert(field.name.as_str()) {
            errors.push(SchemaError::DuplicateField {
                owner: owner.to_string(),
                field: field.name.clone(),
            });
        }
        if field.ty.cardinality == Cardinality::Array(0) {
            errors.push(SchemaError::ZeroLengthArray {
                location: location.clone(),
            });
        }
        check_element(&location, &field.ty.element, index, errors);
    }
}

fn check_element(
    location: &str,
    element: &TypeRef,
    index: &HashMap<String, Entry>,
    errors: &mut Vec<SchemaError>,
) {
    let TypeRef::Named(name) = element else {
        return;
    };
    match index.get(name) {
        Some(Entry::Value) => {}
        Some(Entry::Service | Entry::ServicePart) => errors.push(SchemaError::ServiceAsField {
            location: location.to_string(),
            name: name.clone(),
        }),
        None => errors.push(SchemaError::UnknownType {
            location: location.to_string(),
            name: name.clone(),
        }),
    }
}

/// Depth-first walk; reports each cycle once, from the first member reached.
fn find_cycle<'s>(
    name: &'s str,
    edges: &HashMap<&'s str, Vec<&'s str>>,
    path: &mut Vec<&'s str>,
    done: &mut HashSet<&'s str>,
    errors: &mut Vec<SchemaError>,
) {
    if done.contains(name) {
        return;
    }
    if let Some(start) = path.iter().position(|n| *n == name) {
        let mut cycle: Vec<&str> = path[start..].to_vec();
        cycle.push(name);
        errors.push(SchemaError::RecursiveType {
            name: name.to_string(),
            path: cycle.join(" -> "),
        });
        return;
    }
    let Some(targets) = edges.get(name) else {
        return;
    };
    path.push(name);
    for &target in targets {
        find_cycle(target, edges, path, done, errors);
    }
    path.pop();
    done.insert(name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AliasDef, FieldType, Identity, MessageDef, ServiceDef};

    fn message(name: &str, fields: &[(&str, &str)]) -> TypeDef {
        TypeDef::Message(MessageDef {
            name: name.into(),
            identity: Identity::new(format!("test::msg::dds_::{name}_"), "RIHS01_00"),
            fields: fields
                .iter()
                .map(|(n, t)| FieldDef::new(*n, FieldType::parse(t).unwrap()))
                .collect(),
            docs: Vec::new(),
        })
    }

    fn schema(types: Vec<TypeDef>) -> Schema {
        Schema { types }
    }

    #[test]
    fn test_forward_reference_and_lifetimes() {
        let compiled = schema(vec![
            message("Stamped", &[("time", "Time"), ("frame", "string")]),
            message("Time", &[("sec", "int32"), ("nanosec", "uint32")]),
            message("Cloud", &[("stamp", "Time"), ("points", "[float32; 3]")]),
            message("Batch", &[("times", "sequence<Time>")]),
        ])
        .compile()
        .unwrap();

        assert!(compiled.borrows("Stamped"));
        assert!(!compiled.borrows("Time"));
        assert!(!compiled.borrows("Cloud"));
        assert!(compiled.borrows("Batch"));
        assert!(compiled.is_copy("Stamped"));
        assert!(!compiled.is_copy("Batch"));
    }

    #[test]
    fn test_lifetime_propagates_through_alias() {
        let compiled = schema(vec![
            TypeDef::Alias(AliasDef {
                name: "Label".into(),
                identity: Identity::new("test::msg::dds_::Label_", "RIHS01_00"),
                target: TypeRef::Base(BaseType::String),
                docs: Vec::new(),
            }),
            message("Tag", &[("labels", "[Label; 2]")]),
        ])
        .compile()
        .unwrap();
        assert!(compiled.borrows("Label"));
        assert!(compiled.borrows("Tag"));
    }

    #[test]
    fn test_unknown_and_duplicate() {
        let errors = schema(vec![
            message("A", &[("x", "Missing"), ("x", "uint8")]),
            message("A", &[]),
        ])
        .diagnostics();

        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::DuplicateType { name } if name == "A")));
        assert!(errors.iter().any(
            |e| matches!(e, SchemaError::DuplicateField { owner, field } if owner == "A" && field == "x")
        ));
        assert!(errors.iter().any(
            |e| matches!(e, SchemaError::UnknownType { location, name } if location == "A.x" && name == "Missing")
        ));
    }

    #[test]
    fn test_service_not_a_field_type() {
        let errors = schema(vec![
            TypeDef::Service(ServiceDef {
                name: "Ping".into(),
                identity: Identity::new("test::srv::dds_::Ping_", "RIHS01_00"),
                request: vec![],
                reply: vec![],
                docs: Vec::new(),
            }),
            message("Wrapper", &[("inner", "Ping"), ("req", "PingRequest")]),
        ])
        .diagnostics();
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, SchemaError::ServiceAsField { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_service_parts_clash_with_messages() {
        let errors = schema(vec![
            message("PingReply", &[]),
            TypeDef::Service(ServiceDef {
                name: "Ping".into(),
                identity: Identity::new("test::srv::dds_::Ping_", "RIHS01_00"),
                request: vec![],
                reply: vec![],
                docs: Vec::new(),
            }),
        ])
        .diagnostics();
        assert!(matches!(
            errors.as_slice(),
            [SchemaError::DuplicateType { name }] if name == "PingReply"
        ));
    }

    #[test]
    fn test_zero_length_array() {
        let err = schema(vec![message("A", &[("pad", "uint8[0]")])])
            .compile()
            .unwrap_err();
        assert!(matches!(err, SchemaError::ZeroLengthArray { location } if location == "A.pad"));
    }

    #[test]
    fn test_base_spellings_are_reserved() {
        let errors = schema(vec![
            message("byte", &[("x", "uint32")]),
            message("User", &[("b", "byte")]),
            TypeDef::Alias(AliasDef {
                name: "double".into(),
                identity: Identity::new("test::msg::dds_::Double_", "RIHS01_00"),
                target: TypeRef::Base(BaseType::Float64),
                docs: Vec::new(),
            }),
            TypeDef::Service(ServiceDef {
                name: "u8".into(),
                identity: Identity::new("test::srv::dds_::U8_", "RIHS01_00"),
                request: vec![],
                reply: vec![],
                docs: Vec::new(),
            }),
        ])
        .diagnostics();

        let reserved: Vec<&str> = errors
            .iter()
            .filter_map(|e| match e {
                SchemaError::ReservedTypeName { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(reserved, ["byte", "double", "u8"]);
        assert_eq!(errors.len(), 3, "{errors:?}");

        let err = schema(vec![message("float", &[])]).compile().unwrap_err();
        assert_eq!(err.type_name(), Some("float"));
        assert_eq!(
            err.to_string(),
            "type name `float` is reserved for a base type"
        );
    }

    #[test]
    fn test_cycles_rejected() {
        let err = schema(vec![message("Node", &[("next", "Node")])])
            .compile()
            .unwrap_err();
        assert!(matches!(err, SchemaError::RecursiveType { path, .. } if path == "Node -> Node"));

        let errors = schema(vec![
            message("A", &[("b", "sequence<B>")]),
            message("B", &[("a", "[A; 2]")]),
            message("C", &[("a", "A")]),
        ])
        .diagnostics();
        assert_eq!(errors.len(), 1);
        assert!(
            matches!(&errors[0], SchemaError::RecursiveType { path, .. } if path == "A -> B -> A")
        );
    }

    #[test]
    fn test_empty_identity_and_bad_names() {
        let mut def = message("Bad", &[("type", "uint8")]);
        if let TypeDef::Message(m) = &mut def {
            m.identity.type_name.clear();
        }
        let errors = schema(vec![def]).diagnostics();
        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::EmptyIdentity { name } if name == "Bad")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, SchemaError::InvalidIdentifier { name } if name == "Bad.type")));
    }
}
