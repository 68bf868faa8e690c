// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema table model: what a `schema!` block or a schema file declares.

use std::fmt;

use crate::error::SchemaError;

/// Built-in element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Bool,
    Char,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    String,
}

impl BaseType {
    /// Resolve a base type spelling.
    ///
    /// Accepts the schema names (`uint8`, `float64`, ...), the Rust names
    /// (`u8`, `f64`, ...) and the C names used by ROS message headers
    /// (`uint8_t`, `double`, `rstring`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let base = match name {
            "bool" | "boolean" => BaseType::Bool,
            "char" => BaseType::Char,
            "int8" | "i8" | "int8_t" => BaseType::Int8,
            "uint8" | "u8" | "uint8_t" | "byte" | "octet" => BaseType::Uint8,
            "int16" | "i16" | "int16_t" => BaseType::Int16,
            "uint16" | "u16" | "uint16_t" => BaseType::Uint16,
            "int32" | "i32" | "int32_t" => BaseType::Int32,
            "uint32" | "u32" | "uint32_t" => BaseType::Uint32,
            "int64" | "i64" | "int64_t" => BaseType::Int64,
            "uint64" | "u64" | "uint64_t" => BaseType::Uint64,
            "float32" | "f32" | "float" => BaseType::Float32,
            "float64" | "f64" | "double" => BaseType::Float64,
            "string" | "str" | "rstring" => BaseType::String,
            _ => return None,
        };
        Some(base)
    }

    /// Canonical schema spelling
    pub const fn schema_name(self) -> &'static str {
        match self {
            BaseType::Bool => "bool",
            BaseType::Char => "char",
            BaseType::Int8 => "int8",
            BaseType::Uint8 => "uint8",
            BaseType::Int16 => "int16",
            BaseType::Uint16 => "uint16",
            BaseType::Int32 => "int32",
            BaseType::Uint32 => "uint32",
            BaseType::Int64 => "int64",
            BaseType::Uint64 => "uint64",
            BaseType::Float32 => "float32",
            BaseType::Float64 => "float64",
            BaseType::String => "string",
        }
    }

    /// Rust storage type, with `'a` for strings
    pub const fn rust_name(self) -> &'static str {
        match self {
            BaseType::Bool => "bool",
            BaseType::Char | BaseType::Uint8 => "u8",
            BaseType::Int8 => "i8",
            BaseType::Int16 => "i16",
            BaseType::Uint16 => "u16",
            BaseType::Int32 => "i32",
            BaseType::Uint32 => "u32",
            BaseType::Int64 => "i64",
            BaseType::Uint64 => "u64",
            BaseType::Float32 => "f32",
            BaseType::Float64 => "f64",
            BaseType::String => "&'a str",
        }
    }

    /// Name of the runtime descriptor constant (`hdds_cdr::descriptor::*`)
    pub const fn descriptor_const(self) -> &'static str {
        match self {
            BaseType::Bool => "BOOL",
            BaseType::Char => "CHAR",
            BaseType::Int8 => "INT8",
            BaseType::Uint8 => "UINT8",
            BaseType::Int16 => "INT16",
            BaseType::Uint16 => "UINT16",
            BaseType::Int32 => "INT32",
            BaseType::Uint32 => "UINT32",
            BaseType::Int64 => "INT64",
            BaseType::Uint64 => "UINT64",
            BaseType::Float32 => "FLOAT32",
            BaseType::Float64 => "FLOAT64",
            BaseType::String => "STRING",
        }
    }

    /// Encoded width in bytes, `None` for strings
    pub const fn wire_size(self) -> Option<usize> {
        match self {
            BaseType::Bool | BaseType::Char | BaseType::Int8 | BaseType::Uint8 => Some(1),
            BaseType::Int16 | BaseType::Uint16 => Some(2),
            BaseType::Int32 | BaseType::Uint32 | BaseType::Float32 => Some(4),
            BaseType::Int64 | BaseType::Uint64 | BaseType::Float64 => Some(8),
            BaseType::String => None,
        }
    }
}

/// Element type of a field: built-in or declared in the same table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Base(BaseType),
    Named(String),
}

impl TypeRef {
    /// Base type if `name` is a base spelling, declared type otherwise
    pub fn from_name(name: &str) -> Self {
        BaseType::from_name(name).map_or_else(|| TypeRef::Named(name.to_string()), TypeRef::Base)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Base(base) => f.write_str(base.schema_name()),
            TypeRef::Named(name) => f.write_str(name),
        }
    }
}

/// Field cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Scalar,
    Array(usize),
    Sequence,
}

/// Element type plus cardinality, e.g. `[float64; 9]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldType {
    pub element: TypeRef,
    pub cardinality: Cardinality,
}

impl FieldType {
    pub fn scalar(element: TypeRef) -> Self {
        Self {
            element,
            cardinality: Cardinality::Scalar,
        }
    }

    pub fn array(element: TypeRef, len: usize) -> Self {
        Self {
            element,
            cardinality: Cardinality::Array(len),
        }
    }

    pub fn sequence(element: TypeRef) -> Self {
        Self {
            element,
            cardinality: Cardinality::Sequence,
        }
    }

    /// Parse the textual field type used in schema files.
    ///
    /// Grammar: `T`, `[T; N]`, `T[N]`, `sequence<T>` or `T[]`.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let invalid = |reason| SchemaError::InvalidTypeSyntax {
            text: text.to_string(),
            reason,
        };
        let s = text.trim();
        if s.is_empty() {
            return Err(invalid("empty type"));
        }

        let sequence_body = s
            .strip_prefix("sequence")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('<'));
        if let Some(inner) = sequence_body {
            let inner = inner
                .strip_suffix('>')
                .ok_or_else(|| invalid("expected `sequence<T>`"))?;
            let elem = element_name(inner).ok_or_else(|| invalid("bad element type"))?;
            return Ok(Self::sequence(elem));
        }

        if let Some(inner) = s.strip_prefix('[') {
            let (elem, len) = inner
                .strip_suffix(']')
                .and_then(|body| body.split_once(';'))
                .ok_or_else(|| invalid("expected `[T; N]`"))?;
            let elem = element_name(elem).ok_or_else(|| invalid("bad element type"))?;
            let len = parse_len(len).ok_or_else(|| invalid("bad array length"))?;
            return Ok(Self::array(elem, len));
        }

        if let Some(head) = s.strip_suffix(']') {
            let (elem, len) = head
                .split_once('[')
                .ok_or_else(|| invalid("unbalanced `]`"))?;
            let elem = element_name(elem).ok_or_else(|| invalid("bad element type"))?;
            if len.trim().is_empty() {
                return Ok(Self::sequence(elem));
            }
            let len = parse_len(len).ok_or_else(|| invalid("bad array length"))?;
            return Ok(Self::array(elem, len));
        }

        element_name(s)
            .map(Self::scalar)
            .ok_or_else(|| invalid("bad element type"))
    }
}

fn element_name(text: &str) -> Option<TypeRef> {
    let name = text.trim();
    is_identifier(name).then(|| TypeRef::from_name(name))
}

fn parse_len(text: &str) -> Option<usize> {
    text.trim().replace('_', "").parse().ok()
}

/// Schema spelling: `uint8`, `[Point; 4]`, `sequence<string>`
impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cardinality {
            Cardinality::Scalar => write!(f, "{}", self.element),
            Cardinality::Array(len) => write!(f, "[{}; {}]", self.element, len),
            Cardinality::Sequence => write!(f, "sequence<{}>", self.element),
        }
    }
}

/// One named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
    pub docs: Vec<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            docs: Vec::new(),
        }
    }
}

/// Middleware (name, hash) pair; both strings are opaque
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub type_name: String,
    pub type_hash: String,
}

impl Identity {
    pub fn new(type_name: impl Into<String>, type_hash: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            type_hash: type_hash.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDef {
    pub name: String,
    pub identity: Identity,
    pub fields: Vec<FieldDef>,
    pub docs: Vec<String>,
}

/// Named single-value type (basic or typedef table entry)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDef {
    pub name: String,
    pub identity: Identity,
    pub target: TypeRef,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDef {
    pub name: String,
    pub identity: Identity,
    pub request: Vec<FieldDef>,
    pub reply: Vec<FieldDef>,
    pub docs: Vec<String>,
}

impl ServiceDef {
    pub fn request_name(&self) -> String {
        format!("{}Request", self.name)
    }

    pub fn reply_name(&self) -> String {
        format!("{}Reply", self.name)
    }
}

/// One table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    Message(MessageDef),
    Alias(AliasDef),
    Service(ServiceDef),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Message(m) => &m.name,
            TypeDef::Alias(a) => &a.name,
            TypeDef::Service(s) => &s.name,
        }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            TypeDef::Message(m) => &m.identity,
            TypeDef::Alias(a) => &a.identity,
            TypeDef::Service(s) => &s.identity,
        }
    }

    pub fn docs(&self) -> &[String] {
        match self {
            TypeDef::Message(m) => &m.docs,
            TypeDef::Alias(a) => &a.docs,
            TypeDef::Service(s) => &s.docs,
        }
    }
}

/// A full schema table, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub types: Vec<TypeDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, def: TypeDef) {
        self.types.push(def);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name() == name)
    }

    pub fn messages(&self) -> impl Iterator<Item = &MessageDef> {
        self.types.iter().filter_map(|t| match t {
            TypeDef::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn aliases(&self) -> impl Iterator<Item = &AliasDef> {
        self.types.iter().filter_map(|t| match t {
            TypeDef::Alias(a) => Some(a),
            _ => None,
        })
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceDef> {
        self.types.iter().filter_map(|t| match t {
            TypeDef::Service(s) => Some(s),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

const RESERVED: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "yield", "abstract", "become", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
];

/// True for a plain, non-keyword Rust identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let head_ok = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic());
    head_ok
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && name != "_"
        && !RESERVED.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_spellings() {
        assert_eq!(BaseType::from_name("uint8"), Some(BaseType::Uint8));
        assert_eq!(BaseType::from_name("u8"), Some(BaseType::Uint8));
        assert_eq!(BaseType::from_name("double"), Some(BaseType::Float64));
        assert_eq!(BaseType::from_name("rstring"), Some(BaseType::String));
        assert_eq!(BaseType::from_name("Time"), None);
        assert_eq!(BaseType::Char.rust_name(), "u8");
        assert_eq!(BaseType::Char.descriptor_const(), "CHAR");
    }

    #[test]
    fn test_parse_field_types() {
        assert_eq!(
            FieldType::parse("uint8").unwrap(),
            FieldType::scalar(TypeRef::Base(BaseType::Uint8))
        );
        assert_eq!(
            FieldType::parse("Time").unwrap(),
            FieldType::scalar(TypeRef::Named("Time".into()))
        );
        assert_eq!(
            FieldType::parse("float64[9]").unwrap(),
            FieldType::array(TypeRef::Base(BaseType::Float64), 9)
        );
        assert_eq!(
            FieldType::parse("[ float64 ; 36 ]").unwrap(),
            FieldType::array(TypeRef::Base(BaseType::Float64), 36)
        );
        assert_eq!(
            FieldType::parse("sequence<Point>").unwrap(),
            FieldType::sequence(TypeRef::Named("Point".into()))
        );
        assert_eq!(
            FieldType::parse("string[]").unwrap(),
            FieldType::sequence(TypeRef::Base(BaseType::String))
        );
        // Only `sequence<..>` is the keyword form.
        assert_eq!(
            FieldType::parse("SequenceNumber").unwrap(),
            FieldType::scalar(TypeRef::Named("SequenceNumber".into()))
        );
        assert_eq!(
            FieldType::parse("sequenced").unwrap(),
            FieldType::scalar(TypeRef::Named("sequenced".into()))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "sequence<uint8", "[uint8]", "[uint8; x]", "uint8]", "a-b", "type"] {
            assert!(
                matches!(
                    FieldType::parse(text),
                    Err(SchemaError::InvalidTypeSyntax { .. })
                ),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_is_parseable() {
        for text in ["int32", "[Point; 4]", "sequence<string>"] {
            let ty = FieldType::parse(text).unwrap();
            assert_eq!(ty.to_string(), text);
            assert_eq!(FieldType::parse(&ty.to_string()).unwrap(), ty);
        }
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("header"));
        assert!(is_identifier("_private1"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("type"));
        assert!(!is_identifier("_"));
        assert!(!is_identifier(""));
    }
}
