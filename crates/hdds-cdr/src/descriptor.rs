// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: the schema of every declared type, as `const` data.
//!
//! Descriptors are read-only metadata for tooling, logging and transports
//! that want to inspect a type's shape. The encode/decode path never consults
//! them; it is fully resolved at compile time through `CdrEncode`/`CdrDecode`.

use core::fmt;

use crate::sequence::Sequence;

/// Primitive wire kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
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
}

impl PrimitiveKind {
    /// Encoded width in bytes (also the alignment)
    pub const fn size(self) -> usize {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::Char | PrimitiveKind::Int8 | PrimitiveKind::Uint8 => 1,
            PrimitiveKind::Int16 | PrimitiveKind::Uint16 => 2,
            PrimitiveKind::Int32 | PrimitiveKind::Uint32 | PrimitiveKind::Float32 => 4,
            PrimitiveKind::Int64 | PrimitiveKind::Uint64 | PrimitiveKind::Float64 => 8,
        }
    }

    /// Schema spelling of this kind
    pub const fn schema_name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Uint32 => "uint32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
        }
    }
}

/// How many values of its element type a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one value
    Scalar,
    /// Exactly N values, no count on the wire
    FixedArray(usize),
    /// Runtime count, u32 prefix on the wire
    Sequence,
}

/// One field of a compound, request or reply type
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Element type (for arrays and sequences, the type of one element)
    pub element: &'static TypeDescriptor,
    pub cardinality: Cardinality,
}

/// Shape of a declared type
#[derive(Debug, Clone, Copy)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    String,
    FixedArray {
        element: &'static TypeDescriptor,
        len: usize,
    },
    Sequence {
        element: &'static TypeDescriptor,
    },
    Compound {
        fields: &'static [FieldDescriptor],
    },
    ServiceRequest {
        service: &'static str,
        fields: &'static [FieldDescriptor],
    },
    ServiceReply {
        service: &'static str,
        fields: &'static [FieldDescriptor],
    },
}

/// Descriptor of one declared type
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    /// Name as declared in the schema
    pub name: &'static str,
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Descriptor for a primitive kind, named after its schema spelling
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            name: kind.schema_name(),
            kind: TypeKind::Primitive(kind),
        }
    }

    /// Descriptor for a compound type
    pub const fn compound(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self {
            name,
            kind: TypeKind::Compound { fields },
        }
    }

    /// Give an existing shape a new name (schema aliases)
    pub const fn alias(name: &'static str, target: &'static TypeDescriptor) -> Self {
        Self {
            name,
            kind: target.kind,
        }
    }

    /// Ordered fields, empty for non-compound kinds
    pub const fn fields(&self) -> &'static [FieldDescriptor] {
        match self.kind {
            TypeKind::Compound { fields }
            | TypeKind::ServiceRequest { fields, .. }
            | TypeKind::ServiceReply { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// True if the encoded size depends on the value (strings, sequences)
    pub fn is_variable_size(&self) -> bool {
        match self.kind {
            TypeKind::Primitive(_) => false,
            TypeKind::String | TypeKind::Sequence { .. } => true,
            TypeKind::FixedArray { element, .. } => element.is_variable_size(),
            TypeKind::Compound { fields }
            | TypeKind::ServiceRequest { fields, .. }
            | TypeKind::ServiceReply { fields, .. } => fields.iter().any(|f| {
                f.cardinality == Cardinality::Sequence || f.element.is_variable_size()
            }),
        }
    }

    /// Encoded payload size for fixed-size types, assuming the value starts
    /// at offset 0 of the payload.
    ///
    /// Returns `None` if any field is a string or sequence.
    pub fn fixed_size(&self) -> Option<usize> {
        if self.is_variable_size() {
            return None;
        }
        let mut offset = 0;
        self.layout_into(&mut offset);
        Some(offset)
    }

    fn layout_into(&self, offset: &mut usize) {
        match self.kind {
            TypeKind::Primitive(kind) => {
                let size = kind.size();
                *offset += crate::cdr::padding_for(*offset, size) + size;
            }
            TypeKind::FixedArray { element, len } => {
                for _ in 0..len {
                    element.layout_into(offset);
                }
            }
            TypeKind::Compound { fields }
            | TypeKind::ServiceRequest { fields, .. }
            | TypeKind::ServiceReply { fields, .. } => {
                for field in fields {
                    let repeat = match field.cardinality {
                        Cardinality::FixedArray(n) => n,
                        _ => 1,
                    };
                    for _ in 0..repeat {
                        field.element.layout_into(offset);
                    }
                }
            }
            // Unreachable behind `is_variable_size`.
            TypeKind::String | TypeKind::Sequence { .. } => {}
        }
    }
}

/// Schema-style rendering, e.g. `message Pose { position: Point, covariance: float64[36] }`
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (keyword, fields) = match self.kind {
            TypeKind::Compound { fields } => ("message", fields),
            TypeKind::ServiceRequest { fields, .. } => ("request", fields),
            TypeKind::ServiceReply { fields, .. } => ("reply", fields),
            TypeKind::Primitive(kind) => return f.write_str(kind.schema_name()),
            TypeKind::String => return f.write_str("string"),
            TypeKind::FixedArray { element, len } => {
                return write!(f, "{}[{}]", element.name, len)
            }
            TypeKind::Sequence { element } => return write!(f, "sequence<{}>", element.name),
        };
        write!(f, "{} {} {{", keyword, self.name)?;
        for (i, field) in fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            match field.cardinality {
                Cardinality::Scalar => write!(f, "{sep}{}: {}", field.name, field.element.name)?,
                Cardinality::FixedArray(n) => {
                    write!(f, "{sep}{}: {}[{}]", field.name, field.element.name, n)?
                }
                Cardinality::Sequence => {
                    write!(f, "{sep}{}: sequence<{}>", field.name, field.element.name)?
                }
            }
        }
        if fields.is_empty() {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}

pub const BOOL: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Bool);
pub const CHAR: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Char);
pub const INT8: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Int8);
pub const UINT8: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Uint8);
pub const INT16: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Int16);
pub const UINT16: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Uint16);
pub const INT32: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Int32);
pub const UINT32: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Uint32);
pub const INT64: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Int64);
pub const UINT64: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Uint64);
pub const FLOAT32: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Float32);
pub const FLOAT64: &TypeDescriptor = &TypeDescriptor::primitive(PrimitiveKind::Float64);
pub const STRING: &TypeDescriptor = &TypeDescriptor {
    name: "string",
    kind: TypeKind::String,
};

/// Compile-time access to a type's descriptor
pub trait Describe {
    const DESCRIPTOR: &'static TypeDescriptor;
}

macro_rules! impl_describe {
    ($($type:ty => $desc:ident),* $(,)?) => {
        $(impl Describe for $type {
            const DESCRIPTOR: &'static TypeDescriptor = $desc;
        })*
    };
}

impl_describe! {
    bool => BOOL,
    i8 => INT8,
    u8 => UINT8,
    i16 => INT16,
    u16 => UINT16,
    i32 => INT32,
    u32 => UINT32,
    i64 => INT64,
    u64 => UINT64,
    f32 => FLOAT32,
    f64 => FLOAT64,
    &str => STRING,
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    const DESCRIPTOR: &'static TypeDescriptor = &TypeDescriptor {
        name: "array",
        kind: TypeKind::FixedArray {
            element: T::DESCRIPTOR,
            len: N,
        },
    };
}

impl<T: Describe> Describe for Sequence<'_, T> {
    const DESCRIPTOR: &'static TypeDescriptor = &TypeDescriptor {
        name: "sequence",
        kind: TypeKind::Sequence {
            element: T::DESCRIPTOR,
        },
    };
}

/// Descriptor of `T`, e.g. `descriptor_of::<Sequence<u8>>()`
pub const fn descriptor_of<T: Describe + ?Sized>() -> &'static TypeDescriptor {
    T::DESCRIPTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT_FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor {
            name: "x",
            element: FLOAT64,
            cardinality: Cardinality::Scalar,
        },
        FieldDescriptor {
            name: "y",
            element: FLOAT64,
            cardinality: Cardinality::Scalar,
        },
    ];
    const POINT: &TypeDescriptor = &TypeDescriptor::compound("Point", POINT_FIELDS);

    const TAGGED_FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor {
            name: "flag",
            element: UINT8,
            cardinality: Cardinality::Scalar,
        },
        FieldDescriptor {
            name: "corners",
            element: POINT,
            cardinality: Cardinality::FixedArray(2),
        },
        FieldDescriptor {
            name: "label",
            element: STRING,
            cardinality: Cardinality::Scalar,
        },
    ];
    const TAGGED: &TypeDescriptor = &TypeDescriptor::compound("Tagged", TAGGED_FIELDS);

    #[test]
    fn test_fixed_size_respects_alignment() {
        assert_eq!(POINT.fixed_size(), Some(16));
        assert_eq!(descriptor_of::<[u16; 3]>().fixed_size(), Some(6));
        assert_eq!(UINT8.fixed_size(), Some(1));
    }

    #[test]
    fn test_variable_size_detection() {
        assert!(!POINT.is_variable_size());
        assert!(TAGGED.is_variable_size());
        assert!(descriptor_of::<Sequence<'_, u8>>().is_variable_size());
        assert_eq!(TAGGED.fixed_size(), None);
    }

    #[test]
    fn test_field_lookup() {
        let corners = TAGGED.field("corners").unwrap();
        assert_eq!(corners.cardinality, Cardinality::FixedArray(2));
        assert_eq!(corners.element.name, "Point");
        assert!(TAGGED.field("missing").is_none());
        assert!(UINT32.fields().is_empty());
    }

    #[test]
    fn test_alias_keeps_shape() {
        const SECONDS: &TypeDescriptor = &TypeDescriptor::alias("Seconds", INT64);
        assert_eq!(SECONDS.name, "Seconds");
        assert!(matches!(
            SECONDS.kind,
            TypeKind::Primitive(PrimitiveKind::Int64)
        ));
    }

    #[test]
    fn test_display_renders_schema_form() {
        assert_eq!(
            TAGGED.to_string(),
            "message Tagged { flag: uint8, corners: Point[2], label: string }"
        );
        assert_eq!(descriptor_of::<Sequence<'_, u32>>().to_string(), "sequence<uint32>");
    }
}
