// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Build-time schema errors.

use thiserror::Error;

/// A schema table that cannot be turned into code
///
/// Raised by `hdds_cdr::schema!` as a compile error and by `hdds-cdr-gen` as
/// a failed build step; never at runtime.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{location}: unknown type `{name}`")]
    UnknownType { location: String, name: String },

    #[error("{location}: `{name}` is a service and cannot be used as a field type")]
    ServiceAsField { location: String, name: String },

    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("{owner}: field `{field}` is declared more than once")]
    DuplicateField { owner: String, field: String },

    #[error("{location}: fixed array length must be at least 1")]
    ZeroLengthArray { location: String },

    #[error("type `{name}` contains itself ({path})")]
    RecursiveType { name: String, path: String },

    #[error("type `{name}` has an empty middleware type name")]
    EmptyIdentity { name: String },

    #[error("type name `{name}` is reserved for a base type")]
    ReservedTypeName { name: String },

    #[error("`{name}` is not a valid identifier")]
    InvalidIdentifier { name: String },

    #[error("cannot parse field type `{text}`: {reason}")]
    InvalidTypeSyntax { text: String, reason: &'static str },

    #[cfg(feature = "yaml")]
    #[error("schema file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SchemaError {
    /// Name of the declared type the error is about, if any.
    ///
    /// Front-ends use it to point the diagnostic at the right entry.
    pub fn type_name(&self) -> Option<&str> {
        let location = match self {
            SchemaError::UnknownType { location, .. }
            | SchemaError::ServiceAsField { location, .. }
            | SchemaError::ZeroLengthArray { location } => location.as_str(),
            SchemaError::DuplicateField { owner, .. } => owner.as_str(),
            SchemaError::DuplicateType { name }
            | SchemaError::RecursiveType { name, .. }
            | SchemaError::EmptyIdentity { name }
            | SchemaError::ReservedTypeName { name }
            | SchemaError::InvalidIdentifier { name } => name.as_str(),
            _ => return None,
        };
        Some(location.split('.').next().unwrap_or(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_from_location() {
        let err = SchemaError::UnknownType {
            location: "Imu.header".into(),
            name: "Header".into(),
        };
        assert_eq!(err.type_name(), Some("Imu"));
        assert_eq!(err.to_string(), "Imu.header: unknown type `Header`");

        let err = SchemaError::InvalidTypeSyntax {
            text: "sequence<".into(),
            reason: "unterminated sequence",
        };
        assert_eq!(err.type_name(), None);
    }
}
