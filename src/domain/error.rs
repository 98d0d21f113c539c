//! Error types for form assembly

use thiserror::Error;

/// Errors that can occur while building or loading forms
#[derive(Debug, Error)]
pub enum FormError {
    /// A resolved field type could not produce a usable control
    #[error("Unable to create instance of field type '{type_id}': {reason}")]
    Construction { type_id: String, reason: String },

    /// The identifier does not name an instantiable field type
    #[error("Unknown field type: '{0}'")]
    UnknownFieldType(String),

    /// A definition file could not be interpreted
    #[error("Failed to load form definition from {path}: {reason}")]
    DefinitionLoad { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Raised when a configuration string cannot be converted to a property's type
#[derive(Debug, Error, PartialEq)]
pub enum CoercionError {
    #[error("expected a boolean, got '{0}'")]
    Flag(String),

    #[error("expected an integer, got '{0}'")]
    Integer(String),

    #[error("expected a finite number, got '{0}'")]
    Number(String),
}
