//! Domain-level error taxonomy for the hosting stack.
//!
//! Every variant is a construction-time failure: nothing here describes a
//! provisioning, build, or source-control failure, since those surface from
//! the external engine that consumes the synthesized template.

/// Hosting stack errors.
#[derive(Debug, thiserror::Error)]
pub enum HostingError {
    #[error("required field `{field}` must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid environment variable: {0}")]
    InvalidEnvironmentVariable(String),

    #[error("unexpected resource kind at {path}: expected {expected}, found {found}")]
    UnexpectedResourceKind {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("duplicate logical id in template: {0}")]
    DuplicateLogicalId(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("digest error: {0}")]
    Digest(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hosting stack operations.
pub type Result<T> = std::result::Result<T, HostingError>;
