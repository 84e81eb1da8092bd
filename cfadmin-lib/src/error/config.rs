//! Configuration error types

/// Errors raised while loading or validating an
/// [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A page size of zero was configured.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// The identifier field name is empty.
    #[error("id field must not be empty")]
    EmptyIdField,

    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
