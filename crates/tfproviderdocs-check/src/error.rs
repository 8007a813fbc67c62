//! Error types for check runs.
//!
//! Reconciliation problems are never errors; they are `Finding`s. Errors are
//! reserved for conditions that abort a run before it produces a result.

/// Invalid option combinations, detected before any directory is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("--require-schema-ordering requires --enable-contents-check")]
    OrderingWithoutContents,

    #[error(
        "unknown provider name for enabling Terraform Provider schema checks; check that the current working directory or provided path is prefixed with terraform-provider-*, or set --provider-name"
    )]
    UnknownProviderName,
}

/// Failures listing or reading documentation.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("error listing documentation directory ({path}): {message}")]
    List { path: String, message: String },

    #[error("error reading documentation file ({path}): {message}")]
    Read { path: String, message: String },

    #[error("error walking documentation tree ({path}): {message}")]
    Walk { path: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),
}
