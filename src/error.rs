//! Error types for ferro-idres
//!
//! Resolution failures come in two flavors with very different handling:
//! a failed service call aborts the whole batch and surfaces here, while a
//! single identifier that simply finds no translation is absorbed by the
//! resolvers (it stays in the output map at its last intermediate value
//! and never joins the resolved CDS set).

use thiserror::Error;

/// Main error type for ferro-idres operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdResError {
    /// An external lookup call failed as a whole (network or service error)
    #[error("{service} call failed: {msg}")]
    TranslationFailed { service: String, msg: String },

    /// A service answered, but with a payload we cannot interpret
    #[error("malformed response from {service}: {msg}")]
    MalformedResponse { service: String, msg: String },

    /// Endpoint configuration error (bad URL, unreadable config file)
    #[error("configuration error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl IdResError {
    /// Create a `TranslationFailed` for the named service.
    pub fn translation(service: impl Into<String>, msg: impl Into<String>) -> Self {
        IdResError::TranslationFailed {
            service: service.into(),
            msg: msg.into(),
        }
    }

    /// Create a `MalformedResponse` for the named service.
    pub fn malformed(service: impl Into<String>, msg: impl Into<String>) -> Self {
        IdResError::MalformedResponse {
            service: service.into(),
            msg: msg.into(),
        }
    }
}

impl From<std::io::Error> for IdResError {
    fn from(err: std::io::Error) -> Self {
        IdResError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for IdResError {
    fn from(err: serde_json::Error) -> Self {
        IdResError::Json {
            msg: err.to_string(),
        }
    }
}
