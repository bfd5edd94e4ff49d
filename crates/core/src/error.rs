//! Error types for the core library

use thiserror::Error;

/// Errors raised by the task store gateway.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Classified errors exposed by the task lifecycle service.
///
/// The service signals the kind; the transport layer picks the HTTP
/// encoding.
#[derive(Error, Debug)]
pub enum TaskError {
    /// A business rule rejected the operation (duplicate title).
    #[error("{0}")]
    Conflict(String),

    /// No matching entity.
    #[error("{0}")]
    NotFound(String),

    /// Unclassified failure. Carries a fixed per-operation message; the
    /// underlying cause is logged, never shown to the caller.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TaskError {
    /// Wrap an unclassified failure, chaining the cause.
    pub fn internal(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        let message = message.into();
        tracing::error!("{message}: {source}");
        Self::Internal {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Wrap an unclassified failure, logging the cause without chaining it.
    pub fn internal_opaque(message: impl Into<String>, source: impl std::fmt::Display) -> Self {
        let message = message.into();
        tracing::error!("{message}: {source}");
        Self::Internal {
            message,
            source: None,
        }
    }
}
