//! Record store error types
//!
//! Every failure is fatal for the operation in progress. Nothing here is
//! retried; callers surface the error at their request boundary.

use thiserror::Error;

/// Error category for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// `prodtrack.toml` or overrides misconfigured
    ConfigError,
    /// Database cannot be opened, checked out of the pool, read or written
    StorageUnavailable,
    /// Schema creation failed or existing tables have the wrong shape
    SchemaError,
    /// An operation ran before `initialize()` completed
    NotInitialized,
}

impl ErrorCategory {
    /// Machine-readable code for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::SchemaError => "SCHEMA_ERROR",
            Self::NotInitialized => "NOT_INITIALIZED",
        }
    }
}

/// Record store error with category and context
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("schema error: {message}")]
    Schema {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("record store used before initialize()")]
    NotInitialized,
}

impl StoreError {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } => ErrorCategory::ConfigError,
            Self::Unavailable { .. } => ErrorCategory::StorageUnavailable,
            Self::Schema { .. } => ErrorCategory::SchemaError,
            Self::NotInitialized => ErrorCategory::NotInitialized,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a storage-unavailable error with source
    pub fn unavailable_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
            source: None,
        }
    }

    /// Create a schema error with source
    pub fn schema_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Schema {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for record store operations
pub type Result<T> = std::result::Result<T, StoreError>;
