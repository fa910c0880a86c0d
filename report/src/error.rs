//! Reporting view errors

use prodtrack_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The underlying store query failed; passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Machine-readable code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(inner) => inner.category().as_str(),
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }

    pub fn serialization_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
