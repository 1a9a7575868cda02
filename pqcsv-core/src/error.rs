//! Error types for pqcsv with credential sanitization.
//!
//! No variant ever carries a password. Connection failures keep a fixed
//! context string and attach the driver error as the source, and the driver
//! never echoes the password back.

use thiserror::Error;

/// Main error type for pqcsv operations.
///
/// Every variant is terminal for the current invocation; nothing retries.
#[derive(Debug, Error)]
pub enum PqCsvError {
    /// Invalid or incomplete configuration, detected before connecting
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Database connection failed (credentials sanitized)
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The statement failed to execute or the cursor broke mid-stream
    #[error("Query execution failed: {context}")]
    QueryExecution {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single column value could not be decoded
    #[error("Failed to scan column '{column}'")]
    RowScan {
        column: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results with `PqCsvError`
pub type Result<T> = std::result::Result<T, PqCsvError>;

impl PqCsvError {
    /// Creates a connection error with sanitized context
    pub fn connection_failed<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: "could not open a session with the server".to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a query execution error wrapping a driver error
    pub fn query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::QueryExecution {
            context: context.into(),
            source: Some(Box::new(error)),
        }
    }

    /// Creates a query execution error with no underlying driver error
    pub fn query_invalid(context: impl Into<String>) -> Self {
        Self::QueryExecution {
            context: context.into(),
            source: None,
        }
    }

    /// Creates a scan error for one column of the current row
    pub fn row_scan<E>(column: impl Into<String>, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::RowScan {
            column: column.into(),
            source: error.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether this error was raised before any database work started.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
