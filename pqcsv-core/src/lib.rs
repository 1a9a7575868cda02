//! Core pipeline for pqcsv: run one SQL query and stream the rows as CSV.
//!
//! The crate is split along the data flow:
//! - `security`: credentials and the pgpass password lookup
//! - `models` and `normalize`: driver values turned into cell text
//! - `csv`: quoting, escaping and row encoding
//! - `adapters`: run configuration and the PostgreSQL query driver
//!
//! # Security Guarantees
//! - Passwords are held in zeroizing containers and never logged
//! - Error messages never include credentials
//! - Logs go to stderr so stdout only ever carries CSV

pub mod adapters;
pub mod csv;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod security;

// Re-export commonly used types
pub use adapters::{ConnectionConfig, CsvOptions, EscapeMode, ExportConfig};
pub use error::{PqCsvError, Result};
pub use logging::init_logging;
pub use models::{Cell, RawValue, Row};
pub use normalize::{normalize, normalize_row};
pub use security::Credentials;

#[cfg(feature = "postgresql")]
pub use adapters::postgres::{PostgresExporter, run_export};
