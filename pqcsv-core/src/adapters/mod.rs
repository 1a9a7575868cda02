//! Database access and run configuration.
//!
//! `config` holds the immutable settings of a run; `postgres` opens the
//! connection and streams the result set through the CSV pipeline.

pub mod config;

#[cfg(feature = "postgresql")]
pub mod postgres;

pub use config::{
    ConnectionConfig, CsvOptions, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER,
    EscapeMode, ExportConfig,
};
