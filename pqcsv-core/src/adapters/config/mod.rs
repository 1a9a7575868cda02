//! Configuration types for an export run.
//!
//! - `ConnectionConfig`: where to connect and the TLS requirement
//! - `CsvOptions`: quoting, escaping and NULL rendering
//! - `ExportConfig`: the immutable bundle handed to the query driver
//!
//! # Security
//! `ConnectionConfig` and `CsvOptions` never hold credentials. The user and
//! password travel separately in [`crate::security::Credentials`].

mod connection;
mod csv;
mod export;

pub use connection::{
    ConnectionConfig, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER,
};
pub use csv::{CsvOptions, EscapeMode};
pub use export::ExportConfig;
