//! Credential handling.
//!
//! - `credentials`: user and password held in zeroizing containers
//! - `pgpass`: password lookup in the libpq credentials file
//!
//! Passwords are never logged, never included in error messages and never
//! shown by `Debug` output.

mod credentials;
pub mod pgpass;

pub use credentials::Credentials;
pub use pgpass::{PgpassEntry, resolve_password};
