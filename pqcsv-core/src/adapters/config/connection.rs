//! Database connection configuration.
//!
//! This module provides the `ConnectionConfig` struct describing where to
//! connect, whether TLS is mandatory and which session time zone to use.

/// Default PostgreSQL host
pub const DEFAULT_HOST: &str = "localhost";
/// Default PostgreSQL port
pub const DEFAULT_PORT: u16 = 5432;
/// Default database name
pub const DEFAULT_DATABASE: &str = "postgres";
/// Default login user
pub const DEFAULT_USER: &str = "postgres";

/// Configuration for the database connection.
///
/// # Security
/// This struct intentionally does NOT store the user or password. Those
/// live in [`crate::security::Credentials`] and are never logged.
///
/// # Example
/// ```rust
/// use pqcsv_core::adapters::ConnectionConfig;
///
/// let config = ConnectionConfig::new("db1.example.com".to_string())
///     .with_port(6432)
///     .with_database("reports".to_string())
///     .with_require_ssl(true);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.to_string(), "ConnectionConfig(db1.example.com:6432/reports, ssl=require)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Database host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Database name
    pub database: String,
    /// Require an encrypted channel; when false TLS is disabled outright
    pub require_ssl: bool,
    /// Session `TimeZone` for rendering `timestamptz` values.
    ///
    /// `None` keeps the session default, which is UTC.
    pub time_zone: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            require_ssl: false,
            time_zone: None,
        }
    }
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ConnectionConfig({}:{}/{}, ssl={})",
            self.host,
            self.port,
            self.database,
            self.ssl_mode_name()
        )
    }
}

impl ConnectionConfig {
    /// Validates connection configuration parameters.
    ///
    /// # Errors
    /// Returns error if the host or database is empty or the port is zero
    pub fn validate(&self) -> crate::Result<()> {
        if self.host.is_empty() {
            return Err(crate::error::PqCsvError::configuration(
                "host cannot be empty",
            ));
        }

        if self.port == 0 {
            return Err(crate::error::PqCsvError::configuration(
                "port must be greater than 0",
            ));
        }

        if self.database.is_empty() {
            return Err(crate::error::PqCsvError::configuration(
                "database cannot be empty",
            ));
        }

        if self.time_zone.as_deref().is_some_and(str::is_empty) {
            return Err(crate::error::PqCsvError::configuration(
                "time zone cannot be empty",
            ));
        }

        Ok(())
    }

    /// Creates a new connection config with defaults for everything but the host.
    pub fn new(host: String) -> Self {
        Self {
            host,
            ..Default::default()
        }
    }

    /// Builder method to set port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set database.
    #[must_use]
    pub fn with_database(mut self, database: String) -> Self {
        self.database = database;
        self
    }

    /// Builder method to require TLS.
    #[must_use]
    pub const fn with_require_ssl(mut self, require_ssl: bool) -> Self {
        self.require_ssl = require_ssl;
        self
    }

    /// Builder method to set the session time zone.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: Option<String>) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// The libpq `sslmode` name matching `require_ssl`.
    pub const fn ssl_mode_name(&self) -> &'static str {
        if self.require_ssl { "require" } else { "disable" }
    }
}
