//! Complete configuration for one export run.

use super::{ConnectionConfig, CsvOptions};
use crate::error::PqCsvError;
use crate::security::{Credentials, pgpass};

/// Everything needed to run one query and write its rows as CSV.
///
/// Built once before any database work and only read afterwards.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Where to connect
    pub connection: ConnectionConfig,
    /// Login user and password
    pub credentials: Credentials,
    /// The statement to execute
    pub sql: String,
    /// Output formatting
    pub csv: CsvOptions,
}

impl ExportConfig {
    /// Creates a config from its parts without validating it.
    pub const fn new(
        connection: ConnectionConfig,
        credentials: Credentials,
        sql: String,
        csv: CsvOptions,
    ) -> Self {
        Self {
            connection,
            credentials,
            sql,
            csv,
        }
    }

    /// Fills a missing password from the credentials file.
    ///
    /// The file is located through [`pgpass::locate_path`]. A password that
    /// is already set is kept, and a missing or unmatched file leaves the
    /// credentials unchanged.
    #[must_use]
    pub fn with_pgpass_fallback(mut self) -> Self {
        if self.credentials.has_password() {
            return self;
        }

        let found = pgpass::resolve_password(
            &self.connection.host,
            &self.connection.port.to_string(),
            &self.connection.database,
            self.credentials.username(),
        );

        if let Some(password) = found {
            self.credentials = self.credentials.with_password(&password);
        }
        self
    }

    /// Checks that the run can start.
    ///
    /// # Errors
    /// Returns a configuration error when the connection settings are
    /// invalid, the SQL text is blank or no password is available.
    pub fn validate(&self) -> crate::Result<()> {
        self.connection.validate()?;

        if self.sql.trim().is_empty() {
            return Err(PqCsvError::configuration(
                "SQL text is empty; pass --sql or pipe the query on stdin",
            ));
        }

        if !self.credentials.has_password() {
            return Err(PqCsvError::configuration(format!(
                "no password for user '{}'; pass --pass or add a matching pgpass entry",
                self.credentials.username()
            )));
        }

        Ok(())
    }
}
