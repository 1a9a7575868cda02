//! PostgreSQL connection setup.
//!
//! # Security Features
//! - The password is taken from [`Credentials`] and never logged
//! - `sslmode` is either `require` or `disable`, never `prefer`
//! - The driver's own pgpass lookup is bypassed; host, port, database, user,
//!   password and `sslmode` always come from the resolved configuration.
//!   Settings outside that set, such as `PGOPTIONS`, `PGSSLROOTCERT` or
//!   `PGAPPNAME`, are still read from the environment by the driver, with
//!   `application_name` overridden afterwards.
//!
//! # Session time zone
//! The driver starts every session with `TimeZone` set to `UTC`, which takes
//! precedence over the server's configured zone. `timestamptz` values are
//! therefore rendered in UTC unless [`ConnectionConfig::time_zone`] names
//! another zone, which is applied right after connecting.

use super::PostgresExporter;
use crate::Result;
use crate::adapters::ConnectionConfig;
use crate::error::PqCsvError;
use crate::security::Credentials;
use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};

/// Reported to the server as `application_name`
pub const APPLICATION_NAME: &str = "pqcsv";

impl PostgresExporter {
    /// Opens a single connection to the configured server.
    ///
    /// # Errors
    /// Returns a connection error if the server is unreachable, TLS is
    /// required but unavailable, or authentication fails.
    pub async fn connect(config: &ConnectionConfig, credentials: &Credentials) -> Result<Self> {
        config.validate()?;

        tracing::info!("Connecting to {}", config);
        let options = Self::connect_options(config, credentials);
        let mut conn = PgConnection::connect_with(&options)
            .await
            .map_err(PqCsvError::connection_failed)?;
        tracing::debug!("Connection established");

        if let Some(zone) = &config.time_zone {
            Self::set_time_zone(&mut conn, zone).await?;
        }

        Ok(Self { conn })
    }

    async fn set_time_zone(conn: &mut PgConnection, zone: &str) -> Result<()> {
        tracing::debug!("Setting session time zone to {}", zone);
        sqlx::query("SELECT set_config('TimeZone', $1, false)")
            .bind(zone)
            .execute(&mut *conn)
            .await
            .map_err(|e| PqCsvError::query_failed(format!("Failed to set time zone '{}'", zone), e))?;
        Ok(())
    }

    /// Builds driver connect options from the configuration.
    pub fn connect_options(config: &ConnectionConfig, credentials: &Credentials) -> PgConnectOptions {
        let ssl_mode = if config.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        };

        let options = PgConnectOptions::new_without_pgpass()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(credentials.username())
            .ssl_mode(ssl_mode)
            .application_name(APPLICATION_NAME);

        match credentials.password() {
            Some(password) => options.password(password),
            None => options,
        }
    }

    /// Closes the connection gracefully.
    ///
    /// A failed goodbye is only logged; the export result is already final.
    pub async fn close(self) {
        if let Err(e) = self.conn.close().await {
            tracing::debug!("Error while closing connection: {}", e);
        }
    }
}
