//! PostgreSQL query execution and CSV streaming.
//!
//! One connection, one statement, one forward-only cursor. Each row is
//! decoded, normalized, encoded and written before the next one is pulled
//! from the server, so memory use depends on row width only. When the SQL
//! text holds several statements only the first result set is written.

mod connection;
pub mod type_mapping;


pub use connection::APPLICATION_NAME;
pub use type_mapping::decode_column;

use crate::Result;
use crate::adapters::ExportConfig;
use crate::csv::CsvWriter;
use crate::error::PqCsvError;
use crate::models::Row as CsvRow;
use crate::normalize::normalize;
use futures::TryStreamExt;
use sqlx::postgres::{PgConnection, PgRow};
use sqlx::{Column, Either, Row};
use std::io::Write;

/// Runs one query over one connection and streams its rows as CSV.
pub struct PostgresExporter {
    conn: PgConnection,
}

impl PostgresExporter {
    /// Executes `sql` and writes every row of its first result set through
    /// `writer`.
    ///
    /// The output is flushed before returning, also when a row fails, so
    /// rows written before the failure are kept.
    ///
    /// # Returns
    /// The number of rows written
    ///
    /// # Errors
    /// Returns a query error if the statement fails or the cursor breaks,
    /// a scan error if a value cannot be decoded and an I/O error if the
    /// output cannot be written.
    pub async fn export<W: Write>(&mut self, sql: &str, writer: &mut CsvWriter<W>) -> Result<u64> {
        let outcome = self.stream_rows(sql, writer).await;
        let flushed = writer.flush();
        let rows = outcome?;
        flushed?;
        Ok(rows)
    }

    async fn stream_rows<W: Write>(&mut self, sql: &str, writer: &mut CsvWriter<W>) -> Result<u64> {
        tracing::debug!("Executing query ({} bytes)", sql.len());

        let mut results = sqlx::raw_sql(sql).fetch_many(&mut self.conn);
        let mut columns: Option<Vec<String>> = None;

        while let Some(result) = results
            .try_next()
            .await
            .map_err(|e| PqCsvError::query_failed("Failed to read query results", e))?
        {
            let row = match result {
                Either::Right(row) => row,
                Either::Left(done) => {
                    tracing::debug!(
                        "First statement complete ({} rows affected)",
                        done.rows_affected()
                    );
                    break;
                }
            };
            let names = columns.get_or_insert_with(|| {
                let names = column_names(&row);
                tracing::debug!("Result columns: {}", names.join(", "));
                names
            });

            if row.len() != names.len() {
                return Err(PqCsvError::query_invalid(format!(
                    "row has {} columns, expected {}",
                    row.len(),
                    names.len()
                )));
            }

            let cells = decode_row(&row, names)?;
            writer.write_row(&cells)?;
        }

        let written = writer.rows_written();
        tracing::info!("Wrote {} rows", written);
        Ok(written)
    }
}

/// Column names of a result row, in order.
pub fn column_names(row: &PgRow) -> Vec<String> {
    row.columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect()
}

/// Decodes and normalizes every column of `row`.
///
/// # Errors
/// Returns a scan error naming the first column that fails to decode.
pub fn decode_row(row: &PgRow, names: &[String]) -> Result<CsvRow> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            decode_column(row, index)
                .map(normalize)
                .map_err(|e| PqCsvError::row_scan(name.as_str(), e))
        })
        .collect()
}

/// Validates the configuration, connects, exports and closes.
///
/// # Returns
/// The number of rows written to `output`
///
/// # Example
/// ```rust,no_run
/// use pqcsv_core::adapters::{ConnectionConfig, CsvOptions, ExportConfig};
/// use pqcsv_core::adapters::postgres::run_export;
/// use pqcsv_core::security::Credentials;
///
/// # async fn example() -> pqcsv_core::Result<()> {
/// let config = ExportConfig::new(
///     ConnectionConfig::default(),
///     Credentials::new("postgres".to_string(), Some("postgres".to_string())),
///     "SELECT 1, 'a', NULL".to_string(),
///     CsvOptions::default(),
/// );
/// let rows = run_export(&config, std::io::stdout().lock()).await?;
/// assert_eq!(rows, 1);
/// # Ok(())
/// # }
/// ```
pub async fn run_export<W: Write>(config: &ExportConfig, output: W) -> Result<u64> {
    config.validate()?;

    let mut exporter = PostgresExporter::connect(&config.connection, &config.credentials).await?;
    let mut writer = CsvWriter::new(output, config.csv.clone());
    let result = exporter.export(&config.sql, &mut writer).await;
    exporter.close().await;
    result
}
