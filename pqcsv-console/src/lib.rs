//! Command line definition and configuration assembly for `pqcsv`.
//!
//! The binary in `main.rs` only wires these pieces to the process: it parses
//! [`Cli`], turns it into an [`ExportConfig`] and hands that to the exporter.

use clap::{ArgAction, Args, Parser};
use pqcsv_core::adapters::{DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER};
use pqcsv_core::{
    ConnectionConfig, Credentials, CsvOptions, EscapeMode, ExportConfig, PqCsvError, Result,
};
use std::io::Read;
use tracing::debug;

/// CLI argument structure
#[derive(Parser)]
#[command(name = "pqcsv")]
#[command(about = "Run one PostgreSQL query and print the rows as CSV")]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(long_about = "
pqcsv - stream a PostgreSQL result set to stdout as CSV

The query comes from --sql, or from stdin when stdin is not a terminal.
Every field is wrapped in the quote string; NULL is written as --nullas.
When no password is given, a matching entry in the pgpass file is used
(PGPASSFILE, or ~/.pgpass; %APPDATA%\\postgresql\\pgpass.conf on Windows).
timestamptz values are rendered in UTC unless --timezone (or PGTZ) is set.

EXAMPLES:
  pqcsv -h db1 -d sales --sql 'SELECT * FROM orders'
  echo 'SELECT now()' | pqcsv -u report -s ';' --escapetype backslash
")]
pub struct Cli {
    /// Logging verbosity
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Print help (`-h` is taken by `--host`)
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Server host name
    #[arg(short = 'h', long, env = "PGHOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port
    #[arg(short = 'p', long, env = "PGPORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Database name
    #[arg(short = 'd', long, env = "PGDATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Login user
    #[arg(short = 'u', long, env = "PGUSER", default_value = DEFAULT_USER)]
    pub user: String,

    /// Login password; falls back to the pgpass file when unset
    #[arg(short = 'w', long = "pass", env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// SQL to execute; read from stdin when omitted
    #[arg(long)]
    pub sql: Option<String>,

    /// String written around every field
    #[arg(long, default_value = "\"")]
    pub quote: String,

    /// String written between fields
    #[arg(short = 's', long, alias = "sepalate", default_value = ",")]
    pub separator: String,

    /// Escape quotes inside values
    #[arg(short = 'e', long, action = ArgAction::Set, default_value_t = true)]
    pub escape: bool,

    /// Escape style: cascade or backslash
    #[arg(long = "escapetype", value_name = "TYPE", default_value = "cascade")]
    pub escape_type: String,

    /// Text written for NULL values
    #[arg(long = "nullas", value_name = "TEXT", default_value = "")]
    pub null_as: String,

    /// Wrap the NULL text in quotes
    #[arg(long = "quotenull", action = ArgAction::Set, default_value_t = true)]
    pub quote_null: bool,

    /// Refuse to connect without TLS
    #[arg(long = "requiressl")]
    pub require_ssl: bool,

    /// Session time zone for timestamptz values (default UTC)
    #[arg(long = "timezone", value_name = "ZONE", env = "PGTZ")]
    pub time_zone: Option<String>,
}

/// Logging flags
#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all log output except errors")]
    pub quiet: bool,
}

impl Cli {
    /// Builds the validated export configuration.
    ///
    /// `stdin` is only read when `--sql` is absent or empty and
    /// `stdin_is_terminal` is false. A missing password is looked up in the
    /// pgpass file before validation.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown escape type, empty SQL
    /// or a missing password, and an I/O error when stdin cannot be read.
    pub fn into_config<R: Read>(self, stdin: R, stdin_is_terminal: bool) -> Result<ExportConfig> {
        let escape_mode: EscapeMode = self.escape_type.parse()?;
        let sql = read_sql(self.sql, stdin, stdin_is_terminal)?;

        let connection = ConnectionConfig::new(self.host)
            .with_port(self.port)
            .with_database(self.database)
            .with_require_ssl(self.require_ssl)
            .with_time_zone(self.time_zone);
        let credentials = Credentials::new(self.user, self.password);
        let csv = CsvOptions::default()
            .with_quote(self.quote)
            .with_separator(self.separator)
            .with_escape(self.escape)
            .with_escape_mode(escape_mode)
            .with_null_as(self.null_as, self.quote_null);

        let config = ExportConfig::new(connection, credentials, sql, csv).with_pgpass_fallback();
        config.validate()?;

        debug!("Export target: {}", config.connection);
        Ok(config)
    }
}

/// Picks the SQL text: `--sql` first, then piped stdin.
fn read_sql<R: Read>(sql: Option<String>, mut stdin: R, stdin_is_terminal: bool) -> Result<String> {
    if let Some(sql) = sql.filter(|s| !s.is_empty()) {
        return Ok(sql);
    }
    if stdin_is_terminal {
        return Ok(String::new());
    }

    let mut sql = String::new();
    stdin
        .read_to_string(&mut sql)
        .map_err(|e| PqCsvError::io("Failed to read SQL from stdin", e))?;
    debug!("Read {} bytes of SQL from stdin", sql.len());
    Ok(sql)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pqcsv_core::security::pgpass::PGPASSFILE_ENV;

    const PG_ENV: [&str; 7] = [
        "PGHOST",
        "PGPORT",
        "PGDATABASE",
        "PGUSER",
        "PGPASSWORD",
        "PGTZ",
        PGPASSFILE_ENV,
    ];

    /// Test helper functions
    mod helpers {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        /// Runs `f` with every libpq variable unset
        pub(super) fn with_clean_env<F: FnOnce()>(f: F) {
            temp_env::with_vars_unset(PG_ENV, f);
        }

        pub(super) fn parse(args: &[&str]) -> Cli {
            let mut argv = vec!["pqcsv"];
            argv.extend_from_slice(args);
            Cli::try_parse_from(argv).map_err(|e| e.to_string()).unwrap()
        }

        pub(super) fn pgpass_file(lines: &[&str]) -> NamedTempFile {
            let mut file = NamedTempFile::new().unwrap();
            for line in lines {
                writeln!(file, "{}", line).unwrap();
            }
            file
        }
    }

    mod parsing {
        use super::helpers::{parse, with_clean_env};
        use super::*;

        #[test]
        fn test_defaults() {
            with_clean_env(|| {
                let cli = parse(&[]);
                assert_eq!(cli.host, "localhost");
                assert_eq!(cli.port, 5432);
                assert_eq!(cli.database, "postgres");
                assert_eq!(cli.user, "postgres");
                assert!(cli.password.is_none());
                assert!(cli.sql.is_none());
                assert_eq!(cli.quote, "\"");
                assert_eq!(cli.separator, ",");
                assert!(cli.escape);
                assert_eq!(cli.escape_type, "cascade");
                assert_eq!(cli.null_as, "");
                assert!(cli.quote_null);
                assert!(!cli.require_ssl);
                assert!(cli.time_zone.is_none());
                assert_eq!(cli.global.verbose, 0);
                assert!(!cli.global.quiet);
            });
        }

        #[test]
        fn test_short_flags() {
            with_clean_env(|| {
                let cli = parse(&[
                    "-h", "db1", "-p", "6432", "-d", "sales", "-u", "report", "-w", "pw", "-s",
                    ";", "-e", "false", "-vv",
                ]);
                assert_eq!(cli.host, "db1");
                assert_eq!(cli.port, 6432);
                assert_eq!(cli.database, "sales");
                assert_eq!(cli.user, "report");
                assert_eq!(cli.password.as_deref(), Some("pw"));
                assert_eq!(cli.separator, ";");
                assert!(!cli.escape);
                assert_eq!(cli.global.verbose, 2);
            });
        }

        #[test]
        fn test_long_flags() {
            with_clean_env(|| {
                let cli = parse(&[
                    "--sql",
                    "SELECT 1",
                    "--quote",
                    "'",
                    "--escapetype",
                    "backslash",
                    "--nullas",
                    "NULL",
                    "--quotenull",
                    "false",
                    "--requiressl",
                    "-q",
                ]);
                assert_eq!(cli.sql.as_deref(), Some("SELECT 1"));
                assert_eq!(cli.quote, "'");
                assert_eq!(cli.escape_type, "backslash");
                assert_eq!(cli.null_as, "NULL");
                assert!(!cli.quote_null);
                assert!(cli.require_ssl);
                assert!(cli.global.quiet);
            });
        }

        #[test]
        fn test_separator_alias() {
            with_clean_env(|| {
                let cli = parse(&["--sepalate", "|"]);
                assert_eq!(cli.separator, "|");
            });
        }

        #[test]
        fn test_help_is_long_only() {
            with_clean_env(|| {
                let err = Cli::try_parse_from(["pqcsv", "--help"]).map(|_| ()).unwrap_err();
                assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

                // -h without a value is a missing host, not help
                let err = Cli::try_parse_from(["pqcsv", "-h"]).map(|_| ()).unwrap_err();
                assert_ne!(err.kind(), clap::error::ErrorKind::DisplayHelp);
            });
        }

        #[test]
        fn test_environment_fallbacks() {
            temp_env::with_vars(
                [
                    ("PGHOST", Some("envhost")),
                    ("PGPORT", Some("5433")),
                    ("PGDATABASE", Some("envdb")),
                    ("PGUSER", Some("envuser")),
                    ("PGPASSWORD", Some("envpass")),
                ],
                || {
                    let cli = parse(&[]);
                    assert_eq!(cli.host, "envhost");
                    assert_eq!(cli.port, 5433);
                    assert_eq!(cli.database, "envdb");
                    assert_eq!(cli.user, "envuser");
                    assert_eq!(cli.password.as_deref(), Some("envpass"));

                    // Flags win over the environment
                    let cli = parse(&["-h", "flaghost"]);
                    assert_eq!(cli.host, "flaghost");
                },
            );
        }

        #[test]
        fn test_time_zone_flag_and_env() {
            with_clean_env(|| {
                let cli = parse(&["--timezone", "Asia/Kolkata"]);
                assert_eq!(cli.time_zone.as_deref(), Some("Asia/Kolkata"));

                temp_env::with_var("PGTZ", Some("Europe/Berlin"), || {
                    assert_eq!(parse(&[]).time_zone.as_deref(), Some("Europe/Berlin"));
                    let cli = parse(&["--timezone", "UTC"]);
                    assert_eq!(cli.time_zone.as_deref(), Some("UTC"));
                });
            });
        }

        #[test]
        fn test_invalid_port_rejected() {
            with_clean_env(|| {
                assert!(Cli::try_parse_from(["pqcsv", "-p", "99999"]).is_err());
                assert!(Cli::try_parse_from(["pqcsv", "-p", "abc"]).is_err());
            });
        }
    }

    mod config_assembly {
        use super::helpers::{parse, pgpass_file, with_clean_env};
        use super::*;

        #[test]
        fn test_into_config_from_flags() {
            with_clean_env(|| {
                let cli = parse(&[
                    "-h",
                    "db1",
                    "-w",
                    "secret",
                    "--sql",
                    "SELECT 1",
                    "-s",
                    "\t",
                    "--escapetype",
                    "backslash",
                    "--nullas",
                    "\\N",
                    "--quotenull",
                    "false",
                    "--requiressl",
                ]);
                let config = cli.into_config(std::io::empty(), true).unwrap();

                assert_eq!(config.connection.host, "db1");
                assert!(config.connection.require_ssl);
                assert_eq!(config.connection.time_zone, None);
                assert_eq!(config.credentials.password(), Some("secret"));
                assert_eq!(config.sql, "SELECT 1");
                assert_eq!(config.csv.separator, "\t");
                assert_eq!(config.csv.escape_mode, EscapeMode::Backslash);
                assert_eq!(config.csv.null_as, "\\N");
                assert!(!config.csv.quote_null);
            });
        }

        #[test]
        fn test_time_zone_reaches_connection() {
            with_clean_env(|| {
                let cli = parse(&["-w", "secret", "--sql", "SELECT 1", "--timezone", "Asia/Kolkata"]);
                let config = cli.into_config(std::io::empty(), true).unwrap();
                assert_eq!(config.connection.time_zone.as_deref(), Some("Asia/Kolkata"));

                let cli = parse(&["-w", "secret", "--sql", "SELECT 1", "--timezone", ""]);
                assert!(cli.into_config(std::io::empty(), true).unwrap_err().is_configuration());
            });
        }

        #[test]
        fn test_sql_from_piped_stdin() {
            with_clean_env(|| {
                let cli = parse(&["-w", "secret"]);
                let stdin = "SELECT * FROM t\nWHERE id > 1\n".as_bytes();
                let config = cli.into_config(stdin, false).unwrap();
                assert_eq!(config.sql, "SELECT * FROM t\nWHERE id > 1\n");
            });
        }

        #[test]
        fn test_sql_flag_wins_over_stdin() {
            with_clean_env(|| {
                let cli = parse(&["-w", "secret", "--sql", "SELECT 1"]);
                let config = cli.into_config("SELECT 2".as_bytes(), false).unwrap();
                assert_eq!(config.sql, "SELECT 1");
            });
        }

        #[test]
        fn test_empty_sql_flag_reads_stdin() {
            with_clean_env(|| {
                let cli = parse(&["-w", "secret", "--sql", ""]);
                let config = cli.into_config("SELECT 2".as_bytes(), false).unwrap();
                assert_eq!(config.sql, "SELECT 2");
            });
        }

        #[test]
        fn test_terminal_stdin_without_sql_is_error() {
            with_clean_env(|| {
                let cli = parse(&["-w", "secret"]);
                let err = cli.into_config("SELECT 2".as_bytes(), true).unwrap_err();
                assert!(err.is_configuration());
            });
        }

        #[test]
        fn test_blank_stdin_is_error() {
            with_clean_env(|| {
                let cli = parse(&["-w", "secret"]);
                let err = cli.into_config(" \n\t".as_bytes(), false).unwrap_err();
                assert!(err.is_configuration());
            });
        }

        #[test]
        fn test_unknown_escape_type_is_error() {
            with_clean_env(|| {
                let cli = parse(&["-w", "secret", "--sql", "SELECT 1", "--escapetype", "double"]);
                let err = cli.into_config(std::io::empty(), true).unwrap_err();
                assert!(err.is_configuration());
                assert!(err.to_string().contains("double"));
            });
        }

        #[test]
        fn test_missing_password_is_error() {
            with_clean_env(|| {
                let empty = pgpass_file(&[]);
                temp_env::with_var(PGPASSFILE_ENV, Some(empty.path()), || {
                    let cli = parse(&["-u", "alice", "--sql", "SELECT 1"]);
                    let err = cli.into_config(std::io::empty(), true).unwrap_err();
                    assert!(err.is_configuration());
                    assert!(err.to_string().contains("alice"));
                });
            });
        }

        #[test]
        fn test_pgpass_fills_missing_password() {
            with_clean_env(|| {
                let file = pgpass_file(&[
                    "otherhost:*:*:*:wrong",
                    "db1:5432:sales:alice:from-pgpass",
                ]);
                temp_env::with_var(PGPASSFILE_ENV, Some(file.path()), || {
                    let cli = parse(&["-h", "db1", "-d", "sales", "-u", "alice", "--sql", "SELECT 1"]);
                    let config = cli.into_config(std::io::empty(), true).unwrap();
                    assert_eq!(config.credentials.password(), Some("from-pgpass"));
                });
            });
        }

        #[test]
        fn test_explicit_password_beats_pgpass() {
            with_clean_env(|| {
                let file = pgpass_file(&["*:*:*:*:from-pgpass"]);
                temp_env::with_var(PGPASSFILE_ENV, Some(file.path()), || {
                    let cli = parse(&["-w", "explicit", "--sql", "SELECT 1"]);
                    let config = cli.into_config(std::io::empty(), true).unwrap();
                    assert_eq!(config.credentials.password(), Some("explicit"));
                });
            });
        }
    }
}
