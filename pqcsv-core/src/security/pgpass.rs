//! Password lookup in the libpq-style credentials file.
//!
//! Each line holds `host:port:database:user:password`. Any of the first four
//! fields may be `*`, which matches every candidate value. The first entry
//! that matches the connection wins.
//!
//! A missing or unreadable file is never an error: it only means no
//! password override is available.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable overriding the credentials file location
pub const PGPASSFILE_ENV: &str = "PGPASSFILE";

/// Field value matching any candidate
pub const WILDCARD: &str = "*";

/// One parsed line of the credentials file.
#[derive(Clone, PartialEq, Eq)]
pub struct PgpassEntry {
    /// Host name or `*`
    pub host: String,
    /// Port number as text, or `*`
    pub port: String,
    /// Database name or `*`
    pub database: String,
    /// User name or `*`
    pub user: String,
    /// Password, cleared on drop
    pub password: Zeroizing<String>,
}

impl PgpassEntry {
    /// Checks the entry against a connection tuple.
    ///
    /// Every field must either be the wildcard or equal the candidate
    /// exactly.
    pub fn matches(&self, host: &str, port: &str, database: &str, user: &str) -> bool {
        field_matches(&self.host, host)
            && field_matches(&self.port, port)
            && field_matches(&self.database, database)
            && field_matches(&self.user, user)
    }
}

impl fmt::Debug for PgpassEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgpassEntry")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"****")
            .finish()
    }
}

fn field_matches(pattern: &str, candidate: &str) -> bool {
    pattern == WILDCARD || pattern == candidate
}

/// Resolves where the credentials file lives.
///
/// `PGPASSFILE` wins when set and non-empty. Otherwise the platform default
/// is used: `%APPDATA%\postgresql\pgpass.conf` on Windows and
/// `~/.pgpass` elsewhere. Returns `None` when no default is known.
pub fn locate_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(PGPASSFILE_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    default_path()
}

#[cfg(windows)]
fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|appdata| appdata.join("postgresql").join("pgpass.conf"))
}

#[cfg(unix)]
fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pgpass"))
}

#[cfg(not(any(unix, windows)))]
fn default_path() -> Option<PathBuf> {
    None
}

/// Parses one line into an entry.
///
/// Fields are split on `:` and trimmed. Tokens past the fifth are ignored
/// and missing trailing fields stay empty, so a malformed line just yields
/// a less specific entry.
pub fn parse_line(line: &str) -> PgpassEntry {
    let mut fields = line.split(':').map(str::trim);
    let mut next = || fields.next().unwrap_or_default().to_string();

    PgpassEntry {
        host: next(),
        port: next(),
        database: next(),
        user: next(),
        password: Zeroizing::new(next()),
    }
}

/// Parses every line of a credentials file.
///
/// Lines end at `\n` with an optional `\r` before it. Bytes that are not
/// valid UTF-8 are replaced, so one bad line never hides the entries after
/// it.
pub fn parse<R: BufRead>(reader: R) -> io::Result<Vec<PgpassEntry>> {
    reader
        .split(b'\n')
        .map(|line| {
            line.map(|mut bytes| {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                parse_line(&String::from_utf8_lossy(&bytes))
            })
        })
        .collect()
}

/// Reads all entries from the file at `path`.
///
/// The file handle is dropped before this returns, on success and on
/// failure alike.
pub fn load(path: &Path) -> io::Result<Vec<PgpassEntry>> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

/// Returns the password of the first entry in `path` matching the tuple.
pub fn lookup_password(
    path: &Path,
    host: &str,
    port: &str,
    database: &str,
    user: &str,
) -> Option<Zeroizing<String>> {
    let entries = match load(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Credentials file {} not used: {}", path.display(), e);
            return None;
        }
    };

    let found = entries
        .into_iter()
        .find(|entry| entry.matches(host, port, database, user))
        .map(|entry| entry.password.clone());

    if found.is_some() {
        tracing::debug!("Using password from credentials file {}", path.display());
    } else {
        tracing::debug!("No matching entry in credentials file {}", path.display());
    }
    found
}

/// Locates the credentials file and looks up a password in it.
pub fn resolve_password(
    host: &str,
    port: &str,
    database: &str,
    user: &str,
) -> Option<Zeroizing<String>> {
    let Some(path) = locate_path() else {
        tracing::debug!("No credentials file location known for this platform");
        return None;
    };
    lookup_password(&path, host, port, database, user)
}
