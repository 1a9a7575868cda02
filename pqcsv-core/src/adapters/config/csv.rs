//! CSV output options.

use crate::error::PqCsvError;
use std::fmt;
use std::str::FromStr;

/// How quote characters inside a value are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeMode {
    /// `"` becomes `""`
    #[default]
    Cascade,
    /// `\` becomes `\\`, then `"` becomes `\"`
    Backslash,
}

impl EscapeMode {
    /// Name accepted on the command line
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cascade => "cascade",
            Self::Backslash => "backslash",
        }
    }
}

impl fmt::Display for EscapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EscapeMode {
    type Err = PqCsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cascade" => Ok(Self::Cascade),
            "backslash" => Ok(Self::Backslash),
            other => Err(PqCsvError::configuration(format!(
                "unknown escape type '{}' (expected 'cascade' or 'backslash')",
                other
            ))),
        }
    }
}

/// Quoting, escaping and NULL rendering for every row.
///
/// # Example
/// ```rust
/// use pqcsv_core::adapters::{CsvOptions, EscapeMode};
///
/// let options = CsvOptions::default()
///     .with_separator("\t")
///     .with_escape_mode(EscapeMode::Backslash)
///     .with_null_as("NULL", false);
///
/// assert_eq!(options.quote, "\"");
/// assert!(options.escape);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// String written on both sides of a quoted field
    pub quote: String,
    /// String written between fields
    pub separator: String,
    /// Whether values are escaped at all
    pub escape: bool,
    /// Escape style used when `escape` is set
    pub escape_mode: EscapeMode,
    /// Text written for NULL
    pub null_as: String,
    /// Whether the NULL text is wrapped in quotes
    pub quote_null: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            quote: "\"".to_string(),
            separator: ",".to_string(),
            escape: true,
            escape_mode: EscapeMode::Cascade,
            null_as: String::new(),
            quote_null: true,
        }
    }
}

impl CsvOptions {
    /// Builder method to set the quote string.
    #[must_use]
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }

    /// Builder method to set the separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Builder method to turn escaping on or off.
    #[must_use]
    pub const fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Builder method to set the escape style.
    #[must_use]
    pub const fn with_escape_mode(mut self, escape_mode: EscapeMode) -> Self {
        self.escape_mode = escape_mode;
        self
    }

    /// Builder method to set the NULL text and whether it is quoted.
    #[must_use]
    pub fn with_null_as(mut self, null_as: impl Into<String>, quote_null: bool) -> Self {
        self.null_as = null_as.into();
        self.quote_null = quote_null;
        self
    }
}
