//! CSV line encoding.
//!
//! Encoding is a pure function of the cells and the [`CsvOptions`]. Writing
//! the encoded line, and its terminator, is done by [`CsvWriter`].
//!
//! Non-null text is always quoted, whether or not it contains anything
//! special. NULL is written as the configured representation and quoted only
//! when `quote_null` is set.

use crate::adapters::{CsvOptions, EscapeMode};
use crate::error::PqCsvError;
use crate::models::Cell;
use std::borrow::Cow;
use std::io::Write;

/// Escapes a value according to the configured mode.
///
/// Works on raw bytes: only the ASCII `"` and `\` are ever rewritten, so
/// multi-byte UTF-8 sequences and invalid bytes pass through untouched.
/// Returns the input unchanged when escaping is disabled.
pub fn escape_value<'a>(value: &'a [u8], options: &CsvOptions) -> Cow<'a, [u8]> {
    if !options.escape {
        return Cow::Borrowed(value);
    }
    let mode = options.escape_mode;
    let needs_escape = match mode {
        EscapeMode::Cascade => value.contains(&b'"'),
        EscapeMode::Backslash => value.iter().any(|b| matches!(b, b'"' | b'\\')),
    };
    if !needs_escape {
        return Cow::Borrowed(value);
    }

    let mut escaped = Vec::with_capacity(value.len().saturating_add(8));
    for &byte in value {
        match (mode, byte) {
            (EscapeMode::Cascade, b'"') => escaped.extend_from_slice(b"\"\""),
            (EscapeMode::Backslash, b'\\') => escaped.extend_from_slice(b"\\\\"),
            (EscapeMode::Backslash, b'"') => escaped.extend_from_slice(b"\\\""),
            _ => escaped.push(byte),
        }
    }
    Cow::Owned(escaped)
}

/// Encodes one cell into a CSV field.
pub fn encode_cell(cell: &Cell, options: &CsvOptions) -> Vec<u8> {
    match cell.as_bytes() {
        Some(value) => quoted(&escape_value(value, options), options),
        None if options.quote_null => quoted(options.null_as.as_bytes(), options),
        None => options.null_as.as_bytes().to_vec(),
    }
}

fn quoted(value: &[u8], options: &CsvOptions) -> Vec<u8> {
    let quote = options.quote.as_bytes();
    let mut field =
        Vec::with_capacity(value.len().saturating_add(quote.len().saturating_mul(2)));
    field.extend_from_slice(quote);
    field.extend_from_slice(value);
    field.extend_from_slice(quote);
    field
}

/// Encodes a full row, without a line terminator.
///
/// # Example
/// ```rust
/// use pqcsv_core::adapters::CsvOptions;
/// use pqcsv_core::csv::encode_row;
/// use pqcsv_core::models::Cell;
///
/// let options = CsvOptions::default().with_null_as("", false);
/// let row = [Cell::text("3"), Cell::Null, Cell::text("true")];
/// assert_eq!(encode_row(&row, &options), br#""3",,"true""#);
/// ```
pub fn encode_row(cells: &[Cell], options: &CsvOptions) -> Vec<u8> {
    let mut line = Vec::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line.extend_from_slice(options.separator.as_bytes());
        }
        line.extend_from_slice(&encode_cell(cell, options));
    }
    line
}

/// Writes encoded rows to an output stream, one line per row.
///
/// Each call to [`CsvWriter::write_row`] hands its line to the underlying
/// writer before returning, so rows already written stay written if a
/// later row fails.
pub struct CsvWriter<W: Write> {
    inner: W,
    options: CsvOptions,
    rows_written: u64,
}

impl<W: Write> CsvWriter<W> {
    /// Wraps `inner` with the given options.
    pub const fn new(inner: W, options: CsvOptions) -> Self {
        Self {
            inner,
            options,
            rows_written: 0,
        }
    }

    /// Encodes `cells` and writes them followed by a newline.
    pub fn write_row(&mut self, cells: &[Cell]) -> crate::Result<()> {
        let mut line = encode_row(cells, &self.options);
        line.push(b'\n');
        self.inner
            .write_all(&line)
            .map_err(|e| PqCsvError::io("Failed to write CSV row", e))?;
        self.rows_written = self.rows_written.saturating_add(1);
        Ok(())
    }

    /// Number of rows written so far.
    pub const fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> crate::Result<()> {
        self.inner
            .flush()
            .map_err(|e| PqCsvError::io("Failed to flush CSV output", e))
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> crate::Result<W> {
        self.flush()?;
        Ok(self.inner)
    }
}
