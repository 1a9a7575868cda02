//! Value types flowing from the result cursor to the CSV encoder.
//!
//! A column value is decoded into a [`RawValue`], normalized into a [`Cell`]
//! and then encoded. Cells live for one row only.

use chrono::NaiveDateTime;

/// A single column value as handed over by the database driver.
///
/// The set of variants is closed: types without a typed arm arrive as their
/// textual form in [`RawValue::Bytes`], values the driver hands over in a
/// non-text format end up as [`RawValue::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Any signed integer, widened to 64 bits
    Integer(i64),
    /// Any floating point value, widened to 64 bits
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Character data
    Text(String),
    /// Byte sequence, including the textual form of types without a typed arm
    Bytes(Vec<u8>),
    /// Date and time without offset
    Timestamp(NaiveDateTime),
    /// SQL NULL
    Null,
    /// A value the decoder has no representation for
    Other,
}

/// A normalized column value: either NULL or the bytes of its CSV text.
///
/// Text is kept as raw bytes so that byte columns reach the output exactly
/// as the server sent them, valid UTF-8 or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// SQL NULL, written as the configured NULL representation
    Null,
    /// Field content, written quoted and escaped
    Text(Vec<u8>),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<Vec<u8>>) -> Self {
        Self::Text(value.into())
    }

    /// Borrows the content of a non-null cell.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(value) => Some(value),
            Self::Null => None,
        }
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::text)
    }
}

/// One result row, positionally aligned with the query's column list.
pub type Row = Vec<Cell>;
