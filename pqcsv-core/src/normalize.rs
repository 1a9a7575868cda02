//! Conversion of driver values into CSV cell text.
//!
//! Normalization never fails. Each [`RawValue`] arm has one fixed textual
//! form, carried as bytes:
//!
//! | value      | text                                   |
//! |------------|----------------------------------------|
//! | integer    | base 10, sign kept, no grouping        |
//! | float      | fixed point, 6 fractional digits       |
//! | boolean    | `true` / `false`                       |
//! | text       | unchanged                              |
//! | bytes      | unchanged, no charset check            |
//! | timestamp  | `YYYY-MM-DD HH:MM:SS`                  |
//! | null/other | NULL                                   |

use crate::models::{Cell, RawValue, Row};

/// `strftime` pattern for timestamps: no fraction, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalizes one column value.
///
/// # Example
/// ```rust
/// use pqcsv_core::models::{Cell, RawValue};
/// use pqcsv_core::normalize::normalize;
///
/// assert_eq!(normalize(RawValue::Float(3.0)), Cell::text("3.000000"));
/// assert_eq!(normalize(RawValue::Null), Cell::Null);
/// ```
pub fn normalize(value: RawValue) -> Cell {
    match value {
        RawValue::Integer(v) => Cell::text(v.to_string()),
        RawValue::Float(v) => Cell::text(format!("{:.6}", v)),
        RawValue::Bool(v) => Cell::text(v.to_string()),
        RawValue::Text(v) => Cell::text(v),
        RawValue::Bytes(v) => Cell::Text(v),
        RawValue::Timestamp(v) => Cell::text(v.format(TIMESTAMP_FORMAT).to_string()),
        RawValue::Null => Cell::Null,
        // Written exactly like SQL NULL; output cannot tell the two apart.
        RawValue::Other => Cell::Null,
    }
}

/// Normalizes a whole row, keeping column order.
pub fn normalize_row(values: impl IntoIterator<Item = RawValue>) -> Row {
    values.into_iter().map(normalize).collect()
}
