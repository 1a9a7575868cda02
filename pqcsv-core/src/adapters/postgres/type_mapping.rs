//! PostgreSQL value to [`RawValue`] conversion.
//!
//! Queries run over the simple-query protocol, so every value arrives in
//! text format. Types with a typed [`RawValue`] arm are decoded into it;
//! every other type keeps the server's textual form as bytes. Types are
//! matched by OID so that user-defined types, which carry no resolved name
//! on this protocol path, are handled like any other unknown type.

use crate::models::RawValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgRow, PgValueFormat};
use sqlx::{Row, ValueRef};

// Built-in type OIDs from pg_type.dat
const BOOL: u32 = 16;
const BYTEA: u32 = 17;
const CHAR: u32 = 18;
const NAME: u32 = 19;
const INT8: u32 = 20;
const INT2: u32 = 21;
const INT4: u32 = 23;
const TEXT: u32 = 25;
const FLOAT4: u32 = 700;
const FLOAT8: u32 = 701;
const UNKNOWN: u32 = 705;
const BPCHAR: u32 = 1042;
const VARCHAR: u32 = 1043;
const DATE: u32 = 1082;
const TIME: u32 = 1083;
const TIMESTAMP: u32 = 1114;
const TIMESTAMPTZ: u32 = 1184;
const TIMETZ: u32 = 1266;

/// Text layout of `timestamptz` values with the default `DateStyle`.
const TIMESTAMPTZ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

/// Decodes column `index` of `row`.
///
/// A typed column whose text cannot be parsed, e.g. `infinity` timestamps
/// or BC dates, keeps the server's text instead.
///
/// # Errors
/// Returns the driver error when the column cannot be read at all.
pub fn decode_column(row: &PgRow, index: usize) -> Result<RawValue, BoxDynError> {
    let value = row.try_get_raw(index)?;
    if value.is_null() {
        return Ok(RawValue::Null);
    }
    if !matches!(value.format(), PgValueFormat::Text) {
        return Ok(RawValue::Other);
    }

    let oid = value.type_info().oid().map(|oid| oid.0);
    let text = value.as_bytes()?;
    Ok(typed_or_text(decode_typed(row, index, oid, text), text))
}

fn decode_typed(
    row: &PgRow,
    index: usize,
    oid: Option<u32>,
    text: &[u8],
) -> Result<RawValue, BoxDynError> {
    let raw = match oid {
        Some(INT2) => RawValue::Integer(i64::from(row.try_get_unchecked::<i16, _>(index)?)),
        Some(INT4) => RawValue::Integer(i64::from(row.try_get_unchecked::<i32, _>(index)?)),
        Some(INT8) => RawValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
        Some(FLOAT4) => RawValue::Float(f64::from(row.try_get_unchecked::<f32, _>(index)?)),
        Some(FLOAT8) => RawValue::Float(row.try_get_unchecked::<f64, _>(index)?),
        Some(BOOL) => RawValue::Bool(row.try_get_unchecked::<bool, _>(index)?),
        Some(TEXT | VARCHAR | BPCHAR | NAME | CHAR | UNKNOWN) => {
            RawValue::Text(row.try_get_unchecked::<String, _>(index)?)
        }
        Some(BYTEA) => RawValue::Bytes(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        Some(TIMESTAMP) => {
            RawValue::Timestamp(row.try_get_unchecked::<NaiveDateTime, _>(index)?)
        }
        Some(TIMESTAMPTZ) => RawValue::Timestamp(parse_timestamptz(std::str::from_utf8(text)?)?),
        Some(DATE) => RawValue::Timestamp(
            row.try_get_unchecked::<NaiveDate, _>(index)?
                .and_time(NaiveTime::MIN),
        ),
        Some(TIME) => RawValue::Timestamp(time_on_year_zero(
            row.try_get_unchecked::<NaiveTime, _>(index)?,
        )?),
        Some(TIMETZ) => RawValue::Timestamp(time_on_year_zero(parse_timetz(
            std::str::from_utf8(text)?,
        )?)?),
        _ => RawValue::Bytes(text.to_vec()),
    };
    Ok(raw)
}

/// Keeps the typed value, or the server's text when typed decoding failed.
fn typed_or_text(typed: Result<RawValue, BoxDynError>, text: &[u8]) -> RawValue {
    typed.unwrap_or_else(|e| {
        tracing::debug!("Keeping server text for value that did not decode: {}", e);
        RawValue::Bytes(text.to_vec())
    })
}

/// Parses `timestamptz` text, keeping the wall-clock time the server sent.
fn parse_timestamptz(text: &str) -> Result<NaiveDateTime, BoxDynError> {
    let parsed = DateTime::parse_from_str(text, TIMESTAMPTZ_FORMAT)
        .map_err(|e| format!("invalid timestamptz '{}': {}", text, e))?;
    Ok(parsed.naive_local())
}

/// Parses `timetz` text, keeping the time of day and dropping the offset.
fn parse_timetz(text: &str) -> Result<NaiveTime, BoxDynError> {
    let time = text
        .split(|c: char| c == '+' || c == '-')
        .next()
        .unwrap_or(text);
    NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
        .map_err(|e| format!("invalid timetz '{}': {}", text, e).into())
}

/// Places a time of day on 0000-01-01, the zero date of a bare time.
fn time_on_year_zero(time: NaiveTime) -> Result<NaiveDateTime, BoxDynError> {
    NaiveDate::from_ymd_opt(0, 1, 1)
        .map(|date| date.and_time(time))
        .ok_or_else(|| "year zero is out of range".into())
}
