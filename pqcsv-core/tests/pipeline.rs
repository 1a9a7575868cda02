//! Normalizer to writer pipeline tests without a database.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use pqcsv_core::csv::CsvWriter;
use pqcsv_core::{CsvOptions, EscapeMode, RawValue, normalize_row};

fn run_bytes(rows: Vec<Vec<RawValue>>, options: CsvOptions) -> Vec<u8> {
    let mut writer = CsvWriter::new(Vec::new(), options);
    for row in rows {
        writer.write_row(&normalize_row(row)).unwrap();
    }
    writer.into_inner().unwrap()
}

fn run(rows: Vec<Vec<RawValue>>, options: CsvOptions) -> String {
    String::from_utf8(run_bytes(rows, options)).unwrap()
}

#[test]
fn test_three_row_export() {
    let options = CsvOptions::default()
        .with_escape_mode(EscapeMode::Cascade)
        .with_null_as("", false);

    let output = run(
        vec![
            vec![RawValue::Integer(1), RawValue::Text("a".into()), RawValue::Null],
            vec![RawValue::Integer(2), RawValue::Text("b\"c".into()), RawValue::Null],
            vec![RawValue::Integer(3), RawValue::Null, RawValue::Bool(true)],
        ],
        options,
    );

    assert_eq!(output, "\"1\",\"a\",\n\"2\",\"b\"\"c\",\n\"3\",,\"true\"\n");
}

#[test]
fn test_default_options_quote_nulls() {
    let output = run(
        vec![vec![RawValue::Integer(1), RawValue::Null]],
        CsvOptions::default(),
    );
    assert_eq!(output, "\"1\",\"\"\n");
}

#[test]
fn test_mixed_types_backslash_tab_separated() {
    let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(3, 4, 5))
        .unwrap();
    let options = CsvOptions::default()
        .with_separator("\t")
        .with_escape_mode(EscapeMode::Backslash)
        .with_null_as("\\N", false);

    let output = run(
        vec![vec![
            RawValue::Float(3.0),
            RawValue::Timestamp(ts),
            RawValue::Bytes(br#"C:\tmp"#.to_vec()),
            RawValue::Other,
            RawValue::Text(r#"say "hi""#.into()),
        ]],
        options,
    );

    assert_eq!(
        output,
        "\"3.000000\"\t\"2024-01-02 03:04:05\"\t\"C:\\\\tmp\"\t\\N\t\"say \\\"hi\\\"\"\n"
    );
}

#[test]
fn test_bytes_reach_output_unchanged() {
    // 'A', 0xFF, 'B' as sent for a bytea column
    let output = run_bytes(
        vec![vec![RawValue::Bytes(vec![0x41, 0xff, 0x42])]],
        CsvOptions::default(),
    );
    assert_eq!(output, [34, 65, 255, 66, 34, 10]);
}

#[test]
fn test_no_rows_no_output() {
    assert_eq!(run(Vec::new(), CsvOptions::default()), "");
}
