//! Header-driven CSV decoding into [`RawRecord`]s.
//!
//! The first line names the columns. Blank lines are skipped, short or long
//! rows are accepted as-is, and rows the reader cannot decode are dropped
//! without failing the resource. Only an unreadable header row is an error.
//!
//! # Example CSV
//! ```text
//! ParamName,Name,Start_Date,Result_Value
//! Chlorobenzene (mg/L),Mo Ave. Well 2,10/1/2020 12:00:00 AM,0.004
//! ```

use crate::error::ResourceError;
use crate::record::{FieldValue, RawRecord};
use std::io::Read;
use std::sync::Arc;

/// Decode CSV text into records.
pub fn decode_str(csv_data: &str) -> Result<Vec<RawRecord>, ResourceError> {
    decode_reader(csv_data.as_bytes())
}

/// Decode CSV from any reader into records.
pub fn decode_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>, ResourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Arc<[String]> = rdr
        .headers()?
        .iter()
        .map(String::from)
        .collect::<Vec<_>>()
        .into();

    let mut rows = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let values = record.iter().map(FieldValue::infer).collect();
        rows.push(RawRecord::new(Arc::clone(&headers), values));
    }
    log::debug!(
        "[WQD] decode: {} rows across {} columns, skipped {} malformed",
        rows.len(),
        headers.len(),
        skipped
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_infers_field_types() {
        let csv = "\
ParamName,Name,Start_Date,Result_Value
Chlorobenzene (mg/L),Mo Ave. Well 2,10/1/2020 12:00:00 AM,0.004
Chlorobenzene (mg/L),Mo Ave. Well 3,10/2/2020 12:00:00 AM,\"1,234.5\"
";
        let rows = decode_str(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Result_Value"), &FieldValue::Number(0.004));
        assert_eq!(
            rows[1].get("Result_Value"),
            &FieldValue::Text("1,234.5".to_string())
        );
        assert_eq!(rows[1].number("Result_Value"), Some(1234.5));
        assert_eq!(rows[0].text("Name").as_deref(), Some("Mo Ave. Well 2"));
    }

    #[test]
    fn decode_skips_blank_lines_and_keeps_short_rows() {
        let csv = "\
ParamName,Name,Result_Value

X,S1,10

X,S2
";
        let rows = decode_str(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[1].get("Result_Value").is_absent());
    }

    #[test]
    fn decode_empty_field_is_absent() {
        let rows = decode_str("ParamName,Result_Value\nX,\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("Result_Value").is_absent());
    }

    #[test]
    fn decode_empty_input_is_empty() {
        assert!(decode_str("").unwrap().is_empty());
        assert!(decode_str("ParamName,Name\n").unwrap().is_empty());
    }

    #[test]
    fn decode_skips_row_with_invalid_utf8() {
        let bytes: &[u8] = b"Name,Result_Value\nWell A,1\nCaf\xe9 Well,2\nWell B,3\n";
        let rows = decode_reader(bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text("Name").as_deref(), Some("Well B"));
    }

    #[test]
    fn decode_preserves_unknown_columns() {
        let rows = decode_str("ParamName,Lab_Comment\nX,diluted\n").unwrap();
        assert_eq!(rows[0].text("Lab_Comment").as_deref(), Some("diluted"));
    }
}
