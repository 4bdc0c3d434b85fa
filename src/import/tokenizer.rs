//! Splitting raw CSV text into records
//!
//! Both entry points are total: malformed quoting never fails, an
//! unterminated quote simply runs to the end of the input.

use csv::{ByteRecord, ReaderBuilder};

fn reader_for(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes())
}

fn decode(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

/// Split every record in `text`, including records with embedded newlines
/// inside quoted fields
///
/// Fields keep their surrounding whitespace. Reading stops at the first
/// record the parser cannot recover.
pub fn read_records(text: &str) -> Vec<Vec<String>> {
    let mut reader = reader_for(text);
    let mut record = ByteRecord::new();
    let mut records = Vec::new();

    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => records.push(decode(&record)),
            Ok(false) => break,
            Err(e) => {
                tracing::debug!(error = %e, "stopping at unreadable record");
                break;
            }
        }
    }

    records
}

/// Split a single line into its fields
///
/// An empty line yields one empty field.
pub fn tokenize_row(line: &str) -> Vec<String> {
    let mut reader = reader_for(line);
    let mut record = ByteRecord::new();

    match reader.read_byte_record(&mut record) {
        Ok(true) => decode(&record),
        _ => vec![String::new()],
    }
}

/// True for a whitespace-only line
///
/// A record of bare separators (`,,`) is not blank; it is a row with empty
/// fields.
pub fn is_blank(row: &[String]) -> bool {
    matches!(row, [only] if only.trim().is_empty())
}
