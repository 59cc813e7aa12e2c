use crate::domain::model::{RawRow, RowSet, SniffReport, UploadedFile, URL_COLUMN, VISIBLE_COLUMN};
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::validate_file_type;
use csv::{ByteRecord, ReaderBuilder};
use std::cmp::Reverse;
use std::sync::Arc;

/// Data rows read when sniffing an upload.
pub const SNIFF_PREVIEW_ROWS: usize = 5;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
const DETECTION_SAMPLE_ROWS: usize = 10;

pub fn check_file_type(file: &UploadedFile) -> Result<()> {
    validate_file_type(&file.name, file.media_type.as_deref())
}

/// Reads the header line and the first few data rows, and checks that the
/// export carries both `visible` and `url`.
pub fn sniff_headers(bytes: &[u8], delimiter: Option<u8>) -> Result<SniffReport> {
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(bytes));
    let table = read_table(bytes, delimiter, Some(SNIFF_PREVIEW_ROWS))?;

    if table.headers.iter().all(|h| h.trim().is_empty()) {
        tracing::debug!("Sniffed file has no header line");
        return Err(FeedError::NoHeaders);
    }

    let has_visible = table.headers.iter().any(|h| h == VISIBLE_COLUMN);
    let has_url = table.headers.iter().any(|h| h == URL_COLUMN);
    if !has_visible || !has_url {
        tracing::debug!("Sniffed headers lack required columns: {:?}", table.headers);
        return Err(FeedError::MissingRequiredColumns {
            expected: [VISIBLE_COLUMN, URL_COLUMN],
            found: table.headers,
        });
    }

    tracing::debug!(
        "Sniffed {} headers with delimiter {:?}",
        table.headers.len(),
        delimiter as char
    );

    Ok(SniffReport {
        headers: table.headers,
        delimiter,
        preview_rows: table.rows,
    })
}

/// Parses the whole file with the delimiter chosen during sniffing.
pub fn parse_rows(bytes: &[u8], delimiter: u8) -> Result<RowSet> {
    read_table(bytes, delimiter, None)
}

/// Picks the candidate delimiter that splits the first rows into the most
/// consistent number of fields. Falls back to a comma.
pub fn detect_delimiter(bytes: &[u8]) -> u8 {
    let bytes = strip_bom(bytes);

    DELIMITER_CANDIDATES
        .iter()
        .filter_map(|&delimiter| {
            let counts = sample_field_counts(bytes, delimiter);
            let first = *counts.first()?;
            if first < 2 {
                return None;
            }
            let delta = counts.iter().filter(|&&c| c != first).count();
            Some((delimiter, delta, first))
        })
        .min_by_key(|&(_, delta, fields)| (delta, Reverse(fields)))
        .map(|(delimiter, _, _)| delimiter)
        .unwrap_or(b',')
}

fn sample_field_counts(bytes: &[u8], delimiter: u8) -> Vec<usize> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    reader
        .byte_records()
        .take(DETECTION_SAMPLE_ROWS)
        .map_while(|record| record.ok())
        .filter(|record| !is_blank(record))
        .map(|record| record.len())
        .collect()
}

fn read_table(bytes: &[u8], delimiter: u8, limit: Option<usize>) -> Result<RowSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(strip_bom(bytes));

    let headers: Vec<String> = reader.byte_headers()?.iter().map(decode).collect();
    let shared: Arc<[String]> = headers.clone().into();

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        if limit.is_some_and(|max| rows.len() >= max) {
            break;
        }
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        rows.push(RawRow::new(shared.clone(), record.iter().map(decode).collect()));
    }

    Ok(RowSet { headers, rows })
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

// Rows holding nothing but whitespace are dropped, like blank lines.
fn is_blank(record: &ByteRecord) -> bool {
    record.iter().all(|field| field.iter().all(u8::is_ascii_whitespace))
}
