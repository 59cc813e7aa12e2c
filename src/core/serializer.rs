use crate::domain::model::{
    FeedDownload, OutputRecord, TransformationResult, CUSTOM_LABEL_HEADER, PAGE_URL_HEADER,
    PREVIEW_LIMIT,
};
use crate::utils::error::{FeedError, Result};
use chrono::{NaiveDate, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const FEED_MEDIA_TYPE: &str = "text/csv;charset=utf-8";
const RECORD_TERMINATOR: &str = "\r\n";
const UTF8_BOM: &str = "\u{FEFF}";

pub fn feed_file_name(date: NaiveDate) -> String {
    format!("dsa_feed_{}.csv", date.format("%Y-%m-%d"))
}

/// Serializes the records under today's UTC date.
pub fn serialize_feed(records: Vec<OutputRecord>) -> Result<TransformationResult> {
    serialize_feed_on(records, Utc::now().date_naive())
}

pub fn serialize_feed_on(records: Vec<OutputRecord>, date: NaiveDate) -> Result<TransformationResult> {
    if records.is_empty() {
        return Err(FeedError::NoMatchingRows);
    }

    let data = encode_csv(&records)?;
    let row_count = records.len();
    let mut preview_rows = records;
    preview_rows.truncate(PREVIEW_LIMIT);

    tracing::debug!("Serialized {} feed records ({} bytes)", row_count, data.len());

    Ok(TransformationResult {
        file_name: feed_file_name(date),
        row_count,
        data,
        preview_rows,
    })
}

/// Every field quoted, CRLF between records, nothing after the last one.
pub fn encode_csv(records: &[OutputRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record([PAGE_URL_HEADER, CUSTOM_LABEL_HEADER])?;
    for record in records {
        writer.write_record([record.page_url.as_str(), record.custom_label.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FeedError::processing(e.to_string()))?;
    let mut data = String::from_utf8(bytes).map_err(|e| FeedError::processing(e.to_string()))?;

    if data.ends_with(RECORD_TERMINATOR) {
        data.truncate(data.len() - RECORD_TERMINATOR.len());
    }
    Ok(data)
}

pub fn package_download(result: &TransformationResult) -> FeedDownload {
    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + result.data.len());
    bytes.extend_from_slice(UTF8_BOM.as_bytes());
    bytes.extend_from_slice(result.data.as_bytes());

    FeedDownload {
        file_name: result.file_name.clone(),
        media_type: FEED_MEDIA_TYPE,
        bytes,
    }
}
