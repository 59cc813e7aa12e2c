use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const VISIBLE_COLUMN: &str = "visible";
pub const URL_COLUMN: &str = "url";
pub const PAGE_URL_HEADER: &str = "Page URL";
pub const CUSTOM_LABEL_HEADER: &str = "Custom label";
pub const PREVIEW_LIMIT: usize = 5;

/// One parsed input row. Values are looked up by header name; a row shorter
/// than the header line has no value for the trailing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl RawRow {
    pub fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        Self { headers, values }
    }

    /// Builds a row from literal pairs. Mostly useful in tests.
    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: Vec<(K, V)>) -> Self {
        let (headers, values): (Vec<String>, Vec<String>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).unzip();
        Self {
            headers: headers.into(),
            values,
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        let index = self.headers.iter().position(|h| h == column)?;
        self.values.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    #[default]
    Fixed,
    Column,
}

impl std::fmt::Display for LabelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelMode::Fixed => write!(f, "fixed"),
            LabelMode::Column => write!(f, "column"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationConfig {
    pub domain: String,
    pub custom_label_mode: LabelMode,
    pub fixed_label_value: String,
    pub label_column: String,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            domain: "https://www.lavonio.si/".to_string(),
            custom_label_mode: LabelMode::Fixed,
            fixed_label_value: "category".to_string(),
            label_column: String::new(),
        }
    }
}

impl TransformationConfig {
    pub fn with_domain(self, domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..self
        }
    }

    pub fn with_fixed_label(self, value: impl Into<String>) -> Self {
        Self {
            custom_label_mode: LabelMode::Fixed,
            fixed_label_value: value.into(),
            ..self
        }
    }

    pub fn with_label_column(self, column: impl Into<String>) -> Self {
        Self {
            custom_label_mode: LabelMode::Column,
            label_column: column.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Page URL")]
    pub page_url: String,
    #[serde(rename = "Custom label")]
    pub custom_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationResult {
    pub file_name: String,
    pub row_count: usize,
    #[serde(skip_serializing)]
    pub data: String,
    pub preview_rows: Vec<OutputRecord>,
}

/// A file handed to the tool, by picker, drop or path.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: None,
            bytes,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct SniffReport {
    pub headers: Vec<String>,
    pub delimiter: u8,
    pub preview_rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// The bytes that end up on disk: BOM-prefixed UTF-8 CSV.
#[derive(Debug, Clone)]
pub struct FeedDownload {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}
