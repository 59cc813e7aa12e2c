//! Step-by-step feed generation: upload a file, configure, generate.
//!
//! A `FeedSession` holds at most one file, one configuration and one result.
//! Every failure is recorded as a user-facing message and leaves the session
//! on the step where it happened.

use crate::core::serializer::{package_download, serialize_feed_on};
use crate::core::sniffer::{check_file_type, parse_rows, sniff_headers};
use crate::core::transformer::transform_rows;
use crate::domain::model::{
    FeedDownload, LabelMode, SniffReport, TransformationConfig, TransformationResult, UploadedFile,
};
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::{validate_column_exists, validate_non_empty_string, validate_url};
use chrono::{NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    Configure,
    Result,
}

#[derive(Debug, Default)]
pub struct FeedSession {
    file: Option<UploadedFile>,
    sniff: Option<SniffReport>,
    config: TransformationConfig,
    result: Option<TransformationResult>,
    error: Option<String>,
}

impl FeedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TransformationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn step(&self) -> Step {
        match (&self.result, &self.sniff) {
            (Some(_), _) => Step::Result,
            (None, Some(_)) => Step::Configure,
            (None, None) => Step::Upload,
        }
    }

    pub fn headers(&self) -> &[String] {
        self.sniff.as_ref().map(|s| s.headers.as_slice()).unwrap_or(&[])
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    pub fn config(&self) -> &TransformationConfig {
        &self.config
    }

    pub fn result(&self) -> Option<&TransformationResult> {
        self.result.as_ref()
    }

    /// Message for the last failure, cleared by the next action.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Takes a picked or dropped file. A rejected file is not kept.
    pub fn accept_file(&mut self, file: UploadedFile) -> Result<()> {
        self.error = None;

        let outcome = check_file_type(&file).and_then(|_| sniff_headers(&file.bytes, None));
        match outcome {
            Ok(report) => {
                tracing::info!(
                    "Accepted {} with {} columns",
                    file.name,
                    report.headers.len()
                );
                self.file = Some(file);
                self.sniff = Some(report);
                self.result = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Rejected {}: {}", file.name, e);
                self.file = None;
                self.sniff = None;
                self.result = None;
                self.fail(e)
            }
        }
    }

    /// Replaces the whole configuration and drops any result built from the
    /// previous one. Nothing is checked until `generate`.
    pub fn update_config(&mut self, config: TransformationConfig) {
        self.config = config;
        self.result = None;
    }

    pub fn generate(&mut self) -> Result<&TransformationResult> {
        self.generate_on(Utc::now().date_naive())
    }

    /// Runs the full parse, filter and serialize with `date` in the file name.
    pub fn generate_on(&mut self, date: NaiveDate) -> Result<&TransformationResult> {
        self.error = None;
        self.result = None;

        let outcome = match (&self.file, &self.sniff) {
            (Some(file), Some(sniff)) => build_result(file, sniff, &self.config, date),
            _ => Err(FeedError::processing("no file has been uploaded")),
        };

        match outcome {
            Ok(result) => {
                tracing::info!("Generated {} with {} rows", result.file_name, result.row_count);
                let result: &TransformationResult = self.result.insert(result);
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("Feed generation failed: {}", e);
                self.fail(e)
            }
        }
    }

    pub fn download(&self) -> Option<FeedDownload> {
        self.result.as_ref().map(package_download)
    }

    /// Drops the file and result. The configuration is kept for the next run.
    pub fn reset(&mut self) {
        self.file = None;
        self.sniff = None;
        self.result = None;
        self.error = None;
    }

    fn fail<T>(&mut self, error: FeedError) -> Result<T> {
        self.error = Some(error.user_friendly_message());
        Err(error)
    }
}

fn build_result(
    file: &UploadedFile,
    sniff: &SniffReport,
    config: &TransformationConfig,
    date: NaiveDate,
) -> Result<TransformationResult> {
    validate_non_empty_string("domain", &config.domain)?;
    if let Err(e) = validate_url("domain", &config.domain) {
        tracing::warn!("Domain will be used as given: {}", e);
    }
    if config.custom_label_mode == LabelMode::Column {
        validate_column_exists("label_column", &config.label_column, &sniff.headers)?;
    }

    let table = parse_rows(&file.bytes, sniff.delimiter)?;
    let records = transform_rows(&table.rows, config)?;
    serialize_feed_on(records, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "visible,url,cat\n1,/shoes,Footwear\n0,/hats,Hats\n1,,X\n";

    fn upload(data: &str) -> UploadedFile {
        UploadedFile::new("export.csv", data.as_bytes().to_vec())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn test_new_session_starts_on_upload() {
        let session = FeedSession::new();
        assert_eq!(session.step(), Step::Upload);
        assert_eq!(session.config(), &TransformationConfig::default());
        assert!(session.headers().is_empty());
    }

    #[test]
    fn test_accept_file_moves_to_configure() {
        let mut session = FeedSession::new();
        session.accept_file(upload(EXPORT)).unwrap();

        assert_eq!(session.step(), Step::Configure);
        assert_eq!(session.headers(), ["visible", "url", "cat"]);
        assert_eq!(session.file_name(), Some("export.csv"));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_wrong_file_type_stays_on_upload() {
        let mut session = FeedSession::new();
        let file = UploadedFile::new("export.xlsx", EXPORT.as_bytes().to_vec());

        assert!(matches!(
            session.accept_file(file),
            Err(FeedError::InvalidFileType { .. })
        ));
        assert_eq!(session.step(), Step::Upload);
        assert_eq!(session.error(), Some("File must be in CSV format."));
    }

    #[test]
    fn test_missing_columns_discards_file() {
        let mut session = FeedSession::new();
        let result = session.accept_file(upload("code,name\n1,Shoe\n"));

        assert!(matches!(result, Err(FeedError::MissingRequiredColumns { .. })));
        assert_eq!(session.step(), Step::Upload);
        assert!(session.file_name().is_none());
        assert!(session.error().unwrap().contains("'visible' or 'url'"));
    }

    #[test]
    fn test_generate_with_label_column() {
        let mut session = FeedSession::new();
        session.accept_file(upload(EXPORT)).unwrap();
        session.update_config(
            TransformationConfig::default()
                .with_domain("https://shop.si/")
                .with_label_column("cat"),
        );

        let result = session.generate_on(date()).unwrap();

        assert_eq!(result.file_name, "dsa_feed_2025-01-31.csv");
        assert_eq!(result.row_count, 1);
        assert_eq!(
            result.data,
            "\"Page URL\",\"Custom label\"\r\n\"https://shop.si/shoes\",\"Footwear\""
        );
        assert_eq!(session.step(), Step::Result);
    }

    #[test]
    fn test_no_matching_rows_stays_on_configure() {
        let mut session = FeedSession::new();
        session
            .accept_file(upload("visible,url\n0,/a\n1,\n"))
            .unwrap();

        let result = session.generate_on(date());

        assert!(matches!(result, Err(FeedError::NoMatchingRows)));
        assert_eq!(session.step(), Step::Configure);
        assert!(session.result().is_none());
        assert!(session.file_name().is_some());
        assert_eq!(
            session.error(),
            Some("No rows match the filter criteria (visible=1 and URL is not empty).")
        );
    }

    #[test]
    fn test_unknown_label_column_is_rejected_at_generate() {
        let mut session =
            FeedSession::with_config(TransformationConfig::default().with_label_column("brand"));
        session.accept_file(upload(EXPORT)).unwrap();

        assert!(session.generate_on(date()).is_err());
        assert_eq!(session.step(), Step::Configure);
    }

    #[test]
    fn test_failed_regenerate_drops_previous_result() {
        let mut session = FeedSession::new();
        session.accept_file(upload(EXPORT)).unwrap();
        session.generate_on(date()).unwrap();
        assert_eq!(session.step(), Step::Result);

        session.update_config(TransformationConfig::default().with_label_column("nope"));
        let result = session.generate_on(date());

        assert!(matches!(result, Err(FeedError::InvalidConfigValueError { .. })));
        assert_eq!(session.step(), Step::Configure);
        assert!(session.result().is_none());
        assert!(session.download().is_none());
        assert!(session.error().is_some());
    }

    #[test]
    fn test_config_change_returns_to_configure() {
        let mut session = FeedSession::new();
        session.accept_file(upload(EXPORT)).unwrap();
        session.generate_on(date()).unwrap();

        session.update_config(TransformationConfig::default().with_fixed_label("sale"));

        assert_eq!(session.step(), Step::Configure);
        assert!(session.download().is_none());

        let result = session.generate_on(date()).unwrap();
        assert_eq!(result.preview_rows[0].custom_label, "sale");
    }

    #[test]
    fn test_empty_domain_stays_on_configure() {
        let mut session = FeedSession::with_config(TransformationConfig::default().with_domain(""));
        session.accept_file(upload(EXPORT)).unwrap();

        let result = session.generate_on(date());

        assert!(matches!(
            result,
            Err(FeedError::InvalidConfigValueError { ref field, .. }) if field == "domain"
        ));
        assert_eq!(session.step(), Step::Configure);
        assert!(session.result().is_none());
        assert!(session.error().unwrap().starts_with("Invalid configuration:"));
    }

    #[test]
    fn test_generate_without_file() {
        let mut session = FeedSession::new();
        let result = session.generate_on(date());

        assert!(matches!(result, Err(FeedError::Processing { .. })));
        assert_eq!(session.step(), Step::Upload);
    }

    #[test]
    fn test_download_and_reset() {
        let mut session = FeedSession::new();
        session.accept_file(upload(EXPORT)).unwrap();
        session.generate_on(date()).unwrap();

        let download = session.download().unwrap();
        assert_eq!(download.file_name, "dsa_feed_2025-01-31.csv");
        assert!(download.bytes.starts_with("\u{FEFF}".as_bytes()));

        let config = session.config().clone();
        session.reset();

        assert_eq!(session.step(), Step::Upload);
        assert!(session.download().is_none());
        assert!(session.file_name().is_none());
        assert_eq!(session.config(), &config);
    }
}
