use crate::core::serializer::{package_download, serialize_feed};
use crate::core::sniffer::{parse_rows, sniff_headers};
use crate::core::transformer::transform_rows;
use crate::core::{ConfigProvider, Pipeline, Result, RowSet, Storage, TransformationResult};
use crate::domain::model::LabelMode;
use crate::utils::validation::{
    validate_column_exists, validate_file_type, validate_non_empty_string, validate_url,
};
use std::path::Path;

pub struct FeedPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> FeedPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FeedPipeline<S, C> {
    async fn extract(&self) -> Result<RowSet> {
        let input = self.config.input_path();
        let file_name = Path::new(input)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.to_string());
        validate_file_type(&file_name, None)?;

        tracing::debug!("Reading input file: {}", input);
        let bytes = self.storage.read_file(input).await?;

        let report = sniff_headers(&bytes, self.config.delimiter())?;
        tracing::debug!("Input columns: {}", report.headers.join(", "));

        parse_rows(&bytes, report.delimiter)
    }

    async fn transform(&self, data: RowSet) -> Result<TransformationResult> {
        let config = self.config.transformation();
        tracing::debug!(
            "Building feed for {} with {} labels",
            config.domain,
            config.custom_label_mode
        );

        validate_non_empty_string("domain", &config.domain)?;
        if let Err(e) = validate_url("domain", &config.domain) {
            tracing::warn!("Domain will be used as given: {}", e);
        }
        if config.custom_label_mode == LabelMode::Column {
            validate_column_exists("label_column", &config.label_column, &data.headers)?;
        }

        let records = transform_rows(&data.rows, &config)?;
        serialize_feed(records)
    }

    async fn load(&self, result: &TransformationResult) -> Result<String> {
        let download = package_download(result);
        let output_path = format!("{}/{}", self.config.output_path(), download.file_name);

        tracing::debug!(
            "Writing {} ({} bytes, {})",
            download.file_name,
            download.bytes.len(),
            download.media_type
        );
        self.storage
            .write_file(&download.file_name, &download.bytes)
            .await?;

        Ok(output_path)
    }
}
