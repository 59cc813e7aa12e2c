use crate::core::Pipeline;
use crate::domain::model::TransformationResult;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct FeedOutput {
    pub output_path: String,
    pub result: TransformationResult,
}

pub struct FeedEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FeedEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<FeedOutput> {
        tracing::info!("Starting feed generation");

        let rows = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} rows across {} columns",
            rows.rows.len(),
            rows.headers.len()
        );

        let result = self.pipeline.transform(rows).await?;
        tracing::info!("Transformed into {} feed records", result.row_count);

        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("Feed saved to: {}", output_path);

        Ok(FeedOutput {
            output_path,
            result,
        })
    }
}
