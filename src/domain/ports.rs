use crate::domain::model::{RowSet, TransformationConfig, TransformationResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn transformation(&self) -> TransformationConfig;
    /// `None` means detect from the file.
    fn delimiter(&self) -> Option<u8>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RowSet>;
    async fn transform(&self, data: RowSet) -> Result<TransformationResult>;
    async fn load(&self, result: &TransformationResult) -> Result<String>;
}
