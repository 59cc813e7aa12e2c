pub mod etl;
pub mod serializer;
pub mod sniffer;
pub mod transformer;

pub use crate::domain::model::{RowSet, TransformationResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
