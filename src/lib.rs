pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, FeedSettings};

pub use app::pipelines::feed_pipeline::FeedPipeline;
pub use app::session::{FeedSession, Step};
pub use crate::core::etl::{FeedEngine, FeedOutput};
pub use domain::model::{LabelMode, OutputRecord, TransformationConfig, TransformationResult, UploadedFile};
pub use utils::error::{FeedError, Result};
