use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid file type: {file_name}")]
    InvalidFileType { file_name: String },

    #[error("No headers found in CSV input")]
    NoHeaders,

    #[error("Missing required columns: expected {expected:?}, found {found:?}")]
    MissingRequiredColumns {
        expected: [&'static str; 2],
        found: Vec<String>,
    },

    #[error("No rows match the filter criteria (visible=1 and URL is not empty)")]
    NoMatchingRows,

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The uploaded file itself was rejected.
    Input,
    /// The file parsed but its content cannot produce a feed.
    Data,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FeedError {
    pub fn processing(message: impl Into<String>) -> Self {
        FeedError::Processing {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FeedError::InvalidFileType { .. }
            | FeedError::NoHeaders
            | FeedError::MissingRequiredColumns { .. } => ErrorCategory::Input,
            FeedError::NoMatchingRows
            | FeedError::Processing { .. }
            | FeedError::CsvError(_)
            | FeedError::SerializationError(_) => ErrorCategory::Data,
            FeedError::ConfigError { .. }
            | FeedError::ConfigValidationError { .. }
            | FeedError::InvalidConfigValueError { .. }
            | FeedError::MissingConfigError { .. } => ErrorCategory::Config,
            FeedError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FeedError::NoMatchingRows => ErrorSeverity::Medium,
            FeedError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Message shown to the user; wording follows the upload/configure screens.
    pub fn user_friendly_message(&self) -> String {
        match self {
            FeedError::InvalidFileType { .. } => "File must be in CSV format.".to_string(),
            FeedError::NoHeaders => {
                "No column headers were found. The file appears to be empty or is not a CSV."
                    .to_string()
            }
            FeedError::MissingRequiredColumns { expected, .. } => format!(
                "Missing required columns '{}' or '{}'. Please ensure you are uploading a valid Shoptet export.",
                expected[0], expected[1]
            ),
            FeedError::NoMatchingRows => {
                "No rows match the filter criteria (visible=1 and URL is not empty).".to_string()
            }
            FeedError::Processing { message } => {
                format!("An error occurred during processing: {}", message)
            }
            FeedError::CsvError(e) => format!("An error occurred during processing: {}", e),
            FeedError::SerializationError(e) => {
                format!("An error occurred during processing: {}", e)
            }
            FeedError::IoError(e) => format!("File access failed: {}", e),
            FeedError::ConfigError { .. }
            | FeedError::ConfigValidationError { .. }
            | FeedError::InvalidConfigValueError { .. }
            | FeedError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FeedError::InvalidFileType { .. } => "Select a file with a .csv extension",
            FeedError::NoHeaders => "Check that the first line of the file contains column names",
            FeedError::MissingRequiredColumns { .. } => {
                "Export the product list again including the 'visible' and 'url' columns"
            }
            FeedError::NoMatchingRows => {
                "Check that the export contains published products (visible=1) with URLs"
            }
            FeedError::Processing { .. }
            | FeedError::CsvError(_)
            | FeedError::SerializationError(_) => {
                "Check the CSV for malformed quoting and try again"
            }
            FeedError::IoError(_) => "Check that the input file exists and the output path is writable",
            FeedError::ConfigError { .. }
            | FeedError::ConfigValidationError { .. }
            | FeedError::InvalidConfigValueError { .. }
            | FeedError::MissingConfigError { .. } => {
                "Review the command-line flags and the configuration file"
            }
        }
    }
}
