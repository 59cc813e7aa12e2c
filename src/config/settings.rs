use crate::core::ConfigProvider;
use crate::domain::model::{LabelMode, TransformationConfig};
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Fully resolved run settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    pub input_path: String,
    pub output_path: String,
    pub delimiter: Option<u8>,
    pub transformation: TransformationConfig,
}

impl FeedSettings {
    pub fn new(input_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            delimiter: None,
            transformation: TransformationConfig::default(),
        }
    }
}

/// Accepts exactly one ASCII character, e.g. `;` or a tab.
pub fn parse_delimiter(field_name: &str, value: &str) -> Result<u8> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Delimiter must be a single ASCII character".to_string(),
        }),
    }
}

impl Validate for FeedSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output.path", &self.output_path)?;
        validate_non_empty_string("feed.domain", &self.transformation.domain)?;

        if self.transformation.custom_label_mode == LabelMode::Column {
            validate_non_empty_string("label.column", &self.transformation.label_column)?;
        }

        if let Some(delimiter) = self.delimiter {
            if delimiter == b'"' || delimiter == b'\n' || delimiter == b'\r' {
                return Err(FeedError::InvalidConfigValueError {
                    field: "input.delimiter".to_string(),
                    value: (delimiter as char).to_string(),
                    reason: "Delimiter cannot be a quote or line break".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for FeedSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn transformation(&self) -> TransformationConfig {
        self.transformation.clone()
    }

    fn delimiter(&self) -> Option<u8> {
        self.delimiter
    }
}
