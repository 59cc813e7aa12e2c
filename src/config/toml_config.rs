use crate::config::settings::{parse_delimiter, FeedSettings};
use crate::domain::model::LabelMode;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feed settings stored on disk. Every key is optional; missing keys keep
/// the built-in defaults.
///
/// ```toml
/// [feed]
/// domain = "https://www.example.si/"
///
/// [label]
/// mode = "column"
/// column = "defaultCategory"
///
/// [input]
/// delimiter = ";"
///
/// [output]
/// path = "${HOME}/feeds"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedFileConfig {
    pub feed: Option<FeedSection>,
    pub label: Option<LabelSection>,
    pub input: Option<InputSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedSection {
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelSection {
    pub mode: Option<LabelMode>,
    pub fixed_value: Option<String>,
    pub column: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSection {
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
}

impl FeedFileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FeedError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FeedError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FeedError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn delimiter(&self) -> Result<Option<u8>> {
        self.input
            .as_ref()
            .and_then(|input| input.delimiter.as_deref())
            .map(|d| parse_delimiter("input.delimiter", d))
            .transpose()
    }

    /// Layers the file's values over `settings`.
    pub fn apply(&self, mut settings: FeedSettings) -> Result<FeedSettings> {
        let mut transformation = settings.transformation;

        if let Some(domain) = self.feed.as_ref().and_then(|f| f.domain.clone()) {
            transformation = transformation.with_domain(domain);
        }

        if let Some(label) = &self.label {
            if let Some(value) = &label.fixed_value {
                transformation.fixed_label_value = value.clone();
            }
            if let Some(column) = &label.column {
                transformation.label_column = column.clone();
            }
            transformation.custom_label_mode = match (label.mode, &label.column) {
                (Some(mode), _) => mode,
                (None, Some(_)) => LabelMode::Column,
                (None, None) => transformation.custom_label_mode,
            };
        }
        settings.transformation = transformation;

        if let Some(delimiter) = self.delimiter()? {
            settings.delimiter = Some(delimiter);
        }
        if let Some(path) = self.output.as_ref().and_then(|o| o.path.clone()) {
            settings.output_path = path;
        }

        Ok(settings)
    }
}

impl Validate for FeedFileConfig {
    fn validate(&self) -> Result<()> {
        self.delimiter()?;

        if let Some(label) = &self.label {
            if label.mode == Some(LabelMode::Column) && label.column.is_none() {
                return Err(FeedError::MissingConfigError {
                    field: "label.column".to_string(),
                });
            }
        }
        Ok(())
    }
}
