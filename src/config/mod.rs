pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::FeedSettings;

#[cfg(feature = "cli")]
use crate::config::settings::parse_delimiter;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dsa-feed")]
#[command(about = "Turn a product export CSV into a page feed for dynamic search ads")]
pub struct CliConfig {
    /// Product export to convert (.csv)
    pub input: String,

    /// Shop domain prepended to every product URL
    #[arg(long)]
    pub domain: Option<String>,

    /// Use the same custom label for every page
    #[arg(long, conflicts_with = "label_column")]
    pub fixed_label: Option<String>,

    /// Take the custom label from this input column
    #[arg(long)]
    pub label_column: Option<String>,

    /// Directory the feed is written to
    #[arg(short, long)]
    pub output: Option<String>,

    /// TOML file with feed settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input delimiter; detected from the file when omitted
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Only check the file and list its columns
    #[arg(long)]
    pub inspect: bool,

    /// Print the result summary as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Builds the run settings: defaults, then `--config`, then flags.
    pub fn resolve(&self) -> Result<FeedSettings> {
        let mut settings = FeedSettings::new(self.input.clone());

        if let Some(path) = &self.config {
            let file_config = toml_config::FeedFileConfig::from_file(path)?;
            file_config.validate()?;
            settings = file_config.apply(settings)?;
        }

        let mut transformation = settings.transformation;
        if let Some(domain) = &self.domain {
            transformation = transformation.with_domain(domain.clone());
        }
        if let Some(label) = &self.fixed_label {
            transformation = transformation.with_fixed_label(label.clone());
        }
        if let Some(column) = &self.label_column {
            transformation = transformation.with_label_column(column.clone());
        }
        settings.transformation = transformation;

        if let Some(delimiter) = self.delimiter {
            settings.delimiter = Some(parse_delimiter("--delimiter", &delimiter.to_string())?);
        }
        if let Some(output) = &self.output {
            settings.output_path = output.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}
