use crate::utils::error::{FeedError, Result};
use url::Url;

pub const CSV_MEDIA_TYPE: &str = "text/csv";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FeedError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Accepts a file when its name ends in `.csv` (any case) or its declared
/// media type is `text/csv`.
pub fn validate_file_type(file_name: &str, media_type: Option<&str>) -> Result<()> {
    let has_csv_extension = file_name.to_lowercase().ends_with(".csv");
    let has_csv_media_type = media_type == Some(CSV_MEDIA_TYPE);

    if has_csv_extension || has_csv_media_type {
        Ok(())
    } else {
        Err(FeedError::InvalidFileType {
            file_name: file_name.to_string(),
        })
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FeedError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_column_exists(field_name: &str, column: &str, headers: &[String]) -> Result<()> {
    if headers.iter().any(|h| h == column) {
        return Ok(());
    }
    Err(FeedError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: column.to_string(),
        reason: format!("Column not found. Available columns: {}", headers.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("domain", "https://example.com").is_ok());
        assert!(validate_url("domain", "http://example.com/").is_ok());
        assert!(validate_url("domain", "").is_err());
        assert!(validate_url("domain", "www.example.com").is_err());
        assert!(validate_url("domain", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_type() {
        assert!(validate_file_type("export.csv", None).is_ok());
        assert!(validate_file_type("EXPORT.CSV", None).is_ok());
        assert!(validate_file_type("export", Some("text/csv")).is_ok());
        assert!(matches!(
            validate_file_type("export.xlsx", Some("application/vnd.ms-excel")),
            Err(FeedError::InvalidFileType { .. })
        ));
        assert!(validate_file_type("export.csv.txt", None).is_err());
    }

    #[test]
    fn test_validate_column_exists() {
        let headers = vec!["visible".to_string(), "url".to_string(), "cat".to_string()];
        assert!(validate_column_exists("label.column", "cat", &headers).is_ok());
        assert!(validate_column_exists("label.column", "Cat", &headers).is_err());
    }
}
