use crate::domain::model::{
    LabelMode, OutputRecord, RawRow, TransformationConfig, URL_COLUMN, VISIBLE_COLUMN,
};
use crate::utils::error::{FeedError, Result};

/// A row is published when `visible` is exactly `"1"` and it has a URL path.
pub fn is_published(row: &RawRow) -> bool {
    published_url(row).is_some()
}

/// The trimmed URL path of a published row.
fn published_url(row: &RawRow) -> Option<&str> {
    if row.get(VISIBLE_COLUMN).map(str::trim) != Some("1") {
        return None;
    }
    row.get(URL_COLUMN)
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

/// Joins the domain and a row's URL path with exactly one slash between them.
/// Neither side is otherwise validated or escaped.
pub fn build_page_url(domain: &str, url_part: &str) -> String {
    let url_part = url_part.trim();
    let domain = domain.strip_suffix('/').unwrap_or(domain);
    if url_part.starts_with('/') {
        format!("{}{}", domain, url_part)
    } else {
        format!("{}/{}", domain, url_part)
    }
}

/// A missing or empty label column yields an empty label.
pub fn build_label(row: &RawRow, config: &TransformationConfig) -> String {
    match config.custom_label_mode {
        LabelMode::Fixed => config.fixed_label_value.clone(),
        LabelMode::Column => row
            .get(&config.label_column)
            .unwrap_or_default()
            .to_string(),
    }
}

pub fn transform_rows(rows: &[RawRow], config: &TransformationConfig) -> Result<Vec<OutputRecord>> {
    let records: Vec<OutputRecord> = rows
        .iter()
        .filter_map(|row| {
            published_url(row).map(|url| OutputRecord {
                page_url: build_page_url(&config.domain, url),
                custom_label: build_label(row, config),
            })
        })
        .collect();

    tracing::debug!(
        "Filtered {} of {} rows into feed records",
        records.len(),
        rows.len()
    );

    if records.is_empty() {
        return Err(FeedError::NoMatchingRows);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        RawRow::from_pairs(pairs.to_vec())
    }

    #[test]
    fn test_shop_scenario_with_label_column() {
        let rows = vec![
            row(&[("visible", "1"), ("url", "/shoes"), ("cat", "Footwear")]),
            row(&[("visible", "0"), ("url", "/hats"), ("cat", "Hats")]),
            row(&[("visible", "1"), ("url", ""), ("cat", "X")]),
        ];
        let config = TransformationConfig::default()
            .with_domain("https://shop.si/")
            .with_label_column("cat");

        let records = transform_rows(&rows, &config).unwrap();

        assert_eq!(
            records,
            vec![OutputRecord {
                page_url: "https://shop.si/shoes".to_string(),
                custom_label: "Footwear".to_string(),
            }]
        );
    }

    #[test]
    fn test_visibility_is_strict_string_match() {
        for visible in ["0", "", "true", "yes", "01", "1.0", "2"] {
            let r = row(&[("visible", visible), ("url", "/a")]);
            assert!(!is_published(&r), "visible={:?} should be excluded", visible);
        }
        assert!(is_published(&row(&[("visible", " 1 "), ("url", "/a")])));
        assert!(!is_published(&row(&[("url", "/a")])));
    }

    #[test]
    fn test_blank_or_missing_url_is_excluded() {
        assert!(!is_published(&row(&[("visible", "1"), ("url", "   ")])));
        assert!(!is_published(&row(&[("visible", "1")])));
    }

    #[test]
    fn test_padded_url_is_trimmed_in_records() {
        let rows = vec![row(&[("visible", " 1"), ("url", "  /shoes \t")])];
        let config = TransformationConfig::default().with_domain("https://shop.si/");

        let records = transform_rows(&rows, &config).unwrap();
        assert_eq!(records[0].page_url, "https://shop.si/shoes");
    }

    #[test]
    fn test_build_page_url_slash_handling() {
        assert_eq!(build_page_url("https://x.si/", "a/b"), "https://x.si/a/b");
        assert_eq!(build_page_url("https://x.si", "/a/b"), "https://x.si/a/b");
        assert_eq!(build_page_url("https://x.si/", "/a/b"), "https://x.si/a/b");
        assert_eq!(build_page_url("https://x.si", " a/b/ "), "https://x.si/a/b/");
    }

    #[test]
    fn test_build_page_url_strips_only_one_trailing_slash() {
        assert_eq!(build_page_url("https://x.si//", "a"), "https://x.si//a");
    }

    #[test]
    fn test_malformed_domain_passes_through() {
        assert_eq!(build_page_url("not a domain", "p q"), "not a domain/p q");
    }

    #[test]
    fn test_fixed_label_is_used_verbatim() {
        let config = TransformationConfig::default().with_fixed_label("");
        let r = row(&[("visible", "1"), ("url", "/a"), ("cat", "Ignored")]);
        assert_eq!(build_label(&r, &config), "");

        let config = config.with_fixed_label(" Sale ");
        assert_eq!(build_label(&r, &config), " Sale ");
    }

    #[test]
    fn test_missing_label_column_yields_empty_label() {
        let config = TransformationConfig::default().with_label_column("brand");
        let rows = vec![row(&[("visible", "1"), ("url", "/a"), ("cat", "Shoes")])];

        let records = transform_rows(&rows, &config).unwrap();
        assert_eq!(records[0].custom_label, "");
    }

    #[test]
    fn test_output_preserves_input_order() {
        let rows: Vec<RawRow> = (0..10)
            .map(|i| {
                let visible = if i % 3 == 0 { "0" } else { "1" };
                RawRow::from_pairs(vec![("visible", visible.to_string()), ("url", format!("p{}", i))])
            })
            .collect();
        let config = TransformationConfig::default().with_domain("https://x.si");

        let urls: Vec<String> = transform_rows(&rows, &config)
            .unwrap()
            .into_iter()
            .map(|r| r.page_url)
            .collect();

        assert_eq!(
            urls,
            vec![1, 2, 4, 5, 7, 8]
                .into_iter()
                .map(|i| format!("https://x.si/p{}", i))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_no_matching_rows() {
        let rows = vec![row(&[("visible", "0"), ("url", "/a")])];
        let result = transform_rows(&rows, &TransformationConfig::default());
        assert!(matches!(result, Err(FeedError::NoMatchingRows)));

        let result = transform_rows(&[], &TransformationConfig::default());
        assert!(matches!(result, Err(FeedError::NoMatchingRows)));
    }
}
