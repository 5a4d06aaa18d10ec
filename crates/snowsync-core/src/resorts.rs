use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One crawl target: a resort and the page carrying its snow report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResortTarget {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ResortsFile {
    pub resorts: Vec<ResortTarget>,
}

/// Load and validate the resort target list from a YAML file.
///
/// Order is preserved: targets are processed in file order.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_resorts(path: &Path) -> Result<ResortsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ResortsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let resorts_file: ResortsFile = serde_yaml::from_str(&content)?;

    validate_resorts(&resorts_file)?;

    Ok(resorts_file)
}

fn validate_resorts(resorts_file: &ResortsFile) -> Result<(), ConfigError> {
    if resorts_file.resorts.is_empty() {
        return Err(ConfigError::Validation(
            "resorts list must not be empty".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for resort in &resorts_file.resorts {
        if resort.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "resort name must be non-empty".to_string(),
            ));
        }

        if !resort.url.starts_with("http://") && !resort.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "resort '{}' has invalid url '{}'; must start with http:// or https://",
                resort.name, resort.url
            )));
        }

        // The store is keyed by name, so two targets with the same name would
        // overwrite each other within one run.
        let lower_name = resort.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate resort name: '{}'",
                resort.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_validate(yaml: &str) -> Result<(), ConfigError> {
        let file: ResortsFile = serde_yaml::from_str(yaml).expect("test yaml should parse");
        validate_resorts(&file)
    }

    #[test]
    fn valid_file_passes_validation() {
        let yaml = r"
resorts:
  - name: Alta
    url: https://www.onthesnow.com/utah/alta/skireport
  - name: Snowbird
    url: https://www.onthesnow.com/utah/snowbird/skireport
";
        assert!(parse_and_validate(yaml).is_ok());
    }

    #[test]
    fn preserves_target_order() {
        let yaml = r"
resorts:
  - name: Vail
    url: https://example.com/vail
  - name: Aspen
    url: https://example.com/aspen
  - name: Breckenridge
    url: https://example.com/breck
";
        let file: ResortsFile = serde_yaml::from_str(yaml).expect("test yaml should parse");
        let names: Vec<&str> = file.resorts.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Vail", "Aspen", "Breckenridge"]);
    }

    #[test]
    fn rejects_empty_list() {
        let result = parse_and_validate("resorts: []");
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("empty")),
            "expected Validation error for empty list, got: {result:?}"
        );
    }

    #[test]
    fn rejects_blank_name() {
        let yaml = r#"
resorts:
  - name: "  "
    url: https://example.com/somewhere
"#;
        let result = parse_and_validate(yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("non-empty")),
            "expected Validation error for blank name, got: {result:?}"
        );
    }

    #[test]
    fn rejects_non_http_url() {
        let yaml = r"
resorts:
  - name: Alta
    url: ftp://example.com/alta
";
        let result = parse_and_validate(yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("invalid url")),
            "expected Validation error for non-http url, got: {result:?}"
        );
    }

    #[test]
    fn rejects_duplicate_names_case_insensitively() {
        let yaml = r"
resorts:
  - name: Alta
    url: https://example.com/alta
  - name: ALTA
    url: https://example.com/alta-again
";
        let result = parse_and_validate(yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected Validation error for duplicate name, got: {result:?}"
        );
    }

    #[test]
    fn load_resorts_missing_file_is_io_error() {
        let result = load_resorts(Path::new("/nonexistent/resorts.yaml"));
        assert!(
            matches!(result, Err(ConfigError::ResortsFileIo { .. })),
            "expected ResortsFileIo, got: {result:?}"
        );
    }
}
