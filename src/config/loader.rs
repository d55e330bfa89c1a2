//! Configuration file loading.
//!
//! Files ending in `.json` are parsed as JSON; anything else as YAML.

use std::fs;
use std::path::Path;

use crate::config::builder::MaskingConfig;
use crate::config::schema::FileConfig;
use crate::error::{MaskerError, Result};

/// Load a single config file and parse it into a [`FileConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the file is not valid YAML/JSON for the schema.
pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Err(MaskerError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed: std::result::Result<FileConfig, String> = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| MaskerError::ConfigParseError {
        path: path.to_path_buf(),
        message,
    })
}

/// Load, validate and build a masking configuration from a file.
pub fn load_masking_config(path: &Path) -> Result<MaskingConfig> {
    let config = load_config_file(path)?.build()?;
    tracing::debug!(
        path = %path.display(),
        keys = config.target_keys().len(),
        paths = config.target_paths().len(),
        "loaded masking config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, MaskerError::ConfigNotFound { .. }));
    }

    #[test]
    fn loads_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mask.yml");
        fs::write(&path, "mask_keys: [secret]\n").unwrap();

        let file = load_config_file(&path).unwrap();
        assert_eq!(file.mask_keys, vec!["secret"]);
    }

    #[test]
    fn loads_json_file_by_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mask.json");
        fs::write(&path, r#"{"allow_keys": ["id"]}"#).unwrap();

        let config = load_masking_config(&path).unwrap();
        assert!(config.target_keys().contains("id"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mask.yml");
        fs::write(&path, "mask_keys: [unterminated\n").unwrap();

        let err = load_config_file(&path).unwrap_err();
        match err {
            MaskerError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_settings_fail_validation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mask.yml");
        fs::write(&path, "mask_keys: [a]\nmask_numbers_with: 0\n").unwrap();

        let err = load_masking_config(&path).unwrap_err();
        assert!(matches!(err, MaskerError::ConfigValidation { .. }));
    }
}
