//! Configuration file schema.
//!
//! This module contains the struct that maps to the YAML/JSON configuration
//! file format accepted by the `jsonmask` binary.

use serde::{Deserialize, Serialize};

use crate::config::builder::{MaskingConfig, MaskingConfigBuilder};
use crate::error::Result;
use crate::masking::AlgorithmType;

/// Root structure of a masking configuration file.
///
/// ```yaml
/// mask_keys: [password, token]
/// mask_json_paths: ["$.user.ssn"]
/// case_insensitive: true
/// mask_numbers_with: 9
/// obfuscation_length: 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Keys whose values are masked
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mask_keys: Vec<String>,

    /// Keys whose values are kept; everything else is masked
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allow_keys: Vec<String>,

    /// JSON paths whose values are masked
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mask_json_paths: Vec<String>,

    /// JSON paths whose values are kept
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allow_json_paths: Vec<String>,

    /// Match keys ignoring ASCII case
    #[serde(skip_serializing_if = "is_false")]
    pub case_insensitive: bool,

    /// Treat objects and arrays under a target key as a whole
    #[serde(skip_serializing_if = "is_false")]
    pub mask_nested_values: bool,

    /// Fixed token replacing string values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_strings_with: Option<String>,

    /// Token replacing each character of string values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_string_characters_with: Option<String>,

    /// Digit (1-9) replacing number values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_numbers_with: Option<u8>,

    /// Fixed string replacing number values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_numbers_with_string: Option<String>,

    /// Literal replacing boolean values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_booleans_with: Option<bool>,

    /// Fixed string replacing boolean values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_booleans_with_string: Option<String>,

    /// Fixed length for character and digit masking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfuscation_length: Option<usize>,

    /// Force a scan algorithm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<AlgorithmType>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FileConfig {
    /// Convert into a builder, applying every setting present in the file.
    ///
    /// Conflicting settings (e.g. both `mask_strings_with` and
    /// `mask_string_characters_with`) are resolved in favour of the more
    /// specific one; contradictions between targets are left to the builder.
    pub fn into_builder(self) -> MaskingConfigBuilder {
        let mut builder = MaskingConfig::builder()
            .mask_keys(self.mask_keys)
            .allow_keys(self.allow_keys)
            .mask_json_paths(self.mask_json_paths)
            .allow_json_paths(self.allow_json_paths);

        if self.case_insensitive {
            builder = builder.case_insensitive_target_keys();
        }
        if self.mask_nested_values {
            builder = builder.mask_nested_values();
        }
        if let Some(token) = self.mask_strings_with {
            builder = builder.mask_strings_with(token);
        }
        if let Some(token) = self.mask_string_characters_with {
            builder = builder.mask_string_characters_with(token);
        }
        if let Some(token) = self.mask_numbers_with_string {
            builder = builder.mask_numbers_with_string(token);
        }
        if let Some(digit) = self.mask_numbers_with {
            builder = builder.mask_numbers_with(digit);
        }
        if let Some(token) = self.mask_booleans_with_string {
            builder = builder.mask_booleans_with_string(token);
        }
        if let Some(value) = self.mask_booleans_with {
            builder = builder.mask_booleans_with(value);
        }
        if let Some(length) = self.obfuscation_length {
            builder = builder.obfuscation_length(length);
        }
        if let Some(algorithm) = self.algorithm {
            builder = builder.algorithm(algorithm);
        }
        builder
    }

    /// Validate and build the masking configuration.
    pub fn build(self) -> Result<MaskingConfig> {
        self.into_builder().build()
    }
}
