//! Masking configuration.
//!
//! This module handles:
//! - Building and validating [`MaskingConfig`] through [`MaskingConfigBuilder`]
//! - JSON path target parsing
//! - The YAML/JSON configuration file format ([`FileConfig`]) and its loader
//!
//! A built [`MaskingConfig`] is immutable and can be shared across threads.

pub mod builder;
pub mod json_path;
pub mod loader;
pub mod schema;

pub use builder::{MaskingConfig, MaskingConfigBuilder, TargetKeyMode, DEFAULT_NUMBER_DIGIT};
pub use json_path::normalize_json_path;
pub use loader::{load_config_file, load_masking_config};
pub use schema::FileConfig;
