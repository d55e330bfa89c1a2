//! jsonmask - Streaming masking of sensitive values in JSON documents.
//!
//! jsonmask rewrites the values of selected keys in a JSON byte buffer
//! without building a parse tree. Everything outside the masked values is
//! copied through byte for byte.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Masking configuration, validation, and config files
//! - [`error`] - Error types and result aliases
//! - [`matcher`] - Radix trie key and JSON path matching
//! - [`masking`] - Scan state, value maskers, and algorithm variants
//!
//! # Example
//!
//! ```
//! use jsonmask::{JsonMasker, MaskingConfig};
//!
//! let config = MaskingConfig::builder()
//!     .mask_keys(["cardNumber", "cvv"])
//!     .build()
//!     .unwrap();
//! let masker = JsonMasker::new(config).unwrap();
//!
//! let masked = masker
//!     .mask(br#"{"cardNumber": "4111111111111111", "cvv": 123, "name": "A"}"#)
//!     .unwrap();
//! assert_eq!(masked, br#"{"cardNumber": "***", "cvv": 888, "name": "A"}"#);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod masker;
pub mod masking;
pub mod matcher;

pub use config::{MaskingConfig, MaskingConfigBuilder, TargetKeyMode};
pub use error::{MaskerError, Result};
pub use masker::JsonMasker;
pub use masking::{AlgorithmType, ValueMasker, ValueMaskerContext, ValueMaskerError};
