//! The streaming masking engine.
//!
//! This module provides:
//!
//! - [`MaskingState`] - Per-call cursor over the input buffer
//! - [`ValueMasker`] - Protocol for producing replacement bytes
//! - [`maskers`] - Built-in value maskers
//! - [`AlgorithmType`] - Interchangeable scan strategies
//!
//! The scan loop itself is internal; use [`crate::JsonMasker`] to run it.

pub mod algorithm;
pub mod maskers;
mod scanner;
pub mod state;
pub mod value_masker;

pub use algorithm::{AlgorithmType, KeyProbe};
pub use maskers::{BooleanMasker, CharacterMasker, DigitMasker, FixedStringMasker};
pub use state::MaskingState;
pub use value_masker::{ValueMasker, ValueMaskerContext, ValueMaskerError};
