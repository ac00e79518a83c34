//! Error types for the deserialization boundary.
//!
//! The engine itself never fails: degenerate data is clamped or skipped.
//! Errors only arise when decoding caller-supplied trees, colors or config.

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors produced while decoding caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A color string or channel list could not be parsed.
    #[error("invalid color `{0}`: expected #rgb, #rrggbb, #rrggbbaa or 3/4 channels")]
    InvalidColor(String),
    /// The hierarchy could not be decoded.
    #[error("invalid hierarchy: {0}")]
    InvalidTree(String),
    /// The configuration object could not be decoded.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsError::new(&err.to_string()).into()
    }
}
