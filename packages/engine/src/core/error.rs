//! Engine error type.
//!
//! The facade turns these into `JsValue` strings at the wasm boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Coordinate does not fit the 32-bit per-axis codec range.
    #[error("coordinate out of range: {0}")]
    CoordinateOutOfRange(f64),

    /// NaN or infinity reached a boundary method.
    #[error("non-finite input for {0}")]
    NonFiniteInput(&'static str),

    /// Step rate must be finite and > 0.
    #[error("invalid step rate: {0} Hz")]
    InvalidRate(f64),

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid pattern bundle: {0}")]
    InvalidBundle(String),

    /// Flat xy buffer with an odd number of values.
    #[error("malformed cell list: expected x/y pairs, got {0} values")]
    MalformedCells(usize),
}
