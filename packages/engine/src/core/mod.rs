//! Core primitives shared by every layer: cell keys, errors, logging.

pub mod codec;
pub mod error;
pub mod logging;

pub use codec::CellKey;
pub use error::EngineError;
