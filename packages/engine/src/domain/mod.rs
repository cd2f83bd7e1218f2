pub mod config;
pub mod intent;
pub mod patterns;

pub use config::{EngineConfig, Smoothing};
pub use intent::{Intent, Purpose};
pub use patterns::{Offset, Pattern, PatternLibrary};
