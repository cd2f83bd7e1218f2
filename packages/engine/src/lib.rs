//! Life Engine - sparse Game of Life core with a zoomable viewport, in WASM
//!
//! Layout:
//! - core/        - cell key codec, errors, logging
//! - domain/      - intents, configuration, pattern tables
//! - spatial/     - sparse live-cell grid and the generation step
//! - systems/     - camera, step clock, pattern stamp
//! - simulation/  - per-frame driver and the JS facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Thread pool for the parallel tally (browser only)
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install();
    log::info!("life engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{CellKey, EngineError};
pub use domain::{EngineConfig, Intent, Pattern, PatternLibrary, Purpose, Smoothing};
pub use simulation::{FrameStats, PerfStats, RenderLayout, Simulation, SimulationCore};
pub use spatial::{LifeGrid, StepStats};
pub use systems::{PatternStamp, Preview, SimulationClock, StepRate, ViewportCamera};
