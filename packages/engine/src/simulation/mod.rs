//! SimulationCore - owns the grid, camera, clock and stamp for the
//! lifetime of the page and runs them in a fixed order once per frame.
//!
//! Per-frame order (`tick`):
//! 1. camera interpolation, pixel buffer realloc on resize
//! 2. queued input: drag pan, paint/erase stroke samples
//! 3. at most one generation
//! 4. render extraction (age plane, visible counts, preview)
//!
//! The heavy lifting lives in the submodules below; this file only
//! holds state and delegates.

use crate::core::EngineError;
use crate::domain::{EngineConfig, Intent, PatternLibrary};
use crate::spatial::{LifeGrid, StepStats};
use crate::systems::{PatternStamp, Preview, SimulationClock, StepRate, ViewportCamera};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "telemetry/frame_stats.rs"]
mod frame_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::{RenderLayout, Simulation};
pub use frame_stats::FrameStats;
pub use perf_stats::PerfStats;

/// One pointer sample of an in-progress stroke, in display coordinates
#[derive(Clone, Copy, Debug)]
struct StrokeSample {
    sx: f64,
    sy: f64,
    intent: Intent,
    /// First sample of a stroke: no interpolation from the previous one
    first: bool,
}

/// Pointer state between frames
#[derive(Debug, Default)]
struct InputState {
    /// Last known pointer position (display coords); None when outside
    pointer: Option<(f64, f64)>,
    /// Intent of the stroke in progress
    stroke: Option<Intent>,
    /// Simulation was running when the stroke began
    resume_after_stroke: bool,
    /// Drag anchor (display coords) while panning
    drag: Option<(f64, f64)>,
    /// Accumulated drag delta (display px) not yet applied
    pending_drag: (f64, f64),
    pending_samples: Vec<StrokeSample>,
    /// Last stamped cell of the current stroke
    last_stroke_cell: Option<(i32, i32)>,
}

/// Buffers handed to the JS renderer
pub(crate) struct RenderBuffers {
    /// buffer_w * buffer_h, 0 = empty, otherwise age + 1 (saturating at 255)
    age_plane: Vec<u8>,
    /// Plane indices written last frame; cleared sparsely
    plane_written: Vec<u32>,
    plane_width: u32,
    plane_height: u32,
    /// x, y, age triples filled by `extract_cells`
    cell_transfer: Vec<i32>,
    /// x, y pairs of the highlight overlay
    preview_transfer: Vec<i32>,
}

pub(crate) struct RenderLayoutData {
    pub(crate) age_plane_ptr: *const u8,
    pub(crate) age_plane_len: usize,
    pub(crate) plane_width: u32,
    pub(crate) plane_height: u32,
    pub(crate) cell_transfer_ptr: *const i32,
    pub(crate) cell_transfer_len: usize,
    pub(crate) preview_ptr: *const i32,
    pub(crate) preview_len: usize,
}

pub struct SimulationCore {
    config: EngineConfig,
    grid: LifeGrid,
    camera: ViewportCamera,
    clock: SimulationClock,
    stamp: PatternStamp,
    preview: Preview,
    rate: StepRate,

    running: bool,
    auto_pause: bool,
    stroke_interpolation: bool,
    input: InputState,
    last_timestamp: Option<f64>,

    last_step: StepStats,
    stepped_last_tick: bool,
    visible: u32,
    visible_left: u32,
    visible_right: u32,

    render: RenderBuffers,

    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        init::create_simulation_core(config, PatternLibrary::builtin())
    }

    pub fn with_library(config: EngineConfig, library: PatternLibrary) -> Result<Self, EngineError> {
        init::create_simulation_core(config, library)
    }

    pub fn from_config_json(json: &str) -> Result<Self, EngineError> {
        Self::new(EngineConfig::from_json(json)?)
    }

    // === Frame ===

    /// Advance one animation frame. `timestamp_ms` is the host's frame clock.
    pub fn tick(&mut self, timestamp_ms: f64) -> Result<(), EngineError> {
        step::tick(self, timestamp_ms)
    }

    /// Advance exactly one generation regardless of clock or pause state.
    pub fn step(&mut self) -> StepStats {
        step::step_generation(self)
    }

    // === Input ===

    pub fn pointer_move(&mut self, sx: f64, sy: f64) -> Result<(), EngineError> {
        commands::pointer_move(self, sx, sy)
    }

    pub fn pointer_leave(&mut self) {
        commands::pointer_leave(self)
    }

    /// Start painting. Intent comes from the cell under the pointer:
    /// a live cell starts an erase stroke, an empty one a draw stroke.
    pub fn begin_stroke(&mut self, sx: f64, sy: f64) -> Result<Intent, EngineError> {
        commands::begin_stroke(self, sx, sy)
    }

    pub fn end_stroke(&mut self) {
        commands::end_stroke(self)
    }

    pub fn begin_drag(&mut self, sx: f64, sy: f64) -> Result<(), EngineError> {
        commands::begin_drag(self, sx, sy)
    }

    pub fn end_drag(&mut self) {
        commands::end_drag(self)
    }

    pub fn zoom_at(&mut self, delta: f64, sx: f64, sy: f64) -> Result<(), EngineError> {
        self.camera.request_zoom(delta, sx, sy)
    }

    pub fn nudge(&mut self, steps_x: i32, steps_y: i32) {
        self.camera.nudge(steps_x, steps_y)
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        self.camera.resize_display(width, height)
    }

    // === Patterns ===

    pub fn select_pattern(&mut self, name: &str) -> Result<(), EngineError> {
        self.stamp.select(name)
    }

    pub fn rotate_pattern(&mut self) {
        self.stamp.rotate()
    }

    pub fn selected_pattern(&self) -> &str {
        self.stamp.selected_name()
    }

    pub fn pattern_orientation(&self) -> u8 {
        self.stamp.orientation()
    }

    pub fn load_pattern_bundle_json(&mut self, json: &str) -> Result<(), EngineError> {
        commands::load_pattern_bundle(self, json)
    }

    pub fn pattern_manifest_json(&self) -> String {
        self.stamp.library().manifest_json()
    }

    // === Cells ===

    pub fn apply(&mut self, x: i32, y: i32, intent: Intent) -> bool {
        self.grid.apply(x, y, intent)
    }

    /// Replace the live set from flat `[x0, y0, x1, y1, ...]`.
    pub fn import_cells(&mut self, flat: &[i32]) -> Result<(), EngineError> {
        commands::import_cells(self, flat)
    }

    /// Live set as flat `[x0, y0, ...]`, row-major
    pub fn export_cells(&self) -> Vec<i32> {
        commands::export_cells(self)
    }

    pub fn clear(&mut self) {
        commands::clear(self)
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn camera(&self) -> &ViewportCamera {
        &self.camera
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    // === Run state ===

    pub fn set_running(&mut self, running: bool) {
        settings::set_running(self, running)
    }

    pub fn toggle_running(&mut self) -> bool {
        settings::set_running(self, !self.running);
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_rate(&mut self, hz: f64) -> Result<(), EngineError> {
        settings::set_rate(self, hz)
    }

    pub fn rate_hz(&self) -> f64 {
        self.rate.hz()
    }

    pub fn set_auto_pause(&mut self, enabled: bool) {
        settings::set_auto_pause(self, enabled)
    }

    pub fn set_stroke_interpolation(&mut self, enabled: bool) {
        settings::set_stroke_interpolation(self, enabled)
    }

    pub fn config_json(&self) -> String {
        settings::config_json(self)
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Telemetry / render ===

    pub fn frame_stats(&self) -> FrameStats {
        render_extract::frame_stats(self)
    }

    /// Cell under the pointer with its age, if the pointer is over the view
    pub fn hover(&self) -> Option<(i32, i32, Option<u32>)> {
        render_extract::hover(self)
    }

    /// Fill the cell transfer buffer with `x, y, age` triples; returns the cell count.
    pub fn extract_cells(&mut self) -> usize {
        render_extract::extract_cells(self)
    }

    pub fn cells_ptr(&self) -> *const i32 {
        self.render.cell_transfer.as_ptr()
    }

    pub fn age_plane(&self) -> &[u8] {
        &self.render.age_plane
    }

    pub fn age_plane_ptr(&self) -> *const u8 {
        self.render.age_plane.as_ptr()
    }

    pub fn plane_size(&self) -> (u32, u32) {
        (self.render.plane_width, self.render.plane_height)
    }

    pub fn preview_cells(&self) -> Vec<i32> {
        self.render.preview_transfer.clone()
    }

    pub(crate) fn render_layout_data(&self) -> RenderLayoutData {
        RenderLayoutData {
            age_plane_ptr: self.render.age_plane.as_ptr(),
            age_plane_len: self.render.age_plane.len(),
            plane_width: self.render.plane_width,
            plane_height: self.render.plane_height,
            cell_transfer_ptr: self.render.cell_transfer.as_ptr(),
            cell_transfer_len: self.render.cell_transfer.len(),
            preview_ptr: self.render.preview_transfer.as_ptr(),
            preview_len: self.render.preview_transfer.len(),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
