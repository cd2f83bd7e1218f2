use wasm_bindgen::prelude::*;

use crate::core::EngineError;
use crate::domain::{EngineConfig, Intent};

use super::frame_stats::FrameStats;
use super::perf_stats::PerfStats;
use super::SimulationCore;

fn js_err(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Pointers and lengths of the render buffers, read once per frame by JS
#[wasm_bindgen]
pub struct RenderLayout {
    age_plane_ptr: u32,
    age_plane_len: u32,
    plane_width: u32,
    plane_height: u32,
    cell_transfer_ptr: u32,
    cell_transfer_len: u32,
    preview_ptr: u32,
    preview_len: u32,
}

#[wasm_bindgen]
impl RenderLayout {
    #[wasm_bindgen(getter)]
    pub fn age_plane_ptr(&self) -> u32 { self.age_plane_ptr }
    #[wasm_bindgen(getter)]
    pub fn age_plane_len(&self) -> u32 { self.age_plane_len }
    #[wasm_bindgen(getter)]
    pub fn plane_width(&self) -> u32 { self.plane_width }
    #[wasm_bindgen(getter)]
    pub fn plane_height(&self) -> u32 { self.plane_height }

    #[wasm_bindgen(getter)]
    pub fn cell_transfer_ptr(&self) -> u32 { self.cell_transfer_ptr }
    #[wasm_bindgen(getter)]
    pub fn cell_transfer_len(&self) -> u32 { self.cell_transfer_len }

    #[wasm_bindgen(getter)]
    pub fn preview_ptr(&self) -> u32 { self.preview_ptr }
    #[wasm_bindgen(getter)]
    pub fn preview_len(&self) -> u32 { self.preview_len }
}

#[wasm_bindgen]
pub struct Simulation {
    core: SimulationCore,
}

#[wasm_bindgen]
impl Simulation {
    /// Simulation with the default configuration and built-in patterns
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Simulation, JsValue> {
        Ok(Self {
            core: SimulationCore::new(EngineConfig::default()).map_err(js_err)?,
        })
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: String) -> Result<Simulation, JsValue> {
        Ok(Self {
            core: SimulationCore::from_config_json(&json).map_err(js_err)?,
        })
    }

    /// Run one animation frame (`requestAnimationFrame` timestamp, ms)
    pub fn tick(&mut self, timestamp_ms: f64) -> Result<(), JsValue> {
        self.core.tick(timestamp_ms).map_err(js_err)
    }

    /// Advance one generation now, ignoring the clock
    pub fn step(&mut self) {
        self.core.step();
    }

    // === Input ===

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.core.pointer_move(x, y).map_err(js_err)
    }

    pub fn pointer_leave(&mut self) {
        self.core.pointer_leave();
    }

    /// Returns the stroke intent chosen from the cell under the pointer
    pub fn begin_stroke(&mut self, x: f64, y: f64) -> Result<Intent, JsValue> {
        self.core.begin_stroke(x, y).map_err(js_err)
    }

    pub fn end_stroke(&mut self) {
        self.core.end_stroke();
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.core.begin_drag(x, y).map_err(js_err)
    }

    pub fn end_drag(&mut self) {
        self.core.end_drag();
    }

    /// Wheel zoom anchored at the pointer
    pub fn zoom_at(&mut self, delta: f64, x: f64, y: f64) -> Result<(), JsValue> {
        self.core.zoom_at(delta, x, y).map_err(js_err)
    }

    pub fn nudge(&mut self, dx: i32, dy: i32) {
        self.core.nudge(dx, dy);
    }

    /// Display element size in CSS pixels
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.core.resize(width, height).map_err(js_err)
    }

    // === Patterns ===

    pub fn select_pattern(&mut self, name: String) -> Result<(), JsValue> {
        self.core.select_pattern(&name).map_err(js_err)
    }

    pub fn rotate_pattern(&mut self) {
        self.core.rotate_pattern();
    }

    #[wasm_bindgen(getter)]
    pub fn selected_pattern(&self) -> String {
        self.core.selected_pattern().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn pattern_orientation(&self) -> u8 {
        self.core.pattern_orientation()
    }

    pub fn load_pattern_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_pattern_bundle_json(&json).map_err(js_err)
    }

    pub fn get_pattern_manifest_json(&self) -> String {
        self.core.pattern_manifest_json()
    }

    // === Cells ===

    /// Replace the live set from flat `[x0, y0, x1, y1, ...]`
    pub fn import_cells(&mut self, flat: Vec<i32>) -> Result<(), JsValue> {
        self.core.import_cells(&flat).map_err(js_err)
    }

    pub fn export_cells(&self) -> Vec<i32> {
        self.core.export_cells()
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn alive(&self) -> u32 {
        self.core.grid().len() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.core.grid().generation()
    }

    // === Run state ===

    pub fn set_running(&mut self, running: bool) {
        self.core.set_running(running);
    }

    pub fn toggle_running(&mut self) -> bool {
        self.core.toggle_running()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.core.is_running()
    }

    pub fn set_rate(&mut self, hz: f64) -> Result<(), JsValue> {
        self.core.set_rate(hz).map_err(js_err)
    }

    #[wasm_bindgen(getter)]
    pub fn rate(&self) -> f64 {
        self.core.rate_hz()
    }

    pub fn set_auto_pause(&mut self, enabled: bool) {
        self.core.set_auto_pause(enabled);
    }

    pub fn set_stroke_interpolation(&mut self, enabled: bool) {
        self.core.set_stroke_interpolation(enabled);
    }

    pub fn get_config_json(&self) -> String {
        self.core.config_json()
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === Camera readouts ===

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.core.camera().zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn camera_x(&self) -> f64 {
        self.core.camera().position().x
    }

    #[wasm_bindgen(getter)]
    pub fn camera_y(&self) -> f64 {
        self.core.camera().position().y
    }

    /// `[world_x, world_y]` under a display point
    pub fn screen_to_world(&self, x: f64, y: f64) -> Vec<f64> {
        let (wx, wy) = self.core.camera().screen_to_world(x, y);
        vec![wx, wy]
    }

    /// `[display_x, display_y]` of a world point
    pub fn world_to_screen(&self, x: f64, y: f64) -> Vec<f64> {
        let (sx, sy) = self.core.camera().world_to_screen(x, y);
        vec![sx, sy]
    }

    // === Telemetry / render ===

    pub fn frame_stats(&self) -> FrameStats {
        self.core.frame_stats()
    }

    /// `[x, y, alive, age]` of the hovered cell, empty when the pointer is outside
    pub fn hover(&self) -> Vec<i32> {
        match self.core.hover() {
            Some((x, y, age)) => vec![
                x,
                y,
                age.is_some() as i32,
                age.map(|a| a.min(i32::MAX as u32) as i32).unwrap_or(0),
            ],
            None => Vec::new(),
        }
    }

    /// Fill the cell transfer buffer (`x, y, age` triples); returns the cell count
    pub fn extract_cells(&mut self) -> usize {
        self.core.extract_cells()
    }

    pub fn cells_ptr(&self) -> *const i32 {
        self.core.cells_ptr()
    }

    pub fn age_plane_ptr(&self) -> *const u8 {
        self.core.age_plane_ptr()
    }

    #[wasm_bindgen(getter)]
    pub fn buffer_width(&self) -> u32 {
        self.core.plane_size().0
    }

    #[wasm_bindgen(getter)]
    pub fn buffer_height(&self) -> u32 {
        self.core.plane_size().1
    }

    /// Highlight overlay as flat `[x0, y0, ...]`
    pub fn preview_cells(&self) -> Vec<i32> {
        self.core.preview_cells()
    }

    pub fn render_layout(&self) -> RenderLayout {
        let data = self.core.render_layout_data();
        RenderLayout {
            age_plane_ptr: data.age_plane_ptr as u32,
            age_plane_len: data.age_plane_len as u32,
            plane_width: data.plane_width,
            plane_height: data.plane_height,
            cell_transfer_ptr: data.cell_transfer_ptr as u32,
            cell_transfer_len: data.cell_transfer_len as u32,
            preview_ptr: data.preview_ptr as u32,
            preview_len: data.preview_len as u32,
        }
    }
}
