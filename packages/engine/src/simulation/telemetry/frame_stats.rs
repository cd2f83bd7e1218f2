use wasm_bindgen::prelude::*;

/// Telemetry published after every tick (HUD, audio mapping)
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub(super) births: u32,
    pub(super) survivors: u32,
    pub(super) alive: u32,
    pub(super) generation: u64,
    pub(super) stepped: bool,
    pub(super) zoom: f64,
    pub(super) normalized_zoom: f64,
    pub(super) visible: u32,
    pub(super) visible_left: u32,
    pub(super) visible_right: u32,
    pub(super) running: bool,
}

#[wasm_bindgen]
impl FrameStats {
    /// Births in the last generation (tally == 3, reborn cells included)
    #[wasm_bindgen(getter)]
    pub fn births(&self) -> u32 { self.births }
    #[wasm_bindgen(getter)]
    pub fn survivors(&self) -> u32 { self.survivors }
    #[wasm_bindgen(getter)]
    pub fn alive(&self) -> u32 { self.alive }
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 { self.generation }
    /// A generation advanced during the last tick
    #[wasm_bindgen(getter)]
    pub fn stepped(&self) -> bool { self.stepped }
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 { self.zoom }
    /// 0 at min zoom, 1 at max zoom, log scale
    #[wasm_bindgen(getter)]
    pub fn normalized_zoom(&self) -> f64 { self.normalized_zoom }
    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> u32 { self.visible }
    #[wasm_bindgen(getter)]
    pub fn visible_left(&self) -> u32 { self.visible_left }
    #[wasm_bindgen(getter)]
    pub fn visible_right(&self) -> u32 { self.visible_right }
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.running }
}
