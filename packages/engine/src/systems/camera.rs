//! ViewportCamera - zoomable window onto the world plane
//!
//! Coordinate spaces:
//! - world:   cell units, unbounded (one buffer pixel = one cell)
//! - buffer:  pixel buffer, `floor(base / zoom)` rounded down to even
//! - screen:  the display element the buffer is stretched over
//!
//! Input only moves the *target* zoom/pan. `tick` eases the current
//! state toward it and re-derives the buffer size.

use crate::core::codec;
use crate::core::EngineError;
use crate::domain::{EngineConfig, Smoothing};

/// Smallest buffer edge; keeps the buffer non-empty and even.
pub const MIN_BUFFER_DIM: u32 = 2;
/// Smallest display edge accepted from resize events.
pub const MIN_DISPLAY_DIM: f64 = 1.0;
/// Pan targets are held within +/- this many cells on each axis. Past the
/// `i32` cell range every visible pixel is already outside the world.
pub const PAN_LIMIT: f64 = 4_294_967_296.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn ensure_finite(values: &[f64], what: &'static str) -> Result<(), EngineError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(EngineError::NonFiniteInput(what))
    }
}

#[derive(Clone, Debug)]
pub struct ViewportCamera {
    base_width: f64,
    base_height: f64,
    display_width: f64,
    display_height: f64,

    zoom: f64,
    target_zoom: f64,
    /// World-space top-left of the buffer
    position: Point,
    target: Point,

    buffer_width: u32,
    buffer_height: u32,
    /// buffer px per screen px, refreshed on tick/resize
    scale: Point,

    min_zoom: f64,
    max_zoom: f64,
    sensitivity: f64,
    smoothing: Smoothing,
    zoom_snap: f64,
    pan_snap: f64,
    key_pan_step: f64,
}

impl ViewportCamera {
    pub fn new(config: &EngineConfig) -> Self {
        let base_width = config.base_width.max(1) as f64;
        let base_height = config.base_height.max(1) as f64;
        let zoom = 1.0f64.clamp(config.min_zoom, config.max_zoom);
        let mut camera = Self {
            base_width,
            base_height,
            display_width: base_width,
            display_height: base_height,
            zoom,
            target_zoom: zoom,
            position: Point::default(),
            target: Point::default(),
            buffer_width: 0,
            buffer_height: 0,
            scale: Point::new(1.0, 1.0),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            sensitivity: config.zoom_sensitivity,
            smoothing: config.smoothing,
            zoom_snap: config.zoom_snap,
            pan_snap: config.pan_snap,
            key_pan_step: config.key_pan_step,
        };
        let (w, h) = camera.buffer_dims_for(zoom);
        camera.buffer_width = w;
        camera.buffer_height = h;
        camera.refresh_scale();
        camera
    }

    // === Input (targets only) ===

    /// Scale the target zoom by `1 - delta * sensitivity`, keeping the world
    /// point under the anchor (screen coords) fixed once the zoom settles.
    pub fn request_zoom(&mut self, delta: f64, anchor_x: f64, anchor_y: f64) -> Result<(), EngineError> {
        ensure_finite(&[delta, anchor_x, anchor_y], "zoom request")?;

        let before = self.scale_for(self.target_zoom);
        let world_x = self.target.x + anchor_x * before.x;
        let world_y = self.target.y + anchor_y * before.y;

        let zoom = (self.target_zoom * (1.0 + delta * -self.sensitivity))
            .clamp(self.min_zoom, self.max_zoom);

        let after = self.scale_for(zoom);
        let target = Point::new(world_x - anchor_x * after.x, world_y - anchor_y * after.y);
        ensure_finite(&[target.x, target.y], "zoom anchor")?;

        self.target_zoom = zoom;
        self.target = target;
        self.clamp_target();
        Ok(())
    }

    /// Move the target pan by `-delta` buffer pixels.
    pub fn request_pan(&mut self, delta_x: f64, delta_y: f64) -> Result<(), EngineError> {
        ensure_finite(&[delta_x, delta_y], "pan request")?;
        self.target.x -= delta_x;
        self.target.y -= delta_y;
        self.clamp_target();
        Ok(())
    }

    /// Drag: like `request_pan` but the view follows without easing.
    pub fn drag_pan(&mut self, delta_x: f64, delta_y: f64) -> Result<(), EngineError> {
        self.request_pan(delta_x, delta_y)?;
        self.position = self.target;
        Ok(())
    }

    /// Keyboard nudge in whole steps (e.g. -1/0/1 per axis).
    pub fn nudge(&mut self, steps_x: i32, steps_y: i32) {
        self.target.x += steps_x as f64 * self.key_pan_step;
        self.target.y += steps_y as f64 * self.key_pan_step;
        self.clamp_target();
    }

    /// Display element was resized. Clamped to at least 1x1.
    pub fn resize_display(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        ensure_finite(&[width, height], "display size")?;
        self.display_width = width.max(MIN_DISPLAY_DIM);
        self.display_height = height.max(MIN_DISPLAY_DIM);
        self.refresh_scale();
        Ok(())
    }

    // === Per-frame ===

    /// Ease current zoom/pan toward target, then re-derive the buffer size.
    /// Returns true when the buffer dimensions changed.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let t = self.blend_for(dt_ms);

        if self.is_settled() {
            self.zoom = self.target_zoom;
            self.position = self.target;
        } else {
            self.zoom += (self.target_zoom - self.zoom) * t;
            self.position.x += (self.target.x - self.position.x) * t;
            self.position.y += (self.target.y - self.position.y) * t;
        }

        let (w, h) = self.buffer_dims_for(self.zoom);
        let resized = w != self.buffer_width || h != self.buffer_height;
        self.buffer_width = w;
        self.buffer_height = h;
        self.refresh_scale();
        resized
    }

    fn blend_for(&self, dt_ms: f64) -> f64 {
        match self.smoothing {
            Smoothing::Blend { factor } => factor,
            Smoothing::Decay { rate_per_ms } => {
                if dt_ms.is_finite() && dt_ms > 0.0 {
                    1.0 - (-rate_per_ms * dt_ms).exp()
                } else {
                    0.0
                }
            }
        }
    }

    /// Within snap distance of the target on zoom and both pan axes
    pub fn is_settled(&self) -> bool {
        (self.target_zoom - self.zoom).abs() < self.zoom_snap
            && (self.target.x - self.position.x).abs() < self.pan_snap
            && (self.target.y - self.position.y).abs() < self.pan_snap
    }

    // === Transforms (current state) ===

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        (self.position.x + sx * self.scale.x, self.position.y + sy * self.scale.y)
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        ((wx - self.position.x) / self.scale.x, (wy - self.position.y) / self.scale.y)
    }

    /// Screen delta or position in buffer pixels
    pub fn screen_to_buffer(&self, sx: f64, sy: f64) -> (f64, f64) {
        (sx * self.scale.x, sy * self.scale.y)
    }

    /// Cell under a screen point
    pub fn screen_to_cell(&self, sx: f64, sy: f64) -> Result<(i32, i32), EngineError> {
        ensure_finite(&[sx, sy], "screen position")?;
        let (wx, wy) = self.screen_to_world(sx, sy);
        Ok((codec::cell_from_world(wx)?, codec::cell_from_world(wy)?))
    }

    /// World cell drawn at buffer pixel (0, 0)
    pub fn buffer_origin(&self) -> (i64, i64) {
        (self.position.x.floor() as i64, self.position.y.floor() as i64)
    }

    // === Readouts ===

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn target_zoom(&self) -> f64 {
        self.target_zoom
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target_position(&self) -> Point {
        self.target
    }

    pub fn buffer_size(&self) -> (u32, u32) {
        (self.buffer_width, self.buffer_height)
    }

    pub fn display_size(&self) -> (f64, f64) {
        (self.display_width, self.display_height)
    }

    /// Current zoom on a log scale: 0 at min_zoom, 1 at max_zoom
    pub fn normalized_zoom(&self) -> f64 {
        let (lo, hi) = (self.min_zoom.ln(), self.max_zoom.ln());
        if hi <= lo {
            return 1.0;
        }
        ((self.zoom.ln() - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    // === Internals ===

    fn buffer_dims_for(&self, zoom: f64) -> (u32, u32) {
        let quantize = |base: f64| (((base / zoom).floor() as u32) & !1).max(MIN_BUFFER_DIM);
        (quantize(self.base_width), quantize(self.base_height))
    }

    fn clamp_target(&mut self) {
        self.target.x = self.target.x.clamp(-PAN_LIMIT, PAN_LIMIT);
        self.target.y = self.target.y.clamp(-PAN_LIMIT, PAN_LIMIT);
    }

    fn scale_for(&self, zoom: f64) -> Point {
        let (w, h) = self.buffer_dims_for(zoom);
        Point::new(w as f64 / self.display_width, h as f64 / self.display_height)
    }

    fn refresh_scale(&mut self) {
        self.scale = Point::new(
            self.buffer_width as f64 / self.display_width,
            self.buffer_height as f64 / self.display_height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn camera() -> ViewportCamera {
        ViewportCamera::new(&EngineConfig::default())
    }

    fn settle(camera: &mut ViewportCamera) -> usize {
        for i in 0..500 {
            camera.tick(16.0);
            if camera.zoom() == camera.target_zoom() && camera.position() == camera.target_position() {
                return i;
            }
        }
        panic!("camera did not settle");
    }

    #[test]
    fn starts_at_unit_zoom_with_base_buffer() {
        let cam = camera();
        assert_eq!(cam.zoom(), 1.0);
        assert_eq!(cam.buffer_size(), (800, 600));
        assert_eq!(cam.screen_to_world(10.0, 20.0), (10.0, 20.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed_after_convergence() {
        let mut cam = camera();
        cam.request_pan(-37.5, 12.25).unwrap();
        settle(&mut cam);

        let anchor = (213.0, 157.0);
        let before = cam.screen_to_world(anchor.0, anchor.1);

        cam.request_zoom(-500.0, anchor.0, anchor.1).unwrap();
        assert!((cam.target_zoom() - 1.25).abs() < EPS);
        settle(&mut cam);

        let after = cam.screen_to_world(anchor.0, anchor.1);
        assert!((after.0 - before.0).abs() < EPS, "{after:?} vs {before:?}");
        assert!((after.1 - before.1).abs() < EPS, "{after:?} vs {before:?}");
        assert_eq!(cam.buffer_size(), (640, 480));
    }

    #[test]
    fn stacked_zooms_keep_the_anchor() {
        let mut cam = camera();
        cam.resize_display(1024.0, 768.0).unwrap();
        cam.tick(16.0);
        let anchor = (700.0, 90.0);
        let before = cam.screen_to_world(anchor.0, anchor.1);

        cam.request_zoom(-300.0, anchor.0, anchor.1).unwrap();
        cam.tick(16.0);
        cam.request_zoom(-900.0, anchor.0, anchor.1).unwrap();
        cam.request_zoom(250.0, anchor.0, anchor.1).unwrap();
        settle(&mut cam);

        let after = cam.screen_to_world(anchor.0, anchor.1);
        assert!((after.0 - before.0).abs() < 1e-6);
        assert!((after.1 - before.1).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        cam.request_zoom(-1.0e9, 0.0, 0.0).unwrap();
        assert_eq!(cam.target_zoom(), 4.0);
        cam.request_zoom(1.0e9, 0.0, 0.0).unwrap();
        assert_eq!(cam.target_zoom(), 0.05);
        settle(&mut cam);
        let (w, h) = cam.buffer_size();
        assert!(w >= 15998 && w <= 16000 && w % 2 == 0);
        assert!(h >= 11998 && h <= 12000 && h % 2 == 0);
    }

    #[test]
    fn current_state_eases_then_snaps() {
        let mut cam = camera();
        cam.request_zoom(-1000.0, 0.0, 0.0).unwrap();
        cam.tick(16.0);
        // 30% of the way from 1.0 to 1.5
        assert!((cam.zoom() - 1.15).abs() < EPS);
        let ticks = settle(&mut cam);
        assert!(ticks > 3);
        assert_eq!(cam.zoom(), 1.5);
    }

    #[test]
    fn tick_reports_buffer_resizes() {
        let mut cam = camera();
        assert!(!cam.tick(16.0));
        cam.request_zoom(-1000.0, 0.0, 0.0).unwrap();
        assert!(cam.tick(16.0));
        let (w, h) = cam.buffer_size();
        assert_eq!(w % 2, 0);
        assert_eq!(h % 2, 0);
    }

    #[test]
    fn buffer_never_collapses() {
        let config = EngineConfig { base_width: 1, base_height: 3, ..EngineConfig::default() };
        let mut cam = ViewportCamera::new(&config);
        cam.request_zoom(-1.0e9, 0.0, 0.0).unwrap();
        settle(&mut cam);
        assert_eq!(cam.buffer_size(), (MIN_BUFFER_DIM, MIN_BUFFER_DIM));
    }

    #[test]
    fn degenerate_display_is_clamped() {
        let mut cam = camera();
        cam.resize_display(0.0, -5.0).unwrap();
        assert_eq!(cam.display_size(), (1.0, 1.0));
        let (wx, wy) = cam.screen_to_world(1.0, 1.0);
        assert!(wx.is_finite() && wy.is_finite());
        let (sx, sy) = cam.world_to_screen(wx, wy);
        assert!((sx - 1.0).abs() < EPS && (sy - 1.0).abs() < EPS);
    }

    #[test]
    fn non_finite_input_is_rejected_without_side_effects() {
        let mut cam = camera();
        assert!(cam.request_zoom(f64::NAN, 0.0, 0.0).is_err());
        assert!(cam.request_zoom(1.0, f64::INFINITY, 0.0).is_err());
        assert!(cam.request_zoom(1.0e9, f64::MAX, 0.0).is_err());
        assert!(cam.request_pan(0.0, f64::NAN).is_err());
        assert!(cam.resize_display(f64::NAN, 10.0).is_err());
        assert!(cam.screen_to_cell(f64::NAN, 0.0).is_err());
        assert_eq!(cam.target_zoom(), 1.0);
        assert_eq!(cam.target_position(), Point::default());
        assert_eq!(cam.display_size(), (800.0, 600.0));
    }

    #[test]
    fn transforms_are_inverse() {
        let mut cam = camera();
        cam.resize_display(1280.0, 720.0).unwrap();
        cam.request_zoom(-700.0, 300.0, 200.0).unwrap();
        cam.request_pan(13.0, -4.5).unwrap();
        for _ in 0..3 {
            cam.tick(16.0);
        }
        for &(sx, sy) in &[(0.0, 0.0), (12.5, 700.0), (1279.0, 1.0)] {
            let (wx, wy) = cam.screen_to_world(sx, sy);
            let (bx, by) = cam.world_to_screen(wx, wy);
            assert!((bx - sx).abs() < 1e-6 && (by - sy).abs() < 1e-6);
        }
    }

    #[test]
    fn pan_moves_target_and_drag_moves_both() {
        let mut cam = camera();
        cam.request_pan(10.0, -4.0).unwrap();
        assert_eq!(cam.target_position(), Point::new(-10.0, 4.0));
        assert_eq!(cam.position(), Point::default());

        cam.drag_pan(5.0, 5.0).unwrap();
        assert_eq!(cam.position(), Point::new(-15.0, -1.0));
        assert_eq!(cam.target_position(), cam.position());
    }

    #[test]
    fn pan_target_is_held_inside_the_limit() {
        let mut cam = camera();
        cam.drag_pan(1.0e300, -1.0e300).unwrap();
        assert_eq!(cam.position(), Point::new(-PAN_LIMIT, PAN_LIMIT));
        assert_eq!(cam.buffer_origin(), (-(1i64 << 32), 1i64 << 32));
        assert!(cam.screen_to_cell(0.0, 0.0).is_err());

        cam.request_pan(-1.0e300, 0.0).unwrap();
        assert_eq!(cam.target_position().x, PAN_LIMIT);
        cam.request_zoom(-1.0e9, 1.0e300, 0.0).unwrap();
        assert!(cam.target_position().x.abs() <= PAN_LIMIT);

        let config = EngineConfig { key_pan_step: 1.0e300, ..EngineConfig::default() };
        let mut cam = ViewportCamera::new(&config);
        cam.nudge(-1, 1);
        assert_eq!(cam.target_position(), Point::new(-PAN_LIMIT, PAN_LIMIT));
    }

    #[test]
    fn nudge_uses_key_step() {
        let mut cam = camera();
        cam.nudge(1, -1);
        assert_eq!(cam.target_position(), Point::new(2.0, -2.0));
    }

    #[test]
    fn screen_to_cell_floors_negative_positions() {
        let mut cam = camera();
        cam.drag_pan(10.5, 0.0).unwrap();
        // world x = -10.5 + 3.0
        assert_eq!(cam.screen_to_cell(3.0, 0.0).unwrap(), (-8, 0));
        assert_eq!(cam.buffer_origin(), (-11, 0));
    }

    #[test]
    fn display_scaling_maps_into_buffer_pixels() {
        let mut cam = camera();
        cam.resize_display(400.0, 300.0).unwrap();
        assert_eq!(cam.screen_to_buffer(100.0, 100.0), (200.0, 200.0));
        assert_eq!(cam.screen_to_world(100.0, 100.0), (200.0, 200.0));
    }

    #[test]
    fn decay_smoothing_depends_on_elapsed_time() {
        let config = EngineConfig {
            smoothing: Smoothing::Decay { rate_per_ms: 0.01 },
            ..EngineConfig::default()
        };
        let mut slow = ViewportCamera::new(&config);
        let mut fast = ViewportCamera::new(&config);
        slow.request_zoom(-1000.0, 0.0, 0.0).unwrap();
        fast.request_zoom(-1000.0, 0.0, 0.0).unwrap();

        slow.tick(0.0);
        assert_eq!(slow.zoom(), 1.0);

        for _ in 0..4 {
            slow.tick(8.0);
        }
        for _ in 0..2 {
            fast.tick(16.0);
        }
        // Same elapsed time, same result
        assert!((slow.zoom() - fast.zoom()).abs() < 1e-12);
    }

    #[test]
    fn normalized_zoom_spans_the_range() {
        let mut cam = camera();
        cam.request_zoom(1.0e9, 0.0, 0.0).unwrap();
        settle(&mut cam);
        assert!(cam.normalized_zoom().abs() < EPS);
        cam.request_zoom(-1.0e9, 0.0, 0.0).unwrap();
        settle(&mut cam);
        assert!((cam.normalized_zoom() - 1.0).abs() < EPS);
    }
}
