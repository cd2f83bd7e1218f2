//! Engine configuration
//!
//! Every field has a default, so a host can pass `{}` or only the keys it wants to change.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

/// How the camera's current state chases its target each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Smoothing {
    /// Fixed fraction of the remaining distance per tick (frame-rate dependent).
    Blend { factor: f64 },
    /// `1 - exp(-rate_per_ms * dt)` per tick (frame-rate independent).
    Decay { rate_per_ms: f64 },
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::Blend { factor: 0.30 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pixel-buffer resolution at zoom 1.0
    pub base_width: u32,
    pub base_height: u32,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom change per unit of wheel delta
    pub zoom_sensitivity: f64,
    pub smoothing: Smoothing,
    pub zoom_snap: f64,
    pub pan_snap: f64,
    /// Keyboard nudge distance in cells
    pub key_pan_step: f64,
    pub rate_hz: f64,
    /// Steps the clock may owe before whole intervals are dropped
    pub max_backlog_steps: u32,
    pub auto_pause: bool,
    pub stroke_interpolation: bool,
    pub perf_metrics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_width: 800,
            base_height: 600,
            min_zoom: 0.05,
            max_zoom: 4.0,
            zoom_sensitivity: 0.0005,
            smoothing: Smoothing::default(),
            zoom_snap: 0.001,
            pan_snap: 0.1,
            key_pan_step: 2.0,
            rate_hz: 30.0,
            max_backlog_steps: 8,
            auto_pause: false,
            stroke_interpolation: true,
            perf_metrics: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let bad = |msg: String| Err(EngineError::InvalidConfig(msg));

        if self.base_width == 0 || self.base_height == 0 {
            return bad(format!(
                "base resolution must be non-zero, got {}x{}",
                self.base_width, self.base_height
            ));
        }
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite())
            || self.min_zoom <= 0.0
            || self.min_zoom > self.max_zoom
        {
            return bad(format!(
                "zoom range must satisfy 0 < min <= max, got [{}, {}]",
                self.min_zoom, self.max_zoom
            ));
        }
        if !self.zoom_sensitivity.is_finite() {
            return bad("zoom_sensitivity must be finite".to_string());
        }
        match self.smoothing {
            Smoothing::Blend { factor } if !(factor > 0.0 && factor <= 1.0) => {
                return bad(format!("blend factor must be in (0, 1], got {}", factor));
            }
            Smoothing::Decay { rate_per_ms } if !(rate_per_ms.is_finite() && rate_per_ms > 0.0) => {
                return bad(format!("decay rate must be > 0, got {}", rate_per_ms));
            }
            _ => {}
        }
        if !(self.zoom_snap >= 0.0 && self.pan_snap >= 0.0) {
            return bad("snap thresholds must be >= 0".to_string());
        }
        if !self.key_pan_step.is_finite() {
            return bad("key_pan_step must be finite".to_string());
        }
        if !(self.rate_hz.is_finite() && self.rate_hz > 0.0) {
            return bad(format!("rate_hz must be > 0, got {}", self.rate_hz));
        }
        if self.max_backlog_steps == 0 {
            return bad("max_backlog_steps must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = EngineConfig::from_json(
            r#"{ "base_width": 320, "smoothing": { "mode": "decay", "rate_per_ms": 0.02 } }"#,
        )
        .unwrap();
        assert_eq!(config.base_width, 320);
        assert_eq!(config.base_height, 600);
        assert_eq!(config.smoothing, Smoothing::Decay { rate_per_ms: 0.02 });
    }

    #[test]
    fn rejects_inverted_zoom_range() {
        let err = EngineConfig::from_json(r#"{ "min_zoom": 5.0, "max_zoom": 1.0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_zero_rate_and_bad_blend() {
        assert!(EngineConfig::from_json(r#"{ "rate_hz": 0 }"#).is_err());
        assert!(EngineConfig::from_json(r#"{ "smoothing": { "mode": "blend", "factor": 0 } }"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json("{ nope"),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn json_round_trip() {
        let config = EngineConfig { auto_pause: true, ..EngineConfig::default() };
        assert_eq!(EngineConfig::from_json(&config.to_json()).unwrap(), config);
    }
}
