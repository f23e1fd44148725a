use serde::{Deserialize, Serialize};

use crate::core::starfield::StarfieldConfig;
use crate::core::time::ClockConfig;
use crate::systems::camera::CameraConfig;
use crate::systems::render::RenderConfig;

/// Wire-buffer capacities for the packed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    /// Maximum draw records per frame (default: 256).
    pub max_draws: usize,
    /// Maximum star records per frame (default: 2048).
    pub max_stars: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            max_draws: 256,
            max_stars: 2048,
        }
    }
}

/// Configuration for the engine. Every field has a default, so a JSON
/// document only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub starfield: StarfieldConfig,
    pub clock: ClockConfig,
    /// Sleep between native frames, in milliseconds (default: 10).
    pub frame_wait_ms: u64,
    pub capacity: CapacityConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            render: RenderConfig::default(),
            starfield: StarfieldConfig::default(),
            clock: ClockConfig::default(),
            frame_wait_ms: 10,
            capacity: CapacityConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::ClockMode;

    #[test]
    fn empty_json_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.frame_wait_ms, 10);
        assert_eq!(config.camera.default_zoom, -50.0);
        assert_eq!(config.render.orbit_segments, 100);
        assert_eq!(config.starfield.count, 1000);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let json = r#"{
            "camera": { "drag_sensitivity": 0.25 },
            "clock": { "mode": "since_start", "time_scale": 100.0 },
            "render": { "hud": { "title": "Solar System Simulation" } },
            "starfield": { "count": 10 }
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.camera.drag_sensitivity, 0.25);
        assert_eq!(config.camera.default_pitch, 20.0);
        assert_eq!(config.clock.mode, ClockMode::SinceStart);
        assert_eq!(config.render.hud.title, "Solar System Simulation");
        assert!(config.render.hud.enabled);
        assert_eq!(config.starfield.count, 10);
        assert_eq!(config.starfield.seed, 42);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(EngineConfig::from_json("{ \"camera\": 3 }").is_err());
    }
}
