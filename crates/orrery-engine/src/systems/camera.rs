//! Orbiting view camera driven by pointer drags and scroll.
//!
//! Orientation is kept as pitch/yaw in degrees. Pitch is clamped, yaw is not
//! normalized, and zoom is a signed distance along the view axis with no limits.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::queue::{PointerButton, ScrollDirection};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_pitch: f32,
    pub default_yaw: f32,
    /// More negative is farther away.
    pub default_zoom: f32,
    /// Degrees per pixel of drag.
    pub drag_sensitivity: f32,
    pub scroll_step: f32,
    /// Pitch stays within ±this many degrees.
    pub pitch_limit: f32,
    /// Fixed eye offset applied before orientation. May be 0.
    pub eye_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_pitch: 20.0,
            default_yaw: 0.0,
            default_zoom: -50.0,
            drag_sensitivity: 0.5,
            scroll_step: 1.0,
            pitch_limit: 90.0,
            eye_distance: 50.0,
        }
    }
}

/// Whether a primary-button drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position at the last processed event.
        last: Vec2,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    config: CameraConfig,
    pitch: f32,
    yaw: f32,
    zoom: f32,
    drag: DragState,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            pitch: config.default_pitch.clamp(-config.pitch_limit, config.pitch_limit),
            yaw: config.default_yaw,
            zoom: config.default_zoom,
            drag: DragState::Idle,
        }
    }

    /// Primary button starts a drag. Other buttons are ignored.
    pub fn pointer_down(&mut self, button: PointerButton, position: Vec2) {
        if button == PointerButton::Primary {
            self.drag = DragState::Dragging { last: position };
        }
    }

    /// Rotates while dragging; ignored when idle.
    pub fn pointer_move(&mut self, position: Vec2) {
        let DragState::Dragging { last } = self.drag else {
            return;
        };
        let delta = position - last;
        let k = self.config.drag_sensitivity;
        self.yaw += delta.x * k;
        self.pitch = (self.pitch + delta.y * k).clamp(-self.config.pitch_limit, self.config.pitch_limit);
        self.drag = DragState::Dragging { last: position };
    }

    pub fn pointer_up(&mut self, button: PointerButton) {
        if button == PointerButton::Primary {
            self.drag = DragState::Idle;
        }
    }

    /// Zoom in on `Up`, out on `Down`. Works in any drag state.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => self.zoom += self.config.scroll_step,
            ScrollDirection::Down => self.zoom -= self.config.scroll_step,
        }
    }

    /// Back to the startup orientation, not dragging.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// `T(0,0,-eye) · Rx(pitch) · Ry(yaw) · T(0,0,zoom)`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.config.eye_distance))
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_translation(Vec3::new(0.0, 0.0, self.zoom))
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}
