use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Perspective viewport. Width and height are window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical field of view, degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Viewport {
    /// Width over height. A degenerate height reads as square.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Right-handed, GL clip space (z in [-1, 1]).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect(), self.near, self.far)
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Window-pixel position of a world point, top-left origin.
    /// `None` when the point is behind the eye.
    pub fn project(&self, view_projection: Mat4, world: Vec3) -> Option<Vec2> {
        let clip = view_projection * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        ))
    }
}
