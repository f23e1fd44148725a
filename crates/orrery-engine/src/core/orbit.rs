//! Circular orbit model: pure functions of (body parameters, time).
//!
//! Angles are reduced in f64 because `t` may be a Unix timestamp (~1.7e9 s);
//! matrices are built in f32 only after reduction.
use glam::{Mat4, Vec3};
use std::f64::consts::TAU;

/// Affine transform in the right-handed, Y-up world frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(pub Mat4);

impl Transform {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    /// Rotation about the vertical (Y) axis.
    pub fn rotation_y(radians: f32) -> Self {
        Self(Mat4::from_rotation_y(radians))
    }

    /// Rotation about the horizontal (X) axis.
    pub fn rotation_x(radians: f32) -> Self {
        Self(Mat4::from_rotation_x(radians))
    }

    pub fn translation(offset: Vec3) -> Self {
        Self(Mat4::from_translation(offset))
    }

    /// `self ∘ inner`: apply `inner` first, then `self`.
    pub fn compose(&self, inner: &Transform) -> Transform {
        Transform(self.0 * inner.0)
    }

    /// Where this transform puts the local origin.
    pub fn position(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.0.transform_point3(point)
    }

    pub fn matrix(&self) -> Mat4 {
        self.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Orbit angle in radians, in [0, 2π). Zero speed gives exactly 0 for every t.
pub fn orbit_angle(orbit_angular_speed: f64, t: f64) -> f64 {
    if orbit_angular_speed == 0.0 {
        return 0.0;
    }
    let raw = t * orbit_angular_speed;
    if !raw.is_finite() {
        return 0.0;
    }
    raw.rem_euclid(TAU)
}

/// Spin angle in degrees, in [0, 360). `spin_angular_speed` is revolutions per second.
pub fn spin_angle(spin_angular_speed: f64, t: f64) -> f64 {
    if spin_angular_speed == 0.0 {
        return 0.0;
    }
    let raw = t * spin_angular_speed * 360.0;
    if !raw.is_finite() {
        return 0.0;
    }
    raw.rem_euclid(360.0)
}

/// A body's placement relative to the center it orbits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Radians about +Y.
    pub orbit_angle: f64,
    pub orbit_radius: f32,
    /// Degrees about the body's own Y axis.
    pub spin_angle: f64,
}

impl LocalTransform {
    /// Rotate by the orbit angle, then step out along +X. No spin.
    /// Zero radius means a body sitting at its center: identity.
    pub fn orbit(&self) -> Transform {
        if self.orbit_radius == 0.0 {
            return Transform::IDENTITY;
        }
        Transform::rotation_y(self.orbit_angle as f32)
            .compose(&Transform::translation(Vec3::new(self.orbit_radius, 0.0, 0.0)))
    }

    pub fn spin(&self) -> Transform {
        Transform::rotation_y((self.spin_angle as f32).to_radians())
    }

    /// Orbit placement followed by spin in the body's own frame.
    pub fn full(&self) -> Transform {
        self.orbit().compose(&self.spin())
    }
}

/// Local transform of a body at time `t`.
pub fn compute_local_transform(
    orbit_radius: f32,
    orbit_angular_speed: f64,
    spin_angular_speed: f64,
    t: f64,
) -> LocalTransform {
    let orbit_angle = if orbit_radius == 0.0 {
        0.0
    } else {
        orbit_angle(orbit_angular_speed, t)
    };
    LocalTransform {
        orbit_angle,
        orbit_radius,
        spin_angle: spin_angle(spin_angular_speed, t),
    }
}
