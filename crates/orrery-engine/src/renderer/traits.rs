//! Contracts between the frame traversal and whatever draws pixels.
//!
//! The engine never touches a device context. It describes each frame as an
//! ordered stream of [`DrawRequest`]s to a [`Backend`] and a handful of text
//! labels to a [`TextOverlay`]. A native GL/Metal/WebGPU front end implements
//! both; [`super::command::CommandBuffer`] records them for the wire protocol and tests.

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

use crate::api::types::Rgba;
use crate::core::starfield::StarfieldPoint;
use crate::error::BackendError;

/// Whether a primitive takes part in lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Lit,
    /// Flat color, ignores lights. Stars, orbit paths, highlight shells.
    Unlit,
}

/// One point light plus ambient/diffuse/specular intensities (white light).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lighting {
    /// World-space light position.
    pub position: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        // Light sits on the central body.
        Self {
            position: [0.0, 0.0, 0.0],
            ambient: 0.1,
            diffuse: 1.0,
            specular: 1.0,
        }
    }
}

/// Per-frame state handed to the backend before any draw.
/// Color and depth buffers are cleared to `clear_color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSetup {
    pub clear_color: Rgba,
    /// World to eye. Supplied once per frame; draws carry model matrices.
    pub view: Mat4,
    pub projection: Mat4,
    pub lighting: Lighting,
}

/// A single primitive, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawRequest<'a> {
    /// Screen-constant points, always unlit.
    Points {
        points: &'a [StarfieldPoint],
        color: Rgba,
        point_size: f32,
    },
    /// Sphere of `radius` centered on the transform's origin.
    Sphere {
        transform: Mat4,
        radius: f32,
        color: Rgba,
        shading: Shading,
    },
    /// Flat ring in the local XZ plane, centered on the origin.
    Annulus {
        transform: Mat4,
        inner_radius: f32,
        outer_radius: f32,
        color: Rgba,
        shading: Shading,
    },
    /// Closed polyline of `segments` points on a circle in the local XZ plane.
    /// Always unlit.
    LineLoop {
        transform: Mat4,
        radius: f32,
        segments: u32,
        color: Rgba,
    },
}

/// Graphics backend. Calls arrive as `begin_frame`, any number of `draw`, `end_frame`.
/// A refusal abandons the frame; the next frame starts fresh with `begin_frame`.
pub trait Backend {
    fn begin_frame(&mut self, setup: &FrameSetup) -> Result<(), BackendError>;
    fn draw(&mut self, request: &DrawRequest<'_>) -> Result<(), BackendError>;
    fn end_frame(&mut self) -> Result<(), BackendError>;
}

/// Text rendering capability. `anchor` is in window pixels, top-left origin.
///
/// `begin_frame` arrives once per frame before any label. Overlays that keep
/// labels around until presented drop the previous frame's labels there.
pub trait TextOverlay {
    fn begin_frame(&mut self) {}
    fn draw_label(&mut self, text: &str, anchor: Vec2) -> Result<(), BackendError>;
}
