use glam::{Mat4, Vec2};
use serde::Serialize;

use super::traits::{Backend, DrawRequest, FrameSetup, Shading, TextOverlay};
use crate::api::types::Rgba;
use crate::core::starfield::StarfieldPoint;
use crate::error::BackendError;

/// Owned copy of a [`DrawRequest`]. Point data lives in the buffer's star list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Points {
        /// Offset into [`CommandBuffer::stars`].
        first: usize,
        count: usize,
        color: Rgba,
        point_size: f32,
    },
    Sphere {
        transform: Mat4,
        radius: f32,
        color: Rgba,
        shading: Shading,
    },
    Annulus {
        transform: Mat4,
        inner_radius: f32,
        outer_radius: f32,
        color: Rgba,
        shading: Shading,
    },
    LineLoop {
        transform: Mat4,
        radius: f32,
        segments: u32,
        color: Rgba,
    },
}

impl DrawCommand {
    /// Points and line loops are always unlit.
    pub fn shading(&self) -> Shading {
        match *self {
            DrawCommand::Sphere { shading, .. } | DrawCommand::Annulus { shading, .. } => shading,
            DrawCommand::Points { .. } | DrawCommand::LineLoop { .. } => Shading::Unlit,
        }
    }
}

/// Backend that records one frame at a time.
/// `begin_frame` discards the previous recording.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    setup: Option<FrameSetup>,
    commands: Vec<DrawCommand>,
    stars: Vec<StarfieldPoint>,
    finished: bool,
    /// Refuse every draw after this many in a frame.
    refuse_after: Option<usize>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `n` draws per frame, refuse the rest. For exercising failure paths.
    pub fn refuse_after(mut self, n: usize) -> Self {
        self.refuse_after = Some(n);
        self
    }

    pub fn setup(&self) -> Option<&FrameSetup> {
        self.setup.as_ref()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn stars(&self) -> &[StarfieldPoint] {
        &self.stars
    }

    /// Whether the current recording reached `end_frame`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn clear(&mut self) {
        self.setup = None;
        self.commands.clear();
        self.stars.clear();
        self.finished = false;
    }
}

impl Backend for CommandBuffer {
    fn begin_frame(&mut self, setup: &FrameSetup) -> Result<(), BackendError> {
        self.clear();
        self.setup = Some(*setup);
        Ok(())
    }

    fn draw(&mut self, request: &DrawRequest<'_>) -> Result<(), BackendError> {
        if self.setup.is_none() {
            return Err(BackendError::new("draw outside of a frame"));
        }
        if let Some(limit) = self.refuse_after {
            if self.commands.len() >= limit {
                return Err(BackendError::new(format!("draw limit of {limit} reached")));
            }
        }
        let command = match *request {
            DrawRequest::Points { points, color, point_size } => {
                let first = self.stars.len();
                self.stars.extend_from_slice(points);
                DrawCommand::Points {
                    first,
                    count: points.len(),
                    color,
                    point_size,
                }
            }
            DrawRequest::Sphere { transform, radius, color, shading } => DrawCommand::Sphere {
                transform,
                radius,
                color,
                shading,
            },
            DrawRequest::Annulus {
                transform,
                inner_radius,
                outer_radius,
                color,
                shading,
            } => DrawCommand::Annulus {
                transform,
                inner_radius,
                outer_radius,
                color,
                shading,
            },
            DrawRequest::LineLoop { transform, radius, segments, color } => DrawCommand::LineLoop {
                transform,
                radius,
                segments,
                color,
            },
        };
        self.commands.push(command);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), BackendError> {
        if self.setup.is_none() {
            return Err(BackendError::new("end_frame without begin_frame"));
        }
        self.finished = true;
        Ok(())
    }
}

/// One line of overlay text. Anchor is window pixels, top-left origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub anchor: [f32; 2],
}

/// Text overlay that collects labels for a front end to draw.
#[derive(Debug, Default)]
pub struct LabelBuffer {
    labels: Vec<Label>,
}

impl LabelBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Labels as a JSON array of `{ "text", "anchor": [x, y] }`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.labels)
    }
}

impl TextOverlay for LabelBuffer {
    fn begin_frame(&mut self) {
        self.labels.clear();
    }

    fn draw_label(&mut self, text: &str, anchor: Vec2) -> Result<(), BackendError> {
        self.labels.push(Label {
            text: text.to_string(),
            anchor: anchor.to_array(),
        });
        Ok(())
    }
}
