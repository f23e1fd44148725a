//! Flat frame buffer shared with a GPU front end.
//! Must stay in sync with the front end's reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 48 floats]
//! [Draws: max_draws × 28 floats]
//! [Stars: max_stars × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame.
//! The front end reads them from the header to compute offsets dynamically.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::api::config::CapacityConfig;
use crate::core::starfield::StarfieldPoint;
use crate::error::ProtocolError;
use crate::renderer::command::{CommandBuffer, DrawCommand};
use crate::renderer::traits::Shading;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 48;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_DRAWS: usize = 2;
pub const HEADER_DRAW_COUNT: usize = 3;
pub const HEADER_MAX_STARS: usize = 4;
pub const HEADER_STAR_COUNT: usize = 5;
/// Clear color, 4 floats.
pub const HEADER_CLEAR_COLOR: usize = 6;
/// Light position, 3 floats.
pub const HEADER_LIGHT_POSITION: usize = 10;
pub const HEADER_LIGHT_AMBIENT: usize = 13;
pub const HEADER_LIGHT_DIFFUSE: usize = 14;
pub const HEADER_LIGHT_SPECULAR: usize = 15;
/// View matrix, 16 floats column-major.
pub const HEADER_VIEW: usize = 16;
/// Projection matrix, 16 floats column-major.
pub const HEADER_PROJECTION: usize = 32;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Draw record `kind` values.
pub const KIND_POINTS: f32 = 0.0;
pub const KIND_SPHERE: f32 = 1.0;
pub const KIND_ANNULUS: f32 = 2.0;
pub const KIND_LINE_LOOP: f32 = 3.0;

/// Floats per star record: x, y, z, size (fixed wire format).
pub const STAR_FLOATS: usize = 4;

/// One draw on the wire. 28 floats = 112 bytes.
///
/// | kind      | param_a    | param_b      | count          |
/// |-----------|------------|--------------|----------------|
/// | points    | point size | first star   | star count     |
/// | sphere    | radius     | 0            | 0              |
/// | annulus   | inner      | outer        | 0              |
/// | line loop | radius     | 0            | segments       |
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawRecord {
    pub kind: f32,
    /// 1.0 lit, 0.0 unlit.
    pub lit: f32,
    pub param_a: f32,
    pub param_b: f32,
    pub count: f32,
    pub _pad0: f32,
    pub _pad1: f32,
    pub _pad2: f32,
    pub color: [f32; 4],
    /// Model matrix, column-major.
    pub model: [f32; 16],
}

impl DrawRecord {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Encode a command. Points records are clipped to the first `star_limit` stars.
    pub fn from_command(command: &DrawCommand, star_limit: usize) -> Self {
        let lit = if command.shading() == Shading::Lit { 1.0 } else { 0.0 };
        match *command {
            DrawCommand::Points { first, count, color, point_size } => {
                let visible = count.min(star_limit.saturating_sub(first));
                Self {
                    kind: KIND_POINTS,
                    param_a: point_size,
                    param_b: first as f32,
                    count: visible as f32,
                    color: color.to_array(),
                    model: Mat4::IDENTITY.to_cols_array(),
                    ..Default::default()
                }
            }
            DrawCommand::Sphere { transform, radius, color, .. } => Self {
                kind: KIND_SPHERE,
                lit,
                param_a: radius,
                color: color.to_array(),
                model: transform.to_cols_array(),
                ..Default::default()
            },
            DrawCommand::Annulus {
                transform,
                inner_radius,
                outer_radius,
                color,
                ..
            } => Self {
                kind: KIND_ANNULUS,
                lit,
                param_a: inner_radius,
                param_b: outer_radius,
                color: color.to_array(),
                model: transform.to_cols_array(),
                ..Default::default()
            },
            DrawCommand::LineLoop { transform, radius, segments, color } => Self {
                kind: KIND_LINE_LOOP,
                param_a: radius,
                count: segments as f32,
                color: color.to_array(),
                model: transform.to_cols_array(),
                ..Default::default()
            },
        }
    }
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum draw records.
    pub max_draws: usize,
    /// Maximum star records.
    pub max_stars: usize,

    /// Size of draw data section in floats.
    pub draw_data_floats: usize,
    /// Size of star data section in floats.
    pub star_data_floats: usize,

    /// Offset (in floats) where draw data begins.
    pub draw_data_offset: usize,
    /// Offset (in floats) where star data begins.
    pub star_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_draws: usize, max_stars: usize) -> Self {
        let draw_data_floats = max_draws * DrawRecord::FLOATS;
        let star_data_floats = max_stars * STAR_FLOATS;

        let draw_data_offset = HEADER_FLOATS;
        let star_data_offset = draw_data_offset + draw_data_floats;

        let buffer_total_floats = star_data_offset + star_data_floats;

        Self {
            max_draws,
            max_stars,
            draw_data_floats,
            star_data_floats,
            draw_data_offset,
            star_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &CapacityConfig) -> Self {
        Self::new(config.max_draws, config.max_stars)
    }

    /// A zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }
}

/// What made it into the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedCounts {
    pub draws: usize,
    pub stars: usize,
    /// Some draws or stars did not fit.
    pub truncated: bool,
}

/// Write a recorded frame into `buffer`. Records beyond capacity are dropped
/// with a warning. A recording that never reached `end_frame` packs as an empty frame.
pub fn pack_frame(
    layout: &ProtocolLayout,
    frame_counter: u64,
    recording: &CommandBuffer,
    buffer: &mut [f32],
) -> Result<PackedCounts, ProtocolError> {
    if buffer.len() < layout.buffer_total_floats {
        return Err(ProtocolError {
            needed: layout.buffer_total_floats,
            actual: buffer.len(),
        });
    }

    let header = &mut buffer[..HEADER_FLOATS];
    header.fill(0.0);
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = frame_counter as f32;
    header[HEADER_MAX_DRAWS] = layout.max_draws as f32;
    header[HEADER_MAX_STARS] = layout.max_stars as f32;

    let Some(setup) = recording.setup().filter(|_| recording.is_finished()) else {
        return Ok(PackedCounts::default());
    };

    header[HEADER_CLEAR_COLOR..HEADER_CLEAR_COLOR + 4].copy_from_slice(&setup.clear_color.to_array());
    header[HEADER_LIGHT_POSITION..HEADER_LIGHT_POSITION + 3].copy_from_slice(&setup.lighting.position);
    header[HEADER_LIGHT_AMBIENT] = setup.lighting.ambient;
    header[HEADER_LIGHT_DIFFUSE] = setup.lighting.diffuse;
    header[HEADER_LIGHT_SPECULAR] = setup.lighting.specular;
    header[HEADER_VIEW..HEADER_VIEW + 16].copy_from_slice(&setup.view.to_cols_array());
    header[HEADER_PROJECTION..HEADER_PROJECTION + 16].copy_from_slice(&setup.projection.to_cols_array());

    let commands = recording.commands();
    let stars = recording.stars();
    let draw_count = commands.len().min(layout.max_draws);
    let star_count = stars.len().min(layout.max_stars);
    let truncated = draw_count < commands.len() || star_count < stars.len();
    if truncated {
        log::warn!(
            "Frame truncated: {}/{} draws, {}/{} stars fit",
            draw_count,
            commands.len(),
            star_count,
            stars.len()
        );
    }

    let records: Vec<DrawRecord> = commands[..draw_count]
        .iter()
        .map(|c| DrawRecord::from_command(c, star_count))
        .collect();
    let draw_end = layout.draw_data_offset + draw_count * DrawRecord::FLOATS;
    buffer[layout.draw_data_offset..draw_end].copy_from_slice(bytemuck::cast_slice(&records));

    let star_floats: &[f32] = bytemuck::cast_slice::<StarfieldPoint, f32>(&stars[..star_count]);
    buffer[layout.star_data_offset..layout.star_data_offset + star_floats.len()].copy_from_slice(star_floats);

    buffer[HEADER_DRAW_COUNT] = draw_count as f32;
    buffer[HEADER_STAR_COUNT] = star_count as f32;

    Ok(PackedCounts {
        draws: draw_count,
        stars: star_count,
        truncated,
    })
}
