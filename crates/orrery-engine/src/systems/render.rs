//! Frame traversal: turns (scene, starfield, camera, selection, t) into an
//! ordered stream of draw requests and overlay labels.
//!
//! Per frame: clear, stars, then for each primary in table order its orbit
//! path, highlight shell, body, ring, label and satellites, then the HUD.
//! Reads state only, so an abandoned frame leaves nothing to undo.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::types::Rgba;
use crate::core::orbit::Transform;
use crate::core::scene::{CelestialBody, Scene};
use crate::core::starfield::Starfield;
use crate::error::{BackendError, EntityRef, RenderError};
use crate::renderer::camera::Viewport;
use crate::renderer::traits::{Backend, DrawRequest, FrameSetup, Lighting, Shading, TextOverlay};
use crate::systems::camera::CameraController;
use crate::systems::hud::{hud_lines, HudConfig};
use crate::systems::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba,
    pub orbit: Rgba,
    pub ring: Rgba,
    pub star: Rgba,
    pub highlight: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba::new(0.02, 0.03, 0.07, 1.0),
            orbit: Rgba::new(0.4, 0.4, 0.5, 0.3),
            ring: Rgba::new(0.85, 0.75, 0.6, 0.7),
            star: Rgba::WHITE,
            highlight: Rgba::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub palette: Palette,
    pub viewport: Viewport,
    pub lighting: Lighting,
    pub orbit_segments: u32,
    /// Highlight shell radius relative to the body.
    pub highlight_scale: f32,
    pub ring_inner_scale: f32,
    pub ring_outer_scale: f32,
    /// Ring tilt about the body's local X axis.
    pub ring_tilt_degrees: f32,
    /// Label anchor height above the body center, in body radii.
    pub label_height_scale: f32,
    pub star_point_size: f32,
    pub hud: HudConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            viewport: Viewport::default(),
            lighting: Lighting::default(),
            orbit_segments: 100,
            highlight_scale: 1.1,
            ring_inner_scale: 1.5,
            ring_outer_scale: 2.2,
            ring_tilt_degrees: 30.0,
            label_height_scale: 1.5,
            star_point_size: 2.0,
            hud: HudConfig::default(),
        }
    }
}

/// Everything one frame reads.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a Scene,
    pub starfield: &'a Starfield,
    pub camera: &'a CameraController,
    pub selection: &'a Selection,
    /// Animation time.
    pub t: f64,
    /// Unix time of this frame, for the HUD clock.
    pub wall_seconds: f64,
}

/// Counts of what a completed frame emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draws: usize,
    pub labels: usize,
}

/// Label text for a selected body.
pub fn body_label(body: &CelestialBody) -> String {
    format!("{} - {:.1} AU", body.name, body.orbit_radius)
}

struct Emitter<'b, B: ?Sized, O: ?Sized> {
    backend: &'b mut B,
    overlay: &'b mut O,
    stats: FrameStats,
}

impl<B: Backend + ?Sized, O: TextOverlay + ?Sized> Emitter<'_, B, O> {
    fn draw(&mut self, request: DrawRequest<'_>, what: impl FnOnce() -> String) -> Result<(), RenderError> {
        self.backend
            .draw(&request)
            .map_err(|source| RenderError::Draw { what: what(), source })?;
        self.stats.draws += 1;
        Ok(())
    }

    fn label(&mut self, text: &str, anchor: glam::Vec2) -> Result<(), RenderError> {
        self.overlay
            .draw_label(text, anchor)
            .map_err(|source: BackendError| RenderError::Label {
                text: text.to_string(),
                source,
            })?;
        self.stats.labels += 1;
        Ok(())
    }
}

/// Draw one frame. Stops at the first refusal and reports which step failed.
pub fn render<B, O>(
    frame: &Frame<'_>,
    config: &RenderConfig,
    backend: &mut B,
    overlay: &mut O,
) -> Result<FrameStats, RenderError>
where
    B: Backend + ?Sized,
    O: TextOverlay + ?Sized,
{
    let palette = &config.palette;
    let view = frame.camera.view_matrix();
    let projection = config.viewport.projection_matrix();
    let view_projection = projection * view;

    overlay.begin_frame();
    backend
        .begin_frame(&FrameSetup {
            clear_color: palette.background,
            view,
            projection,
            lighting: config.lighting,
        })
        .map_err(RenderError::Begin)?;

    let mut out = Emitter {
        backend,
        overlay,
        stats: FrameStats::default(),
    };

    if !frame.starfield.is_empty() {
        out.draw(
            DrawRequest::Points {
                points: frame.starfield.points(),
                color: palette.star,
                point_size: config.star_point_size,
            },
            || "starfield".to_string(),
        )?;
    }

    let world = frame.scene.world_transforms(frame.t);
    let ring_tilt = Transform::rotation_x(config.ring_tilt_degrees.to_radians());

    for branch in frame.scene.traverse() {
        let body = branch.body;
        let Some(placement) = world.primary(branch.index) else {
            continue;
        };
        let entity = || EntityRef::body(branch.index, &body.name);
        let selected = frame.selection.is_selected(branch.index);

        if !body.is_central() {
            out.draw(
                DrawRequest::LineLoop {
                    transform: Mat4::IDENTITY,
                    radius: body.orbit_radius,
                    segments: config.orbit_segments,
                    color: palette.orbit,
                },
                || format!("orbit path of {}", entity()),
            )?;
        }

        if selected {
            out.draw(
                DrawRequest::Sphere {
                    transform: placement.orbit.matrix(),
                    radius: body.radius * config.highlight_scale,
                    color: palette.highlight,
                    shading: Shading::Unlit,
                },
                || format!("highlight of {}", entity()),
            )?;
        }

        out.draw(
            DrawRequest::Sphere {
                transform: placement.body.matrix(),
                radius: body.radius,
                color: body.color,
                shading: Shading::Lit,
            },
            || entity().to_string(),
        )?;

        if body.has_ring {
            out.draw(
                DrawRequest::Annulus {
                    transform: placement.body.compose(&ring_tilt).matrix(),
                    inner_radius: body.radius * config.ring_inner_scale,
                    outer_radius: body.radius * config.ring_outer_scale,
                    color: palette.ring,
                    shading: Shading::Lit,
                },
                || format!("ring of {}", entity()),
            )?;
        }

        if selected {
            let above = placement.orbit.position()
                + Vec3::new(0.0, body.radius * config.label_height_scale, 0.0);
            match config.viewport.project(view_projection, above) {
                Some(anchor) => out.label(&body_label(body), anchor)?,
                None => log::trace!("Label for {} is behind the camera", body.name),
            }
        }

        for (sat_index, sat) in branch.satellites() {
            let Some(sat_placement) = world.satellite(sat_index) else {
                continue;
            };
            let sat_entity = || EntityRef::satellite(sat_index, &sat.name);
            out.draw(
                DrawRequest::Sphere {
                    transform: sat_placement.body.matrix(),
                    radius: sat.radius,
                    color: sat.color,
                    shading: Shading::Lit,
                },
                || sat_entity().to_string(),
            )?;
            out.draw(
                DrawRequest::LineLoop {
                    transform: placement.orbit.matrix(),
                    radius: sat.orbit_radius,
                    segments: config.orbit_segments,
                    color: palette.orbit,
                },
                || format!("orbit path of {}", sat_entity()),
            )?;
        }
    }

    for (text, anchor) in hud_lines(&config.hud, &config.viewport, frame.t, frame.wall_seconds) {
        out.label(&text, anchor)?;
    }

    let stats = out.stats;
    out.backend.end_frame().map_err(RenderError::End)?;
    Ok(stats)
}
