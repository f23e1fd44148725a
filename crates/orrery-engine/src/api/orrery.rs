use crate::api::config::EngineConfig;
use crate::core::scene::{Scene, SystemConfig, WorldTransforms};
use crate::core::starfield::Starfield;
use crate::core::time::Clock;
use crate::error::{ConfigurationError, RenderError};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::traits::{Backend, TextOverlay};
use crate::systems::render::{render, Frame, FrameStats};
use crate::systems::simulation::{LoopControl, SimulationState};

/// Result of applying one frame's input and sampling the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    /// Animation time for this frame.
    pub t: f64,
    pub control: LoopControl,
}

/// A frame that was both updated and drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    pub t: f64,
    pub control: LoopControl,
    pub stats: FrameStats,
}

/// Owns everything one star system needs between frames: the validated scene,
/// the starfield, camera and selection, the clock and pending input.
pub struct Orrery {
    scene: Scene,
    starfield: Starfield,
    state: SimulationState,
    clock: Clock,
    input: InputQueue,
    config: EngineConfig,
    frame_count: u64,
    /// Last finite wall-clock reading, shown by the HUD clock.
    wall_seconds: f64,
    quit_requested: bool,
}

impl Orrery {
    /// Validate the system and set up initial state.
    pub fn new(system: SystemConfig, config: EngineConfig) -> Result<Self, ConfigurationError> {
        let scene = Scene::from_config(system)?;
        let starfield = Starfield::generate(&config.starfield);

        log::info!(
            "Orrery ready: {} bodies, {} satellites, {} stars",
            scene.primary_count(),
            scene.satellites().len(),
            starfield.len()
        );

        Ok(Self {
            scene,
            starfield,
            state: SimulationState::new(config.camera),
            clock: Clock::new(config.clock),
            input: InputQueue::new(),
            config,
            frame_count: 0,
            wall_seconds: 0.0,
            quit_requested: false,
        })
    }

    /// Build from JSON documents. An empty engine document means all defaults.
    pub fn from_json(system_json: &str, config_json: &str) -> Result<Self, ConfigurationError> {
        let system = SystemConfig::from_json(system_json)?;
        let config = if config_json.trim().is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(config_json)?
        };
        Self::new(system, config)
    }

    /// Queue an event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Drain pending input into the simulation state and sample the clock.
    pub fn update(&mut self, wall_seconds: f64) -> FrameUpdate {
        let events = self.input.drain();
        let primaries = self.scene.primary_count();
        let (state, control) = std::mem::take(&mut self.state).advance(&events, primaries);
        self.state = state;
        if control == LoopControl::Quit {
            log::info!("Quit requested after {} frames", self.frame_count);
            self.quit_requested = true;
        }
        self.frame_count += 1;
        if wall_seconds.is_finite() {
            self.wall_seconds = wall_seconds;
        }
        FrameUpdate {
            t: self.clock.sample(wall_seconds),
            control,
        }
    }

    /// Draw the current state at time `t`. Reads state only.
    pub fn render<B, O>(&self, t: f64, backend: &mut B, overlay: &mut O) -> Result<FrameStats, RenderError>
    where
        B: Backend + ?Sized,
        O: TextOverlay + ?Sized,
    {
        let frame = Frame {
            scene: &self.scene,
            starfield: &self.starfield,
            camera: &self.state.camera,
            selection: &self.state.selection,
            t,
            wall_seconds: self.wall_seconds,
        };
        render(&frame, &self.config.render, backend, overlay)
    }

    /// One full frame: input, clock, render. Input is applied even when the
    /// render fails; a quit stays visible through [`Orrery::quit_requested`].
    pub fn frame<B, O>(
        &mut self,
        wall_seconds: f64,
        backend: &mut B,
        overlay: &mut O,
    ) -> Result<FrameOutcome, RenderError>
    where
        B: Backend + ?Sized,
        O: TextOverlay + ?Sized,
    {
        let FrameUpdate { t, control } = self.update(wall_seconds);
        let stats = self.render(t, backend, overlay)?;
        Ok(FrameOutcome { t, control, stats })
    }

    /// Follow a window resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.render.viewport.resize(width, height);
    }

    pub fn world_transforms(&self, t: f64) -> WorldTransforms {
        self.scene.world_transforms(t)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frames updated so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Animation time of the most recent frame.
    pub fn last_time(&self) -> Option<f64> {
        self.clock.last()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Rgba;
    use crate::core::scene::{CelestialBody, Satellite};
    use crate::core::starfield::StarfieldConfig;
    use crate::core::time::{ClockConfig, ClockMode};
    use crate::input::queue::{Key, PointerButton, ScrollDirection};
    use crate::renderer::command::{CommandBuffer, LabelBuffer};

    fn system() -> SystemConfig {
        SystemConfig {
            bodies: vec![
                CelestialBody::new("Sun", 5.0, Rgba::rgb(0.98, 0.85, 0.37)).with_spin(0.02),
                CelestialBody::new("Earth", 0.7, Rgba::rgb(0.3, 0.5, 0.9))
                    .with_orbit(12.0, 0.01)
                    .with_spin(0.02),
            ],
            satellites: vec![Satellite::new("Moon", 1, 0.2, 1.5, 0.05, Rgba::WHITE)],
        }
    }

    fn config() -> EngineConfig {
        EngineConfig {
            starfield: StarfieldConfig { count: 16, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn frame_applies_input_then_renders() {
        let mut orrery = Orrery::new(system(), config()).unwrap();
        orrery.push_input(InputEvent::KeyDown { key: Key::Digit(2) });
        orrery.push_input(InputEvent::Scroll { direction: ScrollDirection::Down });

        let mut commands = CommandBuffer::new();
        let mut labels = LabelBuffer::new();
        let outcome = orrery.frame(1000.0, &mut commands, &mut labels).unwrap();

        assert_eq!(outcome.control, LoopControl::Continue);
        assert_eq!(outcome.t, 1000.0);
        assert_eq!(orrery.state().selection.selected(), Some(1));
        assert_eq!(orrery.state().camera.zoom(), -51.0);
        assert!(labels.labels().iter().any(|l| l.text == "Earth - 12.0 AU"));
        assert_eq!(orrery.pending_input(), 0);
        assert_eq!(orrery.frame_count(), 1);
    }

    #[test]
    fn render_failure_leaves_state_untouched() {
        let mut orrery = Orrery::new(system(), config()).unwrap();
        orrery.push_input(InputEvent::PointerDown { button: PointerButton::Primary, x: 0.0, y: 0.0 });
        orrery.push_input(InputEvent::PointerMove { x: 10.0, y: 10.0 });

        let mut failing = CommandBuffer::new().refuse_after(2);
        let mut labels = LabelBuffer::new();
        assert!(orrery.frame(5.0, &mut failing, &mut labels).is_err());
        let after_failure = orrery.state().clone();
        assert!((after_failure.camera.yaw() - 5.0).abs() < 1e-6);

        let mut good = CommandBuffer::new();
        let outcome = orrery.frame(6.0, &mut good, &mut labels).unwrap();
        assert_eq!(orrery.state(), &after_failure);
        assert!(good.is_finished());
        assert!(outcome.stats.draws > 2);
    }

    #[test]
    fn quit_is_reported_even_if_render_fails() {
        let mut orrery = Orrery::new(system(), config()).unwrap();
        orrery.push_input(InputEvent::Quit);
        let mut failing = CommandBuffer::new().refuse_after(0);
        let mut labels = LabelBuffer::new();
        assert!(orrery.frame(1.0, &mut failing, &mut labels).is_err());
        assert!(orrery.quit_requested());
    }

    #[test]
    fn clock_never_runs_backwards_between_frames() {
        let mut orrery = Orrery::new(system(), config()).unwrap();
        let a = orrery.update(100.0).t;
        let b = orrery.update(99.0).t;
        assert_eq!(a, b);
        assert_eq!(orrery.last_time(), Some(100.0));
    }

    #[test]
    fn from_json_reports_parse_and_validation_errors() {
        assert!(matches!(
            Orrery::from_json("not json", ""),
            Err(ConfigurationError::Parse(_))
        ));
        let orphan = r#"{
            "bodies": [{ "name": "Sun", "radius": 5.0, "color": [1, 1, 1, 1] }],
            "satellites": [{ "name": "Lost", "parent_index": 99, "radius": 0.1,
                             "orbit_radius": 1.0, "color": [1, 1, 1, 1] }]
        }"#;
        assert!(matches!(
            Orrery::from_json(orphan, "{}"),
            Err(ConfigurationError::InvalidParent { parent_index: 99, .. })
        ));
    }

    #[test]
    fn hud_clock_shows_wall_time_under_scaled_clock() {
        let mut config = config();
        config.clock = ClockConfig {
            mode: ClockMode::SinceStart,
            time_scale: 100.0,
        };
        let mut orrery = Orrery::new(system(), config).unwrap();
        let mut commands = CommandBuffer::new();
        let mut labels = LabelBuffer::new();
        orrery.frame(1_700_000_000.0, &mut commands, &mut labels).unwrap();
        let outcome = orrery.frame(1_700_000_002.0, &mut commands, &mut labels).unwrap();

        assert!((outcome.t - 200.0).abs() < 1e-6);
        assert!(labels.labels().iter().any(|l| l.text == "2023-11-14 22:13:22"));
    }

    #[test]
    fn resize_updates_viewport() {
        let mut orrery = Orrery::new(system(), config()).unwrap();
        orrery.resize(640.0, 480.0);
        assert_eq!(orrery.config().render.viewport.width, 640.0);
        assert_eq!(orrery.config().render.viewport.height, 480.0);
    }
}
