pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{CapacityConfig, EngineConfig};
pub use api::orrery::{FrameOutcome, FrameUpdate, Orrery};
pub use api::runner::{ExitReason, FrameLoop, LoopExit, Window};
pub use api::types::{BodyId, Rgba};
pub use core::orbit::{compute_local_transform, LocalTransform, Transform};
pub use core::scene::{CelestialBody, Placement, Satellite, Scene, SystemConfig, WorldTransforms};
pub use core::starfield::{Starfield, StarfieldConfig, StarfieldPoint};
pub use core::time::{wall_clock_seconds, Clock, ClockConfig, ClockMode, FramePacer};
pub use error::{BackendError, ConfigurationError, EntityRef, ProtocolError, RenderError};
pub use input::queue::{InputEvent, InputQueue, Key, PointerButton, ScrollDirection};
pub use renderer::camera::Viewport;
pub use renderer::command::{CommandBuffer, DrawCommand, Label, LabelBuffer};
pub use renderer::traits::{Backend, DrawRequest, FrameSetup, Lighting, Shading, TextOverlay};
pub use bridge::protocol::{pack_frame, DrawRecord, PackedCounts, ProtocolLayout};
pub use systems::camera::{CameraConfig, CameraController, DragState};
pub use systems::hud::{HudClock, HudConfig};
pub use systems::render::{render, Frame, FrameStats, Palette, RenderConfig};
pub use systems::selection::Selection;
pub use systems::simulation::{LoopControl, SimulationState};

// Math types used throughout the public API
pub use glam;
