pub mod camera;
pub mod command;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{Backend, DrawRequest, FrameSetup, Lighting, Shading, TextOverlay};
