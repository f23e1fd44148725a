pub mod camera;
pub mod hud;
pub mod render;
pub mod selection;
pub mod simulation;
