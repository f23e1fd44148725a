pub mod orbit;
pub mod rng;
pub mod scene;
pub mod starfield;
pub mod time;
