pub mod config;
pub mod orrery;
pub mod runner;
pub mod types;
