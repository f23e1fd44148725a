//! The solar system at display scale: Sun, eight planets and their best-known moons.
//!
//! Sizes, distances and speeds are picked for readability, not accuracy.
//! Distances are in scene units, labelled as AU on screen.

use orrery_engine::{CelestialBody, EngineConfig, Rgba, Satellite, SystemConfig};

/// Primary index constants. Digit key N selects primary N - 1.
/// Only the parents in `MOONS` and Saturn's ring need them outside tests.
#[cfg(test)]
pub const SUN: usize = 0;
#[cfg(test)]
pub const MERCURY: usize = 1;
#[cfg(test)]
pub const VENUS: usize = 2;
pub const EARTH: usize = 3;
pub const MARS: usize = 4;
pub const JUPITER: usize = 5;
pub const SATURN: usize = 6;
pub const URANUS: usize = 7;
pub const NEPTUNE: usize = 8;
pub const PRIMARY_COUNT: usize = 9;

// ── Primaries ────────────────────────────────────────────────────────

/// (name, radius, orbit radius, orbit rad/s, spin rev/s, color)
const PRIMARIES: [(&str, f32, f32, f64, f64, [f32; 3]); PRIMARY_COUNT] = [
    ("Sun", 5.0, 0.0, 0.0, 0.02, [0.98, 0.85, 0.37]),
    ("Mercury", 0.4, 7.0, 0.04, 0.004, [0.75, 0.75, 0.75]),
    ("Venus", 0.6, 9.0, 0.015, 0.002, [0.90, 0.70, 0.50]),
    ("Earth", 0.7, 12.0, 0.01, 0.02, [0.30, 0.50, 0.90]),
    ("Mars", 0.5, 15.0, 0.008, 0.018, [0.90, 0.30, 0.20]),
    ("Jupiter", 1.5, 20.0, 0.002, 0.04, [0.80, 0.60, 0.40]),
    ("Saturn", 1.2, 25.0, 0.0009, 0.038, [0.90, 0.85, 0.60]),
    ("Uranus", 0.9, 30.0, 0.0004, 0.03, [0.50, 0.85, 0.90]),
    ("Neptune", 0.9, 35.0, 0.0001, 0.032, [0.20, 0.30, 0.90]),
];

// ── Moons ────────────────────────────────────────────────────────────

/// (name, parent, radius, orbit radius, orbit rad/s, color)
const MOONS: [(&str, usize, f32, f32, f64, [f32; 3]); 12] = [
    ("Moon", EARTH, 0.2, 1.5, 0.05, [0.80, 0.80, 0.85]),
    ("Phobos", MARS, 0.1, 1.0, 0.08, [0.7, 0.7, 0.7]),
    ("Deimos", MARS, 0.08, 1.3, 0.04, [0.6, 0.6, 0.6]),
    ("Io", JUPITER, 0.15, 2.0, 0.1, [0.9, 0.8, 0.5]),
    ("Europa", JUPITER, 0.13, 2.5, 0.08, [0.8, 0.8, 0.9]),
    ("Ganymede", JUPITER, 0.18, 3.0, 0.06, [0.7, 0.7, 0.8]),
    ("Callisto", JUPITER, 0.16, 3.5, 0.04, [0.6, 0.6, 0.7]),
    ("Titan", SATURN, 0.15, 2.5, 0.03, [0.9, 0.8, 0.7]),
    ("Rhea", SATURN, 0.1, 3.0, 0.02, [0.8, 0.8, 0.8]),
    ("Titania", URANUS, 0.12, 2.0, 0.025, [0.7, 0.8, 0.9]),
    ("Oberon", URANUS, 0.11, 2.3, 0.02, [0.6, 0.7, 0.8]),
    ("Triton", NEPTUNE, 0.14, 2.0, 0.015, [0.8, 0.9, 0.9]),
];

fn rgb([r, g, b]: [f32; 3]) -> Rgba {
    Rgba::rgb(r, g, b)
}

pub fn solar_system() -> SystemConfig {
    let bodies = PRIMARIES
        .iter()
        .enumerate()
        .map(|(i, &(name, radius, orbit_radius, orbit_speed, spin, color))| {
            let body = CelestialBody::new(name, radius, rgb(color))
                .with_orbit(orbit_radius, orbit_speed)
                .with_spin(spin);
            if i == SATURN {
                body.with_ring()
            } else {
                body
            }
        })
        .collect();

    let satellites = MOONS
        .iter()
        .map(|&(name, parent, radius, orbit_radius, orbit_speed, color)| {
            Satellite::new(name, parent, radius, orbit_radius, orbit_speed, rgb(color))
        })
        .collect();

    SystemConfig { bodies, satellites }
}

pub fn engine_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.render.hud.title = "Solar System Simulation".to_string();
    config
}
