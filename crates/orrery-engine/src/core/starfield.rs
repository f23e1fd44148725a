use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::Rng;

/// One background star. Packs as 4 floats: x, y, z, size.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StarfieldPoint {
    pub position: [f32; 3],
    pub size: f32,
}

impl StarfieldPoint {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube, centered on the origin.
    pub extent: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            extent: 200.0,
            min_size: 0.1,
            max_size: 0.3,
            seed: 42,
        }
    }
}

/// Static backdrop, generated once and never mutated.
#[derive(Debug, Clone)]
pub struct Starfield {
    points: Vec<StarfieldPoint>,
}

impl Starfield {
    pub fn generate(config: &StarfieldConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let half = config.extent * 0.5;
        let points = (0..config.count)
            .map(|_| {
                let x = rng.range_f32(-half, half);
                let y = rng.range_f32(-half, half);
                let z = rng.range_f32(-half, half);
                StarfieldPoint {
                    position: [x, y, z],
                    size: rng.range_f32(config.min_size, config.max_size),
                }
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[StarfieldPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_field_fills_the_cube() {
        let field = Starfield::generate(&StarfieldConfig::default());
        assert_eq!(field.len(), 1000);
        for star in field.points() {
            let p = star.position();
            assert!(p.abs().max_element() <= 100.0, "{p:?}");
            assert!(star.size >= 0.1 && star.size <= 0.3, "size {}", star.size);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let config = StarfieldConfig::default();
        let a = Starfield::generate(&config);
        let b = Starfield::generate(&config);
        assert_eq!(a.points(), b.points());

        let c = Starfield::generate(&StarfieldConfig { seed: 7, ..config });
        assert_ne!(a.points(), c.points());
    }

    #[test]
    fn empty_field_allowed() {
        let field = Starfield::generate(&StarfieldConfig { count: 0, ..Default::default() });
        assert!(field.is_empty());
    }

    #[test]
    fn point_is_four_floats() {
        assert_eq!(std::mem::size_of::<StarfieldPoint>(), 16);
    }
}
