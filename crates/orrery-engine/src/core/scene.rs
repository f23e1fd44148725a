use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, Rgba};
use crate::core::orbit::{compute_local_transform, Transform};
use crate::error::{ConfigurationError, EntityRef};

// ── Configuration records ──────────────────────────────────────────

/// A primary body: the central star or something orbiting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f32,
    /// Distance from the origin. Exactly one body has 0: the central body.
    #[serde(default)]
    pub orbit_radius: f32,
    /// Radians per second.
    #[serde(default)]
    pub orbit_angular_speed: f64,
    /// Revolutions per second.
    #[serde(default)]
    pub spin_angular_speed: f64,
    pub color: Rgba,
    #[serde(default)]
    pub has_ring: bool,
}

impl CelestialBody {
    /// A non-orbiting, non-spinning body. Use the `with_*` builders for the rest.
    pub fn new(name: impl Into<String>, radius: f32, color: Rgba) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit_radius: 0.0,
            orbit_angular_speed: 0.0,
            spin_angular_speed: 0.0,
            color,
            has_ring: false,
        }
    }

    pub fn with_orbit(mut self, orbit_radius: f32, orbit_angular_speed: f64) -> Self {
        self.orbit_radius = orbit_radius;
        self.orbit_angular_speed = orbit_angular_speed;
        self
    }

    pub fn with_spin(mut self, spin_angular_speed: f64) -> Self {
        self.spin_angular_speed = spin_angular_speed;
        self
    }

    pub fn with_ring(mut self) -> Self {
        self.has_ring = true;
        self
    }

    pub fn is_central(&self) -> bool {
        self.orbit_radius == 0.0
    }
}

/// A moon orbiting one primary. Satellites do not spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub name: String,
    /// Index into the primary body table.
    pub parent_index: usize,
    pub radius: f32,
    pub orbit_radius: f32,
    #[serde(default)]
    pub orbit_angular_speed: f64,
    pub color: Rgba,
}

impl Satellite {
    pub fn new(
        name: impl Into<String>,
        parent_index: usize,
        radius: f32,
        orbit_radius: f32,
        orbit_angular_speed: f64,
        color: Rgba,
    ) -> Self {
        Self {
            name: name.into(),
            parent_index,
            radius,
            orbit_radius,
            orbit_angular_speed,
            color,
        }
    }
}

/// Static description of a star system, as loaded from code or JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub bodies: Vec<CelestialBody>,
    #[serde(default)]
    pub satellites: Vec<Satellite>,
}

impl SystemConfig {
    /// Parse a system description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ── World transforms ───────────────────────────────────────────────

/// Where an entity sits in world space this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position on the orbit, without spin. Satellites and highlights attach here.
    pub orbit: Transform,
    /// `orbit` followed by the body's own spin.
    pub body: Transform,
}

/// World placements for every entity at one instant.
#[derive(Debug, Clone)]
pub struct WorldTransforms {
    primaries: Vec<Placement>,
    satellites: Vec<Placement>,
}

impl WorldTransforms {
    pub fn get(&self, id: BodyId) -> Option<&Placement> {
        match id {
            BodyId::Primary(i) => self.primaries.get(i),
            BodyId::Satellite(i) => self.satellites.get(i),
        }
    }

    pub fn primary(&self, index: usize) -> Option<&Placement> {
        self.primaries.get(index)
    }

    pub fn satellite(&self, index: usize) -> Option<&Placement> {
        self.satellites.get(index)
    }

    /// All placements: primaries first, then satellites, each in table order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Placement)> {
        let primaries = self
            .primaries
            .iter()
            .enumerate()
            .map(|(i, p)| (BodyId::Primary(i), p));
        let satellites = self
            .satellites
            .iter()
            .enumerate()
            .map(|(i, p)| (BodyId::Satellite(i), p));
        primaries.chain(satellites)
    }

    pub fn len(&self) -> usize {
        self.primaries.len() + self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Scene ──────────────────────────────────────────────────────────

/// One primary in traversal order, with access to its satellites.
#[derive(Debug, Clone, Copy)]
pub struct Branch<'a> {
    pub index: usize,
    pub body: &'a CelestialBody,
    scene: &'a Scene,
}

impl<'a> Branch<'a> {
    /// This primary's satellites in configured order, with their table indices.
    pub fn satellites(&self) -> impl Iterator<Item = (usize, &'a Satellite)> + 'a {
        self.scene.satellites_of(self.index)
    }
}

/// Validated two-level hierarchy: primaries orbiting the origin, satellites
/// orbiting primaries. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Scene {
    bodies: Vec<CelestialBody>,
    satellites: Vec<Satellite>,
    /// Satellite indices per primary, in configured order.
    children: Vec<Vec<usize>>,
    central: usize,
}

impl Scene {
    /// Validate and build. Every problem names the offending entry.
    pub fn new(
        bodies: Vec<CelestialBody>,
        satellites: Vec<Satellite>,
    ) -> Result<Self, ConfigurationError> {
        let mut central: Option<usize> = None;

        for (index, body) in bodies.iter().enumerate() {
            let entity = || EntityRef::body(index, &body.name);
            check_finite(entity, "radius", body.radius as f64)?;
            check_finite(entity, "orbit_radius", body.orbit_radius as f64)?;
            check_finite(entity, "orbit_angular_speed", body.orbit_angular_speed)?;
            check_finite(entity, "spin_angular_speed", body.spin_angular_speed)?;
            check_finite(entity, "color", color_sum(body.color))?;

            if body.radius <= 0.0 {
                return Err(ConfigurationError::NonPositiveRadius {
                    entity: entity(),
                    radius: body.radius,
                });
            }
            if body.orbit_radius < 0.0 {
                return Err(ConfigurationError::NegativeOrbitRadius {
                    entity: entity(),
                    orbit_radius: body.orbit_radius,
                });
            }
            if body.is_central() {
                if let Some(first) = central {
                    return Err(ConfigurationError::DuplicateCentralBody {
                        entity: entity(),
                        first: EntityRef::body(first, &bodies[first].name),
                    });
                }
                central = Some(index);
            }
        }

        let central = central.ok_or(ConfigurationError::MissingCentralBody)?;

        let mut children = vec![Vec::new(); bodies.len()];
        for (index, sat) in satellites.iter().enumerate() {
            let entity = || EntityRef::satellite(index, &sat.name);
            check_finite(entity, "radius", sat.radius as f64)?;
            check_finite(entity, "orbit_radius", sat.orbit_radius as f64)?;
            check_finite(entity, "orbit_angular_speed", sat.orbit_angular_speed)?;
            check_finite(entity, "color", color_sum(sat.color))?;

            if sat.radius <= 0.0 {
                return Err(ConfigurationError::NonPositiveRadius {
                    entity: entity(),
                    radius: sat.radius,
                });
            }
            if sat.orbit_radius <= 0.0 {
                return Err(ConfigurationError::NonPositiveSatelliteOrbit {
                    entity: entity(),
                    orbit_radius: sat.orbit_radius,
                });
            }
            match children.get_mut(sat.parent_index) {
                Some(list) => list.push(index),
                None => {
                    return Err(ConfigurationError::InvalidParent {
                        entity: entity(),
                        parent_index: sat.parent_index,
                        body_count: bodies.len(),
                    })
                }
            }
        }

        log::debug!(
            "Scene: {} bodies, {} satellites, central body '{}'",
            bodies.len(),
            satellites.len(),
            bodies[central].name
        );

        Ok(Self {
            bodies,
            satellites,
            children,
            central,
        })
    }

    pub fn from_config(config: SystemConfig) -> Result<Self, ConfigurationError> {
        Self::new(config.bodies, config.satellites)
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn primary_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn central_index(&self) -> usize {
        self.central
    }

    pub fn body(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    /// Satellites whose parent is `primary`, in configured order.
    /// Empty for an out-of-range index.
    pub fn satellites_of(&self, primary: usize) -> impl Iterator<Item = (usize, &Satellite)> + '_ {
        self.children
            .get(primary)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&i| (i, &self.satellites[i]))
    }

    /// Primaries in insertion order; each branch yields its own satellites.
    pub fn traverse(&self) -> impl Iterator<Item = Branch<'_>> {
        self.bodies.iter().enumerate().map(move |(index, body)| Branch {
            index,
            body,
            scene: self,
        })
    }

    /// Placements of every entity at time `t`.
    /// Satellites compose onto the parent's orbit placement, never its spin.
    pub fn world_transforms(&self, t: f64) -> WorldTransforms {
        let primaries: Vec<Placement> = self
            .bodies
            .iter()
            .map(|b| {
                let local = compute_local_transform(
                    b.orbit_radius,
                    b.orbit_angular_speed,
                    b.spin_angular_speed,
                    t,
                );
                Placement {
                    orbit: local.orbit(),
                    body: local.full(),
                }
            })
            .collect();

        let satellites = self
            .satellites
            .iter()
            .map(|s| {
                let parent = primaries[s.parent_index].orbit;
                let local = compute_local_transform(s.orbit_radius, s.orbit_angular_speed, 0.0, t);
                Placement {
                    orbit: parent.compose(&local.orbit()),
                    body: parent.compose(&local.full()),
                }
            })
            .collect();

        WorldTransforms {
            primaries,
            satellites,
        }
    }
}

fn check_finite(
    entity: impl Fn() -> EntityRef,
    field: &'static str,
    value: f64,
) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NonFinite {
            entity: entity(),
            field,
        })
    }
}

fn color_sum(c: Rgba) -> f64 {
    (c.r + c.g + c.b + c.a) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f64::consts::TAU;

    fn sun() -> CelestialBody {
        CelestialBody::new("Sun", 5.0, Rgba::rgb(0.98, 0.85, 0.37)).with_spin(0.02)
    }

    fn earth() -> CelestialBody {
        CelestialBody::new("Earth", 0.7, Rgba::rgb(0.3, 0.5, 0.9))
            .with_orbit(12.0, 0.01)
            .with_spin(0.02)
    }

    fn moon() -> Satellite {
        Satellite::new("Moon", 1, 0.2, 1.5, 0.05, Rgba::rgb(0.8, 0.8, 0.85))
    }

    #[test]
    fn earth_at_distance_twelve_angle_zero() {
        let scene = Scene::new(vec![sun(), earth()], vec![]).unwrap();
        let world = scene.world_transforms(0.0);
        let p = world.primary(1).unwrap().body.position();
        assert!((p - Vec3::new(12.0, 0.0, 0.0)).length() < 1e-5, "{p:?}");

        let later = scene.world_transforms(TAU / 0.01);
        let q = later.primary(1).unwrap().orbit.position();
        assert!((q - p).length() < 1e-3, "{q:?}");
    }

    #[test]
    fn central_body_stays_at_origin() {
        let scene = Scene::new(vec![sun(), earth()], vec![]).unwrap();
        assert_eq!(scene.central_index(), 0);
        for t in [0.0, 3.3, 1.7e9] {
            let p = scene.world_transforms(t).primary(0).unwrap().body.position();
            assert!(p.length() < 1e-6);
        }
    }

    #[test]
    fn satellite_ignores_parent_spin() {
        let slow = Scene::new(vec![sun(), earth().with_spin(0.0)], vec![moon()]).unwrap();
        let fast = Scene::new(vec![sun(), earth().with_spin(7.3)], vec![moon()]).unwrap();
        for t in [0.0, 1.0, 17.5, 400.0] {
            let a = slow.world_transforms(t).satellite(0).unwrap().body.position();
            let b = fast.world_transforms(t).satellite(0).unwrap().body.position();
            assert!((a - b).length() < 1e-5, "t={t}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn satellite_orbits_its_parent() {
        let scene = Scene::new(vec![sun(), earth()], vec![moon()]).unwrap();
        let world = scene.world_transforms(123.0);
        let parent = world.primary(1).unwrap().orbit.position();
        let sat = world.get(BodyId::Satellite(0)).unwrap().body.position();
        assert!(((sat - parent).length() - 1.5).abs() < 1e-4);
    }

    #[test]
    fn traversal_groups_satellites_under_parent() {
        let mars = CelestialBody::new("Mars", 0.5, Rgba::WHITE).with_orbit(15.0, 0.008);
        let phobos = Satellite::new("Phobos", 2, 0.1, 1.0, 0.08, Rgba::WHITE);
        let deimos = Satellite::new("Deimos", 2, 0.08, 1.3, 0.04, Rgba::WHITE);
        let scene = Scene::new(vec![sun(), earth(), mars], vec![phobos, moon(), deimos]).unwrap();

        let order: Vec<(usize, Vec<String>)> = scene
            .traverse()
            .map(|b| (b.index, b.satellites().map(|(_, s)| s.name.clone()).collect()))
            .collect();
        assert_eq!(order[0], (0, vec![]));
        assert_eq!(order[1], (1, vec!["Moon".to_string()]));
        assert_eq!(order[2], (2, vec!["Phobos".to_string(), "Deimos".to_string()]));
        assert_eq!(scene.satellites_of(99).count(), 0);
    }

    #[test]
    fn invalid_parent_rejected() {
        let lost = Satellite::new("Lost", 99, 0.1, 1.0, 0.1, Rgba::WHITE);
        let err = Scene::new(vec![sun(), earth()], vec![lost]).unwrap_err();
        match err {
            ConfigurationError::InvalidParent { entity, parent_index, body_count } => {
                assert_eq!(entity, EntityRef::satellite(0, "Lost"));
                assert_eq!(parent_index, 99);
                assert_eq!(body_count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn radius_and_orbit_checks() {
        let flat = CelestialBody::new("Flat", 0.0, Rgba::WHITE).with_orbit(3.0, 0.1);
        assert!(matches!(
            Scene::new(vec![sun(), flat], vec![]),
            Err(ConfigurationError::NonPositiveRadius { .. })
        ));

        let inside_out = CelestialBody::new("Odd", 1.0, Rgba::WHITE).with_orbit(-3.0, 0.1);
        assert!(matches!(
            Scene::new(vec![sun(), inside_out], vec![]),
            Err(ConfigurationError::NegativeOrbitRadius { .. })
        ));

        let hugging = Satellite::new("Hug", 1, 0.1, 0.0, 0.1, Rgba::WHITE);
        assert!(matches!(
            Scene::new(vec![sun(), earth()], vec![hugging]),
            Err(ConfigurationError::NonPositiveSatelliteOrbit { .. })
        ));
    }

    #[test]
    fn central_body_must_be_unique_and_present() {
        let second = CelestialBody::new("Twin", 3.0, Rgba::WHITE);
        match Scene::new(vec![sun(), second], vec![]) {
            Err(ConfigurationError::DuplicateCentralBody { entity, first }) => {
                assert_eq!(entity, EntityRef::body(1, "Twin"));
                assert_eq!(first, EntityRef::body(0, "Sun"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            Scene::new(vec![earth()], vec![]),
            Err(ConfigurationError::MissingCentralBody)
        ));
    }

    #[test]
    fn non_finite_values_rejected() {
        let wild = earth().with_orbit(12.0, f64::NAN);
        assert!(matches!(
            Scene::new(vec![sun(), wild], vec![]),
            Err(ConfigurationError::NonFinite { field: "orbit_angular_speed", .. })
        ));
    }

    #[test]
    fn system_config_from_json() {
        let json = r#"{
            "bodies": [
                { "name": "Sun", "radius": 5.0, "spin_angular_speed": 0.02, "color": [1, 1, 0, 1] },
                { "name": "Saturn", "radius": 1.2, "orbit_radius": 25.0, "orbit_angular_speed": 0.0009,
                  "color": [0.9, 0.85, 0.6, 1.0], "has_ring": true }
            ],
            "satellites": [
                { "name": "Titan", "parent_index": 1, "radius": 0.15, "orbit_radius": 2.5,
                  "orbit_angular_speed": 0.03, "color": [0.9, 0.8, 0.7, 1.0] }
            ]
        }"#;
        let config = SystemConfig::from_json(json).unwrap();
        assert!(config.bodies[1].has_ring);
        assert!(!config.bodies[0].has_ring);
        let scene = Scene::from_config(config).unwrap();
        assert_eq!(scene.satellites_of(1).count(), 1);
    }
}
