//! Error types for scene construction and frame rendering.
//!
//! Configuration problems are fatal and surface once, when the scene is built.
//! Render problems abandon a single frame; the simulation state stays valid.

use std::fmt;
use thiserror::Error;

/// Points at the configuration entry an error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    Body { index: usize, name: String },
    Satellite { index: usize, name: String },
}

impl EntityRef {
    pub fn body(index: usize, name: &str) -> Self {
        EntityRef::Body { index, name: name.to_owned() }
    }

    pub fn satellite(index: usize, name: &str) -> Self {
        EntityRef::Satellite { index, name: name.to_owned() }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Body { index, name } => write!(f, "body #{index} ({name})"),
            EntityRef::Satellite { index, name } => write!(f, "satellite #{index} ({name})"),
        }
    }
}

/// Invalid star-system configuration. Raised by `Scene::new`; never mid-frame.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{entity}: radius must be positive, got {radius}")]
    NonPositiveRadius { entity: EntityRef, radius: f32 },

    #[error("{entity}: orbit radius must not be negative, got {orbit_radius}")]
    NegativeOrbitRadius { entity: EntityRef, orbit_radius: f32 },

    #[error("{entity}: satellite orbit radius must be positive, got {orbit_radius}")]
    NonPositiveSatelliteOrbit { entity: EntityRef, orbit_radius: f32 },

    #[error("{entity}: parent index {parent_index} out of range ({body_count} bodies)")]
    InvalidParent {
        entity: EntityRef,
        parent_index: usize,
        body_count: usize,
    },

    #[error("{entity}: second body with zero orbit radius (first was {first})")]
    DuplicateCentralBody { entity: EntityRef, first: EntityRef },

    #[error("no body with zero orbit radius to act as the central body")]
    MissingCentralBody,

    #[error("{entity}: {field} is not a finite number")]
    NonFinite { entity: EntityRef, field: &'static str },

    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigurationError {
    /// The entity at fault, if the error names one.
    pub fn entity(&self) -> Option<&EntityRef> {
        match self {
            ConfigurationError::NonPositiveRadius { entity, .. }
            | ConfigurationError::NegativeOrbitRadius { entity, .. }
            | ConfigurationError::NonPositiveSatelliteOrbit { entity, .. }
            | ConfigurationError::InvalidParent { entity, .. }
            | ConfigurationError::DuplicateCentralBody { entity, .. }
            | ConfigurationError::NonFinite { entity, .. } => Some(entity),
            ConfigurationError::MissingCentralBody | ConfigurationError::Parse(_) => None,
        }
    }
}

/// A graphics backend or text overlay refused a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend refused request: {reason}")]
pub struct BackendError {
    pub reason: String,
}

impl BackendError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// A frame could not be drawn. The frame is abandoned; camera, selection and
/// scene are untouched because rendering only reads them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("starting frame failed: {0}")]
    Begin(#[source] BackendError),

    #[error("drawing {what} failed: {source}")]
    Draw {
        what: String,
        #[source]
        source: BackendError,
    },

    #[error("label \"{text}\" failed: {source}")]
    Label {
        text: String,
        #[source]
        source: BackendError,
    },

    #[error("finishing frame failed: {0}")]
    End(#[source] BackendError),
}

/// A packed frame does not fit the buffer it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frame buffer holds {actual} floats, layout needs {needed}")]
pub struct ProtocolError {
    pub needed: usize,
    pub actual: usize,
}
