//! Shared simulation types: time resource, body kinds, and system ordering.

use bevy::prelude::*;

/// System sets ordering the per-frame simulation pipeline.
///
/// Orbit propagation must complete before the camera reads body positions,
/// otherwise a locked camera lags its target by one frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Orbit propagation and body position caching.
    Orbits,
    /// Camera command handling and per-frame camera update.
    Camera,
}

/// Category of a celestial body in the presentation.
///
/// Per-kind display behavior lives in [`BodyKind::traits`] — a lookup table
/// rather than a type hierarchy, so bodies stay plain data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Sun,
    Earth,
    Meteor,
    Comet,
}

/// Display traits shared by all bodies of one kind.
#[derive(Clone, Copy, Debug)]
pub struct KindTraits {
    /// Rotation axis tilt from vertical, radians.
    pub axis_tilt: f32,
    /// Spin rate about the tilted axis, radians per real-time second.
    pub spin_rate: f32,
    /// Flat material color used when no texture asset is present.
    pub base_color: Color,
}

impl BodyKind {
    /// Lookup table of per-kind display behavior.
    pub fn traits(self) -> KindTraits {
        match self {
            BodyKind::Sun => KindTraits {
                axis_tilt: 0.0,
                spin_rate: 0.02,
                base_color: Color::srgb(1.0, 0.85, 0.3),
            },
            BodyKind::Earth => KindTraits {
                axis_tilt: 0.41, // ~23.5 degrees
                spin_rate: 0.1,
                base_color: Color::srgb(0.2, 0.5, 0.8),
            },
            BodyKind::Meteor => KindTraits {
                axis_tilt: 0.3,
                spin_rate: 0.25,
                base_color: Color::srgb(0.55, 0.52, 0.48),
            },
            BodyKind::Comet => KindTraits {
                axis_tilt: 0.15,
                spin_rate: 0.15,
                base_color: Color::srgb(0.75, 0.8, 0.85),
            },
        }
    }

    /// Human-readable kind label for overlays and logs.
    pub fn label(self) -> &'static str {
        match self {
            BodyKind::Sun => "Sun",
            BodyKind::Earth => "Earth",
            BodyKind::Meteor => "Meteor",
            BodyKind::Comet => "Comet",
        }
    }
}

/// Simulation time resource tracking the current simulation state.
///
/// Time is measured in abstract simulation units (one Earth orbit takes
/// `EARTH_PERIOD` units); the scale controls how many units elapse per
/// real-time second.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Current simulation time in time units.
    pub current: f64,
    /// Time units advanced per real-time second.
    pub scale: f64,
    /// Whether simulation is paused.
    pub paused: bool,
    /// Initial time for reset functionality.
    pub initial: f64,
}

/// Default simulation speed: time units per real-time second.
pub const DEFAULT_TIME_SCALE: f64 = 20.0;

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            current: 0.0,
            scale: DEFAULT_TIME_SCALE,
            paused: false,
            initial: 0.0,
        }
    }
}

impl SimulationTime {
    /// Create simulation time starting at a specific value.
    pub fn at(start: f64) -> Self {
        Self {
            current: start,
            scale: DEFAULT_TIME_SCALE,
            paused: false,
            initial: start,
        }
    }

    /// Reset to initial time and pause.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.paused = true;
    }
}
