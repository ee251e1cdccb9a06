//! Body entities: position, radius, and optional orbit binding.
//!
//! A `Body` owns no rendering resources; it is the single writer of its
//! own position (through `update_orbit` when orbit-bound, `set_position`
//! when freely placed). Visual `Transform`s are synced from it once per
//! frame, after propagation and before the camera reads positions.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::orbit::OrbitalElements;
use crate::types::{BodyKind, SimSet, SimulationTime};

/// A celestial body in the scene.
#[derive(Component, Clone, Debug)]
pub struct Body {
    name: String,
    kind: BodyKind,
    radius: f64,
    position: DVec3,
    orbit: Option<OrbitalElements>,
    orbit_epoch: f64,
}

impl Body {
    /// Create a free-placed body at the origin.
    ///
    /// # Panics
    /// Panics if `radius` is negative or non-finite; rejecting invalid
    /// construction parameters is the constructing caller's job.
    pub fn new(name: impl Into<String>, kind: BodyKind, radius: f64) -> Self {
        assert!(
            radius >= 0.0 && radius.is_finite(),
            "body radius must be non-negative and finite, got {radius}"
        );
        Self {
            name: name.into(),
            kind,
            radius,
            position: DVec3::ZERO,
            orbit: None,
            orbit_epoch: 0.0,
        }
    }

    /// Create an orbit-bound body. Its position is valid after the first
    /// `update_orbit` call.
    pub fn with_orbit(
        name: impl Into<String>,
        kind: BodyKind,
        radius: f64,
        orbit: OrbitalElements,
        orbit_epoch: f64,
    ) -> Self {
        let mut body = Self::new(name, kind, radius);
        body.orbit = Some(orbit);
        body.orbit_epoch = orbit_epoch;
        body
    }

    /// Bind (or replace) the orbit this body follows.
    pub fn set_orbit(&mut self, orbit: OrbitalElements) {
        self.orbit = Some(orbit);
    }

    /// Propagate the bound orbit to simulation time `t` and cache the
    /// result. No-op for bodies without an orbit. Idempotent for a fixed
    /// `t`: the cached position is a pure function of the elements and
    /// the time.
    pub fn update_orbit(&mut self, t: f64) {
        if let Some(orbit) = &self.orbit {
            self.position = orbit.position_at(t - self.orbit_epoch);
        }
    }

    /// Place the body directly. Orbit-bound bodies are overwritten by the
    /// next `update_orbit`; this is for freely placed bodies.
    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    /// Current cached position (not recomputed).
    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn orbit(&self) -> Option<&OrbitalElements> {
        self.orbit.as_ref()
    }
}

/// Plugin providing per-frame body updates.
pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, SimSet::Camera.after(SimSet::Orbits))
            .add_systems(
                Update,
                (update_orbits, sync_body_transforms).chain().in_set(SimSet::Orbits),
            )
            .add_systems(Update, spin_bodies);
    }
}

/// Apply orbit propagation to every orbit-bound body.
fn update_orbits(mut bodies: Query<&mut Body>, sim_time: Res<SimulationTime>) {
    for mut body in bodies.iter_mut() {
        body.update_orbit(sim_time.current);
    }
}

/// Copy cached body positions into render transforms.
fn sync_body_transforms(mut bodies: Query<(&Body, &mut Transform)>) {
    for (body, mut transform) in bodies.iter_mut() {
        transform.translation = body.position().as_vec3();
    }
}

/// Rotate each body about its kind's tilted axis at the kind's fixed rate.
fn spin_bodies(mut bodies: Query<(&Body, &mut Transform)>, time: Res<Time>) {
    for (body, mut transform) in bodies.iter_mut() {
        let traits = body.kind().traits();
        let axis = Quat::from_rotation_z(traits.axis_tilt) * Vec3::Y;
        if let Ok(axis) = Dir3::new(axis) {
            transform.rotate_axis(axis, traits.spin_rate * time.delta_secs());
        }
    }
}
