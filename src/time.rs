//! Time advancement for the orbital visualization.
//!
//! Handles progression of simulation time based on scale and pause state.

use bevy::prelude::*;

use crate::types::{SimSet, SimulationTime};

/// Plugin providing time advancement functionality.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        // Time moves before propagation so bodies see this frame's clock.
        app.add_systems(Update, advance_time.before(SimSet::Orbits));
    }
}

/// Advance simulation time based on scale and pause state.
///
/// The scale is how many simulation time units pass per real-world
/// second; the per-frame tick here is the only thing that moves time.
fn advance_time(mut sim_time: ResMut<SimulationTime>, time: Res<Time>) {
    if sim_time.paused {
        return;
    }

    sim_time.current += time.delta_secs_f64() * sim_time.scale;
}
