//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::prelude::*;
use std::collections::HashMap;

use starfall::orbit::ElementRecord;

/// A tiny table of lockable targets for driving the camera state machine
/// without a scene: entity -> (position, radius).
pub struct TargetTable {
    world: World,
    targets: HashMap<Entity, (Vec3, f32)>,
}

impl TargetTable {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            targets: HashMap::new(),
        }
    }

    /// Register a target and return its entity id.
    pub fn add(&mut self, position: Vec3, radius: f32) -> Entity {
        let entity = self.world.spawn_empty().id();
        self.targets.insert(entity, (position, radius));
        entity
    }

    pub fn set_position(&mut self, entity: Entity, position: Vec3) {
        if let Some(slot) = self.targets.get_mut(&entity) {
            slot.0 = position;
        }
    }

    /// Tear a target down, as a scene would on despawn.
    pub fn remove(&mut self, entity: Entity) {
        self.targets.remove(&entity);
    }

    /// Lookup closure in the shape the camera's `tick` expects.
    pub fn lookup(&self) -> impl Fn(Entity) -> Option<(Vec3, f32)> + '_ {
        move |entity| self.targets.get(&entity).copied()
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self::new()
    }
}

/// `n` well-formed element records with synthetic names.
pub fn numbered_records(n: usize) -> Vec<ElementRecord> {
    (0..n)
        .map(|i| ElementRecord {
            semi_major_axis: 180.0 + i as f64 * 2.0,
            eccentricity: 0.05 * (i % 4) as f64,
            period: 500.0 + i as f64 * 10.0,
            inclination: 0.1 * (i % 3) as f64,
            omega: 0.4 * i as f64,
            raan: 0.2 * i as f64,
            name: format!("Test meteor {i}"),
        })
        .collect()
}
