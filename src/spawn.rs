//! Progressive meteor population.
//!
//! Creating the whole belt in one frame would spike that frame, so
//! creation is chunked: a [`PopulationBatch`] holds the explicit state
//! (`next` index plus the accumulated entity list) and a driving system
//! performs one `step` per frame. Teardown cancels the remainder by
//! dropping the batch; a record either fully spawns within one step or
//! not at all.

use bevy::prelude::*;

use crate::assets::SceneAssets;
use crate::body::Body;
use crate::camera::OrbitCamera;
use crate::orbit::ElementRecord;
use crate::rock::rock_mesh;
use crate::types::{BodyKind, SimSet, SimulationTime};

/// Records processed per frame.
pub const SPAWN_BATCH_SIZE: usize = 10;

/// Hard cap on spawned meteors.
pub const MAX_METEORS: usize = 200;

/// Sphere resolution for meteor rocks.
const METEOR_SEGMENTS: u32 = 16;

/// Explicit state of a chunked body-creation run.
#[derive(Clone, Debug)]
pub struct PopulationBatch {
    records: Vec<ElementRecord>,
    next: usize,
    spawned: Vec<Entity>,
    batch_size: usize,
    cap: usize,
}

impl PopulationBatch {
    pub fn new(records: Vec<ElementRecord>, batch_size: usize, cap: usize) -> Self {
        Self {
            records,
            next: 0,
            spawned: Vec::new(),
            batch_size: batch_size.max(1),
            cap,
        }
    }

    /// Index of the next unprocessed record.
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Entities created so far, in spawn order.
    pub fn spawned(&self) -> &[Entity] {
        &self.spawned
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.records.len() || self.spawned.len() >= self.cap
    }

    /// Process up to one batch of records.
    ///
    /// `spawn` turns a record and its index into an entity, or `None` for
    /// a record it chose to skip (malformed input; the skip is the
    /// callee's to log). Returns whether the run is complete.
    pub fn step<F>(&mut self, mut spawn: F) -> bool
    where
        F: FnMut(&ElementRecord, usize) -> Option<Entity>,
    {
        let end = (self.next + self.batch_size).min(self.records.len());
        while self.next < end && self.spawned.len() < self.cap {
            let index = self.next;
            self.next += 1;
            if let Some(entity) = spawn(&self.records[index], index) {
                self.spawned.push(entity);
            }
        }
        self.is_done()
    }
}

/// Resource holding the in-flight population run, if any. Clearing it
/// cancels the remainder.
#[derive(Resource, Default)]
pub struct MeteorPopulation {
    pub batch: Option<PopulationBatch>,
}

/// Plugin driving progressive meteor creation.
pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeteorPopulation>()
            .init_resource::<SceneAssets>()
            // Before the Orbits set so freshly spawned bodies get their
            // first propagation in the same frame.
            .add_systems(Update, populate_meteors.before(SimSet::Orbits));
    }
}

/// Spawn one meteor entity from a validated record.
///
/// Returns `None` (logged) for a malformed record — a bad record skips
/// that single body, never the batch.
pub fn spawn_meteor(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    assets: &SceneAssets,
    record: &ElementRecord,
    index: usize,
    time: f64,
) -> Option<Entity> {
    let elements = match record.elements() {
        Ok(elements) => elements,
        Err(err) => {
            warn!("skipping orbital record {:?}: {err}", record.name);
            return None;
        }
    };

    // Deterministic per-index variation so the belt looks uneven but
    // rebuilds identically.
    let radius = 2.0 + (index % 5) as f64 * 0.6;
    let seed = index as u32;

    let mut body = Body::with_orbit(record.name.clone(), BodyKind::Meteor, radius, elements, 0.0);
    body.update_orbit(time);
    let position = body.position().as_vec3();

    let mesh = meshes.add(rock_mesh(radius as f32, METEOR_SEGMENTS, seed));
    let material = assets.material_for("meteor", BodyKind::Meteor.traits().base_color, materials);

    Some(
        commands
            .spawn((
                body,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(position),
            ))
            .id(),
    )
}

/// Advance the population run by one batch per frame and keep the
/// camera's lockable list in sync.
fn populate_meteors(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut population: ResMut<MeteorPopulation>,
    mut camera: ResMut<OrbitCamera>,
    assets: Res<SceneAssets>,
    sim_time: Res<SimulationTime>,
) {
    let Some(batch) = population.batch.as_mut() else {
        return;
    };

    let done = batch.step(|record, index| {
        spawn_meteor(
            &mut commands,
            &mut meshes,
            &mut materials,
            &assets,
            record,
            index,
            sim_time.current,
        )
    });

    camera.set_meteors(batch.spawned().to_vec());

    if done {
        info!("meteor population complete: {} bodies", batch.spawned().len());
        population.batch = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::meteor_belt_records;

    fn test_records(n: usize) -> Vec<ElementRecord> {
        let belt = meteor_belt_records();
        (0..n)
            .map(|i| {
                let mut record = belt[i % belt.len()].clone();
                record.name = format!("R{i}");
                record
            })
            .collect()
    }

    /// Spawn stub handing out entity ids from a private world.
    fn entity_source() -> impl FnMut() -> Entity {
        let mut world = World::new();
        move || world.spawn_empty().id()
    }

    #[test]
    fn test_batches_process_in_fixed_chunks() {
        let mut fresh = entity_source();
        let mut batch = PopulationBatch::new(test_records(37), 10, 200);

        let mut chunk_sizes = Vec::new();
        loop {
            let before = batch.spawned().len();
            let done = batch.step(|_, _| Some(fresh()));
            chunk_sizes.push(batch.spawned().len() - before);
            if done {
                break;
            }
        }

        assert_eq!(chunk_sizes, vec![10, 10, 10, 7]);
        assert_eq!(batch.spawned().len(), 37);
    }

    #[test]
    fn test_cap_is_never_exceeded() {
        let mut fresh = entity_source();
        let mut batch = PopulationBatch::new(test_records(50), 10, 23);

        while !batch.step(|_, _| Some(fresh())) {
            assert!(batch.spawned().len() <= 23);
        }
        assert_eq!(batch.spawned().len(), 23);
        assert!(batch.is_done());
    }

    #[test]
    fn test_skipped_records_do_not_abort() {
        let mut fresh = entity_source();
        let mut records = test_records(12);
        records[3].eccentricity = 1.5;
        records[7].period = -1.0;

        let mut batch = PopulationBatch::new(records, 5, 200);
        while !batch.step(|record, _| {
            // Mirror the real spawner: validation failure skips one record.
            record.elements().ok().map(|_| fresh())
        }) {}

        assert_eq!(batch.spawned().len(), 10, "two malformed records skipped");
        assert_eq!(batch.next_index(), 12, "all records consumed");
    }

    #[test]
    fn test_empty_input_is_immediately_done() {
        let mut batch = PopulationBatch::new(Vec::new(), 10, 200);
        assert!(batch.is_done());
        assert!(batch.step(|_, _| None));
        assert!(batch.spawned().is_empty());
    }
}
