//! Scene composition: the Sun, the Earth, a comet, and the meteor belt.
//!
//! Bodies are spawned here and torn down here; nothing else owns them.
//! The meteor belt is queued as a progressive population run rather than
//! created in one frame.

use bevy::prelude::*;

use crate::assets::SceneAssets;
use crate::body::Body;
use crate::camera::OrbitCamera;
use crate::orbit::{earth_elements, meteor_belt_records, OrbitalElements};
use crate::rock::rock_mesh;
use crate::spawn::{MeteorPopulation, PopulationBatch, MAX_METEORS, SPAWN_BATCH_SIZE};
use crate::types::{BodyKind, SimulationTime};

/// Visual radius of the Sun at the origin.
pub const SUN_RADIUS: f64 = 40.0;

/// Visual radius of the Earth.
pub const EARTH_RADIUS: f64 = 6.0;

/// Visual radius of the comet.
pub const COMET_RADIUS: f64 = 3.0;

/// Rock seed for the comet's shape.
const COMET_SEED: u32 = 777;

/// Event to trigger a full scene reset: despawn the belt, re-queue its
/// population, and restore camera and time to their initial state.
#[derive(Message)]
pub struct ResetEvent;

/// Plugin providing scene setup and reset.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ResetEvent>()
            .add_systems(Startup, setup_scene)
            .add_systems(Update, handle_reset);
    }
}

/// The comet's elongated orbit.
fn comet_elements() -> OrbitalElements {
    OrbitalElements::new(320.0, 0.62, 1150.0, 0.35, 2.4, 1.1)
        .expect("comet elements are a compile-time constant set")
}

/// Spawn the fixed bodies and queue the meteor belt.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut camera: ResMut<OrbitCamera>,
    mut population: ResMut<MeteorPopulation>,
    assets: Res<SceneAssets>,
    sim_time: Res<SimulationTime>,
) {
    // Sun: emissive, at the origin, lights the scene.
    let sun_color = BodyKind::Sun.traits().base_color;
    commands.spawn((
        Body::new("Sun", BodyKind::Sun, SUN_RADIUS),
        Mesh3d(meshes.add(Sphere::new(SUN_RADIUS as f32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: sun_color,
            emissive: sun_color.to_linear() * 2.0,
            ..default()
        })),
        Transform::default(),
    ));
    commands.spawn((
        PointLight {
            intensity: 2e9,
            range: 4.0 * crate::camera::MAX_DISTANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));

    // Earth: orbit-bound, textured when the host supplied a texture.
    let mut earth = Body::with_orbit("Earth", BodyKind::Earth, EARTH_RADIUS, earth_elements(), 0.0);
    earth.update_orbit(sim_time.current);
    let earth_position = earth.position().as_vec3();
    commands.spawn((
        earth,
        Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS as f32))),
        MeshMaterial3d(assets.material_for(
            "earth",
            BodyKind::Earth.traits().base_color,
            &mut materials,
        )),
        Transform::from_translation(earth_position),
    ));

    // One comet on an elongated orbit, with a procedural rock shape.
    let mut comet = Body::with_orbit("Tempel", BodyKind::Comet, COMET_RADIUS, comet_elements(), 0.0);
    comet.update_orbit(sim_time.current);
    let comet_position = comet.position().as_vec3();
    commands.spawn((
        comet,
        Mesh3d(meshes.add(rock_mesh(COMET_RADIUS as f32, 16, COMET_SEED))),
        MeshMaterial3d(assets.material_for(
            "comet",
            BodyKind::Comet.traits().base_color,
            &mut materials,
        )),
        Transform::from_translation(comet_position),
    ));

    // The free-roam distance floor is governed by the Sun while the
    // camera orbits near the origin.
    camera.origin_body_radius = Some(SUN_RADIUS as f32);

    // Queue the belt; the spawn system chews through it one batch per frame.
    population.batch = Some(PopulationBatch::new(
        meteor_belt_records(),
        SPAWN_BATCH_SIZE,
        MAX_METEORS,
    ));

    info!("scene ready; meteor belt population queued");
}

/// Handle scene reset events.
///
/// Despawns the meteor belt, re-queues its population, and restores the
/// camera and simulation time. The Sun, Earth, and comet persist.
fn handle_reset(
    mut commands: Commands,
    mut reset_events: MessageReader<ResetEvent>,
    mut population: ResMut<MeteorPopulation>,
    mut camera: ResMut<OrbitCamera>,
    mut sim_time: ResMut<SimulationTime>,
    bodies: Query<(Entity, &Body)>,
) {
    if reset_events.read().next().is_none() {
        return;
    }
    reset_events.clear();

    info!("resetting scene...");

    for (entity, body) in bodies.iter() {
        if body.kind() == BodyKind::Meteor {
            commands.entity(entity).despawn();
        }
    }

    // Unlock before the despawns land so the camera never tracks a
    // torn-down body.
    camera.reset();
    camera.set_meteors(Vec::new());
    sim_time.reset();

    population.batch = Some(PopulationBatch::new(
        meteor_belt_records(),
        SPAWN_BATCH_SIZE,
        MAX_METEORS,
    ));

    info!("scene reset complete");
}
