//! Scene lifecycle tests: startup composition and reset.

use bevy::prelude::*;
use starfall::body::{Body, BodyPlugin};
use starfall::camera::OrbitCamera;
use starfall::orbit::meteor_belt_records;
use starfall::scene::{ResetEvent, ScenePlugin, SUN_RADIUS};
use starfall::spawn::SpawnPlugin;
use starfall::types::{BodyKind, SimulationTime};

fn create_scene_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SimulationTime::default())
        .insert_resource(OrbitCamera::default())
        .insert_resource(Assets::<Mesh>::default())
        .insert_resource(Assets::<StandardMaterial>::default())
        .add_plugins((BodyPlugin, SpawnPlugin, ScenePlugin));
    app
}

fn count_kind(app: &mut App, kind: BodyKind) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&Body>();
    query.iter(world).filter(|body| body.kind() == kind).count()
}

#[test]
fn test_startup_spawns_fixed_bodies_and_queues_belt() {
    let mut app = create_scene_app();
    app.update();

    assert_eq!(count_kind(&mut app, BodyKind::Sun), 1);
    assert_eq!(count_kind(&mut app, BodyKind::Earth), 1);
    assert_eq!(count_kind(&mut app, BodyKind::Comet), 1);

    let camera = app.world().resource::<OrbitCamera>();
    assert_eq!(camera.origin_body_radius, Some(SUN_RADIUS as f32));

    // The belt fills progressively, not in one frame.
    let belt_size = meteor_belt_records().len();
    let first_frame = count_kind(&mut app, BodyKind::Meteor);
    assert!(first_frame < belt_size, "belt must not appear in a single frame");

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(count_kind(&mut app, BodyKind::Meteor), belt_size);

    let camera = app.world().resource::<OrbitCamera>();
    assert_eq!(camera.meteors.len(), belt_size);
}

#[test]
fn test_reset_rebuilds_the_belt() {
    let mut app = create_scene_app();
    for _ in 0..10 {
        app.update();
    }
    let belt_size = meteor_belt_records().len();
    assert_eq!(count_kind(&mut app, BodyKind::Meteor), belt_size);

    app.world_mut()
        .resource_mut::<Events<ResetEvent>>()
        .send(ResetEvent);

    for _ in 0..10 {
        app.update();
        assert!(count_kind(&mut app, BodyKind::Meteor) <= belt_size);
    }

    assert_eq!(count_kind(&mut app, BodyKind::Meteor), belt_size);
    assert_eq!(count_kind(&mut app, BodyKind::Sun), 1, "the Sun persists");
    assert_eq!(count_kind(&mut app, BodyKind::Earth), 1, "the Earth persists");

    let sim_time = app.world().resource::<SimulationTime>();
    assert!(sim_time.paused, "reset pauses at the initial time");
    assert_eq!(sim_time.current, sim_time.initial);

    let camera = app.world().resource::<OrbitCamera>();
    assert!(!camera.lock_status().is_locked);
    assert_eq!(camera.meteors.len(), belt_size, "lockable list rebuilt");
}
