//! Starfall - Real-time Orbital Visualization Core
//!
//! A desktop presentation of a small solar system: orbit-bound bodies,
//! a locking orbit camera, and a procedurally generated meteor belt.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use starfall::assets::SceneAssets;
use starfall::body::BodyPlugin;
use starfall::camera::{CameraPlugin, OrbitCamera};
use starfall::input::InputPlugin;
use starfall::scene::ScenePlugin;
use starfall::spawn::SpawnPlugin;
use starfall::time::TimePlugin;
use starfall::types::SimulationTime;
use starfall::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(SimulationTime::default())
        .insert_resource(OrbitCamera::default())
        .insert_resource(SceneAssets::default())
        // Add simulation plugins
        .add_plugins((
            TimePlugin,
            BodyPlugin,
            CameraPlugin,
            SpawnPlugin,
            ScenePlugin,
            InputPlugin,
            UiPlugin,
        ))
        .run();
}
