//! Input handling: keyboard shortcuts and mouse orbit controls.
//!
//! Translates raw input into abstract camera commands and free-roam
//! rotate/zoom calls. The camera state machine itself never touches an
//! input device, so it stays testable without a display surface.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::camera::{CameraCommand, LockKind, OrbitCamera, ROTATE_SPEED};
use crate::scene::ResetEvent;
use crate::types::{SimSet, SimulationTime};

/// Raw zoom delta per scroll-wheel line. Negative: wheel up zooms in.
const WHEEL_ZOOM_STEP: f32 = -4000.0;

/// Raw zoom delta per second while an arrow key is held.
const KEY_ZOOM_RATE: f32 = 12_000.0;

/// Plugin providing keyboard and mouse input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        // Input runs before the camera set so commands issued this frame
        // are applied this frame.
        app.add_systems(
            Update,
            (keyboard_shortcuts, mouse_orbit_controls).before(SimSet::Camera),
        );
    }
}

/// Handle keyboard shortcuts for camera locks and simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut sim_time: ResMut<SimulationTime>,
    mut camera_commands: MessageWriter<CameraCommand>,
    mut reset_events: MessageWriter<ResetEvent>,
) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        sim_time.paused = !sim_time.paused;
        info!(
            "simulation {}",
            if sim_time.paused { "paused" } else { "running" }
        );
    }

    // Time controls: [ and ] to adjust simulation speed
    if keys.just_pressed(KeyCode::BracketLeft) {
        sim_time.scale = (sim_time.scale * 0.5).max(1.0);
        info!("time scale: {} units/s", sim_time.scale);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        sim_time.scale = (sim_time.scale * 2.0).min(320.0);
        info!("time scale: {} units/s", sim_time.scale);
    }

    // Lock commands
    if keys.just_pressed(KeyCode::KeyS) {
        camera_commands.write(CameraCommand::Lock(LockKind::Sun));
    }
    if keys.just_pressed(KeyCode::KeyE) {
        camera_commands.write(CameraCommand::Lock(LockKind::Earth));
    }
    if keys.just_pressed(KeyCode::KeyM) {
        camera_commands.write(CameraCommand::FirstMeteor);
    }
    if keys.just_pressed(KeyCode::KeyN) {
        camera_commands.write(CameraCommand::NextMeteor);
    }
    if keys.just_pressed(KeyCode::KeyP) {
        camera_commands.write(CameraCommand::PrevMeteor);
    }
    if keys.just_pressed(KeyCode::Escape) {
        camera_commands.write(CameraCommand::Unlock);
    }

    // View controls
    if keys.just_pressed(KeyCode::KeyC) {
        camera_commands.write(CameraCommand::Reset);
    }
    if keys.just_pressed(KeyCode::KeyA) {
        camera_commands.write(CameraCommand::ToggleAutoRotate);
    }

    // Arrow keys: continuous zoom while held
    let dt = time.delta_secs();
    if keys.pressed(KeyCode::ArrowUp) {
        camera_commands.write(CameraCommand::ZoomBy(-KEY_ZOOM_RATE * dt));
    }
    if keys.pressed(KeyCode::ArrowDown) {
        camera_commands.write(CameraCommand::ZoomBy(KEY_ZOOM_RATE * dt));
    }

    // R: reset the scene (belt, camera, time)
    if keys.just_pressed(KeyCode::KeyR) {
        reset_events.write(ResetEvent);
    }
}

/// Handle mouse drag for orbit rotation and the wheel for zoom.
fn mouse_orbit_controls(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut camera: ResMut<OrbitCamera>,
    mut camera_commands: MessageWriter<CameraCommand>,
    mut contexts: EguiContexts,
) {
    // Don't fight the overlay for the pointer.
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_pointer_input() {
            return;
        }
    }

    if mouse_buttons.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        camera.rotate(
            mouse_motion.delta.x * ROTATE_SPEED,
            mouse_motion.delta.y * ROTATE_SPEED,
        );
    }

    if mouse_scroll.delta.y != 0.0 {
        camera_commands.write(CameraCommand::ZoomBy(mouse_scroll.delta.y * WHEEL_ZOOM_STEP));
    }
}
