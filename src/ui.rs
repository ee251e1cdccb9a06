//! Overlay panel: lock status, camera shortcuts, and time controls.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::body::Body;
use crate::camera::{CameraCommand, LockKind, OrbitCamera};
use crate::scene::ResetEvent;
use crate::types::SimulationTime;

/// Plugin that adds the overlay panel.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, overlay_panel);
    }
}

/// Render the bottom overlay panel.
fn overlay_panel(
    mut contexts: EguiContexts,
    mut sim_time: ResMut<SimulationTime>,
    mut camera_commands: MessageWriter<CameraCommand>,
    mut reset_events: MessageWriter<ResetEvent>,
    camera: Res<OrbitCamera>,
    bodies: Query<&Body>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let status = camera.lock_status();
    let status_text = if camera.is_transitioning() {
        "Moving\u{2026}".to_string()
    } else if let Some(name) = status
        .target
        .and_then(|entity| bodies.get(entity).ok())
        .map(Body::name)
    {
        format!("Following {name}")
    } else {
        "Free flight".to_string()
    };

    egui::TopBottomPanel::bottom("overlay")
        .frame(
            egui::Frame::none()
                .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220))
                .inner_margin(egui::Margin::symmetric(16, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // Play/Pause button
                let icon = if sim_time.paused { "\u{25B6}" } else { "\u{23F8}" };
                if ui
                    .button(icon)
                    .on_hover_text(if sim_time.paused {
                        "Play (Space)"
                    } else {
                        "Pause (Space)"
                    })
                    .clicked()
                {
                    sim_time.paused = !sim_time.paused;
                }

                ui.separator();

                ui.label(egui::RichText::new(status_text).monospace());

                ui.separator();

                // Lock targets
                if ui.button("Sun").on_hover_text("Lock onto the Sun (S)").clicked() {
                    camera_commands.write(CameraCommand::Lock(LockKind::Sun));
                }
                if ui.button("Earth").on_hover_text("Lock onto Earth (E)").clicked() {
                    camera_commands.write(CameraCommand::Lock(LockKind::Earth));
                }
                if ui.button("\u{23EE}").on_hover_text("First meteor (M)").clicked() {
                    camera_commands.write(CameraCommand::FirstMeteor);
                }
                if ui.button("\u{25C0}").on_hover_text("Previous meteor (P)").clicked() {
                    camera_commands.write(CameraCommand::PrevMeteor);
                }
                if ui.button("\u{25B6}").on_hover_text("Next meteor (N)").clicked() {
                    camera_commands.write(CameraCommand::NextMeteor);
                }
                if status.is_locked || camera.is_transitioning() {
                    if ui.button("Unlock").on_hover_text("Free flight (Esc)").clicked() {
                        camera_commands.write(CameraCommand::Unlock);
                    }
                }

                ui.separator();

                // Speed selector (time units per real-time second)
                ui.label("Speed:");
                for scale in [5.0, 20.0, 80.0] {
                    let is_selected = (sim_time.scale - scale).abs() < 0.01;
                    if ui
                        .selectable_label(is_selected, format!("{}x", scale as i32))
                        .clicked()
                    {
                        sim_time.scale = scale;
                    }
                }

                ui.separator();

                let auto_label = if camera.auto_rotate {
                    "Auto-rotate: on"
                } else {
                    "Auto-rotate: off"
                };
                if ui.button(auto_label).on_hover_text("Toggle auto-rotate (A)").clicked() {
                    camera_commands.write(CameraCommand::ToggleAutoRotate);
                }

                // Reset buttons
                if ui.button("\u{21BA}").on_hover_text("Reset scene (R)").clicked() {
                    reset_events.write(ResetEvent);
                }
            });
        });
}
