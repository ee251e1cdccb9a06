//! Orbit camera with a lock/transition state machine.
//!
//! The camera orbits a target point in spherical coordinates and can lock
//! onto a moving body, smoothly transitioning between targets while
//! keeping collision-safe distance bounds. The state machine itself is
//! pure and display-free: Bevy systems feed it commands, body positions,
//! and the frame delta; input capture lives in the input module.

use bevy::math::FloatExt;
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use crate::body::Body;
use crate::types::{BodyKind, SimSet};

/// Flat free-roam minimum orbit distance.
pub const MIN_DISTANCE: f32 = 80.0;

/// Maximum orbit distance in any mode.
pub const MAX_DISTANCE: f32 = 500.0;

/// Default orbit distance for the free pose.
pub const DEFAULT_DISTANCE: f32 = 320.0;

/// Scale applied to zoom-by command deltas.
pub const ZOOM_SPEED: f32 = 1.0;

/// Radians of rotation per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.005;

/// Polar-angle clearance keeping the camera off the poles.
pub const POLE_EPSILON: f32 = 0.05;

/// Closest approach to a body, in multiples of its radius.
pub const SAFE_DISTANCE_FACTOR: f32 = 2.5;

/// The free-roam origin floor applies while the orbit center is within
/// this many origin-body radii of the origin.
const ORIGIN_PROXIMITY_FACTOR: f32 = 4.0;

/// Default framing distance for a lock, in target radii.
pub const LOCK_VIEW_FACTOR: f32 = 8.0;

/// Duration of a lock transition, seconds.
pub const LOCK_TRANSITION_SECS: f32 = 1.5;

/// Marker component for the main camera entity.
#[derive(Component)]
pub struct MainCamera;

/// Which category of body the camera follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockKind {
    Sun,
    Earth,
    Meteor,
}

impl LockKind {
    /// Body kind this lock category targets.
    pub fn body_kind(self) -> BodyKind {
        match self {
            LockKind::Sun => BodyKind::Sun,
            LockKind::Earth => BodyKind::Earth,
            LockKind::Meteor => BodyKind::Meteor,
        }
    }
}

/// Camera follow state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LockMode {
    #[default]
    Free,
    Locked(LockKind),
}

/// Abstract camera commands from the UI layer, mapped 1:1 onto
/// controller operations.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum CameraCommand {
    Reset,
    ToggleAutoRotate,
    Lock(LockKind),
    Unlock,
    ZoomBy(f32),
    NextMeteor,
    PrevMeteor,
    FirstMeteor,
}

/// Lock state snapshot for UI overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LockStatus {
    pub mode: LockMode,
    pub is_locked: bool,
    pub target: Option<Entity>,
}

/// In-flight lock transition. Exists only while a lock change is
/// underway; removed on completion (which commits the lock) or when a
/// newer lock command supersedes it.
#[derive(Clone, Debug)]
struct Transition {
    kind: LockKind,
    entity: Entity,
    start_target: Vec3,
    start_theta: f32,
    start_phi: f32,
    start_radius: f32,
    goal_radius: f32,
    elapsed: f32,
    duration: f32,
}

/// Spherical orbit camera with a lock/transition state machine.
///
/// Exactly one exists per scene; it exclusively owns its spherical
/// coordinates and lock state. The locked entity is a non-owning
/// reference — if the body is torn down, the owner unlocks first (the
/// controller also recovers by unlocking itself, with a warning).
#[derive(Resource, Clone, Debug)]
pub struct OrbitCamera {
    /// Orbit center in world space.
    pub target: Vec3,
    /// Distance from the target.
    pub radius: f32,
    /// Azimuthal angle, radians.
    pub theta: f32,
    /// Polar angle, radians, kept inside `(POLE_EPSILON, π - POLE_EPSILON)`.
    pub phi: f32,
    /// Current minimum distance bound (dynamic, see `tick`).
    pub min_distance: f32,
    /// Maximum distance bound.
    pub max_distance: f32,
    /// Whether the azimuth advances on its own each frame.
    pub auto_rotate: bool,
    /// Ordered lockable meteor list, shared by reference with the scene.
    pub meteors: Vec<Entity>,
    /// Index into `meteors` for next/previous navigation.
    pub meteor_index: usize,
    /// Radius of the large body at the origin, for the free-roam floor.
    pub origin_body_radius: Option<f32>,
    mode: LockMode,
    locked: Option<Entity>,
    transition: Option<Transition>,
    last_eye: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            radius: DEFAULT_DISTANCE,
            theta: -FRAC_PI_2,
            phi: FRAC_PI_3,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            auto_rotate: false,
            meteors: Vec::new(),
            meteor_index: 0,
            origin_body_radius: None,
            mode: LockMode::Free,
            locked: None,
            transition: None,
            last_eye: Vec3::ZERO,
        };
        camera.last_eye = camera.eye();
        camera
    }
}

impl OrbitCamera {
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Snapshot of the lock state for UI overlays.
    pub fn lock_status(&self) -> LockStatus {
        LockStatus {
            mode: self.mode,
            is_locked: matches!(self.mode, LockMode::Locked(_)),
            target: self.locked,
        }
    }

    /// Camera world position for the current pose.
    pub fn eye(&self) -> Vec3 {
        self.target + spherical_offset(self.radius, self.theta, self.phi)
    }

    /// Replace the lockable meteor list, clamping the index into range.
    pub fn set_meteors(&mut self, meteors: Vec<Entity>) {
        self.meteors = meteors;
        self.meteor_index = self.meteor_index.min(self.meteors.len().saturating_sub(1));
    }

    /// Restore the default free pose, keeping the scene wiring (meteor
    /// list and origin-body floor).
    pub fn reset(&mut self) {
        let meteors = std::mem::take(&mut self.meteors);
        let origin_body_radius = self.origin_body_radius;
        *self = Self::default();
        self.meteors = meteors;
        self.origin_body_radius = origin_body_radius;
    }

    /// Immediate unlock: lock state and locked reference are cleared
    /// synchronously, along with any transition in flight.
    pub fn unlock(&mut self) {
        self.mode = LockMode::Free;
        self.locked = None;
        self.transition = None;
    }

    /// Free-roam rotation. Accepted in `Free` and in `Locked` without an
    /// active transition (where it orbits the moving target); ignored
    /// while transitioning.
    pub fn rotate(&mut self, delta_theta: f32, delta_phi: f32) {
        if self.is_transitioning() {
            return;
        }
        if !(delta_theta.is_finite() && delta_phi.is_finite()) {
            warn!("ignoring non-finite rotation input");
            return;
        }
        self.theta = (self.theta + delta_theta).rem_euclid(TAU);
        self.phi = (self.phi + delta_phi).clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }

    /// Adjust the orbit distance by a signed delta, then re-clamp to the
    /// current safe bounds. Ignored while transitioning.
    pub fn zoom_by(&mut self, delta: f32) {
        if self.is_transitioning() {
            return;
        }
        if !delta.is_finite() {
            warn!("ignoring non-finite zoom input");
            return;
        }
        let lower = self.min_distance.min(self.max_distance);
        self.radius = (self.radius + delta * ZOOM_SPEED * 0.01).clamp(lower, self.max_distance);
    }

    /// Start a transition toward locking onto `entity`.
    ///
    /// Rejected (no-op) when already locked onto the same body with the
    /// same kind. A new lock supersedes any transition in flight, and the
    /// current lock is cleared first so only one target is ever live.
    pub fn begin_lock(&mut self, kind: LockKind, entity: Entity, goal_radius: f32, duration: f32) {
        if self.mode == LockMode::Locked(kind) && self.locked == Some(entity) {
            debug!("already locked onto this body; ignoring lock command");
            return;
        }
        self.mode = LockMode::Free;
        self.locked = None;
        self.transition = Some(Transition {
            kind,
            entity,
            start_target: self.target,
            start_theta: self.theta,
            start_phi: self.phi,
            start_radius: self.radius,
            goal_radius,
            elapsed: 0.0,
            duration: duration.max(1e-3),
        });
    }

    /// Move the meteor index by `step`, clamped to the list bounds (no
    /// wrapping), and return the body at the new index.
    pub fn step_meteor(&mut self, step: i32) -> Option<Entity> {
        if self.meteors.is_empty() {
            info!("no meteors available to cycle through");
            return None;
        }
        let last = self.meteors.len() as i64 - 1;
        self.meteor_index = (self.meteor_index as i64 + step as i64).clamp(0, last) as usize;
        Some(self.meteors[self.meteor_index])
    }

    /// Jump to the first meteor in the list.
    pub fn first_meteor(&mut self) -> Option<Entity> {
        if self.meteors.is_empty() {
            info!("no meteors available to lock onto");
            return None;
        }
        self.meteor_index = 0;
        Some(self.meteors[0])
    }

    /// Per-frame update. `lookup` resolves an entity to its live
    /// `(position, radius)`; the caller guarantees orbit propagation ran
    /// earlier in the same frame.
    ///
    /// Returns the camera's world position. A non-finite candidate state
    /// freezes the camera at its last valid pose for this frame (logged,
    /// never fatal).
    pub fn tick(&mut self, dt: f32, lookup: impl Fn(Entity) -> Option<(Vec3, f32)>) -> Vec3 {
        let saved = (self.target, self.radius, self.theta, self.phi);

        if self.transition.is_some() {
            self.step_transition(dt, &lookup);
        } else {
            self.follow_locked(&lookup);
            if self.auto_rotate {
                self.theta = (self.theta + self.auto_rotate_rate() * dt).rem_euclid(TAU);
            }
        }

        if !self.state_is_finite() {
            warn!("camera state is not finite; keeping last good pose");
            (self.target, self.radius, self.theta, self.phi) = saved;
            return self.last_eye;
        }

        self.clamp_pose();
        self.last_eye = self.eye();
        self.last_eye
    }

    /// Advance the in-flight transition by `dt`.
    fn step_transition(&mut self, dt: f32, lookup: &impl Fn(Entity) -> Option<(Vec3, f32)>) {
        let Some(mut transition) = self.transition.take() else {
            return;
        };
        transition.elapsed += dt;
        let progress = (transition.elapsed / transition.duration).min(1.0);
        let eased = ease_in_out(progress);

        let Some((live_target, body_radius)) = lookup(transition.entity) else {
            warn!("lock target vanished during transition; staying free");
            return;
        };

        // Angles/radius the current eye would have if it were already
        // orbiting the live target.
        let offset = self.eye() - live_target;
        let (raw_theta, raw_phi) = if offset.length_squared() > 1e-8 {
            spherical_angles(offset)
        } else {
            (transition.start_theta, transition.start_phi)
        };
        let fresh_theta = wrap_to_nearest(raw_theta, transition.start_theta);

        // The incoming target's safety bound applies for the whole flight.
        self.min_distance = body_radius * SAFE_DISTANCE_FACTOR;

        self.target = transition.start_target.lerp(live_target, eased);
        self.theta = transition.start_theta.lerp(fresh_theta, eased);
        self.phi = transition.start_phi.lerp(raw_phi, eased);
        self.radius = transition.start_radius.lerp(transition.goal_radius, eased);

        if progress >= 1.0 {
            // Commit the lock: exact goal radius, target snapped to the body.
            self.target = live_target;
            self.radius = transition.goal_radius;
            self.mode = LockMode::Locked(transition.kind);
            self.locked = Some(transition.entity);
        } else {
            self.transition = Some(transition);
        }
    }

    /// Track the locked body and refresh the minimum-distance bound.
    fn follow_locked(&mut self, lookup: &impl Fn(Entity) -> Option<(Vec3, f32)>) {
        match (self.mode, self.locked) {
            (LockMode::Locked(_), Some(entity)) => {
                if let Some((position, radius)) = lookup(entity) {
                    self.target = position;
                    self.min_distance = radius * SAFE_DISTANCE_FACTOR;
                } else {
                    warn!("locked body no longer exists; unlocking");
                    self.unlock();
                    self.min_distance = self.free_min_distance();
                }
            }
            _ => {
                self.min_distance = self.free_min_distance();
            }
        }
    }

    /// Free-roam floor: near a large body at the origin the safe multiple
    /// of its radius applies, else the flat minimum.
    fn free_min_distance(&self) -> f32 {
        match self.origin_body_radius {
            Some(radius) if self.target.length() < radius * ORIGIN_PROXIMITY_FACTOR => {
                radius * SAFE_DISTANCE_FACTOR
            }
            _ => MIN_DISTANCE,
        }
    }

    /// Auto-rotation matches the followed body's own spin rate; the free
    /// pose orbits the scene center at the Sun's rate.
    fn auto_rotate_rate(&self) -> f32 {
        let kind = match self.mode {
            LockMode::Locked(kind) => kind.body_kind(),
            LockMode::Free => BodyKind::Sun,
        };
        kind.traits().spin_rate
    }

    fn state_is_finite(&self) -> bool {
        self.target.is_finite()
            && self.radius.is_finite()
            && self.theta.is_finite()
            && self.phi.is_finite()
    }

    fn clamp_pose(&mut self) {
        self.phi = self.phi.clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let lower = self.min_distance.min(self.max_distance);
        self.radius = self.radius.clamp(lower, self.max_distance);
    }
}

/// Cartesian offset from the orbit center for a spherical pose.
pub fn spherical_offset(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Spherical angles (theta, phi) of a Cartesian offset.
fn spherical_angles(offset: Vec3) -> (f32, f32) {
    let radius = offset.length();
    let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
    let theta = offset.z.atan2(offset.x);
    (theta, phi)
}

/// Quadratic ease-in-out over [0, 1].
pub fn ease_in_out(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

/// Equivalent of `angle` (mod 2π) closest to `reference`, so angle
/// interpolation never takes the long way around.
fn wrap_to_nearest(angle: f32, reference: f32) -> f32 {
    reference + (angle - reference + PI).rem_euclid(TAU) - PI
}

/// Plugin providing the orbit camera and its command handling.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamera>()
            .add_message::<CameraCommand>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (apply_camera_commands, drive_camera)
                    .chain()
                    .in_set(SimSet::Camera),
            );
    }
}

/// Spawn the main camera at the controller's initial pose.
fn setup_camera(mut commands: Commands, camera: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera.eye()).looking_at(camera.target, Vec3::Y),
        MainCamera,
    ));
}

/// Map abstract camera commands onto controller operations.
fn apply_camera_commands(
    mut command_reader: MessageReader<CameraCommand>,
    mut camera: ResMut<OrbitCamera>,
    bodies: Query<(Entity, &Body)>,
) {
    for command in command_reader.read() {
        match *command {
            CameraCommand::Reset => {
                camera.reset();
                info!("camera reset to free pose");
            }
            CameraCommand::ToggleAutoRotate => {
                camera.auto_rotate = !camera.auto_rotate;
                info!(
                    "auto-rotate {}",
                    if camera.auto_rotate { "on" } else { "off" }
                );
            }
            CameraCommand::Unlock => camera.unlock(),
            CameraCommand::ZoomBy(delta) => camera.zoom_by(delta),
            CameraCommand::Lock(kind) => {
                let entity = match kind {
                    LockKind::Meteor => camera.meteors.get(camera.meteor_index).copied(),
                    _ => bodies
                        .iter()
                        .find(|(_, body)| body.kind() == kind.body_kind())
                        .map(|(entity, _)| entity),
                };
                lock_camera_onto(&mut camera, kind, entity, &bodies);
            }
            CameraCommand::NextMeteor => {
                let entity = camera.step_meteor(1);
                lock_camera_onto(&mut camera, LockKind::Meteor, entity, &bodies);
            }
            CameraCommand::PrevMeteor => {
                let entity = camera.step_meteor(-1);
                lock_camera_onto(&mut camera, LockKind::Meteor, entity, &bodies);
            }
            CameraCommand::FirstMeteor => {
                let entity = camera.first_meteor();
                lock_camera_onto(&mut camera, LockKind::Meteor, entity, &bodies);
            }
        }
    }
}

/// Begin a lock transition onto `entity`, framing it by its radius.
/// Locking onto a missing body is a no-op with a logged notice.
fn lock_camera_onto(
    camera: &mut OrbitCamera,
    kind: LockKind,
    entity: Option<Entity>,
    bodies: &Query<(Entity, &Body)>,
) {
    let Some(entity) = entity else {
        info!("no body available for {:?} lock", kind);
        return;
    };
    let Ok((_, body)) = bodies.get(entity) else {
        info!("lock target for {:?} no longer exists", kind);
        return;
    };
    let radius = body.radius() as f32;
    let goal = (radius * LOCK_VIEW_FACTOR).clamp(radius * SAFE_DISTANCE_FACTOR, MAX_DISTANCE);
    camera.begin_lock(kind, entity, goal, LOCK_TRANSITION_SECS);
}

/// Per-frame camera update: runs after orbit propagation so a locked
/// camera reads this frame's body positions.
fn drive_camera(
    time: Res<Time>,
    mut camera: ResMut<OrbitCamera>,
    bodies: Query<&Body>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let eye = camera.tick(time.delta_secs(), |entity| {
        bodies
            .get(entity)
            .ok()
            .map(|body| (body.position().as_vec3(), body.radius() as f32))
    });

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    transform.translation = eye;
    transform.look_at(camera.target, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_relative_eq!(ease_in_out(0.5), 0.5, epsilon = 1e-6);
        // Slow start, slow end
        assert!(ease_in_out(0.1) < 0.1);
        assert!(ease_in_out(0.9) > 0.9);
    }

    #[test]
    fn test_spherical_round_trip() {
        let offset = spherical_offset(120.0, 1.2, 0.8);
        let (theta, phi) = spherical_angles(offset);
        assert_relative_eq!(theta, 1.2, epsilon = 1e-5);
        assert_relative_eq!(phi, 0.8, epsilon = 1e-5);
        assert_relative_eq!(offset.length(), 120.0, epsilon = 1e-3);
    }

    #[test]
    fn test_wrap_to_nearest() {
        assert_relative_eq!(wrap_to_nearest(0.1, TAU - 0.1), TAU + 0.1, epsilon = 1e-6);
        assert_relative_eq!(wrap_to_nearest(TAU - 0.1, 0.1), -0.1, epsilon = 1e-6);
        assert_relative_eq!(wrap_to_nearest(1.0, 1.5), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zoom_clamps_at_bounds() {
        let mut camera = OrbitCamera {
            min_distance: 80.0,
            max_distance: 500.0,
            radius: 500.0,
            ..Default::default()
        };
        camera.zoom_by(100.0);
        assert_eq!(camera.radius, 500.0, "zoom past the max bound must clamp");

        camera.radius = 80.0;
        camera.zoom_by(-10_000.0);
        assert_eq!(camera.radius, 80.0, "zoom past the min bound must clamp");
    }

    #[test]
    fn test_rotate_clamps_phi_at_poles() {
        let mut camera = OrbitCamera::default();
        camera.rotate(0.0, 100.0);
        assert!(camera.phi <= PI - POLE_EPSILON);
        camera.rotate(0.0, -100.0);
        assert!(camera.phi >= POLE_EPSILON);
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut camera = OrbitCamera::default();
        let theta = camera.theta;
        camera.rotate(f32::NAN, 0.5);
        assert_eq!(camera.theta, theta);

        let radius = camera.radius;
        camera.zoom_by(f32::INFINITY);
        assert_eq!(camera.radius, radius);
    }
}
