//! Test utilities for the orbital visualization core.
//!
//! Provides fixtures for creating test elements and cameras, and a
//! headless Bevy app helper for integration-style tests.

use crate::camera::OrbitCamera;
use crate::orbit::{ElementRecord, OrbitalElements};

/// Fixtures for creating test elements and cameras.
pub mod fixtures {
    use super::*;

    /// A circular orbit of the given radius in the reference plane.
    pub fn circular_elements(semi_major_axis: f64) -> OrbitalElements {
        OrbitalElements::new(semi_major_axis, 0.0, 365.0, 0.0, 0.0, 0.0)
            .expect("circular test elements are valid")
    }

    /// An eccentric, tilted orbit.
    pub fn eccentric_elements(semi_major_axis: f64, eccentricity: f64) -> OrbitalElements {
        OrbitalElements::new(semi_major_axis, eccentricity, 500.0, 0.3, 1.2, 0.7)
            .expect("eccentric test elements are valid")
    }

    /// A well-formed element record.
    pub fn valid_record(name: &str) -> ElementRecord {
        ElementRecord {
            semi_major_axis: 200.0,
            eccentricity: 0.1,
            period: 560.0,
            inclination: 0.2,
            omega: 0.5,
            raan: 1.0,
            name: name.to_string(),
        }
    }

    /// A record that fails validation (eccentricity out of range).
    pub fn malformed_record(name: &str) -> ElementRecord {
        ElementRecord {
            eccentricity: 1.7,
            ..valid_record(name)
        }
    }

    /// A camera with explicit distance bounds, mid-range pose.
    pub fn camera_with_bounds(min_distance: f32, max_distance: f32) -> OrbitCamera {
        let mut camera = OrbitCamera::default();
        camera.min_distance = min_distance;
        camera.max_distance = max_distance;
        camera.radius = (min_distance + max_distance) / 2.0;
        camera
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_elements_validate() {
        assert_eq!(fixtures::circular_elements(150.0).eccentricity(), 0.0);
        assert!(fixtures::eccentric_elements(200.0, 0.5).eccentricity() > 0.0);
        assert!(fixtures::valid_record("a").elements().is_ok());
        assert!(fixtures::malformed_record("b").elements().is_err());
    }

    #[test]
    fn test_camera_fixture_is_in_bounds() {
        let camera = fixtures::camera_with_bounds(50.0, 400.0);
        assert!(camera.radius >= camera.min_distance);
        assert!(camera.radius <= camera.max_distance);
    }
}
