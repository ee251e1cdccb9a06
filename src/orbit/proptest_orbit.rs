//! Property-based tests for orbit propagation using proptest.
//!
//! These verify the propagation contract across a wide range of elements:
//! convergence, periodicity, and the circular-orbit radius law.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::OrbitalElements;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The Kepler solve must satisfy M = E - e*sin(E) within tolerance
    /// for all valid eccentricities and mean anomalies.
    #[test]
    fn prop_kepler_solver_convergence(
        mean_anomaly_normalized in 0.0f64..1.0,
        eccentricity in 0.0f64..0.95,
    ) {
        let elements = OrbitalElements::new(150.0, eccentricity, 365.0, 0.0, 0.0, 0.0).unwrap();
        let mean_anomaly = mean_anomaly_normalized * TAU;

        let e_anom = elements.solve_eccentric_anomaly(mean_anomaly);
        prop_assert!(e_anom.is_finite());

        let m_check = e_anom - eccentricity * e_anom.sin();
        let error = (m_check - mean_anomaly).abs();
        prop_assert!(
            error < 1e-5,
            "Kepler solve failed: M={}, e={}, E={}, error={}",
            mean_anomaly, eccentricity, e_anom, error
        );
    }

    /// Propagation output must be finite for any valid elements and any
    /// time, positive or negative.
    #[test]
    fn prop_position_finite(
        eccentricity in 0.0f64..0.95,
        inclination in 0.0f64..TAU,
        omega in 0.0f64..TAU,
        raan in 0.0f64..TAU,
        time in -1.0e6f64..1.0e6,
    ) {
        let elements =
            OrbitalElements::new(150.0, eccentricity, 365.0, inclination, omega, raan).unwrap();
        let pos = elements.position_at(time);
        prop_assert!(pos.is_finite(), "non-finite position at t={}: {:?}", time, pos);
    }

    /// For e=0 the orbit is a circle of radius a, whatever the orientation.
    #[test]
    fn prop_circular_orbit_radius(
        semi_major_axis in 1.0f64..1000.0,
        inclination in 0.0f64..TAU,
        omega in 0.0f64..TAU,
        raan in 0.0f64..TAU,
        time in -10_000.0f64..10_000.0,
    ) {
        let elements =
            OrbitalElements::new(semi_major_axis, 0.0, 365.0, inclination, omega, raan).unwrap();
        let radius = elements.position_at(time).length();
        let error = (radius - semi_major_axis).abs() / semi_major_axis;
        prop_assert!(
            error < 1e-6,
            "circular radius {} deviates from a={}",
            radius, semi_major_axis
        );
    }

    /// Position must repeat after one full period.
    #[test]
    fn prop_position_periodic(
        eccentricity in 0.0f64..0.9,
        inclination in 0.0f64..TAU,
        start_time in 0.0f64..5000.0,
    ) {
        let elements =
            OrbitalElements::new(150.0, eccentricity, 365.0, inclination, 1.0, 2.0).unwrap();

        let a = elements.position_at(start_time);
        let b = elements.position_at(start_time + elements.period());
        let distance = (a - b).length();

        prop_assert!(
            distance < 1e-4 * elements.semi_major_axis(),
            "position not periodic: drift {} at t={}",
            distance, start_time
        );
    }
}
