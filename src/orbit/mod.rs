//! Keplerian orbit propagation: orbital elements + time → 3D position.
//!
//! Coordinate frame:
//! - Y-up world; the orbital plane is XZ at zero inclination.
//! - Heliocentric (attractor at the origin), abstract simulation units.

pub mod records;

#[cfg(test)]
mod proptest_orbit;

pub use records::{earth_elements, meteor_belt_records, ElementRecord};

use bevy::math::DVec3;
use std::f64::consts::TAU;
use thiserror::Error;

/// Convergence tolerance for the Kepler equation solve, radians.
const KEPLER_TOLERANCE: f64 = 1e-6;

/// Iteration cap for the Kepler equation solve. On hitting the cap the
/// best estimate so far is used; propagation never fails for finite inputs.
const KEPLER_MAX_ITERATIONS: u32 = 30;

/// Validation failure for orbital element construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ElementsError {
    #[error("semi-major axis must be positive, got {0}")]
    NonPositiveSemiMajorAxis(f64),
    #[error("orbital period must be positive, got {0}")]
    NonPositivePeriod(f64),
    #[error("eccentricity must be in [0, 1), got {0}")]
    EccentricityOutOfRange(f64),
    #[error("{0} is not finite")]
    NonFinite(&'static str),
}

/// Keplerian orbital elements for computing positions analytically.
///
/// Immutable after construction; all angular values in radians, distances
/// and times in simulation units. Construction validates the invariants
/// (`semi_major_axis > 0`, `period > 0`, `0 ≤ e < 1`), so propagation
/// itself can skip validation on the per-frame fast path.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: f64,
    period: f64,
    inclination: f64,
    arg_periapsis: f64,
    ascending_node: f64,
}

impl OrbitalElements {
    /// Create validated orbital elements.
    ///
    /// # Arguments
    /// * `semi_major_axis` - Semi-major axis, simulation units (> 0)
    /// * `eccentricity` - Orbital eccentricity (0 ≤ e < 1; open orbits not modeled)
    /// * `period` - Time units per full revolution (> 0)
    /// * `inclination` - Orbital plane tilt in radians
    /// * `arg_periapsis` - Argument of periapsis (omega) in radians
    /// * `ascending_node` - Longitude of ascending node (raan) in radians
    ///
    /// Angles are normalized modulo 2π.
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        period: f64,
        inclination: f64,
        arg_periapsis: f64,
        ascending_node: f64,
    ) -> Result<Self, ElementsError> {
        for (value, label) in [
            (semi_major_axis, "semi-major axis"),
            (eccentricity, "eccentricity"),
            (period, "period"),
            (inclination, "inclination"),
            (arg_periapsis, "argument of periapsis"),
            (ascending_node, "ascending node longitude"),
        ] {
            if !value.is_finite() {
                return Err(ElementsError::NonFinite(label));
            }
        }
        if semi_major_axis <= 0.0 {
            return Err(ElementsError::NonPositiveSemiMajorAxis(semi_major_axis));
        }
        if period <= 0.0 {
            return Err(ElementsError::NonPositivePeriod(period));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ElementsError::EccentricityOutOfRange(eccentricity));
        }

        Ok(Self {
            semi_major_axis,
            eccentricity,
            period,
            inclination: inclination.rem_euclid(TAU),
            arg_periapsis: arg_periapsis.rem_euclid(TAU),
            ascending_node: ascending_node.rem_euclid(TAU),
        })
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn arg_periapsis(&self) -> f64 {
        self.arg_periapsis
    }

    pub fn ascending_node(&self) -> f64 {
        self.ascending_node
    }

    /// Solve Kepler's equation M = E - e*sin(E) for eccentric anomaly E
    /// using Newton's method seeded with E₀ = M.
    ///
    /// # Arguments
    /// * `mean_anomaly` - Mean anomaly M in radians, already in [0, 2π)
    ///
    /// # Returns
    /// Eccentric anomaly E in radians. If the iteration cap is reached
    /// before the tolerance, the best estimate so far is returned.
    fn solve_eccentric_anomaly(&self, mean_anomaly: f64) -> f64 {
        let mut e_anomaly = mean_anomaly;

        for _ in 0..KEPLER_MAX_ITERATIONS {
            // f(E) = E - e*sin(E) - M, f'(E) = 1 - e*cos(E)
            let f = e_anomaly - self.eccentricity * e_anomaly.sin() - mean_anomaly;
            let f_prime = 1.0 - self.eccentricity * e_anomaly.cos();

            let delta = f / f_prime;
            e_anomaly -= delta;

            if delta.abs() < KEPLER_TOLERANCE {
                break;
            }
        }

        e_anomaly
    }

    /// Compute true anomaly from eccentric anomaly.
    ///
    /// Uses atan2 for full quadrant coverage:
    /// ν = 2 * atan2(sqrt(1+e) * sin(E/2), sqrt(1-e) * cos(E/2))
    fn true_anomaly(&self, eccentric_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        let half_e = eccentric_anomaly / 2.0;

        let y = (1.0 + e).sqrt() * half_e.sin();
        let x = (1.0 - e).sqrt() * half_e.cos();
        2.0 * y.atan2(x)
    }

    /// Distance from the focus at the given eccentric anomaly.
    fn orbital_radius(&self, eccentric_anomaly: f64) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * eccentric_anomaly.cos())
    }

    /// Position on the orbit at simulation time `t`.
    ///
    /// Defined for all real `t` (negative or many periods out); time is
    /// wrapped into one revolution before the anomaly solve, so
    /// `position_at(t) == position_at(t + period)` up to numerical
    /// tolerance.
    pub fn position_at(&self, t: f64) -> DVec3 {
        let mean_anomaly = TAU * t.rem_euclid(self.period) / self.period;
        let e_anomaly = self.solve_eccentric_anomaly(mean_anomaly);
        let true_anomaly = self.true_anomaly(e_anomaly);
        let radius = self.orbital_radius(e_anomaly);

        // In-plane position, rotated by the argument of periapsis.
        let angle = true_anomaly + self.arg_periapsis;
        let x = radius * angle.cos();
        let z = radius * angle.sin();

        // Tilt the plane about X by the inclination, then rotate about
        // the reference normal (Y) by the ascending node longitude.
        let (sin_i, cos_i) = self.inclination.sin_cos();
        let y_tilted = -z * sin_i;
        let z_tilted = z * cos_i;

        let (sin_o, cos_o) = self.ascending_node.sin_cos();
        DVec3::new(
            x * cos_o + z_tilted * sin_o,
            y_tilted,
            -x * sin_o + z_tilted * cos_o,
        )
    }
}
