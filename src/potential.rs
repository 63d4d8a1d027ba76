//! # Gravitational potential model
//!
//! Specific potential energy φ(d) of a particle at distance d from the center of a
//! [`Planet`](crate::planet::Planet):
//!
//! ```text
//! φ(d) = −μ/d                              d > R
//! φ(d) = −∫_d^R g(s) ds − μ/R              d ≤ R
//! ```
//!
//! where g is [`Planet::force_magnitude`](crate::planet::Planet::force_magnitude). The
//! interior branch is the work done by the field when the particle moves from the surface
//! down to d, added to the surface value. The potential feeds only the energy
//! diagnostic of the integrator, never the dynamics.

use crate::{
    constants::Meter, density::DensityFunction, flyby_errors::FlybyError, planet::Planet,
    quadrature::integrate,
};

impl<D: DensityFunction> Planet<D> {
    /// Specific potential at `distance`.
    ///
    /// Return
    /// ----------
    /// * φ(d), continuous at the surface; [`FlybyError::InvalidArgument`] for a negative or
    ///   non-finite distance; quadrature/density errors of the interior branch.
    pub fn potential(&self, distance: Meter) -> Result<f64, FlybyError> {
        if !(distance.is_finite() && distance >= 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "distance must be finite and >= 0, got {distance}"
            )));
        }

        let radius = self.radius();
        let surface = -self.mu() / radius;
        if distance > radius {
            return Ok(-self.mu() / distance);
        }

        let work = integrate(
            |s| self.force_magnitude(s),
            distance,
            radius,
            self.quadrature(),
        )?;
        Ok(-work + surface)
    }
}

#[cfg(test)]
mod potential_test {
    use super::*;
    use crate::{density::DensityProfile, quadrature::QuadratureSettings};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn unit_planet() -> Planet<DensityProfile> {
        Planet::new(
            1.0,
            DensityProfile::Uniform {
                density: 3.0 / (4.0 * PI),
            },
            1.0,
            QuadratureSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_exterior_closed_form() {
        let planet = unit_planet();
        assert_relative_eq!(planet.potential(4.0).unwrap(), -0.25, max_relative = 1e-12);
    }

    #[test]
    fn test_uniform_interior() {
        let planet = unit_planet();
        // φ(r) = −μ(3R² − r²)/(2R³)
        assert_relative_eq!(planet.potential(0.0).unwrap(), -1.5, max_relative = 1e-9);
        assert_relative_eq!(
            planet.potential(0.5).unwrap(),
            -(3.0 - 0.25) / 2.0,
            max_relative = 1e-9
        );
        assert_relative_eq!(planet.potential(1.0).unwrap(), -1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_continuous_at_surface() {
        let planet = unit_planet();
        let inside = planet.potential(1.0 - 1e-9).unwrap();
        let outside = planet.potential(1.0 + 1e-9).unwrap();
        assert_relative_eq!(inside, outside, max_relative = 1e-7);
    }

    #[test]
    fn test_interior_is_monotonic() {
        let planet = Planet::new(
            1.0,
            DensityProfile::Linear {
                central_density: 2.0,
                gradient: -1.5,
            },
            1.0,
            QuadratureSettings::default(),
        )
        .unwrap();

        let phi: Vec<f64> = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
            .iter()
            .map(|&r| planet.potential(r).unwrap())
            .collect();
        assert!(phi.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let planet = unit_planet();
        assert!(planet.potential(-1.0).is_err());
    }
}
