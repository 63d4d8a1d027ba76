//! # Planet and density accumulator
//!
//! [`Planet`](crate::planet::Planet) is the immutable description of the scattering
//! body: its radius, its [`DensityFunction`](crate::density::DensityFunction), the
//! gravitational constant in use and the quantities derived once at construction
//! (total mass M and gravitational parameter μ = G·M).
//!
//! The **density accumulator** [`Planet::enclosed_mass`](crate::planet::Planet::enclosed_mass)
//! integrates 4πr²ρ(r) over [0, r] with the adaptive quadrature of
//! [`crate::quadrature`]. By the shell theorem this enclosed mass is all the field at
//! radius r depends on. The field and potential models are implemented on `Planet` in
//! [`crate::field`] and [`crate::potential`].
//!
//! Mass is only counted up to the radius: outside the planet the field is the exterior
//! Kepler field of M, whatever the density function returns beyond R.

use crate::{
    constants::{Kilogram, Meter, FOUR_PI},
    density::DensityFunction,
    flyby_errors::FlybyError,
    quadrature::{integrate, QuadratureSettings},
};

#[derive(Debug, Clone)]
pub struct Planet<D> {
    radius: Meter,
    density: D,
    gravitational_constant: f64,
    quadrature: QuadratureSettings,
    total_mass: Kilogram,
    mu: f64,
}

impl<D: DensityFunction> Planet<D> {
    /// Build a planet and integrate its total mass.
    ///
    /// Arguments
    /// -----------------
    /// * `radius`: planet radius R, finite and > 0.
    /// * `density`: radial density law.
    /// * `gravitational_constant`: Newtonian G, finite and > 0.
    /// * `quadrature`: tolerances used by every mass and potential integral of this planet.
    ///
    /// Return
    /// ----------
    /// * The planet, or
    ///   - [`FlybyError::InvalidArgument`] for a non-physical radius or G, or a profile
    ///     enclosing no mass,
    ///   - [`FlybyError::DensityEvaluation`] / [`FlybyError::QuadratureNonconvergence`]
    ///     raised while integrating M.
    pub fn new(
        radius: Meter,
        density: D,
        gravitational_constant: f64,
        quadrature: QuadratureSettings,
    ) -> Result<Self, FlybyError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "planet radius must be finite and > 0, got {radius}"
            )));
        }
        if !(gravitational_constant.is_finite() && gravitational_constant > 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "gravitational constant must be finite and > 0, got {gravitational_constant}"
            )));
        }

        let mut planet = Planet {
            radius,
            density,
            gravitational_constant,
            quadrature,
            total_mass: 0.0,
            mu: 0.0,
        };

        let total_mass = planet.enclosed_mass(radius)?;
        if !(total_mass > 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "density profile encloses no mass within radius {radius}"
            )));
        }

        planet.total_mass = total_mass;
        planet.mu = gravitational_constant * total_mass;
        Ok(planet)
    }

    /// Mass enclosed in the sphere of radius `r_max`: ∫₀^r_max 4πr²ρ(r) dr.
    ///
    /// Arguments
    /// -----------------
    /// * `r_max`: upper bound, finite and ≥ 0.
    ///
    /// Return
    /// ----------
    /// * The enclosed mass (0 for `r_max = 0`), non-decreasing in `r_max` for any
    ///   non-negative density.
    /// * [`FlybyError::InvalidArgument`] for a negative or non-finite bound,
    ///   [`FlybyError::DensityEvaluation`] if ρ is non-finite or negative at a sampled radius,
    ///   [`FlybyError::QuadratureNonconvergence`] if the tolerance cannot be met.
    pub fn enclosed_mass(&self, r_max: Meter) -> Result<Kilogram, FlybyError> {
        if !(r_max.is_finite() && r_max >= 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "enclosed mass radius must be finite and >= 0, got {r_max}"
            )));
        }

        integrate(
            |r| {
                let rho = self.density.density(r);
                if !rho.is_finite() || rho < 0.0 {
                    return Err(FlybyError::DensityEvaluation {
                        radius: r,
                        value: rho,
                    });
                }
                Ok(FOUR_PI * r * r * rho)
            },
            0.0,
            r_max,
            &self.quadrature,
        )
    }

    pub fn radius(&self) -> Meter {
        self.radius
    }

    pub fn total_mass(&self) -> Kilogram {
        self.total_mass
    }

    /// Gravitational parameter μ = G·M (the `K` of the conic formulas).
    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    pub fn density(&self) -> &D {
        &self.density
    }

    pub(crate) fn quadrature(&self) -> &QuadratureSettings {
        &self.quadrature
    }

    /// Circular orbit speed at the surface, √(μ/R).
    pub fn surface_circular_speed(&self) -> f64 {
        (self.mu / self.radius).sqrt()
    }
}

#[cfg(test)]
mod planet_test {
    use super::*;
    use crate::density::DensityProfile;
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
    fn test_unit_mass_planet() {
        let planet = unit_planet();
        assert_relative_eq!(planet.total_mass(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(planet.mu(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(planet.surface_circular_speed(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_enclosed_mass_scales_with_volume() {
        let planet = unit_planet();
        assert_eq!(planet.enclosed_mass(0.0).unwrap(), 0.0);
        assert_relative_eq!(
            planet.enclosed_mass(0.5).unwrap(),
            0.125,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_earth_like_uniform_mass() {
        let radius = 6.371e6;
        let rho = 5514.0;
        let planet = Planet::new(
            radius,
            DensityProfile::Uniform { density: rho },
            crate::constants::GRAVITATIONAL_CONSTANT,
            QuadratureSettings::default(),
        )
        .unwrap();

        let expected = 4.0 / 3.0 * PI * radius.powi(3) * rho;
        assert_relative_eq!(planet.total_mass(), expected, max_relative = 1e-10);
    }

    #[test]
    fn test_invalid_construction() {
        let settings = QuadratureSettings::default();
        let uniform = DensityProfile::Uniform { density: 1.0 };

        assert!(matches!(
            Planet::new(0.0, uniform.clone(), 1.0, settings),
            Err(FlybyError::InvalidArgument(_))
        ));
        assert!(matches!(
            Planet::new(-2.0, uniform.clone(), 1.0, settings),
            Err(FlybyError::InvalidArgument(_))
        ));
        assert!(matches!(
            Planet::new(1.0, uniform, 0.0, settings),
            Err(FlybyError::InvalidArgument(_))
        ));
        assert!(matches!(
            Planet::new(1.0, DensityProfile::Uniform { density: 0.0 }, 1.0, settings),
            Err(FlybyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_density_failure_surfaces_at_construction() {
        let settings = QuadratureSettings::default();

        let nan = Planet::new(1.0, |_r: f64| f64::NAN, 1.0, settings);
        assert!(matches!(nan, Err(FlybyError::DensityEvaluation { .. })));

        let negative = Planet::new(
            1.0,
            DensityProfile::Linear {
                central_density: 1.0,
                gradient: -2.0,
            },
            1.0,
            settings,
        );
        match negative {
            Err(FlybyError::DensityEvaluation { radius, value }) => {
                assert!(radius > 0.5);
                assert!(value < 0.0);
            }
            other => panic!("expected a density evaluation error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_radius_rejected() {
        let planet = unit_planet();
        assert!(matches!(
            planet.enclosed_mass(-1e-3),
            Err(FlybyError::InvalidArgument(_))
        ));
    }
}
