//! # Hyperbolic approach initialization
//!
//! This module derives the incoming orbit of a scattering run from its conserved
//! quantities, in the exterior Kepler field of the total planet mass:
//!
//! 1. Areal constant `c = b·R·V∞`.
//! 2. Eccentricity `e = √(1 + V∞²c²/μ²)` and orbital parameter (semi-latus rectum) `p = c²/μ`.
//! 3. Asymptote angle `θ∞ = arccos(−1/e)`, measured from the pericenter direction (+x).
//! 4. Starting radius `r₀ = factor · max(b·R, R)`.
//! 5. Starting true anomaly θ₀ from `r(θ) = p / (1 + e·cos θ)` at `r = r₀`.
//! 6. Starting speed from the vis-viva relation `v₀ = √(V∞² + 2μ/r₀)`.
//! 7. Velocity direction from the conservation of `c`.
//!
//! The starting radius is far enough that the particle starts in the Kepler regime, so
//! the interior density profile plays no part in the initialization. With `b = 0` the
//! conic degenerates into the radial line (`c = 0`, `e = 1`, `p = 0`) and every formula
//! above stays finite.
//!
//! [`ConicState`](crate::approach::ConicState) goes the other way: it recovers the
//! osculating conic (eccentricity, pericenter, energy) from a position/velocity pair.

use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::{
    constants::{Meter, Radian},
    density::DensityFunction,
    flyby_errors::FlybyError,
    integrator::ParticleState,
    planet::Planet,
};

/// Incoming hyperbola of one scattering run and its starting state.
///
/// Units
/// -----
/// * `impact_parameter`: planet radii (dimensionless).
/// * `angular_momentum`: m²·s⁻¹ (areal constant c).
/// * `orbital_parameter`, `start_radius`: meters.
/// * `asymptote_angle`, `start_angle`: radians.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperbolicApproach {
    pub impact_parameter: f64,
    pub angular_momentum: f64,
    pub eccentricity: f64,
    pub orbital_parameter: Meter,
    pub asymptote_angle: Radian,
    pub start_radius: Meter,
    pub start_angle: Radian,
    pub start_position: Vector2<f64>,
    pub start_velocity: Vector2<f64>,
}

impl HyperbolicApproach {
    /// Derive the approach orbit for impact parameter `impact_parameter`.
    ///
    /// Arguments
    /// -----------------
    /// * `impact_parameter`: b ≥ 0, in planet radii.
    /// * `planet`: the scattering body (R and μ are used).
    /// * `v_inf`: asymptotic approach speed V∞ > 0.
    /// * `start_distance_factor`: r₀ multiplier (> 1).
    ///
    /// Return
    /// ----------
    /// * The approach, or [`FlybyError::InvalidArgument`] for a negative or non-finite
    ///   impact parameter or speed.
    pub fn new<D: DensityFunction>(
        impact_parameter: f64,
        planet: &Planet<D>,
        v_inf: f64,
        start_distance_factor: f64,
    ) -> Result<Self, FlybyError> {
        if !(impact_parameter.is_finite() && impact_parameter >= 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "impact parameter must be finite and >= 0, got {impact_parameter}"
            )));
        }
        if !(v_inf.is_finite() && v_inf > 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "asymptotic speed must be finite and > 0, got {v_inf}"
            )));
        }

        let radius = planet.radius();
        let mu = planet.mu();

        let c = impact_parameter * radius * v_inf;
        let start_energy = v_inf * v_inf;
        let ecc = (1.0 + start_energy * c * c / (mu * mu)).sqrt();
        let orb_param = c * c / mu;
        let inf_angle = (-1.0 / ecc).acos();

        let start_radius = (impact_parameter * radius).max(radius) * start_distance_factor;

        // r(θ) = p / (1 + e cos θ)  ⇒  cos θ = (p/r − 1) / e
        let start_cos = ((orb_param / start_radius - 1.0) / ecc).clamp(-1.0, 1.0);
        let start_angle = start_cos.acos();
        let start_position = Vector2::new(
            start_radius * start_angle.cos(),
            start_radius * start_angle.sin(),
        );

        let v = (start_energy + 2.0 * mu / start_radius).sqrt();
        let vel_angle = PI - (c / (start_radius * v)).clamp(-1.0, 1.0).asin();
        let start_velocity = Vector2::new(
            v * (start_angle - vel_angle).cos(),
            v * (start_angle - vel_angle).sin(),
        );

        Ok(HyperbolicApproach {
            impact_parameter,
            angular_momentum: c,
            eccentricity: ecc,
            orbital_parameter: orb_param,
            asymptote_angle: inf_angle,
            start_radius,
            start_angle,
            start_position,
            start_velocity,
        })
    }

    /// Particle state at the start of the run (time 0).
    pub fn initial_state(&self) -> ParticleState {
        ParticleState::new(self.start_position, self.start_velocity)
    }

    /// Deflection of a pure point-mass hyperbola: `π − 2·arccos(1/e)`.
    ///
    /// Matches the integrated deflection whenever the pericenter stays above the surface.
    pub fn keplerian_deflection(&self) -> Radian {
        PI - 2.0 * (1.0 / self.eccentricity).clamp(-1.0, 1.0).acos()
    }

    /// Pericenter of the point-mass hyperbola: `p / (1 + e)`.
    pub fn keplerian_pericenter(&self) -> Meter {
        self.orbital_parameter / (1.0 + self.eccentricity)
    }
}

/// Osculating conic of a planar state in a Kepler field of parameter μ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicState {
    pub eccentricity: f64,
    pub pericenter: Meter,
    /// Specific orbital energy v²/2 − μ/r.
    pub energy: f64,
}

impl ConicState {
    /// Recover the conic from position and velocity through the Laplace–Runge–Lenz vector.
    ///
    /// Return
    /// ----------
    /// * `None` for a radial state (zero angular momentum), where the conic degenerates.
    pub fn from_state(position: &Vector2<f64>, velocity: &Vector2<f64>, mu: f64) -> Option<Self> {
        let distance = position.norm();
        let ang_mom = position.perp(velocity);
        if ang_mom == 0.0 || distance == 0.0 {
            return None;
        }

        // v × h for h = ang_mom·ẑ is (v_y·h, −v_x·h)
        let lenz_prelim = Vector2::new(velocity.y * ang_mom, -velocity.x * ang_mom) / mu;
        let lenz_vector = lenz_prelim - position / distance;

        let eccentricity = lenz_vector.norm();
        Some(ConicState {
            eccentricity,
            pericenter: ang_mom * ang_mom / (mu * (1.0 + eccentricity)),
            energy: velocity.norm_squared() / 2.0 - mu / distance,
        })
    }
}
