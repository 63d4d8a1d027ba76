//! # Scattering simulator
//!
//! This module defines [`Simulator`](crate::simulator::Simulator), the run controller of
//! the crate. A simulator owns an immutable [`Planet`](crate::planet::Planet), the
//! asymptotic approach speed V∞ and the [`SimulationParams`](crate::params::SimulationParams);
//! each call to [`Simulator::run`](crate::simulator::Simulator::run) performs one
//! complete scattering experiment:
//!
//! 1. derive the incoming hyperbola with [`HyperbolicApproach`](crate::approach::HyperbolicApproach),
//! 2. integrate with [`step`](crate::integrator::step) until the particle recedes beyond
//!    `escape_distance_factor × r₀`,
//! 3. measure the outgoing direction against the +x axis and combine it with the incoming
//!    asymptote angle into the deflection angle.
//!
//! All per-run state (particle state, trajectory, energy log, pericenter tracker) lives
//! inside the call and is moved into the returned
//! [`ScatteringResult`](crate::simulator::ScatteringResult): a simulator can be reused and
//! shared between threads, and results never alias each other.
//!
//! ## Typical usage
//!
//! ```rust
//! use flyby::density::DensityProfile;
//! use flyby::params::SimulationParams;
//! use flyby::simulator::Simulator;
//!
//! let params = SimulationParams::builder()
//!     .gravitational_constant(1.0)
//!     .build()
//!     .unwrap();
//!
//! // unit mass, unit radius planet approached at its surface circular speed
//! let density = DensityProfile::Uniform { density: 3.0 / (4.0 * std::f64::consts::PI) };
//! let sim = Simulator::new(1.0, density, 1.0, params).unwrap();
//!
//! let result = sim.run(5.0).unwrap();
//! assert!(result.pericenter > 1.0);
//! assert!(result.deflection_angle > 0.0);
//! ```

use nalgebra::Vector2;

use crate::{
    approach::HyperbolicApproach,
    constants::{Meter, Radian},
    density::DensityFunction,
    flyby_errors::FlybyError,
    integrator::{step, EnergySample, RunLog},
    params::SimulationParams,
    planet::Planet,
    sweep::{linspace, Sweep},
};

/// Outcome of one scattering experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringResult {
    /// Impact parameter of the run, in planet radii.
    pub impact_parameter: f64,
    /// Total deflection of the velocity, in radians.
    pub deflection_angle: Radian,
    /// Smallest distance to the center reached during the run.
    pub pericenter: Meter,
    /// Number of integration steps taken.
    pub steps: usize,
    pub trajectory: Vec<Vector2<f64>>,
    pub energy_log: Vec<EnergySample>,
}

#[derive(Debug, Clone)]
pub struct Simulator<D> {
    planet: Planet<D>,
    v_inf: f64,
    params: SimulationParams,
}

impl<D: DensityFunction> Simulator<D> {
    /// Build a simulator for a planet of radius `radius` and density law `density`.
    ///
    /// Arguments
    /// -----------------
    /// * `radius`: planet radius R (> 0).
    /// * `density`: radial density law, owned by the planet.
    /// * `velocity_multiplier`: V∞ in units of the surface circular speed √(μ/R) (> 0).
    /// * `params`: validated simulation parameters.
    ///
    /// Return
    /// ----------
    /// * The simulator, or
    ///   - [`FlybyError::InvalidParameter`] if `params` fails validation,
    ///   - [`FlybyError::InvalidArgument`] for a non-physical radius or multiplier,
    ///   - the density/quadrature error raised while integrating the planet mass.
    ///
    /// See also
    /// ------------
    /// * [`Planet::new`] – Mass integration and radius checks.
    pub fn new(
        radius: Meter,
        density: D,
        velocity_multiplier: f64,
        params: SimulationParams,
    ) -> Result<Self, FlybyError> {
        params.validate()?;
        if !(velocity_multiplier.is_finite() && velocity_multiplier > 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "velocity multiplier must be finite and > 0, got {velocity_multiplier}"
            )));
        }

        let planet = Planet::new(
            radius,
            density,
            params.gravitational_constant,
            params.quadrature(),
        )?;
        let v_inf = velocity_multiplier * planet.surface_circular_speed();

        tracing::debug!(
            radius,
            mass = planet.total_mass(),
            v_inf,
            "scattering simulator ready"
        );

        Ok(Simulator {
            planet,
            v_inf,
            params,
        })
    }

    pub fn planet(&self) -> &Planet<D> {
        &self.planet
    }

    /// Asymptotic approach speed V∞.
    pub fn v_inf(&self) -> f64 {
        self.v_inf
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Incoming orbit used by [`Simulator::run`] for `impact_parameter`.
    pub fn approach(&self, impact_parameter: f64) -> Result<HyperbolicApproach, FlybyError> {
        HyperbolicApproach::new(
            impact_parameter,
            &self.planet,
            self.v_inf,
            self.params.start_distance_factor,
        )
    }

    /// Run one scattering experiment.
    ///
    /// Arguments
    /// -----------------
    /// * `impact_parameter`: b ≥ 0, in planet radii.
    ///
    /// Return
    /// ----------
    /// * A freshly allocated [`ScatteringResult`], or
    ///   - [`FlybyError::InvalidArgument`] for a negative impact parameter,
    ///   - [`FlybyError::RunDidNotEscape`] if `max_steps` is reached before the escape radius,
    ///   - the density/quadrature error of the failing step.
    pub fn run(&self, impact_parameter: f64) -> Result<ScatteringResult, FlybyError> {
        let approach = self.approach(impact_parameter)?;
        let mut state = approach.initial_state();
        let mut log = RunLog::new();

        let escape_radius = self.params.escape_distance_factor * approach.start_radius;

        tracing::debug!(
            impact_parameter,
            eccentricity = approach.eccentricity,
            start_radius = approach.start_radius,
            "starting scattering run"
        );

        let mut steps = 0usize;
        while state.distance < escape_radius {
            if steps >= self.params.max_steps {
                return Err(FlybyError::RunDidNotEscape {
                    impact_parameter,
                    steps,
                });
            }
            step(
                &self.planet,
                self.params.step_fraction,
                &mut state,
                &mut log,
            )?;
            steps += 1;
        }

        let dot = state.velocity.dot(&Vector2::x()) / state.speed;
        let outgoing_angle = dot.clamp(-1.0, 1.0).acos();
        let deflection_angle = outgoing_angle + approach.asymptote_angle - std::f64::consts::PI;

        tracing::debug!(
            impact_parameter,
            steps,
            deflection_angle,
            pericenter = log.pericenter,
            "scattering run finished"
        );

        Ok(ScatteringResult {
            impact_parameter,
            deflection_angle,
            pericenter: log.pericenter,
            steps,
            trajectory: log.trajectory,
            energy_log: log.energy_log,
        })
    }

    /// Run the experiment for `count` impact parameters evenly spaced on
    /// `[0, max_impact_parameter]` (both ends included).
    ///
    /// Return
    /// ----------
    /// * A [`Sweep`] holding the results in increasing impact parameter order, or
    ///   - [`FlybyError::InvalidArgument`] for `count = 0` or a negative range,
    ///   - [`FlybyError::SweepRunFailed`] wrapping the error of the first failing run.
    pub fn sweep(&self, max_impact_parameter: f64, count: usize) -> Result<Sweep, FlybyError> {
        if !(max_impact_parameter.is_finite() && max_impact_parameter >= 0.0) {
            return Err(FlybyError::InvalidArgument(format!(
                "maximum impact parameter must be finite and >= 0, got {max_impact_parameter}"
            )));
        }
        let impacts = linspace(0.0, max_impact_parameter, count)?;

        tracing::info!(count, max_impact_parameter, "starting impact parameter sweep");

        let results = impacts
            .into_iter()
            .map(|b| {
                self.run(b).map_err(|err| {
                    tracing::warn!(impact_parameter = b, error = %err, "scattering run failed");
                    FlybyError::SweepRunFailed {
                        impact_parameter: b,
                        source: Box::new(err),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sweep = Sweep::new(results);
        if let Some(best) = sweep.max_deflection() {
            tracing::info!(
                impact_parameter = best.impact_parameter,
                deflection_angle = best.deflection_angle,
                "sweep finished"
            );
        }
        Ok(sweep)
    }
}
