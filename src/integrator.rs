//! # Trajectory integrator
//!
//! Fixed-rule, first-order symplectic (semi-implicit) Euler integration of a test
//! particle in the field of a [`Planet`](crate::planet::Planet):
//!
//! ```text
//! Δt      = α · R / |v|
//! v_{n+1} = v_n + a(x_n) · Δt
//! x_{n+1} = x_n + v_{n+1} · Δt
//! ```
//!
//! The time step shrinks as the particle speeds up, keeping the spatial step close to
//! α·R whatever the velocity. There is no error control and no step rejection; the
//! accuracy is set by α alone.
//!
//! After each step the [`RunLog`](crate::integrator::RunLog) receives the new position,
//! a `(time, v² + 2φ)` energy sample and the updated pericenter.

use nalgebra::Vector2;
use serde::Serialize;

use crate::{
    constants::{Meter, Second},
    density::DensityFunction,
    flyby_errors::FlybyError,
    planet::Planet,
};

/// Mutable kinematic state of the particle during one run.
///
/// `distance` and `speed` cache the norms of `position` and `velocity`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub distance: Meter,
    pub speed: f64,
    pub time: Second,
}

impl ParticleState {
    /// State at time 0 with the cached norms filled in.
    pub fn new(position: Vector2<f64>, velocity: Vector2<f64>) -> Self {
        ParticleState {
            distance: position.norm(),
            speed: velocity.norm(),
            position,
            velocity,
            time: 0.0,
        }
    }
}

/// One entry of the energy diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySample {
    pub time: Second,
    /// Twice the specific mechanical energy: v² + 2φ(r).
    pub energy: f64,
}

/// Append-only records of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLog {
    pub trajectory: Vec<Vector2<f64>>,
    pub energy_log: Vec<EnergySample>,
    pub pericenter: Meter,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLog {
    /// Empty log with the pericenter tracker at +∞.
    pub fn new() -> Self {
        RunLog {
            trajectory: Vec::new(),
            energy_log: Vec::new(),
            pericenter: f64::INFINITY,
        }
    }

    fn record<D: DensityFunction>(
        &mut self,
        planet: &Planet<D>,
        state: &ParticleState,
    ) -> Result<(), FlybyError> {
        self.trajectory.push(state.position);

        let potential = planet.potential(state.distance)?;
        self.energy_log.push(EnergySample {
            time: state.time,
            energy: state.speed * state.speed + 2.0 * potential,
        });

        self.pericenter = self.pericenter.min(state.distance);
        Ok(())
    }
}

/// Advance `state` by one step and record it in `log`.
///
/// Arguments
/// -----------------
/// * `planet`: source of the acceleration and of the potential used by the energy log.
/// * `step_fraction`: α, the spatial step in planet radii.
/// * `state`: particle state, updated in place.
/// * `log`: run records, appended to.
///
/// Return
/// ----------
/// * The time step Δt that was taken, or the first field/potential error; on error the
///   state may already hold the new position but the log is not updated.
pub fn step<D: DensityFunction>(
    planet: &Planet<D>,
    step_fraction: f64,
    state: &mut ParticleState,
    log: &mut RunLog,
) -> Result<Second, FlybyError> {
    if !(state.speed > 0.0) {
        return Err(FlybyError::InvalidArgument(format!(
            "cannot size a step for speed {}",
            state.speed
        )));
    }

    let dt = step_fraction * planet.radius() / state.speed;

    let acceleration = planet.acceleration(&state.position)?;
    state.velocity += acceleration * dt;
    state.position += state.velocity * dt;
    state.time += dt;

    state.distance = state.position.norm();
    state.speed = state.velocity.norm();

    log.record(planet, state)?;
    Ok(dt)
}
