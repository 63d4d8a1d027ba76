//! # Simulation parameters
//!
//! This module defines the [`crate::params::SimulationParams`] configuration object and its
//! validating builder [`crate::params::SimulationParamsBuilder`].
//!
//! The [`SimulationParams`](crate::params::SimulationParams) object centralizes all tunable
//! quantities of the scattering engine:
//!
//! - **Physics** – the gravitational constant (SI by default, `1.0` for normalized units).
//! - **Integration** – the step fraction α, the starting-radius multiplier, the escape
//!   multiplier and the hard step cap of a run.
//! - **Quadrature** – absolute/relative tolerances and the subdivision budget used by the
//!   density accumulator and the interior potential.
//!
//! ## Example
//!
//! ```rust
//! use flyby::params::SimulationParams;
//!
//! let params = SimulationParams::builder()
//!     .gravitational_constant(1.0)
//!     .step_fraction(0.005)
//!     .max_steps(1_000_000)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.gravitational_constant, 1.0);
//! ```
//!
//! ## See also
//! ------------
//! * [`Simulator`](crate::simulator::Simulator) – Consumes these parameters.
//! * [`QuadratureSettings`](crate::quadrature::QuadratureSettings) – Derived from the quadrature fields.

use std::cmp::Ordering::{Equal, Greater};
use std::fmt;

use serde::Deserialize;

use crate::{
    constants::{
        ESCAPE_DISTANCE_FACTOR, GRAVITATIONAL_CONSTANT, MAX_STEPS, QUAD_ABS_TOL,
        QUAD_MAX_SUBDIVISIONS, QUAD_REL_TOL, START_DISTANCE_FACTOR, STEP_FRACTION,
    },
    flyby_errors::FlybyError,
    quadrature::QuadratureSettings,
};

/// Configuration parameters of a scattering simulation.
///
/// Fields
/// -----------------
/// * `gravitational_constant` – Newtonian G used for μ = G·M and every force evaluation.
/// * `step_fraction` – α, the spatial step of the integrator as a fraction of the planet radius
///   (Δt = α·R / speed).
/// * `start_distance_factor` – starting radius multiplier: r₀ = factor × max(b·R, R).
/// * `escape_distance_factor` – a run stops once distance ≥ factor × r₀.
/// * `max_steps` – hard cap on integration steps per run.
/// * `quad_abs_tol`, `quad_rel_tol` – adaptive quadrature tolerances.
/// * `quad_max_subdivisions` – maximum number of subintervals of one quadrature.
///
/// Defaults
/// -----------------
/// * `gravitational_constant`: 6.6740831e-11
/// * `step_fraction`: 0.01
/// * `start_distance_factor`: 10
/// * `escape_distance_factor`: 2
/// * `max_steps`: 5 000 000
/// * `quad_abs_tol`: 1.49e-8
/// * `quad_rel_tol`: 1.49e-8
/// * `quad_max_subdivisions`: 200
///
/// Every field is optional when deserialized; missing fields take their default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    // --- Physics ---
    pub gravitational_constant: f64,

    // --- Integration ---
    pub step_fraction: f64,
    pub start_distance_factor: f64,
    pub escape_distance_factor: f64,
    pub max_steps: usize,

    // --- Quadrature ---
    pub quad_abs_tol: f64,
    pub quad_rel_tol: f64,
    pub quad_max_subdivisions: usize,
}

impl SimulationParams {
    /// Construct a new [`SimulationParams`] with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SimulationParamsBuilder`] initialized with the defaults.
    pub fn builder() -> SimulationParamsBuilder {
        SimulationParamsBuilder::new()
    }

    /// Settings handed to [`crate::quadrature::integrate`].
    pub fn quadrature(&self) -> QuadratureSettings {
        QuadratureSettings {
            abs_tol: self.quad_abs_tol,
            rel_tol: self.quad_rel_tol,
            max_subdivisions: self.quad_max_subdivisions,
        }
    }

    /// Check every validation rule of the builder on an already constructed value.
    ///
    /// Deserialized parameters bypass the builder, so configuration loaders call this
    /// before handing the parameters to a simulator.
    pub fn validate(&self) -> Result<(), FlybyError> {
        SimulationParamsBuilder {
            params: self.clone(),
        }
        .build()
        .map(|_| ())
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            gravitational_constant: GRAVITATIONAL_CONSTANT,

            step_fraction: STEP_FRACTION,
            start_distance_factor: START_DISTANCE_FACTOR,
            escape_distance_factor: ESCAPE_DISTANCE_FACTOR,
            max_steps: MAX_STEPS,

            quad_abs_tol: QUAD_ABS_TOL,
            quad_rel_tol: QUAD_REL_TOL,
            quad_max_subdivisions: QUAD_MAX_SUBDIVISIONS,
        }
    }
}

/// Builder for [`SimulationParams`], with validation.
#[derive(Debug, Clone)]
pub struct SimulationParamsBuilder {
    params: SimulationParams,
}

impl Default for SimulationParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: SimulationParams::default(),
        }
    }

    // --- Physics ---
    pub fn gravitational_constant(mut self, v: f64) -> Self {
        self.params.gravitational_constant = v;
        self
    }

    // --- Integration ---
    pub fn step_fraction(mut self, v: f64) -> Self {
        self.params.step_fraction = v;
        self
    }
    pub fn start_distance_factor(mut self, v: f64) -> Self {
        self.params.start_distance_factor = v;
        self
    }
    pub fn escape_distance_factor(mut self, v: f64) -> Self {
        self.params.escape_distance_factor = v;
        self
    }
    pub fn max_steps(mut self, v: usize) -> Self {
        self.params.max_steps = v;
        self
    }

    // --- Quadrature ---
    pub fn quad_abs_tol(mut self, v: f64) -> Self {
        self.params.quad_abs_tol = v;
        self
    }
    pub fn quad_rel_tol(mut self, v: f64) -> Self {
        self.params.quad_rel_tol = v;
        self
    }
    pub fn quad_max_subdivisions(mut self, v: usize) -> Self {
        self.params.quad_max_subdivisions = v;
        self
    }

    /// Return true iff x > 0.0, finite and not NaN.
    #[inline]
    fn gt0(x: f64) -> bool {
        x.is_finite() && x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0, finite and not NaN.
    #[inline]
    fn ge0(x: f64) -> bool {
        x.is_finite() && matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Return true iff x > 1.0, finite and not NaN.
    #[inline]
    fn gt1(x: f64) -> bool {
        x.is_finite() && x.partial_cmp(&1.0) == Some(Greater)
    }

    /// Finalize the builder and produce a [`SimulationParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `gravitational_constant > 0`, `step_fraction > 0`.
    /// * `start_distance_factor > 1` – the run must start outside the planet.
    /// * `escape_distance_factor > 1` – the escape sphere must lie beyond the start.
    /// * `max_steps ≥ 1`, `quad_max_subdivisions ≥ 1`.
    /// * `quad_abs_tol ≥ 0`, `quad_rel_tol ≥ 0`, and at least one of them `> 0`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SimulationParams)` if all values are valid.
    /// * `Err(FlybyError::InvalidParameter)` naming the first rule that failed.
    pub fn build(self) -> Result<SimulationParams, FlybyError> {
        let p = &self.params;

        if !Self::gt0(p.gravitational_constant) {
            return Err(FlybyError::InvalidParameter(
                "gravitational_constant must be > 0".into(),
            ));
        }
        if !Self::gt0(p.step_fraction) {
            return Err(FlybyError::InvalidParameter(
                "step_fraction must be > 0".into(),
            ));
        }
        if !Self::gt1(p.start_distance_factor) {
            return Err(FlybyError::InvalidParameter(
                "start_distance_factor must be > 1".into(),
            ));
        }
        if !Self::gt1(p.escape_distance_factor) {
            return Err(FlybyError::InvalidParameter(
                "escape_distance_factor must be > 1".into(),
            ));
        }
        if p.max_steps == 0 {
            return Err(FlybyError::InvalidParameter(
                "max_steps must be >= 1".into(),
            ));
        }
        if p.quad_max_subdivisions == 0 {
            return Err(FlybyError::InvalidParameter(
                "quad_max_subdivisions must be >= 1".into(),
            ));
        }
        if !Self::ge0(p.quad_abs_tol) || !Self::ge0(p.quad_rel_tol) {
            return Err(FlybyError::InvalidParameter(
                "quadrature tolerances must be non-negative".into(),
            ));
        }
        if p.quad_abs_tol == 0.0 && p.quad_rel_tol == 0.0 {
            return Err(FlybyError::InvalidParameter(
                "at least one quadrature tolerance must be > 0".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for SimulationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 44;
            writeln!(f, "Scattering Simulation Parameters")?;
            writeln!(f, "--------------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Physics]")?;
            line!(
                "gravitational_constant = {:.6e}",
                self.gravitational_constant,
                "Newtonian G"
            )?;

            writeln!(f, "[Integration]")?;
            line!(
                "step_fraction          = {:.4}",
                self.step_fraction,
                "Spatial step in planet radii"
            )?;
            line!(
                "start_distance_factor  = {:.2}",
                self.start_distance_factor,
                "r0 = factor * max(b*R, R)"
            )?;
            line!(
                "escape_distance_factor = {:.2}",
                self.escape_distance_factor,
                "Run ends beyond factor * r0"
            )?;
            line!(
                "max_steps              = {}",
                self.max_steps,
                "Step cap per run"
            )?;

            writeln!(f, "[Quadrature]")?;
            line!(
                "quad_abs_tol           = {:.2e}",
                self.quad_abs_tol,
                "Absolute tolerance"
            )?;
            line!(
                "quad_rel_tol           = {:.2e}",
                self.quad_rel_tol,
                "Relative tolerance"
            )?;
            line!(
                "quad_max_subdivisions  = {}",
                self.quad_max_subdivisions,
                "Subinterval budget"
            )?;

            Ok(())
        } else {
            write!(
                f,
                "SimulationParams(G={:.4e}, alpha={}, start×{}, escape×{}, max_steps={}, tol=({:.1e}, {:.1e}), subdivisions={})",
                self.gravitational_constant,
                self.step_fraction,
                self.start_distance_factor,
                self.escape_distance_factor,
                self.max_steps,
                self.quad_abs_tol,
                self.quad_rel_tol,
                self.quad_max_subdivisions,
            )
        }
    }
}
