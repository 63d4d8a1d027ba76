//! # Radial density profiles
//!
//! A planet's mass distribution is described by a radial density function ρ(r). This
//! module provides:
//!
//! - [`DensityFunction`](crate::density::DensityFunction) – the typed callback consumed by
//!   [`Planet`](crate::planet::Planet). Any `Fn(f64) -> f64 + Send + Sync` closure implements it.
//! - [`DensityProfile`](crate::density::DensityProfile) – a closed set of named laws that
//!   can be selected from a scenario file.
//!
//! ## Failure convention
//!
//! A density function reports a failure by returning a **non-finite or negative** value.
//! The density accumulator turns such a value into
//! [`FlybyError::DensityEvaluation`](crate::flyby_errors::FlybyError::DensityEvaluation)
//! carrying the offending radius; it never substitutes a default.
//!
//! ## Example
//!
//! ```rust
//! use flyby::density::{DensityFunction, DensityProfile};
//!
//! // A closure is a density function
//! let falling = |r: f64| 5500.0 * (1.0 - 0.5 * r / 6.4e6);
//! assert_eq!(falling.density(0.0), 5500.0);
//!
//! // So is a named profile
//! let core = DensityProfile::Layered {
//!     core_radius: 3.5e6,
//!     core_density: 11000.0,
//!     mantle_density: 4500.0,
//! };
//! assert_eq!(core.density(1.0e6), 11000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Density, Meter},
    flyby_errors::FlybyError,
};

/// Radial density law ρ(r) of a spherically symmetric body.
///
/// Implementations must be pure: the same radius always yields the same density and
/// evaluation has no side effect. The accumulator may call it many times per
/// integration step.
pub trait DensityFunction: Send + Sync {
    fn density(&self, radius: Meter) -> Density;
}

impl<F> DensityFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn density(&self, radius: Meter) -> Density {
        self(radius)
    }
}

/// Built-in density laws.
///
/// Variants
/// -----------------
/// * `Uniform` – ρ(r) = `density`.
/// * `Linear` – ρ(r) = `central_density + gradient·r` (a negative gradient must keep ρ ≥ 0 up to
///   the planet radius).
/// * `PowerLaw` – ρ(r) = `coefficient·r^exponent`, integrable at the center for `exponent > −3`.
/// * `Layered` – `core_density` for r ≤ `core_radius`, `mantle_density` beyond.
///
/// Serialized with an internal `kind` tag:
///
/// ```json
/// { "kind": "layered", "core_radius": 3.5e6, "core_density": 11000.0, "mantle_density": 4500.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DensityProfile {
    Uniform {
        density: Density,
    },
    Linear {
        central_density: Density,
        gradient: f64,
    },
    PowerLaw {
        coefficient: f64,
        exponent: f64,
    },
    Layered {
        core_radius: Meter,
        core_density: Density,
        mantle_density: Density,
    },
}

impl DensityProfile {
    /// Check the structural parameters of the law.
    ///
    /// Only checks what can be decided without a planet radius: finiteness,
    /// non-negative constant densities, `exponent > −3` and `core_radius ≥ 0`. A linear
    /// law turning negative inside the planet is reported at evaluation time.
    pub fn validate(&self) -> Result<(), FlybyError> {
        let finite_non_negative = |name: &str, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(FlybyError::InvalidParameter(format!(
                    "{name} must be finite and non-negative, got {v}"
                )))
            }
        };

        match *self {
            DensityProfile::Uniform { density } => finite_non_negative("density", density),
            DensityProfile::Linear {
                central_density,
                gradient,
            } => {
                finite_non_negative("central_density", central_density)?;
                if !gradient.is_finite() {
                    return Err(FlybyError::InvalidParameter(format!(
                        "gradient must be finite, got {gradient}"
                    )));
                }
                Ok(())
            }
            DensityProfile::PowerLaw {
                coefficient,
                exponent,
            } => {
                finite_non_negative("coefficient", coefficient)?;
                if !(exponent.is_finite() && exponent > -3.0) {
                    return Err(FlybyError::InvalidParameter(format!(
                        "power-law exponent must be > -3, got {exponent}"
                    )));
                }
                Ok(())
            }
            DensityProfile::Layered {
                core_radius,
                core_density,
                mantle_density,
            } => {
                finite_non_negative("core_radius", core_radius)?;
                finite_non_negative("core_density", core_density)?;
                finite_non_negative("mantle_density", mantle_density)
            }
        }
    }
}

impl DensityFunction for DensityProfile {
    fn density(&self, radius: Meter) -> Density {
        match *self {
            DensityProfile::Uniform { density } => density,
            DensityProfile::Linear {
                central_density,
                gradient,
            } => central_density + gradient * radius,
            DensityProfile::PowerLaw {
                coefficient,
                exponent,
            } => coefficient * radius.powf(exponent),
            DensityProfile::Layered {
                core_radius,
                core_density,
                mantle_density,
            } => {
                if radius <= core_radius {
                    core_density
                } else {
                    mantle_density
                }
            }
        }
    }
}
