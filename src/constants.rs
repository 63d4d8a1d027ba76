//! # Constants and type definitions for flyby
//!
//! This module centralizes the **physical constants**, the **numerical defaults** of the
//! scattering engine and the **unit type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Gravitational constant (SI, overridable through
//!   [`SimulationParams`](crate::params::SimulationParams))
//! - Step-size, start-distance and escape-distance defaults of the integrator
//! - Quadrature tolerances and subdivision budget
//! - Type aliases for lengths, angles and times
//!
//! All quantities are expressed in SI units unless a caller chooses normalized units
//! (e.g. `G = 1` for closed-form checks).

// -------------------------------------------------------------------------------------------------
// Physical constants
// -------------------------------------------------------------------------------------------------

/// Newtonian gravitational constant in m³·kg⁻¹·s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6740831e-11;

/// 4π, the solid angle of a full sphere
pub const FOUR_PI: f64 = 4.0 * std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Integrator defaults
// -------------------------------------------------------------------------------------------------

/// Fraction α of the planet radius travelled per integration step
pub const STEP_FRACTION: f64 = 0.01;

/// Starting radius of a run, in units of `max(b·R, R)`
pub const START_DISTANCE_FACTOR: f64 = 10.0;

/// A run ends once the particle is farther than this multiple of its starting radius
pub const ESCAPE_DISTANCE_FACTOR: f64 = 2.0;

/// Hard cap on the number of steps of a single run
pub const MAX_STEPS: usize = 5_000_000;

/// Number of impact parameters in a default sweep
pub const EXPERIMENT_COUNT: usize = 50;

// -------------------------------------------------------------------------------------------------
// Quadrature defaults
// -------------------------------------------------------------------------------------------------

/// Default absolute tolerance of the adaptive quadrature
pub const QUAD_ABS_TOL: f64 = 1.49e-8;

/// Default relative tolerance of the adaptive quadrature
pub const QUAD_REL_TOL: f64 = 1.49e-8;

/// Default maximum number of subintervals of the adaptive quadrature
pub const QUAD_MAX_SUBDIVISIONS: usize = 200;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Distance in meters (or in planet-radius units when normalized)
pub type Meter = f64;
/// Angle in radians
pub type Radian = f64;
/// Time in seconds
pub type Second = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Volumetric mass density in kg·m⁻³
pub type Density = f64;
