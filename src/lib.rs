pub mod approach;
pub mod config;
pub mod constants;
pub mod density;
mod field;
pub mod flyby_errors;
pub mod integrator;
pub mod params;
pub mod planet;
mod potential;
pub mod quadrature;
pub mod simulator;
pub mod sweep;
