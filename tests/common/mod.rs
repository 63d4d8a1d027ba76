use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use flyby::density::DensityProfile;
use flyby::params::SimulationParams;
use flyby::simulator::{ScatteringResult, Simulator};

/// Density giving a unit total mass to a unit-radius planet.
pub const UNIT_DENSITY: f64 = 3.0 / (4.0 * PI);

/// Unit radius, unit mass planet with G = 1, approached at its surface circular speed.
pub fn unit_simulator(step_fraction: f64) -> Simulator<DensityProfile> {
    let params = SimulationParams::builder()
        .gravitational_constant(1.0)
        .step_fraction(step_fraction)
        .build()
        .unwrap();

    Simulator::new(
        1.0,
        DensityProfile::Uniform {
            density: UNIT_DENSITY,
        },
        1.0,
        params,
    )
    .unwrap()
}

/// Largest deviation of the energy log from its first sample.
pub fn max_energy_drift(result: &ScatteringResult) -> f64 {
    let e0 = result.energy_log[0].energy;
    result
        .energy_log
        .iter()
        .map(|s| (s.energy - e0).abs())
        .fold(0.0, f64::max)
}

pub fn assert_deflection_close(result: &ScatteringResult, expected: f64, epsilon: f64) {
    assert_abs_diff_eq!(result.deflection_angle, expected, epsilon = epsilon);
}
