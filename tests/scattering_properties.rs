mod common;

use std::f64::consts::PI;

use approx::assert_relative_eq;
use flyby::density::DensityProfile;
use flyby::flyby_errors::FlybyError;
use flyby::params::SimulationParams;
use flyby::planet::Planet;
use flyby::quadrature::QuadratureSettings;
use flyby::simulator::Simulator;
use itertools::Itertools;

use crate::common::{assert_deflection_close, max_energy_drift, unit_simulator};

#[test]
fn test_uniform_mass_consistency() {
    let rho = 5514.0;
    let radius = 6.371e6;
    let planet = Planet::new(
        radius,
        DensityProfile::Uniform { density: rho },
        flyby::constants::GRAVITATIONAL_CONSTANT,
        QuadratureSettings::default(),
    )
    .unwrap();

    let expected = 4.0 / 3.0 * PI * radius.powi(3) * rho;
    assert_relative_eq!(planet.enclosed_mass(radius).unwrap(), expected, max_relative = 1e-6);
    assert_relative_eq!(planet.total_mass(), expected, max_relative = 1e-6);
}

#[test]
fn test_layered_mass_consistency() {
    let planet = Planet::new(
        1.0,
        DensityProfile::Layered {
            core_radius: 0.3,
            core_density: 12.0,
            mantle_density: 4.0,
        },
        1.0,
        QuadratureSettings::default(),
    )
    .unwrap();

    let expected = 4.0 / 3.0 * PI * (12.0 * 0.3_f64.powi(3) + 4.0 * (1.0 - 0.3_f64.powi(3)));
    assert_relative_eq!(planet.total_mass(), expected, max_relative = 1e-6);
}

#[test]
fn test_shell_monotonicity() {
    let profiles = [
        DensityProfile::Linear {
            central_density: 3.0,
            gradient: -2.5,
        },
        DensityProfile::PowerLaw {
            coefficient: 2.0,
            exponent: 1.5,
        },
        DensityProfile::Layered {
            core_radius: 0.45,
            core_density: 10.0,
            mantle_density: 0.5,
        },
    ];

    for profile in profiles {
        let planet = Planet::new(1.0, profile, 1.0, QuadratureSettings::default()).unwrap();
        let masses: Vec<f64> = (0..=40)
            .map(|i| planet.enclosed_mass(i as f64 / 40.0).unwrap())
            .collect();
        assert!(masses.iter().tuple_windows().all(|(a, b)| a <= b));
    }
}

#[test]
fn test_force_continuity_at_surface() {
    let planet = Planet::new(
        1.0,
        DensityProfile::Linear {
            central_density: 2.0,
            gradient: -1.0,
        },
        1.0,
        QuadratureSettings::default(),
    )
    .unwrap();

    let eps = 1e-9;
    assert_relative_eq!(
        planet.force_magnitude(1.0 - eps).unwrap(),
        planet.force_magnitude(1.0 + eps).unwrap(),
        max_relative = 1e-6
    );
}

#[test]
fn test_energy_quasi_conservation() {
    let coarse = unit_simulator(0.02).run(2.0).unwrap();
    let fine = unit_simulator(0.005).run(2.0).unwrap();

    // v² + 2φ starts at V∞² = 1
    assert_relative_eq!(fine.energy_log[0].energy, 1.0, epsilon = 1e-3);
    assert!(max_energy_drift(&fine) < 5e-3);
    assert!(max_energy_drift(&fine) < max_energy_drift(&coarse));

    // through the interior as well
    let head_on = unit_simulator(0.01).run(0.0).unwrap();
    assert!(max_energy_drift(&head_on) < 0.05);
}

#[test]
fn test_termination_over_impact_range() {
    let sim = unit_simulator(0.01);
    for b in [0.0, 0.5, 1.0, 2.0, 5.0] {
        let result = sim.run(b).unwrap();
        assert!(result.steps > 0);
        assert!(result.steps < sim.params().max_steps);
        assert!(result.deflection_angle.is_finite());
        assert!(result.pericenter.is_finite());
    }
}

#[test]
fn test_exterior_deflection_matches_hyperbola() {
    let sim = unit_simulator(0.01);
    let impacts = [2.0, 3.0, 5.0, 8.0];

    let results: Vec<_> = impacts.iter().map(|&b| sim.run(b).unwrap()).collect();
    for (b, result) in impacts.iter().zip(&results) {
        let approach = sim.approach(*b).unwrap();
        assert!(result.pericenter > 1.0);
        assert_deflection_close(result, approach.keplerian_deflection(), 1e-2);
        assert_relative_eq!(
            result.pericenter,
            approach.keplerian_pericenter(),
            max_relative = 1e-2
        );
    }

    assert!(results
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.deflection_angle > b.deflection_angle));
}

#[test]
fn test_large_impact_is_nearly_straight() {
    let result = unit_simulator(0.01).run(50.0).unwrap();
    assert!(result.deflection_angle > 0.0);
    assert!(result.deflection_angle < 0.05);
    assert!(result.pericenter > 45.0);
}

#[test]
fn test_head_on_passes_through_the_center() {
    let sim = unit_simulator(0.01);
    let approach = sim.approach(0.0).unwrap();
    assert_eq!(approach.angular_momentum, 0.0);
    assert_eq!(approach.eccentricity, 1.0);

    let result = sim.run(0.0).unwrap();
    // the interior branch is crossed: the particle comes out on the far side undeflected
    assert!(result.pericenter < 0.01);
    assert!(result.deflection_angle.abs() < 1e-6);
}

#[test]
fn test_interior_grazing_deflects_less_than_point_mass() {
    let sim = unit_simulator(0.01);
    let result = sim.run(0.5).unwrap();
    let approach = sim.approach(0.5).unwrap();

    // the point-mass pericenter would lie inside the planet, where only the enclosed
    // shell attracts
    assert!(approach.keplerian_pericenter() < 1.0);
    assert!(result.pericenter < 1.0);
    assert!(result.deflection_angle < approach.keplerian_deflection());
}

#[test]
fn test_normalized_units_are_configurable() {
    let params = SimulationParams::builder()
        .gravitational_constant(2.0)
        .build()
        .unwrap();
    let planet = Planet::new(
        1.0,
        DensityProfile::Uniform {
            density: common::UNIT_DENSITY,
        },
        params.gravitational_constant,
        params.quadrature(),
    )
    .unwrap();
    assert_relative_eq!(planet.mu(), 2.0, max_relative = 1e-12);
}

#[test]
fn test_density_failure_reported_with_radius() {
    let params = SimulationParams::builder()
        .gravitational_constant(1.0)
        .build()
        .unwrap();
    // ρ turns negative past r = 0.8
    let result = Simulator::new(1.0, |r: f64| 0.8 - r, 1.0, params);
    match result {
        Err(FlybyError::DensityEvaluation { radius, value }) => {
            assert!(radius > 0.8);
            assert!(value < 0.0);
        }
        Err(other) => panic!("expected a density evaluation error, got {other:?}"),
        Ok(_) => panic!("a negative density must not build a simulator"),
    }
}

#[test]
fn test_quadrature_budget_exhaustion() {
    let tight = QuadratureSettings {
        max_subdivisions: 1,
        ..QuadratureSettings::default()
    };
    let layered = DensityProfile::Layered {
        core_radius: 0.3,
        core_density: 12.0,
        mantle_density: 4.0,
    };

    match Planet::new(1.0, layered, 1.0, tight) {
        Err(FlybyError::QuadratureNonconvergence {
            lower,
            upper,
            error_estimate,
            ..
        }) => {
            assert_eq!((lower, upper), (0.0, 1.0));
            assert!(error_estimate > 0.0);
        }
        Err(other) => panic!("expected a quadrature failure, got {other:?}"),
        Ok(_) => panic!("one Kronrod panel cannot resolve the core boundary"),
    }
}
