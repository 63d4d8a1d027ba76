//! # Scenario configuration
//!
//! A scenario bundles everything a sweep needs into one JSON document:
//!
//! ```json
//! {
//!   "radius": 6.371e6,
//!   "velocity_multiplier": 1.0,
//!   "max_impact_parameter": 5.0,
//!   "experiment_count": 50,
//!   "density": { "kind": "uniform", "density": 5514.0 },
//!   "params": { "step_fraction": 0.01 }
//! }
//! ```
//!
//! `experiment_count` and every field of `params` are optional. The density law is one
//! of the named [`DensityProfile`](crate::density::DensityProfile)s; arbitrary code is
//! never evaluated.

use std::path::Path;

use serde::Deserialize;

use crate::{
    constants::EXPERIMENT_COUNT, density::DensityProfile, flyby_errors::FlybyError,
    params::SimulationParams, simulator::Simulator, sweep::Sweep,
};

fn default_experiment_count() -> usize {
    EXPERIMENT_COUNT
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub radius: f64,
    pub velocity_multiplier: f64,
    pub max_impact_parameter: f64,
    #[serde(default = "default_experiment_count")]
    pub experiment_count: usize,
    pub density: DensityProfile,
    #[serde(default)]
    pub params: SimulationParams,
}

impl ScenarioConfig {
    /// Parse a scenario from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, FlybyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FlybyError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Validate the scenario and build its simulator.
    ///
    /// Return
    /// ----------
    /// * The simulator, or the first [`FlybyError::InvalidParameter`] /
    ///   [`FlybyError::InvalidArgument`] found in the scenario.
    pub fn build_simulator(&self) -> Result<Simulator<DensityProfile>, FlybyError> {
        self.density.validate()?;
        if !(self.max_impact_parameter.is_finite() && self.max_impact_parameter >= 0.0) {
            return Err(FlybyError::InvalidParameter(format!(
                "max_impact_parameter must be finite and >= 0, got {}",
                self.max_impact_parameter
            )));
        }
        if self.experiment_count == 0 {
            return Err(FlybyError::InvalidParameter(
                "experiment_count must be >= 1".into(),
            ));
        }

        Simulator::new(
            self.radius,
            self.density.clone(),
            self.velocity_multiplier,
            self.params.clone(),
        )
    }

    /// Build the simulator and sweep `experiment_count` impact parameters on
    /// `[0, max_impact_parameter]`.
    pub fn run_sweep(&self) -> Result<Sweep, FlybyError> {
        self.build_simulator()?
            .sweep(self.max_impact_parameter, self.experiment_count)
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    const SCENARIO: &str = r#"{
        "radius": 1.0,
        "velocity_multiplier": 1.0,
        "max_impact_parameter": 6.0,
        "density": { "kind": "linear", "central_density": 0.4, "gradient": -0.2 },
        "params": { "gravitational_constant": 1.0, "step_fraction": 0.02 }
    }"#;

    #[test]
    fn test_parse_with_defaults() {
        let cfg = ScenarioConfig::from_json_str(SCENARIO).unwrap();
        assert_eq!(cfg.experiment_count, EXPERIMENT_COUNT);
        assert_eq!(
            cfg.density,
            DensityProfile::Linear {
                central_density: 0.4,
                gradient: -0.2
            }
        );
        assert_eq!(cfg.params.gravitational_constant, 1.0);
        assert_eq!(cfg.params.step_fraction, 0.02);
        assert_eq!(
            cfg.params.start_distance_factor,
            SimulationParams::default().start_distance_factor
        );
    }

    #[test]
    fn test_build_simulator() {
        let cfg = ScenarioConfig::from_json_str(SCENARIO).unwrap();
        let sim = cfg.build_simulator().unwrap();
        assert_eq!(sim.planet().radius(), 1.0);
        assert_eq!(sim.params().step_fraction, 0.02);
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(matches!(
            ScenarioConfig::from_json_str("{ \"radius\": 1.0 }"),
            Err(FlybyError::ConfigParse(_))
        ));

        let unknown_field = SCENARIO.replace("\"radius\"", "\"radius_km\"");
        assert!(ScenarioConfig::from_json_str(&unknown_field).is_err());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut cfg = ScenarioConfig::from_json_str(SCENARIO).unwrap();
        cfg.experiment_count = 0;
        assert!(matches!(
            cfg.build_simulator(),
            Err(FlybyError::InvalidParameter(_))
        ));

        let mut cfg = ScenarioConfig::from_json_str(SCENARIO).unwrap();
        cfg.params.max_steps = 0;
        assert!(matches!(
            cfg.build_simulator(),
            Err(FlybyError::InvalidParameter(_))
        ));

        let mut cfg = ScenarioConfig::from_json_str(SCENARIO).unwrap();
        cfg.density = DensityProfile::Uniform { density: -1.0 };
        assert!(cfg.build_simulator().is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ScenarioConfig::from_path("does/not/exist.json"),
            Err(FlybyError::IoError(_))
        ));
    }
}
