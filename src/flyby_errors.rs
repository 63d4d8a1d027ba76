use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlybyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid simulation parameter: {0}")]
    InvalidParameter(String),

    #[error("Density function returned {value} at radius {radius}")]
    DensityEvaluation { radius: f64, value: f64 },

    #[error(
        "Quadrature on [{lower}, {upper}] did not converge (estimate {estimate}, error {error_estimate})"
    )]
    QuadratureNonconvergence {
        lower: f64,
        upper: f64,
        estimate: f64,
        error_estimate: f64,
    },

    #[error("Run with impact parameter {impact_parameter} did not escape after {steps} steps")]
    RunDidNotEscape { impact_parameter: f64, steps: usize },

    #[error("Run with impact parameter {impact_parameter} failed: {source}")]
    SweepRunFailed {
        impact_parameter: f64,
        #[source]
        source: Box<FlybyError>,
    },

    #[error("Unable to parse scenario configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for FlybyError {
    fn eq(&self, other: &Self) -> bool {
        use FlybyError::*;
        match (self, other) {
            (InvalidArgument(a), InvalidArgument(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (
                DensityEvaluation {
                    radius: r1,
                    value: v1,
                },
                DensityEvaluation {
                    radius: r2,
                    value: v2,
                },
            ) => r1 == r2 && (v1 == v2 || (v1.is_nan() && v2.is_nan())),
            (
                QuadratureNonconvergence {
                    lower: l1,
                    upper: u1,
                    ..
                },
                QuadratureNonconvergence {
                    lower: l2,
                    upper: u2,
                    ..
                },
            ) => l1 == l2 && u1 == u2,
            (
                RunDidNotEscape {
                    impact_parameter: b1,
                    steps: s1,
                },
                RunDidNotEscape {
                    impact_parameter: b2,
                    steps: s2,
                },
            ) => b1 == b2 && s1 == s2,
            (
                SweepRunFailed {
                    impact_parameter: b1,
                    source: e1,
                },
                SweepRunFailed {
                    impact_parameter: b2,
                    source: e2,
                },
            ) => b1 == b2 && e1 == e2,

            // These errors are not comparable: equal if same variant
            (ConfigParse(_), ConfigParse(_)) => true,
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
