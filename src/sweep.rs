//! # Impact-parameter sweeps and CSV export
//!
//! A [`Sweep`](crate::sweep::Sweep) is the ordered collection of
//! [`ScatteringResult`](crate::simulator::ScatteringResult)s produced by
//! [`Simulator::sweep`](crate::simulator::Simulator::sweep). It answers the questions the
//! plotting front-ends ask of a run set:
//!
//! - pericenter vs. impact parameter, deflection vs. impact parameter, deflection vs.
//!   pericenter → [`Sweep::write_summary_csv`](crate::sweep::Sweep::write_summary_csv);
//! - the run with the largest deflection → [`Sweep::max_deflection`](crate::sweep::Sweep::max_deflection);
//! - its path and energy curve →
//!   [`ScatteringResult::write_trajectory_csv`](crate::simulator::ScatteringResult::write_trajectory_csv) and
//!   [`ScatteringResult::write_energy_csv`](crate::simulator::ScatteringResult::write_energy_csv).
//!
//! Rendering itself is left to external tools.

use std::io::Write;

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::{constants::Meter, flyby_errors::FlybyError, simulator::ScatteringResult};

/// `count` evenly spaced values on `[start, end]`, both ends included.
///
/// Return
/// ----------
/// * `[start]` for `count = 1`, [`FlybyError::InvalidArgument`] for `count = 0` or
///   non-finite bounds.
pub fn linspace(start: f64, end: f64, count: usize) -> Result<Vec<f64>, FlybyError> {
    if count == 0 {
        return Err(FlybyError::InvalidArgument(
            "a sweep needs at least one impact parameter".into(),
        ));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(FlybyError::InvalidArgument(format!(
            "sweep bounds must be finite, got [{start}, {end}]"
        )));
    }
    if count == 1 {
        return Ok(vec![start]);
    }

    let delta = (end - start) / (count - 1) as f64;
    Ok((0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                start + delta * i as f64
            }
        })
        .collect())
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    impact_parameter: f64,
    pericenter: f64,
    deflection_angle: f64,
}

#[derive(Debug, Serialize)]
struct TrajectoryRow {
    x: f64,
    y: f64,
}

/// Results of a sweep, in increasing impact parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    results: Vec<ScatteringResult>,
}

impl Sweep {
    pub fn new(results: Vec<ScatteringResult>) -> Self {
        Sweep { results }
    }

    pub fn results(&self) -> &[ScatteringResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<ScatteringResult> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Run with the largest deflection angle; the first one wins on ties.
    pub fn max_deflection(&self) -> Option<&ScatteringResult> {
        self.results.iter().fold(None, |best, r| match best {
            Some(b) if b.deflection_angle >= r.deflection_angle => Some(b),
            _ => Some(r),
        })
    }

    /// Smallest and largest pericenter over the sweep.
    pub fn pericenter_range(&self) -> Option<(Meter, Meter)> {
        match self
            .results
            .iter()
            .map(|r| r.pericenter)
            .minmax_by(|a, b| a.total_cmp(b))
        {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(p) => Some((p, p)),
            MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
        }
    }

    /// Write `impact_parameter,pericenter,deflection_angle` rows, one per run.
    pub fn write_summary_csv<W: Write>(&self, writer: W) -> Result<(), FlybyError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for r in &self.results {
            csv_writer.serialize(SummaryRow {
                impact_parameter: r.impact_parameter,
                pericenter: r.pericenter,
                deflection_angle: r.deflection_angle,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl ScatteringResult {
    /// Write the sampled path as `x,y` rows.
    pub fn write_trajectory_csv<W: Write>(&self, writer: W) -> Result<(), FlybyError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for p in &self.trajectory {
            csv_writer.serialize(TrajectoryRow { x: p.x, y: p.y })?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the energy diagnostic as `time,energy` rows.
    pub fn write_energy_csv<W: Write>(&self, writer: W) -> Result<(), FlybyError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for sample in &self.energy_log {
            csv_writer.serialize(sample)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
