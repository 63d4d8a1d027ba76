//! # Adaptive Gauss–Kronrod quadrature
//!
//! Globally adaptive integration on a finite interval with the 7-point Gauss /
//! 15-point Kronrod pair. The interval with the largest error estimate is bisected
//! until the summed error satisfies `error ≤ max(abs_tol, rel_tol·|estimate|)`, or the
//! subdivision budget is exhausted, in which case
//! [`FlybyError::QuadratureNonconvergence`] is returned with the bounds of the
//! original interval.
//!
//! Integrands are fallible: the first `Err` produced by the integrand aborts the
//! integration and is returned unchanged. Kronrod nodes are interior points, so the
//! integrand is never evaluated at the interval endpoints.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::flyby_errors::FlybyError;

/// Kronrod abscissae on [0, 1], the last one is the center.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching [`XGK`].
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights of the embedded 7-point rule (nodes XGK[1], XGK[3], XGK[5], XGK[7]).
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Tolerances and budget of one adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureSettings {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_subdivisions: usize,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        QuadratureSettings {
            abs_tol: crate::constants::QUAD_ABS_TOL,
            rel_tol: crate::constants::QUAD_REL_TOL,
            max_subdivisions: crate::constants::QUAD_MAX_SUBDIVISIONS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    estimate: f64,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.error.total_cmp(&other.error) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    // max-heap on the error estimate
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Apply the 15-point Kronrod rule on `[lower, upper]`.
///
/// Return
/// ----------
/// * The segment holding the Kronrod estimate and `|K15 − G7|` as its error.
fn gauss_kronrod_15<F>(f: &mut F, lower: f64, upper: f64) -> Result<Segment, FlybyError>
where
    F: FnMut(f64) -> Result<f64, FlybyError>,
{
    let center = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);

    let fc = f(center)?;
    let mut res_k = fc * WGK[7];
    let mut res_g = fc * WG[3];

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx)? + f(center + dx)?;
        res_k += WGK[j] * pair;
        if j % 2 == 1 {
            res_g += WG[j / 2] * pair;
        }
    }

    Ok(Segment {
        lower,
        upper,
        estimate: res_k * half,
        error: ((res_k - res_g) * half).abs(),
    })
}

/// Integrate `f` over `[lower, upper]`.
///
/// Arguments
/// -----------------
/// * `f`: fallible integrand.
/// * `lower`, `upper`: finite bounds; `upper < lower` integrates the reversed interval and
///   negates the result.
/// * `settings`: tolerances and subdivision budget.
///
/// Return
/// ----------
/// * The integral estimate, the first integrand error, or
///   [`FlybyError::QuadratureNonconvergence`] when the budget runs out.
pub fn integrate<F>(
    mut f: F,
    lower: f64,
    upper: f64,
    settings: &QuadratureSettings,
) -> Result<f64, FlybyError>
where
    F: FnMut(f64) -> Result<f64, FlybyError>,
{
    if !lower.is_finite() || !upper.is_finite() {
        return Err(FlybyError::InvalidArgument(format!(
            "integration bounds must be finite, got [{lower}, {upper}]"
        )));
    }
    if lower == upper {
        return Ok(0.0);
    }
    if upper < lower {
        return integrate(f, upper, lower, settings).map(|v| -v);
    }

    let first = gauss_kronrod_15(&mut f, lower, upper)?;
    let mut estimate = first.estimate;
    let mut error = first.error;
    let mut heap = BinaryHeap::from([first]);

    loop {
        if error <= settings.abs_tol.max(settings.rel_tol * estimate.abs()) {
            return Ok(estimate);
        }

        let nonconvergence = FlybyError::QuadratureNonconvergence {
            lower,
            upper,
            estimate,
            error_estimate: error,
        };

        if heap.len() >= settings.max_subdivisions {
            return Err(nonconvergence);
        }

        let Some(worst) = heap.pop() else {
            return Err(nonconvergence);
        };

        let mid = 0.5 * (worst.lower + worst.upper);
        // interval no longer splittable in floating point
        if mid <= worst.lower || mid >= worst.upper {
            return Err(nonconvergence);
        }

        let left = gauss_kronrod_15(&mut f, worst.lower, mid)?;
        let right = gauss_kronrod_15(&mut f, mid, worst.upper)?;

        estimate += left.estimate + right.estimate - worst.estimate;
        heap.push(left);
        heap.push(right);

        // resum to keep cancellation drift out of the error total
        error = heap.iter().map(|s| s.error).sum();
    }
}
