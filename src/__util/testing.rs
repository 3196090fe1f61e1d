//! Testing utilities, do not depend on any of these in production!

use fastrand::Rng;
use itertools::Itertools;

use crate::{FunctionSpec64, RootResult64};

struct RandStreamF64 {
    state: Rng,
}

impl RandStreamF64 {
    fn new(seed: u64) -> Self {
        Self {
            state: Rng::with_seed(seed),
        }
    }
}

impl Iterator for RandStreamF64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.state.f64())
    }
}

/// Endless stream of uniformly distributed reals in `[min, max)`
pub struct RandStreamR64 {
    real_stream: RandStreamF64,
    min: f64,
    max: f64,
}

impl RandStreamR64 {
    #[must_use]
    pub fn new(seed: u64, min: f64, max: f64) -> Self {
        assert!(min <= max, "minimum should be smaller or equal to maximum");
        Self {
            real_stream: RandStreamF64::new(seed),
            min,
            max,
        }
    }
}

impl Iterator for RandStreamR64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.real_stream.next()?).mul_add(self.max - self.min, self.min))
    }
}

/// Generate a function with random coefficients and cosine amplitude.
///
/// # Panics
/// If the streams are finite
pub fn test_case_random(
    mut coeff_stream: impl Iterator<Item = f64>,
    mut k_stream: impl Iterator<Item = f64>,
    degree: usize,
) -> FunctionSpec64 {
    let coefficients = coeff_stream.by_ref().take(degree + 1).collect_vec();
    let k = k_stream.next().expect("rng stream should be infinite");
    FunctionSpec64::new(degree, coefficients, k).expect("shape is correct by construction")
}

/// Generate a strictly monotonic `a + b*x + k*cos(x)`, with `|b| > 2|k|`, so
/// it has exactly one simple root.
///
/// `slope_stream` should yield values whose magnitude is bounded away from
/// zero, `ratio_stream` values in `(-0.5, 0.5)`.
///
/// # Panics
/// If the streams are finite
pub fn test_case_monotonic(
    mut offset_stream: impl Iterator<Item = f64>,
    mut slope_stream: impl Iterator<Item = f64>,
    mut ratio_stream: impl Iterator<Item = f64>,
) -> FunctionSpec64 {
    let a = offset_stream.next().expect("rng stream should be infinite");
    let b = slope_stream.next().expect("rng stream should be infinite");
    let ratio = ratio_stream.next().expect("rng stream should be infinite");
    assert!(ratio.abs() < 0.5, "cosine would dominate the slope");
    FunctionSpec64::new(1, vec![a, b], ratio * b.abs()).expect("shape is correct by construction")
}

/// Check that the residual at the root is within `tol`
#[must_use]
pub fn check_root(spec: &FunctionSpec64, res: &RootResult64, tol: f64) -> bool {
    spec.eval(res.root).abs() <= tol
}

/// Check the shape invariants every result must satisfy
#[must_use]
pub fn check_trace_shape(res: &RootResult64) -> bool {
    res.error_trace.len() == res.iterations_used
        && res.error_trace.iter().all(|e| e >= 0.0 || e.is_nan())
        && res.trials < res.iterations_used
}
