//! Find a real root of `f(x) = p(x) + k*cos(x)`, where `p` is a polynomial
//! with user-supplied coefficients, and track how the estimate converged.
//!
//! The root is found with Powell's hybrid method (see [`hybrid`]). Along with
//! the root, every calculation returns the absolute error of each
//! intermediate estimate relative to that root, which is what you want for
//! plotting error-vs-iteration curves. An iteration is one function
//! evaluation, and `max_iterations` caps all of them, including the initial
//! evaluation and derivative estimates.
//!
//! ```
//! use root_calculator::calculate;
//!
//! // 8*cos(x) + 3 - 7x - x^2 + 8x^3
//! let res = calculate::<f64>(3, &[3.0, -7.0, -1.0, 8.0], 8.0, -1.0, 100, 1E-7).unwrap();
//! assert!(res.is_converged());
//! assert!(res.f_root.abs() < 1E-6);
//! assert_eq!(res.error_trace.len(), res.iterations_used);
//! ```
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub use num;

mod config;
pub use config::{SolverConfig, DEFAULT_STEP_BOUND_FACTOR};
mod error;
pub use error::{ConfigError, ConvergenceWarning, Error, Stall};
mod function;
pub use function::{evaluate, FunctionSpec};
pub mod hybrid;
mod scalar;
pub use scalar::RealScalar;
mod tracker;
pub use tracker::{solve, IterationTrace, RootResult};

#[doc(hidden)]
pub mod __util;
use __util::doc_macros::{errors_invalid_config, errors_shape_mismatch, warning_no_converge};

pub type FunctionSpec64 = FunctionSpec<f64>;
pub type FunctionSpec32 = FunctionSpec<f32>;
pub type SolverConfig64 = SolverConfig<f64>;
pub type SolverConfig32 = SolverConfig<f32>;
pub type RootResult64 = RootResult<f64>;
pub type RootResult32 = RootResult<f32>;

/// Find a root of `k*cos(x) + coefficients[0] + coefficients[1]*x + ...` and
/// track the convergence error.
///
/// This is a shorthand for building a [`FunctionSpec`] and a
/// [`SolverConfig`] with default tuning and calling [`solve`].
///
/// # Errors
#[doc = errors_shape_mismatch!()]
#[doc = errors_invalid_config!()]
///
#[doc = warning_no_converge!()]
pub fn calculate<T: RealScalar>(
    degree: usize,
    coefficients: &[T],
    k: T,
    initial_value: T,
    max_iterations: usize,
    tolerance: T,
) -> Result<RootResult<T>, Error> {
    let spec = FunctionSpec::new(degree, coefficients.to_vec(), k)?;
    let config = SolverConfig::new(initial_value, max_iterations, tolerance)?;
    Ok(solve(&spec, &config))
}
