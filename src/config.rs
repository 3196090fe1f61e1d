//! Solver configuration.
//!
//! [`SolverConfig`] holds the three parameters every calculation needs
//! (initial guess, iteration cap, tolerance) and two tuning knobs of the
//! hybrid method which default to the values used by MINPACK's `hybrd`.

use crate::{error::ConfigError, RealScalar};

/// Default bound on the first step, relative to `|initial_guess|`.
pub const DEFAULT_STEP_BOUND_FACTOR: f64 = 100.0;

/// Solver configuration, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig<T: RealScalar> {
    initial_guess: T,
    max_iterations: usize,
    tolerance: T,
    step_bound_factor: T,
    diff_step: T,
}

impl<T: RealScalar> SolverConfig<T> {
    /// # Errors
    /// - `ZeroMaxIterations`: `max_iterations` is 0
    /// - `InvalidTolerance`: `tolerance` is negative or NaN
    /// - `NonFiniteInitialGuess`: `initial_guess` is NaN or infinite
    pub fn new(initial_guess: T, max_iterations: usize, tolerance: T) -> Result<Self, ConfigError> {
        let this = Self {
            initial_guess,
            max_iterations,
            tolerance,
            step_bound_factor: T::cast(DEFAULT_STEP_BOUND_FACTOR),
            diff_step: T::epsilon().sqrt(),
        };
        this.validate()?;
        Ok(this)
    }

    /// Bound on the first step, as a multiple of `|initial_guess|` (or an
    /// absolute bound when the initial guess is zero).
    ///
    /// # Errors
    /// - `InvalidStepBoundFactor`: not positive and finite
    pub fn with_step_bound_factor(mut self, factor: T) -> Result<Self, ConfigError> {
        self.step_bound_factor = factor;
        self.validate()?;
        Ok(self)
    }

    /// Relative step used for forward difference derivative estimates.
    ///
    /// # Errors
    /// - `InvalidDiffStep`: not positive and finite
    pub fn with_diff_step(mut self, step: T) -> Result<Self, ConfigError> {
        self.diff_step = step;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub const fn initial_guess(&self) -> T {
        self.initial_guess
    }

    /// Cap on function evaluations, which is what an iteration counts. The
    /// initial evaluation and derivative probes are included.
    #[must_use]
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    #[must_use]
    pub const fn tolerance(&self) -> T {
        self.tolerance
    }

    #[must_use]
    pub const fn step_bound_factor(&self) -> T {
        self.step_bound_factor
    }

    #[must_use]
    pub const fn diff_step(&self) -> T {
        self.diff_step
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }
        if self.tolerance.is_nan() || self.tolerance < T::zero() {
            return Err(ConfigError::InvalidTolerance {
                got: self.tolerance.lossy_f64(),
            });
        }
        if !self.initial_guess.is_finite() {
            return Err(ConfigError::NonFiniteInitialGuess {
                got: self.initial_guess.lossy_f64(),
            });
        }
        if !is_positive_finite(self.step_bound_factor) {
            return Err(ConfigError::InvalidStepBoundFactor {
                got: self.step_bound_factor.lossy_f64(),
            });
        }
        if !is_positive_finite(self.diff_step) {
            return Err(ConfigError::InvalidDiffStep {
                got: self.diff_step.lossy_f64(),
            });
        }
        Ok(())
    }
}

fn is_positive_finite<T: RealScalar>(x: T) -> bool {
    x.is_finite() && x > T::zero()
}
