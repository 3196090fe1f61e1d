//! Find the root and track how the estimate converged toward it.

use itertools::Itertools;

use crate::{
    __util::doc_macros::warning_no_converge,
    error::ConvergenceWarning,
    hybrid::{Hybrid, Termination},
    FunctionSpec, RealScalar, SolverConfig,
};

/// Absolute error of the estimate after each iteration, relative to the final
/// root. Element `i` belongs to iteration `i + 1`.
///
/// An iteration is one function evaluation. Evaluations which do not move the
/// estimate (the initial point, derivative probes, rejected trial points)
/// repeat the previous error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IterationTrace<T>(Vec<T>);

impl<T: RealScalar> IterationTrace<T> {
    fn from_estimates(estimates: &[T], root: T) -> Self {
        Self(estimates.iter().map(|x| (*x - root).abs()).collect_vec())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Error after the given (1-based) iteration
    #[must_use]
    pub fn get(&self, iteration: usize) -> Option<T> {
        iteration
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.0.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> IntoIterator for IterationTrace<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Outcome of one calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct RootResult<T: RealScalar> {
    pub root: T,
    /// `f(root)`
    pub f_root: T,
    pub error_trace: IterationTrace<T>,
    /// function evaluations spent, always equal to `error_trace.len()`
    pub iterations_used: usize,
    /// how many of the evaluations were trial points, the others went to the
    /// initial guess and to derivative estimates
    pub trials: usize,
    /// set when `root` does not satisfy the tolerance
    pub warning: Option<ConvergenceWarning>,
}

impl<T: RealScalar> RootResult<T> {
    #[must_use]
    pub const fn is_converged(&self) -> bool {
        self.warning.is_none()
    }

    /// Error after the last iteration. The trace is relative to the last
    /// estimate, so this is `Some(0)`.
    #[must_use]
    pub fn final_error(&self) -> Option<T> {
        self.error_trace.last()
    }
}

/// Find a root of `spec` and record the error of every intermediate estimate.
///
/// The hybrid solver runs once from `config.initial_guess()`, spending at
/// most `config.max_iterations()` function evaluations. The estimate after
/// every evaluation is recorded, and once the run has finished the estimates
/// are turned into distances from the final root. Because the solver is
/// deterministic this is the same trace that replaying it one evaluation at a
/// time would produce.
///
/// Both arguments are validated on construction, so this cannot fail.
#[doc = warning_no_converge!()]
#[must_use]
pub fn solve<T: RealScalar>(spec: &FunctionSpec<T>, config: &SolverConfig<T>) -> RootResult<T> {
    log::trace!(
        "starting with arguments: {{f: \"{spec}\", x0: {}, max_iterations: {}, tolerance: {}}}",
        config.initial_guess(),
        config.max_iterations(),
        config.tolerance()
    );

    let mut solver = Hybrid::new(spec.as_fn(), config);
    let mut estimates = Vec::with_capacity(config.max_iterations().min(128));
    let termination = solver.run(config.max_iterations(), |it| estimates.push(it.x));

    let root = solver.x();
    let warning = match termination {
        Termination::Converged => None,
        Termination::MaxIterations => Some(ConvergenceWarning::MaxIterations {
            iterations: solver.evaluations(),
        }),
        Termination::Stalled(stall) => Some(ConvergenceWarning::NoProgress(stall)),
    };
    log::debug!(
        "{{evaluations: {}, trials: {}}}",
        solver.evaluations(),
        solver.trials()
    );
    if let Some(warning) = &warning {
        log::warn!("{warning} {{root: {root}, f: \"{spec}\"}}");
    }

    debug_assert_eq!(estimates.len(), solver.evaluations());
    RootResult {
        root,
        f_root: solver.fx(),
        error_trace: IterationTrace::from_estimates(&estimates, root),
        iterations_used: solver.evaluations(),
        trials: solver.trials(),
        warning,
    }
}
