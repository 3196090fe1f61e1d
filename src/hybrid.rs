//! Powell's hybrid method for a single scalar equation.
//!
//! This is MINPACK's `hybrd` specialized to one unknown, with unit scaling.
//! The derivative is estimated by a forward difference and afterwards kept up
//! to date with Broyden (secant) updates, steps are taken inside a trust
//! region which grows and shrinks based on how well the local linear model
//! predicted the decrease of `f(x)^2`.
//!
//! The solver is a plain state machine which advances by exactly one function
//! evaluation at a time: the initial point, a forward difference probe when
//! the derivative has to be (re-)estimated, or a trial point. [`Hybrid::step`]
//! performs one evaluation, [`Hybrid::run`] steps until termination or until
//! the evaluation budget is spent, and reports every step to a callback.
//! Identical inputs always produce identical iterates.

use std::ops::ControlFlow;

use crate::{error::Stall, RealScalar, SolverConfig};

/// accept a trial point when the actual reduction is at least this fraction
/// of the predicted one
const ACCEPT_RATIO: f64 = 1E-4;
const SHRINK_RATIO: f64 = 0.1;
const GROW_RATIO: f64 = 0.5;
/// MINPACK treats an actual reduction below this as "slow"
const SLOW_REDUCTION: f64 = 1E-3;
const SLOW_ITERATIONS_LIMIT: usize = 10;
/// consecutive failed trials after which the derivative is re-estimated
const FAILURES_BEFORE_REFRESH: usize = 2;

/// Whether the solver should keep going after an evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Converged,
    Stalled(Stall),
}

/// Why [`Hybrid::run`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Converged,
    /// the evaluation budget was spent
    MaxIterations,
    Stalled(Stall),
}

/// What a single step evaluated the function for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Evaluation<T> {
    /// `f(x0)`
    Initial,
    /// forward difference probe next to the current estimate
    Derivative { estimate: T },
    /// a trial point `x + step`
    Trial { step: T, ratio: T, accepted: bool },
}

/// State of the solver after one function evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Iterate<T> {
    /// 1-based, counts every function evaluation
    pub iteration: usize,
    pub evaluation: Evaluation<T>,
    /// current estimate of the root
    pub x: T,
    /// `f(x)`
    pub fx: T,
    /// trust region radius
    pub radius: T,
    pub progress: Progress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Initial,
    Derivative,
    Trial,
    Done(Termination),
}

/// Powell hybrid root finder over a scalar function `f`.
///
/// # Examples
/// ```
/// use root_calculator::{hybrid::{Hybrid, Termination}, SolverConfig};
///
/// let config = SolverConfig::new(1.0, 100, 1E-12).unwrap();
/// let mut solver = Hybrid::new(|x: f64| x * x - 2.0, &config);
/// assert_eq!(solver.run(config.max_iterations(), |_| {}), Termination::Converged);
/// assert!((solver.x() - std::f64::consts::SQRT_2).abs() < 1E-12);
/// ```
pub struct Hybrid<T: RealScalar, F: FnMut(T) -> T> {
    f: F,
    phase: Phase,
    x: T,
    fx: T,
    derivative: T,
    radius: T,
    tolerance: T,
    diff_step: T,
    evaluations: usize,
    trials: usize,
    successes: usize,
    failures: usize,
    slow_iterations: usize,
    last_accepted_step: Option<T>,
}

impl<T: RealScalar, F: FnMut(T) -> T> Hybrid<T, F> {
    /// Set up the solver at `config.initial_guess()`. Nothing is evaluated
    /// until the first [`Hybrid::step`].
    pub fn new(f: F, config: &SolverConfig<T>) -> Self {
        let x = config.initial_guess();
        let factor = config.step_bound_factor();
        let radius = if x.is_zero() { factor } else { factor * x.abs() };
        log::trace!("starting with arguments: {{x0: {x}, radius: {radius}}}");
        Self {
            f,
            phase: Phase::Initial,
            x,
            fx: T::nan(),
            derivative: T::nan(),
            radius,
            tolerance: config.tolerance(),
            diff_step: config.diff_step(),
            evaluations: 0,
            trials: 0,
            successes: 0,
            failures: 0,
            slow_iterations: 0,
            last_accepted_step: None,
        }
    }

    /// Current estimate of the root
    pub const fn x(&self) -> T {
        self.x
    }

    /// Function value at [`Hybrid::x`], NaN before the first step
    pub const fn fx(&self) -> T {
        self.fx
    }

    /// Current estimate of `f'(x)`
    pub const fn derivative(&self) -> T {
        self.derivative
    }

    /// Function evaluations so far. Every [`Hybrid::step`] that does not
    /// break is exactly one evaluation.
    pub const fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// How many of the evaluations were trial points
    pub const fn trials(&self) -> usize {
        self.trials
    }

    /// Whether the current estimate is an exact root
    pub fn is_root(&self) -> bool {
        self.fx.is_zero()
    }

    /// Evaluate the function once and advance the solver.
    ///
    /// Once the solver has converged or stalled this breaks with the same
    /// [`Termination`] every time, without evaluating anything.
    pub fn step(&mut self) -> ControlFlow<Termination, Iterate<T>> {
        let (evaluation, progress) = match self.phase {
            Phase::Done(termination) => return ControlFlow::Break(termination),
            Phase::Initial => self.initial(),
            Phase::Derivative => self.refresh_derivative(),
            Phase::Trial => self.trial(),
        };

        self.phase = match progress {
            Progress::Converged => Phase::Done(Termination::Converged),
            Progress::Stalled(stall) => Phase::Done(Termination::Stalled(stall)),
            Progress::Continue => match evaluation {
                Evaluation::Initial => Phase::Derivative,
                Evaluation::Derivative { .. } => Phase::Trial,
                Evaluation::Trial { .. }
                    if self.failures == FAILURES_BEFORE_REFRESH
                        || !is_usable(self.derivative) =>
                {
                    log::trace!("secant update is unreliable, re-estimating derivative");
                    Phase::Derivative
                }
                Evaluation::Trial { .. } => Phase::Trial,
            },
        };

        let iterate = Iterate {
            iteration: self.evaluations,
            evaluation,
            x: self.x,
            fx: self.fx,
            radius: self.radius,
            progress,
        };
        log::trace!(
            "{{iteration: {}, evaluation: {:?}, x: {}, fx: {}, radius: {}}}",
            iterate.iteration,
            iterate.evaluation,
            iterate.x,
            iterate.fx,
            iterate.radius
        );
        ControlFlow::Continue(iterate)
    }

    /// Step until convergence, a stall, or until `max_evaluations` function
    /// evaluations in total have been spent. `on_iteration` sees every
    /// evaluation.
    pub fn run(
        &mut self,
        max_evaluations: usize,
        mut on_iteration: impl FnMut(&Iterate<T>),
    ) -> Termination {
        while self.evaluations < max_evaluations {
            match self.step() {
                ControlFlow::Break(termination) => return termination,
                ControlFlow::Continue(iterate) => {
                    on_iteration(&iterate);
                    match iterate.progress {
                        Progress::Continue => {}
                        Progress::Converged => return Termination::Converged,
                        Progress::Stalled(stall) => return Termination::Stalled(stall),
                    }
                }
            }
        }
        log::trace!(
            "did not converge {{x: {}, fx: {}, evaluations: {}}}",
            self.x,
            self.fx,
            self.evaluations
        );
        Termination::MaxIterations
    }

    fn eval(&mut self, x: T) -> T {
        self.evaluations += 1;
        (self.f)(x)
    }

    fn initial(&mut self) -> (Evaluation<T>, Progress) {
        self.fx = self.eval(self.x);
        let progress = if self.is_root() {
            Progress::Converged
        } else {
            Progress::Continue
        };
        (Evaluation::Initial, progress)
    }

    /// Forward difference estimate of the derivative at the current point
    fn refresh_derivative(&mut self) -> (Evaluation<T>, Progress) {
        let mut h = self.diff_step * self.x.abs();
        if h.is_zero() {
            h = self.diff_step;
        }
        let f_probe = self.eval(self.x + h);
        self.derivative = (f_probe - self.fx) / h;
        let progress = if is_usable(self.derivative) {
            Progress::Continue
        } else {
            log::trace!("derivative vanished {{x: {}, fx: {}}}", self.x, self.fx);
            Progress::Stalled(Stall::SingularDerivative)
        };
        (
            Evaluation::Derivative {
                estimate: self.derivative,
            },
            progress,
        )
    }

    fn trial(&mut self) -> (Evaluation<T>, Progress) {
        // dogleg step, in 1D the gradient direction is the newton direction
        let newton = -self.fx / self.derivative;
        let step = if newton.abs() <= self.radius {
            newton
        } else {
            newton.signum() * self.radius
        };
        let step_norm = step.abs();
        if self.trials == 0 {
            self.radius = self.radius.min(step_norm);
        }

        let trial = self.x + step;
        let f_trial = self.eval(trial);
        self.trials += 1;

        let actual_reduction = if f_trial.abs() < self.fx.abs() {
            T::one() - (f_trial / self.fx).powi(2)
        } else {
            -T::one()
        };
        let predicted_reduction = T::one() - ((self.fx + self.derivative * step) / self.fx).powi(2);
        let ratio = if predicted_reduction > T::zero() {
            actual_reduction / predicted_reduction
        } else {
            T::zero()
        };

        self.update_radius(ratio, step_norm);

        let f_old = self.fx;
        let previous_step = self.last_accepted_step;
        let accepted = ratio >= T::cast(ACCEPT_RATIO);
        if accepted {
            self.x = trial;
            self.fx = f_trial;
            self.last_accepted_step = Some(step_norm);
        }

        if actual_reduction >= T::cast(SLOW_REDUCTION) {
            self.slow_iterations = 0;
        } else {
            self.slow_iterations += 1;
        }

        // broyden update, a secant in one dimension
        self.derivative = (f_trial - f_old) / step;

        let remaining = if accepted {
            remaining_error(step_norm, previous_step)
        } else {
            T::infinity()
        };
        let progress = self.progress(remaining);
        (
            Evaluation::Trial {
                step,
                ratio,
                accepted,
            },
            progress,
        )
    }

    fn update_radius(&mut self, ratio: T, step_norm: T) {
        let two = T::cast(2.0);
        if ratio < T::cast(SHRINK_RATIO) {
            self.successes = 0;
            self.failures += 1;
            self.radius = self.radius / two;
        } else {
            self.failures = 0;
            self.successes += 1;
            if ratio >= T::cast(GROW_RATIO) || self.successes > 1 {
                self.radius = self.radius.max(step_norm * two);
            }
            if (ratio - T::one()).abs() <= T::cast(SHRINK_RATIO) {
                self.radius = step_norm * two;
            }
        }
    }

    fn progress(&self, remaining: T) -> Progress {
        let scale = self.x.abs().max(T::one());
        let bound = self.tolerance * scale;
        if self.is_root() || self.radius <= bound || remaining <= bound {
            return Progress::Converged;
        }
        if self.radius <= T::epsilon() * scale {
            return Progress::Stalled(Stall::ToleranceTooSmall);
        }
        if self.slow_iterations >= SLOW_ITERATIONS_LIMIT {
            return Progress::Stalled(Stall::SlowProgress);
        }
        Progress::Continue
    }
}

fn is_usable<T: RealScalar>(derivative: T) -> bool {
    derivative.is_finite() && !derivative.is_zero()
}

/// Estimated distance to the root after an accepted step of length `step`.
///
/// Successive steps are assumed to shrink geometrically, with the rate taken
/// from the previous accepted step. Near a simple root the rate is tiny and
/// the estimate is the step itself, near a multiple root the iteration is
/// only linear and the distance left can exceed the last step.
fn remaining_error<T: RealScalar>(step: T, previous: Option<T>) -> T {
    let Some(previous) = previous else {
        return step;
    };
    let rate = step / previous;
    if rate < T::one() {
        step.max(step * rate / (T::one() - rate))
    } else {
        T::infinity()
    }
}
