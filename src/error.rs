use thiserror::Error;

/// The top-level error type for this crate.
///
/// These are structural errors: they are detected before the function is
/// evaluated even once. Failing to converge is not an error, see
/// [`ConvergenceWarning`].
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("a polynomial of degree {degree} needs {expected} coefficients, got {got}")]
    ShapeMismatch {
        degree: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl Error {
    pub(crate) const fn shape_mismatch(degree: usize, got: usize) -> Self {
        Self::ShapeMismatch {
            degree,
            expected: degree.saturating_add(1),
            got,
        }
    }
}

/// Rejected [`crate::SolverConfig`] parameters.
///
/// Offending values are reported as `f64` regardless of the scalar type.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("max_iterations must be at least 1")]
    ZeroMaxIterations,

    #[error("tolerance must be non-negative, got {got}")]
    InvalidTolerance { got: f64 },

    #[error("initial guess must be finite, got {got}")]
    NonFiniteInitialGuess { got: f64 },

    #[error("step bound factor must be positive and finite, got {got}")]
    InvalidStepBoundFactor { got: f64 },

    #[error("finite difference step must be positive and finite, got {got}")]
    InvalidDiffStep { got: f64 },
}

/// Why the solver stopped making progress before meeting the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stall {
    /// The forward difference estimate of the derivative vanished (or is not
    /// finite), so no step direction exists.
    SingularDerivative,

    /// The trust region shrank to machine precision, the tolerance cannot be
    /// reached.
    ToleranceTooSmall,

    /// The residual has barely decreased over many consecutive trial points.
    SlowProgress,
}

impl std::fmt::Display for Stall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingularDerivative => f.write_str("the derivative vanished"),
            Self::ToleranceTooSmall => {
                f.write_str("the tolerance is too small, no further improvement is possible")
            }
            Self::SlowProgress => f.write_str("the iteration is not making good progress"),
        }
    }
}

/// Non-fatal outcome attached to a [`crate::RootResult`] whose root did not
/// meet the tolerance.
///
/// The best estimate and the full error trace are still returned, since a
/// non-converged trajectory is useful output in its own right.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceWarning {
    /// `iterations` counts function evaluations
    #[error("did not converge within {iterations} function evaluations")]
    MaxIterations { iterations: usize },

    #[error("could not improve the root any further: {0}")]
    NoProgress(Stall),
}
