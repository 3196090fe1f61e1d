use std::fmt::{Debug, Display};

use num::{Float, FromPrimitive};

/// Real floating point numbers the evaluator and solver can work with.
///
/// Implemented for [`f32`] and [`f64`].
pub trait RealScalar: Float + FromPrimitive + Display + Debug + Send + Sync + 'static {
    /// Cast an algorithm constant into `Self`.
    ///
    /// Constants used by the solver are small and exactly representable in
    /// both `f32` and `f64` (up to rounding), so this never fails.
    fn cast(x: f64) -> Self;

    /// Lossy conversion to `f64`, used in diagnostics.
    fn lossy_f64(self) -> f64;
}

impl RealScalar for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn cast(x: f64) -> Self {
        x as Self
    }

    fn lossy_f64(self) -> f64 {
        f64::from(self)
    }
}

impl RealScalar for f64 {
    fn cast(x: f64) -> Self {
        x
    }

    fn lossy_f64(self) -> f64 {
        self
    }
}
