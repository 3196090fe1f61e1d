//! Macros for reducing doc comment boilerplate.

/// Default explanation for [`crate::Error::ShapeMismatch`] errors.
macro_rules! errors_shape_mismatch {
    () => {
        r"- `ShapeMismatch`: the number of coefficients is not `degree + 1`. Nothing is evaluated.
"
    };
}
pub(crate) use errors_shape_mismatch;

/// Default explanation for [`crate::Error::InvalidConfig`] errors.
macro_rules! errors_invalid_config {
    () => {
        r"- `InvalidConfig`: `max_iterations` is zero, `tolerance` is negative or NaN, or the initial guess is not finite. Nothing is evaluated.
"
    };
}
pub(crate) use errors_invalid_config;

/// Explains that not converging is reported, not raised.
macro_rules! warning_no_converge {
    () => {
        r"Not converging is not an error: the best estimate and the full error trace are returned with [`crate::RootResult::warning`] set.
"
    };
}
pub(crate) use warning_no_converge;
