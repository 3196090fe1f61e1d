use std::fmt::Display;

use crate::{__util::doc_macros::errors_shape_mismatch, Error, RealScalar};

/// The function `f(x) = k*cos(x) + c_0 + c_1*x + ... + c_n*x^n`.
///
/// `coefficients[i]` multiplies `x^i`. The polynomial part always has exactly
/// `degree + 1` coefficients, this is checked when constructing.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSpec<T: RealScalar> {
    degree: usize,
    coefficients: Vec<T>,
    k: T,
}

impl<T: RealScalar> FunctionSpec<T> {
    /// # Errors
    #[doc = errors_shape_mismatch!()]
    ///
    /// # Examples
    /// ```
    /// use root_calculator::{Error, FunctionSpec};
    ///
    /// // 8*cos(x) + 3 - 7x - x^2 + 8x^3
    /// let f = FunctionSpec::new(3, vec![3.0, -7.0, -1.0, 8.0], 8.0).unwrap();
    /// assert_eq!(f.eval(0.0), 11.0);
    ///
    /// let e = FunctionSpec::new(2, vec![1.0, 2.0], 0.0).unwrap_err();
    /// assert!(matches!(e, Error::ShapeMismatch { expected: 3, got: 2, .. }));
    /// ```
    pub fn new(degree: usize, coefficients: Vec<T>, k: T) -> Result<Self, Error> {
        if degree.checked_add(1) != Some(coefficients.len()) {
            return Err(Error::shape_mismatch(degree, coefficients.len()));
        }
        Ok(Self {
            degree,
            coefficients,
            k,
        })
    }

    /// Same as [`FunctionSpec::new`], the degree is taken from the slice.
    ///
    /// # Errors
    /// - `ShapeMismatch`: `coefficients` is empty
    pub fn from_coefficients(coefficients: &[T], k: T) -> Result<Self, Error> {
        match coefficients.len() {
            0 => Err(Error::ShapeMismatch {
                degree: 0,
                expected: 1,
                got: 0,
            }),
            n => Self::new(n - 1, coefficients.to_vec(), k),
        }
    }

    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Amplitude of the cosine term
    #[must_use]
    pub const fn k(&self) -> T {
        self.k
    }

    /// Evaluate the function at `x`.
    ///
    /// The cosine term is computed first, then the polynomial terms are added
    /// in ascending order of power. Every power is computed on its own with
    /// [`Float::powi`](num::Float::powi). NaN and infinities propagate.
    #[must_use]
    pub fn eval(&self, x: T) -> T {
        self.coefficients
            .iter()
            .zip(0..)
            .fold(self.k * x.cos(), |acc, (c, i)| acc + *c * x.powi(i))
    }

    /// Borrow the function as a closure, e.g. to hand it to a solver.
    pub fn as_fn(&self) -> impl Fn(T) -> T + '_ {
        move |x| self.eval(x)
    }
}

/// Evaluate `spec` at `x`, see [`FunctionSpec::eval`].
#[must_use]
pub fn evaluate<T: RealScalar>(x: T, spec: &FunctionSpec<T>) -> T {
    spec.eval(x)
}

impl<T: RealScalar> Display for FunctionSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*cos(x)", self.k)?;
        for (i, c) in self.coefficients.iter().enumerate() {
            match i {
                0 => write!(f, " + {c}")?,
                _ => write!(f, " + {c}*x^{i}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{evaluate, FunctionSpec};
    use crate::Error;

    #[test]
    fn eval_polynomial_only() {
        // (x - 1)^2
        let f = FunctionSpec::new(2, vec![1.0, -2.0, 1.0], 0.0).unwrap();
        assert_eq!(f.eval(1.0), 0.0);
        assert_eq!(f.eval(3.0), 4.0);
        assert_eq!(f.eval(-1.0), 4.0);
    }

    #[test]
    fn eval_cosine_only() {
        let f = FunctionSpec::new(0, vec![0.0], 2.0).unwrap();
        assert_eq!(f.eval(0.0), 2.0);
        assert!((f.eval(std::f64::consts::PI) + 2.0).abs() < 1E-15);
    }

    #[test]
    fn eval_mixed() {
        let f = FunctionSpec::new(3, vec![3.0, -7.0, -1.0, 8.0], 8.0).unwrap();
        let x: f64 = -1.0;
        let expected = 8.0 * x.cos() + 3.0 + 7.0 - 1.0 - 8.0;
        assert!((f.eval(x) - expected).abs() < 1E-14);
    }

    #[test]
    fn eval_powers_are_per_term() {
        let f = FunctionSpec::new(4, vec![0.5, -1.25, 2.0, 0.75, -3.0], 1.5).unwrap();
        for x in [-2.3, -0.7, 0.1, 1.9, 13.0] {
            let expected = 1.5 * f64::cos(x) + 0.5 - 1.25 * x.powi(1) + 2.0 * x.powi(2)
                + 0.75 * x.powi(3)
                - 3.0 * x.powi(4);
            assert_eq!(f.eval(x).to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn eval_is_pure() {
        let f = FunctionSpec::<f64>::new(3, vec![0.1, -0.7, 1.3, 2.9], -4.2).unwrap();
        for x in [-3.7, -0.1, 0.0, 0.33, 12.5] {
            assert_eq!(f.eval(x).to_bits(), f.eval(x).to_bits());
            assert_eq!(evaluate(x, &f).to_bits(), f.eval(x).to_bits());
        }
    }

    #[test]
    fn eval_propagates_non_finite() {
        let f = FunctionSpec::new(1, vec![1.0, 1.0], 1.0).unwrap();
        assert!(f.eval(f64::NAN).is_nan());
        let g = FunctionSpec::new(2, vec![0.0, 0.0, 1.0], 0.0).unwrap();
        assert_eq!(g.eval(f64::MAX), f64::INFINITY);
    }

    #[test]
    fn shape_mismatch() {
        assert_eq!(
            FunctionSpec::new(2, vec![1.0, 2.0], 0.0),
            Err(Error::ShapeMismatch {
                degree: 2,
                expected: 3,
                got: 2
            })
        );
        assert!(FunctionSpec::new(0, vec![1.0, 2.0], 0.0).is_err());
        assert!(FunctionSpec::<f64>::from_coefficients(&[], 1.0).is_err());
    }

    #[test]
    fn from_coefficients() {
        let f = FunctionSpec::from_coefficients(&[1.0f32, 2.0, 3.0], 0.5).unwrap();
        assert_eq!(f.degree(), 2);
        assert_eq!(f.k(), 0.5);
    }

    #[test]
    fn display() {
        let f = FunctionSpec::new(2, vec![3.0, -7.0, 1.5], 8.0).unwrap();
        assert_eq!(f.to_string(), "8*cos(x) + 3 + -7*x^1 + 1.5*x^2");
    }
}
