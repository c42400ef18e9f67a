use core::fmt;

/// A single power term `coef * x^exp`.
///
/// The exponent is real-valued, so fractional and negative powers are
/// allowed. Evaluation uses `f64::powf` and inherits its conventions,
/// e.g. `0^-1 = inf`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    pub coef: f64,
    pub exp: f64,
}

impl Term {
    /// Create the term `coef * x^exp`.
    ///
    /// # Example
    ///
    /// ```
    /// use critpoly::Term;
    ///
    /// let t = Term::new(3.0, 2.0); // 3x^2
    /// assert_eq!(t.eval(2.0), 12.0);
    /// ```
    pub const fn new(coef: f64, exp: f64) -> Self {
        Self { coef, exp }
    }

    /// Constant term `c * x^0`.
    pub const fn constant(c: f64) -> Self {
        Self { coef: c, exp: 0.0 }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.exp == 0.0
    }

    /// Evaluate `coef * x^exp`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.coef * x.powf(self.exp)
    }

    /// Power rule: `d/dx c*x^e = c*e * x^(e-1)`.
    ///
    /// Returns `None` for constants, whose derivative vanishes.
    pub fn derivative(&self) -> Option<Self> {
        if self.is_constant() {
            None
        } else {
            Some(Self::new(self.coef * self.exp, self.exp - 1.0))
        }
    }

    /// Power rule antiderivative: `c/(e+1) * x^(e+1)`.
    ///
    /// There is no logarithmic case: `e = -1` divides by zero and the
    /// coefficient becomes `inf` or `NaN`.
    pub fn integral(&self) -> Self {
        let exp = self.exp + 1.0;
        Self::new(self.coef / exp, exp)
    }
}

impl From<(f64, f64)> for Term {
    fn from((coef, exp): (f64, f64)) -> Self {
        Self::new(coef, exp)
    }
}

impl fmt::Display for Term {
    /// Magnitude-only rendering; the sign is handled by the enclosing polynomial.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mag = self.coef.abs();
        if self.exp == 0.0 {
            write!(f, "{:.2}", mag)
        } else if self.exp == 1.0 {
            write!(f, "{:.2}x", mag)
        } else {
            write!(f, "{:.2}x^{:.2}", mag, self.exp)
        }
    }
}
