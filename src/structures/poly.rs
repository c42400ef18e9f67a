use core::fmt;

use thiserror::Error;
use tracing::warn;

use crate::algebra::calculus::{Differentiable, Integrable};
use crate::algebra::function::RealFn;
use crate::structures::term::Term;

/// Errors raised while building a polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolyError {
    /// The polynomial already holds the maximum number of terms.
    #[error("polynomial is full: at most {capacity} terms are allowed")]
    CapacityExceeded { capacity: usize },
}

/// A sum of power terms `Σ coef_i * x^exp_i` with real exponents.
///
/// Terms are kept in insertion order. Like terms are not merged, so two
/// terms may share an exponent. The number of terms is bounded by
/// [`Poly::MAX_TERMS`]; inserting past the bound is an error and leaves
/// the polynomial untouched.
///
/// The empty polynomial is the zero function and renders as `"0"`.
///
/// # Example
///
/// ```
/// use critpoly::Poly;
///
/// // f(x) = x^3 - 3x
/// let mut f = Poly::new();
/// f.add_term(1.0, 3.0).unwrap();
/// f.add_term(-3.0, 1.0).unwrap();
///
/// assert_eq!(f.eval(2.0), 2.0);
/// assert_eq!(f.to_string(), "1.00x^3.00-3.00x");
/// assert_eq!(f.derivative().to_string(), "3.00x^2.00-3.00");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Poly {
    terms: Vec<Term>,
}

impl Poly {
    /// Maximum number of terms a polynomial can hold.
    pub const MAX_TERMS: usize = 100;

    /// Create the empty (zero) polynomial.
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Build a polynomial from terms in order.
    ///
    /// Returns `PolyError::CapacityExceeded` if there are more than
    /// [`Poly::MAX_TERMS`] terms.
    ///
    /// # Example
    ///
    /// ```
    /// use critpoly::{Poly, Term};
    ///
    /// let p = Poly::from_terms([Term::new(1.0, 2.0), Term::constant(-4.0)]).unwrap();
    /// assert_eq!(p.eval(2.0), 0.0);
    /// ```
    pub fn from_terms<I>(terms: I) -> Result<Self, PolyError>
    where
        I: IntoIterator,
        I::Item: Into<Term>,
    {
        let mut poly = Self::new();
        for term in terms {
            poly.push(term.into())?;
        }
        Ok(poly)
    }

    /// Append the term `coef * x^exp`.
    ///
    /// # Example
    ///
    /// ```
    /// use critpoly::{Poly, PolyError};
    ///
    /// let mut p = Poly::new();
    /// for _ in 0..Poly::MAX_TERMS {
    ///     p.add_term(1.0, 0.0).unwrap();
    /// }
    /// assert_eq!(
    ///     p.add_term(1.0, 0.0),
    ///     Err(PolyError::CapacityExceeded { capacity: Poly::MAX_TERMS })
    /// );
    /// assert_eq!(p.len(), Poly::MAX_TERMS);
    /// ```
    pub fn add_term(&mut self, coef: f64, exp: f64) -> Result<(), PolyError> {
        self.push(Term::new(coef, exp))
    }

    /// Append an existing term.
    pub fn push(&mut self, term: Term) -> Result<(), PolyError> {
        if self.is_full() {
            warn!(
                coef = term.coef,
                exp = term.exp,
                capacity = Self::MAX_TERMS,
                "term rejected, polynomial is full"
            );
            return Err(PolyError::CapacityExceeded {
                capacity: Self::MAX_TERMS,
            });
        }
        self.terms.push(term);
        Ok(())
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.terms.len() >= Self::MAX_TERMS
    }

    /// Evaluate `Σ coef_i * x^exp_i`.
    ///
    /// Exponentiation is `f64::powf`, so a negative exponent at `x = 0`
    /// gives `inf` and a fractional exponent at negative `x` gives `NaN`.
    ///
    /// # Example
    ///
    /// ```
    /// use critpoly::Poly;
    ///
    /// let mut p = Poly::new();
    /// p.add_term(1.0, 2.0).unwrap();
    /// assert_eq!(p.eval(3.0), 9.0);
    /// ```
    pub fn eval(&self, x: f64) -> f64 {
        self.terms.iter().map(|t| t.eval(x)).sum()
    }

    /// First derivative by the power rule.
    ///
    /// Constant terms (exponent exactly `0`) are dropped; the remaining
    /// terms keep their relative order. The result never has more terms
    /// than `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use critpoly::Poly;
    ///
    /// let mut p = Poly::new();
    /// p.add_term(1.0, 2.0).unwrap();
    /// p.add_term(5.0, 0.0).unwrap();
    /// assert_eq!(p.derivative().to_string(), "2.00x");
    /// ```
    pub fn derivative(&self) -> Self {
        Self {
            terms: self.terms.iter().filter_map(Term::derivative).collect(),
        }
    }

    /// Antiderivative plus the constant `c`.
    ///
    /// Every term `(a, e)` becomes `(a/(e+1), e+1)`; a term with `e = -1`
    /// produces an infinite or NaN coefficient. The constant is appended as
    /// a trailing `(c, 0)` term only when `c != 0`, so passing `0.0` means
    /// no constant term at all.
    ///
    /// Returns `PolyError::CapacityExceeded` if the constant does not fit.
    ///
    /// # Example
    ///
    /// ```
    /// use critpoly::Poly;
    ///
    /// let mut p = Poly::new();
    /// p.add_term(1.0, 2.0).unwrap();
    /// assert_eq!(p.integral(0.0).unwrap().to_string(), "0.33x^3.00");
    /// assert_eq!(p.integral(2.0).unwrap().to_string(), "0.33x^3.00 + 2.00");
    /// ```
    pub fn integral(&self, c: f64) -> Result<Self, PolyError> {
        let mut result = Self {
            terms: self.terms.iter().map(Term::integral).collect(),
        };
        if c != 0.0 {
            result.push(Term::constant(c))?;
        }
        Ok(result)
    }

    /// Render as text, same as the `Display` impl.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl RealFn for Poly {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        Poly::eval(self, x)
    }
}

impl Differentiable for Poly {
    fn derivative(&self) -> Self {
        Poly::derivative(self)
    }

    fn is_negligible(&self, threshold: f64) -> bool {
        self.terms.iter().all(|t| t.coef.abs() <= threshold)
    }
}

impl Integrable for Poly {
    type Error = PolyError;

    fn integral(&self, c: f64) -> Result<Self, PolyError> {
        Poly::integral(self, c)
    }
}

impl TryFrom<Vec<Term>> for Poly {
    type Error = PolyError;

    fn try_from(terms: Vec<Term>) -> Result<Self, PolyError> {
        if terms.len() > Self::MAX_TERMS {
            return Err(PolyError::CapacityExceeded {
                capacity: Self::MAX_TERMS,
            });
        }
        Ok(Self { terms })
    }
}

impl fmt::Display for Poly {
    /// Terms in order, two decimals each.
    ///
    /// A negative coefficient is prefixed by `-` with no spaces; any other
    /// coefficient after the first is prefixed by ` + `, including zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }

        for (i, term) in self.terms.iter().enumerate() {
            if term.coef < 0.0 {
                write!(f, "-")?;
            } else if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", term)?;
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Poly {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as a sequence of [coef, exp] pairs
        let pairs: Vec<(f64, f64)> = self.terms.iter().map(|t| (t.coef, t.exp)).collect();
        pairs.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Poly {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pairs = Vec::<(f64, f64)>::deserialize(deserializer)?;
        Self::from_terms(pairs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(terms: &[(f64, f64)]) -> Poly {
        Poly::from_terms(terms.iter().copied()).unwrap()
    }

    #[test]
    fn new_is_empty() {
        let p = Poly::new();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(p, Poly::default());
    }

    #[test]
    fn add_term_keeps_insertion_order() {
        let p = poly(&[(1.0, 0.0), (2.0, 5.0), (3.0, 1.0)]);
        let exps: Vec<f64> = p.terms().iter().map(|t| t.exp).collect();
        assert_eq!(exps, vec![0.0, 5.0, 1.0]);
    }

    #[test]
    fn like_terms_are_not_merged() {
        let p = poly(&[(1.0, 2.0), (1.0, 2.0)]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.to_string(), "1.00x^2.00 + 1.00x^2.00");
        assert_eq!(p.eval(3.0), 18.0);
    }

    #[test]
    fn add_term_past_capacity() {
        let mut p = Poly::new();
        for i in 0..Poly::MAX_TERMS {
            p.add_term(i as f64, 1.0).unwrap();
        }
        assert!(p.is_full());

        let before = p.clone();
        assert_eq!(
            p.add_term(1.0, 1.0),
            Err(PolyError::CapacityExceeded {
                capacity: Poly::MAX_TERMS
            })
        );
        assert_eq!(p, before);
    }

    #[test]
    fn from_terms_too_many() {
        let terms = vec![Term::constant(1.0); Poly::MAX_TERMS + 1];
        assert!(Poly::from_terms(terms.clone()).is_err());
        assert!(Poly::try_from(terms).is_err());
    }

    #[test]
    fn eval_empty_is_zero() {
        assert_eq!(Poly::new().eval(3.5), 0.0);
    }

    #[test]
    fn eval_square() {
        assert_eq!(poly(&[(1.0, 2.0)]).eval(3.0), 9.0);
    }

    #[test]
    fn eval_cubic() {
        let p = poly(&[(1.0, 3.0), (-3.0, 1.0)]);
        assert_eq!(p.eval(2.0), 2.0);
        assert_eq!(p.eval(-1.0), 2.0);
    }

    #[test]
    fn eval_negative_exponent_at_zero_is_infinite() {
        let p = poly(&[(1.0, -1.0)]);
        assert_eq!(p.eval(0.0), f64::INFINITY);
    }

    #[test]
    fn eval_fractional_exponent_of_negative_is_nan() {
        let p = poly(&[(1.0, 0.5)]);
        assert!(p.eval(-4.0).is_nan());
    }

    #[test]
    fn derivative_square() {
        let d = poly(&[(1.0, 2.0)]).derivative();
        assert_eq!(d.terms(), &[Term::new(2.0, 1.0)]);
        assert_eq!(d.to_string(), "2.00x");
    }

    #[test]
    fn derivative_drops_constants_in_order() {
        let p = poly(&[(4.0, 0.0), (1.0, 3.0), (9.0, 0.0), (2.0, 1.0)]);
        let d = p.derivative();
        assert_eq!(d.terms(), &[Term::new(3.0, 2.0), Term::new(2.0, 0.0)]);
    }

    #[test]
    fn derivative_of_constant_is_empty() {
        assert!(poly(&[(5.0, 0.0), (-2.0, 0.0)]).derivative().is_empty());
    }

    #[test]
    fn derivative_does_not_touch_source() {
        let p = poly(&[(1.0, 2.0)]);
        let before = p.clone();
        let _ = p.derivative();
        let _ = p.integral(1.0).unwrap();
        assert_eq!(p, before);
    }

    #[test]
    fn nth_derivative_of_cubic() {
        let p = poly(&[(1.0, 3.0), (-3.0, 1.0)]);
        let d2 = p.nth_derivative(2);
        assert_eq!(d2.terms(), &[Term::new(6.0, 1.0)]);
        assert_eq!(p.nth_derivative(0), p);
        assert!(p.nth_derivative(4).is_empty());
    }

    #[test]
    fn integral_square() {
        let i = poly(&[(1.0, 2.0)]).integral(0.0).unwrap();
        assert_eq!(i.len(), 1);
        assert!((i.terms()[0].coef - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(i.terms()[0].exp, 3.0);
        assert_eq!(i.to_string(), "0.33x^3.00");
    }

    #[test]
    fn integral_appends_nonzero_constant() {
        let i = poly(&[(2.0, 1.0)]).integral(-3.0).unwrap();
        assert_eq!(i.terms(), &[Term::new(1.0, 2.0), Term::constant(-3.0)]);
    }

    #[test]
    fn integral_zero_constant_is_omitted() {
        let i = poly(&[(2.0, 1.0)]).integral(0.0).unwrap();
        assert_eq!(i.len(), 1);
        let neg_zero = poly(&[(2.0, 1.0)]).integral(-0.0).unwrap();
        assert_eq!(neg_zero.len(), 1);
    }

    #[test]
    fn integral_of_empty_with_constant() {
        let i = Poly::new().integral(4.0).unwrap();
        assert_eq!(i.terms(), &[Term::constant(4.0)]);
    }

    #[test]
    fn integral_reciprocal_is_not_special_cased() {
        let i = poly(&[(1.0, -1.0)]).integral(0.0).unwrap();
        assert_eq!(i.terms()[0].coef, f64::INFINITY);
        assert_eq!(i.terms()[0].exp, 0.0);
    }

    #[test]
    fn integral_full_poly_with_constant_fails() {
        let p = Poly::from_terms(vec![Term::new(1.0, 1.0); Poly::MAX_TERMS]).unwrap();
        assert!(p.integral(0.0).is_ok());
        assert_eq!(
            p.integral(1.0),
            Err(PolyError::CapacityExceeded {
                capacity: Poly::MAX_TERMS
            })
        );
    }

    #[test]
    fn integrable_trait_matches_inherent() {
        fn antiderivative<F: Integrable>(f: &F) -> Result<F, F::Error> {
            f.integral(1.0)
        }
        let p = poly(&[(3.0, 2.0)]);
        assert_eq!(antiderivative(&p), p.integral(1.0));
    }

    #[test]
    fn display_empty() {
        assert_eq!(Poly::new().to_string(), "0");
        assert_eq!(Poly::new().render(), "0");
    }

    #[test]
    fn display_leading_negative() {
        assert_eq!(poly(&[(-2.0, 0.0)]).to_string(), "-2.00");
    }

    #[test]
    fn display_mixed_signs() {
        let p = poly(&[(-1.5, 2.0), (2.0, 1.0), (-0.25, 0.0)]);
        assert_eq!(p.to_string(), "-1.50x^2.00 + 2.00x-0.25");
    }

    #[test]
    fn display_zero_coefficient_gets_plus() {
        let p = poly(&[(1.0, 1.0), (0.0, 2.0)]);
        assert_eq!(p.to_string(), "1.00x + 0.00x^2.00");
    }

    #[test]
    fn display_negative_zero_is_unsigned() {
        let p = poly(&[(1.0, 1.0), (-0.0, 0.0)]);
        assert_eq!(p.to_string(), "1.00x + 0.00");
    }

    #[test]
    fn display_fractional_exponent() {
        assert_eq!(poly(&[(3.0, 0.5)]).to_string(), "3.00x^0.50");
    }

    #[test]
    fn negligible_check() {
        assert!(Poly::new().is_negligible(1e-6));
        assert!(poly(&[(1e-7, 2.0), (-1e-6, 0.0)]).is_negligible(1e-6));
        assert!(!poly(&[(1e-7, 2.0), (2e-6, 0.0)]).is_negligible(1e-6));
    }
}
