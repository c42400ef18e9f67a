use super::function::RealFn;

/// A function with a symbolic derivative of the same representation.
///
/// Laws (you should test these for concrete types):
/// - the derivative of a constant is negligible for any threshold
/// - `nth_derivative(0)` is a copy of `self`
pub trait Differentiable: RealFn + Sized + Clone {
    /// First derivative `f'`.
    fn derivative(&self) -> Self;

    /// Check whether every coefficient is at most `threshold` in magnitude,
    /// i.e. the function is identically zero for practical purposes.
    fn is_negligible(&self, threshold: f64) -> bool;

    /// Repeated differentiation.
    fn nth_derivative(&self, n: usize) -> Self {
        let mut result = self.clone();
        for _ in 0..n {
            result = result.derivative();
        }
        result
    }
}

/// A function with a symbolic antiderivative.
pub trait Integrable: Sized {
    type Error;

    /// Antiderivative plus the integration constant `c`.
    fn integral(&self, c: f64) -> Result<Self, Self::Error>;
}
