/// A real-valued function of one real variable.
///
/// Implementations follow IEEE-754 semantics: evaluating outside the
/// function's domain yields `inf` or `NaN` rather than an error.
pub trait RealFn {
    /// Evaluate the function at `x`.
    fn eval(&self, x: f64) -> f64;
}

