//! Power-term polynomials over `f64` and a grid search for their critical
//! and inflection points.
//!
//! A [`Poly`] is an ordered, bounded sum of [`Term`]s `coef * x^exp` with
//! real exponents. It supports evaluation, differentiation, integration and
//! a fixed two-decimal text rendering. [`PointFinder`] samples the first or
//! second derivative on a grid and reports where it is close to zero.
//!
//! ```
//! use critpoly::{find_points, Poly};
//!
//! let mut f = Poly::new();
//! f.add_term(1.0, 3.0).unwrap();
//! f.add_term(-3.0, 1.0).unwrap();
//!
//! let critical = find_points(&f, 1).unwrap();
//! assert_eq!(critical.len(), 2);
//! ```

pub mod algebra;
pub mod structures;
pub mod utils;

pub use algebra::calculus::{Differentiable, Integrable};
pub use algebra::function::RealFn;

pub use structures::points::{
    critical_points, find_points, inflection_points, Order, PointFinder, ScanConfig, ScanError,
};
pub use structures::poly::{Poly, PolyError};
pub use structures::term::Term;
pub use utils::snap_to_zero;
