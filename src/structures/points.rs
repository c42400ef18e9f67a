//! Critical and inflection point search.
//!
//! The target derivative is sampled on a fixed grid and every sample whose
//! magnitude falls inside the tolerance band is a candidate. Candidates are
//! merged against the most recently accepted point only: a candidate is
//! kept when it lies more than `merge_distance` away from that point.

use core::fmt;

use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::algebra::calculus::Differentiable;
use crate::algebra::function::RealFn;
use crate::structures::poly::Poly;
use crate::utils::{sample_at, sample_count, snap_to_zero};

/// Errors raised by the point search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Only first (critical) and second (inflection) order are supported.
    #[error("invalid point order {0}: expected 1 (critical) or 2 (inflection)")]
    InvalidOrder(u32),
    /// The scan configuration cannot produce a finite grid.
    #[error("invalid scan configuration: {reason}")]
    InvalidConfig { reason: &'static str },
}

/// Which derivative to search for zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Zeros of `f'`.
    Critical,
    /// Zeros of `f''`.
    Inflection,
}

impl Order {
    /// How many times to differentiate before scanning.
    pub const fn derivatives(self) -> usize {
        match self {
            Order::Critical => 1,
            Order::Inflection => 2,
        }
    }
}

impl TryFrom<u32> for Order {
    type Error = ScanError;

    fn try_from(order: u32) -> Result<Self, ScanError> {
        match order {
            1 => Ok(Order::Critical),
            2 => Ok(Order::Inflection),
            other => Err(ScanError::InvalidOrder(other)),
        }
    }
}

impl From<Order> for u32 {
    fn from(order: Order) -> u32 {
        order.derivatives() as u32
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Critical => write!(f, "critical"),
            Order::Inflection => write!(f, "inflection"),
        }
    }
}

/// Grid and thresholds for the point search.
///
/// The defaults scan `[-10, 10]` in steps of `0.0001`.
///
/// # Example
///
/// ```
/// use critpoly::ScanConfig;
///
/// let config = ScanConfig::default().with_range(-2.0, 2.0).with_step(0.001);
/// assert!(config.validate().is_ok());
/// assert!(ScanConfig::default().with_step(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanConfig {
    /// Left end of the grid, inclusive.
    pub min: f64,
    /// Right end of the grid, inclusive.
    pub max: f64,
    /// Grid spacing.
    pub step: f64,
    /// A sample is a candidate when `|target(x)| < tolerance`.
    pub tolerance: f64,
    /// A target whose coefficients are all within this bound is treated as
    /// identically zero and yields no points.
    pub zero_threshold: f64,
    /// Minimum distance from the last accepted point for a new one.
    pub merge_distance: f64,
    /// Accepted points closer than this to the origin are stored as `0.0`.
    pub snap_epsilon: f64,
}

impl ScanConfig {
    pub const DEFAULT_MIN: f64 = -10.0;
    pub const DEFAULT_MAX: f64 = 10.0;
    pub const DEFAULT_STEP: f64 = 0.0001;
    pub const DEFAULT_TOLERANCE: f64 = 0.005;
    pub const DEFAULT_ZERO_THRESHOLD: f64 = 1e-6;
    pub const DEFAULT_MERGE_DISTANCE: f64 = 0.5;
    pub const DEFAULT_SNAP_EPSILON: f64 = 0.005;

    /// Largest grid [`ScanConfig::validate`] accepts, in sample points.
    pub const MAX_SAMPLES: usize = 1_000_000_000;

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_zero_threshold(mut self, zero_threshold: f64) -> Self {
        self.zero_threshold = zero_threshold;
        self
    }

    pub fn with_merge_distance(mut self, merge_distance: f64) -> Self {
        self.merge_distance = merge_distance;
        self
    }

    pub fn with_snap_epsilon(mut self, snap_epsilon: f64) -> Self {
        self.snap_epsilon = snap_epsilon;
        self
    }

    /// Number of grid points, both endpoints included.
    ///
    /// Saturates at `usize::MAX` for grids that fail validation.
    pub fn samples(&self) -> usize {
        sample_count(self.min, self.max, self.step).saturating_add(1)
    }

    /// Check that the configuration describes a finite, non-empty grid of
    /// at most [`ScanConfig::MAX_SAMPLES`] points.
    pub fn validate(&self) -> Result<(), ScanError> {
        let values = [
            self.min,
            self.max,
            self.step,
            self.tolerance,
            self.zero_threshold,
            self.merge_distance,
            self.snap_epsilon,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ScanError::InvalidConfig {
                reason: "all parameters must be finite",
            });
        }
        if self.step <= 0.0 {
            return Err(ScanError::InvalidConfig {
                reason: "step must be positive",
            });
        }
        if self.min > self.max {
            return Err(ScanError::InvalidConfig {
                reason: "min must not exceed max",
            });
        }
        if self.tolerance <= 0.0 {
            return Err(ScanError::InvalidConfig {
                reason: "tolerance must be positive",
            });
        }
        if self.zero_threshold < 0.0 || self.merge_distance < 0.0 || self.snap_epsilon < 0.0 {
            return Err(ScanError::InvalidConfig {
                reason: "thresholds must not be negative",
            });
        }
        let intervals = ((self.max - self.min) / self.step).round();
        if !intervals.is_finite() || intervals >= Self::MAX_SAMPLES as f64 {
            return Err(ScanError::InvalidConfig {
                reason: "grid has too many samples",
            });
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
            step: Self::DEFAULT_STEP,
            tolerance: Self::DEFAULT_TOLERANCE,
            zero_threshold: Self::DEFAULT_ZERO_THRESHOLD,
            merge_distance: Self::DEFAULT_MERGE_DISTANCE,
            snap_epsilon: Self::DEFAULT_SNAP_EPSILON,
        }
    }
}

/// Brute-force grid search for approximate zeros of a derivative.
///
/// # Example
///
/// ```
/// use critpoly::{Order, PointFinder, Poly};
///
/// // f(x) = x^3 - 3x, f'(x) = 3x^2 - 3
/// let f = Poly::from_terms([(1.0, 3.0), (-3.0, 1.0)]).unwrap();
/// let points = PointFinder::default().find(&f, Order::Critical);
///
/// assert_eq!(points.len(), 2);
/// assert!((points[0] + 1.0).abs() < 0.005);
/// assert!((points[1] - 1.0).abs() < 0.005);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointFinder {
    config: ScanConfig,
}

impl PointFinder {
    /// Create a finder, rejecting configurations that fail
    /// [`ScanConfig::validate`].
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration this finder scans with.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Points in ascending order where the `order`-th derivative of `f`
    /// is approximately zero.
    ///
    /// Returns nothing when the target derivative is identically zero
    /// (every coefficient within `zero_threshold`), since every sample
    /// would match.
    #[instrument(level = "debug", skip_all, fields(order = %order))]
    pub fn find<F>(&self, f: &F, order: Order) -> Vec<f64>
    where
        F: Differentiable + Sync,
    {
        let target = f.nth_derivative(order.derivatives());
        if target.is_negligible(self.config.zero_threshold) {
            debug!("target derivative is identically zero, no points");
            return Vec::new();
        }

        debug!(
            min = self.config.min,
            max = self.config.max,
            step = self.config.step,
            samples = self.config.samples(),
            "scanning"
        );
        let points = self.merge(self.candidates(&target));
        debug!(found = points.len(), "scan finished");
        points
    }

    /// Grid points inside the tolerance band, ascending.
    #[cfg(not(feature = "parallel"))]
    fn candidates<F: RealFn>(&self, target: &F) -> Vec<f64> {
        let c = &self.config;
        (0..=sample_count(c.min, c.max, c.step))
            .map(|i| sample_at(c.min, c.step, i))
            .filter(|&x| target.eval(x).abs() < c.tolerance)
            .collect()
    }

    /// Grid points inside the tolerance band, ascending.
    ///
    /// Evaluation is split across the rayon pool; the indexed iterator
    /// keeps the collected candidates in grid order.
    #[cfg(feature = "parallel")]
    fn candidates<F: RealFn + Sync>(&self, target: &F) -> Vec<f64> {
        use rayon::prelude::*;

        let c = &self.config;
        (0..=sample_count(c.min, c.max, c.step))
            .into_par_iter()
            .map(|i| sample_at(c.min, c.step, i))
            .filter(|&x| target.eval(x).abs() < c.tolerance)
            .collect()
    }

    /// Keep a candidate only if it is far enough from the last kept point.
    fn merge(&self, candidates: Vec<f64>) -> Vec<f64> {
        let c = &self.config;
        let mut points: Vec<f64> = Vec::new();
        for x in candidates {
            let far = points
                .last()
                .map_or(true, |&last| (last - x).abs() > c.merge_distance);
            if far {
                let point = snap_to_zero(x, c.snap_epsilon);
                trace!(x = point, "accepted point");
                points.push(point);
            }
        }
        points
    }
}

/// Search `poly` with the default grid; `order` is 1 for critical points
/// and 2 for inflection points.
///
/// # Example
///
/// ```
/// use critpoly::{find_points, Poly, ScanError};
///
/// let f = Poly::from_terms([(1.0, 2.0)]).unwrap();
/// assert_eq!(find_points(&f, 1).unwrap(), vec![0.0]);
/// assert_eq!(find_points(&f, 3), Err(ScanError::InvalidOrder(3)));
/// ```
pub fn find_points(poly: &Poly, order: u32) -> Result<Vec<f64>, ScanError> {
    let order = Order::try_from(order)?;
    Ok(PointFinder::default().find(poly, order))
}

/// Approximate zeros of `poly'` on the default grid.
pub fn critical_points(poly: &Poly) -> Vec<f64> {
    PointFinder::default().find(poly, Order::Critical)
}

/// Approximate zeros of `poly''` on the default grid.
pub fn inflection_points(poly: &Poly) -> Vec<f64> {
    PointFinder::default().find(poly, Order::Inflection)
}
