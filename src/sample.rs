use std::cmp::Ordering;

use crate::error::{BuildError, SampleError};

/// Smallest number of samples a cubic spline can be built from.
pub const MIN_SAMPLES: usize = 4;

/// Slack applied to `(right - left) / step` so that a grid whose last point lands
/// on `right` up to round-off still includes it.
const GRID_SLACK: f64 = 1e-9;

/// Validated pair of abscissas and ordinates through which a spline passes.
/// - `x` - knot positions, strictly increasing or strictly decreasing,
/// - `y` - sampled values, one per knot.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSet {
    /// Creates [SampleSet] after checking, in order, that lengths agree, that there
    /// are at least [MIN_SAMPLES] samples, that no two adjacent abscissas are equal and
    /// that abscissas never change direction.
    /// # Example
    /// ```
    /// use cubic_interp::{BuildError, SampleSet};
    ///
    /// let samples = SampleSet::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 0.0, 1.0, 0.0]);
    /// assert!(samples.is_ok());
    ///
    /// let samples = SampleSet::new(vec![0.0, 1.0, 1.0, 3.0], vec![1.0, 0.0, 1.0, 0.0]);
    /// assert_eq!(samples, Err(BuildError::DegenerateSpacing { index: 1 }));
    /// ```
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, BuildError> {
        validate(&x, &y)?;
        Ok(SampleSet { x, y })
    }

    /// Samples `f` on the grid `left, left + step, ..., right`.
    ///
    /// Every abscissa is computed from its index rather than by accumulating `step`,
    /// so the grid neither drifts nor loses its last point to round-off.
    /// The returned set is not validated; pass it to [crate::build_samples] which
    /// reports grids that are too short.
    /// # Example
    /// ```
    /// use cubic_interp::SampleSet;
    ///
    /// let (x, y) = SampleSet::tabulate(0.0, 1.0, 0.25, |x| 2.0 * x).unwrap();
    /// assert_eq!(x, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    /// assert_eq!(y, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    /// ```
    pub fn tabulate<F>(left: f64, right: f64, step: f64, f: F) -> Result<(Vec<f64>, Vec<f64>), SampleError>
    where
        F: Fn(f64) -> f64,
    {
        if !step.is_finite() || step <= 0.0 {
            return Err(SampleError::InvalidStep(step));
        }
        if !left.is_finite() || !right.is_finite() || right < left {
            return Err(SampleError::InvalidBounds { left, right });
        }

        let steps = ((right - left) / step + GRID_SLACK).floor() as usize;
        let x: Vec<f64> = (0..=steps)
            .map(|k| left + step * k as f64)
            .collect();
        let y = x.iter().map(|xi| f(*xi)).collect();

        Ok((x, y))
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }
}

/// Checks performed before any coefficient is computed. The first failing check wins.
pub(crate) fn validate(x: &[f64], y: &[f64]) -> Result<(), BuildError> {
    if x.len() != y.len() {
        return Err(BuildError::LengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    if x.len() < MIN_SAMPLES {
        return Err(BuildError::InsufficientData { len: x.len() });
    }
    if let Some(index) = x.windows(2).position(|w| w[1] - w[0] == 0.0) {
        return Err(BuildError::DegenerateSpacing { index });
    }

    // NaN spacing never compares as Greater, so it is rejected here too
    let direction = (x[1] - x[0]).signum();
    match x
        .windows(2)
        .position(|w| ((w[1] - w[0]) * direction).partial_cmp(&0.0) != Some(Ordering::Greater))
    {
        Some(index) => Err(BuildError::NonMonotonic { index }),
        None => Ok(()),
    }
}
