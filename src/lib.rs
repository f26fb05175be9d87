//! Piecewise cubic interpolation through sampled data.
//!
//! [build] solves for the slope of the interpolant at every sample and turns the
//! slopes into per-segment cubic coefficients ([CoefficientTable]). An [Evaluator]
//! borrows the table and evaluates the spline anywhere, continuing the outermost
//! cubics beyond the sampled range.
//!
//! # Example
//! ```
//! use cubic_interp::{build, Evaluator};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let x = vec![-2.0, -1.5, -1.0, -0.5, 0.0, 0.5];
//! let y: Vec<f64> = x.iter().map(|x: &f64| x * x * (-x * x).exp()).collect();
//!
//! let table = build(&x, &y).unwrap();
//! let spline = Evaluator::new(&table);
//!
//! assert_eq!(y[0], spline.evaluate(-2.0));
//! assert_approx_eq!(0.2371, spline.evaluate(-1.5), 1e-3);
//! assert_approx_eq!(0.1947, spline.evaluate(-0.5), 1e-3);
//! ```

mod builder;
mod coefficients;
mod error;
mod evaluator;
mod sample;
mod tridiagonal;

pub use builder::{build, build_samples};
pub use coefficients::{CoefficientTable, Cubic};
pub use error::{BuildError, EvaluateError, SampleError};
pub use evaluator::{Evaluator, SegmentLookup};
pub use sample::{SampleSet, MIN_SAMPLES};
