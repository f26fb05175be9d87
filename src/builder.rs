use log::{debug, trace};
use nalgebra::DVector;

use crate::{
    coefficients::{CoefficientTable, Cubic},
    error::BuildError,
    sample::{validate, SampleSet},
    tridiagonal::Tridiagonal,
};

/// Builds cubic spline coefficients through the samples `(x[i], y[i])`.
///
/// Slopes at the knots are found from first and second derivative continuity
/// at interior knots, with not-a-knot conditions at both ends (the first two and
/// the last two segments share a single cubic). Input is validated in order:
/// lengths must agree, at least 4 samples are needed, no two adjacent
/// abscissas may be equal and abscissas must be strictly increasing or strictly
/// decreasing. On error no coefficients are produced.
/// # Example
/// ```
/// use cubic_interp::{build, BuildError};
///
/// let table = build(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 8.0, 27.0]).unwrap();
/// assert_eq!(3, table.len());
///
/// assert_eq!(Err(BuildError::InsufficientData { len: 3 }), build(&[0.0, 1.0, 2.0], &[0.0, 1.0, 8.0]));
/// ```
pub fn build(x: &[f64], y: &[f64]) -> Result<CoefficientTable, BuildError> {
    validate(x, y)?;
    Ok(calculate_coefficients(x.to_vec(), y.to_vec()))
}

/// Same as [build] for samples that were already validated by [SampleSet::new].
pub fn build_samples(samples: SampleSet) -> CoefficientTable {
    let (x, y) = samples.into_parts();
    calculate_coefficients(x, y)
}

fn calculate_coefficients(x: Vec<f64>, y: Vec<f64>) -> CoefficientTable {
    let n = x.len();
    debug!("building cubic spline through {} knots from x = {} to x = {}", n, x[0], x[n - 1]);

    let dx: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let slopes = calculate_knot_slopes(&x, &y, &dx);
    trace!("knot slopes: {:?}", slopes.as_slice());

    let mut table = CoefficientTable::with_capacity(x, y);
    for i in 0..dx.len() {
        let cubic = segment_cubic(table.values()[i], table.values()[i + 1], slopes[i], slopes[i + 1], dx[i]);
        table.push(cubic);
    }
    table
}

/// Solves the tridiagonal system for the first derivative at every knot.
///
/// Interior row `i` reads
/// `dx[i] * b[i-1] + 2 * (dx[i-1] + dx[i]) * b[i] + dx[i-1] * b[i+1] = rhs[i]`.
/// The end rows tie the outermost slope to its neighbour through the widths of
/// the two outermost segments and their combined span.
fn calculate_knot_slopes(x: &[f64], y: &[f64], dx: &[f64]) -> DVector<f64> {
    let n = x.len();
    let last = dx.len() - 1;
    let secant = |i: usize| (y[i + 1] - y[i]) / dx[i];

    let mut matrix = Tridiagonal::zeros(n);
    let mut rhs = DVector::<f64>::zeros(n);

    for i in 1..n - 1 {
        rhs[i] = 3.0 * (dx[i] * secant(i - 1) + dx[i - 1] * secant(i));
        matrix.set_row(i, dx[i], 2.0 * (dx[i - 1] + dx[i]), dx[i - 1]);
    }

    let head_span = x[2] - x[0];
    rhs[0] = ((dx[0] + 2.0 * head_span) * dx[1] * secant(0) + dx[0].powi(2) * secant(1)) / head_span;
    matrix.set_row(0, 0.0, dx[1], head_span);

    let tail_span = x[n - 1] - x[n - 3];
    rhs[n - 1] = (dx[last].powi(2) * secant(last - 1)
        + (2.0 * tail_span + dx[last]) * dx[last - 1] * secant(last))
        / tail_span;
    matrix.set_row(n - 1, tail_span, dx[last - 1], 0.0);

    matrix.solve_in_place(&mut rhs);
    rhs
}

/// Hermite cubic on one segment from its end values and end slopes.
fn segment_cubic(y0: f64, y1: f64, slope0: f64, slope1: f64, dx: f64) -> Cubic {
    let rise = (y1 - y0) / dx.powi(2);
    let dzzdx = rise - slope0 / dx;
    let dzdxdx = slope1 / dx - rise;

    Cubic {
        a: (dzdxdx - dzzdx) / dx,
        bq: 2.0 * dzzdx - dzdxdx,
        c: slope0,
        d: y0,
    }
}
