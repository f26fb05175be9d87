use log::warn;
use nalgebra::DVector;

/// Pivots smaller than this fraction of their row's scale are reported as unstable.
const PIVOT_WARNING_RATIO: f64 = 1e-12;

/// Square tridiagonal matrix stored as three bands of equal length `n`.
///
///```text
/// beta(0)   gama(0)   0         0        ...
/// alfa(1)   beta(1)   gama(1)   0        ...
/// 0         alfa(2)   beta(2)   gama(2)
/// ...
///```
/// `alfa[0]` and `gama[n - 1]` lie outside the matrix and are ignored.
#[derive(Debug, Clone)]
pub(crate) struct Tridiagonal {
    alfa: DVector<f64>,
    beta: DVector<f64>,
    gama: DVector<f64>,
}

impl Tridiagonal {
    pub fn zeros(n: usize) -> Self {
        Tridiagonal {
            alfa: DVector::zeros(n),
            beta: DVector::zeros(n),
            gama: DVector::zeros(n),
        }
    }

    pub fn size(&self) -> usize {
        self.beta.len()
    }

    /// Sets row `i` to `alfa * x[i-1] + beta * x[i] + gama * x[i+1]`.
    pub fn set_row(&mut self, i: usize, alfa: f64, beta: f64, gama: f64) {
        self.alfa[i] = alfa;
        self.beta[i] = beta;
        self.gama[i] = gama;
    }

    #[cfg(test)]
    pub fn to_dense(&self) -> nalgebra::DMatrix<f64> {
        let n = self.size();
        let mut matrix = nalgebra::DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            matrix[(i, i)] = self.beta[i];
            if i > 0 {
                matrix[(i, i - 1)] = self.alfa[i];
            }
            if i + 1 < n {
                matrix[(i, i + 1)] = self.gama[i];
            }
        }
        matrix
    }

    /// Solves `A * x = rhs`, overwriting `rhs` with `x`. The bands are consumed.
    ///
    /// Gauss elimination without pivoting: a forward sweep normalises each row by
    /// its diagonal and clears the sub-diagonal of the next one, then back
    /// substitution clears the super-diagonal. This is only stable when pivots stay
    /// well away from zero, which holds for the spline systems built from strictly
    /// ordered, reasonably spaced knots. Small pivots are logged, never corrected.
    pub fn solve_in_place(mut self, rhs: &mut DVector<f64>) {
        let n = self.size();
        debug_assert_eq!(n, rhs.len(), "right hand side does not match matrix size");
        if n == 0 {
            return;
        }

        for i in 0..n - 1 {
            self.check_pivot(i);
            let c = self.beta[i];
            rhs[i] /= c;
            self.beta[i] /= c;
            self.gama[i] /= c;

            let c = self.alfa[i + 1];
            rhs[i + 1] -= c * rhs[i];
            self.alfa[i + 1] -= c * self.beta[i];
            self.beta[i + 1] -= c * self.gama[i];
        }

        self.check_pivot(n - 1);
        rhs[n - 1] /= self.beta[n - 1];
        self.beta[n - 1] = 1.0;

        for i in (0..n - 1).rev() {
            let c = self.gama[i];
            rhs[i] -= c * rhs[i + 1];
            self.gama[i] -= c * self.beta[i + 1];
        }
    }

    fn check_pivot(&self, i: usize) {
        let pivot = self.beta[i];
        debug_assert!(pivot != 0.0, "zero pivot in row {i} of tridiagonal system");

        let scale = self.alfa[i].abs().max(self.gama[i].abs()).max(1.0);
        if !pivot.is_finite() || pivot.abs() < PIVOT_WARNING_RATIO * scale {
            warn!(
                "tridiagonal pivot {pivot:e} in row {i} is negligible against row scale {scale:e}, \
                 solution may be inaccurate"
            );
        }
    }
}
