/// Cubic polynomial on a single segment, in the local offset `h` from the segment origin:
///
/// `p(h) = d + c*h + bq*h^2 + a*h^3`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub a: f64,
    pub bq: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    pub fn value(&self, h: f64) -> f64 {
        self.d + h * (self.c + h * (self.bq + h * self.a))
    }

    pub fn derivative(&self, h: f64) -> f64 {
        self.c + h * (2.0 * self.bq + 3.0 * h * self.a)
    }

    pub fn second_derivative(&self, h: f64) -> f64 {
        2.0 * self.bq + 6.0 * h * self.a
    }
}

/// Per-segment coefficients of a built spline together with the knots they belong to.
///
/// Segment `i` spans `[x[i], x[i + 1])` and is described by [Cubic] with `a = cubic()[i]`,
/// `bq = quadratic()[i]`, `c = linear()[i]` (slope at `x[i]`) and `d = constant()[i]`
/// (equal to `y[i]`). A table only exists as the result of a successful
/// [crate::build] and cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    x: Vec<f64>,
    y: Vec<f64>,
    a: Vec<f64>,
    bq: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl CoefficientTable {
    pub(crate) fn with_capacity(x: Vec<f64>, y: Vec<f64>) -> Self {
        let segments = x.len().saturating_sub(1);
        CoefficientTable {
            x,
            y,
            a: Vec::with_capacity(segments),
            bq: Vec::with_capacity(segments),
            c: Vec::with_capacity(segments),
            d: Vec::with_capacity(segments),
        }
    }

    pub(crate) fn push(&mut self, cubic: Cubic) {
        self.a.push(cubic.a);
        self.bq.push(cubic.bq);
        self.c.push(cubic.c);
        self.d.push(cubic.d);
    }

    /// Number of segments, one less than the number of knots.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn segment(&self, i: usize) -> Cubic {
        Cubic { a: self.a[i], bq: self.bq[i], c: self.c[i], d: self.d[i] }
    }

    pub fn knots(&self) -> &[f64] {
        &self.x
    }

    pub fn values(&self) -> &[f64] {
        &self.y
    }

    pub fn cubic(&self) -> &[f64] {
        &self.a
    }

    pub fn quadratic(&self) -> &[f64] {
        &self.bq
    }

    pub fn linear(&self) -> &[f64] {
        &self.c
    }

    pub fn constant(&self) -> &[f64] {
        &self.d
    }
}
