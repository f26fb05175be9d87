use crate::{coefficients::CoefficientTable, error::EvaluateError};

/// Strategy used to find the segment containing a query inside the knot range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentLookup {
    /// Scan segments in knot order and take the first one ending after `x`.
    Linear,
    /// Binary search over the knots, `O(log N)`.
    #[default]
    Bisect,
}

/// Evaluates a built spline. Borrows the [CoefficientTable] read-only, so any number
/// of evaluators may share one table across threads.
///
/// Knots may run in either direction. "Before the first knot" and "after the last
/// knot" follow that direction: queries before the first knot continue the first
/// segment's cubic, queries after the last knot continue the last segment's cubic.
/// Extrapolated values are unbounded and lose accuracy quickly away from the knots.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    table: &'a CoefficientTable,
    lookup: SegmentLookup,
    is_decreasing: bool,
    min_x: f64,
    max_x: f64,
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a CoefficientTable) -> Self {
        Self::with_lookup(table, SegmentLookup::default())
    }

    /// Creates [Evaluator] with an explicit segment lookup strategy. Both strategies
    /// return identical results.
    /// # Example
    /// ```
    /// use cubic_interp::{build, Evaluator, SegmentLookup};
    ///
    /// let table = build(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
    /// let linear = Evaluator::with_lookup(&table, SegmentLookup::Linear);
    /// let bisect = Evaluator::new(&table);
    ///
    /// assert_eq!(SegmentLookup::Bisect, bisect.lookup());
    /// assert_eq!(linear.evaluate(1.7), bisect.evaluate(1.7));
    /// ```
    pub fn with_lookup(table: &'a CoefficientTable, lookup: SegmentLookup) -> Self {
        let knots = table.knots();
        let first = knots[0];
        let last = knots[knots.len() - 1];

        Evaluator {
            table,
            lookup,
            is_decreasing: last < first,
            min_x: first.min(last),
            max_x: first.max(last),
        }
    }

    pub fn lookup(&self) -> SegmentLookup {
        self.lookup
    }

    pub fn table(&self) -> &'a CoefficientTable {
        self.table
    }

    /// Smallest and largest knot.
    pub fn domain(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    /// Value of the spline at `x`, extrapolating outside the knots. A query equal to a
    /// knot returns that knot's sample exactly.
    pub fn evaluate(&self, x: f64) -> f64 {
        if let Some(knot) = self.find_knot(x) {
            return self.table.values()[knot];
        }
        let index = self.segment_index(x);
        self.segment_value(index, x)
    }

    /// Like [Evaluator::evaluate] but refuses to extrapolate.
    pub fn interpolate(&self, x: f64) -> Result<f64, EvaluateError> {
        if self.is_in_range(x) {
            Ok(self.evaluate(x))
        } else {
            Err(EvaluateError::OutOfRange { x, min: self.min_x, max: self.max_x })
        }
    }

    /// First derivative of the piece [Evaluator::evaluate] uses for `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        let index = self.segment_index(x);
        let h = x - self.table.knots()[index];
        self.table.segment(index).derivative(h)
    }

    /// Evaluates every query in `x_vector`. Consecutive queries falling into the same
    /// or the next segment skip the full lookup, so input sorted in knot order is cheapest.
    pub fn evaluate_batch(&self, x_vector: &[f64]) -> Vec<f64> {
        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector.iter().copied() {
            if !self.is_in_segment(index, x) && index + 1 < self.table.len() && self.is_in_segment(index + 1, x) {
                index += 1;
            }
            if self.is_in_segment(index, x) {
                let value = if x == self.table.knots()[index] {
                    self.table.values()[index]
                } else {
                    self.segment_value(index, x)
                };
                results.push(value);
                continue;
            }
            index = self.segment_index(x);
            results.push(self.evaluate(x));
        }
        results
    }

    /// Index of the segment whose cubic is used for `x`: `0` before the first knot,
    /// the last segment after the last knot.
    pub fn segment_index(&self, x: f64) -> usize {
        let knots = self.table.knots();
        let last_segment = self.table.len() - 1;

        if self.precedes(x, knots[0]) {
            return 0;
        }
        if self.precedes(knots[knots.len() - 1], x) {
            return last_segment;
        }

        match self.lookup {
            SegmentLookup::Bisect => knots
                .partition_point(|knot| !self.precedes(x, *knot))
                .saturating_sub(1)
                .min(last_segment),
            SegmentLookup::Linear => (0..last_segment)
                .find(|i| self.precedes(x, knots[i + 1]))
                .unwrap_or(last_segment),
        }
    }

    /// Whether `a` comes strictly before `b` in knot order.
    fn precedes(&self, a: f64, b: f64) -> bool {
        if self.is_decreasing {
            a > b
        } else {
            a < b
        }
    }

    fn find_knot(&self, x: f64) -> Option<usize> {
        let knots = self.table.knots();
        match self.lookup {
            SegmentLookup::Bisect => {
                let index = knots.partition_point(|knot| self.precedes(*knot, x));
                (index < knots.len() && knots[index] == x).then_some(index)
            }
            SegmentLookup::Linear => knots.iter().position(|knot| *knot == x),
        }
    }

    fn segment_value(&self, index: usize, x: f64) -> f64 {
        let h = x - self.table.knots()[index];
        self.table.segment(index).value(h)
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn is_in_segment(&self, index: usize, x: f64) -> bool {
        let knots = self.table.knots();
        !self.precedes(x, knots[index]) && self.precedes(x, knots[index + 1])
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{build, SampleSet};

    fn bump(x: f64) -> f64 {
        x * x * (-x * x).exp()
    }

    fn random_knots(rng: &mut StdRng, n: usize) -> (Vec<f64>, Vec<f64>) {
        let mut x = Vec::with_capacity(n);
        let mut current = rng.gen_range(-10.0..10.0);
        for _ in 0..n {
            x.push(current);
            current += rng.gen_range(0.05..1.5);
        }
        let y = (0..n).map(|_| rng.gen_range(-5.0..5.0)).collect();
        (x, y)
    }

    #[test]
    fn known_curve() {
        let x = vec![-2.0, -1.5, -1.0, -0.5, 0.0, 0.5];
        let y: Vec<f64> = x.iter().map(|x| bump(*x)).collect();
        let table = build(&x, &y).unwrap();
        let spline = Evaluator::new(&table);

        assert_approx_eq!(spline.evaluate(-1.5), bump(-1.5), 1e-3);
        assert_approx_eq!(spline.evaluate(-1.5), 0.2371, 1e-3);
        assert_eq!(y[0], spline.evaluate(-2.0));
    }

    #[test]
    fn dense_known_curve() {
        let (x, y) = SampleSet::tabulate(-2.0, 0.5, 0.1, bump).unwrap();
        let table = build(&x, &y).unwrap();
        let spline = Evaluator::new(&table);

        for i in 0..=8 {
            let query = -2.0 + 0.3 * i as f64;
            assert_approx_eq!(spline.evaluate(query), bump(query), 1e-4);
        }
    }

    #[test]
    fn passes_through_samples_exactly() {
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            let n = rng.gen_range(4..40);
            let (x, y) = random_knots(&mut rng, n);
            let table = build(&x, &y).unwrap();

            for lookup in [SegmentLookup::Linear, SegmentLookup::Bisect] {
                let spline = Evaluator::with_lookup(&table, lookup);
                for i in 0..n {
                    assert_eq!(y[i], spline.evaluate(x[i]));
                }
            }
        }
    }

    #[test]
    fn continuous_at_interior_knots() {
        let mut rng = StdRng::seed_from_u64(2);
        let (x, y) = random_knots(&mut rng, 12);
        let table = build(&x, &y).unwrap();
        let spline = Evaluator::new(&table);

        for i in 1..x.len() - 1 {
            let left = table.segment(i - 1);
            let width = x[i] - x[i - 1];
            let slope = spline.derivative(x[i]);

            assert_approx_eq!(left.value(width), y[i], 1e-9 * (1.0 + y[i].abs()));
            assert_approx_eq!(left.derivative(width), slope, 1e-9 * (1.0 + slope.abs()));
            assert_approx_eq!(spline.evaluate(x[i] - 1e-12), y[i], 1e-9 * (1.0 + slope.abs()));
        }
    }

    #[test]
    fn extrapolation_is_continuous_at_both_ends() {
        let x = [0.0, 0.4, 1.0, 1.3, 2.2, 3.0];
        let y = [1.0, 0.2, -0.7, 0.5, 2.0, 1.1];
        let table = build(&x, &y).unwrap();
        let spline = Evaluator::new(&table);

        for eps in [1e-3, 1e-6, 1e-9] {
            assert_approx_eq!(spline.evaluate(x[0] - eps), y[0], 100.0 * eps);
            assert_approx_eq!(spline.evaluate(x[5] + eps), y[5], 100.0 * eps);
        }
        assert_approx_eq!(spline.derivative(x[0] - 1e-9), table.linear()[0], 1e-6);
        assert_approx_eq!(spline.derivative(x[5] + 1e-9), spline.derivative(x[5]), 1e-6);
    }

    #[test]
    fn extrapolates_cubic_exactly() {
        let f = |x: f64| -x.powi(3) + 0.5 * x * x + 2.0;
        let x = [-1.0, -0.3, 0.2, 1.0, 1.6];
        let y: Vec<f64> = x.iter().map(|x| f(*x)).collect();
        let table = build(&x, &y).unwrap();
        let spline = Evaluator::new(&table);

        for query in [-3.0, -1.5, -0.7, 0.0, 0.9, 1.6, 2.0, 4.0] {
            assert_approx_eq!(spline.evaluate(query), f(query), 1e-8);
        }
    }

    #[test]
    fn segment_lookup_matches_brute_force() {
        let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|x| x.sin()).collect();
        let table = build(&x, &y).unwrap();
        let linear = Evaluator::with_lookup(&table, SegmentLookup::Linear);
        let bisect = Evaluator::with_lookup(&table, SegmentLookup::Bisect);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let query = rng.gen_range(0.0..4.5);
            if x.contains(&query) {
                continue;
            }
            let expected = (0..x.len() - 1)
                .find(|i| x[*i] < query && query < x[i + 1])
                .unwrap();

            assert_eq!(expected, linear.segment_index(query));
            assert_eq!(expected, bisect.segment_index(query));
            assert_eq!(linear.evaluate(query), bisect.evaluate(query));
        }

        assert_eq!(0, bisect.segment_index(-1.0));
        assert_eq!(8, bisect.segment_index(4.5));
        assert_eq!(8, bisect.segment_index(10.0));
        assert_eq!(3, bisect.segment_index(1.5));
        assert_eq!(3, linear.segment_index(1.5));
    }

    #[test]
    fn interpolate_refuses_out_of_range() {
        let table = build(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 9.0, 16.0]).unwrap();
        let spline = Evaluator::new(&table);

        assert_eq!((1.0, 4.0), spline.domain());
        assert_approx_eq!(spline.interpolate(2.5).unwrap(), 6.25, 1e-12);
        assert_eq!(Ok(16.0), spline.interpolate(4.0));
        assert_eq!(
            Err(EvaluateError::OutOfRange { x: 4.5, min: 1.0, max: 4.0 }),
            spline.interpolate(4.5)
        );
        assert!(spline.interpolate(0.0).is_err());
        assert_approx_eq!(spline.evaluate(5.0), 25.0, 1e-9);
    }

    #[test]
    fn batch_matches_single_queries() {
        let mut rng = StdRng::seed_from_u64(4);
        let (x, y) = random_knots(&mut rng, 15);
        let table = build(&x, &y).unwrap();
        let spline = Evaluator::new(&table);

        let (min, max) = spline.domain();
        let mut queries: Vec<f64> = (0..200).map(|_| rng.gen_range(min - 1.0..max + 1.0)).collect();
        queries.extend_from_slice(&x);
        let expected: Vec<f64> = queries.iter().map(|q| spline.evaluate(*q)).collect();
        assert_eq!(expected, spline.evaluate_batch(&queries));

        queries.sort_by(|a, b| a.total_cmp(b));
        let expected: Vec<f64> = queries.iter().map(|q| spline.evaluate(*q)).collect();
        assert_eq!(expected, spline.evaluate_batch(&queries));
    }

    #[test]
    fn decreasing_knots_match_mirrored_build() {
        let x: [f64; 5] = [3.0, 2.0, 1.5, 0.0, -1.0];
        let y: Vec<f64> = x.iter().map(|x| x.sin()).collect();
        let x_mirrored: Vec<f64> = x.iter().rev().copied().collect();
        let y_mirrored: Vec<f64> = y.iter().rev().copied().collect();

        let table = build(&x, &y).unwrap();
        let table_mirrored = build(&x_mirrored, &y_mirrored).unwrap();
        let mirrored = Evaluator::new(&table_mirrored);

        let queries = [4.0, 3.5, 2.6, 1.8, 1.7, 1.2, 0.7, -0.5, -2.0];
        for lookup in [SegmentLookup::Linear, SegmentLookup::Bisect] {
            let spline = Evaluator::with_lookup(&table, lookup);

            for query in queries {
                assert_approx_eq!(spline.evaluate(query), mirrored.evaluate(query), 1e-9);
                assert_approx_eq!(spline.derivative(query), mirrored.derivative(query), 1e-9);
            }
            for i in 0..x.len() {
                assert_eq!(y[i], spline.evaluate(x[i]));
            }

            assert_eq!(0, spline.segment_index(3.5));
            assert_eq!(0, spline.segment_index(2.6));
            assert_eq!(1, spline.segment_index(1.7));
            assert_eq!(3, spline.segment_index(-0.5));
            assert_eq!(3, spline.segment_index(-2.0));
            assert_eq!(spline.evaluate_batch(&queries), queries.map(|q| spline.evaluate(q)).to_vec());
        }

        let spline = Evaluator::new(&table);
        assert_eq!((-1.0, 3.0), spline.domain());
        assert_approx_eq!(spline.interpolate(-0.5).unwrap(), mirrored.evaluate(-0.5), 1e-9);
        assert_approx_eq!(spline.interpolate(-0.5).unwrap(), (-0.5_f64).sin(), 2e-2);
        assert!(spline.interpolate(3.5).is_err());
        assert!(spline.interpolate(-1.5).is_err());
    }

    #[test]
    fn derivative_at_knots() {
        let mut rng = StdRng::seed_from_u64(5);
        let (x, y) = random_knots(&mut rng, 9);
        let x_decreasing: Vec<f64> = x.iter().map(|x| -x).collect();

        for x in [x, x_decreasing] {
            let table = build(&x, &y).unwrap();
            let n = x.len();
            let last_slope = table.segment(n - 2).derivative(x[n - 1] - x[n - 2]);

            for lookup in [SegmentLookup::Linear, SegmentLookup::Bisect] {
                let spline = Evaluator::with_lookup(&table, lookup);

                for i in 0..n - 1 {
                    assert_eq!(table.linear()[i], spline.derivative(x[i]));
                }
                assert_eq!(last_slope, spline.derivative(x[n - 1]));
                assert_eq!(n - 2, spline.segment_index(x[n - 1]));
            }
        }
    }

    #[test]
    fn shared_between_threads() {
        let (x, y) = SampleSet::tabulate(0.0, 6.0, 0.5, f64::cos).unwrap();
        let table = build(&x, &y).unwrap();
        let spline = Evaluator::new(&table);
        let expected = spline.evaluate_batch(&[0.3, 2.2, 4.9]);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| spline.evaluate_batch(&[0.3, 2.2, 4.9])))
                .collect();
            for handle in handles {
                assert_eq!(expected, handle.join().unwrap());
            }
        });
    }
}
