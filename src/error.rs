use thiserror::Error;

/// Reasons a spline cannot be built from the given samples.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BuildError {
    #[error("abscissa and ordinate lengths differ: {x_len} != {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("at least 4 samples are required, got {len}")]
    InsufficientData { len: usize },

    #[error("zero-width segment between knots {index} and {}", .index + 1)]
    DegenerateSpacing { index: usize },

    #[error("knots change direction at segment {index}")]
    NonMonotonic { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvaluateError {
    #[error("x = {x} is out of range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },
}

/// Errors from [crate::SampleSet::tabulate].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SampleError {
    #[error("step must be finite and positive, got {0}")]
    InvalidStep(f64),

    #[error("invalid sampling bounds [{left}, {right}]")]
    InvalidBounds { left: f64, right: f64 },
}
