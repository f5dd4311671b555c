use thiserror::Error;

/// Result type for band analysis.
pub type BandResult<T> = Result<T, BandError>;

/// Broad failure classes of the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The samples cannot be analysed: too few, unordered, flat, out of range, or no FWHM.
    InvalidInput,
    /// The intensity weights sum to zero, so the barycenter is undefined.
    DegenerateWeight,
}

/// Errors raised while validating or analysing a band.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BandError {
    /// Fewer than two samples were supplied
    #[error("invalid input: need at least 2 samples, got {got}")]
    TooFewSamples { got: usize },

    /// The x column and y column differ in length
    #[error("invalid input: x has {x_len} values but y has {y_len}")]
    MismatchedColumns { x_len: usize, y_len: usize },

    /// A coordinate is NaN or infinite
    #[error("invalid input: non-finite value in sample {index}")]
    NonFinite { index: usize },

    /// x does not strictly increase at `index`
    #[error("invalid input: x must be strictly ascending (sample {index}: {prev} then {x})")]
    NotAscending { index: usize, prev: f64, x: f64 },

    /// Every sample has the same intensity
    #[error("invalid input: band is flat (every y equals {level})")]
    FlatBand { level: f64 },

    /// The half-maximum level was crossed fewer than twice
    #[error("invalid input: cannot determine FWHM, found {found} half-maximum crossing(s)")]
    InsufficientCrossings { found: usize },

    /// The weighted sums left the f64 range
    #[error("invalid input: weighted sum of x overflows, barycenter not representable")]
    WeightedSumOverflow,

    /// Sum of y is zero
    #[error("degenerate weights: sum of intensities is zero, barycenter undefined")]
    DegenerateWeight,
}

impl BandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BandError::DegenerateWeight => ErrorKind::DegenerateWeight,
            _ => ErrorKind::InvalidInput,
        }
    }
}
