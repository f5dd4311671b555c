use crate::processing::error::{BandError, BandResult};

/// One (abscissa, intensity) point of a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Ordered band samples: at least two, finite, strictly ascending in x.
///
/// The ordering precondition is checked once here so the analyzer can rely
/// on it without re-validating.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    samples: Vec<Sample>,
}

impl BandTable {
    pub fn new(samples: Vec<Sample>) -> BandResult<Self> {
        if samples.len() < 2 {
            return Err(BandError::TooFewSamples { got: samples.len() });
        }

        for (i, s) in samples.iter().enumerate() {
            if !s.x.is_finite() || !s.y.is_finite() {
                return Err(BandError::NonFinite { index: i });
            }
        }

        if let Some(i) = samples.windows(2).position(|w| w[1].x <= w[0].x) {
            return Err(BandError::NotAscending {
                index: i + 1,
                prev: samples[i].x,
                x: samples[i + 1].x,
            });
        }

        Ok(Self { samples })
    }

    /// Build a table from parallel x and y columns.
    pub fn from_columns(x: &[f64], y: &[f64]) -> BandResult<Self> {
        if x.len() != y.len() {
            return Err(BandError::MismatchedColumns {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let samples = x
            .iter()
            .zip(y.iter())
            .map(|(&x, &y)| Sample::new(x, y))
            .collect();
        Self::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// (first x, last x). Non-empty by construction.
    pub fn x_range(&self) -> (f64, f64) {
        (self.samples[0].x, self.samples[self.samples.len() - 1].x)
    }
}
