use serde::Deserialize;

use crate::processing::error::{BandError, BandResult};
use crate::state::band_table::Sample;

/// Which way the intensity passes through the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// An interpolated position where the band passes through a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub x: f64,
    pub direction: Direction,
}

/// How the FWHM is derived from the half-maximum crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CrossingStrategy {
    /// Distance between the outermost crossings anywhere in the data.
    #[default]
    Span,
    /// First downward crossing minus the last upward crossing before it.
    /// Matches the output of the earlier tool on unimodal data.
    FirstPair,
}

impl CrossingStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            CrossingStrategy::Span => "span",
            CrossingStrategy::FirstPair => "first-pair",
        }
    }
}

/// Collect every place where consecutive samples pass through `level`.
///
/// Upward when `prev.y < level <= cur.y`, downward when
/// `prev.y >= level > cur.y`. Each position is linearly interpolated
/// between the bracketing samples. Crossings come back in ascending x.
pub fn level_crossings(samples: &[Sample], level: f64) -> Vec<Crossing> {
    let mut out = Vec::new();

    for pair in samples.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let direction = if prev.y < level && cur.y >= level {
            Direction::Up
        } else if prev.y >= level && cur.y < level {
            Direction::Down
        } else {
            continue;
        };
        // Both branches guarantee cur.y != prev.y.
        let x = cur.x + (level - cur.y) * (cur.x - prev.x) / (cur.y - prev.y);
        out.push(Crossing { x, direction });
    }

    out
}

/// Width between crossings according to `strategy`.
pub fn width_from_crossings(crossings: &[Crossing], strategy: CrossingStrategy) -> BandResult<f64> {
    match strategy {
        CrossingStrategy::Span => span_width(crossings),
        CrossingStrategy::FirstPair => first_pair_width(crossings),
    }
}

fn span_width(crossings: &[Crossing]) -> BandResult<f64> {
    if crossings.len() < 2 {
        return Err(BandError::InsufficientCrossings {
            found: crossings.len(),
        });
    }
    let lo = crossings.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
    let hi = crossings.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
    Ok(hi - lo)
}

fn first_pair_width(crossings: &[Crossing]) -> BandResult<f64> {
    let insufficient = || BandError::InsufficientCrossings {
        found: crossings.len(),
    };

    let down_idx = crossings
        .iter()
        .position(|c| c.direction == Direction::Down)
        .ok_or_else(insufficient)?;
    let up = crossings[..down_idx]
        .iter()
        .rev()
        .find(|c| c.direction == Direction::Up)
        .ok_or_else(insufficient)?;

    Ok(crossings[down_idx].x - up.x)
}
