use crate::processing::crossings::{level_crossings, width_from_crossings, CrossingStrategy};
use crate::processing::error::{BandError, BandResult};
use crate::state::band_table::{BandTable, Sample};

/// Descriptive parameters of a single band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParameters {
    /// x of the global maximum (first one in ascending x on ties).
    pub max_pos: f64,
    /// y at `max_pos`.
    pub max_val: f64,
    /// Intensity-weighted mean of x.
    pub barycenter: f64,
    /// Full width at half maximum.
    pub fwhm: f64,
}

/// Analyze a band with the default [`CrossingStrategy::Span`].
pub fn analyze(table: &BandTable) -> BandResult<BandParameters> {
    analyze_with(table, CrossingStrategy::default())
}

/// Validate raw samples and analyze them.
pub fn analyze_samples(samples: &[Sample]) -> BandResult<BandParameters> {
    let table = BandTable::new(samples.to_vec())?;
    analyze(&table)
}

/// Analyze a band, deriving the FWHM with `strategy`.
///
/// Either every parameter is produced or the first failure is returned.
pub fn analyze_with(table: &BandTable, strategy: CrossingStrategy) -> BandResult<BandParameters> {
    let samples = table.samples();

    let peak = find_maximum(samples).ok_or(BandError::TooFewSamples { got: 0 })?;
    let barycenter = barycenter(samples)?;

    if samples.iter().all(|s| s.y == peak.y) {
        return Err(BandError::FlatBand { level: peak.y });
    }

    let fwhm = fwhm(samples, peak.y, strategy)?;

    Ok(BandParameters {
        max_pos: peak.x,
        max_val: peak.y,
        barycenter,
        fwhm,
    })
}

/// Sample with the greatest y; the earliest wins ties. `None` when empty.
pub fn find_maximum(samples: &[Sample]) -> Option<Sample> {
    let (first, rest) = samples.split_first()?;
    let mut best = *first;
    for s in rest {
        if s.y > best.y {
            best = *s;
        }
    }
    Some(best)
}

/// Σ(x·y) / Σ(y).
///
/// Weights are divided by max|y| before summing so intensities near
/// `f64::MAX` do not overflow the sums.
pub fn barycenter(samples: &[Sample]) -> BandResult<f64> {
    let scale = samples.iter().fold(0.0_f64, |m, s| m.max(s.y.abs()));
    if scale == 0.0 {
        return Err(BandError::DegenerateWeight);
    }
    let (moment, weight) = samples.iter().fold((0.0, 0.0), |(m, w), s| {
        let w_i = s.y / scale;
        (m + s.x * w_i, w + w_i)
    });
    if weight == 0.0 {
        return Err(BandError::DegenerateWeight);
    }
    let center = moment / weight;
    if !center.is_finite() {
        return Err(BandError::WeightedSumOverflow);
    }
    Ok(center)
}

/// Full width at half of `max_val`.
pub fn fwhm(samples: &[Sample], max_val: f64, strategy: CrossingStrategy) -> BandResult<f64> {
    let crossings = level_crossings(samples, max_val / 2.0);
    width_from_crossings(&crossings, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::error::ErrorKind;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn table(points: &[(f64, f64)]) -> BandTable {
        BandTable::new(points.iter().copied().map(Sample::from).collect()).unwrap()
    }

    fn gaussian(center: f64, sigma: f64, amp: f64, step: f64, n: usize) -> BandTable {
        let start = center - step * (n / 2) as f64;
        let samples = (0..n)
            .map(|i| {
                let x = start + step * i as f64;
                let y = amp * (-0.5 * ((x - center) / sigma).powi(2)).exp();
                Sample::new(x, y)
            })
            .collect();
        BandTable::new(samples).unwrap()
    }

    #[test]
    fn test_triangle_scenario() {
        let t = table(&[(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 2.0), (4.0, 0.0)]);
        let p = analyze(&t).unwrap();
        assert_eq!(p.max_pos, 2.0);
        assert_eq!(p.max_val, 4.0);
        assert_relative_eq!(p.fwhm, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.barycenter, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gaussian_band() {
        let sigma = 1.5;
        let t = gaussian(10.0, sigma, 7.0, 0.01, 2001);
        let p = analyze(&t).unwrap();

        assert_abs_diff_eq!(p.max_pos, 10.0, epsilon = 0.01);
        assert_relative_eq!(p.max_val, 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.barycenter, 10.0, epsilon = 1e-9);

        let expected = 2.0 * (2.0 * 2f64.ln()).sqrt() * sigma;
        assert_abs_diff_eq!(p.fwhm, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_symmetric_barycenter_off_grid() {
        // Symmetric about 3.25 with uneven sample spacing.
        let t = table(&[(1.0, 1.0), (2.5, 5.0), (3.25, 9.0), (4.0, 5.0), (5.5, 1.0)]);
        assert_relative_eq!(analyze(&t).unwrap().barycenter, 3.25, epsilon = 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let t = gaussian(-3.0, 0.7, 2.0, 0.05, 301);
        let a = analyze(&t).unwrap();
        let b = analyze(&t).unwrap();
        assert_eq!(a.max_pos.to_bits(), b.max_pos.to_bits());
        assert_eq!(a.max_val.to_bits(), b.max_val.to_bits());
        assert_eq!(a.barycenter.to_bits(), b.barycenter.to_bits());
        assert_eq!(a.fwhm.to_bits(), b.fwhm.to_bits());
    }

    #[test]
    fn test_tie_picks_smaller_x() {
        let t = table(&[(0.0, 0.0), (1.0, 5.0), (2.0, 1.0), (3.0, 5.0), (4.0, 0.0)]);
        let p = analyze(&t).unwrap();
        assert_eq!(p.max_pos, 1.0);
        assert_eq!(p.max_val, 5.0);
    }

    #[test]
    fn test_interpolated_crossings() {
        // hh = 5; up between (1, 2) and (2, 8): x = 2 + (5 - 8) * 1 / 6 = 1.5
        // down between (3, 8) and (5, 0): x = 5 + (5 - 0) * 2 / -8 = 3.75
        let t = table(&[(0.0, 0.0), (1.0, 2.0), (2.0, 8.0), (2.5, 10.0), (3.0, 8.0), (5.0, 0.0)]);
        let p = analyze(&t).unwrap();
        assert_relative_eq!(p.fwhm, 3.75 - 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_side_band_widens_span_only() {
        let t = table(&[
            (0.0, 0.0),
            (1.0, 2.0),
            (2.0, 4.0),
            (3.0, 2.0),
            (4.0, 0.0),
            (5.0, 0.0),
            (6.0, 3.0),
            (7.0, 0.0),
        ]);
        let span = analyze_with(&t, CrossingStrategy::Span).unwrap();
        let first = analyze_with(&t, CrossingStrategy::FirstPair).unwrap();
        assert_relative_eq!(first.fwhm, 2.0, epsilon = 1e-12);
        // Side band crossings at 5 + 2/3 and 6 + 1/3.
        assert_relative_eq!(span.fwhm, 6.0 + 1.0 / 3.0 - 1.0, epsilon = 1e-12);
        assert!(span.fwhm > first.fwhm);
        assert_eq!(span.max_pos, first.max_pos);
    }

    #[test]
    fn test_strategies_agree_on_unimodal() {
        let t = gaussian(500.0, 12.0, 1.0, 0.5, 401);
        let span = analyze_with(&t, CrossingStrategy::Span).unwrap();
        let first = analyze_with(&t, CrossingStrategy::FirstPair).unwrap();
        assert_eq!(span, first);
    }

    #[test]
    fn test_single_sample_rejected() {
        let err = analyze_samples(&[Sample::new(0.0, 1.0)]).unwrap_err();
        assert_eq!(err, BandError::TooFewSamples { got: 1 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unsorted_rejected() {
        let err = analyze_samples(&[
            Sample::new(0.0, 0.0),
            Sample::new(2.0, 4.0),
            Sample::new(1.0, 2.0),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_all_zero() {
        let t = table(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(analyze(&t), Err(BandError::DegenerateWeight));
        assert_eq!(barycenter(t.samples()), Err(BandError::DegenerateWeight));
        assert_eq!(
            fwhm(t.samples(), 0.0, CrossingStrategy::Span),
            Err(BandError::InsufficientCrossings { found: 0 })
        );
    }

    #[test]
    fn test_flat_band_rejected() {
        let t = table(&[(0.0, 3.0), (1.0, 3.0), (2.0, 3.0)]);
        let err = analyze(&t).unwrap_err();
        assert_eq!(err, BandError::FlatBand { level: 3.0 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_monotonic_rejected() {
        let t = table(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 4.0)]);
        let err = analyze(&t).unwrap_err();
        assert_eq!(err, BandError::InsufficientCrossings { found: 1 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_weights_cancel() {
        let t = table(&[(0.0, -1.0), (1.0, 2.0), (2.0, -1.0)]);
        assert_eq!(analyze(&t), Err(BandError::DegenerateWeight));
    }

    #[test]
    fn test_huge_intensities_keep_finite_barycenter() {
        let t = table(&[(0.0, 0.0), (1.0, 1e308), (2.0, 1e308), (3.0, 0.0)]);
        let p = analyze(&t).unwrap();
        assert_relative_eq!(p.barycenter, 1.5, epsilon = 1e-12);
        assert_eq!(p.max_pos, 1.0);
        assert_relative_eq!(p.fwhm, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_moment_overflow_is_an_error() {
        let t = table(&[(1e308, 1.0), (1.5e308, 2.0), (1.7e308, 1.0)]);
        let err = barycenter(t.samples()).unwrap_err();
        assert_eq!(err, BandError::WeightedSumOverflow);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(analyze(&t), Err(BandError::WeightedSumOverflow));
    }

    #[test]
    fn test_find_maximum_empty() {
        assert_eq!(find_maximum(&[]), None);
        assert_eq!(
            find_maximum(&[Sample::new(0.0, 1.0), Sample::new(1.0, 1.0)]),
            Some(Sample::new(0.0, 1.0))
        );
    }

    #[test]
    fn test_input_untouched() {
        let points = vec![
            Sample::new(0.0, 0.0),
            Sample::new(1.0, 2.0),
            Sample::new(2.0, 4.0),
            Sample::new(3.0, 2.0),
            Sample::new(4.0, 0.0),
        ];
        let t = BandTable::new(points.clone()).unwrap();
        analyze(&t).unwrap();
        assert_eq!(t.samples(), points.as_slice());
    }
}
