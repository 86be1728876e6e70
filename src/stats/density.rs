//! Density Estimation
//! Gaussian kernel density estimation and equal-width histograms.

use crate::stats::calculator::{describe, percentile};
use rayon::prelude::*;
use statrs::distribution::{Continuous, Normal};

/// Histogram bin covering `[start, end)`; the last bin is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Silverman's rule of thumb: `0.9 * min(sd, IQR / 1.34) * n^(-1/5)`.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    let mut sorted = finite(values);
    if sorted.len() < 2 {
        return 1.0;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let std_dev = describe(&sorted).std_dev;
    let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
    let spread = match (std_dev > 0.0, iqr > 0.0) {
        (true, true) => std_dev.min(iqr / 1.34),
        (true, false) => std_dev,
        (false, true) => iqr / 1.34,
        (false, false) => return 1.0,
    };
    0.9 * spread * (sorted.len() as f64).powf(-0.2)
}

/// Gaussian KDE evaluated at each grid point.
pub fn kde(values: &[f64], bandwidth: f64, grid: &[f64]) -> Vec<[f64; 2]> {
    let samples = finite(values);
    let kernel = match Normal::new(0.0, bandwidth) {
        Ok(k) if !samples.is_empty() => k,
        _ => return grid.iter().map(|&x| [x, 0.0]).collect(),
    };

    let n = samples.len() as f64;
    grid.par_iter()
        .map(|&x| {
            let density = samples.iter().map(|&xi| kernel.pdf(x - xi)).sum::<f64>() / n;
            [x, density]
        })
        .collect()
}

/// KDE over `points` grid positions spanning the data plus three bandwidths.
pub fn kde_curve(values: &[f64], points: usize) -> Vec<[f64; 2]> {
    let summary = describe(values);
    if summary.count == 0 || points < 2 {
        return Vec::new();
    }

    let h = silverman_bandwidth(values);
    let lo = summary.min - 3.0 * h;
    let hi = summary.max + 3.0 * h;
    let step = (hi - lo) / (points - 1) as f64;
    let grid: Vec<f64> = (0..points).map(|i| lo + i as f64 * step).collect();
    kde(values, h, &grid)
}

/// Equal-width histogram over `[min, max]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let samples = finite(values);
    let summary = describe(&samples);
    if summary.count == 0 || bins == 0 {
        return Vec::new();
    }

    let (lo, hi) = if summary.max > summary.min {
        (summary.min, summary.max)
    } else {
        (summary.min - 0.5, summary.max + 0.5)
    };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for v in samples {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::normal_samples;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn kde_integrates_to_one() {
        let mut rng = StdRng::seed_from_u64(11);
        let values = normal_samples(&mut rng, 300, 0.0, 1.0);
        let curve = kde_curve(&values, 400);
        assert_eq!(curve.len(), 400);

        let area: f64 = curve
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]) * (w[0][1] + w[1][1]) / 2.0)
            .sum();
        assert!((area - 1.0).abs() < 0.01, "area {}", area);
        assert!(curve.iter().all(|p| p[1] >= 0.0));
    }

    #[test]
    fn single_sample_density_is_the_kernel() {
        let curve = kde(&[2.0], 0.5, &[2.0, 2.5]);
        let peak = 1.0 / (0.5 * (2.0 * std::f64::consts::PI).sqrt());
        assert!((curve[0][1] - peak).abs() < 1e-12);
        assert!(curve[1][1] < curve[0][1]);
    }

    #[test]
    fn degenerate_inputs_give_flat_curves() {
        assert!(kde(&[], 1.0, &[0.0, 1.0]).iter().all(|p| p[1] == 0.0));
        assert!(kde(&[1.0], 0.0, &[0.0, 1.0]).iter().all(|p| p[1] == 0.0));
        assert!(kde_curve(&[], 10).is_empty());
        assert_eq!(silverman_bandwidth(&[3.0, 3.0, 3.0]), 1.0);
    }

    #[test]
    fn silverman_matches_formula() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let sd = describe(&values).std_dev;
        let iqr = 74.25 - 24.75;
        let expected = 0.9 * sd.min(iqr / 1.34) * 100f64.powf(-0.2);
        assert!((silverman_bandwidth(&values) - expected).abs() < 1e-9);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 10.0, f64::NAN];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[2].count, 1);
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[4].end, 10.0);
        assert_eq!(bins[0].width(), 2.0);
    }

    #[test]
    fn histogram_of_constant_values_has_width() {
        let bins = histogram(&[5.0, 5.0], 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(bins[0].width() > 0.0);
    }
}
