//! Statistics Calculator Module
//! Descriptive statistics, box-plot quartiles and confidence intervals.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Descriptive statistics of one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Five-number summary with IQR fences.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Most extreme observations inside the fences
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Observations outside the fences, ascending
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub const FENCE_FACTOR: f64 = 1.5;

    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(values);
        if sorted.is_empty() {
            return None;
        }

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - Self::FENCE_FACTOR * iqr;
        let upper_fence = q3 + Self::FENCE_FACTOR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= lower_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= upper_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_fence,
            upper_fence,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Calculate percentile using linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Compute descriptive statistics, ignoring non-finite values.
pub fn describe(values: &[f64]) -> Summary {
    let sorted = sorted_finite(values);
    let n = sorted.len();
    if n == 0 {
        return Summary::default();
    }

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Summary {
        count: n,
        mean,
        median: percentile(&sorted, 50.0),
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
    }
}

/// Two-sided confidence interval of the mean from the Student-t distribution.
pub fn confidence_interval(values: &[f64], level: f64) -> Option<(f64, f64)> {
    let summary = describe(values);
    if summary.count < 2 || !(0.0..1.0).contains(&level) {
        return None;
    }

    let df = (summary.count - 1) as f64;
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let t = dist.inverse_cdf(0.5 + level / 2.0);
    let half_width = t * summary.std_dev / (summary.count as f64).sqrt();
    Some((summary.mean - half_width, summary.mean + half_width))
}

/// Trailing moving average; the first points average over what is available.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut sum = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            sum += v;
            if i >= window {
                sum -= values[i - window];
            }
            sum / (i + 1).min(window) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn percentile_interpolates_like_numpy() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(close(percentile(&sorted, 25.0), 1.75));
        assert!(close(percentile(&sorted, 50.0), 2.5));
        assert!(close(percentile(&sorted, 100.0), 4.0));
        assert!(percentile(&[], 50.0).is_nan());
        assert_eq!(percentile(&[7.0], 90.0), 7.0);
    }

    #[test]
    fn describe_ignores_nan_and_uses_sample_std() {
        let summary = describe(&[2.0, 4.0, f64::NAN, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(summary.count, 8);
        assert!(close(summary.mean, 5.0));
        assert!(close(summary.median, 4.5));
        assert!(close(summary.std_dev, (32.0f64 / 7.0).sqrt()));
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);

        let empty = describe(&[]);
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan());
    }

    #[test]
    fn box_summary_fences_outliers() {
        let mut values: Vec<f64> = (1..=9).map(|v| v as f64).collect();
        values.push(100.0);
        values.push(-50.0);
        let summary = BoxSummary::from_values(&values).unwrap();

        // sorted: -50, 1..9, 100 -> q1 = 2.5, q3 = 7.5
        assert!(close(summary.q1, 2.5));
        assert!(close(summary.median, 5.0));
        assert!(close(summary.q3, 7.5));
        assert!(close(summary.iqr(), 5.0));
        assert!(close(summary.lower_fence, -5.0));
        assert!(close(summary.upper_fence, 15.0));
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 9.0);
        assert_eq!(summary.outliers, vec![-50.0, 100.0]);
    }

    #[test]
    fn box_summary_without_outliers_spans_the_data() {
        let summary = BoxSummary::from_values(&[3.0, 1.0, 2.0]).unwrap();
        assert!(summary.outliers.is_empty());
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 3.0);
        assert!(BoxSummary::from_values(&[]).is_none());
        assert!(BoxSummary::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn confidence_interval_contains_mean_and_narrows_with_level() {
        let values = [9.0, 10.0, 11.0, 10.5, 9.5, 10.0];
        let (lo95, hi95) = confidence_interval(&values, 0.95).unwrap();
        let (lo80, hi80) = confidence_interval(&values, 0.80).unwrap();
        assert!(lo95 < 10.0 && hi95 > 10.0);
        assert!(lo80 > lo95 && hi80 < hi95);
        assert!(confidence_interval(&[1.0], 0.95).is_none());
        assert!(confidence_interval(&values, 1.5).is_none());
    }

    #[test]
    fn moving_average_uses_prefix_then_window() {
        let avg = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(avg, vec![1.0, 1.5, 2.0, 3.0, 4.0]);
        assert_eq!(moving_average(&[], 4), Vec::<f64>::new());
    }
}
