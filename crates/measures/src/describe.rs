use crate::quantile::median;
use serde::Serialize;

/// Descriptive measures of one size group
///
/// `count` includes rows whose value is missing; every other measure is
/// computed over the present values only and is NaN when they cannot be
/// estimated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measures {
    pub group: String,
    pub mean: f64,
    pub std: f64,
    pub median: f64,
    pub variance: f64,
    pub skewness: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// Rows removed by outlier cleaning, when the measures describe cleaned data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outliers: Option<usize>,
}

impl Measures {
    pub fn from_values(group: impl Into<String>, values: &[Option<f64>]) -> Self {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        Self {
            group: group.into(),
            mean: mean(&present),
            std: std_dev(&present),
            median: median(&present),
            variance: variance(&present),
            skewness: skewness(&present),
            min: min(&present),
            max: max(&present),
            count: values.len(),
            outliers: None,
        }
    }

    pub fn with_outliers(mut self, outliers: usize) -> Self {
        self.outliers = Some(outliers);
        self
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator)
pub fn variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Adjusted Fisher-Pearson sample skewness
///
/// `G1 = n * sqrt(n - 1) / (n - 2) * m3 / m2^1.5` where `m2`, `m3` are the
/// sums of squared and cubed deviations. Needs at least three values; a
/// sample without spread has zero skew.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let m = mean(values);
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), v| {
        let d = v - m;
        (m2 + d * d, m3 + d * d * d)
    });

    // rounding noise on constant samples
    if m2 < 1e-14 {
        return 0.0;
    }

    let n = n as f64;
    n * (n - 1.0).sqrt() / (n - 2.0) * (m3 / m2.powf(1.5))
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&data), 5.0);
        assert!(close(variance(&data), 32.0 / 7.0));
        assert!(close(std_dev(&data), (32.0f64 / 7.0).sqrt()));
    }

    #[test]
    fn test_skewness_known_value() {
        // deviations -1, -1, 2: m2 = 6, m3 = 6
        let data = [1.0, 1.0, 4.0];
        let expected = 3.0 * 2.0f64.sqrt() / 1.0 * (6.0 / 6.0f64.powf(1.5));
        assert!(close(skewness(&data), expected));
        assert!(skewness(&data) > 0.0);
    }

    #[test]
    fn test_skewness_symmetric_is_zero() {
        assert!(close(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0));
    }

    #[test]
    fn test_skewness_constant_is_zero() {
        assert_eq!(skewness(&[3.0, 3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_small_samples_are_nan() {
        assert!(mean(&[]).is_nan());
        assert!(variance(&[1.0]).is_nan());
        assert!(skewness(&[1.0, 2.0]).is_nan());
        assert!(min(&[]).is_nan());
        assert!(max(&[]).is_nan());
    }

    #[test]
    fn test_measures_count_includes_missing() {
        let m = Measures::from_values("1KB", &[Some(1.0), None, Some(3.0)]);
        assert_eq!(m.count, 3);
        assert_eq!(m.mean, 2.0);
        assert_eq!(m.min, 1.0);
        assert_eq!(m.max, 3.0);
        assert_eq!(m.median, 2.0);
        assert_eq!(m.outliers, None);
    }

    #[test]
    fn test_measures_with_outliers() {
        let m = Measures::from_values("1KB", &[Some(1.0)]).with_outliers(4);
        assert_eq!(m.outliers, Some(4));
    }
}
