//! Empirical quantiles with linear interpolation between order statistics.
//!
//! For a sorted sample `x` of size `n` and probability `p`:
//! ```text
//! h = (n - 1) * p
//! q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```
//! This is Hyndman & Fan type 7, the default of most dataframe libraries.
//! An empty sample has no quantiles; every function returns NaN for it.

/// Quantile of an already sorted slice
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
    debug_assert!(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "quantile input must be sorted"
    );

    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }

    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Quantile of an unsorted sample
pub fn quantile(values: &[f64], p: f64) -> f64 {
    let sorted = sorted_copy(values);
    quantile_sorted(&sorted, p)
}

pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// First quartile, median and third quartile, sorting only once
pub fn quartiles(values: &[f64]) -> (f64, f64, f64) {
    let sorted = sorted_copy(values);
    (
        quantile_sorted(&sorted, 0.25),
        quantile_sorted(&sorted, 0.5),
        quantile_sorted(&sorted, 0.75),
    )
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&data, 0.25), 1.75);
        assert_eq!(quantile(&data, 0.5), 2.5);
        assert_eq!(quantile(&data, 0.75), 3.25);
    }

    #[test]
    fn test_quantile_endpoints() {
        let data = [5.0, 1.0, 3.0];
        assert_eq!(quantile(&data, 0.0), 1.0);
        assert_eq!(quantile(&data, 1.0), 5.0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(quartiles(&[7.0]), (7.0, 7.0, 7.0));
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(quantile(&[], 0.5).is_nan());
        let (q1, q2, q3) = quartiles(&[]);
        assert!(q1.is_nan() && q2.is_nan() && q3.is_nan());
    }

    #[test]
    fn test_quartiles_unsorted() {
        let data = [10.0, 1.0, 7.0, 3.0, 5.0];
        assert_eq!(quartiles(&data), (3.0, 5.0, 7.0));
    }
}
