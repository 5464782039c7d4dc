use crate::quantile::quartiles;

/// IQR multiplier for the outlier fence
pub const OUTLIER_STEP: f64 = 1.5;

/// Tukey fence of one group: `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`
///
/// Built from an empty sample the quartiles are NaN, so nothing is inside
/// and nothing is outside the fence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fence {
    pub q1: f64,
    pub q3: f64,
}

impl Fence {
    pub fn from_values(values: &[f64]) -> Self {
        let (q1, _, q3) = quartiles(values);
        Self { q1, q3 }
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn lower(&self) -> f64 {
        self.q1 - OUTLIER_STEP * self.iqr()
    }

    pub fn upper(&self) -> f64 {
        self.q3 + OUTLIER_STEP * self.iqr()
    }

    /// Inside the fence, bounds included; a missing value is never inside
    pub fn contains(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| v >= self.lower() && v <= self.upper())
    }

    /// Strictly outside the fence; a missing value is never an outlier
    pub fn is_outlier(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| v < self.lower() || v > self.upper())
    }
}
