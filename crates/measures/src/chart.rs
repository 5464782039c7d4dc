//! Chart models, independent of the drawing backend
//!
//! A chart carries everything needed to draw it; [`crate::render`] turns it
//! into a PNG file.

use crate::quantile::quartiles;
use crate::{std_dev, Fence, Measures};
use records::{Group, Grouped};

/// Evaluation points of the density curve
const KDE_POINTS: usize = 200;
/// Bandwidths the density curve extends past the data on each side
const KDE_CUT: f64 = 3.0;
/// Upper bound on histogram bins; a tight IQR beside a far value asks for billions
const MAX_BINS: usize = 10_000;

/// Value distribution of one size group
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Group label, also used to name the output file
    pub name: String,
    /// Axis description of the measured column
    pub column: String,
    pub values: Vec<f64>,
    pub measures: Measures,
}

impl Histogram {
    /// Bin edges and counts as `(start, end, count)`
    ///
    /// The bin width is the smaller of the Freedman-Diaconis and Sturges
    /// widths, falling back to Sturges when the IQR is zero.
    pub fn bins(&self) -> Vec<(f64, f64, usize)> {
        let n = self.values.len();
        if n == 0 {
            return Vec::new();
        }

        let lo = crate::min(&self.values);
        let hi = crate::max(&self.values);
        if hi - lo <= 0.0 {
            return vec![(lo - 0.5, lo + 0.5, n)];
        }

        let count = bin_count(&self.values, lo, hi);
        let width = (hi - lo) / count as f64;

        let mut counts = vec![0usize; count];
        for v in &self.values {
            let idx = (((v - lo) / width) as usize).min(count - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, c)| (lo + i as f64 * width, lo + (i + 1) as f64 * width, c))
            .collect()
    }

    /// Gaussian kernel density scaled to bin counts, Scott's bandwidth
    ///
    /// Empty when the sample has fewer than two distinct values.
    pub fn kde(&self) -> Vec<(f64, f64)> {
        let n = self.values.len();
        let sd = std_dev(&self.values);
        if n < 2 || sd.is_nan() || sd <= 0.0 {
            return Vec::new();
        }

        let bandwidth = sd * (n as f64).powf(-0.2);
        let bins = self.bins();
        let bin_width = bins.first().map(|(s, e, _)| e - s).unwrap_or(1.0);
        let scale = n as f64 * bin_width;

        let lo = crate::min(&self.values) - KDE_CUT * bandwidth;
        let hi = crate::max(&self.values) + KDE_CUT * bandwidth;
        let step = (hi - lo) / (KDE_POINTS - 1) as f64;
        let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

        (0..KDE_POINTS)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density: f64 = self
                    .values
                    .iter()
                    .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                    .sum::<f64>()
                    * norm;
                (x, density * scale)
            })
            .collect()
    }

    /// Text block drawn next to the bars
    pub fn annotations(&self) -> Vec<String> {
        let m = &self.measures;
        vec![
            format!("Mean: {:.2}", m.mean),
            format!("Std: {:.2}", m.std),
            format!("Median: {:.2}", m.median),
            format!("Variance: {:.2}", m.variance),
            format!("Skewness: {:.2}", m.skewness),
        ]
    }
}

fn bin_count(values: &[f64], lo: f64, hi: f64) -> usize {
    let n = values.len() as f64;
    let range = hi - lo;
    let sturges = range / (n.log2() + 1.0);
    let (q1, _, q3) = quartiles(values);
    let iqr = q3 - q1;

    let width = if iqr > 0.0 {
        let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
        fd.min(sturges)
    } else {
        sturges
    };

    ((range / width).ceil() as usize).clamp(1, MAX_BINS)
}

/// Five-number summary of one box, Tukey whiskers
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value inside the fence
    pub whisker_low: f64,
    /// Largest value inside the fence
    pub whisker_high: f64,
    /// Values outside the fence
    pub fliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let (q1, median, q3) = quartiles(values);
        let fence = Fence { q1, q3 };

        let inside: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| fence.contains(Some(*v)))
            .collect();
        let fliers = values
            .iter()
            .copied()
            .filter(|v| fence.is_outlier(Some(*v)))
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low: crate::min(&inside),
            whisker_high: crate::max(&inside),
            fliers,
        })
    }

    /// Lowest and highest point drawn for this box
    pub fn extent(&self) -> (f64, f64) {
        let lo = self.fliers.iter().copied().fold(self.whisker_low, f64::min);
        let hi = self.fliers.iter().copied().fold(self.whisker_high, f64::max);
        (lo, hi)
    }
}

#[derive(Debug, Clone)]
pub struct BoxSeries {
    pub label: String,
    pub stats: BoxStats,
}

/// One box per size label, in ascending size order
#[derive(Debug, Clone)]
pub struct BoxPlot {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<BoxSeries>,
}

/// One histogram per group; groups without any value are left out
pub fn plot_distribution(data: &Grouped) -> Vec<Histogram> {
    data.groups()
        .iter()
        .filter_map(|group| {
            let name = group.label();
            let values = data.present_values(group);
            if values.is_empty() {
                tracing::debug!("No values to plot for group: {}", name);
                return None;
            }
            tracing::debug!("Plotting distribution for group: {}", name);
            Some(Histogram {
                measures: Measures::from_values(name.clone(), &data.values(group)),
                name,
                column: data.value_column().to_string(),
                values,
            })
        })
        .collect()
}

/// Box plot of all groups; groups sharing a size label share a box
pub fn plot_boxplot(data: &Grouped) -> BoxPlot {
    box_plot(data, |group| data.present_values(group))
}

/// Box plot of the groups with their outliers removed first
pub fn remove_outliers_and_plot_boxplot(data: &Grouped) -> BoxPlot {
    box_plot(data, |group| {
        let fence = Fence::from_values(&data.present_values(group));
        data.present_values(group)
            .into_iter()
            .filter(|v| fence.contains(Some(*v)))
            .collect()
    })
}

fn box_plot(data: &Grouped, values_of: impl Fn(&Group) -> Vec<f64>) -> BoxPlot {
    let mut labelled: Vec<(String, Vec<f64>)> = Vec::new();
    for group in data.groups() {
        let label = group.label();
        let values = values_of(group);
        match labelled.last_mut() {
            Some((last, acc)) if *last == label => acc.extend(values),
            _ => labelled.push((label, values)),
        }
    }

    let series = labelled
        .into_iter()
        .filter_map(|(label, values)| {
            BoxStats::from_values(&values).map(|stats| BoxSeries { label, stats })
        })
        .collect();

    BoxPlot {
        x_label: data.key_column().to_string(),
        y_label: data.value_column().to_string(),
        series,
    }
}
