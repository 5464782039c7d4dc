//! measures - per-size statistics
//!
//! Descriptive measures, IQR outlier fences, report tables and charts

mod analysis;
mod chart;
mod describe;
mod fence;
mod quantile;
mod render;

pub use analysis::{
    average, find_measures, find_outliers, group_results, measures_table, na_ratio,
    remove_outliers, remove_outliers_and_average, remove_outliers_and_find_measures,
};
pub use chart::{
    plot_boxplot, plot_distribution, remove_outliers_and_plot_boxplot, BoxPlot, BoxSeries,
    BoxStats, Histogram,
};
pub use describe::{max, mean, min, skewness, std_dev, variance, Measures};
pub use fence::{Fence, OUTLIER_STEP};
pub use quantile::{median, quantile, quantile_sorted, quartiles};
pub use render::PlotError;
