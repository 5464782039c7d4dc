use crate::{output, Config, Result};
use measures::{BoxPlot, Histogram};
use records::{Grouped, Table};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The statistics function a step runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analysis {
    PlotDistribution,
    PlotBoxplot,
    RemoveOutliersAndPlotBoxplot,
    NaRatio,
    FindOutliers,
    FindMeasures,
    RemoveOutliersAndFindMeasures,
    RemoveOutliers,
    Average,
    RemoveOutliersAndAverage,
    GroupResults,
}

/// What an analysis produced; decides how it is written
#[derive(Debug, Clone)]
pub enum Artifact {
    /// One PNG per chart, suffixed with the chart name
    Figures(Vec<Histogram>),
    /// A single PNG
    Figure(BoxPlot),
    /// A CSV table
    Table(Table),
    /// A plain-text report, one line per row
    Lines(Vec<Vec<String>>),
}

impl Artifact {
    /// Charts without anything to draw
    pub fn is_empty(&self) -> bool {
        match self {
            Artifact::Figures(figs) => figs.is_empty(),
            Artifact::Figure(fig) => fig.series.is_empty(),
            Artifact::Table(_) | Artifact::Lines(_) => false,
        }
    }

    pub fn write(&self, directory: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
        match self {
            Artifact::Figures(figs) => output::save_figs(figs, directory, file_name),
            Artifact::Figure(fig) => Ok(vec![output::save_fig(fig, directory, file_name)?]),
            Artifact::Table(table) => Ok(vec![output::save_csv(table, directory, file_name)?]),
            Artifact::Lines(rows) => Ok(vec![output::write_to_txt(rows, directory, file_name)?]),
        }
    }
}

/// One pipeline step: prepare a copy of the records, analyse, write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub analysis: Analysis,
    /// Subdirectory of the destination that receives the output
    pub output_dir: String,
    /// Drop rows with any missing cell before the analysis
    #[serde(default = "default_dropna")]
    pub dropna: bool,
    /// Keep only rows whose value is at most this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

fn default_dropna() -> bool {
    true
}

impl Step {
    pub fn new(analysis: Analysis, output_dir: &str) -> Self {
        Self {
            analysis,
            output_dir: output_dir.to_string(),
            dropna: true,
            max_value: None,
        }
    }

    pub fn keep_missing(mut self) -> Self {
        self.dropna = false;
        self
    }

    pub fn with_max_value(mut self, limit: f64) -> Self {
        self.max_value = Some(limit);
        self
    }

    /// Apply the step's row filters
    pub fn prepare(&self, mut table: Table, value_column: &str) -> Result<Table> {
        if self.dropna {
            table.drop_missing();
        }

        if let Some(limit) = self.max_value {
            let col = table.column_index(value_column)?;
            let before = table.len();
            table.retain(|row| row.number(col).is_some_and(|v| v <= limit));
            if table.len() < before {
                tracing::info!(
                    "Removed {} rows with '{}' above {}",
                    before - table.len(),
                    value_column,
                    limit
                );
            }
        }

        Ok(table)
    }

    pub fn apply(&self, table: Table, config: &Config) -> Result<Artifact> {
        let table = self.prepare(table, &config.value_column)?;
        let group = |table: Table| -> Result<Grouped> {
            Ok(Grouped::new(table, &config.key_column, &config.value_column)?)
        };

        let artifact = match self.analysis {
            Analysis::NaRatio => {
                Artifact::Table(measures::na_ratio(&table, &config.value_column)?)
            }
            Analysis::PlotDistribution => {
                Artifact::Figures(measures::plot_distribution(&group(table)?))
            }
            Analysis::PlotBoxplot => Artifact::Figure(measures::plot_boxplot(&group(table)?)),
            Analysis::RemoveOutliersAndPlotBoxplot => Artifact::Figure(
                measures::remove_outliers_and_plot_boxplot(&group(table)?),
            ),
            Analysis::FindOutliers => Artifact::Table(measures::find_outliers(&group(table)?)),
            Analysis::FindMeasures => Artifact::Table(measures::measures_table(
                &measures::find_measures(&group(table)?),
            )),
            Analysis::RemoveOutliersAndFindMeasures => Artifact::Table(measures::measures_table(
                &measures::remove_outliers_and_find_measures(&group(table)?),
            )),
            Analysis::RemoveOutliers => {
                Artifact::Table(measures::remove_outliers(&group(table)?))
            }
            Analysis::Average => Artifact::Lines(measures::average(&group(table)?)),
            Analysis::RemoveOutliersAndAverage => {
                Artifact::Lines(measures::remove_outliers_and_average(&group(table)?))
            }
            Analysis::GroupResults => Artifact::Table(measures::group_results(&group(table)?)),
        };

        Ok(artifact)
    }
}

/// The full set of outputs produced for every unit of records
pub fn default_steps() -> Vec<Step> {
    vec![
        Step::new(Analysis::PlotDistribution, "histograms"),
        Step::new(Analysis::PlotBoxplot, "box_plots"),
        Step::new(Analysis::NaRatio, "na_ratio").keep_missing(),
        Step::new(Analysis::FindOutliers, "outliers"),
        Step::new(Analysis::FindMeasures, "measures"),
        Step::new(Analysis::RemoveOutliersAndFindMeasures, "measures_clean"),
        Step::new(Analysis::RemoveOutliers, "data_clean"),
        Step::new(Analysis::RemoveOutliersAndAverage, "averages"),
        Step::new(Analysis::GroupResults, "data_grouped"),
    ]
}
