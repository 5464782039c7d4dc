//! The per-group analyses a pipeline step can run

use crate::{mean, Fence, Measures};
use records::{Grouped, Result, Table};

const MEASURE_COLUMNS: [&str; 9] = [
    "Group",
    "Mean",
    "Std",
    "Median",
    "Variance",
    "Skewness",
    "Min",
    "Max",
    "Group size",
];

/// Fence of every group, in group order
fn fences(data: &Grouped) -> Vec<Fence> {
    data.groups()
        .iter()
        .map(|group| {
            let fence = Fence::from_values(&data.present_values(group));
            tracing::debug!(
                "Group {}: lower outlier gate {}, upper outlier gate {}",
                group.label(),
                fence.lower(),
                fence.upper()
            );
            fence
        })
        .collect()
}

/// Rows strictly outside their group's fence
pub fn find_outliers(data: &Grouped) -> Table {
    let fences = fences(data);
    let mut out = Table::new(data.table().columns().to_vec());

    for (group, fence) in data.groups().iter().zip(&fences) {
        let before = out.len();
        for row in data.rows(group) {
            if fence.is_outlier(data.value_of(row)) {
                out.push_row(row.index, row.cells.clone());
            }
        }
        tracing::debug!("Group {}: {} outliers", group.label(), out.len() - before);
    }

    out.reset_index()
}

/// Rows inside their group's fence; rows with a missing value are dropped
pub fn remove_outliers(data: &Grouped) -> Table {
    let fences = fences(data);
    let mut out = Table::new(data.table().columns().to_vec());

    for (group, fence) in data.groups().iter().zip(&fences) {
        for row in data.rows(group) {
            if fence.contains(data.value_of(row)) {
                out.push_row(row.index, row.cells.clone());
            }
        }
    }

    out.reset_index()
}

pub fn find_measures(data: &Grouped) -> Vec<Measures> {
    data.groups()
        .iter()
        .map(|group| {
            tracing::debug!("Calculating measures for group: {}", group.label());
            Measures::from_values(group.label(), &data.values(group))
        })
        .collect()
}

/// Measures of the cleaned groups, each carrying its outlier count
///
/// A group left without any value after cleaning is not reported.
pub fn remove_outliers_and_find_measures(data: &Grouped) -> Vec<Measures> {
    let fences = fences(data);

    data.groups()
        .iter()
        .zip(&fences)
        .filter_map(|(group, fence)| {
            let clean: Vec<Option<f64>> = data
                .values(group)
                .into_iter()
                .filter(|v| fence.contains(*v))
                .collect();
            if clean.is_empty() {
                tracing::debug!("Group {} is empty after cleaning", group.label());
                return None;
            }
            let removed = group.len() - clean.len();
            Some(Measures::from_values(group.label(), &clean).with_outliers(removed))
        })
        .collect()
}

/// One report line per group with the group's mean
pub fn average(data: &Grouped) -> Vec<Vec<String>> {
    data.groups()
        .iter()
        .map(|group| {
            let avg = mean(&data.present_values(group));
            vec![format!(
                "Size: {} Average value is: {}",
                group.label(),
                format_float(avg)
            )]
        })
        .collect()
}

/// One report row per group: mean with outliers, then mean without them
pub fn remove_outliers_and_average(data: &Grouped) -> Vec<Vec<String>> {
    data.groups()
        .iter()
        .zip(fences(data))
        .map(|(group, fence)| {
            let present = data.present_values(group);
            let clean: Vec<f64> = present
                .iter()
                .copied()
                .filter(|v| fence.contains(Some(*v)))
                .collect();
            vec![
                format!(
                    "Size: {} Average value (with outliers) is: {}",
                    group.label(),
                    format_float(mean(&present))
                ),
                format!(
                    "Average value (excluding outliers) is: {}",
                    format_float(mean(&clean))
                ),
            ]
        })
        .collect()
}

/// All groups concatenated in key order, original labels in `index`
pub fn group_results(data: &Grouped) -> Table {
    data.to_table().reset_index()
}

/// Share of missing values in `column`, as a single-row table
pub fn na_ratio(table: &Table, column: &str) -> Result<Table> {
    let col = table.column_index(column)?;
    let total = table.len();
    let missing = table
        .rows()
        .iter()
        .filter(|r| r.number(col).is_none())
        .count();
    let ratio = if total == 0 {
        f64::NAN
    } else {
        missing as f64 / total as f64 * 100.0
    };

    Ok(Table::from_rows(
        vec![
            "Total".to_string(),
            "NAs".to_string(),
            "NA Ratio (%)".to_string(),
        ],
        vec![vec![
            Some(total.to_string()),
            Some(missing.to_string()),
            number_cell(ratio),
        ]],
    ))
}

/// Lay out measures as a table; the `Outliers` column appears when any row has it
pub fn measures_table(measures: &[Measures]) -> Table {
    let with_outliers = measures.iter().any(|m| m.outliers.is_some());

    let mut columns: Vec<String> = MEASURE_COLUMNS.iter().map(|c| c.to_string()).collect();
    if with_outliers {
        columns.push("Outliers".to_string());
    }

    let rows = measures
        .iter()
        .map(|m| {
            let mut cells = vec![
                Some(m.group.clone()),
                number_cell(m.mean),
                number_cell(m.std),
                number_cell(m.median),
                number_cell(m.variance),
                number_cell(m.skewness),
                number_cell(m.min),
                number_cell(m.max),
                Some(m.count.to_string()),
            ];
            if with_outliers {
                cells.push(m.outliers.map(|o| o.to_string()));
            }
            cells
        })
        .collect();

    Table::from_rows(columns, rows)
}

fn format_float(v: f64) -> String {
    format!("{:?}", v)
}

fn number_cell(v: f64) -> Option<String> {
    (!v.is_nan()).then(|| format_float(v))
}
