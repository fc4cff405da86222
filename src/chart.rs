//! Projection of a dataset and a selection into a declarative chart.

use serde::Serialize;

use crate::data::model::{Dataset, Timestamp};
use crate::selection::Selection;

/// Reason shown when nothing is selected.
pub const NO_COLUMNS_SELECTED: &str = "no columns selected";

pub const DEFAULT_TITLE: &str = "Interactive CSV data";

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// What the presentation layer draws. Rebuilt on every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Empty { reason: String },
    Populated(ChartData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    /// One entry per dataset row, in file order.
    pub axis: Vec<Option<Timestamp>>,
    /// One series per selected column, in selection order.
    pub series: Vec<Series>,
    /// Aligned index-for-index with `axis`.
    pub tooltips: Vec<Tooltip>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub column: String,
    /// `None` is a gap, never drawn as zero.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub timestamp: Option<Timestamp>,
    pub entries: Vec<(String, Option<f64>)>,
}

impl ChartSpec {
    pub fn empty(reason: impl Into<String>) -> Self {
        ChartSpec::Empty {
            reason: reason.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartSpec::Empty { .. })
    }
}

/// Build the chart for `selection` over `dataset`.
///
/// Pure: the same inputs always give an identical chart.
pub fn project(dataset: &Dataset, selection: &Selection) -> ChartSpec {
    let series: Vec<Series> = selection
        .iter()
        .filter_map(|column| {
            dataset.column_values(column).map(|values| Series {
                column: column.clone(),
                values,
            })
        })
        .collect();

    if series.is_empty() {
        return ChartSpec::empty(NO_COLUMNS_SELECTED);
    }

    let axis = dataset.timestamps();
    let tooltips = axis
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| Tooltip {
            timestamp,
            entries: series
                .iter()
                .map(|s| (s.column.clone(), s.values[i]))
                .collect(),
        })
        .collect();

    ChartSpec::Populated(ChartData {
        title: DEFAULT_TITLE.to_string(),
        axis,
        series,
        tooltips,
    })
}

// ---------------------------------------------------------------------------
// Drawing helpers
// ---------------------------------------------------------------------------

impl ChartData {
    /// Contiguous `[seconds, value]` runs of `series`. A missing value or a
    /// missing timestamp ends the current run, so each run is drawn as its
    /// own polyline.
    pub fn segments(&self, series: &Series) -> Vec<Vec<[f64; 2]>> {
        let mut runs = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();
        for (t, v) in self.axis.iter().zip(&series.values) {
            match (t, v) {
                (Some(t), Some(v)) => current.push([t.seconds(), *v]),
                _ => {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    /// Row whose timestamp is closest to `x` seconds; rows without a
    /// timestamp are never hovered.
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        self.axis
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i, (t.seconds() - x).abs())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

impl Tooltip {
    /// `name: value` lines; missing values render as `—`.
    pub fn lines(&self, precision: usize) -> Vec<String> {
        self.entries
            .iter()
            .map(|(name, value)| match value {
                Some(v) => format!("{name}: {v:.precision$}"),
                None => format!("{name}: —"),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse;

    fn dataset() -> Dataset {
        parse(b"Time,A,B,C\n00:00:01,1,10,100\n00:00:02,abc,20,200\n00:00:03,3,30,300\n")
            .unwrap()
    }

    #[test]
    fn empty_iff_selection_empty() {
        let ds = dataset();
        assert_eq!(
            project(&ds, &Selection::none()),
            ChartSpec::empty(NO_COLUMNS_SELECTED)
        );
        assert!(!project(&ds, &Selection::all(&ds.columns)).is_empty());
    }

    #[test]
    fn series_follow_selection_order() {
        let ds = dataset();
        let sel = Selection::explicit(["C", "A"], &ds.columns);
        let ChartSpec::Populated(data) = project(&ds, &sel) else {
            panic!("expected populated chart");
        };
        let names: Vec<_> = data.series.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(names, ["C", "A"]);
        assert_eq!(data.series[1].values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn tooltips_align_with_axis() {
        let ds = dataset();
        let sel = Selection::explicit(["B", "A"], &ds.columns);
        let ChartSpec::Populated(data) = project(&ds, &sel) else {
            panic!("expected populated chart");
        };
        assert_eq!(data.tooltips.len(), data.axis.len());
        let tip = &data.tooltips[1];
        assert_eq!(tip.timestamp, data.axis[1]);
        assert_eq!(
            tip.entries,
            vec![("B".to_string(), Some(20.0)), ("A".to_string(), None)]
        );
        assert_eq!(tip.lines(1), ["B: 20.0", "A: —"]);
    }

    #[test]
    fn missing_values_split_segments() {
        let ds = dataset();
        let sel = Selection::explicit(["A"], &ds.columns);
        let ChartSpec::Populated(data) = project(&ds, &sel) else {
            panic!("expected populated chart");
        };
        let runs = data.segments(&data.series[0]);
        assert_eq!(runs, vec![vec![[1.0, 1.0]], vec![[3.0, 3.0]]]);
    }

    #[test]
    fn nearest_index_skips_missing_timestamps() {
        let ds = parse(b"Time,A\n00:00:01,1\nbad,2\n00:00:05,3\n").unwrap();
        let ChartSpec::Populated(data) = project(&ds, &Selection::all(&ds.columns)) else {
            panic!("expected populated chart");
        };
        assert_eq!(data.nearest_index(1.2), Some(0));
        assert_eq!(data.nearest_index(3.5), Some(2));
    }

    #[test]
    fn axis_keeps_file_order() {
        let ds = parse(b"Time,A\n00:00:05,1\n00:00:01,2\n").unwrap();
        let ChartSpec::Populated(data) = project(&ds, &Selection::all(&ds.columns)) else {
            panic!("expected populated chart");
        };
        assert_eq!(data.axis, ds.timestamps());
        assert!(data.axis[0] > data.axis[1]);
        assert_eq!(data.series[0].values, vec![Some(1.0), Some(2.0)]);
        for (tip, t) in data.tooltips.iter().zip(&data.axis) {
            assert_eq!(tip.timestamp, *t);
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let ds = dataset();
        let sel = Selection::all(&ds.columns);
        let first = project(&ds, &sel);
        let second = project(&ds, &sel);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
