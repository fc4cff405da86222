use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Timestamp – the first column of every row
// ---------------------------------------------------------------------------

/// Time of day with sub-second precision, as found in the first CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(NaiveTime);

impl Timestamp {
    pub fn new(time: NaiveTime) -> Self {
        Timestamp(time)
    }

    /// Seconds since midnight; the x coordinate used for plotting.
    pub fn seconds(&self) -> f64 {
        self.0.num_seconds_from_midnight() as f64 + self.0.nanosecond() as f64 * 1e-9
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S%.6f"))
    }
}

// ---------------------------------------------------------------------------
// ColumnSet – ordered measurement column names
// ---------------------------------------------------------------------------

/// Ordered, duplicate-free list of measurement column names (timestamp
/// column excluded), in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnSet(Vec<String>);

impl ColumnSet {
    /// Callers guarantee uniqueness; the loader disambiguates duplicates.
    pub fn new(names: Vec<String>) -> Self {
        ColumnSet(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    /// Position of `name` in header order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Row / Dataset
// ---------------------------------------------------------------------------

/// One data row. `None` marks a missing or unparseable cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: Option<Timestamp>,
    /// One entry per column of the owning dataset's [`ColumnSet`].
    pub values: Vec<Option<f64>>,
}

/// A parsed CSV file. Immutable once built; replaced wholesale on the next
/// upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Header of the first column (not semantically checked).
    pub time_column: String,
    pub columns: ColumnSet,
    /// Rows in file order; never re-sorted.
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every row's value for `column`, or `None` if the column is unknown.
    pub fn column_values(&self, column: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.columns.position(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.values.get(idx).copied().flatten())
                .collect(),
        )
    }

    pub fn timestamps(&self) -> Vec<Option<Timestamp>> {
        self.rows.iter().map(|row| row.timestamp).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_include_fraction() {
        let t = Timestamp::new(NaiveTime::from_hms_micro_opt(1, 2, 3, 500_000).unwrap());
        assert!((t.seconds() - 3723.5).abs() < 1e-9);
        assert_eq!(t.to_string(), "01:02:03.500000");
    }

    #[test]
    fn column_values_unknown_column() {
        let ds = Dataset {
            time_column: "Time".into(),
            columns: ColumnSet::new(vec!["A".into()]),
            rows: vec![Row { timestamp: None, values: vec![Some(1.0)] }],
        };
        assert_eq!(ds.column_values("A"), Some(vec![Some(1.0)]));
        assert_eq!(ds.column_values("B"), None);
    }
}
