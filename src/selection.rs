use serde::Serialize;

use crate::data::model::ColumnSet;

// ---------------------------------------------------------------------------
// Selection – which columns are charted
// ---------------------------------------------------------------------------

/// Ordered subset of the current [`ColumnSet`]. Every operation returns a
/// fresh value; nothing is mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection(Vec<String>);

impl Selection {
    /// Every column, in header order.
    pub fn all(columns: &ColumnSet) -> Self {
        Selection(columns.iter().cloned().collect())
    }

    pub fn none() -> Self {
        Selection(Vec::new())
    }

    /// Select everything unless everything is already selected, in which
    /// case select nothing.
    ///
    /// "Everything" is judged against the live `columns`, not a count cached
    /// from an earlier dataset.
    pub fn toggle_all(&self, columns: &ColumnSet) -> Self {
        if !self.is_empty() && self.is_full(columns) {
            Selection::none()
        } else {
            Selection::all(columns)
        }
    }

    /// Replace the selection with `requested`, keeping only names present in
    /// `columns` (first occurrence wins, request order preserved).
    pub fn explicit<I, S>(requested: I, columns: &ColumnSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut picked: Vec<String> = Vec::new();
        for name in requested {
            let name = name.as_ref();
            if columns.contains(name) && !picked.iter().any(|p| p == name) {
                picked.push(name.to_string());
            }
        }
        Selection(picked)
    }

    /// Selection is a duplicate-free subset, so equal size means equal set.
    pub fn is_full(&self, columns: &ColumnSet) -> bool {
        self.0.len() == columns.len() && self.0.iter().all(|c| columns.contains(c))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> ColumnSet {
        ColumnSet::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn toggle_between_extremes() {
        let c = cols(&["A", "B", "C"]);
        assert_eq!(Selection::all(&c).toggle_all(&c), Selection::none());
        assert_eq!(Selection::none().toggle_all(&c), Selection::all(&c));
    }

    #[test]
    fn partial_selection_toggles_to_all() {
        let c = cols(&["A", "B", "C"]);
        let partial = Selection::explicit(["B"], &c);
        assert_eq!(partial.toggle_all(&c), Selection::all(&c));
    }

    #[test]
    fn toggle_uses_live_column_set() {
        let old = cols(&["A", "B"]);
        let new = cols(&["A", "B", "C"]);
        let sel = Selection::all(&old);
        // full for the old file, partial for the new one
        assert_eq!(sel.toggle_all(&new), Selection::all(&new));
    }

    #[test]
    fn explicit_drops_unknown_and_duplicates() {
        let c = cols(&["A", "B"]);
        let sel = Selection::explicit(["B", "Z", "A", "B"], &c);
        assert_eq!(sel.as_slice(), ["B", "A"]);
    }

    #[test]
    fn all_preserves_header_order() {
        let c = cols(&["z", "a", "m"]);
        assert_eq!(Selection::all(&c).as_slice(), ["z", "a", "m"]);
    }

    #[test]
    fn empty_column_set() {
        let c = ColumnSet::default();
        assert!(Selection::none().toggle_all(&c).is_empty());
    }
}
