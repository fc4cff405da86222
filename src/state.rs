use std::sync::Arc;

use rusty_trace::chart::ChartSpec;
use rusty_trace::data::model::ColumnSet;
use rusty_trace::selection::Selection;
use rusty_trace::session::{Event, Presenter};

use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What the widgets show: the last published view plus the events raised by
/// the widgets during the current frame.
#[derive(Default)]
pub struct AppState {
    /// Column options (empty until a file is loaded).
    pub columns: ColumnSet,

    /// Currently charted columns.
    pub selection: Selection,

    /// Last published chart; `None` until the first successful upload.
    pub chart: Option<Arc<ChartSpec>>,

    /// Colour per column of `columns`.
    pub colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Events raised this frame, dispatched after layout.
    pending: Vec<Event>,
}

impl AppState {
    pub fn push_event(&mut self, event: Event) {
        self.pending.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    /// Selection after flipping `column`, in header order.
    pub fn selection_with(&self, column: &str, checked: bool) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| {
                if c.as_str() == column {
                    checked
                } else {
                    self.selection.contains(c)
                }
            })
            .cloned()
            .collect()
    }
}

impl Presenter for AppState {
    fn render(&mut self, columns: &ColumnSet, selection: &Selection, chart: &ChartSpec) {
        if *columns != self.columns {
            self.colors = SeriesColors::new(columns);
            self.columns = columns.clone();
        }
        self.selection = selection.clone();
        self.chart = Some(Arc::new(chart.clone()));
        self.status_message = None;
    }

    fn reject(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_keeps_header_order() {
        let mut state = AppState::default();
        let columns = ColumnSet::new(vec!["A".into(), "B".into(), "C".into()]);
        let selection = Selection::explicit(["C"], &columns);
        state.render(&columns, &selection, &ChartSpec::empty("x"));

        assert_eq!(state.selection_with("A", true), ["A", "C"]);
        assert_eq!(state.selection_with("C", false), Vec::<String>::new());
    }

    #[test]
    fn reject_keeps_previous_chart() {
        let mut state = AppState::default();
        let columns = ColumnSet::new(vec!["A".into()]);
        state.render(&columns, &Selection::all(&columns), &ChartSpec::empty("x"));
        state.reject("could not read file");
        assert!(state.chart.is_some());
        assert_eq!(state.status_message.as_deref(), Some("could not read file"));
    }
}
