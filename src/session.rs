//! Session controller: one entry point per event, one exit point (publish).
//!
//! ```text
//!            FileUploaded                 ToggleAllPressed / SelectionChanged
//!  NoData ─────────────────▶ Loaded ◀───────────────────────────────────────┐
//!    │ other events: ignored    │                                           │
//!    └──────────────────────    └───────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use crate::chart::{project, ChartSpec};
use crate::data::loader::{parse_upload, LoadError, RawUpload};
use crate::data::model::{ColumnSet, Dataset};
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Events and the presentation boundary
// ---------------------------------------------------------------------------

/// Inbound events from the presentation layer.
#[derive(Debug, Clone)]
pub enum Event {
    FileUploaded(RawUpload),
    ToggleAllPressed,
    SelectionChanged(Vec<String>),
}

/// The presentation layer the session publishes to.
pub trait Presenter {
    /// Called once per processed event, after the state change.
    fn render(&mut self, columns: &ColumnSet, selection: &Selection, chart: &ChartSpec);

    /// Called when an upload is rejected; the previous view stays valid.
    fn reject(&mut self, message: &str);
}

/// What [`Session::handle`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Published,
    /// Nothing to update; no call was made to the presenter.
    Ignored,
    /// The upload could not be read; state unchanged.
    Rejected,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Loaded {
    pub dataset: Arc<Dataset>,
    pub columns: ColumnSet,
    pub selection: Selection,
}

#[derive(Debug, Clone, Default)]
pub enum State {
    #[default]
    NoData,
    Loaded(Loaded),
}

/// Owns the current dataset and selection. Events are processed one at a
/// time to completion.
#[derive(Debug, Default)]
pub struct Session {
    state: State,
    /// Most recently parsed upload.
    cache: Option<CachedUpload>,
}

/// A parsed upload together with the payload it came from, so a reuse is
/// only ever made for byte-identical input.
#[derive(Debug)]
struct CachedUpload {
    fingerprint: u64,
    upload: RawUpload,
    dataset: Arc<Dataset>,
}

impl CachedUpload {
    fn matches(&self, fingerprint: u64, upload: &RawUpload) -> bool {
        self.fingerprint == fingerprint
            && self.upload.encoding == upload.encoding
            && self.upload.bytes == upload.bytes
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn loaded(&self) -> Option<&Loaded> {
        match &self.state {
            State::Loaded(loaded) => Some(loaded),
            State::NoData => None,
        }
    }

    /// Apply `event` and publish the result to `presenter`.
    pub fn handle(&mut self, event: Event, presenter: &mut impl Presenter) -> Outcome {
        let next = match event {
            Event::FileUploaded(upload) => match self.load(&upload) {
                Ok(dataset) => {
                    let columns = dataset.columns.clone();
                    let selection = Selection::all(&columns);
                    Loaded {
                        dataset,
                        columns,
                        selection,
                    }
                }
                Err(err) => {
                    log::warn!(
                        "Rejected upload {}: {err}",
                        upload.name.as_deref().unwrap_or("<unnamed>")
                    );
                    presenter.reject(&format!("could not read file: {err}"));
                    return Outcome::Rejected;
                }
            },
            Event::ToggleAllPressed => {
                let Some(current) = self.loaded() else {
                    return ignored("toggle-all");
                };
                Loaded {
                    selection: current.selection.toggle_all(&current.columns),
                    ..current.clone()
                }
            }
            Event::SelectionChanged(requested) => {
                let Some(current) = self.loaded() else {
                    return ignored("selection change");
                };
                let selection = Selection::explicit(&requested, &current.columns);
                if selection.len() != requested.len() {
                    log::warn!("Dropped unknown or repeated columns from selection {requested:?}");
                }
                Loaded {
                    selection,
                    ..current.clone()
                }
            }
        };

        let chart = project(&next.dataset, &next.selection);
        presenter.render(&next.columns, &next.selection, &chart);
        self.state = State::Loaded(next);
        Outcome::Published
    }

    /// Parse `upload`, reusing the previous result when the same payload is
    /// delivered again.
    fn load(&mut self, upload: &RawUpload) -> Result<Arc<Dataset>, LoadError> {
        let fingerprint = upload.fingerprint();
        if let Some(cached) = &self.cache {
            if cached.matches(fingerprint, upload) {
                log::debug!("Reusing parsed dataset for repeated upload");
                return Ok(Arc::clone(&cached.dataset));
            }
        }

        let dataset = Arc::new(parse_upload(upload)?);
        log::info!(
            "Loaded {} rows with columns {:?}",
            dataset.len(),
            dataset.columns.as_slice()
        );
        self.cache = Some(CachedUpload {
            fingerprint,
            upload: upload.clone(),
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }
}

fn ignored(event: &str) -> Outcome {
    log::debug!("Ignoring {event}: no dataset loaded");
    Outcome::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl Presenter for Silent {
        fn render(&mut self, _: &ColumnSet, _: &Selection, _: &ChartSpec) {}
        fn reject(&mut self, _: &str) {}
    }

    #[test]
    fn equal_fingerprint_with_different_bytes_is_reparsed() {
        let mut session = Session::new();
        let stale = RawUpload::utf8("old.csv", "Time,Old\n00:00:01,1\n");
        session.handle(Event::FileUploaded(stale), &mut Silent);

        let fresh = RawUpload::utf8("new.csv", "Time,New\n00:00:01,2\n");
        // force the cached entry to collide with the next upload's hash
        if let Some(cached) = session.cache.as_mut() {
            cached.fingerprint = fresh.fingerprint();
        }
        session.handle(Event::FileUploaded(fresh), &mut Silent);

        let loaded = session.loaded().expect("loaded");
        assert_eq!(loaded.columns.as_slice(), ["New"]);
        assert_eq!(loaded.dataset.rows[0].values, vec![Some(2.0)]);
    }

    #[test]
    fn identical_payload_hits_cache() {
        let mut session = Session::new();
        let upload = RawUpload::utf8("a.csv", "Time,A\n00:00:01,1\n");
        session.handle(Event::FileUploaded(upload.clone()), &mut Silent);
        let first = Arc::clone(&session.loaded().expect("loaded").dataset);

        session.handle(Event::FileUploaded(upload), &mut Silent);
        assert!(Arc::ptr_eq(&first, &session.loaded().expect("loaded").dataset));
    }
}
