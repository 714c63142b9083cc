//! Preview editor
//!
//! An [`EditorSession`] tracks every open bundle through
//!
//! ```text
//! Unloaded → Loading → Loaded → Editing → Saving → Loaded
//!                 ╰──────────────┴──────────┴──→ Error
//! ```
//!
//! Control changes fan out to every selected bundle at once. Deselecting a
//! bundle discards its in-memory edits without confirmation.

pub mod events;
pub mod frame;
pub mod save;


use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, request};
use crate::store::BundleRepository;

pub use events::{Delay, EditEvent, Edited, Role, apply_event};
pub use frame::{PreviewFrame, render_page};
pub use save::{SaveItem, SaveReport, save_many, save_one};

/// Lifecycle of one open bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    Unloaded,
    Loading,
    Loaded,
    Editing,
    Saving,
    Error(String),
}

impl fmt::Display for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewState::Unloaded => write!(f, "unloaded"),
            PreviewState::Loading => write!(f, "loading"),
            PreviewState::Loaded => write!(f, "loaded"),
            PreviewState::Editing => write!(f, "editing"),
            PreviewState::Saving => write!(f, "saving"),
            PreviewState::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

#[derive(Debug, Clone)]
struct OpenBundle {
    state: PreviewState,
    html: String,
}

/// What one [`EditorSession::apply`] call did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub edited: Vec<String>,
    /// `(bundle id, element id)` pairs the edit could not find
    pub missing: Vec<(String, String)>,
    /// Selected bundles that were not in an editable state
    pub skipped: Vec<String>,
}

/// Selected bundles and their in-memory HTML
#[derive(Debug, Default)]
pub struct EditorSession {
    open: BTreeMap<String, OpenBundle>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `id`; bundles never selected are `Unloaded`
    pub fn state(&self, id: &str) -> PreviewState {
        self.open
            .get(id)
            .map_or(PreviewState::Unloaded, |open| open.state.clone())
    }

    /// Current in-memory HTML of a selected bundle
    pub fn html(&self, id: &str) -> Option<&str> {
        self.open.get(id).map(|open| open.html.as_str())
    }

    /// Selected bundle IDs in order
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.open.keys().map(String::as_str)
    }

    /// Select a bundle and load its HTML from the repository
    pub fn select(&mut self, id: &str, repo: &BundleRepository) -> Result<&PreviewState> {
        self.select_with(id, |id| repo.load(id).map(|bundle| bundle.html))
    }

    /// Select a bundle, loading its HTML through `load`.
    ///
    /// Selecting an already loaded bundle keeps its edits. A bundle in the
    /// error state is reloaded.
    pub fn select_with(
        &mut self,
        id: &str,
        load: impl FnOnce(&str) -> Result<String>,
    ) -> Result<&PreviewState> {
        match self.state(id) {
            PreviewState::Unloaded | PreviewState::Error(_) => {}
            PreviewState::Loaded | PreviewState::Editing => {
                return Ok(&self.entry(id)?.state);
            }
            state @ (PreviewState::Loading | PreviewState::Saving) => {
                return Err(illegal(id, &state, "select"));
            }
        }

        self.open.insert(
            id.to_string(),
            OpenBundle {
                state: PreviewState::Loading,
                html: String::new(),
            },
        );
        let loaded = load(id);
        let open = self.entry_mut(id)?;
        match loaded {
            Ok(html) => {
                open.html = html;
                open.state = PreviewState::Loaded;
            }
            Err(e) => {
                tracing::warn!(bundle = %id, "loading failed: {e}");
                open.state = PreviewState::Error(e.to_string());
            }
        }
        Ok(&open.state)
    }

    /// Drop a bundle and any unsaved edits. Returns whether it was selected.
    pub fn deselect(&mut self, id: &str) -> Result<bool> {
        let state = self.state(id);
        if state == PreviewState::Saving {
            return Err(illegal(id, &state, "deselect"));
        }
        Ok(self.open.remove(id).is_some())
    }

    /// Replace the HTML text of one bundle directly
    pub fn set_html(&mut self, id: &str, html: impl Into<String>) -> Result<()> {
        let state = self.state(id);
        if !matches!(state, PreviewState::Loaded | PreviewState::Editing) {
            return Err(illegal(id, &state, "edit"));
        }
        let open = self.entry_mut(id)?;
        open.html = html.into();
        open.state = PreviewState::Editing;
        Ok(())
    }

    /// Apply one control change to every selected, editable bundle
    pub fn apply(&mut self, event: &EditEvent) -> Result<ApplyReport> {
        if self.open.is_empty() {
            return Err(request::invalid_edit("no bundles selected"));
        }
        // Validate once before touching any bundle
        event.mutations()?;

        let mut report = ApplyReport::default();
        for (id, open) in &mut self.open {
            if !matches!(open.state, PreviewState::Loaded | PreviewState::Editing) {
                report.skipped.push(id.clone());
                continue;
            }
            let edited = apply_event(&open.html, event)?;
            open.html = edited.html;
            open.state = PreviewState::Editing;
            report.edited.push(id.clone());
            report
                .missing
                .extend(edited.missing.into_iter().map(|element| (id.clone(), element)));
        }
        Ok(report)
    }

    /// Save every bundle in the editing state concurrently.
    ///
    /// Saved bundles return to `Loaded`; failed ones move to `Error` and keep
    /// their edited HTML.
    pub async fn save_all(&mut self, repo: &BundleRepository) -> SaveReport {
        let mut items = Vec::new();
        for (id, open) in &mut self.open {
            if open.state == PreviewState::Editing {
                open.state = PreviewState::Saving;
                items.push(SaveItem::new(id.clone(), open.html.clone()));
            }
        }

        let report = save_many(repo, items).await;

        for id in &report.saved {
            if let Some(open) = self.open.get_mut(id) {
                open.state = PreviewState::Loaded;
            }
        }
        for failure in &report.failed {
            if let Some(open) = self.open.get_mut(&failure.filename) {
                open.state = PreviewState::Error(failure.reason.clone());
            }
        }
        report
    }

    fn entry(&self, id: &str) -> Result<&OpenBundle> {
        self.open
            .get(id)
            .ok_or_else(|| request::invalid_edit(format!("'{id}' is not selected")))
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut OpenBundle> {
        self.open
            .get_mut(id)
            .ok_or_else(|| request::invalid_edit(format!("'{id}' is not selected")))
    }
}

fn illegal(id: &str, state: &PreviewState, action: &str) -> crate::error::AdBundleError {
    request::invalid_edit(format!("cannot {action} '{id}' while it is {state}"))
}
