//! Saving edited HTML back to the store
//!
//! Saves of several bundles are issued concurrently and awaited jointly. A
//! failed save never cancels its siblings; the report lists what succeeded,
//! what failed, and the first failure in request order.

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::domain::Bundle;
use crate::error::{AdBundleError, ErrorKind, Result, request, store};
use crate::store::BundleRepository;

/// Message returned for a successful single save
pub const SAVED_MESSAGE: &str = "HTML file saved successfully";

/// One save request: a bundle ID and its full replacement HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveItem {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content: String,
}

impl SaveItem {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveFailure {
    pub filename: String,
    pub reason: String,
    #[serde(skip)]
    pub kind: ErrorKind,
}

/// Outcome of a batch save
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub saved: Vec<String>,
    pub failed: Vec<SaveFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// The whole batch as one error, classed like its first failure
    pub fn failure(&self) -> Option<AdBundleError> {
        let first = self.failed.first()?;
        Some(store::saves_failed(
            self.failed.len(),
            self.saved.len() + self.failed.len(),
            first.kind,
        ))
    }
}

/// Replace one bundle's HTML wholesale.
///
/// Empty filename or content is a validation error; whitespace-only content
/// is saved as given.
pub fn save_one(repo: &BundleRepository, item: &SaveItem) -> Result<Bundle> {
    if item.filename.trim().is_empty() || item.content.is_empty() {
        return Err(request::invalid("Filename and content are required"));
    }
    let bundle = repo.replace_html(&item.filename, &item.content)?;
    tracing::info!(bundle = %bundle.id, bytes = item.content.len(), "saved html");
    Ok(bundle)
}

/// Save every item concurrently, collecting all results
pub async fn save_many(repo: &BundleRepository, items: Vec<SaveItem>) -> SaveReport {
    let mut saves = JoinSet::new();
    let filenames: Vec<String> = items.iter().map(|item| item.filename.clone()).collect();
    for (index, item) in items.into_iter().enumerate() {
        let repo = repo.clone();
        saves.spawn_blocking(move || (index, save_one(&repo, &item).map(|_| ())));
    }

    let mut outcomes: Vec<Option<std::result::Result<(), (ErrorKind, String)>>> =
        vec![None; filenames.len()];
    while let Some(joined) = saves.join_next().await {
        match joined {
            Ok((index, result)) => {
                outcomes[index] = Some(result.map_err(|e| (e.kind(), e.to_string())));
            }
            Err(e) => tracing::error!("save task failed: {e}"),
        }
    }

    let mut report = SaveReport::default();
    for (filename, outcome) in filenames.into_iter().zip(outcomes) {
        match outcome {
            Some(Ok(())) => report.saved.push(filename),
            Some(Err((kind, reason))) => {
                tracing::warn!(bundle = %filename, "save failed: {reason}");
                report.failed.push(SaveFailure {
                    filename,
                    reason,
                    kind,
                });
            }
            None => report.failed.push(SaveFailure {
                filename,
                reason: "save task did not complete".to_string(),
                kind: ErrorKind::Persistence,
            }),
        }
    }
    report.error = report.failed.first().map(|f| f.reason.clone());
    report
}
