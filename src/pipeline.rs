//! Upload → convert → persist
//!
//! One implementation shared by `POST /convert` and `adbundle convert`.
//! Every valid bundle of one conversion is encoded (which assembles its
//! package), then all writes are issued concurrently and awaited jointly.
//! A bundle whose package cannot be assembled is skipped with a warning; a
//! failed write fails the whole request.

use std::path::Path;

use serde::Serialize;
use tokio::task::JoinSet;

use crate::converter::Converter;
use crate::decoder::{self, DecodeContext, Decoded, Rejected};
use crate::domain::bundle::validate_session_id;
use crate::error::{Result, convert, store};
use crate::store::{BundleRepository, StoredDocument};
use crate::temp::UploadDir;

/// One persisted bundle, keyed by the converter's source name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBundle {
    pub filename: String,
    pub doc_id: String,
}

/// Result of a successful conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertOutcome {
    pub results: Vec<StoredBundle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Convert an uploaded archive held in memory
pub async fn convert_upload(
    converter: &Converter,
    repo: &BundleRepository,
    session_id: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<ConvertOutcome> {
    validate_session_id(session_id)?;
    let upload = UploadDir::new()?;
    let archive = upload.write(file_name, bytes)?;
    convert_archive(converter, repo, session_id, &archive).await
}

/// Convert an archive on disk and persist the resulting bundles
pub async fn convert_archive(
    converter: &Converter,
    repo: &BundleRepository,
    session_id: &str,
    archive: &Path,
) -> Result<ConvertOutcome> {
    validate_session_id(session_id)?;
    let result = converter.run(archive).await?;
    let decoded = decoder::decode(&result, &DecodeContext::now(session_id))?;
    let (documents, warnings) = encode_all(decoded)?;

    let results = persist_all(repo, documents).await?;
    tracing::info!(
        session = %session_id,
        stored = results.len(),
        skipped = warnings.len(),
        "conversion stored"
    );
    Ok(ConvertOutcome { results, warnings })
}

/// Encode every bundle; bundles whose package fails are rejected
fn encode_all(decoded: Decoded) -> Result<(Vec<(String, StoredDocument)>, Vec<String>)> {
    let Decoded {
        bundles,
        mut rejected,
        warnings,
    } = decoded;

    let mut documents = Vec::with_capacity(bundles.len());
    for (source, bundle) in bundles {
        match StoredDocument::from_bundle(&bundle) {
            Ok(document) => documents.push((source, document)),
            Err(e) => {
                tracing::warn!(bundle = %bundle.id, "package assembly failed: {e}");
                rejected.push(Rejected {
                    item: source,
                    reason: e.to_string(),
                });
            }
        }
    }

    if documents.is_empty() {
        let message = rejected
            .first()
            .map_or_else(|| "Processing failed".to_string(), |r| r.reason.clone());
        return Err(convert::conversion_failed(message));
    }

    let messages = rejected
        .iter()
        .map(|r| format!("{}: {}", r.item, r.reason))
        .chain(warnings.iter().map(ToString::to_string))
        .collect();
    Ok((documents, messages))
}

async fn persist_all(
    repo: &BundleRepository,
    documents: Vec<(String, StoredDocument)>,
) -> Result<Vec<StoredBundle>> {
    let mut writes = JoinSet::new();
    for (index, (source, document)) in documents.into_iter().enumerate() {
        let repo = repo.clone();
        writes.spawn_blocking(move || {
            let doc_id = document.filename.clone();
            repo.put(document).map(|()| {
                (
                    index,
                    StoredBundle {
                        filename: source,
                        doc_id,
                    },
                )
            })
        });
    }

    let mut stored = Vec::new();
    let mut first_error = None;
    while let Some(joined) = writes.join_next().await {
        match joined {
            Ok(Ok(entry)) => stored.push(entry),
            Ok(Err(e)) => {
                tracing::error!("persisting bundle failed: {e}");
                first_error.get_or_insert(e);
            }
            Err(e) => {
                first_error.get_or_insert(store::operation_failed(e.to_string()));
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }
    stored.sort_by_key(|(index, _)| *index);
    Ok(stored.into_iter().map(|(_, entry)| entry).collect())
}
