//! Route handlers

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::utf8_percent_encode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::asset::parse_asset_path;
use super::{AppState, blocking};
use crate::dimensions::extract_dimensions;
use crate::domain::{Bundle, RenderDimensions};
use crate::editor::{PreviewFrame, SaveItem, SaveReport, render_page, save_many, save_one};
use crate::editor::save::SAVED_MESSAGE;
use crate::error::{Result, bundle, request};
use crate::hash;
use crate::package;
use crate::pipeline::{self, ConvertOutcome};
use crate::rewrite;
use crate::rewrite::server::COMPONENT;
use crate::store::StoredDocument;

const CLEARED_MESSAGE: &str = "Output folder cleaned!";

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

impl SessionQuery {
    fn session(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .filter(|session| !session.trim().is_empty())
    }
}

/// `POST /convert`, multipart fields `file` and `sessionId`
pub async fn convert(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ConvertOutcome>> {
    let mut multipart = multipart?;
    let mut file = None;
    let mut session_id = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(ToString::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                file = Some((name, bytes));
            }
            Some("sessionId") => {
                session_id = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (Some((name, bytes)), Some(session_id)) = (
        file.filter(|(_, bytes)| !bytes.is_empty()),
        session_id.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(request::invalid("Missing file or session ID"));
    };

    tracing::info!(session = %session_id, file = %name, bytes = bytes.len(), "upload received");
    let outcome =
        pipeline::convert_upload(&state.converter, &state.repo, &session_id, &name, &bytes).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleAssets {
    html_base64: String,
    css_base64: String,
    image_base64s: BTreeMap<String, String>,
}

/// `GET /bundle/{id}`: the stored payloads
pub async fn bundle_assets(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BundleAssets>> {
    let document = blocking(move || state.repo.document(&id)).await?;
    Ok(Json(BundleAssets {
        html_base64: document.html_base64,
        css_base64: document.css_base64,
        image_base64s: document.image_base64s,
    }))
}

/// `GET /bundle/{id}/html`: HTML with server-relative asset URLs
pub async fn bundle_html(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let bundle = blocking(move || state.repo.load(&id)).await?;
    Ok(Html(rewrite::rewrite_bundle_for_server(&bundle).html))
}

/// `GET /bundle/{id}/package`: the zip archive as a download
pub async fn bundle_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let (stem, digest, archive) = blocking(move || {
        let bundle = state.repo.load(&id)?;
        let entries = package::entries(&bundle)?;
        let digest = hash::package_digest(&entries);
        let archive = package::write_archive(&entries)?;
        Ok((bundle.package_stem().to_string(), digest, archive))
    })
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.zip\"", stem.replace('"', "_")),
            ),
            (header::ETAG, format!("\"{digest}\"")),
        ],
        archive,
    )
        .into_response())
}

/// `GET /bundle/{id}/dimensions`
pub async fn bundle_dimensions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RenderDimensions>> {
    let bundle = blocking(move || state.repo.load(&id)).await?;
    Ok(Json(extract_dimensions(&bundle.html)))
}

/// `POST /save`
pub async fn save(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveItem>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(item) = payload?;
    blocking(move || save_one(&state.repo, &item)).await?;
    Ok(Json(json!({ "message": SAVED_MESSAGE })))
}

#[derive(Debug, Deserialize)]
pub struct SaveAllRequest {
    #[serde(default)]
    items: Vec<SaveItem>,
}

/// `POST /save-all`: every item is attempted; failures are reported, not fatal
pub async fn save_all(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveAllRequest>, JsonRejection>,
) -> Result<Json<SaveReport>> {
    let Json(body) = payload?;
    Ok(Json(save_many(&state.repo, body.items).await))
}

/// One row of the bundle listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub folder: String,
    pub url: String,
}

impl ListEntry {
    pub fn for_bundle(bundle: &Bundle) -> Self {
        Self {
            name: bundle.display_name().to_string(),
            folder: bundle.folder().to_string(),
            url: format!(
                "/bundle/{}/html",
                utf8_percent_encode(&bundle.id, COMPONENT)
            ),
        }
    }
}

/// `GET /list[?sessionId=]`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<ListEntry>>> {
    let session = query.session().map(ToString::to_string);
    let bundles = blocking(move || state.repo.list(session.as_deref())).await?;
    Ok(Json(bundles.iter().map(ListEntry::for_bundle).collect()))
}

#[derive(Debug, Serialize)]
pub struct PreviewDocument {
    id: String,
    #[serde(flatten)]
    document: StoredDocument,
}

#[derive(Debug, Serialize)]
pub struct PreviewList {
    previews: Vec<PreviewDocument>,
}

/// `GET /preview?sessionId=`
pub async fn preview(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<PreviewList>> {
    let session = query
        .session()
        .map(ToString::to_string)
        .ok_or_else(|| request::invalid("Missing sessionId parameter"))?;
    let documents = {
        let session = session.clone();
        blocking(move || state.repo.session_documents(&session)).await?
    };
    if documents.is_empty() {
        return Err(bundle::no_previews(session));
    }
    let previews = documents
        .into_iter()
        .map(|(id, document)| PreviewDocument { id, document })
        .collect();
    Ok(Json(PreviewList { previews }))
}

/// `GET /preview/{session_id}/page`: one sandboxed frame per bundle
pub async fn preview_page(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Html<String>> {
    let session = session_id.clone();
    let bundles = blocking(move || state.repo.list(Some(&session))).await?;
    if bundles.is_empty() {
        return Err(bundle::no_previews(session_id));
    }
    let frames: Vec<PreviewFrame> = bundles.iter().map(PreviewFrame::for_bundle).collect();
    Ok(Html(render_page(&format!("Previews: {session_id}"), &frames)))
}

/// `GET /asset/{*path}`
pub async fn asset(State(state): State<AppState>, Path(path): Path<String>) -> Result<Response> {
    let asset = parse_asset_path(&path)?;
    let (bytes, content_type) = blocking(move || {
        let owner = state
            .repo
            .find(asset.bundle_id())?
            .ok_or_else(|| bundle::asset_not_found(&path))?;
        asset.resolve(&owner, &path)
    })
    .await?;
    let etag = format!("\"{}\"", hash::content_digest(&bytes));
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::ETAG, etag),
        ],
        bytes,
    )
        .into_response())
}

/// `POST /clear-output`
pub async fn clear_output(State(state): State<AppState>) -> Result<Json<Value>> {
    let removed = blocking(move || state.repo.clear()).await?;
    tracing::info!(removed, "cleared stored bundles");
    Ok(Json(json!({ "message": CLEARED_MESSAGE })))
}
