//! Package assembly: the downloadable archive form of a bundle
//!
//! Layout:
//!
//! ```text
//! index.html       (HTML with server-relative asset URLs)
//! css/style.css      (only when the bundle has CSS)
//! images/<name>      (one per image payload, sorted by name)
//! ```
//!
//! Membership (entry names and contents) is a pure function of the bundle;
//! compression metadata is not.

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::domain::Bundle;
use crate::error::{Result, package};
use crate::rewrite;
use crate::rewrite::grammar::{IMAGES_DIR, STYLESHEET_PATH};

/// Archive entry holding the document
pub const INDEX_ENTRY: &str = "index.html";

/// One archive member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub contents: Vec<u8>,
}

/// Compute the archive membership of a bundle.
///
/// Fails on the first image whose payload cannot be decoded, naming it;
/// nothing is silently dropped.
pub fn entries(bundle: &Bundle) -> Result<Vec<PackageEntry>> {
    let mut entries = Vec::with_capacity(bundle.images.len() + 2);
    entries.push(PackageEntry {
        name: INDEX_ENTRY.to_string(),
        contents: rewrite::rewrite_bundle_for_server(bundle).html.into_bytes(),
    });

    if bundle.has_stylesheet() {
        entries.push(PackageEntry {
            name: STYLESHEET_PATH.to_string(),
            contents: bundle.css.as_bytes().to_vec(),
        });
    }

    for (name, payload) in &bundle.images {
        entries.push(PackageEntry {
            name: format!("{IMAGES_DIR}{name}"),
            contents: payload.decode(name)?,
        });
    }

    Ok(entries)
}

/// Assemble a bundle into zip archive bytes
pub fn assemble(bundle: &Bundle) -> Result<Vec<u8>> {
    let entries = entries(bundle)?;
    write_archive(&entries)
}

/// Zip already computed entries in order
pub fn write_archive(entries: &[PackageEntry]) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        writer.start_file(entry.name.as_str(), options)?;
        writer
            .write_all(&entry.contents)
            .map_err(|e| package::assembly_failed(format!("{}: {e}", entry.name)))?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
