//! Store — the persisted record document between normalisation and
//! aggregation.
//!
//! The document is a single JSON array of [`EventRecord`] values with a
//! four-space indent. It is serialised to memory first and written with one
//! `fs::write`, so a reader never sees a half-written array from this crate.

use crate::error::{Error, Result};
use crate::types::EventRecord;
use serde::Serialize;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Serialise `records` in the persisted document format.
pub fn to_document(records: &[EventRecord]) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(
        &mut buf,
        serde_json::ser::PrettyFormatter::with_indent(INDENT),
    );
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// Write the full record sequence to `path`, creating parent directories.
pub fn write_records(path: &Path, records: &[EventRecord]) -> Result<()> {
    let doc = to_document(records).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, doc).map_err(|e| Error::io(path, e))?;

    tracing::info!(path = %path.display(), records = records.len(), "wrote record document");
    Ok(())
}

/// Read a document previously written by [`write_records`].
pub fn read_records(path: &Path) -> Result<Vec<EventRecord>> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
