//! Normalizer — turns raw Cowrie log lines into [`EventRecord`] values.
//!
//! Each non-blank line is parsed on its own as a JSON object. Blank lines are
//! skipped silently. A line that fails to parse is reported with a `warn!`
//! diagnostic, kept in [`Normalized::rejected`], and left out of the output;
//! the batch always continues.

use crate::error::{Error, Result};
use crate::types::EventRecord;
use std::path::Path;

/// Outcome of normalising one batch of lines.
#[derive(Debug, Default)]
pub struct Normalized {
    /// Successfully parsed records, in input line order.
    pub records: Vec<EventRecord>,
    /// One [`Error::MalformedRecord`] per rejected line, in input line order.
    pub rejected: Vec<Error>,
}

impl Normalized {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }
}

/// Parse a single raw line. `line` is 1-based and only used for diagnostics.
///
/// Returns `None` for empty or whitespace-only lines.
pub fn parse_line(line: usize, raw: &str) -> Option<Result<EventRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        serde_json::from_str::<EventRecord>(trimmed).map_err(|e| Error::MalformedRecord {
            line,
            reason: e.to_string(),
        }),
    )
}

/// Normalise a sequence of raw lines.
pub fn normalize_lines<I>(lines: I) -> Normalized
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| parse_line(idx + 1, raw.as_ref()))
        .fold(Normalized::default(), |mut acc, parsed| {
            match parsed {
                Ok(record) => acc.records.push(record),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping bad line");
                    acc.rejected.push(err);
                }
            }
            acc
        })
}

/// Read `path` in full and normalise its lines.
///
/// Bytes that are not valid UTF-8 are replaced (lossy conversion) so one
/// corrupt line cannot abort the batch; such a line usually fails JSON
/// parsing afterwards and is rejected like any other.
pub fn normalize_file(path: &Path) -> Result<Normalized> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let normalized = normalize_lines(bytes.split(|b| *b == b'\n').map(String::from_utf8_lossy));
    tracing::info!(
        path = %path.display(),
        accepted = normalized.accepted(),
        rejected = normalized.rejected.len(),
        "normalised raw log"
    );
    Ok(normalized)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
