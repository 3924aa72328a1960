//! Phase orchestration shared by the CLI and the integration harnesses.
//!
//! Each phase acquires its files at the start and releases them before its
//! result is returned. [`plot`] reads only the clean document, never the
//! raw log.

use anyhow::Context;
use honeyplot_core::{normalizer, render, store, Aggregator, Chart, ChartRenderer};
use std::path::{Path, PathBuf};

/// Result of the clean phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub output: PathBuf,
}

impl std::fmt::Display for CleanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Saved {} clean events to {}", self.accepted, self.output.display())
    }
}

/// Normalise `raw` and persist the records to `clean`.
pub fn clean(raw: &Path, clean: &Path) -> anyhow::Result<CleanSummary> {
    let normalized = normalizer::normalize_file(raw)
        .with_context(|| format!("normalising {}", raw.display()))?;
    store::write_records(clean, &normalized.records)?;

    Ok(CleanSummary {
        accepted: normalized.accepted(),
        rejected: normalized.rejected.len(),
        output: clean.to_path_buf(),
    })
}

/// Compute every non-empty view from the clean document.
pub fn report(clean: &Path) -> anyhow::Result<Vec<Chart>> {
    let records = store::read_records(clean)?;
    let charts = Aggregator::new(&records)
        .charts()
        .with_context(|| format!("aggregating {}", clean.display()))?;
    tracing::info!(records = records.len(), charts = charts.len(), "aggregated views");
    Ok(charts)
}

/// Compute the views from the clean document and render each non-empty one.
///
/// Nothing is rendered if any view fails to compute.
pub fn plot<R>(clean: &Path, renderer: &mut R) -> anyhow::Result<Vec<PathBuf>>
where
    R: ChartRenderer + ?Sized,
{
    let charts = report(clean)?;
    render::render_all(renderer, &charts)
}
