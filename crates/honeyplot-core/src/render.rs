//! Rendering seam.
//!
//! The aggregation engine hands each non-empty [`Chart`] to a
//! [`ChartRenderer`] and knows nothing about how it is drawn or where it is
//! stored. `honeyplot-render` provides the SVG implementation; tests use a
//! recording fake.

use crate::views::Chart;
use std::path::PathBuf;

pub trait ChartRenderer {
    /// Draw one chart and return the path of the artifact written.
    fn render(&mut self, chart: &Chart) -> anyhow::Result<PathBuf>;
}

impl<R: ChartRenderer + ?Sized> ChartRenderer for &mut R {
    fn render(&mut self, chart: &Chart) -> anyhow::Result<PathBuf> {
        (**self).render(chart)
    }
}

/// Render every chart in order, stopping at the first failure.
pub fn render_all<R>(renderer: &mut R, charts: &[Chart]) -> anyhow::Result<Vec<PathBuf>>
where
    R: ChartRenderer + ?Sized,
{
    charts
        .iter()
        .map(|chart| {
            let path = renderer.render(chart)?;
            tracing::debug!(view = %chart.view, path = %path.display(), "rendered chart");
            Ok(path)
        })
        .collect()
}
