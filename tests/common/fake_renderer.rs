//! RecordingRenderer — a [`ChartRenderer`] that keeps every chart it is
//! handed instead of drawing it.
//!
//! Lets harnesses assert on exactly what the pipeline would have rendered
//! without touching plotters or the filesystem.

use honeyplot_core::{Chart, ChartRenderer, ViewKind};
use std::path::PathBuf;

#[derive(Default)]
pub struct RecordingRenderer {
    pub charts: Vec<Chart>,
    /// Fail on this view, to exercise error propagation.
    pub fail_on: Option<ViewKind>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(view: ViewKind) -> Self {
        Self {
            charts: Vec::new(),
            fail_on: Some(view),
        }
    }

    pub fn views(&self) -> Vec<ViewKind> {
        self.charts.iter().map(|c| c.view).collect()
    }

    pub fn chart(&self, view: ViewKind) -> Option<&Chart> {
        self.charts.iter().find(|c| c.view == view)
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &Chart) -> anyhow::Result<PathBuf> {
        if self.fail_on == Some(chart.view) {
            anyhow::bail!("refusing to render {}", chart.view);
        }
        self.charts.push(chart.clone());
        Ok(PathBuf::from(format!("{}.fake", chart.view.artifact_name())))
    }
}
