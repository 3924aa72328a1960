//! [`SvgRenderer`] — draws each [`Chart`] with `plotters` into
//! `<output_dir>/<artifact>.svg`.
//!
//! | Data | Chart |
//! |------|-------|
//! | frequency table | bar chart, one bar per row |
//! | distribution | 20-bin equal-width histogram |
//! | grouped distribution | one box plot per key |
//! | time series | line with point markers |
//! | split | two-slice pie with percentages |

use crate::theme::ChartTheme;
use anyhow::Context;
use honeyplot_core::aggregate::{FrequencyTable, GroupedDistribution, SessionSplit, TimeBucketSeries};
use honeyplot_core::{Chart, ChartRenderer, ViewData, ViewKind};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

/// Bins used for numeric distributions.
pub const HISTOGRAM_BINS: usize = 20;

const SIZE: (u32, u32) = (1024, 768);
const FONT: &str = "sans-serif";

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

pub struct SvgRenderer {
    output_dir: PathBuf,
    theme: ChartTheme,
}

impl SvgRenderer {
    /// Create the renderer, creating `output_dir` if it does not exist.
    pub fn new(output_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        Self::with_theme(output_dir, ChartTheme::load_default())
    }

    pub fn with_theme(output_dir: impl Into<PathBuf>, theme: ChartTheme) -> anyhow::Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;
        Ok(Self { output_dir, theme })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn artifact_path(&self, view: ViewKind) -> PathBuf {
        self.output_dir.join(format!("{}.svg", view.artifact_name()))
    }
}

impl ChartRenderer for SvgRenderer {
    fn render(&mut self, chart: &Chart) -> anyhow::Result<PathBuf> {
        let path = self.artifact_path(chart.view);
        tracing::debug!(view = %chart.view, path = %path.display(), "drawing svg");
        {
            let root = SVGBackend::new(&path, SIZE).into_drawing_area();
            root.fill(&self.theme.background)?;

            let theme = &self.theme;
            let view = chart.view;
            match &chart.data {
                ViewData::Frequency(rows) => draw_bars(&root, theme, view, rows)?,
                ViewData::Distribution(values) => draw_histogram(&root, theme, view, values)?,
                ViewData::Grouped(groups) => draw_boxplots(&root, theme, view, groups)?,
                ViewData::TimeSeries(series) => draw_line(&root, theme, view, series)?,
                ViewData::Split(split) => draw_pie(&root, theme, view, split)?,
            }

            root.present()
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

fn axis_labels(view: ViewKind) -> (&'static str, &'static str) {
    view.axis_labels().unwrap_or(("", ""))
}

fn draw_bars(root: &Area<'_>, theme: &ChartTheme, view: ViewKind, rows: &FrequencyTable) -> anyhow::Result<()> {
    let (x_desc, y_desc) = axis_labels(view);
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0) as u32;
    let labels: Vec<&str> = rows.iter().map(|(label, _)| label.as_str()).collect();

    let mut chart = ChartBuilder::on(root)
        .caption(view.title(), (FONT, 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..rows.len() as u32).into_segmented(), 0u32..max + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(theme.bar.filled())
            .margin(10)
            .data(rows.iter().enumerate().map(|(i, (_, c))| (i as u32, *c as u32))),
    )?;
    Ok(())
}

/// Split `values` into `bins` equal-width bins.
///
/// Returns `(low, width, counts)`. When every value is equal the range is a
/// unit interval centred on that value. The maximum lands in the last bin.
pub fn bin_values(values: &[f64], bins: usize) -> (f64, f64, Vec<u32>) {
    let mut counts = vec![0u32; bins];
    if values.is_empty() || bins == 0 {
        return (0.0, 1.0, counts);
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (low, high) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
    let width = (high - low) / bins as f64;

    for v in values {
        let idx = (((v - low) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (low, width, counts)
}

fn draw_histogram(root: &Area<'_>, theme: &ChartTheme, view: ViewKind, values: &[f64]) -> anyhow::Result<()> {
    let (x_desc, y_desc) = axis_labels(view);
    let (low, width, counts) = bin_values(values, HISTOGRAM_BINS);
    let high = low + width * HISTOGRAM_BINS as f64;
    let max = counts.iter().copied().max().unwrap_or(0);

    let mut chart = ChartBuilder::on(root)
        .caption(view.title(), (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(low..high, 0u32..max + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    let bins: Vec<[(f64, u32); 2]> = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let x0 = low + width * i as f64;
            [(x0, 0u32), (x0 + width, c)]
        })
        .collect();
    chart.draw_series(bins.iter().map(|&corners| Rectangle::new(corners, theme.bar.filled())))?;
    chart.draw_series(bins.iter().map(|&corners| Rectangle::new(corners, theme.edge.stroke_width(1))))?;
    Ok(())
}

fn draw_boxplots(root: &Area<'_>, theme: &ChartTheme, view: ViewKind, groups: &GroupedDistribution) -> anyhow::Result<()> {
    let (x_desc, y_desc) = axis_labels(view);
    let labels: Vec<&str> = groups.keys().map(String::as_str).collect();
    // Keys with no usable values keep their label but get no box.
    let quartiles: Vec<(u32, Quartiles)> = groups
        .values()
        .enumerate()
        .filter(|(_, v)| !v.is_empty())
        .map(|(i, v)| (i as u32, Quartiles::new(v.as_slice())))
        .collect();
    let (low, high) = y_range(groups.values().flatten().copied());

    let mut chart = ChartBuilder::on(root)
        .caption(view.title(), (FONT, 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..labels.len() as u32).into_segmented(), low..high)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                labels.get(*i as usize).map(|s| s.to_string()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    chart.draw_series(quartiles.iter().map(|(i, q)| {
        Boxplot::new_vertical(SegmentValue::CenterOf(*i), q)
            .width(40)
            .style(theme.boxplot.stroke_width(2))
    }))?;
    Ok(())
}

/// Vertical range covering every value with 10% headroom (plus one unit).
/// Starts at zero unless some value is negative.
pub fn y_range(values: impl IntoIterator<Item = f64>) -> (f32, f32) {
    let (min, max) = values
        .into_iter()
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = (max - min) * 0.1 + 1.0;
    let low = if min < 0.0 { min - pad } else { 0.0 };
    (low as f32, (max + pad) as f32)
}

fn draw_line(root: &Area<'_>, theme: &ChartTheme, view: ViewKind, series: &TimeBucketSeries) -> anyhow::Result<()> {
    let (x_desc, y_desc) = axis_labels(view);
    let labels: Vec<String> = series
        .iter()
        .map(|(hour, _)| hour.format("%Y-%m-%d %H:00").to_string())
        .collect();
    let max = series.iter().map(|(_, c)| *c).max().unwrap_or(0) as u32;
    let points: Vec<(usize, u32)> = series
        .iter()
        .enumerate()
        .map(|(i, (_, c))| (i, *c as u32))
        .collect();

    let mut chart = ChartBuilder::on(root)
        .caption(view.title(), (FONT, 28))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..series.len(), 0u32..max + 1)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(labels.len().min(12))
        .x_label_formatter(&|i: &usize| labels.get(*i).cloned().unwrap_or_default())
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), theme.line.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, theme.line.filled())))?;
    Ok(())
}

fn draw_pie(root: &Area<'_>, theme: &ChartTheme, view: ViewKind, split: &SessionSplit) -> anyhow::Result<()> {
    let (w, h) = root.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2 + 20);
    let radius = f64::from(w.min(h)) * 0.33;
    let total = split.total() as f64;

    root.draw(&Text::new(
        view.title(),
        (20, 20),
        (FONT, 28).into_font().color(&theme.text),
    ))?;

    let slices = [
        ("Quick Disconnects", split.quick, theme.quick),
        ("Long Sessions", split.long, theme.long),
    ];

    let point_at = |angle: f64, r: f64| {
        (
            center.0 + (r * angle.sin()).round() as i32,
            center.1 - (r * angle.cos()).round() as i32,
        )
    };

    let mut start = 0.0f64;
    for (label, count, fill) in slices {
        if count == 0 {
            continue;
        }
        let sweep = count as f64 / total * TAU;
        let steps = ((sweep / TAU) * 180.0).ceil().max(2.0) as usize;

        let mut outline = Vec::with_capacity(steps + 2);
        outline.push(center);
        outline.extend((0..=steps).map(|s| point_at(start + sweep * s as f64 / steps as f64, radius)));
        root.draw(&Polygon::new(outline, fill.filled()))?;

        let pct = count as f64 / total * 100.0;
        root.draw(&Text::new(
            format!("{label} ({pct:.1}%)"),
            point_at(start + sweep / 2.0, radius * 1.15),
            (FONT, 18).into_font().color(&theme.text),
        ))?;
        start += sweep;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
