//! honeyplot-render — draws aggregated honeypot views as SVG charts.
//!
//! [`SvgRenderer`] implements [`honeyplot_core::ChartRenderer`]; colours come
//! from a [`ChartTheme`].

pub mod svg;
pub mod theme;

pub use svg::SvgRenderer;
pub use theme::ChartTheme;
