//! honeyplot — Cowrie honeypot log normaliser and chart generator.
//!
//! This crate re-exports the core types and adds [`pipeline`], which wires
//! the two phases together the way the `honeyplot` binary runs them.
//!
//! # Architecture
//!
//! ```text
//! raw log ──► normalizer ──► clean document ──► aggregator ──► renderer ──► *.svg
//!            (clean phase)                     (plot phase)
//! ```
//!
//! The clean document on disk is the only boundary between the phases, so
//! either phase can be re-run on its own.

pub mod pipeline;

pub use honeyplot_core::{
    aggregate, config, normalizer, render, store, Aggregator, Chart, ChartRenderer, Error, EventKind,
    EventRecord, ViewData, ViewKind,
};
pub use honeyplot_render::{ChartTheme, SvgRenderer};
