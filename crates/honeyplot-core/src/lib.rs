//! honeyplot-core — normalisation and aggregation for Cowrie honeypot logs.
//!
//! This crate exposes the two pipeline stages as public modules, plus the
//! shared types used by both.
//!
//! # Architecture
//!
//! ```text
//! raw lines ──► Normalizer ──► Store (persisted JSON) ──► Aggregator ──► ChartRenderer
//! ```
//!
//! Every stage is synchronous and batch-oriented. The persisted document is
//! the only hand-off between normalisation and aggregation; the aggregator
//! never mutates the records it reads.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod render;
pub mod store;
pub mod types;
pub mod views;

pub use error::{Error, Result};
pub use render::ChartRenderer;
pub use types::{EventKind, EventRecord};
pub use views::{Aggregator, Chart, ViewData, ViewKind};
