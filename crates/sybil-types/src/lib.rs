//! Core data model for sybil-analytics.
//!
//! This crate holds only the product types (events, settings, analysis
//! results) plus small pure helpers. No analysis logic lives here — see
//! `sybil-engine`.

mod error;
mod event;
mod result;
mod settings;

pub use error::{Error, Result};
pub use event::Event;
pub use result::{
    AnalysisResult, Cluster, Edge, GraphElements, Node, Scorecard, Stage, Wave, WaveMethod,
};
pub use settings::Settings;
