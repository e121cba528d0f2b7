//! Service layer: the analysis pipeline.
//!
//! The modules here form the pure computation core. Data flows
//! sample store -> `pattern` -> {`classifier`, `scoring`} ->
//! `recommendation` -> `aggregate`, orchestrated per road and per area
//! by `analysis`. Everything below `analysis` is a pure function of its
//! inputs; no clock reads, no I/O, no shared state.

pub mod aggregate;
pub mod analysis;
pub mod classifier;
pub mod pattern;
pub mod recommendation;
pub mod scoring;

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod classifier_tests;

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod aggregate_tests;

pub use aggregate::aggregate_area;
pub use analysis::{
    analyze_area, analyze_road, build_road_analysis, frequency_report, AnalysisError,
};
pub use classifier::{classify, identify_problems, Classification};
pub use pattern::analyze_pattern;
pub use recommendation::generate_recommendations;
pub use scoring::{priority_score, score_tier};
