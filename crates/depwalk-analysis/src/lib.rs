//! Analyses built on the depwalk visitor walk.
//!
//! The core graph only reports walk events. This crate turns them into
//! results a dependency tool reports:
//! - **Traces**: the ordered event stream of a walk, as text or JSON
//! - **Components**: strongly connected components, i.e. dependency cycles

pub mod components;
pub mod error;
pub mod trace;

pub use components::{
    components_json, dependency_cycles, format_components, strong_components, Component,
};
pub use error::{AnalysisError, Result};
pub use trace::{
    format_trace, record_walk, record_walk_from, trace_json, TraceEvent, TraceRecorder,
};
