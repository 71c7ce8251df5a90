//! Use case orchestration for akashi.
//!
//! This crate provides the application layer: use cases that coordinate the settings, plan,
//! domain, and render layers. The CLI crate depends on this; it only handles argument parsing
//! and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;

pub use check::{CheckInput, CheckOutput, InputPaths, run_check, verdict_exit_code};
pub use explain::{
    ExplainOutput, ExplainedTopic, Topic, format_explanation, format_not_found, run_explain,
};
pub use render::{render_annotations, render_markdown, render_text};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
