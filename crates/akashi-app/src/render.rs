//! Render use cases: text, markdown, and GitHub annotations from in-memory reports.

use akashi_render::{RenderableReport, TextOptions};

pub fn render_text(report: &RenderableReport, options: TextOptions) -> String {
    akashi_render::render_text(report, options)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    akashi_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    akashi_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
