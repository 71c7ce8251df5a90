use crate::{RenderableReport, RenderableResource, RenderableStatus, RenderableVerdictStatus};
use colored::Colorize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextOptions {
    pub color: bool,
    /// Hide resources that passed, including lenient misses.
    pub errors_only: bool,
}

/// Terminal report: one block per resource, then a summary line.
pub fn render_text(report: &RenderableReport, options: TextOptions) -> String {
    let mut out = String::new();

    for r in &report.resources {
        if options.errors_only && r.passed {
            continue;
        }
        out.push_str(&paint_headline(r, options.color));
        out.push('\n');
        if !r.diff.is_empty() {
            out.push_str(&r.diff);
            out.push('\n');
        }
    }

    let d = &report.data;
    let summary = format!(
        "akashi: {} ({} resources: {} passed, {} failed, {} unmatched, {} skipped)",
        report.verdict.label(),
        d.resources_total,
        d.passed,
        d.failed,
        d.unmatched,
        d.skipped
    );
    if options.color {
        let painted = match report.verdict {
            RenderableVerdictStatus::Pass => summary.green(),
            RenderableVerdictStatus::Warn => summary.yellow(),
            RenderableVerdictStatus::Fail => summary.red(),
        };
        out.push_str(&painted.bold().to_string());
    } else {
        out.push_str(&summary);
    }
    out.push('\n');

    out
}

fn paint_headline(r: &RenderableResource, color: bool) -> String {
    let line = r.headline();
    if !color {
        return line;
    }
    match r.status {
        RenderableStatus::Pass => line.green().to_string(),
        RenderableStatus::Fail => line.red().to_string(),
        RenderableStatus::Unmatched if r.passed => line.yellow().to_string(),
        RenderableStatus::Unmatched => line.red().to_string(),
        RenderableStatus::Skipped => line.dimmed().to_string(),
    }
}
