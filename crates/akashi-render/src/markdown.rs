use crate::{RenderableReport, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Akashi report\n\n");
    let d = &report.data;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Resources: {} ({} passed, {} failed, {} unmatched, {} skipped)\n\n",
        report.verdict.label(),
        d.resources_total,
        d.passed,
        d.failed,
        d.unmatched,
        d.skipped
    ));

    if report.resources.is_empty() {
        out.push_str("No resource changes.\n");
        return out;
    }

    out.push_str("## Resources\n\n");

    for r in &report.resources {
        let suffix = match r.status {
            RenderableStatus::Pass | RenderableStatus::Fail => "",
            RenderableStatus::Unmatched => " (no matching rule)",
            RenderableStatus::Skipped => " (not evaluated)",
        };
        out.push_str(&format!(
            "- {} `{}` ({}){}\n",
            r.glyph(),
            r.address,
            r.direction,
            suffix
        ));
        if let Some(m) = &r.matched_by {
            out.push_str(&format!("  - matched by: {m}\n"));
        }
        if !r.diff.is_empty() {
            out.push_str("\n  ```\n");
            for line in r.diff.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
            out.push_str("  ```\n\n");
        }
    }

    out
}
