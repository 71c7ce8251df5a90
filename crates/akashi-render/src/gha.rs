use crate::{RenderableReport, RenderableStatus};

/// Render failing and unmatched resources as GitHub Actions workflow commands.
///
/// Format:
/// `::{level} title={address}::{diff}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for r in &report.resources {
        let (level, message) = match r.status {
            RenderableStatus::Pass | RenderableStatus::Skipped => continue,
            RenderableStatus::Fail => ("error", r.diff.clone()),
            RenderableStatus::Unmatched => {
                let level = if r.passed { "warning" } else { "error" };
                (level, format!("no rule matches {} ({})", r.address, r.direction))
            }
        };

        out.push(format!(
            "::{} title={}::{}",
            level,
            escape_property(&r.address),
            escape_data(&message)
        ));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
