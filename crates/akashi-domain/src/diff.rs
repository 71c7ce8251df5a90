//! Plain-text rendering of attribute diffs.
//!
//! Headings are stable; downstream tooling greps for them.

use crate::rule::FailedAttribute;
use serde_json::Value;

pub const AUTO_FAIL_NOTICE: &str = "AutoFail set to true";
pub const FAILED_ARGUMENTS_HEADING: &str = "Failed arguments:";
pub const MISSING_ENFORCED_HEADING: &str = "Missing enforced arguments:";
pub const EXTRA_ARGUMENTS_HEADING: &str = "Extra arguments:";
// Reported for missing ignored arguments under `require_all`.
pub const MISSING_ARGUMENTS_HEADING: &str = "Missing enforced and ignored arguments:";

/// One failing part of an attribute comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffSection {
    AutoFail,
    FailedArguments(Vec<(String, FailedAttribute)>),
    MissingEnforced(Vec<String>),
    ExtraArguments(Vec<String>),
    MissingArguments(Vec<String>),
}

impl DiffSection {
    pub fn heading(&self) -> &'static str {
        match self {
            DiffSection::AutoFail => AUTO_FAIL_NOTICE,
            DiffSection::FailedArguments(_) => FAILED_ARGUMENTS_HEADING,
            DiffSection::MissingEnforced(_) => MISSING_ENFORCED_HEADING,
            DiffSection::ExtraArguments(_) => EXTRA_ARGUMENTS_HEADING,
            DiffSection::MissingArguments(_) => MISSING_ARGUMENTS_HEADING,
        }
    }

    fn render_into(&self, lines: &mut Vec<String>) {
        lines.push(self.heading().to_string());
        match self {
            DiffSection::AutoFail => {}
            DiffSection::FailedArguments(failed) => {
                for (name, attr) in failed {
                    lines.push(format!("  - {name}"));
                    lines.push(format!("    + Expected: {}", format_value(&attr.expected)));
                    lines.push(format!("    - Actual:   {}", format_value(&attr.actual)));
                }
            }
            DiffSection::MissingEnforced(names)
            | DiffSection::ExtraArguments(names)
            | DiffSection::MissingArguments(names) => {
                lines.extend(names.iter().map(|n| format!("  {n}")));
            }
        }
    }
}

/// Render sections in order, one line per entry, without a trailing newline.
pub fn render_sections(sections: &[DiffSection]) -> String {
    let mut lines = Vec::new();
    for section in sections {
        section.render_into(&mut lines);
    }
    lines.join("\n")
}

/// Strings render bare; everything else as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
