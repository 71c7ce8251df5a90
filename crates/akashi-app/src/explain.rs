//! The `explain` use case.
//!
//! Identifiers are check ids, finding codes, or a direction given as `create`,
//! `delete`, `update` or its ruleset section key (`created_resources`, ...).

use akashi_domain::comparer::Direction;
use akashi_domain::diff;
use akashi_types::explain::{self, Explanation};
use akashi_types::ids;

const DIRECTIONS: [Direction; 3] = [Direction::Create, Direction::Delete, Direction::Update];

/// Codes any comparison section can report; `no_matching_rule` is listed last.
const SECTION_CODES: [&str; 6] = [
    ids::CODE_FAILED_ARGUMENT,
    ids::CODE_MISSING_ENFORCED_ARGUMENT,
    ids::CODE_EXTRA_ARGUMENT,
    ids::CODE_MISSING_IGNORED_ARGUMENT,
    ids::CODE_AUTO_FAIL,
    ids::CODE_NO_MATCHING_RULE,
];

/// Where an explained identifier sits in a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topic {
    /// A check id, one per direction.
    Check { direction: Direction },
    /// A finding code and the diff heading it is rendered under, if any.
    Code { heading: Option<&'static str> },
}

#[derive(Clone, Debug)]
pub struct ExplainedTopic {
    pub id: &'static str,
    pub topic: Topic,
    pub explanation: Explanation,
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(ExplainedTopic),
    NotFound {
        identifier: String,
        /// Known ids containing the identifier.
        suggestions: Vec<&'static str>,
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let wanted = identifier.trim().to_ascii_lowercase();

    let found = direction_alias(&wanted)
        .map(|direction| (direction.check_id(), Topic::Check { direction }))
        .or_else(|| {
            DIRECTIONS
                .iter()
                .find(|d| d.check_id() == wanted)
                .map(|&direction| (direction.check_id(), Topic::Check { direction }))
        })
        .or_else(|| {
            SECTION_CODES.iter().find(|c| **c == wanted).map(|&code| {
                (
                    code,
                    Topic::Code {
                        heading: diff_heading(code),
                    },
                )
            })
        });

    match found.and_then(|(id, topic)| {
        explain::lookup_explanation(id).map(|explanation| ExplainedTopic {
            id,
            topic,
            explanation,
        })
    }) {
        Some(topic) => ExplainOutput::Found(topic),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            suggestions: suggestions(&wanted),
        },
    }
}

fn direction_alias(wanted: &str) -> Option<Direction> {
    DIRECTIONS
        .into_iter()
        .find(|d| d.as_str() == wanted || d.section_key() == wanted)
}

fn diff_heading(code: &str) -> Option<&'static str> {
    match code {
        ids::CODE_FAILED_ARGUMENT => Some(diff::FAILED_ARGUMENTS_HEADING),
        ids::CODE_MISSING_ENFORCED_ARGUMENT => Some(diff::MISSING_ENFORCED_HEADING),
        ids::CODE_EXTRA_ARGUMENT => Some(diff::EXTRA_ARGUMENTS_HEADING),
        ids::CODE_MISSING_IGNORED_ARGUMENT => Some(diff::MISSING_ARGUMENTS_HEADING),
        ids::CODE_AUTO_FAIL => Some(diff::AUTO_FAIL_NOTICE),
        _ => None,
    }
}

fn suggestions(wanted: &str) -> Vec<&'static str> {
    if wanted.is_empty() {
        return Vec::new();
    }
    DIRECTIONS
        .iter()
        .map(|d| d.check_id())
        .chain(SECTION_CODES)
        .filter(|id| id.contains(wanted))
        .collect()
}

pub fn format_explanation(explained: &ExplainedTopic) -> String {
    let exp = &explained.explanation;
    let mut lines = vec![
        format!("{} ({})", exp.title, explained.id),
        "=".repeat(exp.title.chars().count() + explained.id.chars().count() + 3),
        String::new(),
    ];

    match explained.topic {
        Topic::Check { direction } => {
            lines.push(format!(
                "Ruleset section: [{}], evaluated for `{}` changes",
                direction.section_key(),
                direction.as_str()
            ));
            lines.push(format!("Codes: {}", SECTION_CODES.join(", ")));
        }
        Topic::Code { heading: Some(heading) } => {
            lines.push(format!("Diff heading: {heading}"));
        }
        Topic::Code { heading: None } => {
            lines.push("Report line: `<address> (no matching rule)`".to_string());
        }
    }
    lines.push(String::new());

    lines.push(exp.description.to_string());
    lines.push(String::new());
    lines.push("Remediation:".to_string());
    lines.extend(exp.remediation.lines().map(|l| format!("  {l}")));
    lines.push(String::new());

    push_toml_block(&mut lines, "Ruleset that reports it:", exp.examples.before);
    lines.push(String::new());
    push_toml_block(&mut lines, "Ruleset that passes:", exp.examples.after);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_toml_block(lines: &mut Vec<String>, label: &str, body: &str) {
    lines.push(label.to_string());
    lines.push("```toml".to_string());
    lines.extend(body.lines().map(str::to_string));
    lines.push("```".to_string());
}

pub fn format_not_found(identifier: &str, suggestions: &[&'static str]) -> String {
    let mut lines = vec![format!("Unknown check_id or code: {identifier}")];

    if !suggestions.is_empty() {
        lines.push(String::new());
        lines.push(format!("Did you mean: {}", suggestions.join(", ")));
    }

    lines.push(String::new());
    lines.push("Checks by direction:".to_string());
    for d in DIRECTIONS {
        lines.push(format!(
            "  {:<7} {:<26} [{}]",
            d.as_str(),
            d.check_id(),
            d.section_key()
        ));
    }

    lines.push(String::new());
    lines.push("Codes:".to_string());
    for code in SECTION_CODES {
        match diff_heading(code) {
            Some(heading) => lines.push(format!("  {code:<26} {heading}")),
            None => lines.push(format!("  {code}")),
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
