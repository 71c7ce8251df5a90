use crate::comparer::{OutcomeStatus, ResourceOutcome};
use crate::diff::{DiffSection, format_value};
use crate::fingerprint::fingerprint_for_resource;
use akashi_types::{Finding, Severity, ids};
use serde_json::{Value, json};

/// One finding per failing entry of the outcome; a non-strict miss yields a warning.
pub fn for_outcome(outcome: &ResourceOutcome) -> Vec<Finding> {
    let mut out = Vec::new();

    match outcome.status {
        OutcomeStatus::Pass | OutcomeStatus::Skipped => {}
        OutcomeStatus::Unmatched => {
            let severity = if outcome.strict {
                Severity::Error
            } else {
                Severity::Warning
            };
            out.push(finding(
                outcome,
                severity,
                ids::CODE_NO_MATCHING_RULE,
                None,
                format!("no rule matches {}", outcome.address),
                "Add a rule for this resource or turn off `strict` for the section.",
                Value::Null,
            ));
        }
        OutcomeStatus::Fail => {
            for section in &outcome.sections {
                push_section(outcome, section, &mut out);
            }
        }
    }

    out
}

fn push_section(outcome: &ResourceOutcome, section: &DiffSection, out: &mut Vec<Finding>) {
    match section {
        DiffSection::AutoFail => out.push(finding(
            outcome,
            Severity::Error,
            ids::CODE_AUTO_FAIL,
            None,
            format!("{} is matched by a rule with auto_fail set", outcome.address),
            "Remove the resource or change the rule if it is now allowed.",
            Value::Null,
        )),
        DiffSection::FailedArguments(failed) => {
            for (name, attr) in failed {
                out.push(finding(
                    outcome,
                    Severity::Error,
                    ids::CODE_FAILED_ARGUMENT,
                    Some(name.as_str()),
                    format!(
                        "argument '{}' is {}, expected {}",
                        name,
                        format_value(&attr.actual),
                        format_value(&attr.expected)
                    ),
                    "Set the argument to the expected value or update the rule.",
                    json!({ "expected": attr.expected, "actual": attr.actual }),
                ));
            }
        }
        DiffSection::MissingEnforced(names) => {
            for name in names {
                out.push(finding(
                    outcome,
                    Severity::Error,
                    ids::CODE_MISSING_ENFORCED_ARGUMENT,
                    Some(name.as_str()),
                    format!("enforced argument '{name}' is not set"),
                    "Set the argument explicitly or turn off `enforce_all`.",
                    Value::Null,
                ));
            }
        }
        DiffSection::ExtraArguments(names) => {
            for name in names {
                out.push(finding(
                    outcome,
                    Severity::Error,
                    ids::CODE_EXTRA_ARGUMENT,
                    Some(name.as_str()),
                    format!("argument '{name}' is neither enforced nor ignored"),
                    "List the argument under `ignored` or `enforced`, or set `ignore_extra_args`.",
                    Value::Null,
                ));
            }
        }
        DiffSection::MissingArguments(names) => {
            for name in names {
                out.push(finding(
                    outcome,
                    Severity::Error,
                    ids::CODE_MISSING_IGNORED_ARGUMENT,
                    Some(name.as_str()),
                    format!("ignored argument '{name}' is not set"),
                    "Set the argument, drop it from `ignored`, or turn off `require_all`.",
                    Value::Null,
                ));
            }
        }
    }
}

fn finding(
    outcome: &ResourceOutcome,
    severity: Severity,
    code: &str,
    attribute: Option<&str>,
    message: String,
    help: &str,
    data: Value,
) -> Finding {
    let direction = outcome.direction.as_str();
    Finding {
        severity,
        check_id: outcome.direction.check_id().to_string(),
        code: code.to_string(),
        message,
        address: Some(outcome.address.clone()),
        attribute: attribute.map(str::to_string),
        help: Some(help.to_string()),
        fingerprint: Some(fingerprint_for_resource(
            direction,
            code,
            &outcome.address,
            attribute,
        )),
        data,
    }
}
