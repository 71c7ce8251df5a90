//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after ruleset examples.
    pub examples: ExamplePair,
}

/// Before and after ruleset examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Ruleset that would produce a finding.
    pub before: &'static str,
    /// Ruleset that passes.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_PLAN_CREATED => Some(explain_created_resources()),
        ids::CHECK_PLAN_DESTROYED => Some(explain_destroyed_resources()),
        ids::CHECK_PLAN_UPDATED => Some(explain_updated_resources()),

        // Codes
        ids::CODE_FAILED_ARGUMENT => Some(explain_failed_argument()),
        ids::CODE_MISSING_ENFORCED_ARGUMENT => Some(explain_missing_enforced_argument()),
        ids::CODE_EXTRA_ARGUMENT => Some(explain_extra_argument()),
        ids::CODE_MISSING_IGNORED_ARGUMENT => Some(explain_missing_ignored_argument()),
        ids::CODE_AUTO_FAIL => Some(explain_auto_fail()),
        ids::CODE_NO_MATCHING_RULE => Some(explain_no_matching_rule()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_PLAN_CREATED,
        ids::CHECK_PLAN_DESTROYED,
        ids::CHECK_PLAN_UPDATED,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_FAILED_ARGUMENT,
        ids::CODE_MISSING_ENFORCED_ARGUMENT,
        ids::CODE_EXTRA_ARGUMENT,
        ids::CODE_MISSING_IGNORED_ARGUMENT,
        ids::CODE_AUTO_FAIL,
        ids::CODE_NO_MATCHING_RULE,
    ]
}

// --- Check-level explanations ---

fn explain_created_resources() -> Explanation {
    Explanation {
        title: "Created Resources",
        description: "\
Validates every resource the plan would create against the `created_resources` section.

The rule for a resource is picked by the most specific key: `type` and `name` together,
then `name` alone, then `type` alone. The proposed after-state is compared attribute by
attribute: enforced attributes must equal the expected value, ignored attributes may hold
anything, and any other attribute is an extra argument.",
        remediation: "\
Either change the Terraform configuration so the planned values match the rule, or update
the rule to describe the values you intend to allow.",
        examples: ExamplePair {
            before: r#"[[created_resources.resources]]
type = "google_storage_bucket"

[created_resources.resources.enforced]
location = "EU""#,
            after: r#"[[created_resources.resources]]
type = "google_storage_bucket"
ignored = ["labels", "name"]

[created_resources.resources.enforced]
location = "US""#,
        },
    }
}

fn explain_destroyed_resources() -> Explanation {
    Explanation {
        title: "Destroyed Resources",
        description: "\
Validates every resource the plan would destroy against the `destroyed_resources` section.

The comparison runs on the before-state, so a rule can pin which instances are allowed to
be deleted. Use `auto_fail` to make a resource type undeletable.",
        remediation: "\
If the deletion is unintended, fix the Terraform configuration (or add `prevent_destroy`).
If it is intended, add or relax a rule in `destroyed_resources`.",
        examples: ExamplePair {
            before: r#"[[destroyed_resources.resources]]
type = "google_sql_database_instance"

[destroyed_resources.resources.options]
auto_fail = true"#,
            after: r#"[[destroyed_resources.resources]]
type = "google_sql_database_instance"
name = "scratch"
ignored = ["settings"]"#,
        },
    }
}

fn explain_updated_resources() -> Explanation {
    Explanation {
        title: "Updated Resources",
        description: "\
Validates every resource the plan would update in place against the `updated_resources`
section.

Only attributes whose value changes (plus attributes that become unknown until apply) are
compared, so a rule describes which changes are allowed rather than the full resource.",
        remediation: "\
Allow the changing attributes by listing them under `ignored`, pin their new value under
`enforced`, or revert the change in the Terraform configuration.",
        examples: ExamplePair {
            before: r#"[[updated_resources.resources]]
type = "google_compute_instance"
ignored = ["labels"]"#,
            after: r#"[[updated_resources.resources]]
type = "google_compute_instance"
ignored = ["labels", "metadata"]"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_failed_argument() -> Explanation {
    Explanation {
        title: "Failed Argument",
        description: "\
An enforced attribute is present but its planned value differs from the expected value.

Values are compared exactly. Attributes that are only known after apply are treated as
matching, because their value cannot be verified from the plan.",
        remediation: "\
Set the attribute to the expected value in the Terraform configuration, or update the
expected value in the rule.",
        examples: ExamplePair {
            before: r#"[created_resources.resources.enforced]
storage_class = "STANDARD"
# plan: storage_class = "NEARLINE""#,
            after: r#"[created_resources.resources.enforced]
storage_class = "NEARLINE""#,
        },
    }
}

fn explain_missing_enforced_argument() -> Explanation {
    Explanation {
        title: "Missing Enforced Argument",
        description: "\
An enforced attribute does not appear in the planned values.

This is only reported when `enforce_all` is set for the rule or its section; otherwise a
missing enforced attribute is tolerated.",
        remediation: "\
Set the attribute explicitly in the Terraform configuration, or turn off `enforce_all`.",
        examples: ExamplePair {
            before: r#"[created_resources.resources.options]
enforce_all = true
# plan does not set `versioning`"#,
            after: r#"[created_resources.resources.options]
enforce_all = false"#,
        },
    }
}

fn explain_extra_argument() -> Explanation {
    Explanation {
        title: "Extra Argument",
        description: "\
The planned values contain an attribute that the rule neither enforces nor ignores.

Extra arguments fail the resource unless `ignore_extra_args` is set.",
        remediation: "\
List the attribute under `ignored` (any value accepted) or `enforced` (value pinned), or
set `ignore_extra_args = true`.",
        examples: ExamplePair {
            before: r#"[[created_resources.resources]]
type = "google_storage_bucket"
ignored = ["name"]"#,
            after: r#"[[created_resources.resources]]
type = "google_storage_bucket"
ignored = ["name", "labels"]"#,
        },
    }
}

fn explain_missing_ignored_argument() -> Explanation {
    Explanation {
        title: "Missing Ignored Argument",
        description: "\
An ignored attribute does not appear in the planned values.

This is only reported when `require_all` is set: every ignored attribute must then be
present, whatever its value.",
        remediation: "\
Set the attribute in the Terraform configuration, drop it from `ignored`, or turn off
`require_all`.",
        examples: ExamplePair {
            before: r#"ignored = ["labels"]

[created_resources.resources.options]
require_all = true"#,
            after: r#"ignored = ["labels"]

[created_resources.resources.options]
require_all = false"#,
        },
    }
}

fn explain_auto_fail() -> Explanation {
    Explanation {
        title: "AutoFail",
        description: "\
The matching rule has `auto_fail` set, so the resource fails regardless of its attributes.

Use it to flag resources that must never pass silently, such as disallowed resource types.",
        remediation: "\
Remove the resource from the Terraform configuration, or change the rule if the resource
is now allowed.",
        examples: ExamplePair {
            before: r#"[[created_resources.resources]]
type = "google_project_iam_binding"

[created_resources.resources.options]
auto_fail = true"#,
            after: r#"[[created_resources.resources]]
type = "google_project_iam_member"
ignored = ["member", "role", "project"]"#,
        },
    }
}

fn explain_no_matching_rule() -> Explanation {
    Explanation {
        title: "No Matching Rule",
        description: "\
No rule in the section matches the resource by type and name, name, or type.

In a `strict` section this fails the resource. Otherwise the resource passes unverified and
is reported as a warning.",
        remediation: "\
Add a rule for the resource, or turn off `strict` for the section.",
        examples: ExamplePair {
            before: r#"[created_resources]
strict = true"#,
            after: r#"[created_resources]
strict = true

[[created_resources.resources]]
type = "google_storage_bucket"
ignored = ["name", "location"]"#,
        },
    }
}
