//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace naming the ruleset section that produced the finding.
//! `code` is a short snake_case discriminator.

// Checks
pub const CHECK_PLAN_CREATED: &str = "plan.created_resources";
pub const CHECK_PLAN_DESTROYED: &str = "plan.destroyed_resources";
pub const CHECK_PLAN_UPDATED: &str = "plan.updated_resources";

// Codes: attribute comparison
pub const CODE_FAILED_ARGUMENT: &str = "failed_argument";
pub const CODE_MISSING_ENFORCED_ARGUMENT: &str = "missing_enforced_argument";
pub const CODE_EXTRA_ARGUMENT: &str = "extra_argument";
pub const CODE_MISSING_IGNORED_ARGUMENT: &str = "missing_ignored_argument";
pub const CODE_AUTO_FAIL: &str = "auto_fail";

// Codes: rule resolution
pub const CODE_NO_MATCHING_RULE: &str = "no_matching_rule";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
