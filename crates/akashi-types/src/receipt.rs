use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for akashi reports.
pub const SCHEMA_REPORT_V1: &str = "akashi.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

/// Outcome of evaluating one resource change in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pass,
    Fail,
    /// No rule matched the resource. Counts as a failure only in strict sections.
    Unmatched,
    /// The ruleset has no section for this change direction.
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceResult {
    pub address: String,
    /// `create`, `delete` or `update`.
    pub direction: String,
    pub status: ResultStatus,
    /// Whether this result counts as passing. Differs from `status` only for unmatched
    /// resources in non-strict sections.
    pub passed: bool,

    /// Which rule key selected the rule: `type_and_name`, `name` or `type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<String>,

    /// Plain-text attribute diff, empty for passing resources.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub diff: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    /// Resource address the finding is about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Attribute name, for attribute-level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `direction + code + address + attribute`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Code-specific structured payload (expected/actual values and the like).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Clamp a length into the report's `u32` counters.
pub fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Akashi-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct AkashiData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    /// Resource changes read from the plan.
    pub resources_total: u32,
    /// Results produced (a replaced resource yields two).
    pub results_total: u32,

    pub passed: u32,
    pub failed: u32,
    pub unmatched: u32,
    pub skipped: u32,

    pub findings_total: u32,
}

/// The report envelope.
///
/// Keeping this generic allows embedding tool-specific data while still enforcing a stable
/// outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = AkashiData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    #[serde(default)]
    pub resources: Vec<ResourceResult>,
    #[serde(default)]
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type AkashiReport = ReportEnvelope<AkashiData>;
