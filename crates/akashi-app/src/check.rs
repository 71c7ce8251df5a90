//! The `check` use case: evaluate a plan against a ruleset and produce a report.

use akashi_domain::comparer::{OutcomeStatus, ResourceOutcome};
use akashi_domain::report::DomainReport;
use akashi_settings::{Overrides, RulesetFormat};
use akashi_types::{
    AkashiData, AkashiReport, ResourceResult, ResultStatus, SCHEMA_REPORT_V1, ToolMeta, Verdict,
    saturating_count,
};
use anyhow::Context;
use camino::Utf8Path;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Where the inputs came from; recorded in the report only.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputPaths<'a> {
    pub ruleset: Option<&'a Utf8Path>,
    pub plan: Option<&'a Utf8Path>,
}

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    pub ruleset_text: &'a str,
    pub ruleset_format: RulesetFormat,
    /// `terraform show -json` output.
    pub plan_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    pub paths: InputPaths<'a>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: AkashiReport,
    /// Structured outcomes the report was built from.
    pub domain: DomainReport,
}

/// Run the check use case: parse the ruleset and plan, evaluate, produce a report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = akashi_settings::parse_ruleset(input.ruleset_text, input.ruleset_format)
        .context("parse ruleset")?;
    let resolved = akashi_settings::resolve_ruleset(cfg, input.overrides.clone())
        .context("resolve ruleset")?;
    let changes = akashi_plan::parse_plan_json(input.plan_text).context("parse plan")?;

    info!(
        rules = resolved.rules_total(),
        resource_changes = changes.len(),
        "evaluating plan"
    );

    let domain = akashi_domain::evaluate(&changes, &resolved.ruleset);
    for o in &domain.outcomes {
        debug!(
            address = %o.address,
            direction = o.direction.as_str(),
            status = ?o.status,
            matched_by = o.matched_by.map(|m| m.as_str()),
            "resource evaluated"
        );
    }

    let finished_at = OffsetDateTime::now_utc();
    let report = AkashiReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "akashi".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: domain.verdict,
        resources: domain.outcomes.iter().map(resource_result).collect(),
        findings: domain.findings.clone(),
        data: AkashiData {
            ruleset: input.paths.ruleset.map(|p| p.to_string()),
            plan: input.paths.plan.map(|p| p.to_string()),
            resources_total: domain.resources_total,
            results_total: saturating_count(domain.outcomes.len()),
            passed: domain.counts.passed,
            failed: domain.counts.failed,
            unmatched: domain.counts.unmatched,
            skipped: domain.counts.skipped,
            findings_total: saturating_count(domain.findings.len()),
        },
    };

    info!(
        verdict = ?report.verdict,
        passed = domain.counts.passed,
        failed = domain.counts.failed,
        unmatched = domain.counts.unmatched,
        skipped = domain.counts.skipped,
        "check finished"
    );

    Ok(CheckOutput { report, domain })
}

fn resource_result(o: &ResourceOutcome) -> ResourceResult {
    ResourceResult {
        address: o.address.clone(),
        direction: o.direction.as_str().to_string(),
        status: match o.status {
            OutcomeStatus::Pass => ResultStatus::Pass,
            OutcomeStatus::Fail => ResultStatus::Fail,
            OutcomeStatus::Unmatched => ResultStatus::Unmatched,
            OutcomeStatus::Skipped => ResultStatus::Skipped,
        },
        passed: o.passed(),
        matched_by: o.matched_by.map(|m| m.as_str().to_string()),
        diff: o.diff(),
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
