use akashi_render::{
    RenderableData, RenderableReport, RenderableResource, RenderableStatus,
    RenderableVerdictStatus,
};
use akashi_types::{
    AkashiData, AkashiReport, Finding, ResultStatus, SCHEMA_REPORT_V1, Severity, ToolMeta,
    Verdict, ids,
};
use anyhow::Context;
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<AkashiReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse akashi report")
}

pub fn serialize_report(report: &AkashiReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &AkashiReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        resources: report
            .resources
            .iter()
            .map(|r| RenderableResource {
                address: r.address.clone(),
                direction: r.direction.clone(),
                status: match r.status {
                    ResultStatus::Pass => RenderableStatus::Pass,
                    ResultStatus::Fail => RenderableStatus::Fail,
                    ResultStatus::Unmatched => RenderableStatus::Unmatched,
                    ResultStatus::Skipped => RenderableStatus::Skipped,
                },
                passed: r.passed,
                matched_by: r.matched_by.clone(),
                diff: r.diff.clone(),
            })
            .collect(),
        data: RenderableData {
            resources_total: report.data.resources_total,
            passed: report.data.passed,
            failed: report.data.failed,
            unmatched: report.data.unmatched,
            skipped: report.data.skipped,
        },
    }
}

/// A failing report for errors that stopped the check before any evaluation.
pub fn runtime_error_report(message: &str) -> AkashiReport {
    let now = OffsetDateTime::now_utc();
    AkashiReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "akashi".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        resources: Vec::new(),
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            address: None,
            attribute: None,
            help: Some("Fix the tool error and re-run akashi.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: AkashiData {
            findings_total: 1,
            ..AkashiData::default()
        },
    }
}
