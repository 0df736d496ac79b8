use anyhow::Context;
use cloudguard_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableSummary, RenderableVerdictStatus,
};
use cloudguard_types::{
    CloudguardData, CloudguardReport, Finding, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, Severity,
    ToolMeta, Verdict, VerdictCounts, VerdictStatus, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<CloudguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    let report: CloudguardReport =
        serde_json::from_value(value).context("parse cloudguard report")?;
    Ok(report)
}

pub fn serialize_report(report: &CloudguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &CloudguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Warn => RenderableVerdictStatus::Warn,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
            summary: report.data.summary.as_ref().map(|s| RenderableSummary {
                resources_scanned: s.resources_scanned,
                total_violations: s.total_violations,
                compliance_score: s.compliance_score.clone(),
            }),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            service: loc.service.to_string(),
            resource_id: loc.resource_id.clone(),
        }),
        help: f.help.clone(),
    }
}

/// A failing report carrying a single `tool.runtime` finding.
///
/// Written when the check could not run, so downstream consumers still get a receipt.
pub fn runtime_error_report(message: &str) -> CloudguardReport {
    let now = OffsetDateTime::now_utc();

    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta::cloudguard(env!("CARGO_PKG_VERSION")),
        run: RunMeta {
            started_at: now,
            ended_at: Some(now),
            duration_ms: Some(0),
        },
        verdict: Verdict {
            status: VerdictStatus::Fail,
            counts: VerdictCounts {
                error: 1,
                ..VerdictCounts::default()
            },
            reasons: vec![ids::CODE_RUNTIME_ERROR.to_string()],
        },
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run cloudguard.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: CloudguardData {
            profile: "unknown".to_string(),
            resources_scanned: 0,
            findings_total: 1,
            findings_emitted: 1,
            truncated_reason: None,
            summary: None,
        },
    }
}
