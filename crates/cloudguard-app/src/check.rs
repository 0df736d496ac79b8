//! The `check` use case: evaluate policy and produce a report.

use anyhow::Context;
use cloudguard_domain::Inventory;
use cloudguard_domain::report::DomainReport;
use cloudguard_settings::{Overrides, ResolvedConfig};
use cloudguard_types::{
    CloudguardReport, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictStatus,
};
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    pub inventory: &'a Inventory,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: CloudguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, evaluate policy, attach the summary, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        warn!("no config provided; using strict defaults");
        cloudguard_settings::CloudguardConfigV1::default()
    } else {
        cloudguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = cloudguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    debug!(
        profile = %resolved.effective.profile,
        max_findings = resolved.effective.max_findings,
        "resolved config"
    );

    let summary = cloudguard_domain::summarize(input.inventory, started_at);
    let DomainReport {
        verdict,
        findings,
        data,
        counts,
    } = cloudguard_domain::evaluate(input.inventory, &resolved.effective, Some(summary));
    debug!(
        findings_total = data.findings_total,
        findings_emitted = data.findings_emitted,
        ?verdict,
        "evaluated inventory"
    );

    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    let mut reasons = Vec::new();
    if data.truncated_reason.is_some() {
        reasons.push("truncated".to_string());
    }

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta::cloudguard(env!("CARGO_PKG_VERSION")),
        run: RunMeta {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
        },
        verdict: Verdict {
            status: verdict,
            counts: (&counts).into(),
            reasons,
        },
        findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map a verdict to a process exit code.
pub fn verdict_exit_code(verdict: VerdictStatus) -> i32 {
    match verdict {
        VerdictStatus::Pass => 0,
        VerdictStatus::Warn => 0,
        VerdictStatus::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudguard_types::ids;

    fn check(config_text: &str, overrides: Overrides) -> anyhow::Result<CheckOutput> {
        let inventory = Inventory::workshop();
        run_check(CheckInput {
            inventory: &inventory,
            config_text,
            overrides,
        })
    }

    #[test]
    fn empty_config_uses_defaults() {
        let output = check("", Overrides::default()).expect("run_check");
        assert_eq!(output.resolved_config.effective.profile, "strict");

        let report = output.report;
        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert_eq!(report.tool.name, "cloudguard");
        assert_eq!(report.verdict.status, VerdictStatus::Fail);
        assert_eq!(report.verdict.counts.error, 7);
        assert!(report.verdict.reasons.is_empty());
        assert!(report.run.ended_at.is_some());
    }

    #[test]
    fn summary_rides_along_with_findings() {
        let output = check("profile = \"advisory\"\n", Overrides::default()).unwrap();
        let report = output.report;
        assert_eq!(report.verdict.status, VerdictStatus::Warn);

        let summary = report.data.summary.expect("summary attached");
        assert_eq!(summary.total_violations, 7);
        assert_eq!(summary.compliance_score, "12.5%");
        assert_eq!(summary.timestamp, report.run.started_at);
    }

    #[test]
    fn disabled_checks_leave_summary_untouched() {
        let cfg = r#"
[checks."s3.encryption"]
enabled = false
[checks."s3.versioning"]
enabled = false
[checks."s3.public_access"]
enabled = false
[checks."s3.owner_tag"]
enabled = false
"#;
        let report = check(cfg, Overrides::default()).unwrap().report;
        assert_eq!(report.findings.len(), 3);
        assert!(
            report
                .findings
                .iter()
                .all(|f| f.check_id != ids::CHECK_S3_ENCRYPTION)
        );
        assert_eq!(report.data.summary.unwrap().s3_violations, 4);
    }

    #[test]
    fn overrides_truncate_and_record_reason() {
        let report = check(
            "",
            Overrides {
                profile: Some("warn".to_string()),
                max_findings: Some(1),
            },
        )
        .unwrap()
        .report;
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.data.profile, "warn");
        assert_eq!(report.verdict.status, VerdictStatus::Fail);
        assert_eq!(report.verdict.reasons, vec!["truncated".to_string()]);
    }

    #[test]
    fn bad_config_is_an_error() {
        let err = check("profile = [", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("parse config"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(VerdictStatus::Pass), 0);
        assert_eq!(verdict_exit_code(VerdictStatus::Warn), 0);
        assert_eq!(verdict_exit_code(VerdictStatus::Fail), 2);
    }
}
