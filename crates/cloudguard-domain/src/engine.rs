use crate::checks;
use crate::inventory::Inventory;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{DomainReport, SeverityCounts};
use cloudguard_types::{CloudguardData, ComplianceSummary, Finding, Severity, VerdictStatus};

/// Run every enabled check and fold the findings into a verdict.
///
/// `summary` is attached to the data payload untouched; it is computed from
/// the fixed rules, not from the configured checks. Allow patterns should be
/// checked with [`CheckPolicy::allowlist`](crate::policy::CheckPolicy::allowlist)
/// first; an invalid one exempts nothing.
pub fn evaluate(
    inventory: &Inventory,
    cfg: &EffectiveConfig,
    summary: Option<ComplianceSummary>,
) -> DomainReport {
    let mut findings: Vec<Finding> = Vec::new();

    checks::run_all(inventory, cfg, &mut findings);

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    // Verdict and counts cover every finding, including truncated ones.
    let verdict = compute_verdict(&findings, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&findings);

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let data = CloudguardData {
        profile: cfg.profile.clone(),
        resources_scanned: inventory.resource_count() as u32,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
        summary,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> VerdictStatus {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return VerdictStatus::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => VerdictStatus::Fail,
            FailOn::Error => VerdictStatus::Warn,
        };
    }

    VerdictStatus::Pass
}

pub(crate) fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) service, then resource id (missing location last)
    // 3) check_id
    // 4) code
    // 5) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let key = |f: &Finding| match &f.location {
        Some(l) => (0, Some(l.service), l.resource_id.clone()),
        None => (1, None, String::new()),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then_with(|| key(a).cmp(&key(b)))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{all_checks_config, config_with_check};
    use cloudguard_types::{Service, ids};

    #[test]
    fn workshop_fails_under_strict_defaults() {
        let cfg = all_checks_config(Severity::Error, FailOn::Error);
        let report = evaluate(&Inventory::workshop(), &cfg, None);

        assert_eq!(report.verdict, VerdictStatus::Fail);
        assert_eq!(report.findings.len(), 7);
        assert_eq!(report.counts.error, 7);
        assert_eq!(report.data.resources_scanned, 8);
        assert_eq!(report.data.findings_total, 7);
        assert!(report.data.truncated_reason.is_none());
    }

    #[test]
    fn verdict_warn_becomes_fail_when_fail_on_warning() {
        let warn = all_checks_config(Severity::Warning, FailOn::Error);
        assert_eq!(
            evaluate(&Inventory::workshop(), &warn, None).verdict,
            VerdictStatus::Warn
        );

        let strict_warn = all_checks_config(Severity::Warning, FailOn::Warning);
        assert_eq!(
            evaluate(&Inventory::workshop(), &strict_warn, None).verdict,
            VerdictStatus::Fail
        );
    }

    #[test]
    fn info_only_findings_pass() {
        let cfg = all_checks_config(Severity::Info, FailOn::Warning);
        let report = evaluate(&Inventory::workshop(), &cfg, None);
        assert_eq!(report.verdict, VerdictStatus::Pass);
        assert_eq!(report.counts.info, 7);
    }

    #[test]
    fn findings_are_sorted_by_service_then_resource() {
        let cfg = all_checks_config(Severity::Error, FailOn::Error);
        let report = evaluate(&Inventory::workshop(), &cfg, None);
        let order: Vec<(Service, &str, &str)> = report
            .findings
            .iter()
            .map(|f| {
                let loc = f.location.as_ref().unwrap();
                (loc.service, loc.resource_id.as_str(), f.check_id.as_str())
            })
            .collect();

        assert_eq!(
            order,
            vec![
                (Service::S3, "backup-2024", ids::CHECK_S3_OWNER_TAG),
                (Service::S3, "backup-2024", ids::CHECK_S3_VERSIONING),
                (Service::S3, "logs-archive", ids::CHECK_S3_PUBLIC_ACCESS),
                (Service::S3, "prod-customer-data", ids::CHECK_S3_ENCRYPTION),
                (Service::Ec2, "i-1234567890abcdef0", ids::CHECK_EC2_REQUIRED_TAGS),
                (Service::Ec2, "i-1234567890abcdef0", ids::CHECK_EC2_REQUIRED_TAGS),
                (Service::Iam, "AdminAccess", ids::CHECK_IAM_ADMIN_MFA),
            ]
        );
    }

    #[test]
    fn truncation_records_reason() {
        let mut cfg = all_checks_config(Severity::Error, FailOn::Error);
        cfg.max_findings = 2;
        let report = evaluate(&Inventory::workshop(), &cfg, None);
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.data.findings_total, 7);
        assert_eq!(report.data.findings_emitted, 2);
        assert_eq!(
            report.data.truncated_reason.as_deref(),
            Some("findings truncated to max_findings=2")
        );
    }

    #[test]
    fn truncating_everything_still_fails() {
        let mut cfg = all_checks_config(Severity::Error, FailOn::Error);
        cfg.max_findings = 0;
        let report = evaluate(&Inventory::workshop(), &cfg, None);
        assert!(report.findings.is_empty());
        assert_eq!(report.data.findings_total, 7);
        assert_eq!(report.counts.error, 7);
        assert_eq!(report.verdict, VerdictStatus::Fail);
    }

    #[test]
    fn counts_include_truncated_findings() {
        let mut cfg = all_checks_config(Severity::Warning, FailOn::Warning);
        cfg.max_findings = 1;
        let report = evaluate(&Inventory::workshop(), &cfg, None);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.counts.warning, 7);
        assert_eq!(report.verdict, VerdictStatus::Fail);
    }

    #[test]
    fn single_check_config_only_runs_that_check() {
        let cfg = config_with_check(ids::CHECK_IAM_ADMIN_MFA, Severity::Warning);
        let report = evaluate(&Inventory::workshop(), &cfg, None);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].code, ids::CODE_ADMIN_WITHOUT_MFA);
        assert_eq!(report.verdict, VerdictStatus::Warn);
    }
}
