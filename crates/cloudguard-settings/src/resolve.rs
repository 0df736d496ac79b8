use crate::{model::CloudguardConfigV1, presets};
use anyhow::Context;
use cloudguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use cloudguard_types::Severity;
use globset::Glob;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: CloudguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // per-check overrides; ids the engine does not know are carried but never run
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
        if !cc.allow.is_empty() {
            validate_allowlist(check_id, &cc.allow)?;
            entry.allow = cc.allow.clone();
        }
    }

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    Ok(ResolvedConfig { effective })
}

fn validate_allowlist(check_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid allow glob for {check_id}: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use cloudguard_types::ids;

    fn resolve(toml: &str, overrides: Overrides) -> anyhow::Result<EffectiveConfig> {
        let cfg = parse_config_toml(toml)?;
        Ok(resolve_config(cfg, overrides)?.effective)
    }

    #[test]
    fn empty_config_is_strict() {
        let eff = resolve("", Overrides::default()).unwrap();
        assert_eq!(eff.profile, "strict");
        assert_eq!(eff.fail_on, FailOn::Error);
        assert_eq!(eff.max_findings, presets::DEFAULT_MAX_FINDINGS);
        let policy = eff.check_policy(ids::CHECK_S3_ENCRYPTION).unwrap();
        assert_eq!(policy.severity, Severity::Error);
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let eff = resolve(
            "profile = \"warn\"\nmax_findings = 10\n",
            Overrides {
                profile: Some("advisory".to_string()),
                max_findings: Some(3),
            },
        )
        .unwrap();
        assert_eq!(eff.profile, "advisory");
        assert_eq!(eff.fail_on, FailOn::Error);
        assert_eq!(eff.max_findings, 3);
    }

    #[test]
    fn per_check_settings_apply_on_top_of_preset() {
        let eff = resolve(
            r#"
profile = "warn"
fail_on = "error"

[checks."s3.versioning"]
enabled = false

[checks."ec2.required_tags"]
severity = "info"
allow = ["i-legacy-*"]
"#,
            Overrides::default(),
        )
        .unwrap();

        assert_eq!(eff.fail_on, FailOn::Error);
        assert!(eff.check_policy(ids::CHECK_S3_VERSIONING).is_none());
        let tags = eff.check_policy(ids::CHECK_EC2_REQUIRED_TAGS).unwrap();
        assert_eq!(tags.severity, Severity::Info);
        assert_eq!(tags.allow, vec!["i-legacy-*".to_string()]);
        assert_eq!(
            eff.check_policy(ids::CHECK_IAM_ADMIN_MFA).unwrap().severity,
            Severity::Warning
        );
    }

    #[test]
    fn unknown_check_ids_stay_disabled() {
        let eff = resolve(
            "[checks.\"rds.snapshots\"]\nseverity = \"error\"\n",
            Overrides::default(),
        )
        .unwrap();
        assert!(eff.check_policy("rds.snapshots").is_none());
    }

    #[test]
    fn invalid_values_are_rejected_with_context() {
        let err = resolve(
            "[checks.\"s3.encryption\"]\nseverity = \"fatal\"\n",
            Overrides::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid severity for s3.encryption"));

        let err = resolve("fail_on = \"sometimes\"\n", Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("unknown fail_on"));

        let err = resolve(
            "[checks.\"iam.admin_mfa\"]\nallow = [\"[bad\"]\n",
            Overrides::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid allow glob for iam.admin_mfa"));
    }

    #[test]
    fn foreign_schema_is_rejected() {
        let err = parse_config_toml("schema = \"depot.config.v9\"\n").unwrap_err();
        assert!(err.to_string().contains("unsupported config schema"));
        assert!(parse_config_toml("schema = \"cloudguard.config.v1\"\n").is_ok());
    }
}
