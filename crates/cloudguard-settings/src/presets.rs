use cloudguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use cloudguard_types::{Severity, ids};
use std::collections::BTreeMap;

pub const DEFAULT_MAX_FINDINGS: usize = 200;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "warn" => warn_profile(),
        "advisory" => advisory_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: DEFAULT_MAX_FINDINGS,
        checks: default_checks(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        max_findings: DEFAULT_MAX_FINDINGS,
        checks: default_checks(Severity::Warning),
    }
}

fn advisory_profile() -> EffectiveConfig {
    // Everything reported, nothing fails the run.
    EffectiveConfig {
        profile: "advisory".to_string(),
        fail_on: FailOn::Error,
        max_findings: DEFAULT_MAX_FINDINGS,
        checks: default_checks(Severity::Warning),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    ids::ALL_CHECKS
        .iter()
        .map(|id| (id.to_string(), CheckPolicy::enabled(default_severity)))
        .collect()
}
