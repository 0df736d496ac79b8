use crate::inventory::Inventory;
use crate::model::{Bucket, Encryption, Instance, InstanceState, Policy, Tags};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn};
use cloudguard_types::{Severity, ids};
use std::collections::BTreeMap;

pub fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn bucket(name: &str, encryption: Option<Encryption>, versioning: bool, blocked: bool, tags: Tags) -> Bucket {
    Bucket {
        name: name.to_string(),
        encryption,
        versioning,
        public_access_blocked: blocked,
        tags,
    }
}

/// A bucket that passes every S3 rule.
pub fn clean_bucket(name: &str) -> Bucket {
    bucket(
        name,
        Some(Encryption::Aes256),
        true,
        true,
        tags(&[("Owner", "team")]),
    )
}

pub fn instance(id: &str, tags: Tags) -> Instance {
    Instance {
        id: id.to_string(),
        name: format!("{id}-name"),
        state: InstanceState::Running,
        tags,
        security_groups: Vec::new(),
    }
}

pub fn policy(name: &str, has_mfa: bool) -> Policy {
    Policy {
        name: name.to_string(),
        arn: format!("arn:aws:iam::123456789012:policy/{name}"),
        attached_to: Vec::new(),
        has_mfa,
    }
}

pub fn inventory(buckets: Vec<Bucket>, instances: Vec<Instance>, policies: Vec<Policy>) -> Inventory {
    Inventory::new(buckets, instances, policies).expect("test inventory keys are unique")
}

pub fn config_with_check(check_id: &str, severity: Severity) -> EffectiveConfig {
    config_with_check_allow(check_id, severity, Vec::new())
}

pub fn config_with_check_allow(check_id: &str, severity: Severity, allow: Vec<&str>) -> EffectiveConfig {
    let mut policy = CheckPolicy::enabled(severity);
    policy.allow = allow.into_iter().map(|s| s.to_string()).collect();

    let mut checks = BTreeMap::new();
    checks.insert(check_id.to_string(), policy);

    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks,
    }
}

pub fn all_checks_config(severity: Severity, fail_on: FailOn) -> EffectiveConfig {
    let checks = ids::ALL_CHECKS
        .iter()
        .map(|id| (id.to_string(), CheckPolicy::enabled(severity)))
        .collect();

    EffectiveConfig {
        profile: "test".to_string(),
        fail_on,
        max_findings: 200,
        checks,
    }
}
