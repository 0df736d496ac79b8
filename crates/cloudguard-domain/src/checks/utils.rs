use crate::fingerprint::fingerprint_for_resource;
use crate::policy::CheckPolicy;
use cloudguard_types::{Finding, ResourceLocation, Service};
use globset::GlobSet;
use serde_json::Value;

/// Exemptions for one check.
///
/// Callers are expected to validate patterns up front with
/// [`CheckPolicy::allowlist`]. If any pattern is invalid here, nothing is
/// exempt and every violation is still reported.
pub fn build_allowlist(policy: &CheckPolicy) -> Option<GlobSet> {
    policy.allowlist().unwrap_or(None)
}

pub fn is_allowed(allow: Option<&GlobSet>, resource_id: &str) -> bool {
    allow.map(|set| set.is_match(resource_id)).unwrap_or(false)
}

/// Everything that varies between findings of different checks.
pub struct FindingSpec<'a> {
    pub check_id: &'a str,
    pub code: &'a str,
    pub service: Service,
    pub resource_id: &'a str,
    pub detail: Option<&'a str>,
    pub message: String,
    pub help: &'a str,
    pub data: Value,
}

pub fn make_finding(policy: &CheckPolicy, spec: FindingSpec<'_>) -> Finding {
    Finding {
        severity: policy.severity,
        check_id: spec.check_id.to_string(),
        code: spec.code.to_string(),
        message: spec.message,
        location: Some(ResourceLocation::new(spec.service, spec.resource_id)),
        help: Some(spec.help.to_string()),
        fingerprint: Some(fingerprint_for_resource(
            spec.check_id,
            spec.code,
            spec.service.as_str(),
            spec.resource_id,
            spec.detail,
        )),
        data: spec.data,
    }
}
