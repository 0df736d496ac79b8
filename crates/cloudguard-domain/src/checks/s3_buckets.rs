use super::utils::{FindingSpec, build_allowlist, is_allowed, make_finding};
use crate::inventory::Inventory;
use crate::policy::{CheckPolicy, EffectiveConfig};
use crate::rules::{self, BucketViolation};
use cloudguard_types::{Finding, Service, ids};
use globset::GlobSet;
use serde_json::json;
use std::collections::BTreeMap;

struct Rule {
    check_id: &'static str,
    code: &'static str,
    help: &'static str,
    describe: fn(&str) -> String,
}

fn rule_for(violation: BucketViolation) -> Rule {
    match violation {
        BucketViolation::EncryptionDisabled => Rule {
            check_id: ids::CHECK_S3_ENCRYPTION,
            code: ids::CODE_ENCRYPTION_DISABLED,
            help: "Enable default server-side encryption (AES256 or aws:kms).",
            describe: |b| format!("bucket '{b}' has no default encryption"),
        },
        BucketViolation::VersioningDisabled => Rule {
            check_id: ids::CHECK_S3_VERSIONING,
            code: ids::CODE_VERSIONING_DISABLED,
            help: "Enable bucket versioning so overwrites and deletes can be recovered.",
            describe: |b| format!("bucket '{b}' has versioning disabled"),
        },
        BucketViolation::PublicAccessNotBlocked => Rule {
            check_id: ids::CHECK_S3_PUBLIC_ACCESS,
            code: ids::CODE_PUBLIC_ACCESS_NOT_BLOCKED,
            help: "Turn on the bucket's public access block.",
            describe: |b| format!("bucket '{b}' does not block public access"),
        },
        BucketViolation::MissingOwnerTag => Rule {
            check_id: ids::CHECK_S3_OWNER_TAG,
            code: ids::CODE_MISSING_OWNER_TAG,
            help: "Tag the bucket with the owning team: Owner=<team>.",
            describe: |b| format!("bucket '{b}' is missing the '{}' tag", rules::BUCKET_OWNER_TAG),
        },
    }
}

const ALL_VIOLATIONS: [BucketViolation; 4] = [
    BucketViolation::EncryptionDisabled,
    BucketViolation::VersioningDisabled,
    BucketViolation::PublicAccessNotBlocked,
    BucketViolation::MissingOwnerTag,
];

pub fn run(inventory: &Inventory, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    // Enabled S3 checks with their compiled allowlists, keyed by check id.
    let enabled: BTreeMap<&str, (&CheckPolicy, Option<GlobSet>)> = ALL_VIOLATIONS
        .iter()
        .filter_map(|v| {
            let check_id = rule_for(*v).check_id;
            let policy = cfg.check_policy(check_id)?;
            Some((check_id, (policy, build_allowlist(policy))))
        })
        .collect();
    if enabled.is_empty() {
        return;
    }

    for bucket in inventory.buckets() {
        for violation in rules::bucket_violations(bucket) {
            let rule = rule_for(violation);
            let Some((policy, allow)) = enabled.get(rule.check_id) else {
                continue;
            };
            if is_allowed(allow.as_ref(), &bucket.name) {
                continue;
            }

            out.push(make_finding(
                policy,
                FindingSpec {
                    check_id: rule.check_id,
                    code: rule.code,
                    service: Service::S3,
                    resource_id: &bucket.name,
                    detail: None,
                    message: (rule.describe)(&bucket.name),
                    help: rule.help,
                    data: json!({
                        "bucket": bucket.name,
                        "encryption": bucket.encryption,
                        "versioning": bucket.versioning,
                        "public_access_blocked": bucket.public_access_blocked,
                    }),
                },
            ));
        }
    }
}
