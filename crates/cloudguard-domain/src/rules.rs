//! The fixed compliance rules.
//!
//! Tool outputs, the aggregate summary, and the checks engine all call these
//! predicates so they cannot drift apart.

use crate::model::{Bucket, Instance, Policy};

/// Tags every EC2 instance must carry, in reporting order.
pub const REQUIRED_INSTANCE_TAGS: [&str; 4] = ["Name", "Environment", "Owner", "CostCenter"];

/// Tag every S3 bucket must carry.
pub const BUCKET_OWNER_TAG: &str = "Owner";

/// Case-sensitive marker for administrative policies.
pub const ADMIN_MARKER: &str = "Admin";

/// One unmet rule on a single bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketViolation {
    EncryptionDisabled,
    VersioningDisabled,
    PublicAccessNotBlocked,
    MissingOwnerTag,
}

pub fn bucket_is_encrypted(bucket: &Bucket) -> bool {
    bucket.encryption.is_some()
}

pub fn bucket_has_owner(bucket: &Bucket) -> bool {
    bucket.tags.contains_key(BUCKET_OWNER_TAG)
}

/// Every rule the bucket breaks, in a fixed order. Between zero and four entries.
pub fn bucket_violations(bucket: &Bucket) -> Vec<BucketViolation> {
    let mut out = Vec::new();
    if !bucket_is_encrypted(bucket) {
        out.push(BucketViolation::EncryptionDisabled);
    }
    if !bucket.versioning {
        out.push(BucketViolation::VersioningDisabled);
    }
    if !bucket.public_access_blocked {
        out.push(BucketViolation::PublicAccessNotBlocked);
    }
    if !bucket_has_owner(bucket) {
        out.push(BucketViolation::MissingOwnerTag);
    }
    out
}

/// Required tags absent from the instance, in `REQUIRED_INSTANCE_TAGS` order.
pub fn missing_instance_tags(instance: &Instance) -> Vec<&'static str> {
    REQUIRED_INSTANCE_TAGS
        .iter()
        .copied()
        .filter(|tag| !instance.tags.contains_key(*tag))
        .collect()
}

pub fn is_admin_policy(policy: &Policy) -> bool {
    policy.name.contains(ADMIN_MARKER)
}

/// A policy is compliant when it requires MFA or is not administrative.
pub fn policy_is_compliant(policy: &Policy) -> bool {
    policy.has_mfa || !is_admin_policy(policy)
}
