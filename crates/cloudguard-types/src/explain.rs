//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after resource examples.
    pub examples: ExamplePair,
}

/// Before and after resource examples (JSON resource records).
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// A resource that would trigger a finding.
    pub before: &'static str,
    /// A resource that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_S3_ENCRYPTION => Some(explain_s3_encryption()),
        ids::CHECK_S3_VERSIONING => Some(explain_s3_versioning()),
        ids::CHECK_S3_PUBLIC_ACCESS => Some(explain_s3_public_access()),
        ids::CHECK_S3_OWNER_TAG => Some(explain_s3_owner_tag()),
        ids::CHECK_EC2_REQUIRED_TAGS => Some(explain_ec2_required_tags()),
        ids::CHECK_IAM_ADMIN_MFA => Some(explain_iam_admin_mfa()),

        // Codes
        ids::CODE_ENCRYPTION_DISABLED => Some(explain_encryption_disabled()),
        ids::CODE_VERSIONING_DISABLED => Some(explain_versioning_disabled()),
        ids::CODE_PUBLIC_ACCESS_NOT_BLOCKED => Some(explain_public_access_not_blocked()),
        ids::CODE_MISSING_OWNER_TAG => Some(explain_missing_owner_tag()),
        ids::CODE_MISSING_REQUIRED_TAG => Some(explain_missing_required_tag()),
        ids::CODE_ADMIN_WITHOUT_MFA => Some(explain_admin_without_mfa()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    ids::ALL_CHECKS
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_ENCRYPTION_DISABLED,
        ids::CODE_VERSIONING_DISABLED,
        ids::CODE_PUBLIC_ACCESS_NOT_BLOCKED,
        ids::CODE_MISSING_OWNER_TAG,
        ids::CODE_MISSING_REQUIRED_TAG,
        ids::CODE_ADMIN_WITHOUT_MFA,
    ]
}

// --- Check-level explanations ---

fn explain_s3_encryption() -> Explanation {
    Explanation {
        title: "S3 Default Encryption",
        description: "\
Detects buckets with no default server-side encryption configured.

Objects written to an unencrypted bucket are stored in the clear unless every
client remembers to request encryption. Customer data, backups, and logs all
need encryption at rest to satisfy most compliance frameworks.",
        remediation: "\
Enable default encryption on the bucket with SSE-S3 (AES256) or SSE-KMS:

    aws s3api put-bucket-encryption --bucket <name> \\
      --server-side-encryption-configuration \\
      '{\"Rules\":[{\"ApplyServerSideEncryptionByDefault\":{\"SSEAlgorithm\":\"aws:kms\"}}]}'",
        examples: ExamplePair {
            before: r#"{ "name": "prod-customer-data", "encryption": null }"#,
            after: r#"{ "name": "prod-customer-data", "encryption": "aws:kms" }"#,
        },
    }
}

fn explain_s3_versioning() -> Explanation {
    Explanation {
        title: "S3 Versioning",
        description: "\
Detects buckets with versioning disabled.

Without versioning an overwrite or delete is permanent. Versioning keeps prior
object versions so accidental or malicious changes can be rolled back.",
        remediation: "\
Enable versioning on the bucket:

    aws s3api put-bucket-versioning --bucket <name> \\
      --versioning-configuration Status=Enabled",
        examples: ExamplePair {
            before: r#"{ "name": "backup-2024", "versioning": false }"#,
            after: r#"{ "name": "backup-2024", "versioning": true }"#,
        },
    }
}

fn explain_s3_public_access() -> Explanation {
    Explanation {
        title: "S3 Public Access Block",
        description: "\
Detects buckets that do not block public access.

A bucket without a public access block can be exposed by a single permissive
ACL or bucket policy. Blocking public access at the bucket level makes that
mistake impossible.",
        remediation: "\
Turn on all four public access block settings:

    aws s3api put-public-access-block --bucket <name> \\
      --public-access-block-configuration \\
      BlockPublicAcls=true,IgnorePublicAcls=true,BlockPublicPolicy=true,RestrictPublicBuckets=true",
        examples: ExamplePair {
            before: r#"{ "name": "logs-archive", "public_access_blocked": false }"#,
            after: r#"{ "name": "logs-archive", "public_access_blocked": true }"#,
        },
    }
}

fn explain_s3_owner_tag() -> Explanation {
    Explanation {
        title: "S3 Owner Tag",
        description: "\
Detects buckets without an `Owner` tag.

Every bucket needs an accountable owner so incidents, cost reviews, and
retention decisions reach the right team.",
        remediation: "\
Tag the bucket with its owning team:

    aws s3api put-bucket-tagging --bucket <name> \\
      --tagging 'TagSet=[{Key=Owner,Value=<team>}]'",
        examples: ExamplePair {
            before: r#"{ "name": "backup-2024", "tags": { "Environment": "Production" } }"#,
            after: r#"{ "name": "backup-2024", "tags": { "Environment": "Production", "Owner": "backup-team" } }"#,
        },
    }
}

fn explain_ec2_required_tags() -> Explanation {
    Explanation {
        title: "EC2 Required Tags",
        description: "\
Detects instances missing any of the required tags: Name, Environment, Owner,
CostCenter.

Required tags drive cost allocation, ownership lookups, and environment
scoping. One finding is emitted per missing tag.",
        remediation: "\
Add the missing tags to the instance:

    aws ec2 create-tags --resources <instance-id> \\
      --tags Key=Owner,Value=<team> Key=CostCenter,Value=<code>",
        examples: ExamplePair {
            before: r#"{ "id": "i-1234567890abcdef0", "tags": { "Name": "web-server-01", "Environment": "Production" } }"#,
            after: r#"{ "id": "i-1234567890abcdef0", "tags": { "Name": "web-server-01", "Environment": "Production", "Owner": "web-team", "CostCenter": "IT-200" } }"#,
        },
    }
}

fn explain_iam_admin_mfa() -> Explanation {
    Explanation {
        title: "IAM Admin Policies Require MFA",
        description: "\
Detects administrative policies (name contains `Admin`) that do not require
multi-factor authentication.

Administrative permissions granted without MFA turn a single leaked password
or access key into full account compromise. Non-admin policies are not
subject to this check.",
        remediation: "\
Add an `aws:MultiFactorAuthPresent` condition to the policy, or attach it only
to roles whose trust policy requires MFA.",
        examples: ExamplePair {
            before: r#"{ "name": "AdminAccess", "has_mfa": false }"#,
            after: r#"{ "name": "AdminAccess", "has_mfa": true }"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_encryption_disabled() -> Explanation {
    let mut exp = explain_s3_encryption();
    exp.title = "Encryption Disabled";
    exp
}

fn explain_versioning_disabled() -> Explanation {
    let mut exp = explain_s3_versioning();
    exp.title = "Versioning Disabled";
    exp
}

fn explain_public_access_not_blocked() -> Explanation {
    let mut exp = explain_s3_public_access();
    exp.title = "Public Access Not Blocked";
    exp
}

fn explain_missing_owner_tag() -> Explanation {
    let mut exp = explain_s3_owner_tag();
    exp.title = "Missing Owner Tag";
    exp
}

fn explain_missing_required_tag() -> Explanation {
    let mut exp = explain_ec2_required_tags();
    exp.title = "Missing Required Tag";
    exp
}

fn explain_admin_without_mfa() -> Explanation {
    let mut exp = explain_iam_admin_mfa();
    exp.title = "Admin Policy Without MFA";
    exp
}
