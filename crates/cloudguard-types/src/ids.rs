//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace whose first segment names the service.
//! `code` is a short snake_case discriminator.

// Checks
pub const CHECK_S3_ENCRYPTION: &str = "s3.encryption";
pub const CHECK_S3_VERSIONING: &str = "s3.versioning";
pub const CHECK_S3_PUBLIC_ACCESS: &str = "s3.public_access";
pub const CHECK_S3_OWNER_TAG: &str = "s3.owner_tag";
pub const CHECK_EC2_REQUIRED_TAGS: &str = "ec2.required_tags";
pub const CHECK_IAM_ADMIN_MFA: &str = "iam.admin_mfa";

// Codes: s3.*
pub const CODE_ENCRYPTION_DISABLED: &str = "encryption_disabled";
pub const CODE_VERSIONING_DISABLED: &str = "versioning_disabled";
pub const CODE_PUBLIC_ACCESS_NOT_BLOCKED: &str = "public_access_not_blocked";
pub const CODE_MISSING_OWNER_TAG: &str = "missing_owner_tag";

// Codes: ec2.required_tags
pub const CODE_MISSING_REQUIRED_TAG: &str = "missing_required_tag";

// Codes: iam.admin_mfa
pub const CODE_ADMIN_WITHOUT_MFA: &str = "admin_without_mfa";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

/// Every policy check, in evaluation order.
pub const ALL_CHECKS: &[&str] = &[
    CHECK_S3_ENCRYPTION,
    CHECK_S3_VERSIONING,
    CHECK_S3_PUBLIC_ACCESS,
    CHECK_S3_OWNER_TAG,
    CHECK_EC2_REQUIRED_TAGS,
    CHECK_IAM_ADMIN_MFA,
];
