use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Aggregate compliance counts over a whole inventory.
///
/// `compliance_score` is a preformatted percentage (`"12.5%"`). Violations are
/// not capped per resource, so the score can go negative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceSummary {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub resources_scanned: u32,
    pub total_violations: u32,
    pub s3_violations: u32,
    pub ec2_violations: u32,
    pub iam_violations: u32,
    pub compliance_score: String,
}
