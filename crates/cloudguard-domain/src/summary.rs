use crate::inventory::Inventory;
use crate::rules;
use cloudguard_types::ComplianceSummary;
use time::OffsetDateTime;

/// Per-service violation counts before scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViolationCounts {
    pub s3: u32,
    pub ec2: u32,
    pub iam: u32,
}

impl ViolationCounts {
    pub fn total(&self) -> u32 {
        self.s3 + self.ec2 + self.iam
    }
}

pub fn count_violations(inventory: &Inventory) -> ViolationCounts {
    let s3 = inventory
        .buckets()
        .iter()
        .map(|b| rules::bucket_violations(b).len() as u32)
        .sum();
    let ec2 = inventory
        .instances()
        .iter()
        .map(|i| rules::missing_instance_tags(i).len() as u32)
        .sum();
    let iam = inventory
        .policies()
        .iter()
        .filter(|p| !rules::policy_is_compliant(p))
        .count() as u32;

    ViolationCounts { s3, ec2, iam }
}

/// Score the inventory at `at`.
///
/// The caller supplies the timestamp so this crate stays clock-free.
pub fn summarize(inventory: &Inventory, at: OffsetDateTime) -> ComplianceSummary {
    let counts = count_violations(inventory);
    let resources = inventory.resource_count() as u32;
    let total = counts.total();

    ComplianceSummary {
        timestamp: at,
        resources_scanned: resources,
        total_violations: total,
        s3_violations: counts.s3,
        ec2_violations: counts.ec2,
        iam_violations: counts.iam,
        compliance_score: format_score(resources, total),
    }
}

/// `(resources - violations) / resources` as a percentage with one decimal.
///
/// Violations are not capped per resource, so this goes negative once they
/// outnumber resources. An empty inventory has nothing to violate and scores
/// `100.0%`.
pub fn format_score(resources: u32, violations: u32) -> String {
    if resources == 0 {
        return "100.0%".to_string();
    }
    let score = (f64::from(resources) - f64::from(violations)) / f64::from(resources) * 100.0;
    format!("{score:.1}%")
}
