use cloudguard_types::{CloudguardData, Finding, Severity, VerdictCounts, VerdictStatus};

#[derive(Clone, Debug, Default)]
pub struct SeverityCounts {
    pub info: u32,
    pub warning: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

impl From<&SeverityCounts> for VerdictCounts {
    fn from(c: &SeverityCounts) -> Self {
        VerdictCounts {
            info: c.info,
            warn: c.warning,
            error: c.error,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: VerdictStatus,
    pub findings: Vec<Finding>,
    pub data: CloudguardData,
    pub counts: SeverityCounts,
}
