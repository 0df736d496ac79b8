//! Stable DTOs and IDs used across the cloudguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report and compliance summary
//! - stable string IDs and codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod summary;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    CloudguardData, CloudguardReport, Finding, ReportEnvelope, ResourceLocation, RunMeta,
    SCHEMA_REPORT_V1, Service, Severity, ToolMeta, Verdict, VerdictCounts, VerdictStatus,
};
pub use summary::ComplianceSummary;
