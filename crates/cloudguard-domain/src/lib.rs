//! Pure compliance evaluation (no IO).
//!
//! Input: an inventory of simulated S3 buckets, EC2 instances, and IAM policies.
//! Output: query results, an aggregate summary, or findings + verdict.

#![forbid(unsafe_code)]

pub mod inventory;
pub mod model;
pub mod policy;
pub mod report;
pub mod rules;
pub mod summary;
pub mod tools;

pub mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
mod test_support;

pub use engine::evaluate;
pub use inventory::{Inventory, InventoryError};
pub use summary::summarize;
pub use tools::LookupError;
