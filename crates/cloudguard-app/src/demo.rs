//! The console walkthrough: list, inspect, and score the inventory.

use cloudguard_domain::model::Encryption;
use cloudguard_domain::{Inventory, LookupError, summarize};
use time::OffsetDateTime;

const PASS: &str = "✅";
const FAIL: &str = "❌";

fn glyph(ok: bool) -> &'static str {
    if ok { PASS } else { FAIL }
}

/// Run the fixed demonstration sequence and return the console text.
pub fn run_demo(inventory: &Inventory, now: OffsetDateTime) -> Result<String, LookupError> {
    let mut out = String::new();

    out.push_str("AWS compliance tools (simulated)\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');

    let buckets = inventory.list_bucket_names();
    out.push_str(&format!("\nS3 buckets: {}\n", buckets.join(", ")));
    for name in &buckets {
        let enc = inventory.get_bucket_encryption(name)?;
        let algo = enc.encryption.as_ref().map_or("None", Encryption::as_str);
        out.push_str(&format!("  {} {}: {}\n", glyph(enc.compliant), name, algo));
    }

    let instances = inventory.list_instances();
    out.push_str(&format!("\nEC2 instances: {} found\n", instances.len()));
    for inst in &instances {
        let tags = inventory.get_instance_tags(&inst.id)?;
        if tags.missing_tags.is_empty() {
            out.push_str(&format!("  {} {}: all tags present\n", PASS, inst.name));
        } else {
            out.push_str(&format!(
                "  {} {}: missing tags {}\n",
                FAIL,
                inst.name,
                tags.missing_tags.join(", ")
            ));
        }
    }

    let summary = summarize(inventory, now);
    out.push_str("\nCompliance summary:\n");
    out.push_str(&format!("  Resources: {}\n", summary.resources_scanned));
    out.push_str(&format!("  Violations: {}\n", summary.total_violations));
    out.push_str(&format!("  Score: {}\n", summary.compliance_score));

    Ok(out)
}
