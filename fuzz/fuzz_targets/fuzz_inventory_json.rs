//! Fuzz target for inventory loading and the tool catalog.
//!
//! Goal: parsing an inventory document and invoking every tool against it should
//! **never panic**. Unknown keys surface as `NotFound`, bad documents as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_inventory_json
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use time::OffsetDateTime;

#[derive(Arbitrary, Debug)]
struct InventoryInput {
    /// Raw inventory JSON text.
    document: String,
    /// Key passed to keyed tools (bucket name, instance id, policy name).
    key: Option<String>,
}

fuzz_target!(|input: InventoryInput| {
    if input.document.len() > 64 * 1024 {
        return;
    }

    let Ok(inventory) = cloudguard_app::parse_inventory_json(&input.document) else {
        return;
    };

    let now = OffsetDateTime::UNIX_EPOCH;
    for tool in cloudguard_app::TOOLS {
        let _ = cloudguard_app::invoke_tool(&inventory, tool.name, input.key.as_deref(), now);
    }

    // Summary counts and check findings come from the same rules.
    let summary = cloudguard_domain::summarize(&inventory, now);
    assert_eq!(
        summary.total_violations,
        summary.s3_violations + summary.ec2_violations + summary.iam_violations
    );
    let _ = cloudguard_app::run_demo(&inventory, now);
});
