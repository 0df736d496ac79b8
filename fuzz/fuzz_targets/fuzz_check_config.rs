//! Fuzz target for config parsing and the check use case.
//!
//! Goal: any `cloudguard.toml` text and CLI override combination should either
//! resolve and produce a report, or fail with an error. Never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_check_config
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct CheckConfigInput {
    config_text: String,
    profile: Option<String>,
    max_findings: Option<u32>,
}

fuzz_target!(|input: CheckConfigInput| {
    if input.config_text.len() > 16 * 1024 {
        return;
    }

    let inventory = cloudguard_domain::Inventory::workshop();
    let result = cloudguard_app::run_check(cloudguard_app::CheckInput {
        inventory: &inventory,
        config_text: &input.config_text,
        overrides: cloudguard_settings::Overrides {
            profile: input.profile,
            max_findings: input.max_findings,
        },
    });

    if let Ok(output) = result {
        let report = output.report;
        assert!(report.findings.len() <= output.resolved_config.effective.max_findings);
        assert_eq!(report.data.findings_emitted as usize, report.findings.len());
        let _ = cloudguard_app::serialize_report(&report);
    }
});
