//! Developer tasks (schema generation, report conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use cloudguard_app::{CheckInput, run_check, runtime_error_report, serialize_report};
use cloudguard_domain::Inventory;
use cloudguard_settings::Overrides;
use cloudguard_test_util::normalize_nondeterministic;
use cloudguard_types::{CloudguardReport, explain};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of the xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask directory has no parent")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(CloudguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(cloudguard_settings::CloudguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "cloudguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "cloudguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate generated reports against the report schema");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

/// Token pattern for verdict reasons.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn workshop_report(config_text: &str, overrides: Overrides) -> anyhow::Result<CloudguardReport> {
    let inventory = Inventory::workshop();
    let output = run_check(CheckInput {
        inventory: &inventory,
        config_text,
        overrides,
    })?;
    Ok(output.report)
}

/// Reports the tool can emit, keyed by a label for error messages.
fn sample_reports() -> anyhow::Result<Vec<(String, CloudguardReport)>> {
    let mut out = Vec::new();
    for profile in ["strict", "warn", "advisory"] {
        let overrides = Overrides {
            profile: Some(profile.to_string()),
            max_findings: None,
        };
        out.push((format!("workshop/{profile}"), workshop_report("", overrides)?));
    }
    let truncated = Overrides {
        profile: None,
        max_findings: Some(2),
    };
    out.push(("workshop/truncated".to_string(), workshop_report("", truncated)?));
    out.push((
        "runtime_error".to_string(),
        runtime_error_report("example failure"),
    ));
    Ok(out)
}

/// Validate report conformance.
///
/// This checks:
/// 1. Schema validation: every sample report validates against the generated report schema
/// 2. Token hygiene: `verdict.reasons[]` match the token pattern
/// 3. Fingerprints: 64 lowercase hex characters
/// 4. Determinism: two runs are identical once clock fields are normalized
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;
    println!("✓ cloudguard.report.v1 schema compiles");

    let mut errors = Vec::new();
    let samples = sample_reports()?;

    for (label, report) in &samples {
        let bytes = serialize_report(report)?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).with_context(|| format!("reparse {label}"))?;

        for err in validator.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", label, err));
        }

        for (i, reason) in report.verdict.reasons.iter().enumerate() {
            if !is_valid_token(reason) {
                errors.push(format!(
                    "{}: verdict.reasons[{}] '{}' is not a valid token",
                    label, i, reason
                ));
            }
        }

        for (i, finding) in report.findings.iter().enumerate() {
            if let Some(fp) = &finding.fingerprint {
                let ok = fp.len() == 64
                    && fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
                if !ok {
                    errors.push(format!(
                        "{}: findings[{}].fingerprint '{}' is not a sha256 hex digest",
                        label, i, fp
                    ));
                }
            }
        }
    }
    println!("✓ {} sample reports checked", samples.len());

    let first = serde_json::to_value(workshop_report("", Overrides::default())?)?;
    let second = serde_json::to_value(workshop_report("", Overrides::default())?)?;
    if normalize_nondeterministic(first) != normalize_nondeterministic(second) {
        errors.push("workshop report differs between runs after normalization".to_string());
    } else {
        println!("✓ workshop report is deterministic");
    }

    if errors.is_empty() {
        println!("\n✓ All conformance checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Conformance failed with {} errors", errors.len())
    }
}

fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();

    let mut errors = Vec::new();
    for (kind, ids) in [("Check ID", check_ids), ("Code", codes)] {
        for id in ids {
            match explain::lookup_explanation(id) {
                Some(exp) => {
                    for (field, text) in [
                        ("title", exp.title),
                        ("description", exp.description),
                        ("remediation", exp.remediation),
                        ("before example", exp.examples.before),
                        ("after example", exp.examples.after),
                    ] {
                        if text.trim().is_empty() {
                            errors.push(format!("{} '{}' has empty {}", kind, id, field));
                        }
                    }
                }
                None => errors.push(format!("{} '{}' has no explanation", kind, id)),
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", cloudguard_types::SCHEMA_REPORT_V1);
            println!("{}", cloudguard_settings::SCHEMA_CONFIG_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
