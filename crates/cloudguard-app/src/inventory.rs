//! Loading the inventory the tools and checks run against.

use anyhow::Context;
use camino::Utf8Path;
use cloudguard_domain::Inventory;
use cloudguard_domain::inventory::RawInventory;
use tracing::debug;

/// Parse an inventory document (`{"buckets": [...], "instances": [...], "policies": [...]}`).
pub fn parse_inventory_json(text: &str) -> anyhow::Result<Inventory> {
    let raw: RawInventory = serde_json::from_str(text).context("parse inventory json")?;
    let inventory = Inventory::try_from(raw).context("validate inventory")?;
    Ok(inventory)
}

/// Load the inventory from `path`, or the built-in workshop fixtures when no path is given.
pub fn load_inventory(path: Option<&Utf8Path>) -> anyhow::Result<Inventory> {
    let Some(path) = path else {
        debug!("using built-in workshop inventory");
        return Ok(Inventory::workshop());
    };

    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path))?;
    let inventory = parse_inventory_json(&text).with_context(|| format!("load {}", path))?;
    debug!(
        path = %path,
        buckets = inventory.buckets().len(),
        instances = inventory.instances().len(),
        policies = inventory.policies().len(),
        "loaded inventory"
    );
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudguard_domain::model::Encryption;

    #[test]
    fn no_path_means_workshop() {
        let inv = load_inventory(None).expect("workshop");
        assert_eq!(inv, Inventory::workshop());
    }

    #[test]
    fn loads_inventory_file() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let path = root.join("inventory.json");
        std::fs::write(
            &path,
            r#"{
  "buckets": [
    { "name": "only", "encryption": "aws:kms", "versioning": true, "public_access_blocked": true }
  ],
  "policies": [
    { "name": "AdminAccess", "arn": "arn:aws:iam::1:policy/AdminAccess", "attached_to": [], "has_mfa": true }
  ]
}"#,
        )
        .expect("write inventory");

        let inv = load_inventory(Some(&path)).expect("load");
        assert_eq!(inv.buckets().len(), 1);
        assert!(inv.instances().is_empty());
        assert_eq!(inv.resource_count(), 2);
    }

    #[test]
    fn unlisted_encryption_algorithm_loads_as_encrypted() {
        let inv = parse_inventory_json(
            r#"{"buckets": [
                {"name": "dsse", "encryption": "aws:kms:dsse", "versioning": true,
                 "public_access_blocked": true, "tags": {"Owner": "data"}}
            ]}"#,
        )
        .expect("parse");

        assert_eq!(
            inv.buckets()[0].encryption,
            Some(Encryption::Other("aws:kms:dsse".to_string()))
        );
        let enc = inv.get_bucket_encryption("dsse").expect("bucket exists");
        assert!(enc.compliant);
        assert_eq!(
            serde_json::to_value(&enc).expect("serialize")["encryption"],
            "aws:kms:dsse"
        );
        let summary = cloudguard_domain::summarize(&inv, time::OffsetDateTime::UNIX_EPOCH);
        assert_eq!(summary.total_violations, 0);
    }

    #[test]
    fn errors_carry_context() {
        let err = load_inventory(Some(Utf8Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("read /definitely/not/here.json"));

        let err = parse_inventory_json(
            r#"{"policies": [
                {"name": "A", "arn": "x", "attached_to": [], "has_mfa": true},
                {"name": "A", "arn": "y", "attached_to": [], "has_mfa": false}
            ]}"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("duplicate policy name: A"));
    }
}
