use crate::model::{Bucket, Encryption, Instance, InstanceState, Policy, Tags};
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("duplicate bucket name: {0}")]
    DuplicateBucket(String),
    #[error("duplicate instance id: {0}")]
    DuplicateInstance(String),
    #[error("duplicate policy name: {0}")]
    DuplicatePolicy(String),
}

/// The three read-only resource inventories.
///
/// Keys (bucket name, instance id, policy name) are unique within their list;
/// `Inventory::new` is the only way to build one, so every value upholds that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    buckets: Vec<Bucket>,
    instances: Vec<Instance>,
    policies: Vec<Policy>,
}

/// Unvalidated inventory shape, as read from a JSON file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawInventory {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl TryFrom<RawInventory> for Inventory {
    type Error = InventoryError;

    fn try_from(raw: RawInventory) -> Result<Self, Self::Error> {
        Inventory::new(raw.buckets, raw.instances, raw.policies)
    }
}

impl Inventory {
    pub fn new(
        buckets: Vec<Bucket>,
        instances: Vec<Instance>,
        policies: Vec<Policy>,
    ) -> Result<Self, InventoryError> {
        if let Some(dup) = first_duplicate(buckets.iter().map(|b| b.name.as_str())) {
            return Err(InventoryError::DuplicateBucket(dup.to_string()));
        }
        if let Some(dup) = first_duplicate(instances.iter().map(|i| i.id.as_str())) {
            return Err(InventoryError::DuplicateInstance(dup.to_string()));
        }
        if let Some(dup) = first_duplicate(policies.iter().map(|p| p.name.as_str())) {
            return Err(InventoryError::DuplicatePolicy(dup.to_string()));
        }

        Ok(Self {
            buckets,
            instances,
            policies,
        })
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn resource_count(&self) -> usize {
        self.buckets.len() + self.instances.len() + self.policies.len()
    }

    /// The embedded workshop fixtures: four buckets, two instances, two policies.
    pub fn workshop() -> Self {
        let buckets = vec![
            Bucket {
                name: "prod-customer-data".to_string(),
                encryption: None,
                versioning: true,
                public_access_blocked: true,
                tags: tags(&[("Environment", "Production"), ("Owner", "data-team")]),
            },
            Bucket {
                name: "backup-2024".to_string(),
                encryption: Some(Encryption::Aes256),
                versioning: false,
                public_access_blocked: true,
                tags: tags(&[("Environment", "Production")]),
            },
            Bucket {
                name: "logs-archive".to_string(),
                encryption: Some(Encryption::AwsKms),
                versioning: true,
                public_access_blocked: false,
                tags: tags(&[("Environment", "Production"), ("Owner", "ops-team")]),
            },
            Bucket {
                name: "dev-testing".to_string(),
                encryption: Some(Encryption::Aes256),
                versioning: true,
                public_access_blocked: true,
                tags: tags(&[("Environment", "Development"), ("Owner", "dev-team")]),
            },
        ];

        let instances = vec![
            Instance {
                id: "i-1234567890abcdef0".to_string(),
                name: "web-server-01".to_string(),
                state: InstanceState::Running,
                tags: tags(&[("Name", "web-server-01"), ("Environment", "Production")]),
                security_groups: vec!["sg-web".to_string(), "sg-ssh".to_string()],
            },
            Instance {
                id: "i-0987654321fedcba0".to_string(),
                name: "db-server-01".to_string(),
                state: InstanceState::Running,
                tags: tags(&[
                    ("Name", "db-server-01"),
                    ("Environment", "Production"),
                    ("Owner", "db-team"),
                    ("CostCenter", "IT-500"),
                ]),
                security_groups: vec!["sg-database".to_string()],
            },
        ];

        let policies = vec![
            Policy {
                name: "AdminAccess".to_string(),
                arn: "arn:aws:iam::123456789012:policy/AdminAccess".to_string(),
                attached_to: vec!["admin-role".to_string()],
                has_mfa: false,
            },
            Policy {
                name: "ReadOnlyAccess".to_string(),
                arn: "arn:aws:iam::123456789012:policy/ReadOnlyAccess".to_string(),
                attached_to: vec!["developer-role".to_string()],
                has_mfa: true,
            },
        ];

        Self {
            buckets,
            instances,
            policies,
        }
    }
}

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn first_duplicate<'a>(keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = BTreeSet::new();
    keys.into_iter().find(|k| !seen.insert(*k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workshop_fixture_sizes() {
        let inv = Inventory::workshop();
        assert_eq!(inv.buckets().len(), 4);
        assert_eq!(inv.instances().len(), 2);
        assert_eq!(inv.policies().len(), 2);
        assert_eq!(inv.resource_count(), 8);
    }

    #[test]
    fn workshop_fixture_passes_validation() {
        let inv = Inventory::workshop();
        let rebuilt = Inventory::new(
            inv.buckets().to_vec(),
            inv.instances().to_vec(),
            inv.policies().to_vec(),
        )
        .expect("fixtures have unique keys");
        assert_eq!(rebuilt, inv);
    }

    #[test]
    fn duplicate_bucket_is_rejected() {
        let bucket = Inventory::workshop().buckets()[0].clone();
        let err = Inventory::new(vec![bucket.clone(), bucket], Vec::new(), Vec::new())
            .expect_err("duplicate must fail");
        assert_eq!(
            err,
            InventoryError::DuplicateBucket("prod-customer-data".to_string())
        );
    }

    #[test]
    fn duplicate_instance_and_policy_are_rejected() {
        let inv = Inventory::workshop();
        let instance = inv.instances()[1].clone();
        let err = Inventory::new(Vec::new(), vec![instance.clone(), instance], Vec::new())
            .expect_err("duplicate must fail");
        assert!(matches!(err, InventoryError::DuplicateInstance(id) if id == "i-0987654321fedcba0"));

        let policy = inv.policies()[0].clone();
        let err = Inventory::new(Vec::new(), Vec::new(), vec![policy.clone(), policy])
            .expect_err("duplicate must fail");
        assert_eq!(err.to_string(), "duplicate policy name: AdminAccess");
    }

    #[test]
    fn raw_inventory_from_json() {
        let raw: RawInventory = serde_json::from_str(
            r#"{
                "buckets": [
                    { "name": "b1", "encryption": "aws:kms", "versioning": true,
                      "public_access_blocked": true, "tags": { "Owner": "me" } }
                ],
                "instances": [
                    { "id": "i-1", "name": "box", "state": "shutting-down" }
                ]
            }"#,
        )
        .expect("parse raw inventory");

        let inv = Inventory::try_from(raw).expect("valid inventory");
        assert_eq!(inv.buckets()[0].encryption, Some(Encryption::AwsKms));
        assert_eq!(inv.instances()[0].state, InstanceState::ShuttingDown);
        assert!(inv.instances()[0].tags.is_empty());
        assert!(inv.policies().is_empty());
    }

    #[test]
    fn unknown_encryption_identifier_is_kept_verbatim() {
        let raw: RawInventory = serde_json::from_str(
            r#"{"buckets": [
                {"name": "b", "encryption": "aws:kms:dsse", "versioning": false,
                 "public_access_blocked": true}
            ]}"#,
        )
        .expect("parse raw inventory");

        let inv = Inventory::try_from(raw).expect("valid inventory");
        let enc = inv.buckets()[0].encryption.as_ref().expect("encrypted");
        assert_eq!(enc, &Encryption::Other("aws:kms:dsse".to_string()));
        assert_eq!(enc.as_str(), "aws:kms:dsse");
        assert_eq!(enc.to_string(), "aws:kms:dsse");
    }
}
