//! Read-only query operations over an [`Inventory`].
//!
//! These back the named tools in the app layer. Lookups by key return
//! [`LookupError`] when the key is absent; nothing here panics or returns a
//! placeholder record.

use crate::inventory::Inventory;
use crate::model::{Bucket, Encryption, Instance, InstanceState, Policy, Tags};
use crate::rules;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Bucket {0} not found")]
    BucketNotFound(String),
    #[error("Instance {0} not found")]
    InstanceNotFound(String),
    #[error("Policy {0} not found")]
    PolicyNotFound(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BucketEncryption {
    pub bucket: String,
    pub encryption: Option<Encryption>,
    pub compliant: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstanceSummary {
    pub id: String,
    pub name: String,
    pub state: InstanceState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InstanceTags {
    pub instance_id: String,
    pub tags: Tags,
    pub required_tags: Vec<&'static str>,
    pub missing_tags: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PolicySummary {
    pub name: String,
    pub arn: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MfaStatus {
    pub policy: String,
    pub has_mfa: bool,
    pub compliant: bool,
}

impl Inventory {
    pub fn list_bucket_names(&self) -> Vec<String> {
        self.buckets().iter().map(|b| b.name.clone()).collect()
    }

    pub fn bucket(&self, name: &str) -> Result<&Bucket, LookupError> {
        self.buckets()
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| LookupError::BucketNotFound(name.to_string()))
    }

    pub fn get_bucket_encryption(&self, name: &str) -> Result<BucketEncryption, LookupError> {
        let bucket = self.bucket(name)?;
        Ok(BucketEncryption {
            bucket: bucket.name.clone(),
            encryption: bucket.encryption.clone(),
            compliant: rules::bucket_is_encrypted(bucket),
        })
    }

    pub fn get_bucket_details(&self, name: &str) -> Result<Bucket, LookupError> {
        self.bucket(name).cloned()
    }

    pub fn list_instances(&self) -> Vec<InstanceSummary> {
        self.instances()
            .iter()
            .map(|i| InstanceSummary {
                id: i.id.clone(),
                name: i.name.clone(),
                state: i.state,
            })
            .collect()
    }

    pub fn instance(&self, id: &str) -> Result<&Instance, LookupError> {
        self.instances()
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| LookupError::InstanceNotFound(id.to_string()))
    }

    pub fn get_instance_tags(&self, id: &str) -> Result<InstanceTags, LookupError> {
        let instance = self.instance(id)?;
        Ok(InstanceTags {
            instance_id: instance.id.clone(),
            tags: instance.tags.clone(),
            required_tags: rules::REQUIRED_INSTANCE_TAGS.to_vec(),
            missing_tags: rules::missing_instance_tags(instance),
        })
    }

    pub fn list_policies(&self) -> Vec<PolicySummary> {
        self.policies()
            .iter()
            .map(|p| PolicySummary {
                name: p.name.clone(),
                arn: p.arn.clone(),
            })
            .collect()
    }

    pub fn policy(&self, name: &str) -> Result<&Policy, LookupError> {
        self.policies()
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| LookupError::PolicyNotFound(name.to_string()))
    }

    pub fn check_mfa_status(&self, name: &str) -> Result<MfaStatus, LookupError> {
        let policy = self.policy(name)?;
        Ok(MfaStatus {
            policy: policy.name.clone(),
            has_mfa: policy.has_mfa,
            compliant: rules::policy_is_compliant(policy),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_names_in_inventory_order() {
        let inv = Inventory::workshop();
        assert_eq!(
            inv.list_bucket_names(),
            vec![
                "prod-customer-data",
                "backup-2024",
                "logs-archive",
                "dev-testing"
            ]
        );
    }

    #[test]
    fn unencrypted_bucket_is_not_compliant() {
        let inv = Inventory::workshop();
        let enc = inv.get_bucket_encryption("prod-customer-data").unwrap();
        assert_eq!(enc.encryption, None);
        assert!(!enc.compliant);

        let enc = inv.get_bucket_encryption("logs-archive").unwrap();
        assert_eq!(enc.encryption, Some(Encryption::AwsKms));
        assert!(enc.compliant);
    }

    #[test]
    fn encryption_serializes_like_the_aws_identifiers() {
        let inv = Inventory::workshop();
        let value = serde_json::to_value(inv.get_bucket_encryption("backup-2024").unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "bucket": "backup-2024", "encryption": "AES256", "compliant": true })
        );

        let value =
            serde_json::to_value(inv.get_bucket_encryption("prod-customer-data").unwrap()).unwrap();
        assert!(value["encryption"].is_null());
    }

    #[test]
    fn bucket_details_return_the_full_record() {
        let inv = Inventory::workshop();
        let details = inv.get_bucket_details("backup-2024").unwrap();
        assert!(!details.versioning);
        assert_eq!(details.tags.get("Environment").map(String::as_str), Some("Production"));
        assert!(!details.tags.contains_key("Owner"));
    }

    #[test]
    fn instance_listing_and_tags() {
        let inv = Inventory::workshop();
        let listed = inv.list_instances();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "i-1234567890abcdef0");
        assert_eq!(listed[0].name, "web-server-01");
        assert_eq!(listed[0].state, InstanceState::Running);

        let tags = inv.get_instance_tags("i-1234567890abcdef0").unwrap();
        assert_eq!(tags.required_tags, vec!["Name", "Environment", "Owner", "CostCenter"]);
        assert_eq!(tags.missing_tags, vec!["Owner", "CostCenter"]);

        let tags = inv.get_instance_tags("i-0987654321fedcba0").unwrap();
        assert!(tags.missing_tags.is_empty());
    }

    #[test]
    fn mfa_status_for_workshop_policies() {
        let inv = Inventory::workshop();
        let admin = inv.check_mfa_status("AdminAccess").unwrap();
        assert!(!admin.has_mfa);
        assert!(!admin.compliant);

        let ro = inv.check_mfa_status("ReadOnlyAccess").unwrap();
        assert!(ro.compliant);

        let listed = inv.list_policies();
        assert_eq!(listed[0].arn, "arn:aws:iam::123456789012:policy/AdminAccess");
    }

    #[test]
    fn unknown_keys_are_not_found() {
        let inv = Inventory::workshop();
        assert_eq!(
            inv.get_bucket_encryption("nope"),
            Err(LookupError::BucketNotFound("nope".to_string()))
        );
        assert_eq!(
            inv.get_bucket_details("nope").unwrap_err().to_string(),
            "Bucket nope not found"
        );
        assert_eq!(
            inv.get_instance_tags("i-missing").unwrap_err(),
            LookupError::InstanceNotFound("i-missing".to_string())
        );
        assert_eq!(
            inv.check_mfa_status("Admin").unwrap_err().to_string(),
            "Policy Admin not found"
        );
    }
}
