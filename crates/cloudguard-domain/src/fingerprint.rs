use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a resource finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - service
/// - resource id (bucket name, instance id, policy name)
/// - detail (if present, e.g. the missing tag)
pub fn fingerprint_for_resource(
    check_id: &str,
    code: &str,
    service: &str,
    resource_id: &str,
    detail: Option<&str>,
) -> String {
    let mut parts = vec![check_id, code, service, resource_id];
    if let Some(d) = detail {
        parts.push(d);
    }
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = fingerprint_for_resource("s3.encryption", "encryption_disabled", "s3", "b", None);
        let b = fingerprint_for_resource("s3.encryption", "encryption_disabled", "s3", "b", None);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn detail_changes_the_fingerprint() {
        let owner = fingerprint_for_resource("ec2.required_tags", "missing_required_tag", "ec2", "i-1", Some("Owner"));
        let cost = fingerprint_for_resource("ec2.required_tags", "missing_required_tag", "ec2", "i-1", Some("CostCenter"));
        assert_ne!(owner, cost);
    }
}
