use super::utils::{FindingSpec, build_allowlist, is_allowed, make_finding};
use crate::inventory::Inventory;
use crate::policy::EffectiveConfig;
use crate::rules;
use cloudguard_types::{Finding, Service, ids};
use serde_json::json;

pub fn run(inventory: &Inventory, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_IAM_ADMIN_MFA) else {
        return;
    };
    let allow = build_allowlist(policy);

    for iam_policy in inventory.policies() {
        if rules::policy_is_compliant(iam_policy) || is_allowed(allow.as_ref(), &iam_policy.name) {
            continue;
        }

        out.push(make_finding(
            policy,
            FindingSpec {
                check_id: ids::CHECK_IAM_ADMIN_MFA,
                code: ids::CODE_ADMIN_WITHOUT_MFA,
                service: Service::Iam,
                resource_id: &iam_policy.name,
                detail: None,
                message: format!(
                    "administrative policy '{}' does not require MFA",
                    iam_policy.name
                ),
                help: "Require MFA for every principal the policy is attached to.",
                data: json!({
                    "policy": iam_policy.name,
                    "arn": iam_policy.arn,
                    "attached_to": iam_policy.attached_to,
                }),
            },
        ));
    }
}
