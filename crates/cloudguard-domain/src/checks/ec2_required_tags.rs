use super::utils::{FindingSpec, build_allowlist, is_allowed, make_finding};
use crate::inventory::Inventory;
use crate::policy::EffectiveConfig;
use crate::rules;
use cloudguard_types::{Finding, Service, ids};
use serde_json::json;

pub fn run(inventory: &Inventory, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_EC2_REQUIRED_TAGS) else {
        return;
    };
    let allow = build_allowlist(policy);

    for instance in inventory.instances() {
        if is_allowed(allow.as_ref(), &instance.id) {
            continue;
        }

        // One finding per missing tag, matching the summary's per-tag count.
        for tag in rules::missing_instance_tags(instance) {
            out.push(make_finding(
                policy,
                FindingSpec {
                    check_id: ids::CHECK_EC2_REQUIRED_TAGS,
                    code: ids::CODE_MISSING_REQUIRED_TAG,
                    service: Service::Ec2,
                    resource_id: &instance.id,
                    detail: Some(tag),
                    message: format!(
                        "instance '{}' ({}) is missing required tag '{}'",
                        instance.id, instance.name, tag
                    ),
                    help: "Add the tag to the instance; required tags are Name, Environment, Owner, CostCenter.",
                    data: json!({
                        "instance_id": instance.id,
                        "name": instance.name,
                        "missing_tag": tag,
                    }),
                },
            ));
        }
    }
}
