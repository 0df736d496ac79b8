use crate::inventory::Inventory;
use crate::policy::EffectiveConfig;
use cloudguard_types::Finding;

mod ec2_required_tags;
mod iam_admin_mfa;
mod s3_buckets;
mod utils;


pub fn run_all(inventory: &Inventory, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    s3_buckets::run(inventory, cfg, out);
    ec2_required_tags::run(inventory, cfg, out);
    iam_admin_mfa::run(inventory, cfg, out);
}
