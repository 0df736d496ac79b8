//! The named tool catalog: each read-only inventory query, addressable by name.

use cloudguard_domain::{Inventory, LookupError, summarize};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

/// A tool the catalog exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Name of the single required argument, if the tool takes one.
    pub arg: Option<&'static str>,
}

pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_s3_buckets",
        description: "List all S3 bucket names",
        arg: None,
    },
    ToolSpec {
        name: "get_bucket_encryption",
        description: "Check the default encryption of a bucket",
        arg: Some("bucket_name"),
    },
    ToolSpec {
        name: "get_bucket_details",
        description: "Get the full record of a bucket",
        arg: Some("bucket_name"),
    },
    ToolSpec {
        name: "list_ec2_instances",
        description: "List all EC2 instances with id, name, and state",
        arg: None,
    },
    ToolSpec {
        name: "get_instance_tags",
        description: "Get the tags of an instance and the required tags it is missing",
        arg: Some("instance_id"),
    },
    ToolSpec {
        name: "list_iam_policies",
        description: "List all IAM policies with name and ARN",
        arg: None,
    },
    ToolSpec {
        name: "check_mfa_status",
        description: "Check whether a policy requires MFA and is compliant",
        arg: Some("policy_name"),
    },
    ToolSpec {
        name: "get_compliance_summary",
        description: "Count violations across all services and compute a compliance score",
        arg: None,
    },
];

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("tool {tool} requires argument <{arg}>")]
    MissingArgument {
        tool: &'static str,
        arg: &'static str,
    },
    #[error(transparent)]
    NotFound(#[from] LookupError),
    #[error("serialize tool output")]
    Serialize(#[from] serde_json::Error),
}

pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|t| t.name == name)
}

/// Invoke a tool by name and return its output as JSON.
///
/// `now` stamps the compliance summary; the other tools ignore it.
pub fn invoke_tool(
    inventory: &Inventory,
    name: &str,
    arg: Option<&str>,
    now: OffsetDateTime,
) -> Result<Value, ToolError> {
    let spec = find_tool(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    if let (Some(arg_name), None) = (spec.arg, arg) {
        return Err(ToolError::MissingArgument {
            tool: spec.name,
            arg: arg_name,
        });
    }
    debug!(tool = spec.name, arg, "invoking tool");

    let key = arg.unwrap_or_default();
    let value = match spec.name {
        "list_s3_buckets" => serde_json::to_value(inventory.list_bucket_names())?,
        "get_bucket_encryption" => serde_json::to_value(inventory.get_bucket_encryption(key)?)?,
        "get_bucket_details" => serde_json::to_value(inventory.get_bucket_details(key)?)?,
        "list_ec2_instances" => serde_json::to_value(inventory.list_instances())?,
        "get_instance_tags" => serde_json::to_value(inventory.get_instance_tags(key)?)?,
        "list_iam_policies" => serde_json::to_value(inventory.list_policies())?,
        "check_mfa_status" => serde_json::to_value(inventory.check_mfa_status(key)?)?,
        "get_compliance_summary" => serde_json::to_value(summarize(inventory, now))?,
        other => return Err(ToolError::UnknownTool(other.to_string())),
    };
    Ok(value)
}
