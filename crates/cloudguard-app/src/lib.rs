//! Use case orchestration for cloudguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, settings, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and output.

#![forbid(unsafe_code)]

mod check;
mod demo;
mod explain;
mod inventory;
mod render;
mod report;
mod tools;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use demo::run_demo;
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use inventory::{load_inventory, parse_inventory_json};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use tools::{TOOLS, ToolError, ToolSpec, find_tool, invoke_tool};
