//! CLI entry point for cloudguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `cloudguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use cloudguard_app::{
    CheckInput, ExplainOutput, TOOLS, ToolError, invoke_tool, load_inventory, parse_report_json,
    render_annotations, render_markdown, run_check, run_demo, run_explain, runtime_error_report,
    serialize_report, to_renderable, verdict_exit_code,
};
use cloudguard_settings::Overrides;
use cloudguard_types::CloudguardReport;
use time::OffsetDateTime;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cloudguard",
    version,
    about = "Compliance checks over a simulated AWS inventory"
)]
struct Cli {
    /// Inventory JSON file (defaults to the built-in workshop fixtures).
    #[arg(long, global = true)]
    inventory: Option<Utf8PathBuf>,

    /// Path to cloudguard config TOML (a missing file means defaults).
    #[arg(long, global = true, default_value = "cloudguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn|advisory).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `cloudguard_app=trace`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk through the inventory and print a compliance overview (default).
    Demo,

    /// List the available tools.
    Tools,

    /// Invoke one tool by name and print its JSON output.
    Tool {
        /// Tool name (see `cloudguard tools`).
        name: String,
        /// The tool's argument: a bucket name, instance id, or policy name.
        arg: Option<String>,
    },

    /// Evaluate policy and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/cloudguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/cloudguard/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cloudguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cloudguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "s3.encryption") or code (e.g., "encryption_disabled") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.cmd {
        None | Some(Commands::Demo) => cmd_demo(&cli),
        Some(Commands::Tools) => cmd_tools(),
        Some(Commands::Tool { ref name, ref arg }) => cmd_tool(&cli, name, arg.as_deref()),
        Some(Commands::Check {
            ref report_out,
            write_markdown,
            ref markdown_out,
        }) => cmd_check(&cli, report_out, write_markdown, markdown_out),
        Some(Commands::Md {
            ref report,
            ref output,
        }) => cmd_md(report, output.as_deref()),
        Some(Commands::Annotations { ref report, max }) => cmd_annotations(report, max),
        Some(Commands::Explain { ref identifier }) => cmd_explain(identifier),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn cmd_demo(cli: &Cli) -> anyhow::Result<()> {
    let inventory = load_inventory(cli.inventory.as_deref())?;
    let text = run_demo(&inventory, OffsetDateTime::now_utc())?;
    print!("{}", text);
    Ok(())
}

fn cmd_tools() -> anyhow::Result<()> {
    for tool in TOOLS {
        let arg = tool.arg.map(|a| format!("<{a}>")).unwrap_or_default();
        println!("{:<24} {:<14} {}", tool.name, arg, tool.description);
    }
    Ok(())
}

fn cmd_tool(cli: &Cli, name: &str, arg: Option<&str>) -> anyhow::Result<()> {
    let inventory = load_inventory(cli.inventory.as_deref())?;

    match invoke_tool(&inventory, name, arg, OffsetDateTime::now_utc()) {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).context("format tool output")?;
            println!("{}", text);
            Ok(())
        }
        Err(err @ (ToolError::NotFound(_) | ToolError::MissingArgument { .. })) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
        Err(err @ ToolError::UnknownTool(_)) => {
            eprintln!("{} (run `cloudguard tools` to list them)", err);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let inventory = load_inventory(cli.inventory.as_deref())?;
        let cfg_text = read_config(&cli.config)?;

        let overrides = Overrides {
            profile: cli.profile.clone(),
            max_findings: cli.max_findings,
        };

        let output = run_check(CheckInput {
            inventory: &inventory,
            config_text: &cfg_text,
            overrides,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;
        info!(path = %report_out, "wrote report");

        if write_markdown {
            let renderable = to_renderable(&output.report);
            let md = render_markdown(&renderable);
            write_text_file(markdown_out, &md).context("write markdown")?;
            info!(path = %markdown_out, "wrote markdown");
        }

        Ok(verdict_exit_code(output.report.verdict.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("cloudguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Missing config file is allowed (defaults apply).
fn read_config(path: &Utf8Path) -> anyhow::Result<String> {
    if !path.exists() {
        debug!(path = %path, "config file not found");
        return Ok(String::new());
    }
    std::fs::read_to_string(path).with_context(|| format!("read config: {}", path))
}

fn write_report_file(path: &Utf8Path, report: &CloudguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);
    let md = render_markdown(&renderable);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);

    for annotation in render_annotations(&renderable, max) {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", cloudguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                cloudguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
