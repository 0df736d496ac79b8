use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Cloudguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Findings: {} (emitted) / {} (total)\n",
        verdict, report.data.findings_emitted, report.data.findings_total
    ));
    if let Some(s) = &report.data.summary {
        out.push_str(&format!(
            "- Compliance score: {} ({} violations across {} resources)\n",
            s.compliance_score, s.total_violations, s.resources_scanned
        ));
    }
    out.push('\n');

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        out.push_str(&format!("- [{}] `{}` / `{}`: {}", sev, f.check_id, f.code, f.message));
        if let Some(loc) = &f.location {
            out.push_str(&format!(" ({} `{}`)", loc.service, loc.resource_id));
        }
        out.push('\n');

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
