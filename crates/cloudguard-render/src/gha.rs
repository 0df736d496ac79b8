use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} title={service}/{resource}::[{check_id}:{code}] {message}`
///
/// Findings carry no file position, so the resource goes in the title.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Info => "notice",
        };

        let message = escape_data(&format!("[{}:{}] {}", f.check_id, f.code, f.message));

        match &f.location {
            Some(loc) => {
                let title = escape_property(&format!("{}/{}", loc.service, loc.resource_id));
                out.push(format!("::{} title={}::{}", level, title, message));
            }
            None => out.push(format!("::{}::{}", level, message)),
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
