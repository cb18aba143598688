use sa_core::models::AuditReport;

/// One line per site, then a summary, any unchecked URLs and skipped projects.
pub fn render_text(report: &AuditReport) -> String {
    let mut lines: Vec<String> = report
        .sites
        .iter()
        .map(|site| {
            let status = if site.is_locked_down { "LOCKED" } else { "OPEN" };
            format!("{status:<6}  {}", site.url)
        })
        .collect();

    let total = report.sites.len();
    let locked = report.locked_down_count();
    lines.push(format!(
        "{total} site(s) checked: {locked} locked down, {} exposed",
        total - locked
    ));

    if !report.failed_probes.is_empty() {
        lines.push(format!(
            "{} site(s) could not be checked",
            report.failed_probes.len()
        ));
    }
    for url in &report.failed_probes {
        lines.push(format!("UNKNOWN {url}"));
    }
    for skipped in &report.skipped_projects {
        lines.push(format!("skipped {} ({})", skipped.project, skipped.reason));
    }
    lines.join("\n")
}

pub fn render_json(report: &AuditReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
