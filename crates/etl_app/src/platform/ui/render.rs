use etl_core::{LaunchStatus, PipelineViewModel, StageStatus};

pub const HELP: &str = "Commands: [r]estart  [e]xport CSV  [s]ource JSON  [h]elp  [q]uit";

/// Renders the whole view as plain text, one frame per call.
pub fn render(view: &PipelineViewModel) -> String {
    let mut out = String::new();

    out.push_str("== Mini-ETL Pipeline ==\n");
    match &view.provenance {
        Some(provenance) => out.push_str(&format!(
            "[{}] source: {} · updated: {}\n",
            provenance.badge(),
            provenance.source_host,
            provenance.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        )),
        None => out.push_str("[LOADING] waiting for the first batch\n"),
    }
    if view.restarting {
        out.push_str("Restarting...\n");
    }

    let pills = view
        .stages
        .iter()
        .enumerate()
        .map(|(idx, pill)| {
            format!(
                "{}. {} [{}]",
                idx + 1,
                pill.name.to_uppercase(),
                status_label(pill.status)
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&pills);
    out.push('\n');

    if let Some(metrics) = &view.metrics {
        out.push_str(&format!(
            "Metrics: rows in {} | rows out {} | removed {} | upcoming {}\n",
            metrics.rows_in, metrics.rows_out, metrics.dedup_removed, metrics.upcoming
        ));
    }

    out.push_str("Log:\n");
    if view.log_lines.is_empty() {
        out.push_str("  (the log fills in automatically on every run)\n");
    }
    for line in &view.log_lines {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }

    if !view.launches.is_empty() {
        out.push_str("Latest missions:\n");
        for launch in &view.launches {
            out.push_str(&format!(
                "  - {} · {} · {}\n",
                launch.name,
                launch.date_utc.as_deref().unwrap_or("date unknown"),
                launch_label(launch.status)
            ));
        }
    }

    out
}

fn status_label(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Pending => "pending",
        StageStatus::Active => "active",
        StageStatus::Done => "done",
    }
}

fn launch_label(status: LaunchStatus) -> &'static str {
    match status {
        LaunchStatus::Success => "✅ Success",
        LaunchStatus::Upcoming => "🕒 Upcoming",
        LaunchStatus::Failed => "⚠️ Failed",
    }
}
