use std::fmt::Write;

use panchaea_dashboard::{Notification, StatusColor, ToastTray, ViewModel};

/// Log lines shown per section; the counts still cover everything.
const LOG_TAIL: usize = 5;

pub fn print_view(view: &ViewModel, tray: &ToastTray) {
    print!("{}", format_view(view, tray));
}

pub fn print_view_json(view: &ViewModel) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(view)?);
    Ok(())
}

pub fn print_toast(notification: &Notification) {
    eprintln!("{}", notification.text());
}

pub fn format_view(view: &ViewModel, tray: &ToastTray) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Panchaea Cluster Status ===");
    let _ = writeln!(
        out,
        "\n  Status: {} {}",
        status_marker(view.status_color()),
        view.status()
    );

    let _ = writeln!(out, "\n[Nodes]");
    if view.nodes().is_empty() {
        let _ = writeln!(out, "  (No nodes connected)");
    } else {
        let _ = writeln!(
            out,
            "  {:<8} {:<8} {:<10} {:<8} {:<4}",
            "Node ID", "Threads", "Status", "Color", "Load"
        );
        for node in view.nodes() {
            let status = if node.is_running {
                format!("{}*", node.status)
            } else {
                node.status.clone()
            };
            let _ = writeln!(
                out,
                "  {:<8} {:<8} {:<10} {:<8} {}",
                node.id,
                node.thread_count,
                status,
                node.status_color.token(),
                node.load_metric.glyph()
            );
        }
    }

    if !view.work_units().is_empty() {
        let _ = writeln!(out, "\n[Work Units]");
        let _ = writeln!(
            out,
            "  {:<8} {:<8} {:<11} {:<8} {:<20}",
            "Node", "Thread", "Status", "Attempt", "Started"
        );
        for wu in view.work_units() {
            let node = wu
                .client_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let started = wu
                .started_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "  {:<8} {:<8} {:<11} {:<8} {:<20}",
                node,
                wu.thread,
                wu.status.as_str(),
                wu.attempt,
                started
            );
        }
    }

    write_log(&mut out, "Warnings", view.warnings(), view.warnings_count());
    write_log(&mut out, "Errors", view.errors(), view.errors_count());

    if !tray.is_empty() {
        let _ = writeln!(out, "\n[Notifications]");
        for (i, n) in tray.visible().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, n.text());
        }
    }
    out.push('\n');
    out
}

fn write_log(out: &mut String, title: &str, entries: &[String], count: usize) {
    let _ = writeln!(out, "\n[{}] ({})", title, count);
    let skip = entries.len().saturating_sub(LOG_TAIL);
    if skip > 0 {
        let _ = writeln!(out, "  ... {} earlier", skip);
    }
    for entry in &entries[skip..] {
        let _ = writeln!(out, "  {}", entry);
    }
}

fn status_marker(color: StatusColor) -> &'static str {
    match color {
        StatusColor::Idle => "○",
        StatusColor::Active => "●",
        StatusColor::Error => "✗",
        StatusColor::Offline => "⊘",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panchaea_common::StatusReport;

    #[test]
    fn test_format_running_view() {
        let mut view = ViewModel::new();
        let warnings: Vec<String> = (0..7).map(|i| format!("w{i}")).collect();
        let report: StatusReport = serde_json::from_value(serde_json::json!({
            "Status": "RUNNING",
            "Clients": [{"Id": 0, "Threads": 4, "Status": "running"}],
            "Warnings": warnings,
            "WorkUnits": [
                {"Client": {"Id": 0, "Threads": 4, "Status": "running"}, "Thread": 1,
                 "Time": "2020-05-01T10:00:00Z", "Status": "running", "Attempt": 0}
            ],
        }))
        .unwrap();
        view.apply_report(report);

        let mut tray = ToastTray::new();
        tray.push(Notification::warning("w6"), tokio::time::Instant::now());

        let text = format_view(&view, &tray);
        assert!(text.contains("Status: ● RUNNING"));
        assert!(text.contains("running*"));
        assert!(text.contains("[Warnings] (7)"));
        assert!(text.contains("... 2 earlier"));
        assert!(!text.contains("  w1\n"));
        assert!(text.contains("  w6\n"));
        assert!(text.contains("2020-05-01 10:00:00"));
        assert!(text.contains("  1. ⚠ w6"));
    }

    #[test]
    fn test_format_empty_view() {
        let text = format_view(&ViewModel::new(), &ToastTray::new());
        assert!(text.contains("Status: ○ ..."));
        assert!(text.contains("(No nodes connected)"));
        assert!(text.contains("[Errors] (0)"));
        assert!(!text.contains("[Work Units]"));
        assert!(!text.contains("[Notifications]"));
    }
}
