mod args;
mod output;

use anyhow::Result;
use clap::Parser;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use panchaea_common::telemetry::init_tracing;
use panchaea_dashboard::{HttpStatusSource, PollerConfig, StatusPoller, ToastTray, ViewModel};

use crate::args::{Args, OutputFormat};
use crate::output::{print_toast, print_view, print_view_json};

/// A line typed on stdin while the dashboard runs.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// `d`: dismiss the oldest toast.
    DismissOldest,
    /// `d N`: dismiss the N-th toast as numbered on screen.
    Dismiss(usize),
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "d" {
        return None;
    }
    let cmd = match parts.next() {
        None => Command::DismissOldest,
        Some(n) => Command::Dismiss(n.parse().ok().filter(|n| *n > 0)?),
    };
    parts.next().is_none().then_some(cmd)
}

fn dismiss(tray: &mut ToastTray, cmd: Command) -> bool {
    match cmd {
        Command::DismissOldest => tray.dismiss_oldest().is_some(),
        Command::Dismiss(n) => {
            let Some(id) = tray.visible().nth(n - 1).map(|t| t.id) else {
                return false;
            };
            tray.dismiss(id).is_some()
        }
    }
}

fn render(format: OutputFormat, view: &ViewModel, tray: &ToastTray) -> Result<()> {
    match format {
        OutputFormat::Table => print_view(view, tray),
        OutputFormat::Json => print_view_json(view)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _telemetry = init_tracing(
        "panchaea-dashboard",
        args.otlp_url.as_deref(),
        args.otlp_token.as_deref(),
    );

    let source = HttpStatusSource::new(&args.server_url, &args.api_path, args.request_timeout())?;
    tracing::info!(url = source.url(), "polling status endpoint");

    let config = PollerConfig {
        interval: args.interval(),
        ..Default::default()
    };
    let mut poller = StatusPoller::new(source, config);

    if args.once {
        let outcome = poller.poll_once().await;
        tracing::info!(?outcome, "single poll finished");
        return render(args.format, poller.view(), &ToastTray::new());
    }

    let mut notifications = poller.notifications();
    let handle = poller.spawn();
    let mut view_rx = handle.subscribe();
    let mut tray = ToastTray::new();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    render(args.format, &view_rx.borrow_and_update().clone(), &tray)?;

    loop {
        let next_expiry = tray.next_expiry();
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = view_rx.changed() => {
                if changed.is_err() {
                    tracing::warn!("status poller went away");
                    break;
                }
                let view = view_rx.borrow_and_update().clone();
                render(args.format, &view, &tray)?;
            }
            Some(n) = notifications.next() => {
                print_toast(&n);
                tray.push(n, Instant::now());
            }
            _ = tokio::time::sleep_until(next_expiry.unwrap_or_else(Instant::now)), if next_expiry.is_some() => {
                let expired = tray.expire(Instant::now());
                if !expired.is_empty() && args.format == OutputFormat::Table {
                    render(args.format, &view_rx.borrow().clone(), &tray)?;
                }
            }
            line = stdin.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        let Some(cmd) = parse_command(&line) else {
                            continue;
                        };
                        if dismiss(&mut tray, cmd) && args.format == OutputFormat::Table {
                            render(args.format, &view_rx.borrow().clone(), &tray)?;
                        }
                    }
                    Ok(None) | Err(_) => stdin_open = false,
                }
            }
        }
    }

    handle.shutdown_and_join().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use panchaea_dashboard::Notification;

    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("d"), Some(Command::DismissOldest));
        assert_eq!(parse_command(" d 2 "), Some(Command::Dismiss(2)));
        assert_eq!(parse_command("d 0"), None);
        assert_eq!(parse_command("d x"), None);
        assert_eq!(parse_command("d 1 2"), None);
        assert_eq!(parse_command("q"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_dismiss_by_position() {
        let now = Instant::now();
        let mut tray = ToastTray::new();
        tray.push(Notification::warning("a"), now);
        tray.push(Notification::error("b"), now);
        tray.push(Notification::warning("c"), now);

        assert!(dismiss(&mut tray, Command::Dismiss(2)));
        assert!(!dismiss(&mut tray, Command::Dismiss(3)));
        let left: Vec<_> = tray.visible().map(|n| n.message.as_str()).collect();
        assert_eq!(left, ["a", "c"]);

        assert!(dismiss(&mut tray, Command::DismissOldest));
        assert_eq!(tray.visible().next().unwrap().message, "c");
    }
}
