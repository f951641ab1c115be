use std::pin::Pin;
use std::time::Duration;

use futures_core::Stream;
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use uuid::Uuid;

/// How long a toast stays up unless dismissed.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

/// A transient message for the renderer. Not part of the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub display_for: Duration,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            display_for: DISPLAY_DURATION,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Icon and message, ready to print.
    pub fn text(&self) -> String {
        format!("{} {}", self.severity.icon(), self.message)
    }
}

pub type NotificationStream = Pin<Box<dyn Stream<Item = Notification> + Send>>;

/// Fan-out of notifications to any number of renderers.
///
/// Emitting never waits: with no subscriber the notification is dropped, and
/// a subscriber that falls more than `capacity` behind skips the backlog.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn emit(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }

    pub fn subscribe(&self) -> NotificationStream {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::debug!(error=%e, "notification subscriber lagged");
                None
            }
        });
        Box::pin(stream)
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(256)
    }
}
