use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::notify::{Notification, NotificationBus, NotificationStream};
use crate::source::StatusSource;
use crate::view::ViewModel;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Pause between the end of one poll and the start of the next.
    pub interval: Duration,
    /// Notifications a slow subscriber may fall behind before skipping.
    pub notification_capacity: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            notification_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The snapshot was merged into the view.
    Applied { notifications: usize },
    /// The server is up but had nothing to show yet.
    NotReady,
    /// The endpoint could not be reached. `recorded` is false when the
    /// failure repeated the previous error and was not logged again.
    Offline { recorded: bool },
}

/// Keeps a [`ViewModel`] in step with a [`StatusSource`].
///
/// Every cycle awaits its fetch before sleeping for the interval, so there
/// is never more than one request in flight and responses are applied in the
/// order they were requested.
pub struct StatusPoller<S> {
    source: S,
    config: PollerConfig,
    view: ViewModel,
    state_tx: watch::Sender<ViewModel>,
    bus: NotificationBus,
}

impl<S: StatusSource> StatusPoller<S> {
    pub fn new(source: S, config: PollerConfig) -> Self {
        let view = ViewModel::new();
        let (state_tx, _rx) = watch::channel(view.clone());
        let bus = NotificationBus::new(config.notification_capacity);
        Self {
            source,
            config,
            view,
            state_tx,
            bus,
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Receiver that is marked changed whenever the view changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.state_tx.subscribe()
    }

    /// Toasts emitted from now on.
    pub fn notifications(&self) -> NotificationStream {
        self.bus.subscribe()
    }

    pub fn record_warning(&mut self, message: impl Into<String>) {
        let n = self.view.record_warning(message.into());
        self.emit(n);
        self.publish();
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        let n = self.view.record_error(message.into());
        self.emit(n);
        self.publish();
    }

    /// Run a single fetch-and-reconcile cycle.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let fetched = self.source.fetch().await;
        let outcome = match fetched {
            Ok(report) => match self.view.apply_report(report) {
                Some(notifications) => {
                    let count = notifications.len();
                    notifications.into_iter().for_each(|n| self.emit(n));
                    PollOutcome::Applied {
                        notifications: count,
                    }
                }
                None => {
                    tracing::debug!("status endpoint not ready yet");
                    PollOutcome::NotReady
                }
            },
            Err(err) if !err.is_connectivity() => {
                tracing::warn!(error=%err, "ignoring undecodable status document");
                PollOutcome::NotReady
            }
            Err(err) => {
                tracing::warn!(error=%err, "status endpoint unreachable");
                let recorded = match self.view.apply_failure(&err.to_string()) {
                    Some(n) => {
                        self.emit(n);
                        true
                    }
                    None => false,
                };
                PollOutcome::Offline { recorded }
            }
        };
        self.publish();
        outcome
    }

    /// Poll until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// A request still in flight at shutdown is abandoned.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(interval_ms = self.config.interval.as_millis() as u64, "status poller started");
        loop {
            if *shutdown.borrow() {
                break;
            }

            let outcome = tokio::select! {
                _ = shutdown.changed() => break,
                outcome = self.poll_once() => outcome,
            };
            tracing::debug!(?outcome, "poll cycle finished");

            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
        tracing::info!("status poller stopped");
    }

    /// Move the poller onto its own task.
    pub fn spawn(self) -> PollerHandle
    where
        S: 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let state_rx = self.subscribe();
        let bus = self.bus.clone();
        let join = tokio::spawn(self.run(shutdown_rx));
        PollerHandle {
            state_rx,
            bus,
            shutdown_tx,
            join,
        }
    }

    fn emit(&self, notification: Notification) {
        tracing::debug!(
            severity = ?notification.severity,
            message = %notification.message,
            "notification"
        );
        self.bus.emit(notification);
    }

    fn publish(&self) {
        let view = &self.view;
        self.state_tx.send_if_modified(|current| {
            if current == view {
                return false;
            }
            *current = view.clone();
            true
        });
    }
}

/// Handle to a spawned [`StatusPoller`].
pub struct PollerHandle {
    state_rx: watch::Receiver<ViewModel>,
    bus: NotificationBus,
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl PollerHandle {
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.state_rx.clone()
    }

    pub fn notifications(&self) -> NotificationStream {
        self.bus.subscribe()
    }

    /// Latest published view.
    pub fn snapshot(&self) -> ViewModel {
        self.state_rx.borrow().clone()
    }

    pub fn request_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        if let Err(e) = self.join.await {
            tracing::warn!(error=%e, "status poller task failed");
        }
    }
}
