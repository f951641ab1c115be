use std::collections::{HashMap, HashSet};

use panchaea_common::{
    ClientReport, ClusterStatus, NodeState, StatusReport, WorkUnitReport, WorkUnitState,
};

use crate::notify::Notification;
use crate::palette::{node_color, LoadMetric};
use crate::view::{NodeView, ViewModel, WorkUnitView};

/// Most warnings (and, separately, errors) taken from one snapshot.
///
/// Anything past this in the same batch is dropped. This bounds a burst from
/// the server; it is not a protocol limit.
pub const MAX_LOG_BATCH: usize = 31;

impl ViewModel {
    /// Merge a snapshot into the view.
    ///
    /// Returns `None` and leaves the view untouched when the server has not
    /// published its work-unit list yet. Otherwise returns the toasts for the
    /// log entries that were appended. Sections missing from the snapshot
    /// keep their previous contents.
    pub fn apply_report(&mut self, report: StatusReport) -> Option<Vec<Notification>> {
        let StatusReport {
            status,
            warnings,
            errors,
            clients,
            work_units,
        } = report;
        let work_units = work_units?;

        let mut notifications = Vec::new();
        for message in capped("warning", warnings) {
            notifications.push(self.record_warning(message));
        }
        for message in capped("error", errors) {
            notifications.push(self.record_error(message));
        }

        if let Some(label) = status {
            self.set_status(ClusterStatus::from_wire(&label));
        }

        let busy = busy_threads(&work_units);
        if let Some(clients) = clients {
            self.nodes = clients
                .iter()
                .map(|c| node_view(c, busy.get(&c.id).map_or(0, HashSet::len)))
                .collect();
        }
        self.work_units = work_units.iter().map(work_unit_view).collect();

        Some(notifications)
    }

    /// Mark the cluster offline after a failed fetch.
    ///
    /// The failure is logged unless the last error already carries the same
    /// message, so a server that stays down produces one entry, not one per
    /// poll.
    pub fn apply_failure(&mut self, message: &str) -> Option<Notification> {
        self.set_status(ClusterStatus::Offline);
        if self.errors.last().map(String::as_str) == Some(message) {
            return None;
        }
        Some(self.record_error(message.to_string()))
    }
}

fn capped(kind: &'static str, batch: Option<Vec<String>>) -> impl Iterator<Item = String> {
    let batch = batch.unwrap_or_default();
    if batch.len() > MAX_LOG_BATCH {
        tracing::warn!(
            kind,
            received = batch.len(),
            dropped = batch.len() - MAX_LOG_BATCH,
            "log batch over limit, dropping the rest"
        );
    }
    batch.into_iter().take(MAX_LOG_BATCH)
}

/// Threads per client that currently run a work unit.
fn busy_threads(work_units: &[WorkUnitReport]) -> HashMap<i64, HashSet<u32>> {
    let mut busy: HashMap<i64, HashSet<u32>> = HashMap::new();
    for wu in work_units {
        if wu.status != WorkUnitState::Running {
            continue;
        }
        if let Some(client_id) = wu.client_id() {
            busy.entry(client_id).or_default().insert(wu.thread);
        }
    }
    busy
}

fn node_view(client: &ClientReport, busy: usize) -> NodeView {
    let state = client.state();
    NodeView {
        id: client.id,
        thread_count: client.threads,
        status: client.status.clone(),
        status_color: node_color(state),
        is_running: state == NodeState::Running,
        load_metric: LoadMetric::from_busy_threads(busy, client.threads),
    }
}

fn work_unit_view(wu: &WorkUnitReport) -> WorkUnitView {
    WorkUnitView {
        client_id: wu.client_id(),
        thread: wu.thread,
        started_at: wu.started_at(),
        status: wu.status,
        attempt: wu.attempt,
    }
}
