use chrono::{DateTime, Utc};
use serde::Serialize;

use panchaea_common::{ClusterStatus, WorkUnitState};

use crate::notify::Notification;
use crate::palette::{status_color, LoadMetric, NodeColor, StatusColor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: i64,
    pub thread_count: u32,
    pub status: String,
    pub status_color: NodeColor,
    pub is_running: bool,
    pub load_metric: LoadMetric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkUnitView {
    pub client_id: Option<i64>,
    pub thread: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub status: WorkUnitState,
    pub attempt: u32,
}

/// Everything the dashboard currently shows.
///
/// Only the poller mutates a `ViewModel`; renderers get clones. The warning
/// and error logs are append-only and their counts always equal their
/// lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub(crate) status: ClusterStatus,
    pub(crate) status_color: StatusColor,
    pub(crate) nodes: Vec<NodeView>,
    pub(crate) work_units: Vec<WorkUnitView>,
    pub(crate) warnings: Vec<String>,
    pub(crate) warnings_count: usize,
    pub(crate) errors: Vec<String>,
    pub(crate) errors_count: usize,
}

impl ViewModel {
    pub fn new() -> Self {
        let status = ClusterStatus::placeholder();
        Self {
            status_color: status_color(&status),
            status,
            nodes: Vec::new(),
            work_units: Vec::new(),
            warnings: Vec::new(),
            warnings_count: 0,
            errors: Vec::new(),
            errors_count: 0,
        }
    }

    pub fn status(&self) -> &ClusterStatus {
        &self.status
    }

    pub fn status_color(&self) -> StatusColor {
        self.status_color
    }

    pub fn nodes(&self) -> &[NodeView] {
        &self.nodes
    }

    pub fn work_units(&self) -> &[WorkUnitView] {
        &self.work_units
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn warnings_count(&self) -> usize {
        self.warnings_count
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn errors_count(&self) -> usize {
        self.errors_count
    }

    pub(crate) fn set_status(&mut self, status: ClusterStatus) {
        self.status_color = status_color(&status);
        self.status = status;
    }

    /// Append to the warning log and return the toast to show for it.
    pub fn record_warning(&mut self, message: String) -> Notification {
        let notification = Notification::warning(message.clone());
        self.warnings.push(message);
        self.warnings_count = self.warnings.len();
        notification
    }

    /// Append to the error log and return the toast to show for it.
    pub fn record_error(&mut self, message: String) -> Notification {
        let notification = Notification::error(message.clone());
        self.errors.push(message);
        self.errors_count = self.errors.len();
        notification
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    #[test]
    fn test_initial_state() {
        let view = ViewModel::new();
        assert_eq!(view.status().label(), "...");
        assert_eq!(view.status_color(), StatusColor::Idle);
        assert!(view.nodes().is_empty());
        assert_eq!(view.warnings_count(), 0);
        assert_eq!(view.errors_count(), 0);
    }

    #[test]
    fn test_record_keeps_duplicates() {
        let mut view = ViewModel::new();
        let n1 = view.record_warning("[1] Thread 2 is stuck".to_string());
        let n2 = view.record_warning("[1] Thread 2 is stuck".to_string());
        assert_eq!(view.warnings_count(), 2);
        assert_eq!(view.warnings().len(), 2);
        assert_eq!(n1.severity, Severity::Warning);
        assert_ne!(n1.id, n2.id);

        let n = view.record_error("[!] WorkUnit not found".to_string());
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.message, "[!] WorkUnit not found");
        assert_eq!(view.errors(), ["[!] WorkUnit not found".to_string()]);
        assert_eq!(view.errors_count(), 1);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut view = ViewModel::new();
        view.record_error("boom".to_string());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "...");
        assert_eq!(json["statusColor"], "idle");
        assert_eq!(json["errorsCount"], 1);
        assert_eq!(json["warningsCount"], 0);
        assert!(json["workUnits"].as_array().unwrap().is_empty());
    }
}
