use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{ClientReport, WorkUnitReport};

/// Label shown before the first usable snapshot arrives.
pub const PLACEHOLDER_STATUS: &str = "...";

/// Overall state of the job as mirrored by the dashboard.
///
/// `Offline` is produced locally when the status endpoint cannot be reached;
/// the server never sends it. Any label the dashboard does not know is kept
/// verbatim in `Unknown` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClusterStatus {
    Ready,
    Running,
    Failed,
    Offline,
    Unknown(String),
}

impl ClusterStatus {
    pub fn placeholder() -> Self {
        ClusterStatus::Unknown(PLACEHOLDER_STATUS.to_string())
    }

    /// Parse a status label received from the server.
    pub fn from_wire(label: &str) -> Self {
        match label {
            "READY" => ClusterStatus::Ready,
            "RUNNING" => ClusterStatus::Running,
            "FAILED" => ClusterStatus::Failed,
            other => ClusterStatus::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ClusterStatus::Ready => "READY",
            ClusterStatus::Running => "RUNNING",
            ClusterStatus::Failed => "FAILED",
            ClusterStatus::Offline => "OFFLINE",
            ClusterStatus::Unknown(label) => label,
        }
    }
}

impl Default for ClusterStatus {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl std::fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for ClusterStatus {
    fn from(label: String) -> Self {
        ClusterStatus::from_wire(&label)
    }
}

impl From<ClusterStatus> for String {
    fn from(status: ClusterStatus) -> Self {
        status.label().to_string()
    }
}

/// Document served by the job server's `/api` endpoint.
///
/// The server drains its warning and error buffers on every request, so
/// `warnings` and `errors` only hold entries produced since the previous
/// poll. Every section may be missing or `null`.
///
/// Sections are decoded one at a time: a section that does not have the
/// expected shape is logged and reads as missing, so one bad field never
/// costs the entries in the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct StatusReport {
    #[serde(default, deserialize_with = "section")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "section")]
    pub warnings: Option<Vec<String>>,
    #[serde(default, deserialize_with = "section")]
    pub errors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "section")]
    pub clients: Option<Vec<ClientReport>>,
    #[serde(default, deserialize_with = "section")]
    pub work_units: Option<Vec<WorkUnitReport>>,
}

fn section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            tracing::warn!(
                section = std::any::type_name::<T>(),
                error = %err,
                "skipping malformed status section"
            );
            Ok(None)
        }
    }
}

impl StatusReport {
    /// The server publishes `WorkUnits: null` until the job has been
    /// prepared; such a report carries nothing worth applying.
    pub fn is_ready(&self) -> bool {
        self.work_units.is_some()
    }
}
