use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::ClientReport;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkUnitState {
    New,
    Running,
    Completed,
    Stuck,
    Failed,
    Dead,
    #[default]
    #[serde(other)]
    Unknown,
}

impl WorkUnitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkUnitState::New => "new",
            WorkUnitState::Running => "running",
            WorkUnitState::Completed => "completed",
            WorkUnitState::Stuck => "stuck",
            WorkUnitState::Failed => "failed",
            WorkUnitState::Dead => "dead",
            WorkUnitState::Unknown => "unknown",
        }
    }
}

/// One chunk of job data and the client thread it was handed to.
///
/// The payload and result blobs the server also sends are not needed by the
/// dashboard and are skipped during decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WorkUnitReport {
    #[serde(default)]
    pub client: Option<ClientReport>,

    #[serde(default)]
    pub thread: u32,

    /// RFC 3339 timestamp of the last assignment.
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub status: WorkUnitState,

    #[serde(default)]
    pub attempt: u32,
}

impl WorkUnitReport {
    pub fn client_id(&self) -> Option<i64> {
        self.client.as_ref().map(|c| c.id)
    }

    /// Assignment time, or `None` when missing, malformed, or the Go zero
    /// time (`0001-01-01T00:00:00Z`) of a never-assigned unit.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.time.as_deref()?;
        let parsed = DateTime::parse_from_rfc3339(raw).ok()?;
        if parsed.year() <= 1 {
            return None;
        }
        Some(parsed.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_blobs() {
        let wu: WorkUnitReport = serde_json::from_str(
            r#"{"Data":"aGVsbG8=","Client":{"ID":1,"Status":"running","Threads":2},
                "Thread":2,"Time":"2020-05-01T10:00:00+02:00","Status":"running",
                "Attempt":1,"Result":null}"#,
        )
        .unwrap();
        assert_eq!(wu.client_id(), Some(1));
        assert_eq!(wu.thread, 2);
        assert_eq!(wu.status, WorkUnitState::Running);
        assert_eq!(wu.attempt, 1);
        assert_eq!(
            wu.started_at().map(|t| t.to_rfc3339()),
            Some("2020-05-01T08:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_zero_time_and_unknown_state() {
        let wu: WorkUnitReport = serde_json::from_str(
            r#"{"Client":null,"Thread":0,"Time":"0001-01-01T00:00:00Z","Status":"exploded"}"#,
        )
        .unwrap();
        assert_eq!(wu.client_id(), None);
        assert_eq!(wu.started_at(), None);
        assert_eq!(wu.status, WorkUnitState::Unknown);
    }
}
