use serde::{Deserialize, Serialize};

/// A connected worker node as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ClientReport {
    /// The Go server encodes this as `ID`; newer builds send `Id`.
    #[serde(rename = "Id", alias = "ID")]
    pub id: i64,

    #[serde(default)]
    pub threads: u32,

    /// Kept verbatim. Usually `ready`, `running` or `failed`, but the server
    /// also marks clients `stuck` or `unknown`.
    #[serde(default)]
    pub status: String,
}

impl ClientReport {
    pub fn state(&self) -> NodeState {
        NodeState::from_wire(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    Ready,
    Running,
    Failed,
    Unrecognized,
}

impl NodeState {
    pub fn from_wire(label: &str) -> Self {
        match label {
            "ready" => NodeState::Ready,
            "running" => NodeState::Running,
            "failed" => NodeState::Failed,
            _ => NodeState::Unrecognized,
        }
    }
}
