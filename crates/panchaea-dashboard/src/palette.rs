//! Display lookups for statuses.
//!
//! Renderers decide what a palette entry looks like; the lookups here only
//! pick the entry. Unrecognized inputs fall back to the calm entry of each
//! table instead of failing.

use serde::{Serialize, Serializer};

use panchaea_common::{ClusterStatus, NodeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Idle,
    Active,
    Error,
    Offline,
}

impl StatusColor {
    pub fn token(&self) -> &'static str {
        match self {
            StatusColor::Idle => "idle",
            StatusColor::Active => "active",
            StatusColor::Error => "error",
            StatusColor::Offline => "offline",
        }
    }
}

pub fn status_color(status: &ClusterStatus) -> StatusColor {
    match status {
        ClusterStatus::Failed => StatusColor::Error,
        ClusterStatus::Running => StatusColor::Active,
        ClusterStatus::Ready => StatusColor::Idle,
        ClusterStatus::Offline => StatusColor::Offline,
        ClusterStatus::Unknown(_) => StatusColor::Idle,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeColor {
    Neutral,
    Active,
    Alert,
}

impl NodeColor {
    pub fn token(&self) -> &'static str {
        match self {
            NodeColor::Neutral => "neutral",
            NodeColor::Active => "active",
            NodeColor::Alert => "alert",
        }
    }
}

pub fn node_color(state: NodeState) -> NodeColor {
    match state {
        NodeState::Ready => NodeColor::Neutral,
        NodeState::Running => NodeColor::Active,
        NodeState::Failed => NodeColor::Alert,
        NodeState::Unrecognized => NodeColor::Neutral,
    }
}

const LOAD_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Node load as one of eight bar heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadMetric(u8);

impl LoadMetric {
    pub const IDLE: LoadMetric = LoadMetric(1);
    pub const FULL: LoadMetric = LoadMetric(8);

    /// Share of `threads` that are busy, rounded up to the next eighth.
    /// Never drops below the lowest bar.
    pub fn from_busy_threads(busy: usize, threads: u32) -> Self {
        if threads == 0 || busy == 0 {
            return Self::IDLE;
        }
        let threads = threads as usize;
        let level = (busy.min(threads) * 8).div_ceil(threads);
        LoadMetric(level.clamp(1, 8) as u8)
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    pub fn glyph(&self) -> char {
        LOAD_BARS[usize::from(self.0.clamp(1, 8)) - 1]
    }
}

impl Default for LoadMetric {
    fn default() -> Self {
        Self::IDLE
    }
}

impl Serialize for LoadMetric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color_table() {
        assert_eq!(status_color(&ClusterStatus::from_wire("READY")), StatusColor::Idle);
        assert_eq!(status_color(&ClusterStatus::from_wire("RUNNING")), StatusColor::Active);
        assert_eq!(status_color(&ClusterStatus::from_wire("FAILED")), StatusColor::Error);
        assert_eq!(status_color(&ClusterStatus::from_wire("GARBAGE")), StatusColor::Idle);
        assert_eq!(status_color(&ClusterStatus::Offline), StatusColor::Offline);
    }

    #[test]
    fn test_node_color_table() {
        assert_eq!(node_color(NodeState::from_wire("ready")), NodeColor::Neutral);
        assert_eq!(node_color(NodeState::from_wire("running")), NodeColor::Active);
        assert_eq!(node_color(NodeState::from_wire("failed")), NodeColor::Alert);
        assert_eq!(node_color(NodeState::from_wire("stuck")), NodeColor::Neutral);
    }

    #[test]
    fn test_load_levels() {
        assert_eq!(LoadMetric::from_busy_threads(0, 4), LoadMetric::IDLE);
        assert_eq!(LoadMetric::from_busy_threads(3, 0), LoadMetric::IDLE);
        assert_eq!(LoadMetric::from_busy_threads(1, 4).level(), 2);
        assert_eq!(LoadMetric::from_busy_threads(1, 3).level(), 3);
        assert_eq!(LoadMetric::from_busy_threads(4, 4), LoadMetric::FULL);
        assert_eq!(LoadMetric::from_busy_threads(9, 4), LoadMetric::FULL);
        assert_eq!(LoadMetric::IDLE.glyph(), '▁');
        assert_eq!(LoadMetric::FULL.glyph(), '█');
    }
}
