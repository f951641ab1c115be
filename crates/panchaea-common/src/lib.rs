pub mod cluster;
pub mod node_status;
pub mod work_unit;

pub use cluster::{ClusterStatus, StatusReport, PLACEHOLDER_STATUS};
pub use node_status::{ClientReport, NodeState};
pub use work_unit::{WorkUnitReport, WorkUnitState};

pub mod telemetry;
