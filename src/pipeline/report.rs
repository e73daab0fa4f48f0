//! Statistics about one pipeline run.

use serde::{Deserialize, Serialize};

/// Timing for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRunStats {
    /// Position of the node in store order
    pub position: usize,

    /// Node name as reported by the node
    pub name: String,

    /// Time spent in the node's `run`, in microseconds
    pub elapsed_us: u64,
}

/// Statistics about a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-node stats in execution order
    pub nodes: Vec<NodeRunStats>,

    /// Wall time of the whole run in microseconds
    pub total_time_us: u64,
}

impl RunReport {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            total_time_us: 0,
        }
    }

    /// Number of nodes executed
    pub fn executed(&self) -> usize {
        self.nodes.len()
    }

    /// The node that took the longest, if any ran
    pub fn slowest(&self) -> Option<&NodeRunStats> {
        self.nodes.iter().max_by_key(|n| n.elapsed_us)
    }
}
