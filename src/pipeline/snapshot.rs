//! Serializable view of an assembled pipeline, for logging and the host's
//! `--json` output.

use crate::pipeline::node::NodeState;
use serde::{Deserialize, Serialize};

/// Snapshot of a single pipeline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub position: usize,
    pub name: String,
    pub type_name: String,
    pub depends_on: Vec<String>,
    pub state: NodeState,
}

/// Complete snapshot of the pipeline, in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl PipelineSnapshot {
    /// Node names in store order.
    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Number of nodes that have finished running.
    pub fn computed(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.state == NodeState::Computed)
            .count()
    }
}

impl std::fmt::Display for PipelineSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for node in &self.nodes {
            write!(f, "{:>3}. {}", node.position, node.name)?;
            if !node.depends_on.is_empty() {
                write!(f, " <- {}", node.depends_on.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
