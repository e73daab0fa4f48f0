//! Pipeline-specific error types.

use crate::pipeline::kind::NodeKind;
use thiserror::Error;

/// Failure reported by a node's `run`.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct NodeError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl NodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error with a message.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<PipelineError> for NodeError {
    fn from(err: PipelineError) -> Self {
        NodeError::with_source(err.to_string(), err)
    }
}

/// Errors that can occur while assembling or running a pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Node {node} requires {missing}, which is not available when it is added")]
    UnsatisfiedDependency { node: NodeKind, missing: NodeKind },

    #[error("Node {node} failed: {source}")]
    NodeExecution {
        node: NodeKind,
        #[source]
        source: NodeError,
    },

    #[error("Node {0} is not in the pipeline")]
    NodeNotFound(NodeKind),

    #[error("Node {0} is currently running")]
    NodeBusy(NodeKind),

    #[error("Pipeline has already been executed")]
    AlreadyExecuted,
}

impl PipelineError {
    /// The node kind this error is about, if any.
    pub fn node(&self) -> Option<NodeKind> {
        match self {
            PipelineError::UnsatisfiedDependency { node, .. }
            | PipelineError::NodeExecution { node, .. } => Some(*node),
            PipelineError::NodeNotFound(kind) | PipelineError::NodeBusy(kind) => Some(*kind),
            PipelineError::AlreadyExecuted => None,
        }
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    struct Calc;
    struct Input;

    #[test]
    fn test_unsatisfied_dependency_names_missing_kind() {
        let err = PipelineError::UnsatisfiedDependency {
            node: NodeKind::of::<Calc>(),
            missing: NodeKind::of::<Input>(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Calc"));
        assert!(msg.contains("Input"));
        assert_eq!(err.node(), Some(NodeKind::of::<Calc>()));
    }

    #[test]
    fn test_node_execution_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = PipelineError::NodeExecution {
            node: NodeKind::of::<Calc>(),
            source: NodeError::with_source("could not load", io),
        };
        assert!(err.to_string().contains("could not load"));
        let node_err = err.source().expect("node error source");
        assert!(node_err.source().is_some());
    }

    #[test]
    fn test_lookup_failure_message_names_kind() {
        let node_err = NodeError::from(PipelineError::NodeNotFound(NodeKind::of::<Input>()));
        assert!(node_err.message().contains("Input"));

        let err = PipelineError::NodeExecution {
            node: NodeKind::of::<Calc>(),
            source: node_err,
        };
        assert_eq!(
            err.to_string(),
            "Node Calc failed: Node Input is not in the pipeline"
        );
    }

    #[test]
    fn test_already_executed_has_no_node() {
        assert_eq!(PipelineError::AlreadyExecuted.node(), None);
    }
}
