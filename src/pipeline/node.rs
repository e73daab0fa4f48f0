//! Node abstraction for the pipeline.
//!
//! Two-layer design:
//! - **`Node<C>` trait** — what calculation types implement. Generic over the
//!   shared context type `C`, with a static `requires()` list used at
//!   assembly time.
//! - **`AnyNode<C>`** — the object-safe erasure the store keeps in its slots,
//!   adding `Any` access so the view can hand out typed references.

use crate::pipeline::error::NodeError;
use crate::pipeline::kind::{short_type_name, NodeKind};
use crate::pipeline::view::NodeView;
use serde::{Deserialize, Serialize};
use std::any::{type_name, Any};

/// A computation unit with a unique kind (its type) over a shared context `C`.
pub trait Node<C>: 'static {
    /// Kinds this node reads through the view while running.
    ///
    /// Checked when the node is added: every kind listed here must be part of
    /// the dependency list it is added with.
    fn requires() -> Vec<NodeKind>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// Human-readable name of this node.
    fn name(&self) -> &str {
        short_type_name(type_name::<Self>())
    }

    /// Compute this node's state from the context and earlier nodes.
    fn run(&mut self, view: &mut NodeView<'_, C>) -> Result<(), NodeError>;
}

/// Execution state of a node within one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    Pending,
    Computed,
}

/// Object-safe wrapper around `Node<C>` for storage in the pipeline.
pub(crate) trait AnyNode<C> {
    fn name(&self) -> &str;
    fn run(&mut self, view: &mut NodeView<'_, C>) -> Result<(), NodeError>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C, N: Node<C>> AnyNode<C> for N {
    fn name(&self) -> &str {
        <N as Node<C>>::name(self)
    }

    fn run(&mut self, view: &mut NodeView<'_, C>) -> Result<(), NodeError> {
        <N as Node<C>>::run(self, view)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
