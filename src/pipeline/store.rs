//! Pipeline store — the ordered, deduplicated node collection plus context.
//!
//! Slots are kept in first-insertion order in a flat `Vec`; a kind index maps
//! each `NodeKind` to its position for O(1) lookup. Slots are append-only:
//! nothing is ever removed, replaced or reordered.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::kind::NodeKind;
use crate::pipeline::node::{AnyNode, Node, NodeState};
use crate::pipeline::snapshot::{NodeSnapshot, PipelineSnapshot};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::HashMap;

/// One node instance with its identity, declared dependencies and run state.
pub(crate) struct Slot<C> {
    pub kind: NodeKind,
    /// Kinds this node was declared to depend on.
    pub depends_on: Vec<NodeKind>,
    pub state: Cell<NodeState>,
    pub node: RefCell<Box<dyn AnyNode<C>>>,
}

impl<C> Slot<C> {
    pub fn new(kind: NodeKind, depends_on: Vec<NodeKind>, node: Box<dyn AnyNode<C>>) -> Self {
        Self {
            kind,
            depends_on,
            state: Cell::new(NodeState::Pending),
            node: RefCell::new(node),
        }
    }
}

/// Ordered, deduplicated node instances plus the shared context.
pub struct PipelineStore<C> {
    context: C,
    slots: Vec<Slot<C>>,
    index: HashMap<NodeKind, usize>,
}

impl<C> PipelineStore<C> {
    /// Create an empty store holding only the context.
    pub fn new(context: C) -> Self {
        Self {
            context,
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.index.contains_key(&kind)
    }

    /// Position of `kind` in store order.
    pub fn position(&self, kind: NodeKind) -> Option<usize> {
        self.index.get(&kind).copied()
    }

    /// Kinds in store order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.slots.iter().map(|slot| slot.kind).collect()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    pub fn state(&self, kind: NodeKind) -> Option<NodeState> {
        self.position(kind).map(|pos| self.slots[pos].state.get())
    }

    /// Typed shared access to a node instance.
    pub fn get<N: Node<C>>(&self) -> PipelineResult<Ref<'_, N>> {
        lookup(&self.slots, &self.index, NodeKind::of::<N>())
    }

    /// Typed exclusive access to a node instance.
    pub fn get_mut<N: Node<C>>(&mut self) -> PipelineResult<RefMut<'_, N>> {
        let kind = NodeKind::of::<N>();
        let pos = self
            .position(kind)
            .ok_or(PipelineError::NodeNotFound(kind))?;
        let node = self.slots[pos]
            .node
            .try_borrow_mut()
            .map_err(|_| PipelineError::NodeBusy(kind))?;
        RefMut::filter_map(node, |n| n.as_any_mut().downcast_mut::<N>())
            .map_err(|_| PipelineError::NodeNotFound(kind))
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        let nodes = self
            .slots
            .iter()
            .enumerate()
            .map(|(position, slot)| NodeSnapshot {
                position,
                name: slot
                    .node
                    .try_borrow()
                    .map(|n| n.name().to_string())
                    .unwrap_or_else(|_| slot.kind.short_name().to_string()),
                type_name: slot.kind.type_name().to_string(),
                depends_on: slot
                    .depends_on
                    .iter()
                    .map(|k| k.short_name().to_string())
                    .collect(),
                state: slot.state.get(),
            })
            .collect();
        PipelineSnapshot { nodes }
    }

    /// Append a slot at the tail. The caller guarantees the kind is absent.
    pub(crate) fn append(&mut self, slot: Slot<C>) -> usize {
        debug_assert!(!self.contains(slot.kind), "duplicate kind {}", slot.kind);
        let pos = self.slots.len();
        self.index.insert(slot.kind, pos);
        self.slots.push(slot);
        pos
    }

    /// Split borrow used by the executor: mutable context, shared slots.
    pub(crate) fn parts_mut(&mut self) -> (&mut C, &[Slot<C>], &HashMap<NodeKind, usize>) {
        (&mut self.context, &self.slots, &self.index)
    }
}

impl<C: Default> Default for PipelineStore<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

/// Resolve `kind` to a typed shared borrow of its node.
pub(crate) fn lookup<'a, C, N: Node<C>>(
    slots: &'a [Slot<C>],
    index: &HashMap<NodeKind, usize>,
    kind: NodeKind,
) -> PipelineResult<Ref<'a, N>> {
    let pos = *index.get(&kind).ok_or(PipelineError::NodeNotFound(kind))?;
    let node = slots[pos]
        .node
        .try_borrow()
        .map_err(|_| PipelineError::NodeBusy(kind))?;
    Ref::filter_map(node, |n| n.as_any().downcast_ref::<N>())
        .map_err(|_| PipelineError::NodeNotFound(kind))
}

impl<C> std::fmt::Debug for PipelineStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineStore")
            .field("nodes", &self.kinds())
            .finish_non_exhaustive()
    }
}
