//! The read interface a running node receives.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::kind::NodeKind;
use crate::pipeline::node::{Node, NodeState};
use crate::pipeline::store::{lookup, Slot};
use std::cell::Ref;
use std::collections::HashMap;

/// Context plus typed access to every node in the pipeline, the running
/// one included.
///
/// The running node is mutably borrowed for the duration of its `run`, so
/// its own state is read (and written) through `self` rather than through
/// the view. That `&mut self` is the node's access to itself; looking up
/// its own kind here returns [`PipelineError::NodeBusy`].
pub struct NodeView<'a, C> {
    context: &'a mut C,
    slots: &'a [Slot<C>],
    index: &'a HashMap<NodeKind, usize>,
    current: usize,
}

impl<'a, C> NodeView<'a, C> {
    pub(crate) fn new(
        context: &'a mut C,
        slots: &'a [Slot<C>],
        index: &'a HashMap<NodeKind, usize>,
        current: usize,
    ) -> Self {
        Self {
            context,
            slots,
            index,
            current,
        }
    }

    pub fn context(&self) -> &C {
        &*self.context
    }

    /// Mutable access to the shared context. Nodes that change it are
    /// responsible for keeping later nodes' assumptions intact.
    pub fn context_mut(&mut self) -> &mut C {
        &mut *self.context
    }

    /// Kind of the node currently running.
    pub fn current(&self) -> NodeKind {
        self.slots[self.current].kind
    }

    /// Position of the running node in store order.
    pub fn position(&self) -> usize {
        self.current
    }

    /// All kinds in the pipeline, in store order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.slots.iter().map(|slot| slot.kind).collect()
    }

    pub fn contains<N: Node<C>>(&self) -> bool {
        self.index.contains_key(&NodeKind::of::<N>())
    }

    /// Whether `N` has already run during this pass.
    pub fn is_computed<N: Node<C>>(&self) -> bool {
        self.index
            .get(&NodeKind::of::<N>())
            .is_some_and(|&pos| self.slots[pos].state.get() == NodeState::Computed)
    }

    /// Typed shared access to another node's state.
    pub fn get<N: Node<C>>(&self) -> PipelineResult<Ref<'a, N>> {
        let kind = NodeKind::of::<N>();
        let running = &self.slots[self.current];
        if kind == running.kind {
            return Err(PipelineError::NodeBusy(kind));
        }
        if !running.depends_on.contains(&kind) {
            tracing::warn!(
                "Node '{}' reads '{}' without declaring it as a dependency",
                running.kind,
                kind
            );
        }
        lookup(self.slots, self.index, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::error::NodeError;
    use crate::pipeline::node::AnyNode;

    #[derive(Default)]
    struct Source {
        value: i64,
    }

    impl Node<i64> for Source {
        fn run(&mut self, view: &mut NodeView<'_, i64>) -> Result<(), NodeError> {
            self.value = *view.context();
            Ok(())
        }
    }

    #[derive(Default)]
    struct Sink;

    impl Node<i64> for Sink {
        fn run(&mut self, _view: &mut NodeView<'_, i64>) -> Result<(), NodeError> {
            Ok(())
        }
    }

    fn slots() -> (Vec<Slot<i64>>, HashMap<NodeKind, usize>) {
        let source: Box<dyn AnyNode<i64>> = Box::new(Source { value: 11 });
        let sink: Box<dyn AnyNode<i64>> = Box::new(Sink);
        let slots = vec![
            Slot::new(NodeKind::of::<Source>(), Vec::new(), source),
            Slot::new(NodeKind::of::<Sink>(), vec![NodeKind::of::<Source>()], sink),
        ];
        let index = slots
            .iter()
            .enumerate()
            .map(|(pos, slot)| (slot.kind, pos))
            .collect();
        (slots, index)
    }

    #[test]
    fn test_view_reads_declared_dependency() {
        let (slots, index) = slots();
        let mut context = 0i64;
        let view = NodeView::new(&mut context, &slots, &index, 1);

        assert_eq!(view.current(), NodeKind::of::<Sink>());
        assert_eq!(view.position(), 1);
        assert_eq!(view.get::<Source>().unwrap().value, 11);
        assert!(view.contains::<Source>());
        assert!(!view.is_computed::<Source>());
    }

    #[test]
    fn test_view_rejects_own_kind() {
        let (slots, index) = slots();
        let mut context = 0i64;
        let view = NodeView::new(&mut context, &slots, &index, 1);
        assert!(matches!(
            view.get::<Sink>(),
            Err(PipelineError::NodeBusy(_))
        ));
    }

    #[test]
    fn test_view_context_is_shared_and_mutable() {
        let (slots, index) = slots();
        let mut context = 1i64;
        {
            let mut view = NodeView::new(&mut context, &slots, &index, 0);
            *view.context_mut() += 9;
            assert_eq!(*view.context(), 10);
        }
        assert_eq!(context, 10);
    }

    #[test]
    fn test_computed_state_is_visible() {
        let (slots, index) = slots();
        slots[0].state.set(NodeState::Computed);
        let mut context = 0i64;
        let view = NodeView::new(&mut context, &slots, &index, 1);
        assert!(view.is_computed::<Source>());
        assert_eq!(view.kinds().len(), 2);
    }
}
