//! Pipeline executor — the single pass over an assembled store.
//!
//! `run_all` walks the slots in store order. For each slot:
//! 1. Mutably borrow the node.
//! 2. Build a `NodeView` over the context and every slot.
//! 3. Call `run`; on success mark the slot `Computed`.
//!
//! A node returning an error stops the pass. There is no retry and no
//! second run.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::kind::NodeKind;
use crate::pipeline::node::{Node, NodeState};
use crate::pipeline::report::{NodeRunStats, RunReport};
use crate::pipeline::snapshot::PipelineSnapshot;
use crate::pipeline::store::PipelineStore;
use crate::pipeline::view::NodeView;
use std::cell::{Ref, RefMut};
use std::time::Instant;

/// A frozen pipeline: fixed node order, executable once.
pub struct Pipeline<C> {
    store: PipelineStore<C>,
    executed: bool,
}

impl<C> Pipeline<C> {
    pub(crate) fn new(store: PipelineStore<C>) -> Self {
        Self {
            store,
            executed: false,
        }
    }

    /// Run every node once, in store order.
    pub fn run_all(&mut self) -> PipelineResult<RunReport> {
        if self.executed {
            return Err(PipelineError::AlreadyExecuted);
        }
        self.executed = true;

        let start_time = Instant::now();
        let mut report = RunReport::with_capacity(self.store.len());
        let (context, slots, index) = self.store.parts_mut();

        for (position, slot) in slots.iter().enumerate() {
            let mut node = slot
                .node
                .try_borrow_mut()
                .map_err(|_| PipelineError::NodeBusy(slot.kind))?;
            let name = node.name().to_string();
            tracing::debug!("Running node '{}' ({}/{})", name, position + 1, slots.len());

            let node_start = Instant::now();
            let mut view = NodeView::new(&mut *context, slots, index, position);
            if let Err(source) = node.run(&mut view) {
                tracing::error!("Node '{}' failed: {}", name, source);
                return Err(PipelineError::NodeExecution {
                    node: slot.kind,
                    source,
                });
            }

            slot.state.set(NodeState::Computed);
            report.nodes.push(NodeRunStats {
                position,
                name,
                elapsed_us: node_start.elapsed().as_micros() as u64,
            });
        }

        report.total_time_us = start_time.elapsed().as_micros() as u64;
        tracing::info!(
            "Pipeline executed: {} nodes in {} us",
            report.executed(),
            report.total_time_us
        );

        Ok(report)
    }

    /// Whether `run_all` has been called.
    pub fn is_executed(&self) -> bool {
        self.executed
    }

    /// Typed shared access to a node's state.
    pub fn get<N: Node<C>>(&self) -> PipelineResult<Ref<'_, N>> {
        self.store.get::<N>()
    }

    /// Typed exclusive access to a node's state.
    pub fn get_mut<N: Node<C>>(&mut self) -> PipelineResult<RefMut<'_, N>> {
        self.store.get_mut::<N>()
    }

    pub fn state_of<N: Node<C>>(&self) -> Option<NodeState> {
        self.store.state(NodeKind::of::<N>())
    }

    /// Kinds in execution order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.store.kinds()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn context(&self) -> &C {
        self.store.context()
    }

    pub fn context_mut(&mut self) -> &mut C {
        self.store.context_mut()
    }

    pub fn into_context(self) -> C {
        self.store.into_context()
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        self.store.snapshot()
    }
}

impl<C> std::fmt::Debug for Pipeline<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("store", &self.store)
            .field("executed", &self.executed)
            .finish()
    }
}
