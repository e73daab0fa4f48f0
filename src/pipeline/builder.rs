//! Pipeline builder — assembles a store one node at a time.
//!
//! Each `add` names one node and the ordered list of nodes it depends on.
//! Missing dependencies are appended first, in declaration order, then the
//! node itself. Kinds already in the store are never moved or duplicated.
//!
//! # Validation
//!
//! Everything is checked before the store is touched:
//! - every kind the node `requires()` must appear in its dependency list;
//! - every dependency that is about to be appended must have its own
//!   `requires()` already present (in the store, or earlier in the list).
//!
//! Dependencies of dependencies are never added implicitly.

use crate::pipeline::deps::{Dependencies, DependencySpec};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::executor::Pipeline;
use crate::pipeline::kind::NodeKind;
use crate::pipeline::node::Node;
use crate::pipeline::snapshot::PipelineSnapshot;
use crate::pipeline::store::{PipelineStore, Slot};

/// Builder for an assembling pipeline.
///
/// Every `add` consumes the builder and returns the grown one, so each call
/// yields a new store value.
pub struct PipelineBuilder<C> {
    store: PipelineStore<C>,
}

impl<C> PipelineBuilder<C> {
    /// Start an empty pipeline over `context`.
    pub fn new(context: C) -> Self {
        Self {
            store: PipelineStore::new(context),
        }
    }

    /// Add `N` (created with `Default`) after the dependencies `D`.
    ///
    /// ```ignore
    /// let builder = PipelineBuilder::new(10.0)
    ///     .add::<Calc1, ()>()?
    ///     .add::<Calc2, (Calc1,)>()?;
    /// ```
    pub fn add<N, D>(self) -> PipelineResult<Self>
    where
        N: Node<C> + Default,
        D: Dependencies<C>,
    {
        self.add_with(N::default, &D::specs())
    }

    /// Add a caller-built instance of `N` after the dependencies `D`.
    ///
    /// If `N` is already present the instance is dropped.
    pub fn add_node<N, D>(self, node: N) -> PipelineResult<Self>
    where
        N: Node<C>,
        D: Dependencies<C>,
    {
        self.add_with(move || node, &D::specs())
    }

    /// Add `N` after a dependency list assembled at runtime.
    pub fn add_with_specs<N>(self, node: N, deps: &[DependencySpec<C>]) -> PipelineResult<Self>
    where
        N: Node<C>,
    {
        self.add_with(move || node, deps)
    }

    fn add_with<N, F>(mut self, make: F, deps: &[DependencySpec<C>]) -> PipelineResult<Self>
    where
        N: Node<C>,
        F: FnOnce() -> N,
    {
        let kind = NodeKind::of::<N>();
        let missing = self.plan(kind, &<N as Node<C>>::requires(), deps)?;

        for spec in missing {
            let pos = self
                .store
                .append(Slot::new(spec.kind, spec.requires(), (spec.make)()));
            tracing::debug!("Appended dependency '{}' at position {}", spec.kind, pos);
        }

        if self.store.contains(kind) {
            tracing::trace!("Node '{}' already present, keeping existing instance", kind);
        } else {
            let depends_on = deps
                .iter()
                .map(DependencySpec::kind)
                .filter(|dep| *dep != kind)
                .collect();
            let pos = self
                .store
                .append(Slot::new(kind, depends_on, Box::new(make())));
            tracing::debug!("Appended node '{}' at position {}", kind, pos);
        }

        Ok(self)
    }

    /// Validate an `add` and return the dependencies that must be appended,
    /// in order. Does not modify the store.
    fn plan<'d>(
        &self,
        kind: NodeKind,
        requires: &[NodeKind],
        deps: &'d [DependencySpec<C>],
    ) -> PipelineResult<Vec<&'d DependencySpec<C>>> {
        if let Some(&missing) = requires
            .iter()
            .find(|req| !deps.iter().any(|d| d.kind == **req))
        {
            return Err(PipelineError::UnsatisfiedDependency {
                node: kind,
                missing,
            });
        }

        let mut planned: Vec<&DependencySpec<C>> = Vec::new();
        let present = |k: NodeKind, planned: &[&DependencySpec<C>]| {
            self.store.contains(k) || planned.iter().any(|p| p.kind == k)
        };

        for dep in deps {
            if dep.kind == kind {
                tracing::warn!("Node '{}' lists itself as a dependency, ignoring", kind);
                continue;
            }
            if present(dep.kind, planned.as_slice()) {
                tracing::trace!("Dependency '{}' of '{}' already present", dep.kind, kind);
                continue;
            }
            if let Some(missing) = dep
                .requires()
                .into_iter()
                .find(|req| !present(*req, planned.as_slice()))
            {
                return Err(PipelineError::UnsatisfiedDependency {
                    node: dep.kind,
                    missing,
                });
            }
            planned.push(dep);
        }

        Ok(planned)
    }

    pub fn contains<N: Node<C>>(&self) -> bool {
        self.store.contains(NodeKind::of::<N>())
    }

    /// Kinds in store order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        self.store.kinds()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &PipelineStore<C> {
        &self.store
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        self.store.snapshot()
    }

    /// Freeze the assembled store into an executable pipeline.
    pub fn build(self) -> Pipeline<C> {
        tracing::info!("Pipeline assembled: {} nodes", self.store.len());
        Pipeline::new(self.store)
    }
}

impl<C: Default> Default for PipelineBuilder<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C> std::fmt::Debug for PipelineBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("store", &self.store)
            .finish()
    }
}
