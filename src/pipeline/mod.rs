//! Statically assembled calculation pipeline.
//!
//! Nodes are added one at a time, each with the ordered list of nodes it
//! depends on. The builder deduplicates by node type and appends missing
//! dependencies ahead of the node, so store order is always a valid
//! execution order. The frozen pipeline then runs every node exactly once.
//!
//! # Architecture
//!
//! ```text
//! PipelineBuilder::new(ctx)
//!     .add::<Calc1, ()>()?                 [Calc1]
//!     .add::<Calc2, (Calc1,)>()?           [Calc1, Calc2]
//!     .add::<Calc3, (Calc1, Calc2)>()?     [Calc1, Calc2, Calc3]
//!     .build()                      ──►  Pipeline::run_all()
//! ```
//!
//! # Design
//!
//! - **Kind = type** — `NodeKind` wraps a `TypeId`; dedup and lookup never
//!   compare node values.
//! - **Flat store** — `Vec` of slots in insertion order plus a kind index.
//! - **Checked at assembly** — `Node::requires` is validated when a node is
//!   added, never during the run.
//! - **`RefCell` slots** — the running node is borrowed mutably while the
//!   view lends out the others.

pub mod builder;
pub mod deps;
pub mod error;
pub mod executor;
pub mod kind;
pub mod node;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod view;

pub use builder::PipelineBuilder;
pub use deps::{Dependencies, DependencySpec};
pub use error::{NodeError, PipelineError, PipelineResult};
pub use executor::Pipeline;
pub use kind::NodeKind;
pub use node::{Node, NodeState};
pub use report::{NodeRunStats, RunReport};
pub use snapshot::{NodeSnapshot, PipelineSnapshot};
pub use store::PipelineStore;
pub use view::NodeView;
