//! # calc-graph: statically assembled calculation pipelines
//!
//! A pipeline is a fixed list of calculation nodes over one shared context.
//! Nodes are added one at a time together with the nodes they depend on;
//! repeated nodes are deduplicated, first-seen order is kept, and a node
//! whose requirements are not covered by its dependency list is rejected
//! before anything runs. The assembled pipeline then runs every node once,
//! in order, and each node reads earlier results by type.
//!
//! ## Architecture
//!
//! - **Pipeline**: builder, store, view and executor ([`pipeline`])
//! - **Reference nodes**: `Calc1`..`Calc4` over an `f64` context ([`calcs`])
//! - **Configuration**: host program settings, TOML or JSON ([`config`])
//!
//! ## Example
//!
//! ```
//! use calc_graph::calcs::{Calc1, Calc2};
//! use calc_graph::pipeline::PipelineBuilder;
//!
//! let mut pipeline = PipelineBuilder::new(10.0)
//!     .add::<Calc1, ()>()?
//!     .add::<Calc2, (Calc1,)>()?
//!     .build();
//!
//! pipeline.run_all()?;
//! assert_eq!(pipeline.get::<Calc2>()?.another_v, 30.0);
//! # Ok::<(), calc_graph::pipeline::PipelineError>(())
//! ```

pub mod calcs;
pub mod config;
pub mod error;
pub mod pipeline;

// Re-export commonly used types
pub use config::HostConfig;
pub use error::{CalcGraphError, Result};
pub use pipeline::{
    Node, NodeError, NodeKind, NodeView, Pipeline, PipelineBuilder, PipelineError,
    PipelineResult,
};
