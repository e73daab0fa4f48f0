//! Test nodes and helpers for assembling pipelines from runtime data

use calc_graph::pipeline::{
    DependencySpec, Node, NodeError, NodeKind, NodeView, PipelineBuilder, PipelineResult,
};

/// Number of distinct `Step` kinds available to tests.
pub const STEP_KINDS: usize = 8;

/// A node with no requirements that records its id in the context when run.
#[derive(Debug, Default)]
pub struct Step<const ID: usize> {
    pub runs: u32,
}

impl<const ID: usize> Node<Vec<usize>> for Step<ID> {
    fn run(&mut self, view: &mut NodeView<'_, Vec<usize>>) -> Result<(), NodeError> {
        self.runs += 1;
        view.context_mut().push(ID);
        Ok(())
    }
}

macro_rules! for_each_step {
    ($id:expr, $step:ident => $body:expr) => {
        match $id {
            0 => { type $step = Step<0>; $body }
            1 => { type $step = Step<1>; $body }
            2 => { type $step = Step<2>; $body }
            3 => { type $step = Step<3>; $body }
            4 => { type $step = Step<4>; $body }
            5 => { type $step = Step<5>; $body }
            6 => { type $step = Step<6>; $body }
            7 => { type $step = Step<7>; $body }
            other => panic!("no step kind {}", other),
        }
    };
}

/// Kind of `Step<id>`.
pub fn step_kind(id: usize) -> NodeKind {
    for_each_step!(id, S => NodeKind::of::<S>())
}

/// Dependency spec for `Step<id>`.
pub fn step_spec(id: usize) -> DependencySpec<Vec<usize>> {
    for_each_step!(id, S => DependencySpec::of::<S>())
}

/// How many times `Step<id>` has run, if it is in the pipeline.
pub fn step_runs(pipeline: &calc_graph::Pipeline<Vec<usize>>, id: usize) -> Option<u32> {
    for_each_step!(id, S => pipeline.get::<S>().ok().map(|s| s.runs))
}

/// Add `Step<node>` with the given step ids as its dependency list.
pub fn add_step(
    builder: PipelineBuilder<Vec<usize>>,
    node: usize,
    deps: &[usize],
) -> PipelineResult<PipelineBuilder<Vec<usize>>> {
    let specs: Vec<_> = deps.iter().map(|&d| step_spec(d)).collect();
    for_each_step!(node, S => builder.add_with_specs(S::default(), &specs))
}

/// Reference model of the builder: the kind order after a sequence of adds.
pub fn expected_order(calls: &[(usize, Vec<usize>)]) -> Vec<usize> {
    let mut order = Vec::new();
    for (node, deps) in calls {
        for dep in deps {
            if dep != node && !order.contains(dep) {
                order.push(*dep);
            }
        }
        if !order.contains(node) {
            order.push(*node);
        }
    }
    order
}

