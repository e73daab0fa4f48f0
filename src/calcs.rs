//! Reference calculation nodes over a shared `f64` context.
//!
//! ```text
//! Calc1.v         = x * 2
//! Calc2.another_v = x + Calc1.v
//! Calc3.v         = Calc1.v + Calc2.another_v
//! Calc4.v         = Calc1.v + Calc2.another_v * 2
//! ```

use crate::pipeline::{
    Node, NodeError, NodeKind, NodeView, Pipeline, PipelineBuilder, PipelineResult,
};

/// Doubles the context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calc1 {
    pub v: f64,
}

impl Calc1 {
    pub fn calc(&mut self, x: f64) {
        self.v = x * 2.0;
    }
}

impl Node<f64> for Calc1 {
    fn run(&mut self, view: &mut NodeView<'_, f64>) -> Result<(), NodeError> {
        tracing::info!("in calc 1");
        self.calc(*view.context());
        Ok(())
    }
}

/// Adds the context to `Calc1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calc2 {
    pub another_v: f64,
}

impl Calc2 {
    pub fn another_calc(&mut self, x: f64, c1: &Calc1) {
        self.another_v = x + c1.v;
    }
}

impl Node<f64> for Calc2 {
    fn requires() -> Vec<NodeKind> {
        vec![NodeKind::of::<Calc1>()]
    }

    fn run(&mut self, view: &mut NodeView<'_, f64>) -> Result<(), NodeError> {
        tracing::info!("in calc 2");
        let c1 = view.get::<Calc1>()?;
        self.another_calc(*view.context(), &c1);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calc3 {
    pub v: f64,
}

impl Calc3 {
    pub fn calc(&mut self, c1: &Calc1, c2: &Calc2) {
        self.v = c1.v + c2.another_v;
    }
}

impl Node<f64> for Calc3 {
    fn requires() -> Vec<NodeKind> {
        vec![NodeKind::of::<Calc1>(), NodeKind::of::<Calc2>()]
    }

    fn run(&mut self, view: &mut NodeView<'_, f64>) -> Result<(), NodeError> {
        tracing::info!("in calc 3");
        let c1 = view.get::<Calc1>()?;
        let c2 = view.get::<Calc2>()?;
        self.calc(&c1, &c2);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calc4 {
    pub v: f64,
}

impl Calc4 {
    pub fn calc(&mut self, c1: &Calc1, c2: &Calc2) {
        self.v = c1.v + c2.another_v * 2.0;
    }
}

impl Node<f64> for Calc4 {
    fn requires() -> Vec<NodeKind> {
        vec![NodeKind::of::<Calc1>(), NodeKind::of::<Calc2>()]
    }

    fn run(&mut self, view: &mut NodeView<'_, f64>) -> Result<(), NodeError> {
        tracing::info!("in calc 4");
        let c1 = view.get::<Calc1>()?;
        let c2 = view.get::<Calc2>()?;
        self.calc(&c1, &c2);
        Ok(())
    }
}

/// Assemble the reference pipeline:
/// `Calc1`, `Calc2(Calc1)`, `Calc3(Calc1, Calc2)`, `Calc4(Calc2, Calc1)`.
pub fn reference_pipeline(context: f64) -> PipelineResult<Pipeline<f64>> {
    let pipeline = PipelineBuilder::new(context)
        .add::<Calc1, ()>()?
        .add::<Calc2, (Calc1,)>()?
        .add::<Calc3, (Calc1, Calc2)>()?
        .add::<Calc4, (Calc2, Calc1)>()?
        .build();
    Ok(pipeline)
}
