//! Ordered dependency lists.
//!
//! A dependency list names the node types that must run before the node
//! being added. It is written as a tuple of node types, in the order
//! missing entries should be appended: `()`, `(Calc1,)`, `(Calc1, Calc2)`.
//! Each entry must be `Default` so the builder can create it when absent.

use crate::pipeline::kind::NodeKind;
use crate::pipeline::node::{AnyNode, Node};

/// How to identify, validate and create one dependency.
pub struct DependencySpec<C> {
    pub(crate) kind: NodeKind,
    pub(crate) requires: fn() -> Vec<NodeKind>,
    pub(crate) make: fn() -> Box<dyn AnyNode<C>>,
}

impl<C> DependencySpec<C> {
    pub fn of<N>() -> Self
    where
        N: Node<C> + Default,
    {
        Self {
            kind: NodeKind::of::<N>(),
            requires: <N as Node<C>>::requires,
            make: make_default::<C, N>,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Kinds the dependency itself requires.
    pub fn requires(&self) -> Vec<NodeKind> {
        (self.requires)()
    }
}

fn make_default<C, N>() -> Box<dyn AnyNode<C>>
where
    N: Node<C> + Default,
{
    Box::new(N::default())
}

impl<C> Clone for DependencySpec<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for DependencySpec<C> {}

impl<C> std::fmt::Debug for DependencySpec<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DependencySpec").field(&self.kind).finish()
    }
}

/// A typed, ordered list of dependency node types.
pub trait Dependencies<C> {
    fn specs() -> Vec<DependencySpec<C>>;

    fn kinds() -> Vec<NodeKind> {
        Self::specs().iter().map(DependencySpec::kind).collect()
    }
}

impl<C> Dependencies<C> for () {
    fn specs() -> Vec<DependencySpec<C>> {
        Vec::new()
    }
}

macro_rules! impl_dependencies {
    ($($dep:ident),+) => {
        impl<C, $($dep),+> Dependencies<C> for ($($dep,)+)
        where
            $($dep: Node<C> + Default,)+
        {
            fn specs() -> Vec<DependencySpec<C>> {
                vec![$(DependencySpec::of::<$dep>()),+]
            }
        }
    };
}

impl_dependencies!(A);
impl_dependencies!(A, B);
impl_dependencies!(A, B, D);
impl_dependencies!(A, B, D, E);
impl_dependencies!(A, B, D, E, F);
impl_dependencies!(A, B, D, E, F, G);
impl_dependencies!(A, B, D, E, F, G, H);
impl_dependencies!(A, B, D, E, F, G, H, I);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::error::NodeError;
    use crate::pipeline::view::NodeView;

    #[derive(Default)]
    struct First;
    #[derive(Default)]
    struct Second;

    impl Node<()> for First {
        fn run(&mut self, _view: &mut NodeView<'_, ()>) -> Result<(), NodeError> {
            Ok(())
        }
    }

    impl Node<()> for Second {
        fn requires() -> Vec<NodeKind> {
            vec![NodeKind::of::<First>()]
        }

        fn run(&mut self, _view: &mut NodeView<'_, ()>) -> Result<(), NodeError> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_list() {
        assert!(<() as Dependencies<()>>::kinds().is_empty());
    }

    #[test]
    fn test_tuple_preserves_declaration_order() {
        assert_eq!(
            <(Second, First) as Dependencies<()>>::kinds(),
            vec![NodeKind::of::<Second>(), NodeKind::of::<First>()]
        );
    }

    #[test]
    fn test_spec_reports_nested_requirements_and_creates_instances() {
        let spec = DependencySpec::<()>::of::<Second>();
        assert_eq!(spec.kind(), NodeKind::of::<Second>());
        assert_eq!(spec.requires(), vec![NodeKind::of::<First>()]);
        let made = (spec.make)();
        assert!(made.as_any().downcast_ref::<Second>().is_some());
    }
}
