//! Identity types for the pipeline system.
//!
//! A node's kind is its Rust type. `NodeKind` carries the `TypeId` used for
//! dedup and lookup, plus the type name for log and error messages.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unique identity of a node type within a pipeline.
#[derive(Clone, Copy)]
pub struct NodeKind {
    id: TypeId,
    name: &'static str,
}

impl NodeKind {
    /// Kind of the node type `N`.
    pub fn of<N: 'static>() -> Self {
        Self {
            id: TypeId::of::<N>(),
            name: type_name::<N>(),
        }
    }

    #[inline]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn type_name(self) -> &'static str {
        self.name
    }

    /// Type name without its module path or generic arguments.
    pub fn short_name(self) -> &'static str {
        short_type_name(self.name)
    }
}

/// Strips the module path (and any generic arguments) from a type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl PartialEq for NodeKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NodeKind {}

impl Hash for NodeKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKind({})", self.short_name())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Alpha;
    struct Beta;
    struct Wrapper<T>(T);

    #[test]
    fn test_kind_equality_is_by_type() {
        assert_eq!(NodeKind::of::<Alpha>(), NodeKind::of::<Alpha>());
        assert_ne!(NodeKind::of::<Alpha>(), NodeKind::of::<Beta>());
    }

    #[test]
    fn test_kind_hashes_consistently() {
        let mut set = HashSet::new();
        set.insert(NodeKind::of::<Alpha>());
        set.insert(NodeKind::of::<Alpha>());
        set.insert(NodeKind::of::<Beta>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(NodeKind::of::<Alpha>().short_name(), "Alpha");
        assert_eq!(NodeKind::of::<Wrapper<Beta>>().short_name(), "Wrapper");
        assert_eq!(NodeKind::of::<Alpha>().to_string(), "Alpha");
        assert!(NodeKind::of::<Alpha>().type_name().ends_with("::Alpha"));
    }

    #[test]
    fn test_generic_instantiations_are_distinct_kinds() {
        assert_ne!(
            NodeKind::of::<Wrapper<Alpha>>(),
            NodeKind::of::<Wrapper<Beta>>()
        );
    }
}
