use std::fmt::Debug;
use std::hash::Hash;

/// A searchable graph. Provides node identity and neighbor enumeration.
pub trait Graph {
    /// Node handle. The graph owns whatever the handle refers to; the engine
    /// only copies, hashes and compares handles.
    type Node: Copy + Eq + Hash + Debug;

    /// Append neighbors of `node` into `buf`. The caller clears `buf` before
    /// calling. Missing neighbors (map border, holes) are simply not pushed.
    fn neighbors(&self, node: Self::Node, buf: &mut Vec<Self::Node>);

    /// Whether `node` belongs to the graph. Searches refuse to start from a
    /// node for which this returns `false`.
    fn contains(&self, node: Self::Node) -> bool {
        let _ = node;
        true
    }
}

/// Edge policy for a search: which edges may be crossed and at what cost.
///
/// Implementations must be free of side effects for the duration of a query.
pub trait TraversalRule<N> {
    /// Whether the edge `from -> to` may be crossed at all.
    fn is_traversable(&self, from: N, to: N) -> bool;

    /// Cost of crossing `from -> to`. Must be finite and >= 0; any other value
    /// makes the search fail with [`SearchError::InvalidCost`](crate::SearchError).
    fn cost(&self, from: N, to: N) -> f64;
}

impl<G: Graph + ?Sized> Graph for &G {
    type Node = G::Node;

    #[inline]
    fn neighbors(&self, node: Self::Node, buf: &mut Vec<Self::Node>) {
        (**self).neighbors(node, buf);
    }

    #[inline]
    fn contains(&self, node: Self::Node) -> bool {
        (**self).contains(node)
    }
}

impl<N, R: TraversalRule<N> + ?Sized> TraversalRule<N> for &R {
    #[inline]
    fn is_traversable(&self, from: N, to: N) -> bool {
        (**self).is_traversable(from, to)
    }

    #[inline]
    fn cost(&self, from: N, to: N) -> f64 {
        (**self).cost(from, to)
    }
}

/// Every edge is traversable and costs 1. Turns a search into a
/// breadth-first hop count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unweighted;

impl<N> TraversalRule<N> for Unweighted {
    #[inline]
    fn is_traversable(&self, _from: N, _to: N) -> bool {
        true
    }

    #[inline]
    fn cost(&self, _from: N, _to: N) -> f64 {
        1.0
    }
}

/// A rule built from two closures: a blocking predicate and a cost function.
///
/// This is how ad-hoc variants (ignore occupancy, flat cost, ...) are
/// expressed without writing a new rule type.
#[derive(Clone, Copy)]
pub struct RuleFn<T, C> {
    traversable: T,
    cost: C,
}

impl<T, C> RuleFn<T, C> {
    /// Create a rule from a blocking predicate and a cost function.
    pub fn new(traversable: T, cost: C) -> Self {
        Self { traversable, cost }
    }
}

impl<N, T, C> TraversalRule<N> for RuleFn<T, C>
where
    T: Fn(N, N) -> bool,
    C: Fn(N, N) -> f64,
{
    #[inline]
    fn is_traversable(&self, from: N, to: N) -> bool {
        (self.traversable)(from, to)
    }

    #[inline]
    fn cost(&self, from: N, to: N) -> f64 {
        (self.cost)(from, to)
    }
}
