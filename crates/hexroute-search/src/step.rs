use std::collections::HashMap;
use std::hash::Hash;

/// Handle to a [`Step`] inside a [`StepTable`].
///
/// Ids are handed out in discovery order, which is also the tie-break order
/// of the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub(crate) usize);

impl StepId {
    /// Position of the step in discovery order (the origin is 0).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node's best known route during a search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step<N> {
    pub node: N,
    /// Step this one was reached from, `None` for the origin.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub predecessor: Option<StepId>,
    /// Cumulative cost from the origin.
    pub cost: f64,
}

impl<N> Step<N> {
    /// Whether this is the origin step.
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.predecessor.is_none()
    }
}

/// Arena holding every step discovered by one search.
///
/// A node maps to at most one step. Steps are mutable (decrease-key) until
/// they are marked evaluated.
#[derive(Debug, Clone)]
pub struct StepTable<N> {
    steps: Vec<Step<N>>,
    evaluated: Vec<bool>,
    index: HashMap<N, StepId>,
}

impl<N: Copy + Eq + Hash> StepTable<N> {
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            evaluated: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Step for an id handed out by this table.
    #[inline]
    pub fn get(&self, id: StepId) -> &Step<N> {
        &self.steps[id.0]
    }

    /// Id of the step recorded for `node`, if the node was discovered.
    #[inline]
    pub fn id_of(&self, node: N) -> Option<StepId> {
        self.index.get(&node).copied()
    }

    /// Step recorded for `node`, if the node was discovered.
    #[inline]
    pub fn lookup(&self, node: N) -> Option<&Step<N>> {
        self.id_of(node).map(|id| self.get(id))
    }

    /// Whether the step's cost is final.
    #[inline]
    pub fn is_evaluated(&self, id: StepId) -> bool {
        self.evaluated[id.0]
    }

    /// Number of discovered nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Step<N>> {
        self.steps.iter()
    }

    /// Record a newly discovered node. The node must not be present yet.
    pub(crate) fn insert(&mut self, node: N, predecessor: Option<StepId>, cost: f64) -> StepId {
        debug_assert!(!self.index.contains_key(&node));
        let id = StepId(self.steps.len());
        self.steps.push(Step {
            node,
            predecessor,
            cost,
        });
        self.evaluated.push(false);
        self.index.insert(node, id);
        id
    }

    /// Overwrite the route of a step still in the frontier.
    pub(crate) fn relax(&mut self, id: StepId, predecessor: StepId, cost: f64) {
        debug_assert!(!self.evaluated[id.0]);
        let step = &mut self.steps[id.0];
        step.predecessor = Some(predecessor);
        step.cost = cost;
    }

    pub(crate) fn mark_evaluated(&mut self, id: StepId) {
        self.evaluated[id.0] = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_discovery_order() {
        let mut t = StepTable::new();
        let a = t.insert('a', None, 0.0);
        let b = t.insert('b', Some(a), 2.0);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(t.len(), 2);
        assert_eq!(t.id_of('b'), Some(b));
        assert!(t.lookup('z').is_none());
        assert!(t.get(a).is_origin());
        assert!(!t.get(b).is_origin());
    }

    #[test]
    fn relax_overwrites_route() {
        let mut t = StepTable::new();
        let a = t.insert('a', None, 0.0);
        let b = t.insert('b', Some(a), 1.0);
        let c = t.insert('c', Some(a), 9.0);
        t.relax(c, b, 3.0);
        let step = t.get(c);
        assert_eq!(step.predecessor, Some(b));
        assert_eq!(step.cost, 3.0);
    }

    #[test]
    fn evaluated_flag() {
        let mut t = StepTable::new();
        let a = t.insert(1, None, 0.0);
        assert!(!t.is_evaluated(a));
        t.mark_evaluated(a);
        assert!(t.is_evaluated(a));
    }
}
