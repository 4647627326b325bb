use std::iter::FusedIterator;

use log::{trace, warn};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::path::Path;
use crate::step::{Step, StepId, StepTable};
use crate::traits::{Graph, TraversalRule};

/// Lazy uniform-cost (Dijkstra) search from a single origin.
///
/// Iterating yields every reachable node exactly once, as a [`Step`], in
/// non-decreasing cumulative cost. The neighbors of a yielded step are
/// expanded when the *next* step is requested, so a consumer that stops
/// pulling does no work past the last step it saw. Calling
/// [`prune`](Self::prune) before the next pull skips that expansion.
///
/// The first error ends the iteration.
pub struct Search<'a, G: Graph + ?Sized, R: ?Sized> {
    graph: &'a G,
    rule: &'a R,
    table: StepTable<G::Node>,
    frontier: Frontier,
    /// Last yielded step, expanded on the next pull.
    pending: Option<StepId>,
    nbuf: Vec<G::Node>,
    done: bool,
}

impl<'a, G, R> Search<'a, G, R>
where
    G: Graph + ?Sized,
    R: TraversalRule<G::Node> + ?Sized,
{
    /// Start a search at `origin`.
    ///
    /// Fails with [`SearchError::UnknownOrigin`] when the graph does not
    /// contain `origin`.
    pub fn new(graph: &'a G, origin: G::Node, rule: &'a R) -> Result<Self, SearchError<G::Node>> {
        if !graph.contains(origin) {
            return Err(SearchError::UnknownOrigin(origin));
        }
        let mut table = StepTable::new();
        let mut frontier = Frontier::new();
        let id = table.insert(origin, None, 0.0);
        frontier.push(id, 0.0);
        Ok(Self {
            graph,
            rule,
            table,
            frontier,
            pending: None,
            nbuf: Vec::with_capacity(6),
            done: false,
        })
    }

    /// Do not expand the neighbors of the most recently yielded step.
    ///
    /// Has no effect before the first step is yielded.
    pub fn prune(&mut self) {
        self.pending = None;
    }

    /// Every step discovered so far, evaluated or still in the frontier.
    pub fn steps(&self) -> &StepTable<G::Node> {
        &self.table
    }

    /// Consume the search, keeping the discovered steps.
    pub fn into_steps(self) -> StepTable<G::Node> {
        self.table
    }

    /// Route from the origin to `step`, which must come from this search.
    pub fn path_to(&self, step: &Step<G::Node>) -> Path<G::Node> {
        Path::from_step(&self.table, step)
    }

    /// Number of steps yielded so far.
    pub fn evaluated_count(&self) -> usize {
        self.table.len() - self.frontier.len()
    }

    /// Number of discovered steps still waiting in the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    fn expand(&mut self, id: StepId) -> Result<(), SearchError<G::Node>> {
        let current = *self.table.get(id);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.graph.neighbors(current.node, &mut nbuf);

        let mut result = Ok(());
        for &next in nbuf.iter() {
            let known = self.table.id_of(next);
            if known.is_some_and(|k| self.table.is_evaluated(k)) {
                continue;
            }
            if !self.rule.is_traversable(current.node, next) {
                continue;
            }
            let edge = self.rule.cost(current.node, next);
            if !(edge >= 0.0 && edge.is_finite()) {
                warn!(
                    "traversal rule returned cost {edge} for {:?} -> {next:?}",
                    current.node
                );
                result = Err(SearchError::InvalidCost {
                    from: current.node,
                    to: next,
                    cost: edge,
                });
                break;
            }
            let tentative = current.cost + edge;
            if !tentative.is_finite() {
                warn!("cumulative cost overflows at {:?} -> {next:?}", current.node);
                result = Err(SearchError::CostOverflow {
                    from: current.node,
                    to: next,
                });
                break;
            }

            match known {
                None => {
                    let nid = self.table.insert(next, Some(id), tentative);
                    self.frontier.push(nid, tentative);
                }
                Some(k) => {
                    if tentative >= self.table.get(k).cost {
                        continue;
                    }
                    trace!(
                        "decrease {next:?}: {} -> {tentative}",
                        self.table.get(k).cost
                    );
                    self.table.relax(k, id, tentative);
                    self.frontier.decrease(k, tentative);
                }
            }
        }

        self.nbuf = nbuf;
        result
    }
}

impl<G, R> Iterator for Search<'_, G, R>
where
    G: Graph + ?Sized,
    R: TraversalRule<G::Node> + ?Sized,
{
    type Item = Result<Step<G::Node>, SearchError<G::Node>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.expand(id) {
                self.done = true;
                self.frontier.clear();
                return Some(Err(e));
            }
        }
        let Some((id, cost)) = self.frontier.pop() else {
            self.done = true;
            return None;
        };
        self.table.mark_evaluated(id);
        self.pending = Some(id);
        let step = *self.table.get(id);
        trace!("pop {:?} at {cost}", step.node);
        Some(Ok(step))
    }
}

impl<G, R> FusedIterator for Search<'_, G, R>
where
    G: Graph + ?Sized,
    R: TraversalRule<G::Node> + ?Sized,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EdgeGraph, SquareGrid, Weights};
    use crate::traits::{RuleFn, Unweighted};
    use rand::SeedableRng;

    fn drain<G: Graph, R: TraversalRule<G::Node>>(
        graph: &G,
        origin: G::Node,
        rule: &R,
    ) -> Vec<Step<G::Node>> {
        Search::new(graph, origin, rule)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn origin_comes_first_at_zero() {
        let g = SquareGrid {
            width: 3,
            height: 3,
        };
        let steps = drain(&g, (1, 1), &Unweighted);
        assert_eq!(steps[0].node, (1, 1));
        assert_eq!(steps[0].cost, 0.0);
        assert!(steps[0].is_origin());
        assert_eq!(steps.len(), 9);
    }

    #[test]
    fn costs_are_non_decreasing() {
        let g = SquareGrid {
            width: 6,
            height: 5,
        };
        let rule = RuleFn::new(
            |_: (i32, i32), _: (i32, i32)| true,
            |_: (i32, i32), (x, y): (i32, i32)| f64::from((x * 7 + y * 3) % 5),
        );
        let steps = drain(&g, (0, 0), &rule);
        assert_eq!(steps.len(), 30);
        for w in steps.windows(2) {
            assert!(w[0].cost <= w[1].cost);
        }
    }

    #[test]
    fn each_node_yielded_once() {
        let g = SquareGrid {
            width: 5,
            height: 5,
        };
        let steps = drain(&g, (2, 2), &Unweighted);
        let mut nodes: Vec<_> = steps.iter().map(|s| s.node).collect();
        nodes.sort();
        nodes.dedup();
        assert_eq!(nodes.len(), steps.len());
    }

    #[test]
    fn unknown_origin_is_rejected() {
        let g = SquareGrid {
            width: 2,
            height: 2,
        };
        let err = Search::new(&g, (5, 5), &Unweighted).err();
        assert_eq!(err, Some(SearchError::UnknownOrigin((5, 5))));
    }

    #[test]
    fn negative_cost_fails_the_search() {
        let g = SquareGrid {
            width: 3,
            height: 1,
        };
        let rule = RuleFn::new(
            |_: (i32, i32), _: (i32, i32)| true,
            |_: (i32, i32), to: (i32, i32)| if to == (2, 0) { -1.0 } else { 1.0 },
        );
        let mut s = Search::new(&g, (0, 0), &rule).unwrap();
        assert!(matches!(s.next(), Some(Ok(_))));
        assert!(matches!(s.next(), Some(Ok(_))));
        let err = s.next();
        assert!(matches!(
            err,
            Some(Err(SearchError::InvalidCost {
                from: (1, 0),
                to: (2, 0),
                ..
            }))
        ));
        assert!(s.next().is_none());
    }

    #[test]
    fn nan_and_infinite_costs_fail() {
        let mut g = EdgeGraph::new(2);
        g.add_edge(0, 1, 1.0);
        for bad in [f64::NAN, f64::INFINITY] {
            let rule = RuleFn::new(|_: usize, _: usize| true, move |_: usize, _: usize| bad);
            let res: Result<Vec<_>, _> = Search::new(&g, 0, &rule).unwrap().collect();
            assert!(matches!(res, Err(SearchError::InvalidCost { .. })));
        }
    }

    #[test]
    fn cumulative_cost_overflow_fails() {
        let g = SquareGrid {
            width: 3,
            height: 1,
        };
        let rule = RuleFn::new(
            |_: (i32, i32), _: (i32, i32)| true,
            |_: (i32, i32), _: (i32, i32)| f64::MAX,
        );
        let mut s = Search::new(&g, (0, 0), &rule).unwrap();
        assert!(matches!(s.next(), Some(Ok(_))));
        let second = s.next();
        assert!(matches!(second, Some(Ok(step)) if step.cost == f64::MAX));
        assert!(matches!(
            s.next(),
            Some(Err(SearchError::CostOverflow {
                from: (1, 0),
                to: (2, 0),
            }))
        ));
        assert!(s.next().is_none());
    }

    #[test]
    fn blocked_edges_are_not_crossed() {
        let g = SquareGrid {
            width: 3,
            height: 1,
        };
        let rule = RuleFn::new(
            |_: (i32, i32), to: (i32, i32)| to != (1, 0),
            |_: (i32, i32), _: (i32, i32)| 1.0,
        );
        let steps = drain(&g, (0, 0), &rule);
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn decrease_key_reorders_frontier() {
        // 0 -> 3 costs 10 and is discovered first; 0 -> 1 -> 2 -> 3 costs 3.
        // 4 hangs off 0 at cost 5 and must come after the improved 3.
        let mut g = EdgeGraph::new(5);
        g.add_edge(0, 3, 10.0);
        g.add_edge(0, 1, 1.0);
        g.add_edge(0, 4, 5.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        let steps = drain(&g, 0, &Weights(&g));
        let order: Vec<_> = steps.iter().map(|s| (s.node, s.cost)).collect();
        assert_eq!(
            order,
            vec![(0, 0.0), (1, 1.0), (2, 2.0), (3, 3.0), (4, 5.0)]
        );
    }

    #[test]
    fn ties_follow_discovery_order() {
        let mut g = EdgeGraph::new(4);
        g.add_edge(0, 3, 1.0);
        g.add_edge(0, 1, 1.0);
        g.add_edge(0, 2, 1.0);
        let steps = drain(&g, 0, &Weights(&g));
        let order: Vec<_> = steps.iter().map(|s| s.node).collect();
        assert_eq!(order, vec![0, 3, 1, 2]);
    }

    #[test]
    fn prune_skips_expansion() {
        let g = SquareGrid {
            width: 3,
            height: 1,
        };
        let mut s = Search::new(&g, (0, 0), &Unweighted).unwrap();
        let first = s.next().unwrap().unwrap();
        assert_eq!(first.node, (0, 0));
        s.prune();
        assert!(s.next().is_none());
        assert_eq!(s.evaluated_count(), 1);
    }

    #[test]
    fn lazy_expansion_stops_with_consumer() {
        let g = SquareGrid {
            width: 50,
            height: 50,
        };
        let mut s = Search::new(&g, (0, 0), &Unweighted).unwrap();
        let _ = s.next();
        // Origin popped but not yet expanded.
        assert_eq!(s.steps().len(), 1);
        let _ = s.next();
        assert_eq!(s.steps().len(), 3);
        assert_eq!(s.frontier_len(), 1);
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let g = EdgeGraph::random(&mut rng, 12, 25);
            let expected = g.brute_force(0);
            let steps = drain(&g, 0, &Weights(&g));
            let mut got = vec![None; g.len()];
            for s in &steps {
                got[s.node] = Some(s.cost);
            }
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let g = EdgeGraph::random(&mut rng, 20, 30);
        let a = drain(&g, 0, &Weights(&g));
        let b = drain(&g, 0, &Weights(&g));
        assert_eq!(a, b);
    }
}
