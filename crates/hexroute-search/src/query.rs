//! Movement, range and targeting queries.
//!
//! Each query drives a [`Search`] and stops pulling steps as soon as its
//! answer is known. Budgets follow the [`Budget`] conversion rules, so a
//! negative `max_cost` means "unlimited".

use std::collections::HashSet;
use std::hash::Hash;

use log::debug;

use crate::budget::Budget;
use crate::error::SearchError;
use crate::path::Path;
use crate::search::Search;
use crate::step::{Step, StepTable};
use crate::traits::{Graph, TraversalRule};

/// Result of an [`area`] query.
#[derive(Debug, Clone)]
pub struct Area<N> {
    budget: Budget,
    reachable: Vec<Step<N>>,
    boundary: Vec<Step<N>>,
    table: StepTable<N>,
}

impl<N: Copy + Eq + Hash> Area<N> {
    /// Steps within budget, in non-decreasing cost order. The origin is
    /// always first.
    pub fn reachable(&self) -> &[Step<N>] {
        &self.reachable
    }

    /// Steps just beyond the budget: discovered from a reachable step but too
    /// expensive to enter. Their cost is the cheapest entry from within the
    /// area. They were not expanded.
    pub fn boundary(&self) -> &[Step<N>] {
        &self.boundary
    }

    /// Budget the area was computed with.
    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Number of reachable nodes, origin included.
    pub fn len(&self) -> usize {
        self.reachable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty()
    }

    /// Whether `node` is within budget.
    pub fn contains(&self, node: N) -> bool {
        self.cost_to(node).is_some()
    }

    /// Cost of reaching `node`, or `None` when it is out of range.
    pub fn cost_to(&self, node: N) -> Option<f64> {
        self.table
            .lookup(node)
            .map(|s| s.cost)
            .filter(|&c| self.budget.admits(c))
    }

    /// Cheapest route to a reachable `node`.
    pub fn path_to(&self, node: N) -> Option<Path<N>> {
        let step = self.table.lookup(node)?;
        if !self.budget.admits(step.cost) {
            return None;
        }
        Some(Path::from_step(&self.table, step))
    }

    /// Reachable nodes, in non-decreasing cost order.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.reachable.iter().map(|s| s.node)
    }
}

/// Every node whose cheapest cost from `origin` is within `max_cost`.
///
/// Steps over budget are recorded as [`Area::boundary`] but never expanded,
/// since anything beyond them can only cost more.
pub fn area<G, R>(
    graph: &G,
    origin: G::Node,
    max_cost: impl Into<Budget>,
    rule: &R,
) -> Result<Area<G::Node>, SearchError<G::Node>>
where
    G: Graph + ?Sized,
    R: TraversalRule<G::Node> + ?Sized,
{
    let budget = max_cost.into();
    let mut search = Search::new(graph, origin, rule)?;
    let mut reachable = Vec::new();
    let mut boundary = Vec::new();

    while let Some(step) = search.next() {
        let step = step?;
        if budget.admits(step.cost) {
            reachable.push(step);
        } else {
            search.prune();
            boundary.push(step);
        }
    }

    debug!(
        "area from {origin:?} ({budget:?}): {} reachable, {} boundary",
        reachable.len(),
        boundary.len()
    );
    Ok(Area {
        budget,
        reachable,
        boundary,
        table: search.into_steps(),
    })
}

/// Cheapest path from `origin` to the first node accepted by `predicate`.
///
/// Nodes are offered in non-decreasing cost, so the first accepted one is a
/// cheapest match. Returns `Ok(None)` when nothing within `max_cost` matches.
pub fn to<G, R, F>(
    graph: &G,
    origin: G::Node,
    mut predicate: F,
    max_cost: impl Into<Budget>,
    rule: &R,
) -> Result<Option<Path<G::Node>>, SearchError<G::Node>>
where
    G: Graph + ?Sized,
    R: TraversalRule<G::Node> + ?Sized,
    F: FnMut(&Step<G::Node>) -> bool,
{
    let budget = max_cost.into();
    let mut search = Search::new(graph, origin, rule)?;

    while let Some(step) = search.next() {
        let step = step?;
        if !budget.admits(step.cost) {
            break;
        }
        if predicate(&step) {
            let path = search.path_to(&step);
            debug!(
                "path from {origin:?} to {:?}: cost {}, {} steps, {} evaluated",
                step.node,
                path.cost(),
                path.len(),
                search.evaluated_count()
            );
            return Ok(Some(path));
        }
    }

    debug!(
        "no path from {origin:?} ({budget:?}), {} evaluated",
        search.evaluated_count()
    );
    Ok(None)
}

/// Cheapest path from `origin` to any node of `targets`.
///
/// Returns `Ok(None)` when no target is reachable (including when `targets`
/// is empty).
pub fn to_area<G, R, I>(
    graph: &G,
    origin: G::Node,
    targets: I,
    rule: &R,
) -> Result<Option<Path<G::Node>>, SearchError<G::Node>>
where
    G: Graph + ?Sized,
    R: TraversalRule<G::Node> + ?Sized,
    I: IntoIterator<Item = G::Node>,
{
    let targets: HashSet<G::Node> = targets.into_iter().collect();
    if targets.is_empty() {
        // Still reject a bad origin.
        Search::new(graph, origin, rule)?;
        return Ok(None);
    }
    to(
        graph,
        origin,
        |s: &Step<G::Node>| targets.contains(&s.node),
        Budget::Unlimited,
        rule,
    )
}

/// Whether `target` can be reached from `origin` within `max_cost`.
pub fn in_range<G, R>(
    graph: &G,
    origin: G::Node,
    target: G::Node,
    max_cost: impl Into<Budget>,
    rule: &R,
) -> Result<bool, SearchError<G::Node>>
where
    G: Graph + ?Sized,
    R: TraversalRule<G::Node> + ?Sized,
{
    let budget = max_cost.into();
    let mut search = Search::new(graph, origin, rule)?;
    let mut found = false;
    for step in search.by_ref() {
        let step = step?;
        if !budget.admits(step.cost) {
            break;
        }
        if step.node == target {
            found = true;
            break;
        }
    }
    debug!(
        "{target:?} in range of {origin:?} ({budget:?}): {found}, {} evaluated",
        search.evaluated_count()
    );
    Ok(found)
}
