//! Small graphs and a brute-force oracle shared by the unit tests.

use rand::{Rng, RngExt};

use crate::traits::{Graph, TraversalRule};

/// `width` x `height` grid, 4-connected.
pub(crate) struct SquareGrid {
    pub width: i32,
    pub height: i32,
}

impl Graph for SquareGrid {
    type Node = (i32, i32);

    fn neighbors(&self, (x, y): (i32, i32), buf: &mut Vec<(i32, i32)>) {
        for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
            let n = (x + dx, y + dy);
            if self.contains(n) {
                buf.push(n);
            }
        }
    }

    fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

/// Directed graph over `0..n` with explicit edge weights.
#[derive(Debug, Clone)]
pub(crate) struct EdgeGraph {
    pub edges: Vec<Vec<(usize, f64)>>,
}

impl EdgeGraph {
    pub fn new(n: usize) -> Self {
        Self {
            edges: vec![Vec::new(); n],
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn add_edge(&mut self, from: usize, to: usize, cost: f64) {
        self.edges[from].push((to, cost));
    }

    pub fn add_undirected(&mut self, a: usize, b: usize, cost: f64) {
        self.add_edge(a, b, cost);
        self.add_edge(b, a, cost);
    }

    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        self.edges[from]
            .iter()
            .filter(|&&(t, _)| t == to)
            .map(|&(_, c)| c)
            .min_by(f64::total_cmp)
    }

    /// Random graph with integer weights in `0..10`, so that sums are exact.
    pub fn random(rng: &mut impl Rng, n: usize, edge_chance: u32) -> Self {
        let mut g = Self::new(n);
        for a in 0..n {
            for b in 0..n {
                if a != b && rng.random_range(0..100u32) < edge_chance {
                    g.add_edge(a, b, f64::from(rng.random_range(0..10u32)));
                }
            }
        }
        g
    }

    /// Shortest cost from `origin` to every node by repeated relaxation.
    pub fn brute_force(&self, origin: usize) -> Vec<Option<f64>> {
        let mut dist: Vec<Option<f64>> = vec![None; self.len()];
        dist[origin] = Some(0.0);
        for _ in 0..self.len() {
            let mut changed = false;
            for a in 0..self.len() {
                let Some(da) = dist[a] else { continue };
                for &(b, c) in &self.edges[a] {
                    let cand = da + c;
                    if dist[b].is_none_or(|db| cand < db) {
                        dist[b] = Some(cand);
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        dist
    }
}

impl Graph for EdgeGraph {
    type Node = usize;

    fn neighbors(&self, node: usize, buf: &mut Vec<usize>) {
        buf.extend(self.edges[node].iter().map(|&(t, _)| t));
    }

    fn contains(&self, node: usize) -> bool {
        node < self.len()
    }
}

/// Rule reading the weights stored in an [`EdgeGraph`].
pub(crate) struct Weights<'a>(pub &'a EdgeGraph);

impl TraversalRule<usize> for Weights<'_> {
    fn is_traversable(&self, from: usize, to: usize) -> bool {
        self.0.weight(from, to).is_some()
    }

    fn cost(&self, from: usize, to: usize) -> f64 {
        self.0.weight(from, to).unwrap_or(f64::INFINITY)
    }
}
