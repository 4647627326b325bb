use std::hash::Hash;

use crate::step::{Step, StepTable};

/// A finished route: steps from the origin (cost 0) to a destination.
///
/// Costs never decrease along a path. A path always holds at least the
/// origin; "no path" is expressed by the queries as `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "PathRepr<N>",
        bound(deserialize = "N: serde::Deserialize<'de>")
    )
)]
pub struct Path<N> {
    steps: Vec<Step<N>>,
}

/// Unchecked wire form of a [`Path`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PathRepr<N> {
    steps: Vec<Step<N>>,
}

#[cfg(feature = "serde")]
impl<N> TryFrom<PathRepr<N>> for Path<N> {
    type Error = &'static str;

    fn try_from(repr: PathRepr<N>) -> Result<Self, Self::Error> {
        let Some(origin) = repr.steps.first() else {
            return Err("path must hold at least the origin");
        };
        if origin.cost != 0.0 {
            return Err("path origin must cost 0");
        }
        let monotone = repr
            .steps
            .windows(2)
            .all(|w| w[0].cost <= w[1].cost && w[1].cost.is_finite());
        if !monotone {
            return Err("path costs must be finite and non-decreasing");
        }
        Ok(Self { steps: repr.steps })
    }
}

impl<N: Copy + Eq + Hash> Path<N> {
    /// Rebuild the route to `terminal` by following predecessor links in
    /// `table` back to the origin.
    pub fn from_step(table: &StepTable<N>, terminal: &Step<N>) -> Self {
        let mut steps = vec![*terminal];
        let mut cur = terminal.predecessor;
        while let Some(id) = cur {
            let step = table.get(id);
            steps.push(*step);
            cur = step.predecessor;
        }
        steps.reverse();
        Self { steps }
    }

    /// Longest prefix whose steps all cost at most `budget`.
    ///
    /// A negative (or NaN) budget keeps only the origin.
    pub fn truncate(&self, budget: f64) -> Self {
        if !(budget >= 0.0) {
            return Self {
                steps: vec![self.steps[0]],
            };
        }
        let keep = self
            .steps
            .iter()
            .position(|s| s.cost > budget)
            .unwrap_or(self.steps.len())
            .max(1);
        Self {
            steps: self.steps[..keep].to_vec(),
        }
    }
}

impl<N: Copy> Path<N> {
    /// Total cost, i.e. the destination's cumulative cost.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.cost)
    }

    /// Number of steps, origin included.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether origin and destination coincide.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.steps.len() == 1
    }

    pub fn origin(&self) -> N {
        self.steps[0].node
    }

    pub fn destination(&self) -> N {
        self.steps[self.steps.len() - 1].node
    }

    pub fn steps(&self) -> &[Step<N>] {
        &self.steps
    }

    /// Nodes from origin to destination.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.steps.iter().map(|s| s.node)
    }
}
