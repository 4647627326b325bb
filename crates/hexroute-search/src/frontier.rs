//! Open set of a uniform-cost search.
//!
//! The frontier is an indexed binary min-heap keyed by `(cost, id)`. Every
//! entry's heap position is tracked so that a decrease-key can sift the entry
//! in place instead of leaving a stale duplicate behind. Equal costs pop in
//! id order, i.e. discovery order.

use std::cmp::Ordering;

use crate::step::StepId;

const ABSENT: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    cost: f64,
    id: StepId,
}

impl Entry {
    #[inline]
    fn order(&self, other: &Entry) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Priority queue of not-yet-evaluated steps.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    heap: Vec<Entry>,
    /// Heap position per step id, `ABSENT` when not queued.
    pos: Vec<usize>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `id` is queued.
    #[inline]
    pub fn contains(&self, id: StepId) -> bool {
        self.pos.get(id.0).is_some_and(|&p| p != ABSENT)
    }

    /// Queued cost of `id`.
    pub fn cost_of(&self, id: StepId) -> Option<f64> {
        match self.pos.get(id.0) {
            Some(&p) if p != ABSENT => Some(self.heap[p].cost),
            _ => None,
        }
    }

    /// Queue a step. Pushing an id that is already queued behaves like
    /// [`decrease`](Self::decrease).
    pub fn push(&mut self, id: StepId, cost: f64) {
        if self.contains(id) {
            self.decrease(id, cost);
            return;
        }
        if self.pos.len() <= id.0 {
            self.pos.resize(id.0 + 1, ABSENT);
        }
        let i = self.heap.len();
        self.heap.push(Entry { cost, id });
        self.pos[id.0] = i;
        self.sift_up(i);
    }

    /// Remove and return the cheapest step.
    pub fn pop(&mut self) -> Option<(StepId, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.pos[top.id.0] = ABSENT;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top.id, top.cost))
    }

    /// Lower the cost of a queued step and restore heap order.
    ///
    /// Returns `false` (and changes nothing) when `id` is not queued or
    /// `cost` is not lower than the queued cost.
    pub fn decrease(&mut self, id: StepId, cost: f64) -> bool {
        let Some(&p) = self.pos.get(id.0) else {
            return false;
        };
        if p == ABSENT || cost.total_cmp(&self.heap[p].cost) != Ordering::Less {
            return false;
        }
        self.heap[p].cost = cost;
        self.sift_up(p);
        true
    }

    /// Drop every queued step.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.pos.clear();
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a].id.0] = a;
        self.pos[self.heap[b].id.0] = b;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].order(&self.heap[parent]) != Ordering::Less {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < n && self.heap[right].order(&self.heap[left]) == Ordering::Less {
                child = right;
            }
            if self.heap[child].order(&self.heap[i]) != Ordering::Less {
                break;
            }
            self.swap(i, child);
            i = child;
        }
    }
}
