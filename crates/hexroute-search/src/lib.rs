//! Uniform-cost graph search for movement, range and targeting queries.
//!
//! A single engine, [`Search`], walks any [`Graph`] from one origin and yields
//! nodes lazily in non-decreasing cost. Which edges may be crossed, and what
//! they cost, is decided by a [`TraversalRule`], so every movement variant
//! (flying, ignoring occupancy, flat cost...) is a different rule rather
//! than a different algorithm.
//!
//! On top of the engine sit four queries:
//!
//! | Query | Answers |
//! |---|---|
//! | [`area`] | which nodes can be reached within a budget |
//! | [`to`] | cheapest path to the first node matching a predicate |
//! | [`to_area`] | cheapest path to any node of a set |
//! | [`in_range`] | whether a node can be reached within a budget |
//!
//! Costs are `f64` and must be finite and non-negative; a rule returning
//! anything else fails the query with [`SearchError::InvalidCost`]. Budgets
//! below zero mean "unlimited" (see [`Budget`]).

mod budget;
mod error;
mod frontier;
mod path;
mod query;
mod search;
mod step;
mod traits;

#[cfg(test)]
mod testing;

pub use budget::Budget;
pub use error::SearchError;
pub use frontier::Frontier;
pub use path::Path;
pub use query::{Area, area, in_range, to, to_area};
pub use search::Search;
pub use step::{Step, StepId, StepTable};
pub use traits::{Graph, RuleFn, TraversalRule, Unweighted};
