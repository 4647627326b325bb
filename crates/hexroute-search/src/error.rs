use std::fmt;

/// Errors that make a search refuse to produce an answer.
///
/// An unreachable target is *not* an error: queries report it as `None` or
/// `false`.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError<N> {
    /// The origin is not part of the graph.
    UnknownOrigin(N),
    /// The traversal rule returned a negative, NaN or infinite edge cost.
    InvalidCost { from: N, to: N, cost: f64 },
    /// Every edge cost was valid but the cumulative cost of reaching `to`
    /// through `from` is no longer finite.
    CostOverflow { from: N, to: N },
}

impl<N: fmt::Debug> fmt::Display for SearchError<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOrigin(n) => write!(f, "search origin {n:?} is not part of the graph"),
            Self::InvalidCost { from, to, cost } => {
                write!(f, "traversal rule returned invalid cost {cost} for edge {from:?} -> {to:?}")
            }
            Self::CostOverflow { from, to } => {
                write!(f, "cumulative cost overflows at edge {from:?} -> {to:?}")
            }
        }
    }
}

impl<N: fmt::Debug> std::error::Error for SearchError<N> {}
