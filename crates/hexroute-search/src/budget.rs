/// Cost limit applied by the queries.
///
/// The engine itself is unbounded; queries stop (or stop expanding) once a
/// step's cumulative cost exceeds the budget.
///
/// Converting from `f64` follows the "negative means unlimited" convention:
/// any value that is not `>= 0` (negatives and NaN) becomes
/// [`Budget::Unlimited`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Budget {
    #[default]
    Unlimited,
    Limited(f64),
}

impl Budget {
    /// Whether a step of cumulative cost `cost` is within budget.
    #[inline]
    pub fn admits(self, cost: f64) -> bool {
        match self {
            Budget::Unlimited => true,
            Budget::Limited(max) => cost <= max,
        }
    }
}

impl From<f64> for Budget {
    fn from(max: f64) -> Self {
        if max >= 0.0 {
            Budget::Limited(max)
        } else {
            Budget::Unlimited
        }
    }
}

impl From<i32> for Budget {
    fn from(max: i32) -> Self {
        Budget::from(f64::from(max))
    }
}

impl From<Option<f64>> for Budget {
    fn from(max: Option<f64>) -> Self {
        max.map_or(Budget::Unlimited, Budget::from)
    }
}
