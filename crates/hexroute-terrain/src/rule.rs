//! The default movement rule for a [`HexMap`].
//!
//! An edge `from -> to` is blocked when, in order:
//!
//! 1. the destination is occupied (`block_occupied`);
//! 2. the destination is [`TerrainClass::Impassable`] (`block_impassable`);
//! 3. a wall sits on the shared edge and no road crosses it;
//! 4. the climb exceeds `max_ascent` or the drop exceeds `max_descent`.
//!
//! The cost of an open edge is the first that applies of: road, uphill,
//! downhill, river crossing, default.
//!
//! Rivers run along tile edges. A move crosses a river exactly when the edge
//! it passes through carries one. Walking between two tiles that both border
//! a river through some other edge follows the river and costs nothing
//! extra. The check only looks at the shared edge, so it gives the same
//! answer in both directions.

use std::fmt;

use hexroute_core::Hex;
use hexroute_search::TraversalRule;

use crate::map::{EdgeFeature, HexMap, TerrainClass, Tile};

/// Step limit value meaning "no limit". Any negative value disables a limit.
pub const NO_LIMIT: i32 = -1;

/// Settings for [`DefaultRule`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleConfig {
    /// Refuse to enter occupied tiles.
    pub block_occupied: bool,
    /// Refuse to enter impassable tiles.
    pub block_impassable: bool,
    /// Largest elevation gain allowed in one step, or [`NO_LIMIT`].
    pub max_ascent: i32,
    /// Largest elevation loss allowed in one step, or [`NO_LIMIT`].
    pub max_descent: i32,
    pub default_cost: f64,
    pub road_cost: f64,
    pub uphill_cost: f64,
    pub downhill_cost: f64,
    pub river_cost: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            block_occupied: true,
            block_impassable: true,
            max_ascent: 1,
            max_descent: 2,
            default_cost: 1.0,
            road_cost: 0.5,
            uphill_cost: 2.0,
            downhill_cost: 1.0,
            river_cost: 3.0,
        }
    }
}

impl RuleConfig {
    /// Check that every cost is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let costs = [
            ("default_cost", self.default_cost),
            ("road_cost", self.road_cost),
            ("uphill_cost", self.uphill_cost),
            ("downhill_cost", self.downhill_cost),
            ("river_cost", self.river_cost),
        ];
        for (field, value) in costs {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidCost { field, value });
            }
        }
        Ok(())
    }
}

/// Errors reported when building a [`DefaultRule`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A cost field is negative, NaN or infinite.
    InvalidCost { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCost { field, value } => {
                write!(f, "rule config: {field} must be finite and >= 0, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The standard movement rule over a [`HexMap`].
#[derive(Debug, Clone)]
pub struct DefaultRule<'a> {
    map: &'a HexMap,
    config: RuleConfig,
}

impl<'a> DefaultRule<'a> {
    /// Build a rule, rejecting invalid costs up front.
    pub fn new(map: &'a HexMap, config: RuleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { map, config })
    }

    /// Rule with [`RuleConfig::default`].
    pub fn with_defaults(map: &'a HexMap) -> Self {
        Self {
            map,
            config: RuleConfig::default(),
        }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Whether moving `from -> to` crosses a river.
    pub fn crosses_river(&self, from: Hex, to: Hex) -> bool {
        self.map.edge_between(from, to, EdgeFeature::River)
    }

    fn tiles(&self, from: Hex, to: Hex) -> Option<(&'a Tile, &'a Tile)> {
        Some((self.map.tile(from)?, self.map.tile(to)?))
    }
}

#[inline]
fn limit_exceeded(delta: u32, limit: i32) -> bool {
    u32::try_from(limit).is_ok_and(|limit| delta > limit)
}

impl TraversalRule<Hex> for DefaultRule<'_> {
    fn is_traversable(&self, from: Hex, to: Hex) -> bool {
        let Some((src, dst)) = self.tiles(from, to) else {
            return false;
        };
        let cfg = &self.config;
        if cfg.block_occupied && dst.occupied {
            return false;
        }
        if cfg.block_impassable && dst.terrain == TerrainClass::Impassable {
            return false;
        }
        if self.map.edge_between(from, to, EdgeFeature::Wall)
            && !self.map.edge_between(from, to, EdgeFeature::Road)
        {
            return false;
        }
        let delta = dst.elevation.abs_diff(src.elevation);
        if dst.elevation > src.elevation && limit_exceeded(delta, cfg.max_ascent) {
            return false;
        }
        if dst.elevation < src.elevation && limit_exceeded(delta, cfg.max_descent) {
            return false;
        }
        true
    }

    fn cost(&self, from: Hex, to: Hex) -> f64 {
        let cfg = &self.config;
        let Some((src, dst)) = self.tiles(from, to) else {
            return cfg.default_cost;
        };
        if self.map.edge_between(from, to, EdgeFeature::Road) {
            cfg.road_cost
        } else if dst.elevation > src.elevation {
            cfg.uphill_cost
        } else if dst.elevation < src.elevation {
            cfg.downhill_cost
        } else if self.crosses_river(from, to) {
            cfg.river_cost
        } else {
            cfg.default_cost
        }
    }
}
