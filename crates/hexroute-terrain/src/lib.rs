//! Hex terrain for hexroute: a tile map with elevation and edge features,
//! the default movement rule, and a seeded map generator.

pub mod map;
pub mod mapgen;
pub mod rule;

pub use map::{EdgeFeature, EdgeMask, HexMap, TerrainClass, Tile};
pub use mapgen::{MapGen, MapGenConfig};
pub use rule::{ConfigError, DefaultRule, NO_LIMIT, RuleConfig};
