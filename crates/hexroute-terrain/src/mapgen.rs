//! Random hex map generation.
//!
//! [`MapGen`] builds a [`HexMap`] in four passes: smoothed random elevation,
//! scattered impassable tiles, rivers traced along tile edges, then roads and
//! walls. Output is fully determined by the RNG, so seeded generators give
//! reproducible maps.

use hexroute_core::{Direction, Hex};
use log::debug;
use rand::{Rng, RngExt};

use crate::map::{EdgeFeature, HexMap, TerrainClass, Tile};

/// Parameters for [`MapGen`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapGenConfig {
    /// Elevations are drawn from `0..=max_elevation` before smoothing.
    pub max_elevation: i32,
    /// Number of neighbor-averaging passes applied to the elevation.
    pub smoothing: usize,
    /// Percent chance for a tile to be impassable.
    pub impassable_percent: u32,
    pub rivers: usize,
    /// Number of edges per river.
    pub river_length: usize,
    pub roads: usize,
    /// Number of tiles per road.
    pub road_length: usize,
    /// Number of isolated wall edges.
    pub walls: usize,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            max_elevation: 3,
            smoothing: 1,
            impassable_percent: 10,
            rivers: 2,
            river_length: 8,
            roads: 2,
            road_length: 6,
            walls: 6,
        }
    }
}

/// Hex map generator.
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub config: MapGenConfig,
}

impl<R: Rng> MapGen<R> {
    /// Generator with [`MapGenConfig::default`].
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, MapGenConfig::default())
    }

    pub fn with_config(rng: R, config: MapGenConfig) -> Self {
        Self { rng, config }
    }

    /// Generate a `width` x `height` map.
    pub fn generate(&mut self, width: i32, height: i32) -> HexMap {
        let mut map = HexMap::new(width, height);
        if map.bounds().is_empty() {
            return map;
        }
        self.elevation(&mut map);
        self.impassable(&mut map);
        for _ in 0..self.config.rivers {
            self.river(&mut map);
        }
        for _ in 0..self.config.roads {
            self.road(&mut map);
        }
        for _ in 0..self.config.walls {
            let h = self.random_hex(&map);
            let dir = self.random_dir();
            map.set_edge(h, dir, EdgeFeature::Wall, true);
        }
        debug!(
            "generated {}x{} hex map ({} rivers, {} roads, {} walls)",
            width, height, self.config.rivers, self.config.roads, self.config.walls
        );
        map
    }

    fn random_hex(&mut self, map: &HexMap) -> Hex {
        let b = map.bounds();
        Hex::new(
            self.rng.random_range(b.min.q..b.max.q),
            self.rng.random_range(b.min.r..b.max.r),
        )
    }

    fn random_dir(&mut self) -> Direction {
        Direction::from_index(self.rng.random_range(0..6usize))
    }

    fn elevation(&mut self, map: &mut HexMap) {
        let max = self.config.max_elevation.max(0);
        let rng = &mut self.rng;
        map.fill_fn(|_| Tile {
            elevation: rng.random_range(0..=max),
            ..Default::default()
        });
        for _ in 0..self.config.smoothing {
            let snapshot = map.clone();
            for (h, t) in snapshot.iter() {
                let (sum, n) = h
                    .neighbors()
                    .into_iter()
                    .filter_map(|nb| snapshot.tile(nb))
                    .fold((t.elevation, 1), |(s, n), nt| (s + nt.elevation, n + 1));
                map.set_elevation(h, (sum + n / 2) / n);
            }
        }
    }

    fn impassable(&mut self, map: &mut HexMap) {
        let chance = self.config.impassable_percent;
        for h in map.bounds() {
            if self.rng.random_range(0..100u32) < chance {
                map.set_terrain(h, TerrainClass::Impassable);
            }
        }
    }

    /// Trace a river along connected edges.
    ///
    /// The current edge is side `d` of tile `h`, heading to the corner
    /// between sides `d` and `d + 1`. Two edges continue from that corner:
    /// side `d + 1` of `h`, or side `d - 1` of the tile across side `d + 1`.
    fn river(&mut self, map: &mut HexMap) {
        let mut h = self.random_hex(map);
        let mut d = self.random_dir();
        for _ in 0..self.config.river_length {
            if !map.contains(h) && !map.contains(h + d) {
                break;
            }
            map.set_edge(h, d, EdgeFeature::River, true);
            let turn = Direction::from_index(d.index() + 1);
            if self.rng.random_range(0..2u32) == 0 {
                d = turn;
            } else {
                h = h + turn;
                d = Direction::from_index(d.index() + 5);
            }
        }
    }

    /// Lay a road as a random walk, connecting each tile to the next.
    fn road(&mut self, map: &mut HexMap) {
        let mut h = self.random_hex(map);
        for _ in 0..self.config.road_length {
            let dir = self.random_dir();
            let next = h + dir;
            if !map.contains(next) {
                continue;
            }
            map.set_edge(h, dir, EdgeFeature::Road, true);
            h = next;
        }
    }
}
