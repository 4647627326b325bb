//! A rhombus-shaped hex map.
//!
//! [`HexMap`] stores one [`Tile`] per hex of its [`HexRange`]. Walls, roads
//! and rivers live on tile *edges*: an edge is shared by two tiles, and
//! [`HexMap::set_edge`] keeps both sides in sync.

use hexroute_core::{Direction, Hex, HexRange};
use hexroute_search::Graph;

/// Coarse terrain type of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainClass {
    #[default]
    Open,
    /// Cannot be entered (cliffs, deep water...).
    Impassable,
}

/// Feature that can sit on the edge between two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeFeature {
    Wall,
    Road,
    River,
}

/// Set of tile sides, one bit per [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeMask(pub u8);

impl EdgeMask {
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn has(self, dir: Direction) -> bool {
        self.0 & (1 << dir.index()) != 0
    }

    #[inline]
    pub fn set(&mut self, dir: Direction, on: bool) {
        if on {
            self.0 |= 1 << dir.index();
        } else {
            self.0 &= !(1 << dir.index());
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Sides in the set, in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.has(d))
    }
}

/// One map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: TerrainClass,
    pub elevation: i32,
    /// Whether a unit stands on the tile.
    pub occupied: bool,
    pub walls: EdgeMask,
    pub roads: EdgeMask,
    pub rivers: EdgeMask,
}

impl Tile {
    /// Sides of this tile carrying `feature`.
    #[inline]
    pub fn edges(&self, feature: EdgeFeature) -> EdgeMask {
        match feature {
            EdgeFeature::Wall => self.walls,
            EdgeFeature::Road => self.roads,
            EdgeFeature::River => self.rivers,
        }
    }

    fn edges_mut(&mut self, feature: EdgeFeature) -> &mut EdgeMask {
        match feature {
            EdgeFeature::Wall => &mut self.walls,
            EdgeFeature::Road => &mut self.roads,
            EdgeFeature::River => &mut self.rivers,
        }
    }
}

/// A hex map over a [`HexRange`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "HexMapRepr"))]
pub struct HexMap {
    bounds: HexRange,
    tiles: Vec<Tile>,
}

/// Unchecked wire form of a [`HexMap`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct HexMapRepr {
    bounds: HexRange,
    tiles: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl TryFrom<HexMapRepr> for HexMap {
    type Error = String;

    fn try_from(repr: HexMapRepr) -> Result<Self, Self::Error> {
        let want = repr.bounds.len();
        if repr.tiles.len() != want {
            return Err(format!(
                "hex map over {} needs {want} tiles, got {}",
                repr.bounds,
                repr.tiles.len()
            ));
        }
        Ok(Self {
            bounds: repr.bounds,
            tiles: repr.tiles,
        })
    }
}

impl HexMap {
    /// Create a `width` x `height` map of open, flat tiles with `q` in
    /// `0..width` and `r` in `0..height`.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = HexRange::new(0, 0, width.max(0), height.max(0));
        Self {
            bounds,
            tiles: vec![Tile::default(); bounds.len()],
        }
    }

    /// The map's extent.
    pub fn bounds(&self) -> HexRange {
        self.bounds
    }

    /// Whether `h` is on the map.
    pub fn contains(&self, h: Hex) -> bool {
        self.bounds.contains(h)
    }

    /// Tile at `h`, or `None` if off the map.
    pub fn tile(&self, h: Hex) -> Option<&Tile> {
        self.bounds.index_of(h).map(|i| &self.tiles[i])
    }

    /// Mutable tile at `h`, or `None` if off the map.
    pub fn tile_mut(&mut self, h: Hex) -> Option<&mut Tile> {
        self.bounds.index_of(h).map(|i| &mut self.tiles[i])
    }

    /// Set the terrain class. Does nothing off the map.
    pub fn set_terrain(&mut self, h: Hex, terrain: TerrainClass) {
        if let Some(t) = self.tile_mut(h) {
            t.terrain = terrain;
        }
    }

    /// Set the elevation. Does nothing off the map.
    pub fn set_elevation(&mut self, h: Hex, elevation: i32) {
        if let Some(t) = self.tile_mut(h) {
            t.elevation = elevation;
        }
    }

    /// Mark the tile as occupied or free. Does nothing off the map.
    pub fn set_occupied(&mut self, h: Hex, occupied: bool) {
        if let Some(t) = self.tile_mut(h) {
            t.occupied = occupied;
        }
    }

    /// Add or remove `feature` on side `dir` of `h`, and on the matching side
    /// of the neighbor across it.
    pub fn set_edge(&mut self, h: Hex, dir: Direction, feature: EdgeFeature, on: bool) {
        if let Some(t) = self.tile_mut(h) {
            t.edges_mut(feature).set(dir, on);
        }
        if let Some(t) = self.tile_mut(h + dir) {
            t.edges_mut(feature).set(dir.opposite(), on);
        }
    }

    /// Whether side `dir` of `h` carries `feature`.
    pub fn has_edge(&self, h: Hex, dir: Direction, feature: EdgeFeature) -> bool {
        self.tile(h).is_some_and(|t| t.edges(feature).has(dir))
    }

    /// Whether the edge shared by `a` and `b` carries `feature`. Always
    /// `false` for hexes that are not adjacent.
    pub fn edge_between(&self, a: Hex, b: Hex, feature: EdgeFeature) -> bool {
        match a.direction_to(b) {
            Some(dir) => {
                self.has_edge(a, dir, feature) || self.has_edge(b, dir.opposite(), feature)
            }
            None => false,
        }
    }

    /// Fill every tile using a function of its position.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Hex) -> Tile) {
        for (i, h) in self.bounds.iter().enumerate() {
            self.tiles[i] = f(h);
        }
    }

    /// Iterate over `(position, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Hex, &Tile)> {
        self.bounds.iter().zip(self.tiles.iter())
    }
}

impl Graph for HexMap {
    type Node = Hex;

    fn neighbors(&self, node: Hex, buf: &mut Vec<Hex>) {
        buf.extend(node.neighbors().into_iter().filter(|&n| self.contains(n)));
    }

    fn contains(&self, node: Hex) -> bool {
        self.bounds.contains(node)
    }
}
