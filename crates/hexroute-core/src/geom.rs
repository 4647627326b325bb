//! Geometry primitives: [`Hex`], [`Direction`] and [`HexRange`].
//!
//! Coordinates are axial (`q`, `r`) on a pointy-top layout. The implicit
//! third cube coordinate is `s = -q - r`.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the six sides of a pointy-top hex, counter-clockwise from east.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All six directions, in side-index order.
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Side index in `0..6`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction for a side index. Indices wrap modulo 6.
    #[inline]
    pub const fn from_index(i: usize) -> Self {
        Self::ALL[i % 6]
    }

    /// The side facing this one on the neighboring hex.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Axial offset of the neighbor across this side.
    #[inline]
    pub const fn offset(self) -> Hex {
        match self {
            Direction::East => Hex::new(1, 0),
            Direction::NorthEast => Hex::new(1, -1),
            Direction::NorthWest => Hex::new(0, -1),
            Direction::West => Hex::new(-1, 0),
            Direction::SouthWest => Hex::new(-1, 1),
            Direction::SouthEast => Hex::new(0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::East => "E",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::West => "W",
            Direction::SouthWest => "SW",
            Direction::SouthEast => "SE",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

/// An axial hex coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { q: 0, r: 0 };

    /// Create a new hex coordinate.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit cube coordinate `s = -q - r`.
    #[inline]
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// The hex across side `dir`.
    #[inline]
    pub const fn neighbor(self, dir: Direction) -> Self {
        let o = dir.offset();
        Self::new(self.q + o.q, self.r + o.r)
    }

    /// All six neighbors, in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors(self) -> [Hex; 6] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    /// Number of steps between two hexes on an unobstructed grid.
    #[inline]
    pub fn distance(self, other: Hex) -> i32 {
        let d = self - other;
        (d.q.abs() + d.r.abs() + d.s().abs()) / 2
    }

    /// The side of `self` shared with `other`, or `None` when the two hexes
    /// are not adjacent.
    pub fn direction_to(self, other: Hex) -> Option<Direction> {
        let d = other - self;
        Direction::ALL.into_iter().find(|dir| dir.offset() == d)
    }
}

impl PartialOrd for Hex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.r.cmp(&other.r).then(self.q.cmp(&other.q))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl Add for Hex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Add<Direction> for Hex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Direction) -> Self {
        self.neighbor(rhs)
    }
}

impl Sub for Hex {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

// ---------------------------------------------------------------------------
// HexRange
// ---------------------------------------------------------------------------

/// A half-open rhombus of axial coordinates: `q` in \[min.q, max.q) and
/// `r` in \[min.r, max.r).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexRange {
    pub min: Hex,
    pub max: Hex,
}

impl HexRange {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(q0: i32, r0: i32, q1: i32, r1: i32) -> Self {
        Self {
            min: Hex::new(q0.min(q1), r0.min(r1)),
            max: Hex::new(q0.max(q1), r0.max(r1)),
        }
    }

    /// Number of columns (`q` extent).
    #[inline]
    pub fn width(self) -> i32 {
        self.max.q - self.min.q
    }

    /// Number of rows (`r` extent).
    #[inline]
    pub fn height(self) -> i32 {
        self.max.r - self.min.r
    }

    /// Total number of hexes in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.q >= self.max.q || self.min.r >= self.max.r
    }

    /// Whether `h` is inside the half-open range.
    #[inline]
    pub fn contains(self, h: Hex) -> bool {
        h.q >= self.min.q && h.q < self.max.q && h.r >= self.min.r && h.r < self.max.r
    }

    /// Flat row-major index of `h`, or `None` if out of range.
    #[inline]
    pub fn index_of(self, h: Hex) -> Option<usize> {
        if !self.contains(h) {
            return None;
        }
        let q = (h.q - self.min.q) as usize;
        let r = (h.r - self.min.r) as usize;
        Some(r * self.width() as usize + q)
    }

    /// Row-major iterator over every hex in the range.
    #[inline]
    pub fn iter(self) -> HexRangeIter {
        HexRangeIter {
            range: self,
            front: 0,
            back: self.len(),
        }
    }

    fn hex_at(self, idx: usize) -> Hex {
        let w = self.width() as usize;
        Hex::new(
            self.min.q + (idx % w) as i32,
            self.min.r + (idx / w) as i32,
        )
    }
}

impl IntoIterator for HexRange {
    type Item = Hex;
    type IntoIter = HexRangeIter;
    #[inline]
    fn into_iter(self) -> HexRangeIter {
        self.iter()
    }
}

impl fmt::Display for HexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Row-major iterator over the hexes in a [`HexRange`], walking flat
/// indices `front..back`.
#[derive(Clone, Debug)]
pub struct HexRangeIter {
    range: HexRange,
    front: usize,
    back: usize,
}

impl Iterator for HexRangeIter {
    type Item = Hex;

    #[inline]
    fn next(&mut self) -> Option<Hex> {
        if self.front >= self.back {
            return None;
        }
        let h = self.range.hex_at(self.front);
        self.front += 1;
        Some(h)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for HexRangeIter {
    #[inline]
    fn next_back(&mut self) -> Option<Hex> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.range.hex_at(self.back))
    }
}

impl ExactSizeIterator for HexRangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn hex_arithmetic() {
        let a = Hex::new(1, 2);
        let b = Hex::new(3, -4);
        assert_eq!(a + b, Hex::new(4, -2));
        assert_eq!(b - a, Hex::new(2, -6));
        assert_eq!(a.s(), -3);
    }

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
            assert_eq!(d.offset() + d.opposite().offset(), Hex::ZERO);
        }
    }

    #[test]
    fn neighbors_are_at_distance_one() {
        let h = Hex::new(2, -1);
        let ns: HashSet<_> = h.neighbors().into_iter().collect();
        assert_eq!(ns.len(), 6);
        for n in ns {
            assert_eq!(h.distance(n), 1);
        }
    }

    #[test]
    fn direction_to_neighbor() {
        let h = Hex::new(0, 0);
        for d in Direction::ALL {
            assert_eq!(h.direction_to(h + d), Some(d));
            assert_eq!((h + d).direction_to(h), Some(d.opposite()));
        }
        assert_eq!(h.direction_to(Hex::new(2, 0)), None);
        assert_eq!(h.direction_to(h), None);
    }

    #[test]
    fn distance() {
        assert_eq!(Hex::ZERO.distance(Hex::new(3, 0)), 3);
        assert_eq!(Hex::ZERO.distance(Hex::new(2, -3)), 3);
        assert_eq!(Hex::new(-1, 2).distance(Hex::new(2, -1)), 3);
        assert_eq!(Hex::new(4, 4).distance(Hex::new(4, 4)), 0);
    }

    #[test]
    fn range_basics() {
        let r = HexRange::new(0, 0, 3, 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Hex::new(2, 1)));
        assert!(!r.contains(Hex::new(3, 0)));
        assert!(!r.contains(Hex::new(0, -1)));
    }

    #[test]
    fn range_auto_canonicalize() {
        let r = HexRange::new(3, 2, 0, 0);
        assert_eq!(r.min, Hex::new(0, 0));
        assert_eq!(r.max, Hex::new(3, 2));
    }

    #[test]
    fn range_iter_order_and_size() {
        let r = HexRange::new(1, 1, 4, 3);
        let it = r.iter();
        assert_eq!(it.len(), 6);
        let hs: Vec<_> = it.collect();
        assert_eq!(hs[0], Hex::new(1, 1));
        assert_eq!(hs[3], Hex::new(1, 2));
        assert_eq!(hs[5], Hex::new(3, 2));
    }

    #[test]
    fn range_index_round_trip() {
        let r = HexRange::new(-2, 3, 5, 7);
        for (i, h) in r.iter().enumerate() {
            assert_eq!(r.index_of(h), Some(i));
        }
        assert_eq!(r.index_of(Hex::new(5, 3)), None);
    }

    #[test]
    fn range_iter_from_both_ends() {
        let r = HexRange::new(0, 0, 2, 2);
        let mut it = r.iter();
        assert_eq!(it.next_back(), Some(Hex::new(1, 1)));
        assert_eq!(it.next(), Some(Hex::new(0, 0)));
        assert_eq!(it.len(), 2);
        let rest: Vec<_> = it.rev().collect();
        assert_eq!(rest, vec![Hex::new(0, 1), Hex::new(1, 0)]);
    }

    #[test]
    fn empty_range() {
        let r = HexRange::new(2, 2, 2, 5);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}
