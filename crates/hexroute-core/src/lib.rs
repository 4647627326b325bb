//! **hexroute-core**: hex grid geometry.
//!
//! This crate provides the coordinate types used across the *hexroute*
//! crates: axial [`Hex`] coordinates, the six neighbor [`Direction`]s and
//! rhombus-shaped [`HexRange`] bounds.

pub mod geom;

pub use geom::{Direction, Hex, HexRange, HexRangeIter};
