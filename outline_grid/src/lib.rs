//! Converts vector glyph outlines into a spatially indexed, GPU-ready cell
//! grid: a uniform grid of cells over the glyph bounding box, where each
//! cell holds a bit-packed reference to up to three Bézier segments (plus
//! an interior/exterior classification for cells with none) that a fragment
//! shader can sample to evaluate analytic antialiased coverage.
//!
//! The pipeline, leaves first: [`walker`] receives raw outline primitives
//! from a caller-supplied font parser; [`decompose`] normalizes them into
//! consecutive quadratic Bézier triples; [`thin`] repairs segments that
//! would self-intersect at the chosen resolution; [`grid`] fits and packs
//! the cell grid, growing it on overflow; [`classify`] fills in the cells
//! that received no curve reference. [`outline::Outline::convert`] composes
//! all of it.

mod bezier;
mod cellword;
mod classify;
mod decompose;
mod error;
mod grid;
mod outline;
mod thin;
mod walker;

pub use cellword::{decode_cell, make_cell_from_single_edge, CellSlot};
pub use error::OutlineError;
pub use outline::{ContourRange, Outline, OUTLINE_MAX_POINTS};
pub use walker::{OutlineSource, OutlineWalker};
