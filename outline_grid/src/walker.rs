//! The callback interface a font-file parser drives to feed raw outline
//! primitives into the decomposer. Coordinates are integers in 1/64ths, the
//! convention FreeType-style outline walkers use; the decomposer divides by
//! 64 itself.
//!
//! Two traits are involved, mirroring the split between a glyph's raw data
//! and the library that knows how to walk it:
//!
//! - [`OutlineWalker`] is the callback set (move/line/conic/cubic) that
//!   receives primitives as they are produced.
//! - [`OutlineSource`] is the walker-driver: it owns (or borrows) the raw
//!   glyph program, exposes its integer bounding box, and drives calls into
//!   an `OutlineWalker` in source order. Font parsing itself is out of scope
//!   for this crate; callers implement `OutlineSource` over their own parsed
//!   glyph representation.

use glyph_geometry::rect::RectI;
use glyph_geometry::vector::Vector2I;

/// Receives outline primitives in source order. All four methods can fail,
/// matching the per-callback error protocol of C outline-walking APIs (a
/// nonzero return aborts the walk); implementations that cannot fail simply
/// use `Infallible` as `Error`.
pub trait OutlineWalker {
    type Error;

    /// Starts a new contour at `to`, closing the previous one if any.
    fn move_to(&mut self, to: Vector2I) -> Result<(), Self::Error>;

    /// Appends a straight line to `to`.
    fn line_to(&mut self, to: Vector2I) -> Result<(), Self::Error>;

    /// Appends a quadratic Bézier curve through control point `ctrl` to `to`.
    fn conic_to(&mut self, ctrl: Vector2I, to: Vector2I) -> Result<(), Self::Error>;

    /// Appends a cubic Bézier curve through `ctrl1`/`ctrl2` to `to`.
    fn cubic_to(&mut self, ctrl1: Vector2I, ctrl2: Vector2I, to: Vector2I) -> Result<(), Self::Error>;
}

/// A glyph's raw outline program: knows its own integer bounding box and how
/// to drive an [`OutlineWalker`] over its primitives.
pub trait OutlineSource {
    type Error;

    /// The glyph's bounding box, in the same 1/64-unit space as the points
    /// passed to the walker.
    fn bbox(&self) -> RectI;

    /// Walks this glyph's primitives in source order, reporting each to
    /// `walker`. Should stop and propagate the first error `walker` returns.
    fn walk<W>(&self, walker: &mut W) -> Result<(), Self::Error>
    where
        W: OutlineWalker<Error = Self::Error>;
}
