//! The central `Outline` value: owned points/contours/cells plus the
//! orchestrator that composes decompose -> fix-thin-lines -> make-cells.

use crate::bezier::QuadraticBezier;
use crate::decompose::Decomposer;
use crate::error::OutlineError;
use crate::walker::OutlineSource;
use glyph_geometry::rect::RectF;
use glyph_geometry::vector::Vector2F;
use log::trace;

/// Glyphs with more points than this are skipped outright: `make_cells`
/// leaves the grid at `0x0` rather than attempting to pack them. Chosen well
/// above any point count a hand-drawn or auto-traced glyph plausibly
/// reaches; see the sizing discussion in DESIGN.md.
pub const OUTLINE_MAX_POINTS: usize = 4096;

/// A half-open `[begin, end)` index range into `Outline::points` for one
/// contour. Both bounds are always even; `end` is the index of the last
/// segment's `P2`, so the contour spans `(end - begin) / 2` segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContourRange {
    pub begin: u32,
    pub end: u32,
}

impl ContourRange {
    #[inline]
    pub fn segment_count(&self) -> u32 {
        (self.end - self.begin) / 2
    }
}

/// A decomposed, grid-packed glyph outline: a spatial index ready for a GPU
/// fragment shader to sample.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    pub bbox: RectF,
    pub points: Vec<Vector2F>,
    pub contours: Vec<ContourRange>,
    pub cell_count_x: u32,
    pub cell_count_y: u32,
    pub cells: Vec<u32>,
}

impl Outline {
    pub fn new() -> Outline {
        Outline::default()
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn push_point(&mut self, point: Vector2F) -> u32 {
        let index = self.points.len() as u32;
        self.points.push(point);
        index
    }

    /// Appends a single padding point (the bbox's lower-left corner) if the
    /// point count is currently odd, so the next contour starts at an even
    /// index. A no-op on even counts.
    pub fn add_odd_point(&mut self) {
        if self.points.len() % 2 != 0 {
            let corner = glyph_geometry::vector::vec2f(self.bbox.min_x(), self.bbox.min_y());
            self.push_point(corner);
        }
    }

    /// The quadratic segment whose `P0` is at point index `i`.
    #[inline]
    pub fn segment_at(&self, i: u32) -> QuadraticBezier {
        let i = i as usize;
        QuadraticBezier::new(self.points[i], self.points[i + 1], self.points[i + 2])
    }

    /// Iterates `(p0 index, segment)` pairs for one contour's segments, in
    /// source order.
    pub fn contour_segments(&self, range: ContourRange) -> impl Iterator<Item = (u32, QuadraticBezier)> + '_ {
        (range.begin..range.end).step_by(2).map(move |i| (i, self.segment_at(i)))
    }

    /// Recomputes a tight bounding box over `points`, ignoring `bbox`. Used
    /// by callers that need the true extent of the current point set (e.g.
    /// after `subdivide`, which does not change geometry but can be invoked
    /// standalone without a prior `bbox` having been set).
    pub fn cbox(&self) -> RectF {
        match self.points.split_first() {
            None => RectF::default(),
            Some((first, rest)) => {
                let mut rect = RectF::from_points(*first, *first);
                for &p in rest {
                    rect = rect.union_point(p);
                }
                rect
            }
        }
    }

    /// Explicit release point, preserved for lifecycle-contract parity with
    /// the source's `outline_destroy`. Ordinary `drop` already releases the
    /// three owned `Vec`s; this just makes the call site self-documenting.
    pub fn destroy(self) {
        drop(self)
    }

    /// Runs the full pipeline: decompose the walker-driver's primitives,
    /// repair thin lines, then fit and pack the cell grid.
    ///
    /// `tag` is retained only for call-site parity with the source's debug
    /// tag parameter; it is otherwise inert (see SPEC_FULL.md §9).
    pub fn convert<S>(source: &S, _tag: u8) -> Result<Outline, OutlineError<S::Error>>
    where
        S: OutlineSource,
    {
        let mut decomposer: Decomposer<S::Error> = Decomposer::new(source.bbox());
        source.walk(&mut decomposer).map_err(OutlineError::Walker)?;
        let mut outline = decomposer.finish();
        trace!(
            "decomposed outline: {} points, {} contours",
            outline.points.len(),
            outline.contours.len()
        );

        outline.fix_thin_lines();
        trace!("fixed thin lines: {} points", outline.points.len());

        outline.make_cells();
        trace!(
            "packed cells: {}x{}",
            outline.cell_count_x,
            outline.cell_count_y
        );

        Ok(outline)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glyph_geometry::vector::vec2f;

    #[test]
    fn cbox_of_empty_outline_is_default() {
        assert_eq!(Outline::new().cbox(), RectF::default());
    }

    #[test]
    fn cbox_covers_all_points() {
        let mut outline = Outline::new();
        outline.push_point(vec2f(1.0, -2.0));
        outline.push_point(vec2f(-3.0, 5.0));
        outline.push_point(vec2f(0.0, 0.0));
        let cbox = outline.cbox();
        assert_eq!(cbox.min_x(), -3.0);
        assert_eq!(cbox.min_y(), -2.0);
        assert_eq!(cbox.max_x(), 1.0);
        assert_eq!(cbox.max_y(), 5.0);
    }

    #[test]
    fn add_odd_point_is_noop_on_even_count() {
        let mut outline = Outline::new();
        outline.push_point(vec2f(0.0, 0.0));
        outline.push_point(vec2f(1.0, 1.0));
        outline.add_odd_point();
        assert_eq!(outline.points.len(), 2);
    }

    #[test]
    fn add_odd_point_pads_on_odd_count() {
        let mut outline = Outline::new();
        outline.bbox = RectF::from_points(vec2f(-1.0, -1.0), vec2f(1.0, 1.0));
        outline.push_point(vec2f(0.0, 0.0));
        outline.add_odd_point();
        assert_eq!(outline.points.len(), 2);
        assert_eq!(outline.points[1], vec2f(-1.0, -1.0));
    }

    #[test]
    fn contour_range_segment_count() {
        let range = ContourRange { begin: 2, end: 10 };
        assert_eq!(range.segment_count(), 4);
    }
}
