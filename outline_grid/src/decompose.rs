//! Converts arbitrary outline primitives (moves, lines, conics, cubics) into
//! the canonical consecutive-quadratic-triple stream the rest of the pipeline
//! expects.

use crate::outline::{ContourRange, Outline};
use crate::walker::OutlineWalker;
use glyph_geometry::rect::{RectF, RectI};
use glyph_geometry::vector::{vec2f, Vector2F, Vector2I};
use std::marker::PhantomData;

#[inline]
fn to_funits(v: Vector2I) -> Vector2F {
    vec2f(v.x() as f32 / 64.0, v.y() as f32 / 64.0)
}

#[inline]
fn to_funits_bbox(bbox: RectI) -> RectF {
    RectF::from_points(
        vec2f(bbox.min_x() as f32 / 64.0, bbox.min_y() as f32 / 64.0),
        vec2f(bbox.max_x() as f32 / 64.0, bbox.max_y() as f32 / 64.0),
    )
}

/// Builds a canonical [`Outline`] by receiving outline primitives in source
/// order from an [`OutlineSource`](crate::walker::OutlineSource). Every
/// method here is infallible (`Error` exists only so the decomposer can be
/// driven by any walker-driver); a real failure is the *source's* `walk`
/// call returning `Err`, which `Outline::convert` propagates directly.
pub struct Decomposer<E> {
    outline: Outline,
    _error: PhantomData<E>,
}

impl<E> Decomposer<E> {
    pub fn new(bbox: RectI) -> Decomposer<E> {
        let mut outline = Outline::new();
        outline.bbox = to_funits_bbox(bbox);
        Decomposer { outline, _error: PhantomData }
    }

    /// Patches the last open contour's end and returns the accumulated
    /// outline. Call after driving this decomposer to completion.
    pub fn finish(mut self) -> Outline {
        if let Some(last) = self.outline.contours.last_mut() {
            last.end = self.outline.points.len() as u32 - 1;
        }
        self.outline
    }
}

impl<E> OutlineWalker for Decomposer<E> {
    type Error = E;

    fn move_to(&mut self, to: Vector2I) -> Result<(), E> {
        if let Some(last) = self.outline.contours.last_mut() {
            last.end = self.outline.points.len() as u32 - 1;
            self.outline.add_odd_point();
        }

        debug_assert_eq!(self.outline.points.len() % 2, 0);

        let begin = self.outline.points.len() as u32;
        self.outline.contours.push(ContourRange { begin, end: u32::MAX });
        self.outline.push_point(to_funits(to));
        Ok(())
    }

    fn line_to(&mut self, to: Vector2I) -> Result<(), E> {
        let last = *self.outline.points.last().expect("line_to before move_to");
        let to_p = to_funits(to);
        let mid = last.lerp(to_p, 0.5);
        self.outline.push_point(mid);
        self.outline.push_point(to_p);
        Ok(())
    }

    fn conic_to(&mut self, ctrl: Vector2I, to: Vector2I) -> Result<(), E> {
        self.outline.push_point(to_funits(ctrl));
        self.outline.push_point(to_funits(to));
        Ok(())
    }

    fn cubic_to(&mut self, _ctrl1: Vector2I, _ctrl2: Vector2I, to: Vector2I) -> Result<(), E> {
        // Collapsed to a straight line, matching source behavior (see the
        // cubic-handling open question in SPEC_FULL.md §9).
        self.line_to(to)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::convert::Infallible;

    fn bbox() -> RectI {
        RectI::from_points(Vector2I::new(0, 0), Vector2I::new(64, 64))
    }

    #[test]
    fn triangle_decomposes_to_three_segments_seven_points() {
        let mut d: Decomposer<Infallible> = Decomposer::new(bbox());
        d.move_to(Vector2I::new(0, 0)).unwrap();
        d.line_to(Vector2I::new(64, 0)).unwrap();
        d.line_to(Vector2I::new(64, 64)).unwrap();
        d.line_to(Vector2I::new(0, 0)).unwrap();
        let outline = d.finish();

        assert_eq!(outline.contours.len(), 1);
        let range = outline.contours[0];
        assert_eq!(range.begin, 0);
        assert_eq!((range.end - range.begin) % 2, 0);
        assert_eq!(outline.points.len(), 7);
        assert_eq!((range.end - range.begin) / 2, 3);
    }

    #[test]
    fn second_contour_gets_odd_padding_point_when_needed() {
        let mut d: Decomposer<Infallible> = Decomposer::new(bbox());
        // First contour: move + 3 lines -> 7 points (odd), so the second
        // move_to must insert one padding point before opening contour two.
        d.move_to(Vector2I::new(0, 0)).unwrap();
        d.line_to(Vector2I::new(10, 0)).unwrap();
        d.line_to(Vector2I::new(10, 10)).unwrap();
        d.line_to(Vector2I::new(0, 0)).unwrap();
        assert_eq!(d.outline.points.len() % 2, 1);

        d.move_to(Vector2I::new(20, 20)).unwrap();
        assert_eq!(d.outline.contours[1].begin % 2, 0);

        let outline = d.finish();
        assert_eq!(outline.contours.len(), 2);
    }

    #[test]
    fn cubic_collapses_to_terminal_line() {
        let mut with_cubic: Decomposer<Infallible> = Decomposer::new(bbox());
        with_cubic.move_to(Vector2I::new(0, 0)).unwrap();
        with_cubic
            .cubic_to(Vector2I::new(1, 1), Vector2I::new(2, 2), Vector2I::new(10, 10))
            .unwrap();
        let cubic_outline = with_cubic.finish();

        let mut with_line: Decomposer<Infallible> = Decomposer::new(bbox());
        with_line.move_to(Vector2I::new(0, 0)).unwrap();
        with_line.line_to(Vector2I::new(10, 10)).unwrap();
        let line_outline = with_line.finish();

        assert_eq!(cubic_outline.points.len(), line_outline.points.len());
        assert_eq!(cubic_outline.points.last(), line_outline.points.last());
    }
}
