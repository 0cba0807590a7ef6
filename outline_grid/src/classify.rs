//! Interior classification: after packing, cells that never received a curve
//! reference are tested against every contour via a nearest-chord
//! signed-distance vote, and the ones found inside are pointed at a
//! synthetic far-offscreen "filled" segment.

use crate::grid::WipCell;
use crate::outline::Outline;
use glyph_geometry::line_segment::LineSegment2F;
use glyph_geometry::rect::RectF;
use glyph_geometry::vector::{vec2f, Vector2F};

/// Distance tolerance for treating two candidate nearest chords as tied, so
/// corner cases (the query point lands exactly on a shared vertex) fall
/// through to the sign-disambiguation branch rather than an arbitrary pick.
const TIE_EPSILON: f32 = 0.0001;

#[inline]
fn chord_t(p0: Vector2F, p2: Vector2F, p: Vector2F) -> f32 {
    LineSegment2F::new(p0, p2).solve_t_for_point(p)
}

#[inline]
fn chord_signed_distance(p0: Vector2F, p2: Vector2F, p: Vector2F) -> f32 {
    LineSegment2F::new(p0, p2).signed_distance_to_point(p)
}

/// Whether `bbox`'s center lies inside the filled region described by
/// `outline`'s contours, via nearest-chord signed-distance voting.
pub(crate) fn is_cell_filled(outline: &Outline, bbox: RectF) -> bool {
    let p = vec2f((bbox.max_x() + bbox.min_x()) / 2.0, (bbox.max_y() + bbox.min_y()) / 2.0);

    let mut min_dist = f32::MAX;
    let mut v = f32::MAX;
    let mut last_i = u32::MAX;

    for &range in &outline.contours {
        let contour_begin = range.begin;
        let contour_end = range.end;

        let mut i = contour_begin;
        while i < contour_end {
            let p0 = outline.points[i as usize];
            let p2 = outline.points[i as usize + 2];

            let t = chord_t(p0, p2, p);
            let p02 = p0.lerp(p2, t);
            let udist = p02.distance(p);

            if udist < min_dist + TIE_EPSILON {
                let d = chord_signed_distance(p0, p2, p);

                if udist >= min_dist && i > contour_begin {
                    let wraps_to_start = i == contour_end - 2 && last_i == contour_begin;
                    let last_d = if wraps_to_start {
                        chord_signed_distance(p0, p2, outline.points[contour_begin as usize + 2])
                    } else {
                        chord_signed_distance(p0, p2, outline.points[i as usize - 2])
                    };

                    v = if last_d < 0.0 { d.max(v) } else { d.min(v) };
                } else {
                    v = d;
                }

                min_dist = min_dist.min(udist);
                last_i = i;
            }

            i += 2;
        }
    }

    v > 0.0
}

/// Points every still-empty cell whose center classifies as filled at
/// `filled_cell`, the single-edge sentinel word.
pub(crate) fn set_filled_cells(outline: &Outline, cells: &mut [WipCell], filled_cell: u32) {
    for cell in cells.iter_mut() {
        if cell.value == 0 && is_cell_filled(outline, cell.bbox) {
            cell.value = filled_cell;
        }
    }
}

/// Appends a synthetic three-point segment far above the glyph's bbox, used
/// as the referent for the "filled" sentinel cell word. Returns the point
/// index of its first point.
pub(crate) fn add_filled_line(outline: &mut Outline) -> u32 {
    outline.add_odd_point();

    let index = outline.points.len() as u32;
    let y = outline.bbox.max_y() + 1000.0;
    let min_x = outline.bbox.min_x();

    outline.push_point(vec2f(min_x, y));
    outline.push_point(vec2f(min_x + 10.0, y));
    outline.push_point(vec2f(min_x + 20.0, y));

    index
}
