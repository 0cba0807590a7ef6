//! Cell-grid fitting: chooses a resolution and packs per-cell curve
//! references into 32-bit words (§ cellword), growing the grid and retrying
//! whenever any cell overflows.

use crate::bezier::QuadraticBezier;
use crate::cellword::{cell_add_range, make_cell_from_single_edge};
use crate::classify::{add_filled_line, set_filled_cells};
use crate::outline::{ContourRange, Outline, OUTLINE_MAX_POINTS};
use glyph_geometry::rect::RectF;
use glyph_geometry::util::next_power_of_two_u32;
use glyph_geometry::vector::vec2f;
use log::{debug, warn};

const NONE: u32 = u32::MAX;
const MAX_CELL_DIMENSION: u32 = 64;
const ASPECT_RATIO_THRESHOLD: f32 = 1.8;

/// Transient per-cell packing state, discarded at the end of one
/// `try_to_fit_in_cell_count` attempt.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WipCell {
    pub(crate) bbox: RectF,
    from: u32,
    to: u32,
    pub(crate) value: u32,
    start_length: u32,
}

impl WipCell {
    fn new(bbox: RectF) -> WipCell {
        WipCell { bbox, from: NONE, to: NONE, value: 0, start_length: 0 }
    }
}

fn init_wipcells(outline_bbox: RectF, cell_count_x: u32, cell_count_y: u32) -> Vec<WipCell> {
    let w = outline_bbox.width();
    let h = outline_bbox.height();

    let mut cells = Vec::with_capacity((cell_count_x * cell_count_y) as usize);
    for y in 0..cell_count_y {
        for x in 0..cell_count_x {
            let bbox = RectF::from_points(
                vec2f(
                    outline_bbox.min_x() + (x as f32 / cell_count_x as f32) * w,
                    outline_bbox.min_y() + (y as f32 / cell_count_y as f32) * h,
                ),
                vec2f(
                    outline_bbox.min_x() + ((x + 1) as f32 / cell_count_x as f32) * w,
                    outline_bbox.min_y() + ((y + 1) as f32 / cell_count_y as f32) * h,
                ),
            );
            cells.push(WipCell::new(bbox));
        }
    }
    cells
}

/// Extends (or flushes) `cell`'s pending range to cover the segment ending
/// at point index `j`. Returns `false` if flushing caused a packing overflow.
fn wipcell_add_bezier(ucontour_begin: u32, j: u32, cell: &mut WipCell) -> bool {
    let mut ok = true;

    if cell.to != NONE && cell.to != j {
        debug_assert!(cell.to < j);

        if cell.from == ucontour_begin {
            debug_assert_eq!(cell.to % 2, 0);
            debug_assert_eq!(cell.from % 2, 0);
            cell.start_length = (cell.to - cell.from) / 2;
        } else {
            cell.value = cell_add_range(cell.value, cell.from, cell.to);
            ok = cell.value != 0;
        }

        cell.from = j;
    } else if cell.from == NONE {
        cell.from = j;
    }

    cell.to = j + 2;
    ok
}

/// Flushes `cell`'s remaining pending range(s) at the end of a contour,
/// resolving the wrap-around `startLength` continuation. Returns `false` on
/// packing overflow.
fn wipcell_finish_contour(ucontour_begin: u32, ucontour_end: u32, cell: &mut WipCell, max_start_len: &mut u32) -> bool {
    let mut ok = true;

    if cell.to < ucontour_end {
        cell.value = cell_add_range(cell.value, cell.from, cell.to);
        ok &= cell.value != 0;
        cell.from = NONE;
        cell.to = NONE;
    }

    debug_assert!(cell.to == NONE || cell.to == ucontour_end);
    cell.to = NONE;

    if cell.from != NONE && cell.start_length != 0 {
        cell.value = cell_add_range(cell.value, cell.from, ucontour_end + cell.start_length * 2);
        ok &= cell.value != 0;
        *max_start_len = (*max_start_len).max(cell.start_length);
        cell.from = NONE;
        cell.start_length = 0;
    }

    if cell.from != NONE {
        cell.value = cell_add_range(cell.value, cell.from, ucontour_end);
        ok &= cell.value != 0;
        cell.from = NONE;
    }

    if cell.start_length != 0 {
        cell.value = cell_add_range(cell.value, ucontour_begin, ucontour_begin + cell.start_length * 2);
        ok &= cell.value != 0;
        cell.start_length = 0;
    }

    debug_assert!(cell.from == NONE && cell.to == NONE);
    ok
}

/// Assigns one source segment to every cell whose rectangle it actually
/// passes through (not merely whose bbox overlaps).
fn for_each_wipcell_add_bezier(
    source_bbox: RectF,
    segment: QuadraticBezier,
    j: u32,
    ucontour_begin: u32,
    cell_count_x: u32,
    cell_count_y: u32,
    cells: &mut [WipCell],
) -> bool {
    if cell_count_x == 0 || cell_count_y == 0 {
        return true;
    }

    let bezier_bbox = segment.bbox();
    let w = source_bbox.width();
    let h = source_bbox.height();

    let cell_index = |v: f32, count: u32| -> u32 {
        let unclamped = (v * count as f32) as i64;
        unclamped.clamp(0, count as i64 - 1) as u32
    };

    let min_x = cell_index((bezier_bbox.min_x() - source_bbox.min_x()) / w, cell_count_x);
    let min_y = cell_index((bezier_bbox.min_y() - source_bbox.min_y()) / h, cell_count_y);
    let max_x = cell_index((bezier_bbox.max_x() - source_bbox.min_x()) / w, cell_count_x);
    let max_y = cell_index((bezier_bbox.max_y() - source_bbox.min_y()) / h, cell_count_y);

    let mut ok = true;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let cell = &mut cells[(y * cell_count_x + x) as usize];
            if segment.intersects_rect(cell.bbox) {
                ok &= wipcell_add_bezier(ucontour_begin, j, cell);
            }
        }
    }
    ok
}

impl Outline {
    /// Attempts to pack `self` into a `cell_count_x * cell_count_y` grid,
    /// returning the reindexed, packed replacement outline on success or
    /// `None` if any cell overflowed its word.
    fn try_to_fit_in_cell_count(&self, cell_count_x: u32, cell_count_y: u32) -> Option<Outline> {
        let mut cells = init_wipcells(self.bbox, cell_count_x, cell_count_y);
        let mut ok = true;

        let mut u = Outline::new();
        u.bbox = self.bbox;
        u.cell_count_x = cell_count_x;
        u.cell_count_y = cell_count_y;

        for &ContourRange { begin: contour_begin, end: contour_end } in &self.contours {
            u.add_odd_point();

            let urange = ContourRange {
                begin: u.points.len() as u32,
                end: u.points.len() as u32 + (contour_end - contour_begin),
            };
            u.contours.push(urange);

            let mut i = contour_begin;
            while i < contour_end {
                let p0 = self.points[i as usize];
                let p1 = self.points[i as usize + 1];

                let j = u.points.len() as u32;
                u.push_point(p0);
                u.push_point(p1);

                let segment = self.segment_at(i);
                ok &= for_each_wipcell_add_bezier(
                    self.bbox,
                    segment,
                    j,
                    urange.begin,
                    cell_count_x,
                    cell_count_y,
                    &mut cells,
                );

                i += 2;
            }

            let mut max_start_len = 0u32;
            for cell in cells.iter_mut() {
                ok &= wipcell_finish_contour(urange.begin, urange.end, cell, &mut max_start_len);
            }

            let continuation_end = contour_begin + max_start_len * 2;
            let mut i = contour_begin;
            while i < continuation_end {
                u.push_point(self.points[i as usize]);
                u.push_point(self.points[i as usize + 1]);
                i += 2;
            }
            u.push_point(self.points[continuation_end as usize]);
        }

        if !ok {
            return None;
        }

        let filled_line = add_filled_line(&mut u);
        let filled_cell = make_cell_from_single_edge(filled_line);
        set_filled_cells(&u, &mut cells, filled_cell);

        u.cells = cells.iter().map(|cell| cell.value).collect();

        Some(u)
    }

    /// Chooses a cell-grid resolution and packs the outline into it, growing
    /// the grid (doubling the narrower dimension) each time packing
    /// overflows a cell, until it fits or the grid exceeds 64 per side.
    /// Glyphs over [`OUTLINE_MAX_POINTS`] points, or that never fit, are left
    /// with a zeroed `0x0` grid.
    pub fn make_cells(&mut self) {
        if self.points.len() > OUTLINE_MAX_POINTS {
            warn!(
                "outline has {} points (max {}), skipping cell packing",
                self.points.len(),
                OUTLINE_MAX_POINTS
            );
            self.cell_count_x = 0;
            self.cell_count_y = 0;
            return;
        }

        let w = self.bbox.width();
        let h = self.bbox.height();

        let c = next_power_of_two_u32((self.points.len() as f32 * 0.75).sqrt() as u32);
        let mut cell_count_x = c;
        let mut cell_count_y = c;

        if h > w * ASPECT_RATIO_THRESHOLD {
            cell_count_x = (cell_count_x / 2).max(1);
        }
        if w > h * ASPECT_RATIO_THRESHOLD {
            cell_count_y = (cell_count_y / 2).max(1);
        }

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            debug!("attempt {}: fitting a {}x{} cell grid", attempt, cell_count_x, cell_count_y);

            if let Some(fitted) = self.try_to_fit_in_cell_count(cell_count_x, cell_count_y) {
                *self = fitted;
                return;
            }

            if cell_count_x > MAX_CELL_DIMENSION || cell_count_y > MAX_CELL_DIMENSION {
                warn!("packing never fit within a {0}x{0} grid; leaving outline unrendered", MAX_CELL_DIMENSION);
                self.cell_count_x = 0;
                self.cell_count_y = 0;
                return;
            }

            if cell_count_x == cell_count_y {
                if w > h {
                    cell_count_x *= 2;
                } else {
                    cell_count_y *= 2;
                }
            } else if cell_count_x < cell_count_y {
                cell_count_x *= 2;
            } else {
                cell_count_y *= 2;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glyph_geometry::vector::vec2f;

    fn square() -> Outline {
        let mut o = Outline::new();
        o.bbox = RectF::from_points(vec2f(0.0, 0.0), vec2f(4.0, 4.0));
        for p in [
            vec2f(0.0, 0.0),
            vec2f(2.0, 0.0),
            vec2f(4.0, 0.0),
            vec2f(4.0, 2.0),
            vec2f(4.0, 4.0),
            vec2f(2.0, 4.0),
            vec2f(0.0, 4.0),
            vec2f(0.0, 2.0),
            vec2f(0.0, 0.0),
        ] {
            o.push_point(p);
        }
        o.contours.push(ContourRange { begin: 0, end: 8 });
        o
    }

    #[test]
    fn square_packs_into_a_power_of_two_grid() {
        let mut o = square();
        o.make_cells();
        assert!(o.cell_count_x.is_power_of_two() || o.cell_count_x == 0);
        assert!(o.cell_count_y.is_power_of_two() || o.cell_count_y == 0);
        assert_eq!(o.cells.len(), (o.cell_count_x * o.cell_count_y) as usize);
    }

    #[test]
    fn single_cell_square_packs_as_one_range_in_slot_b() {
        // A square small enough that the grid search settles on a single
        // cell covering the whole bbox: its 4 segments land as one range
        // `[0, 8)`, matching the worked example in `cellword::test`.
        let mut o = square();
        let fitted = o.try_to_fit_in_cell_count(1, 1).expect("1x1 grid must fit 4 segments");
        assert_eq!(fitted.cells.len(), 1);
        assert_eq!(fitted.cells[0], 0x0000_0010);
    }

    #[test]
    fn oversized_outline_gets_zero_grid() {
        let mut o = Outline::new();
        o.bbox = RectF::from_points(vec2f(0.0, 0.0), vec2f(1.0, 1.0));
        for _ in 0..(OUTLINE_MAX_POINTS + 1) {
            o.push_point(vec2f(0.0, 0.0));
        }
        o.make_cells();
        assert_eq!(o.cell_count_x, 0);
        assert_eq!(o.cell_count_y, 0);
    }

    #[test]
    fn empty_outline_gets_zero_grid_without_looping() {
        let mut o = Outline::new();
        o.bbox = RectF::default();
        o.make_cells();
        assert_eq!(o.cell_count_x, 0);
        assert_eq!(o.cell_count_y, 0);
    }
}
