//! Thin-line repair and unconditional subdivision: both rebuild the outline
//! contour-by-contour into a fresh point array, the same "build `u`, then
//! replace `self`" shape the cell packer uses.

use crate::outline::{ContourRange, Outline};

impl Outline {
    /// Subdivides every segment in every contour at `t = 0.5`, unconditionally
    /// doubling the segment count. Not part of the default pipeline; exposed
    /// for callers tuning resolution externally.
    pub fn subdivide(&mut self) {
        let mut u = Outline::new();
        u.bbox = self.bbox;

        for &ContourRange { begin: contour_begin, end: contour_end } in &self.contours {
            u.add_odd_point();
            u.contours.push(ContourRange { begin: u.points.len() as u32, end: u32::MAX });

            let mut i = contour_begin;
            while i < contour_end {
                let p0 = self.points[i as usize];
                let (mid01, split, mid12) = self.segment_at(i).split_in_half();

                u.push_point(p0);
                u.push_point(mid01);
                u.push_point(split);
                u.push_point(mid12);

                i += 2;
            }

            u.contours.last_mut().unwrap().end = u.points.len() as u32;
            u.push_point(self.points[contour_end as usize]);
        }

        *self = u;
    }

    /// Single pass: for each segment, tests intersection against every
    /// non-adjacent segment in the same contour and subdivides offenders.
    /// Adjacency exclusions are the segment itself, its immediate
    /// neighbors (±2 point indices), and the wrap-around first↔last pair.
    pub fn fix_thin_lines(&mut self) {
        let mut u = Outline::new();
        u.bbox = self.bbox;

        for &ContourRange { begin: contour_begin, end: contour_end } in &self.contours {
            u.add_odd_point();
            u.contours.push(ContourRange { begin: u.points.len() as u32, end: u32::MAX });

            let mut i = contour_begin;
            while i < contour_end {
                let p0 = self.points[i as usize];
                let p1 = self.points[i as usize + 1];
                let segment = self.segment_at(i);

                let mut subdivide = false;
                let mut j = contour_begin;
                while j < contour_end {
                    let adjacent = (i == contour_begin && j == contour_end - 2)
                        || (i == contour_end - 2 && j == contour_begin)
                        || (j + 2 >= i && j <= i + 2);

                    if !adjacent {
                        let q0 = self.points[j as usize];
                        let q2 = self.points[j as usize + 2];
                        if segment.bulged_triangle_intersects_chord(q0, q2) {
                            subdivide = true;
                        }
                    }

                    j += 2;
                }

                if subdivide {
                    let (mid01, split, mid12) = segment.split_in_half();
                    u.push_point(p0);
                    u.push_point(mid01);
                    u.push_point(split);
                    u.push_point(mid12);
                } else {
                    u.push_point(p0);
                    u.push_point(p1);
                }

                i += 2;
            }

            u.contours.last_mut().unwrap().end = u.points.len() as u32;
            u.push_point(self.points[contour_end as usize]);
        }

        *self = u;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glyph_geometry::rect::RectF;
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
    fn well_separated_square_is_unaffected() {
        let mut o = square();
        let before = o.points.len();
        o.fix_thin_lines();
        assert_eq!(o.points.len(), before);
    }

    #[test]
    fn fix_thin_lines_is_idempotent_on_a_clean_contour() {
        let mut o = square();
        o.fix_thin_lines();
        let once = o.points.len();
        o.fix_thin_lines();
        assert_eq!(o.points.len(), once);
    }

    #[test]
    fn subdivide_doubles_segment_count() {
        let mut o = square();
        let segments_before = o.contours[0].segment_count();
        o.subdivide();
        assert_eq!(o.contours[0].segment_count(), segments_before * 2);
    }

    #[test]
    fn close_opposite_segments_within_a_contour_get_subdivided() {
        // A thin, nearly-flat sliver with four segments: the bottom and top
        // edges are not adjacent under the exclusion rule (only the two end
        // caps are their neighbors), and their control points are close
        // enough together to trigger a subdivision once bulged.
        let mut o = Outline::new();
        o.bbox = RectF::from_points(vec2f(-1.0, -1.0), vec2f(10.0, 1.0));
        for p in [
            vec2f(0.0, 0.0),
            vec2f(5.0, 0.02),
            vec2f(10.0, 0.0),
            vec2f(10.0, 0.01),
            vec2f(10.0, 0.02),
            vec2f(5.0, 0.0),
            vec2f(0.0, 0.02),
            vec2f(0.0, 0.01),
            vec2f(0.0, 0.0),
        ] {
            o.push_point(p);
        }
        o.contours.push(ContourRange { begin: 0, end: 8 });
        let before = o.points.len();
        o.fix_thin_lines();
        assert!(o.points.len() > before);
    }
}
