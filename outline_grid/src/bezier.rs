//! Quadratic Bézier curve math specific to the grid packer: bounding boxes,
//! de Casteljau splitting, and the intersection tests used by the thin-line
//! fixer and the curve-to-cell assignment pass.

use glyph_geometry::line_segment::LineSegment2F;
use glyph_geometry::rect::RectF;
use glyph_geometry::vector::Vector2F;

/// Three consecutive points `(p0, p1, p2)` forming one quadratic Bézier
/// segment, `p0` and `p2` on-curve and `p1` the control point.
#[derive(Clone, Copy, Debug)]
pub struct QuadraticBezier {
    pub p0: Vector2F,
    pub p1: Vector2F,
    pub p2: Vector2F,
}

impl QuadraticBezier {
    #[inline]
    pub fn new(p0: Vector2F, p1: Vector2F, p2: Vector2F) -> QuadraticBezier {
        QuadraticBezier { p0, p1, p2 }
    }

    #[inline]
    pub fn evaluate(&self, t: f32) -> Vector2F {
        let u = 1.0 - t;
        self.p0.scale(u * u) + self.p1.scale(2.0 * u * t) + self.p2.scale(t * t)
    }

    /// Tight axis-aligned bounding box: the endpoints' box extended to the
    /// curve's actual x/y extrema, rather than the (looser) control-polygon
    /// box that simply includes `p1`.
    pub fn bbox(&self) -> RectF {
        let mut rect = RectF::from_points(self.p0.min(self.p2), self.p0.max(self.p2));
        for t in self.axis_extrema_x().into_iter().chain(self.axis_extrema_y()) {
            if t > 0.0 && t < 1.0 {
                rect = rect.union_point(self.evaluate(t));
            }
        }
        rect
    }

    fn axis_extrema_x(&self) -> [f32; 1] {
        [Self::extremum_t(self.p0.x(), self.p1.x(), self.p2.x())]
    }

    fn axis_extrema_y(&self) -> [f32; 1] {
        [Self::extremum_t(self.p0.y(), self.p1.y(), self.p2.y())]
    }

    /// `t` at which `B'(t) == 0` for one scalar axis, or `f32::NAN` if the
    /// axis has no interior extremum (the control polygon is already
    /// monotonic on that axis).
    #[inline]
    fn extremum_t(p0: f32, p1: f32, p2: f32) -> f32 {
        let denom = p0 - 2.0 * p1 + p2;
        if denom == 0.0 {
            f32::NAN
        } else {
            (p0 - p1) / denom
        }
    }

    /// Splits this curve at `t = 0.5` via de Casteljau's algorithm, returning
    /// the three new interior points `(mid01, split, mid12)`: the resulting
    /// two segments are `(p0, mid01, split)` and `(split, mid12, p2)`.
    #[inline]
    pub fn split_in_half(&self) -> (Vector2F, Vector2F, Vector2F) {
        let mid01 = self.p0.lerp(self.p1, 0.5);
        let mid12 = self.p1.lerp(self.p2, 0.5);
        let split = mid01.lerp(mid12, 0.5);
        (mid01, split, mid12)
    }

    /// Roots (in ascending order) of `B(t).axis == value` that lie in `[0, 1]`,
    /// `axis` selecting the x (0) or y (1) coordinate function.
    fn roots_for_axis(&self, value: f32, axis: usize) -> [Option<f32>; 2] {
        let (p0, p1, p2) = if axis == 0 {
            (self.p0.x(), self.p1.x(), self.p2.x())
        } else {
            (self.p0.y(), self.p1.y(), self.p2.y())
        };

        let a = p0 - 2.0 * p1 + p2;
        let b = 2.0 * (p1 - p0);
        let c = p0 - value;

        let mut roots = [None, None];
        if a.abs() < 1e-9 {
            if b.abs() > 1e-9 {
                let t = -c / b;
                if (0.0..=1.0).contains(&t) {
                    roots[0] = Some(t);
                }
            }
            return roots;
        }

        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return roots;
        }
        let sqrt_disc = disc.sqrt();
        let t0 = (-b - sqrt_disc) / (2.0 * a);
        let t1 = (-b + sqrt_disc) / (2.0 * a);
        let mut out = 0;
        for t in [t0.min(t1), t0.max(t1)] {
            if (0.0..=1.0).contains(&t) {
                roots[out] = Some(t);
                out += 1;
            }
        }
        roots
    }

    /// Precise test of whether this curve passes through the closed
    /// rectangle `rect` — not merely whether their bounding boxes overlap.
    pub fn intersects_rect(&self, rect: RectF) -> bool {
        // A plain `bbox().intersects(rect)` quick-reject would wrongly
        // discard axis-aligned straight edges, whose tight bbox is
        // zero-width or zero-height and so never satisfies `RectF`'s
        // strict-inequality overlap test even when it lies exactly on a
        // cell boundary. Reject only when genuinely disjoint.
        let curve_bbox = self.bbox();
        let disjoint = curve_bbox.max_x() < rect.min_x()
            || curve_bbox.min_x() > rect.max_x()
            || curve_bbox.max_y() < rect.min_y()
            || curve_bbox.min_y() > rect.max_y();
        if disjoint {
            return false;
        }
        if rect.contains_point(self.p0) || rect.contains_point(self.p2) {
            return true;
        }

        for &x in &[rect.min_x(), rect.max_x()] {
            for root in self.roots_for_axis(x, 0).into_iter().flatten() {
                let y = self.evaluate(root).y();
                if y >= rect.min_y() && y <= rect.max_y() {
                    return true;
                }
            }
        }
        for &y in &[rect.min_y(), rect.max_y()] {
            for root in self.roots_for_axis(y, 1).into_iter().flatten() {
                let x = self.evaluate(root).x();
                if x >= rect.min_x() && x <= rect.max_x() {
                    return true;
                }
            }
        }
        false
    }

    /// Whether this curve's control polygon, with the control point's
    /// deviation from the chord midpoint doubled (a conservative bulge used
    /// to give the thin-line fixer some margin), crosses the chord
    /// `(q0, q2)`. Since a quadratic Bézier always lies within the convex
    /// hull of its control points, testing the (exaggerated) triangle's
    /// edges against the chord is a safe over-approximation of the curve
    /// itself actually crossing it.
    pub fn bulged_triangle_intersects_chord(&self, q0: Vector2F, q2: Vector2F) -> bool {
        let mid = self.p0.lerp(self.p2, 0.5);
        let bulge = self.p1 - mid;
        let p1 = self.p1 + bulge;

        let chord = LineSegment2F::new(q0, q2);
        let edges = [
            LineSegment2F::new(self.p0, p1),
            LineSegment2F::new(p1, self.p2),
            LineSegment2F::new(self.p2, self.p0),
        ];
        edges.iter().any(|edge| edge.intersects_line_segment(chord))
    }
}
