// pathfinder/geometry/src/line_segment.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A single straight line segment, optimized with SIMD: `from` and `to` are
//! packed into one `F32x4` lane pair.

use crate::util;
use crate::vector::Vector2F;
use pathfinder_simd::default::F32x4;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LineSegment2F(pub F32x4);

impl LineSegment2F {
    #[inline]
    pub fn new(from: Vector2F, to: Vector2F) -> LineSegment2F {
        LineSegment2F(from.0.concat_xy_xy(to.0))
    }

    #[inline]
    pub fn from(&self) -> Vector2F {
        Vector2F(self.0.xy())
    }

    #[inline]
    pub fn to(&self) -> Vector2F {
        Vector2F(self.0.zw())
    }

    #[inline]
    pub fn vector(&self) -> Vector2F {
        self.to() - self.from()
    }

    #[inline]
    pub fn lerp(&self, t: f32) -> Vector2F {
        self.from().lerp(self.to(), t)
    }

    /// Parameter `t` of the point on this (infinite) line nearest `point`,
    /// found by projecting `point - from` onto `to - from`.
    #[inline]
    pub fn solve_t_for_point(&self, point: Vector2F) -> f32 {
        let v = self.vector();
        let len_sq = v.square_length();
        if len_sq == 0.0 {
            return 0.0;
        }
        (point - self.from()).dot(v) / len_sq
    }

    /// Unsigned distance from `point` to the closest point on this segment's
    /// supporting line.
    #[inline]
    pub fn distance_to_point(&self, point: Vector2F) -> f32 {
        let t = self.solve_t_for_point(point);
        self.lerp(t).distance(point)
    }

    /// Signed distance from `point` to this segment's supporting line.
    /// Positive when `point` lies to the left of `from -> to`.
    #[inline]
    pub fn signed_distance_to_point(&self, point: Vector2F) -> f32 {
        let v = self.vector();
        let len = v.length();
        if len == 0.0 {
            return 0.0;
        }
        v.det(point - self.from()) / len
    }

    /// Whether `point` lies strictly on one side or the other of the two
    /// segments `self` and `other`, i.e. whether the straight segments cross.
    #[inline]
    pub fn intersects_line_segment(&self, other: LineSegment2F) -> bool {
        let d1 = self.side(other.from());
        let d2 = self.side(other.to());
        let d3 = other.side(self.from());
        let d4 = other.side(self.to());
        ((d1 > 0.0) != (d2 > 0.0)) && ((d3 > 0.0) != (d4 > 0.0))
    }

    #[inline]
    fn side(&self, point: Vector2F) -> f32 {
        self.vector().det(point - self.from())
    }

    #[inline]
    pub fn reversed(&self) -> LineSegment2F {
        LineSegment2F::new(self.to(), self.from())
    }

    #[inline]
    pub fn scale(&self, factor: f32) -> LineSegment2F {
        LineSegment2F(self.0 * F32x4::splat(factor))
    }
}

/// Linear interpolation between two floats, re-exported for call sites that
/// work with raw coordinates rather than `Vector2F`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    util::lerp(a, b, t)
}
