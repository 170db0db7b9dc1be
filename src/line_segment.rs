// Grounded on pathfinder_geometry's `LineSegment2F`, dropped to plain
// f32 fields for the same reason as `Vector2F` (see vector.rs). Used
// both as the chord type flattening produces and as the baseline of a
// `CurveOp::Line`.

use crate::vector::Vector2F;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment2F {
    from: Vector2F,
    to: Vector2F,
}

impl LineSegment2F {
    #[inline]
    pub fn new(from: Vector2F, to: Vector2F) -> LineSegment2F {
        LineSegment2F { from, to }
    }

    #[inline]
    pub fn from(&self) -> Vector2F {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Vector2F {
        self.to
    }

    #[inline]
    pub fn vector(&self) -> Vector2F {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.vector().length()
    }

    #[inline]
    pub fn sample(&self, t: f32) -> Vector2F {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn split(&self, t: f32) -> (LineSegment2F, LineSegment2F) {
        let mid = self.sample(t);
        (
            LineSegment2F::new(self.from, mid),
            LineSegment2F::new(mid, self.to),
        )
    }

    #[inline]
    pub fn reversed(&self) -> LineSegment2F {
        LineSegment2F::new(self.to, self.from)
    }

    #[inline]
    pub fn square_length(&self) -> f32 {
        self.vector().square_length()
    }

    /// Finds `t` such that `sample(t)` is the foot of the perpendicular
    /// from `point` to the (infinite) line through this segment, clamped
    /// to `[0, 1]` so the result always lies on the segment itself.
    #[inline]
    pub fn clamped_project(&self, point: Vector2F) -> f32 {
        let len_sq = self.square_length();
        if len_sq <= crate::util::EPSILON {
            return 0.0;
        }
        let t = (point - self.from).dot(self.vector()) / len_sq;
        crate::util::clamp01(t)
    }
}
