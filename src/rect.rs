// Grounded on pathfinder_geometry's `RectF`: an axis-aligned bounding
// box represented as (origin, lower_right) rather than (origin, size),
// so union/intersection are branch-free. This is the *bounds* type
// returned by `ContourContract::bounds` — distinct from the
// `Rectangle` contour variant (src/contour/rect.rs), which additionally
// carries signed width/height to represent traversal direction.

use crate::vector::Vector2F;

/// An axis-aligned rectangle, stored as its two corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    origin: Vector2F,
    lower_right: Vector2F,
}

impl Default for RectF {
    #[inline]
    fn default() -> RectF {
        RectF {
            origin: Vector2F::zero(),
            lower_right: Vector2F::zero(),
        }
    }
}

impl RectF {
    #[inline]
    pub fn new(origin: Vector2F, size: Vector2F) -> RectF {
        RectF {
            origin,
            lower_right: origin + size,
        }
    }

    #[inline]
    pub fn from_points(origin: Vector2F, lower_right: Vector2F) -> RectF {
        RectF {
            origin: origin.min(lower_right),
            lower_right: origin.max(lower_right),
        }
    }

    #[inline]
    pub fn origin(&self) -> Vector2F {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Vector2F {
        self.lower_right - self.origin
    }

    #[inline]
    pub fn upper_right(&self) -> Vector2F {
        Vector2F::new(self.lower_right.x(), self.origin.y())
    }

    #[inline]
    pub fn lower_left(&self) -> Vector2F {
        Vector2F::new(self.origin.x(), self.lower_right.y())
    }

    #[inline]
    pub fn lower_right(&self) -> Vector2F {
        self.lower_right
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x()
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y()
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.lower_right.x()
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.lower_right.y()
    }

    #[inline]
    pub fn contains_point(&self, point: Vector2F) -> bool {
        point.x() >= self.origin.x()
            && point.x() <= self.lower_right.x()
            && point.y() >= self.origin.y()
            && point.y() <= self.lower_right.y()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.origin == self.lower_right
    }

    #[inline]
    pub fn union_point(&self, point: Vector2F) -> RectF {
        RectF::from_points(self.origin.min(point), self.lower_right.max(point))
    }

    #[inline]
    pub fn union_rect(&self, other: RectF) -> RectF {
        RectF::from_points(
            self.origin.min(other.origin),
            self.lower_right.max(other.lower_right),
        )
    }
}

#[inline]
pub(crate) fn union_rect(bounds: &mut RectF, new_point: Vector2F, first: bool) {
    if first {
        *bounds = RectF::from_points(new_point, new_point);
    } else {
        *bounds = bounds.union_point(new_point);
    }
}
