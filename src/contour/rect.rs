//! The axis-aligned rectangle contour variant: closed-form, O(1) for
//! every query since a rectangle's four edges never need adaptive
//! flattening. Grounded on `pathfinder_content::outline::Contour`'s
//! general machinery, specialized the way `pathfinder_geometry::RectF`
//! itself is a specialized, closed-form stand-in for an arbitrary
//! polygon; width/height may be negative, which reverses which way the
//! fixed corner order is traversed without needing a distinct code path.

use crate::builder::PathBuilder;
use crate::curve::CurveOp;
use crate::line_segment::LineSegment2F;
use crate::measure::MeasureHandle;
use crate::rect::RectF;
use crate::vector::Vector2F;

use super::{ClosestPoint, Contour, ContourContract, Direction, PathFlags};

/// An axis-aligned rectangle, traversed `(x,y) -> (x+w,y) -> (x+w,y+h)
/// -> (x,y+h) -> close`. `size.x()`/`size.y()` (width/height) may be
/// negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectContour {
    origin: Vector2F,
    size: Vector2F,
}

impl RectContour {
    #[inline]
    pub fn new(origin: Vector2F, size: Vector2F) -> RectContour {
        RectContour { origin, size }
    }

    /// The four corners in fixed traversal order.
    fn corners(&self) -> [Vector2F; 4] {
        let (x, y) = (self.origin.x(), self.origin.y());
        let (w, h) = (self.size.x(), self.size.y());
        [
            Vector2F::new(x, y),
            Vector2F::new(x + w, y),
            Vector2F::new(x + w, y + h),
            Vector2F::new(x, y + h),
        ]
    }

    /// The four edges (corner[i] -> corner[i+1 mod 4]) in traversal order.
    fn edges(&self) -> [LineSegment2F; 4] {
        let c = self.corners();
        [
            LineSegment2F::new(c[0], c[1]),
            LineSegment2F::new(c[1], c[2]),
            LineSegment2F::new(c[2], c[3]),
            LineSegment2F::new(c[3], c[0]),
        ]
    }

    fn perimeter(&self) -> f32 {
        2.0 * (self.size.x().abs() + self.size.y().abs())
    }

    /// Locates the edge and local `[0,1]` parameter for arc length
    /// `distance`, plus the cumulative length at that edge's start.
    fn locate(&self, distance: f32) -> (usize, f32, f32) {
        let edges = self.edges();
        let mut cumulative = 0.0;
        for (index, edge) in edges.iter().enumerate() {
            let len = edge.length();
            if distance < cumulative + len || index == edges.len() - 1 {
                let local = if len > 0.0 { ((distance - cumulative) / len).max(0.0).min(1.0) } else { 0.0 };
                return (index, local, cumulative);
            }
            cumulative += len;
        }
        (edges.len() - 1, 1.0, cumulative)
    }
}

impl ContourContract for RectContour {
    fn flags(&self) -> PathFlags {
        PathFlags::CLOSED | PathFlags::FLAT
    }

    fn bounds(&self) -> Option<RectF> {
        if self.size.x() == 0.0 || self.size.y() == 0.0 {
            return None;
        }
        let c = self.corners();
        Some(RectF::from_points(c[0], c[2]))
    }

    fn start_end(&self) -> (Vector2F, Vector2F) {
        (self.origin, self.origin)
    }

    fn print(&self, out: &mut String) {
        crate::printer::print_rect(self.origin.x(), self.origin.y(), self.size.x(), self.size.y(), out);
    }

    fn foreach(&self, _tolerance: f32, f: &mut dyn FnMut(CurveOp) -> bool) -> bool {
        let c = self.corners();
        if !f(CurveOp::mv(c[0])) {
            return false;
        }
        if !f(CurveOp::line(c[0], c[1])) {
            return false;
        }
        if !f(CurveOp::line(c[1], c[2])) {
            return false;
        }
        if !f(CurveOp::line(c[2], c[3])) {
            return false;
        }
        f(CurveOp::close(c[3], c[0]))
    }

    fn reverse(&self) -> Contour {
        // Swapping width and height's roles would change the shape, so
        // reversal instead walks the same four corners backwards:
        // (x,y) -> (x,y+h) -> (x+w,y+h) -> (x+w,y) -> close.
        let c = self.corners();
        Contour::Standard(crate::contour::standard::StandardContour::from_ops(vec![
            CurveOp::mv(c[0]),
            CurveOp::line(c[0], c[3]),
            CurveOp::line(c[3], c[2]),
            CurveOp::line(c[2], c[1]),
            CurveOp::close(c[1], c[0]),
        ]))
    }

    fn init_measure(&self, _tolerance: f32) -> (MeasureHandle, f32) {
        (MeasureHandle::None, self.perimeter())
    }

    fn point(&self, _handle: &MeasureHandle, distance: f32, direction: Direction) -> (Vector2F, Vector2F) {
        let perimeter = self.perimeter();
        if perimeter <= 0.0 {
            return (self.origin, Vector2F::zero());
        }
        let distance = distance.max(0.0).min(perimeter);
        let edges = self.edges();
        let (index, local, cumulative) = self.locate(distance);

        let at_seam = (distance - cumulative).abs() <= crate::util::EPSILON;
        if direction == Direction::Start && at_seam {
            let prev = if index == 0 { edges.len() - 1 } else { index - 1 };
            let edge = &edges[prev];
            return (edge.to(), edge.vector().normalize());
        }

        let edge = &edges[index];
        (edge.sample(local), edge.vector().normalize())
    }

    fn curvature(&self, _handle: &MeasureHandle, _distance: f32) -> (f32, Option<Vector2F>) {
        (0.0, None)
    }

    fn closest_point(
        &self,
        _handle: &MeasureHandle,
        _tolerance: f32,
        query: Vector2F,
        threshold: f32,
    ) -> Option<ClosestPoint> {
        let edges = self.edges();
        let mut cumulative = 0.0;
        let mut best: Option<ClosestPoint> = None;
        for edge in &edges {
            let t = edge.clamped_project(query);
            let position = edge.sample(t);
            let distance = position.distance_to(query);
            if distance <= threshold && best.map_or(true, |b: ClosestPoint| distance < b.distance) {
                best = Some(ClosestPoint {
                    distance,
                    position,
                    offset: cumulative + t * edge.length(),
                    tangent: edge.vector().normalize(),
                });
            }
            cumulative += edge.length();
        }
        best
    }

    fn add_segment(
        &self,
        _handle: &MeasureHandle,
        builder: &mut dyn PathBuilder,
        emit_move: bool,
        start: f32,
        end: f32,
    ) {
        let perimeter = self.perimeter();
        if perimeter <= 0.0 {
            if emit_move {
                builder.move_to(self.origin);
            }
            return;
        }
        let start = start.max(0.0).min(perimeter);
        let end = end.max(start).min(perimeter);
        if (end - start).abs() <= crate::util::EPSILON {
            if emit_move {
                let (pos, _) = self.point(_handle, start, Direction::End);
                builder.move_to(pos);
            }
            return;
        }

        if start <= crate::util::EPSILON && end >= perimeter - crate::util::EPSILON {
            if emit_move {
                builder.move_to(self.origin);
            }
            let c = self.corners();
            builder.line_to(c[1]);
            builder.line_to(c[2]);
            builder.line_to(c[3]);
            builder.close();
            return;
        }

        let edges = self.edges();
        let (si, _, s_cum) = self.locate(start);
        let (ei, _, e_cum) = self.locate(end);
        let mut first = true;
        for index in si..=ei {
            let edge = &edges[index];
            let len = edge.length();
            let lo = if index == si { start - s_cum } else { 0.0 };
            let hi = if index == ei { end - e_cum } else { len };
            let u0 = if len > 0.0 { lo / len } else { 0.0 };
            let u1 = if len > 0.0 { hi / len } else { 0.0 };
            let p0 = edge.sample(u0);
            let p1 = edge.sample(u1);
            if first {
                if emit_move {
                    builder.move_to(p0);
                }
                first = false;
            }
            builder.line_to(p1);
        }
    }

    fn winding(&self, _handle: &MeasureHandle, query: Vector2F) -> i32 {
        let c = self.corners();
        let mut winding = 0;
        for i in 0..4 {
            let a = c[i];
            let b = c[(i + 1) % 4];
            winding += super::crossing(query, a, b);
        }
        winding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::vec2f;

    #[test]
    fn unit_square_perimeter_and_bounds() {
        let rect = RectContour::new(vec2f(0.0, 0.0), vec2f(1.0, 1.0));
        let (handle, length) = rect.init_measure(0.01);
        assert_eq!(length, 4.0);
        let bounds = rect.bounds().unwrap();
        assert_eq!(bounds.size(), vec2f(1.0, 1.0));
        let (p, _) = rect.point(&handle, 0.5, Direction::End);
        assert_eq!(p, vec2f(0.5, 0.0));
    }

    #[test]
    fn winding_sign_flips_with_negative_size() {
        let rect = RectContour::new(vec2f(0.0, 0.0), vec2f(10.0, 10.0));
        let (handle, _) = rect.init_measure(0.01);
        let inside = vec2f(5.0, 5.0);
        let w1 = rect.winding(&handle, inside);

        let flipped = RectContour::new(vec2f(10.0, 0.0), vec2f(-10.0, 10.0));
        let (handle2, _) = flipped.init_measure(0.01);
        let w2 = flipped.winding(&handle2, inside);
        assert_eq!(w1, -w2);
    }
}
