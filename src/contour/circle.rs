//! The circular-arc contour variant: a closed-form circle or arc with
//! O(1) length/point/tangent/curvature, no measure table needed. There's
//! no curve primitive here simpler than a cubic Bézier, so this module's
//! math is grounded in general circular-arc theory rather than a
//! specific source file: arc-length parameterization is just
//! `angle = start + sweep * (distance / length)`, and `foreach`
//! decomposes the arc into cubic Béziers using the standard
//! "magic number" approximation (a quarter-circle cubic has control
//! points offset by `4/3 * tan(quarter_sweep / 4)` times the radius
//! along the tangent).

use std::f32::consts::PI;

use crate::builder::PathBuilder;
use crate::curve::CurveOp;
use crate::measure::MeasureHandle;
use crate::rect::RectF;
use crate::vector::Vector2F;

use super::{ClosestPoint, Contour, ContourContract, Direction, PathFlags};

const TWO_PI: f32 = 2.0 * PI;
const EPS: f32 = 1e-4;

/// A circular arc from `start_angle` to `start_angle + sweep` (radians,
/// positive sweep is counter-clockwise in a y-down plane, matching
/// increasing angle rotating through `perp()`). A `sweep` whose
/// magnitude is at least a full turn is a closed circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleContour {
    center: Vector2F,
    radius: f32,
    start_angle: f32,
    sweep: f32,
}

impl CircleContour {
    #[inline]
    pub fn new(center: Vector2F, radius: f32, start_angle: f32, sweep: f32) -> CircleContour {
        CircleContour {
            center,
            radius: radius.max(0.0),
            start_angle,
            sweep,
        }
    }

    #[inline]
    pub fn full_circle(center: Vector2F, radius: f32) -> CircleContour {
        CircleContour::new(center, radius, 0.0, TWO_PI)
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.sweep.abs() >= TWO_PI - EPS
    }

    #[inline]
    fn point_at_angle(&self, angle: f32) -> Vector2F {
        self.center + Vector2F::new(angle.cos(), angle.sin()).scale(self.radius)
    }

    #[inline]
    fn tangent_at_angle(&self, angle: f32) -> Vector2F {
        let radial = Vector2F::new(angle.cos(), angle.sin());
        let dir = radial.perp();
        if self.sweep >= 0.0 {
            dir
        } else {
            -dir
        }
    }

    /// How far along the sweep direction (in `[0, sweep.abs()]`, or
    /// `None` if outside the arc's span) `angle` falls.
    fn progress_of_angle(&self, angle: f32) -> f32 {
        if self.is_full() {
            return (angle - self.start_angle).rem_euclid(TWO_PI);
        }
        let ccw = (angle - self.start_angle).rem_euclid(TWO_PI);
        if self.sweep >= 0.0 {
            ccw
        } else {
            (TWO_PI - ccw).rem_euclid(TWO_PI)
        }
    }

    fn contains_angle(&self, angle: f32) -> bool {
        if self.is_full() {
            return true;
        }
        self.progress_of_angle(angle) <= self.sweep.abs() + EPS
    }

    fn length(&self) -> f32 {
        self.radius * self.sweep.abs()
    }
}

/// Appends a single cubic Bézier approximating the arc `[a0, a0 + delta]`
/// (`delta.abs() <= PI/2`).
fn cubic_arc_segment(center: Vector2F, radius: f32, a0: f32, delta: f32) -> CurveOp {
    let a1 = a0 + delta;
    let t = (delta / 4.0).tan();
    let alpha = delta.sin() * ((4.0 + 3.0 * t * t).sqrt() - 1.0) / 3.0;

    let p0 = center + Vector2F::new(a0.cos(), a0.sin()).scale(radius);
    let p3 = center + Vector2F::new(a1.cos(), a1.sin()).scale(radius);
    let tan0 = Vector2F::new(-a0.sin(), a0.cos());
    let tan1 = Vector2F::new(-a1.sin(), a1.cos());
    let p1 = p0 + tan0.scale(alpha * radius);
    let p2 = p3 - tan1.scale(alpha * radius);
    CurveOp::cubic(p0, p1, p2, p3)
}

/// Emits the arc `[a0, a0 + delta]` as a chain of cubics, each spanning
/// at most a quarter turn.
fn emit_arc(builder: &mut dyn PathBuilder, center: Vector2F, radius: f32, a0: f32, delta: f32, emit_move: bool) {
    if radius <= 0.0 || delta == 0.0 {
        if emit_move {
            builder.move_to(center);
        }
        return;
    }
    const MAX_STEP: f32 = PI / 2.0;
    let steps = (delta.abs() / MAX_STEP).ceil().max(1.0) as u32;
    let step = delta / steps as f32;
    if emit_move {
        let start = center + Vector2F::new(a0.cos(), a0.sin()).scale(radius);
        builder.move_to(start);
    }
    for i in 0..steps {
        let segment = cubic_arc_segment(center, radius, a0 + step * i as f32, step);
        builder.cubic_to(segment.points()[1], segment.points()[2], segment.end());
    }
}

impl ContourContract for CircleContour {
    fn flags(&self) -> PathFlags {
        if self.is_full() {
            PathFlags::CLOSED
        } else {
            PathFlags::empty()
        }
    }

    fn bounds(&self) -> Option<RectF> {
        if self.radius <= 0.0 {
            return None;
        }
        let mut points = vec![
            self.point_at_angle(self.start_angle),
            self.point_at_angle(self.start_angle + self.sweep),
        ];
        for axis_angle in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0] {
            if self.contains_angle(axis_angle) {
                points.push(self.point_at_angle(axis_angle));
            }
        }
        let mut acc = RectF::default();
        for (index, point) in points.iter().enumerate() {
            crate::rect::union_rect(&mut acc, *point, index == 0);
        }
        if acc.size().x() > 0.0 && acc.size().y() > 0.0 {
            Some(acc)
        } else {
            None
        }
    }

    fn start_end(&self) -> (Vector2F, Vector2F) {
        (
            self.point_at_angle(self.start_angle),
            self.point_at_angle(self.start_angle + self.sweep),
        )
    }

    fn print(&self, out: &mut String) {
        let start = self.point_at_angle(self.start_angle);
        let end = self.point_at_angle(self.start_angle + self.sweep);
        crate::printer::print_arc(
            (start.x(), start.y()),
            self.radius,
            self.radius,
            self.sweep >= 0.0,
            (end.x(), end.y()),
            out,
        );
    }

    fn foreach(&self, _tolerance: f32, f: &mut dyn FnMut(CurveOp) -> bool) -> bool {
        if self.radius <= 0.0 || self.sweep == 0.0 {
            return f(CurveOp::mv(self.center));
        }
        const MAX_STEP: f32 = PI / 2.0;
        let steps = (self.sweep.abs() / MAX_STEP).ceil().max(1.0) as u32;
        let step = self.sweep / steps as f32;
        if !f(CurveOp::mv(self.point_at_angle(self.start_angle))) {
            return false;
        }
        for i in 0..steps {
            let segment = cubic_arc_segment(self.center, self.radius, self.start_angle + step * i as f32, step);
            if !f(segment) {
                return false;
            }
        }
        if self.is_full() {
            let start = self.point_at_angle(self.start_angle);
            let end = self.point_at_angle(self.start_angle + self.sweep);
            return f(CurveOp::close(end, start));
        }
        true
    }

    fn reverse(&self) -> Contour {
        Contour::Circle(CircleContour::new(
            self.center,
            self.radius,
            self.start_angle + self.sweep,
            -self.sweep,
        ))
    }

    fn init_measure(&self, _tolerance: f32) -> (MeasureHandle, f32) {
        (MeasureHandle::None, self.length())
    }

    fn point(&self, _handle: &MeasureHandle, distance: f32, direction: Direction) -> (Vector2F, Vector2F) {
        let length = self.length();
        if length <= 0.0 || self.radius <= 0.0 {
            return (self.center, Vector2F::zero());
        }
        let distance = distance.max(0.0).min(length);
        let mut progress = distance / length;
        if direction == Direction::Start && distance <= EPS && self.is_full() {
            progress = 1.0;
        }
        let angle = self.start_angle + self.sweep * progress;
        (self.point_at_angle(angle), self.tangent_at_angle(angle))
    }

    fn curvature(&self, _handle: &MeasureHandle, _distance: f32) -> (f32, Option<Vector2F>) {
        if self.radius <= 0.0 {
            return (0.0, None);
        }
        let kappa = self.sweep.signum() / self.radius;
        (kappa, Some(self.center))
    }

    fn closest_point(
        &self,
        _handle: &MeasureHandle,
        _tolerance: f32,
        query: Vector2F,
        threshold: f32,
    ) -> Option<ClosestPoint> {
        if self.radius <= 0.0 {
            return None;
        }
        let to_query = query - self.center;
        let d = to_query.length();

        let candidate_angle = if d <= EPS {
            self.start_angle
        } else {
            to_query.y().atan2(to_query.x())
        };

        let (angle, offset) = if self.contains_angle(candidate_angle) {
            (candidate_angle, self.radius * self.progress_of_angle(candidate_angle))
        } else {
            let start_d = query.distance_to(self.point_at_angle(self.start_angle));
            let end_d = query.distance_to(self.point_at_angle(self.start_angle + self.sweep));
            if start_d <= end_d {
                (self.start_angle, 0.0)
            } else {
                (self.start_angle + self.sweep, self.length())
            }
        };

        let position = self.point_at_angle(angle);
        let distance = position.distance_to(query);
        if distance <= threshold {
            Some(ClosestPoint {
                distance,
                position,
                offset,
                tangent: self.tangent_at_angle(angle),
            })
        } else {
            None
        }
    }

    fn add_segment(
        &self,
        _handle: &MeasureHandle,
        builder: &mut dyn PathBuilder,
        emit_move: bool,
        start: f32,
        end: f32,
    ) {
        let length = self.length();
        if length <= 0.0 || self.radius <= 0.0 {
            if emit_move {
                builder.move_to(self.center);
            }
            return;
        }
        let start = start.max(0.0).min(length);
        let end = end.max(start).min(length);
        let a0 = self.start_angle + self.sweep * (start / length);
        let a1 = self.start_angle + self.sweep * (end / length);
        emit_arc(builder, self.center, self.radius, a0, a1 - a0, emit_move);
    }

    fn winding(&self, _handle: &MeasureHandle, query: Vector2F) -> i32 {
        if self.radius <= 0.0 {
            return 0;
        }
        let inside_disk = query.distance_to(self.center) < self.radius;
        if !inside_disk {
            return 0;
        }
        let sign = if self.sweep >= 0.0 { -1 } else { 1 };
        if self.is_full() {
            return sign;
        }

        let start_point = self.point_at_angle(self.start_angle);
        let end_point = self.point_at_angle(self.start_angle + self.sweep);
        let mid_angle = self.start_angle + self.sweep * 0.5;
        let mid_point = self.point_at_angle(mid_angle);

        let chord = end_point - start_point;
        let chord_side = chord.det(query - start_point);
        let arc_side = chord.det(mid_point - start_point);

        if chord_side.signum() == arc_side.signum() {
            sign
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::vec2f;

    #[test]
    fn full_circle_length_and_point() {
        let circle = CircleContour::full_circle(vec2f(0.0, 0.0), 2.0);
        let (handle, length) = circle.init_measure(0.01);
        assert!((length - TWO_PI * 2.0).abs() < 0.01);
        let (p, _) = circle.point(&handle, 0.0, Direction::End);
        assert!(p.approx_eq(vec2f(2.0, 0.0), 0.01));
    }

    #[test]
    fn quarter_arc_endpoints() {
        let arc = CircleContour::new(vec2f(0.0, 0.0), 1.0, 0.0, PI / 2.0);
        let (start, end) = arc.start_end();
        assert!(start.approx_eq(vec2f(1.0, 0.0), 0.001));
        assert!(end.approx_eq(vec2f(0.0, 1.0), 0.001));
    }

    #[test]
    fn winding_inside_full_circle() {
        let circle = CircleContour::full_circle(vec2f(0.0, 0.0), 5.0);
        let (handle, _) = circle.init_measure(0.01);
        assert_eq!(circle.winding(&handle, vec2f(0.0, 0.0)), -1);
        assert_eq!(circle.winding(&handle, vec2f(10.0, 10.0)), 0);
    }

    #[test]
    fn reverse_flips_sweep_sign() {
        let arc = CircleContour::new(vec2f(0.0, 0.0), 1.0, 0.0, PI);
        let reversed = arc.reverse();
        if let Contour::Circle(c) = reversed {
            assert!(c.sweep < 0.0);
        } else {
            panic!("expected a circle contour");
        }
    }
}
