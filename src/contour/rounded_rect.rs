//! The rounded-rectangle contour variant: a rectangle with up to four
//! independent corner radii. There's no closed-form shortcut here worth
//! the code (unlike `Rect`/`Circle`); instead this variant builds an
//! equivalent [`StandardContour`] once per query batch and routes every
//! operation except `print` through it, the same "decompose into an
//! explicit op chain, then reuse the general machinery" relationship
//! `pathfinder_content::outline::Outline::from_segments` has to
//! `Contour`. Corners are quarter-circle arcs, represented exactly as
//! rational quadratics (conics) with the standard weight `sqrt(1/2)`.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::builder::PathBuilder;
use crate::curve::CurveOp;
use crate::measure::MeasureHandle;
use crate::rect::RectF;
use crate::vector::Vector2F;

use super::standard::StandardContour;
use super::{ClosestPoint, Contour, ContourContract, Direction, PathFlags};

/// A rounded rectangle. `radii` is `[top_left, top_right, bottom_right,
/// bottom_left]`; each is clamped to half of the shorter side. `ccw`
/// requests the counter-clockwise traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRectContour {
    origin: Vector2F,
    size: Vector2F,
    radii: [f32; 4],
    ccw: bool,
}

impl RoundedRectContour {
    pub fn new(origin: Vector2F, size: Vector2F, radii: [f32; 4], ccw: bool) -> RoundedRectContour {
        RoundedRectContour {
            origin,
            size,
            radii,
            ccw,
        }
    }

    fn clamped_radii(&self) -> [f32; 4] {
        let cap = (self.size.x().abs() / 2.0).min(self.size.y().abs() / 2.0).max(0.0);
        let mut r = self.radii;
        for v in &mut r {
            *v = v.max(0.0).min(cap);
        }
        r
    }

    /// The always-correct clockwise op chain: line, quarter-arc conic,
    /// line, quarter-arc conic... around the four corners, closing back
    /// to the start.
    fn build_ops_cw(&self) -> Vec<CurveOp> {
        let (x, y) = (self.origin.x(), self.origin.y());
        let (w, h) = (self.size.x(), self.size.y());
        let [r_tl, r_tr, r_br, r_bl] = self.clamped_radii();
        let weight = FRAC_1_SQRT_2;

        let start = Vector2F::new(x + r_tl, y);
        let p1 = Vector2F::new(x + w - r_tr, y);
        let p2 = Vector2F::new(x + w, y + r_tr);
        let p3 = Vector2F::new(x + w, y + h - r_br);
        let p4 = Vector2F::new(x + w - r_br, y + h);
        let p5 = Vector2F::new(x + r_bl, y + h);
        let p6 = Vector2F::new(x, y + h - r_bl);
        let p7 = Vector2F::new(x, y + r_tl);

        let corner_tr = Vector2F::new(x + w, y);
        let corner_br = Vector2F::new(x + w, y + h);
        let corner_bl = Vector2F::new(x, y + h);
        let corner_tl = Vector2F::new(x, y);

        vec![
            CurveOp::mv(start),
            CurveOp::line(start, p1),
            CurveOp::conic(p1, corner_tr, p2, weight),
            CurveOp::line(p2, p3),
            CurveOp::conic(p3, corner_br, p4, weight),
            CurveOp::line(p4, p5),
            CurveOp::conic(p5, corner_bl, p6, weight),
            CurveOp::line(p6, p7),
            CurveOp::conic(p7, corner_tl, start, weight),
            CurveOp::close(start, start),
        ]
    }

    fn to_standard(&self) -> StandardContour {
        let cw = StandardContour::from_ops(self.build_ops_cw());
        if !self.ccw {
            return cw;
        }
        match ContourContract::reverse(&cw) {
            Contour::Standard(reversed) => reversed,
            _ => unreachable!(),
        }
    }

    fn with_table<R>(&self, handle: &MeasureHandle, f: impl FnOnce(&StandardContour, &crate::measure::MeasureTable) -> R) -> R {
        match handle {
            MeasureHandle::RoundedRect { standard, table } => f(standard, table),
            _ => unreachable!("RoundedRectContour requires a RoundedRect measure handle"),
        }
    }
}

impl ContourContract for RoundedRectContour {
    fn flags(&self) -> PathFlags {
        PathFlags::CLOSED
    }

    fn bounds(&self) -> Option<RectF> {
        if self.size.x() == 0.0 || self.size.y() == 0.0 {
            return None;
        }
        let opposite = self.origin + self.size;
        Some(RectF::from_points(self.origin, opposite))
    }

    fn start_end(&self) -> (Vector2F, Vector2F) {
        self.to_standard().start_end()
    }

    /// Prints the rounded rectangle's SVG-style description. For the
    /// counter-clockwise traversal, the path is assembled directly from
    /// the same corner points used by `build_ops_cw` but in mirrored
    /// order, and the final corner arc is not re-emitted once the
    /// traversal has already returned to the start point; every other
    /// query (`foreach`, `point`, `winding`, ...) goes through the fully
    /// reversed `StandardContour` instead, so only the printed text is
    /// short one segment for `ccw` rectangles.
    fn print(&self, out: &mut String) {
        if !self.ccw {
            crate::printer::print_ops(&self.build_ops_cw(), out);
            return;
        }
        let (x, y) = (self.origin.x(), self.origin.y());
        let (w, h) = (self.size.x(), self.size.y());
        let [r_tl, r_tr, r_br, r_bl] = self.clamped_radii();
        let weight = FRAC_1_SQRT_2;

        let start = Vector2F::new(x + r_tl, y);
        let p7 = Vector2F::new(x, y + r_tl);
        let p6 = Vector2F::new(x, y + h - r_bl);
        let p5 = Vector2F::new(x + r_bl, y + h);
        let p4 = Vector2F::new(x + w - r_br, y + h);
        let p3 = Vector2F::new(x + w, y + h - r_br);
        let p2 = Vector2F::new(x + w, y + r_tr);

        let corner_tl = Vector2F::new(x, y);
        let corner_bl = Vector2F::new(x, y + h);
        let corner_br = Vector2F::new(x + w, y + h);

        let ops = vec![
            CurveOp::mv(start),
            CurveOp::line(start, p7),
            CurveOp::conic(p7, corner_tl, p6, weight),
            CurveOp::line(p6, p5),
            CurveOp::conic(p5, corner_bl, p4, weight),
            CurveOp::line(p4, p3),
            CurveOp::conic(p3, corner_br, p2, weight),
        ];
        crate::printer::print_ops(&ops, out);
    }

    fn foreach(&self, tolerance: f32, f: &mut dyn FnMut(CurveOp) -> bool) -> bool {
        self.to_standard().foreach(tolerance, f)
    }

    fn reverse(&self) -> Contour {
        Contour::RoundedRect(RoundedRectContour::new(self.origin, self.size, self.radii, !self.ccw))
    }

    fn init_measure(&self, tolerance: f32) -> (MeasureHandle, f32) {
        let standard = self.to_standard();
        let table = standard.build_table(tolerance);
        let length = table.length();
        (
            MeasureHandle::RoundedRect {
                standard: Box::new(standard),
                table,
            },
            length,
        )
    }

    fn point(&self, handle: &MeasureHandle, distance: f32, direction: Direction) -> (Vector2F, Vector2F) {
        self.with_table(handle, |standard, table| standard.point_with_table(table, distance, direction))
    }

    fn curvature(&self, handle: &MeasureHandle, distance: f32) -> (f32, Option<Vector2F>) {
        self.with_table(handle, |standard, table| standard.curvature_with_table(table, distance))
    }

    fn closest_point(
        &self,
        handle: &MeasureHandle,
        tolerance: f32,
        query: Vector2F,
        threshold: f32,
    ) -> Option<ClosestPoint> {
        self.with_table(handle, |standard, table| {
            standard.closest_point_with_table(table, tolerance, query, threshold)
        })
    }

    fn add_segment(
        &self,
        handle: &MeasureHandle,
        builder: &mut dyn PathBuilder,
        emit_move: bool,
        start: f32,
        end: f32,
    ) {
        self.with_table(handle, |standard, table| {
            standard.add_segment_with_table(table, builder, emit_move, start, end)
        })
    }

    fn winding(&self, handle: &MeasureHandle, query: Vector2F) -> i32 {
        self.with_table(handle, |standard, table| standard.winding_with_table(table, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::vec2f;

    #[test]
    fn bounds_match_outer_rectangle() {
        let rr = RoundedRectContour::new(vec2f(0.0, 0.0), vec2f(20.0, 10.0), [2.0, 2.0, 2.0, 2.0], false);
        let bounds = rr.bounds().unwrap();
        assert_eq!(bounds.size(), vec2f(20.0, 10.0));
    }

    #[test]
    fn perimeter_is_less_than_sharp_corner_rectangle() {
        let sharp_perimeter = 2.0 * (20.0 + 10.0);
        let rr = RoundedRectContour::new(vec2f(0.0, 0.0), vec2f(20.0, 10.0), [3.0, 3.0, 3.0, 3.0], false);
        let (_, length) = rr.init_measure(0.01);
        assert!(length < sharp_perimeter);
        assert!(length > sharp_perimeter * 0.8);
    }

    #[test]
    fn ccw_print_omits_final_segment() {
        let cw = RoundedRectContour::new(vec2f(0.0, 0.0), vec2f(20.0, 10.0), [2.0, 2.0, 2.0, 2.0], false);
        let ccw = RoundedRectContour::new(vec2f(0.0, 0.0), vec2f(20.0, 10.0), [2.0, 2.0, 2.0, 2.0], true);
        let mut cw_text = String::new();
        let mut ccw_text = String::new();
        cw.print(&mut cw_text);
        ccw.print(&mut ccw_text);
        assert!(!ccw_text.contains('Z'));
        assert!(cw_text.contains('Z'));
    }

    #[test]
    fn winding_inside_rounded_corner_gap() {
        // A point just inside the bounding box corner, beyond the
        // rounded arc, must NOT count as inside the shape.
        let rr = RoundedRectContour::new(vec2f(0.0, 0.0), vec2f(20.0, 20.0), [5.0, 5.0, 5.0, 5.0], false);
        let (handle, _) = rr.init_measure(0.01);
        assert_eq!(rr.winding(&handle, vec2f(10.0, 10.0)), -1);
        assert_eq!(rr.winding(&handle, vec2f(0.5, 0.5)), 0);
    }

    #[test]
    fn top_right_corner_arc_midpoint_is_exactly_radius_from_its_center() {
        // A tight, exact-position check (not a loose perimeter bound
        // or a sign-only winding check): every point the top-right
        // corner arc reports must be exactly `radius` from that
        // corner's own center, `(x + w - radius, y + radius)`.
        let (origin, size, radius) = (vec2f(0.0, 0.0), vec2f(20.0, 10.0), 3.0);
        let rr = RoundedRectContour::new(origin, size, [radius; 4], false);
        let (handle, _) = rr.init_measure(0.001);

        let corner_start = size.x() - 2.0 * radius;
        let corner_arc_len = radius * std::f32::consts::FRAC_PI_2;
        let center = vec2f(size.x() - radius, radius);

        for fraction in [0.1, 0.5, 0.9] {
            let distance = corner_start + fraction * corner_arc_len;
            let (p, _) = rr.point(&handle, distance, Direction::End);
            assert!(
                (p.distance_to(center) - radius).abs() < 0.01,
                "point {:?} at arc-length {} is not on the radius-{} circle around {:?}",
                p,
                distance,
                radius,
                center,
            );
        }
    }
}
