//! Property tests over the contour variants' shared invariants:
//! length/bounds consistency, `point`/`closest_point` agreement,
//! `reverse` as an involution on winding sign, and `add_segment`
//! round-tripping the contour's own length.

use pathcontour::{
    vec2f, CircleContour, Contour, ContourContract, CurveOp, Direction, RectContour,
    RoundedRectContour, StandardContour,
};
use quickcheck::quickcheck;
use std::f32::consts::FRAC_1_SQRT_2;

/// Maps an arbitrary `f32` into a bounded, finite, non-degenerate range.
fn bounded(raw: f32, min: f32, max: f32) -> f32 {
    let raw = if raw.is_finite() { raw } else { 0.0 };
    let span = (max - min).max(1.0);
    min + raw.rem_euclid(span)
}

quickcheck! {
    fn rect_length_matches_perimeter(w: f32, h: f32) -> bool {
        let w = bounded(w, 1.0, 500.0);
        let h = bounded(h, 1.0, 500.0);
        let rect = RectContour::new(vec2f(0.0, 0.0), vec2f(w, h));
        let (_, length) = rect.init_measure(0.01);
        (length - 2.0 * (w + h)).abs() < 0.01
    }

    fn rect_point_at_zero_is_origin(w: f32, h: f32) -> bool {
        let w = bounded(w, 1.0, 500.0);
        let h = bounded(h, 1.0, 500.0);
        let origin = vec2f(3.0, 7.0);
        let rect = RectContour::new(origin, vec2f(w, h));
        let (handle, _) = rect.init_measure(0.01);
        let (p, _) = rect.point(&handle, 0.0, Direction::End);
        p.approx_eq(origin, 0.01)
    }

    fn rect_closest_point_of_a_point_on_the_boundary_is_itself(w: f32, h: f32, t: f32) -> bool {
        let w = bounded(w, 1.0, 500.0);
        let h = bounded(h, 1.0, 500.0);
        let t = bounded(t, 0.0, 1.0);
        let rect = RectContour::new(vec2f(0.0, 0.0), vec2f(w, h));
        let (handle, length) = rect.init_measure(0.01);
        let (on_boundary, _) = rect.point(&handle, t * length, Direction::End);
        match rect.closest_point(&handle, 0.01, on_boundary, 1.0) {
            Some(cp) => cp.distance < 0.5,
            None => false,
        }
    }

    fn rect_reverse_flips_winding_sign(w: f32, h: f32) -> bool {
        let w = bounded(w, 2.0, 500.0);
        let h = bounded(h, 2.0, 500.0);
        let rect = RectContour::new(vec2f(0.0, 0.0), vec2f(w, h));
        let reversed = ContourContract::reverse(&rect);
        let inside = vec2f(w / 2.0, h / 2.0);
        let (fwd_handle, _) = rect.init_measure(0.01);
        let (rev_handle, _) = reversed.init_measure(0.01);
        rect.winding(&fwd_handle, inside) == -reversed.winding(&rev_handle, inside)
    }

    fn rect_winding_is_zero_far_outside_bounds(w: f32, h: f32) -> bool {
        let w = bounded(w, 1.0, 500.0);
        let h = bounded(h, 1.0, 500.0);
        let rect = RectContour::new(vec2f(0.0, 0.0), vec2f(w, h));
        let (handle, _) = rect.init_measure(0.01);
        let far = vec2f(w + 1000.0, h + 1000.0);
        rect.winding(&handle, far) == 0
    }

    fn rect_add_segment_full_range_matches_length(w: f32, h: f32) -> bool {
        let w = bounded(w, 1.0, 500.0);
        let h = bounded(h, 1.0, 500.0);
        let rect = RectContour::new(vec2f(0.0, 0.0), vec2f(w, h));
        let (handle, length) = rect.init_measure(0.01);
        let mut builder = pathcontour::builder::PathBuilderImpl::new();
        rect.add_segment(&handle, &mut builder, true, 0.0, length);
        let path = builder.free_to_path();
        path.contours().len() == 1
    }

    fn circle_length_matches_radius_times_sweep(radius: f32, sweep: f32) -> bool {
        let radius = bounded(radius, 1.0, 100.0);
        let sweep = bounded(sweep, 0.1, std::f32::consts::PI * 2.0);
        let circle = CircleContour::new(vec2f(0.0, 0.0), radius, 0.0, sweep);
        let (_, length) = circle.init_measure(0.01);
        (length - radius * sweep).abs() < 0.01
    }

    fn circle_closest_point_of_a_point_on_the_arc_is_itself(radius: f32, sweep: f32, t: f32) -> bool {
        let radius = bounded(radius, 1.0, 100.0);
        let sweep = bounded(sweep, 0.1, std::f32::consts::PI * 2.0 - 0.01);
        let t = bounded(t, 0.0, 1.0);
        let circle = CircleContour::new(vec2f(0.0, 0.0), radius, 0.0, sweep);
        let (handle, length) = circle.init_measure(0.01);
        let (on_arc, _) = circle.point(&handle, t * length, Direction::End);
        match circle.closest_point(&handle, 0.01, on_arc, 1.0) {
            Some(cp) => cp.distance < 0.5,
            None => false,
        }
    }

    fn circle_reverse_is_an_involution_on_geometry(radius: f32, sweep: f32) -> bool {
        let radius = bounded(radius, 1.0, 100.0);
        let sweep = bounded(sweep, 0.1, std::f32::consts::PI * 2.0 - 0.01);
        let circle = CircleContour::new(vec2f(0.0, 0.0), radius, 0.3, sweep);
        let reversed = match ContourContract::reverse(&circle) {
            Contour::Circle(r) => r,
            _ => unreachable!(),
        };
        let twice_reversed = ContourContract::reverse(&reversed);
        let (start, end) = circle.start_end();
        let (start2, end2) = twice_reversed.start_end();
        start.approx_eq(start2, 0.01) && end.approx_eq(end2, 0.01)
    }

    fn standard_triangle_length_matches_literal_perimeter(base: f32, height: f32) -> bool {
        let base = bounded(base, 1.0, 500.0);
        let height = bounded(height, 1.0, 500.0);
        let triangle = StandardContour::from_ops(vec![
            CurveOp::mv(vec2f(0.0, 0.0)),
            CurveOp::line(vec2f(0.0, 0.0), vec2f(base, 0.0)),
            CurveOp::line(vec2f(base, 0.0), vec2f(0.0, height)),
            CurveOp::close(vec2f(0.0, height), vec2f(0.0, 0.0)),
        ]);
        let hypotenuse = (base * base + height * height).sqrt();
        let (_, length) = triangle.init_measure(0.01);
        (length - (base + height + hypotenuse)).abs() < 0.05
    }

    fn standard_point_at_zero_is_the_first_move_point(base: f32, height: f32) -> bool {
        let base = bounded(base, 1.0, 500.0);
        let height = bounded(height, 1.0, 500.0);
        let start = vec2f(2.0, 5.0);
        let triangle = StandardContour::from_ops(vec![
            CurveOp::mv(start),
            CurveOp::line(start, start + vec2f(base, 0.0)),
            CurveOp::line(start + vec2f(base, 0.0), start + vec2f(0.0, height)),
            CurveOp::close(start + vec2f(0.0, height), start),
        ]);
        let (handle, _) = triangle.init_measure(0.01);
        let (p, _) = triangle.point(&handle, 0.0, Direction::End);
        p.approx_eq(start, 0.01)
    }

    fn standard_reverse_flips_winding_sign(base: f32, height: f32) -> bool {
        let base = bounded(base, 4.0, 500.0);
        let height = bounded(height, 4.0, 500.0);
        let triangle = StandardContour::from_ops(vec![
            CurveOp::mv(vec2f(0.0, 0.0)),
            CurveOp::line(vec2f(0.0, 0.0), vec2f(base, 0.0)),
            CurveOp::line(vec2f(base, 0.0), vec2f(0.0, height)),
            CurveOp::close(vec2f(0.0, height), vec2f(0.0, 0.0)),
        ]);
        let reversed = match ContourContract::reverse(&triangle) {
            Contour::Standard(r) => r,
            _ => unreachable!(),
        };
        let inside = vec2f(base / 4.0, height / 4.0);
        let (fwd_handle, _) = triangle.init_measure(0.01);
        let (rev_handle, _) = reversed.init_measure(0.01);
        triangle.winding(&fwd_handle, inside) == -reversed.winding(&rev_handle, inside)
    }

    fn standard_conic_add_segment_endpoints_stay_on_the_circle(t0: f32, t1: f32) -> bool {
        let t0 = bounded(t0, 0.0, 1.0);
        let t1 = bounded(t1, 0.0, 1.0);
        let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        if t1 - t0 < 0.01 {
            return true;
        }
        let arc = StandardContour::from_ops(vec![
            CurveOp::mv(vec2f(1.0, 0.0)),
            CurveOp::conic(vec2f(1.0, 0.0), vec2f(1.0, 1.0), vec2f(0.0, 1.0), FRAC_1_SQRT_2),
        ]);
        let (handle, length) = arc.init_measure(0.001);

        let mut builder = pathcontour::builder::PathBuilderImpl::new();
        arc.add_segment(&handle, &mut builder, true, t0 * length, t1 * length);
        let path = builder.free_to_path();
        let segment = &path.contours()[0];
        let (start, end) = segment.start_end();
        let center = vec2f(0.0, 0.0);
        (start.distance_to(center) - 1.0).abs() < 0.01 && (end.distance_to(center) - 1.0).abs() < 0.01
    }

    fn rounded_rect_perimeter_is_between_inscribed_circle_and_sharp_rectangle(w: f32, h: f32, r: f32) -> bool {
        let w = bounded(w, 4.0, 500.0);
        let h = bounded(h, 4.0, 500.0);
        let r = bounded(r, 0.0, w.min(h) / 2.0);
        let rr = RoundedRectContour::new(vec2f(0.0, 0.0), vec2f(w, h), [r; 4], false);
        let (_, length) = rr.init_measure(0.01);
        let sharp_perimeter = 2.0 * (w + h);
        length <= sharp_perimeter + 0.01 && length > sharp_perimeter * 0.5
    }

    fn rounded_rect_corner_arc_point_is_exactly_radius_from_corner_center(w: f32, h: f32, r: f32, t: f32) -> bool {
        let w = bounded(w, 4.0, 500.0);
        let h = bounded(h, 4.0, 500.0);
        let r = bounded(r, 0.5, w.min(h) / 2.0);
        let t = bounded(t, 0.0, 1.0);
        let rr = RoundedRectContour::new(vec2f(0.0, 0.0), vec2f(w, h), [r; 4], false);
        let (handle, _) = rr.init_measure(0.001);

        let corner_start = w - 2.0 * r;
        let corner_arc_len = r * std::f32::consts::FRAC_PI_2;
        let center = vec2f(w - r, r);

        let (p, _) = rr.point(&handle, corner_start + t * corner_arc_len, Direction::End);
        (p.distance_to(center) - r).abs() < 0.05
    }
}
