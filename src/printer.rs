//! SVG-style textual printing, grounded on `pathfinder_content`'s
//! `impl Debug for Contour` in `outline.rs`, extended with the
//! non-standard `O` conic command and locale-independent number
//! formatting (Rust's `f32` `Display` is already locale independent,
//! unlike a C `sprintf("%g", ...)`).

use crate::curve::{CurveKind, CurveOp};
use std::fmt::Write;

#[inline]
fn num(out: &mut String, value: f32) {
    write!(out, "{}", value).expect("writing to a String cannot fail");
}

/// Appends the SVG-style commands for a sequence of ops (as produced by
/// `Standard`/`RoundedRect` contours) to `out`. The first op must be a
/// `Move`.
pub fn print_ops(ops: &[CurveOp], out: &mut String) {
    for (index, op) in ops.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        match op.kind() {
            CurveKind::Move => {
                out.push('M');
                out.push(' ');
                num(out, op.points()[0].x());
                out.push(' ');
                num(out, op.points()[0].y());
            }
            CurveKind::Line => {
                out.push('L');
                out.push(' ');
                num(out, op.end().x());
                out.push(' ');
                num(out, op.end().y());
            }
            CurveKind::Quad => {
                let pts = op.points();
                out.push('Q');
                out.push(' ');
                num(out, pts[1].x());
                out.push(' ');
                num(out, pts[1].y());
                out.push_str(", ");
                num(out, pts[2].x());
                out.push(' ');
                num(out, pts[2].y());
            }
            CurveKind::Cubic => {
                let pts = op.points();
                out.push('C');
                out.push(' ');
                num(out, pts[1].x());
                out.push(' ');
                num(out, pts[1].y());
                out.push_str(", ");
                num(out, pts[2].x());
                out.push(' ');
                num(out, pts[2].y());
                out.push_str(", ");
                num(out, pts[3].x());
                out.push(' ');
                num(out, pts[3].y());
            }
            CurveKind::Conic => {
                let pts = op.points();
                out.push('O');
                out.push(' ');
                num(out, pts[1].x());
                out.push(' ');
                num(out, pts[1].y());
                out.push_str(", ");
                num(out, pts[2].x());
                out.push(' ');
                num(out, pts[2].y());
                out.push_str(", ");
                num(out, op.weight());
            }
            CurveKind::Close => {
                out.push('Z');
            }
        }
    }
}

/// Prints the compact rectangle form `M x y h w v h h -w z`.
pub fn print_rect(x: f32, y: f32, w: f32, h: f32, out: &mut String) {
    write!(out, "M {} {} h {} v {} h {} z", x, y, w, h, -w).expect("writing to a String cannot fail");
}

/// Prints the arc form `A rx ry 0 0 sweep x y`, preceded by the move to
/// the arc's start point.
pub fn print_arc(start: (f32, f32), rx: f32, ry: f32, sweep: bool, end: (f32, f32), out: &mut String) {
    write!(
        out,
        "M {} {} A {} {} 0 0 {} {} {}",
        start.0,
        start.1,
        rx,
        ry,
        if sweep { 1 } else { 0 },
        end.0,
        end.1
    )
    .expect("writing to a String cannot fail");
}
