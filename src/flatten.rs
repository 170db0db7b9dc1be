//! Adaptive flattening: decomposes a [`CurveOp`] into chord segments
//! tagged `Short` or `Straight`. Grounded on
//! `pathfinder_content::segment::CubicSegment`'s flatness test driving
//! recursive subdivision, the same shape as a standard Bézier
//! flattener; `pathfinder_content` itself does not build an arc-length
//! table at all (that's new functionality — see `measure.rs`), so only
//! the flatness *test* is reused here, not a flattening loop.

use log::debug;

use crate::curve::{CurveKind, CurveOp};
use crate::vector::Vector2F;

/// Why the flattener stopped subdividing a given chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlattenReason {
    /// The chord was accepted because it is within `tolerance` of the
    /// true curve, but the curve is not exactly straight on this range.
    Short,
    /// The underlying curve is (effectively) a straight line on this
    /// sub-range.
    Straight,
}

/// One flattened chord: `from -> to`, tagged with the native curve
/// parameter range it covers and why flattening stopped there.
#[derive(Clone, Copy, Debug)]
pub struct FlattenedChord {
    pub from: Vector2F,
    pub to: Vector2F,
    pub from_t: f32,
    pub to_t: f32,
    pub reason: FlattenReason,
}

/// Curves flatter than this (in the same units as `is_flat`'s
/// tolerance) are considered exactly straight rather than merely
/// "short enough".
const STRAIGHT_EPSILON: f32 = 1e-4;

/// Recursion depth past which a chord is accepted regardless of
/// flatness. Bounds work on pathological tolerances; 24 halvings of a
/// `t` range already exceeds `f32` precision for any curve with finite
/// extent.
const MAX_DEPTH: u32 = 24;

/// Decomposes `op` (which must not be a `Move`) into chords accurate to
/// within `tolerance`, appending them in order to `out`.
pub fn flatten(op: &CurveOp, tolerance: f32, out: &mut Vec<FlattenedChord>) {
    debug_assert!(op.kind() != CurveKind::Move, "Move ops are not flattened");
    flatten_range(op, 0.0, 1.0, tolerance, 0, out);
}

fn flatten_range(
    op: &CurveOp,
    t0: f32,
    t1: f32,
    tolerance: f32,
    depth: u32,
    out: &mut Vec<FlattenedChord>,
) {
    debug!("flatten_range(): depth {} range [{}, {}]", depth, t0, t1);
    let sub = op.sub_curve(t0, t1);
    if depth >= MAX_DEPTH || sub.is_flat(tolerance) {
        out.push(FlattenedChord {
            from: sub.start(),
            to: sub.end(),
            from_t: t0,
            to_t: t1,
            reason: classify(&sub),
        });
        return;
    }
    let mid = (t0 + t1) * 0.5;
    flatten_range(op, t0, mid, tolerance, depth + 1, out);
    flatten_range(op, mid, t1, tolerance, depth + 1, out);
}

fn classify(sub: &CurveOp) -> FlattenReason {
    if sub.is_line_like() {
        return FlattenReason::Straight;
    }
    if sub.is_flat(STRAIGHT_EPSILON) {
        FlattenReason::Straight
    } else {
        FlattenReason::Short
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::vec2f;
    use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

    fn flattened_length(op: &CurveOp, tolerance: f32) -> f32 {
        let mut chords = Vec::new();
        flatten(op, tolerance, &mut chords);
        chords.iter().map(|c| c.from.distance_to(c.to)).sum()
    }

    #[test]
    fn flattening_a_quarter_circle_conic_converges_to_its_true_length() {
        // Regression for a chained-split bug in `CurveOp::sub_curve`
        // that made every recursive flattening step of a `Conic`
        // (exactly the shape every rounded-rect corner is built from)
        // land on the wrong point, so tighter tolerances produced
        // chords that drifted *away* from the true arc length instead
        // of converging to it.
        let conic = CurveOp::conic(vec2f(1.0, 0.0), vec2f(1.0, 1.0), vec2f(0.0, 1.0), FRAC_1_SQRT_2);
        let true_length = FRAC_PI_2;

        let loose = flattened_length(&conic, 0.25);
        let tight = flattened_length(&conic, 0.01);
        let tighter = flattened_length(&conic, 0.001);

        assert!(
            (tighter - true_length).abs() < (loose - true_length).abs(),
            "tighter tolerance did not converge: loose={} tight={} tighter={} true={}",
            loose,
            tight,
            tighter,
            true_length,
        );
        assert!((tighter - true_length).abs() < 0.005);
    }
}
