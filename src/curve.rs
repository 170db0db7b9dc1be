//! The curve-primitive interface consumed by the contour core: evaluate
//! a [`CurveOp`] at a parameter, split it, sub-range it, and test it
//! for flatness. Grounded on `pathfinder_content::segment`'s
//! `Segment`/`CubicSegment` (`sample`, `split`, `is_flat`), generalized
//! to a five-kind tagged curve (line/quadratic/cubic plus close and
//! rational quadratics, or "conics"); a conic's de Casteljau split is
//! the standard projective one (Sederberg, *Computer Aided Geometric
//! Design*, conic subdivision).

use crate::util::{clamp01, safe_sqrt, EPSILON};
use crate::vector::Vector2F;

/// The kind of a curve operation. Point counts: Move=1, Line=2, Quad=3,
/// Cubic=4, Conic=3, Close=2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveKind {
    Move,
    Line,
    Quad,
    Cubic,
    Conic,
    Close,
}

impl CurveKind {
    /// Number of points a materialized [`CurveOp`] of this kind carries.
    #[inline]
    pub fn point_count(self) -> usize {
        match self {
            CurveKind::Move => 1,
            CurveKind::Line => 2,
            CurveKind::Quad => 3,
            CurveKind::Cubic => 4,
            CurveKind::Conic => 3,
            CurveKind::Close => 2,
        }
    }
}

/// A materialized curve operation: a tagged record of points (and, for
/// `Conic`, a rational weight of the middle control point).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveOp {
    kind: CurveKind,
    pts: [Vector2F; 4],
    weight: f32,
}

impl CurveOp {
    #[inline]
    pub fn mv(p: Vector2F) -> CurveOp {
        CurveOp {
            kind: CurveKind::Move,
            pts: [p, p, p, p],
            weight: 0.0,
        }
    }

    #[inline]
    pub fn line(from: Vector2F, to: Vector2F) -> CurveOp {
        CurveOp {
            kind: CurveKind::Line,
            pts: [from, to, to, to],
            weight: 0.0,
        }
    }

    #[inline]
    pub fn quad(from: Vector2F, ctrl: Vector2F, to: Vector2F) -> CurveOp {
        CurveOp {
            kind: CurveKind::Quad,
            pts: [from, ctrl, to, to],
            weight: 0.0,
        }
    }

    #[inline]
    pub fn cubic(from: Vector2F, ctrl0: Vector2F, ctrl1: Vector2F, to: Vector2F) -> CurveOp {
        CurveOp {
            kind: CurveKind::Cubic,
            pts: [from, ctrl0, ctrl1, to],
            weight: 0.0,
        }
    }

    #[inline]
    pub fn conic(from: Vector2F, ctrl: Vector2F, to: Vector2F, weight: f32) -> CurveOp {
        CurveOp {
            kind: CurveKind::Conic,
            pts: [from, ctrl, to, to],
            weight,
        }
    }

    #[inline]
    pub fn close(from: Vector2F, to: Vector2F) -> CurveOp {
        CurveOp {
            kind: CurveKind::Close,
            pts: [from, to, to, to],
            weight: 0.0,
        }
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[inline]
    pub fn points(&self) -> &[Vector2F] {
        &self.pts[..self.kind.point_count()]
    }

    #[inline]
    pub fn start(&self) -> Vector2F {
        self.pts[0]
    }

    #[inline]
    pub fn end(&self) -> Vector2F {
        self.pts[self.kind.point_count() - 1]
    }

    #[inline]
    pub fn is_line_like(&self) -> bool {
        matches!(self.kind, CurveKind::Line | CurveKind::Close)
    }

    /// True if the maximum deviation of this curve from the straight
    /// line connecting its endpoints is less than `tolerance`.
    ///
    /// For `Move`/`Line`/`Close` this is trivially true. For `Quad`/`Cubic`
    /// this mirrors `CubicSegment::is_flat`. For `Conic` the weighted
    /// control point is compared against the same chord-deviation bound;
    /// the rational weight only pulls the true curve closer to the
    /// chord than the unweighted control polygon suggests, so treating
    /// the conic like an unweighted quadratic for this test is a
    /// conservative (never-too-flat) approximation.
    pub fn is_flat(&self, tolerance: f32) -> bool {
        match self.kind {
            CurveKind::Move | CurveKind::Line | CurveKind::Close => true,
            CurveKind::Quad | CurveKind::Conic => {
                control_point_deviation(self.pts[0], self.pts[1], self.pts[2]) <= tolerance
            }
            CurveKind::Cubic => {
                let d0 = control_point_deviation(self.pts[0], self.pts[1], self.pts[3]);
                let d1 = control_point_deviation(self.pts[0], self.pts[2], self.pts[3]);
                d0.max(d1) <= tolerance
            }
        }
    }

    /// Position and unit tangent at parametric `t` (clamped to `[0,1]`).
    pub fn sample(&self, t: f32) -> (Vector2F, Vector2F) {
        let t = clamp01(t);
        match self.kind {
            CurveKind::Move => (self.pts[0], Vector2F::zero()),
            CurveKind::Line | CurveKind::Close => {
                let (from, to) = (self.pts[0], self.pts[1]);
                (from.lerp(to, t), (to - from).normalize())
            }
            CurveKind::Quad => {
                let (p0, p1, p2) = (self.pts[0], self.pts[1], self.pts[2]);
                let pos = quad_eval(p0, p1, p2, t);
                let deriv = (p1 - p0).scale(2.0 * (1.0 - t)) + (p2 - p1).scale(2.0 * t);
                (pos, deriv.normalize())
            }
            CurveKind::Cubic => {
                let (p0, p1, p2, p3) = (self.pts[0], self.pts[1], self.pts[2], self.pts[3]);
                let pos = cubic_eval(p0, p1, p2, p3, t);
                let deriv = (p1 - p0).scale(3.0 * (1.0 - t) * (1.0 - t))
                    + (p2 - p1).scale(6.0 * t * (1.0 - t))
                    + (p3 - p2).scale(3.0 * t * t);
                (pos, deriv.normalize())
            }
            CurveKind::Conic => {
                let (p0, p1, p2) = (self.pts[0], self.pts[1], self.pts[2]);
                conic_eval_with_tangent(p0, p1, p2, self.weight, t)
            }
        }
    }

    /// Signed curvature at `t`, plus the osculating-circle center when
    /// curvature is non-zero. Estimated from a symmetric finite
    /// difference of the tangent direction, which is accurate enough
    /// for the `curvature()` query's purpose (stroke-join radius hints)
    /// without needing a bespoke analytic second derivative per curve
    /// kind.
    pub fn curvature(&self, t: f32) -> (f32, Option<Vector2F>) {
        if matches!(self.kind, CurveKind::Move | CurveKind::Line | CurveKind::Close) {
            return (0.0, None);
        }
        const H: f32 = 1.0 / 2048.0;
        let t0 = (t - H).max(0.0);
        let t1 = (t + H).min(1.0);
        let step = t1 - t0;
        if step <= 0.0 {
            return (0.0, None);
        }
        let (p0, tan0) = self.sample(t0);
        let (p1, tan1) = self.sample(t1);
        let (pc, tanc) = self.sample(t);
        let ds = p0.distance_to(p1).max(EPSILON);
        // Rate of rotation of the unit tangent per unit arc length.
        let cross = tan0.det(tan1);
        let dot = tan0.dot(tan1).max(-1.0).min(1.0);
        let dtheta = dot.acos() * cross.signum();
        let kappa = dtheta / ds;
        if kappa.abs() <= EPSILON {
            (0.0, None)
        } else {
            let normal = Vector2F::new(-tanc.y(), tanc.x());
            let radius = 1.0 / kappa;
            let center = pc + normal.scale(radius);
            (kappa, Some(center))
        }
    }

    /// Splits this curve into two at parametric `t`.
    pub fn split(&self, t: f32) -> (CurveOp, CurveOp) {
        let t = clamp01(t);
        match self.kind {
            CurveKind::Move => (*self, *self),
            CurveKind::Line | CurveKind::Close => {
                let mid = self.pts[0].lerp(self.pts[1], t);
                let make = |from, to| CurveOp {
                    kind: self.kind,
                    pts: [from, to, to, to],
                    weight: 0.0,
                };
                (make(self.pts[0], mid), make(mid, self.pts[1]))
            }
            CurveKind::Quad => {
                let (p0, p1, p2) = (self.pts[0], self.pts[1], self.pts[2]);
                let q0 = p0.lerp(p1, t);
                let q1 = p1.lerp(p2, t);
                let mid = q0.lerp(q1, t);
                (CurveOp::quad(p0, q0, mid), CurveOp::quad(mid, q1, p2))
            }
            CurveKind::Cubic => {
                let (p0, p1, p2, p3) = (self.pts[0], self.pts[1], self.pts[2], self.pts[3]);
                let q0 = p0.lerp(p1, t);
                let q1 = p1.lerp(p2, t);
                let q2 = p2.lerp(p3, t);
                let r0 = q0.lerp(q1, t);
                let r1 = q1.lerp(q2, t);
                let mid = r0.lerp(r1, t);
                (
                    CurveOp::cubic(p0, q0, r0, mid),
                    CurveOp::cubic(mid, r1, q2, p3),
                )
            }
            CurveKind::Conic => {
                let (p0, p1, p2) = (self.pts[0], self.pts[1], self.pts[2]);
                let (left, right) = split_conic(p0, p1, p2, self.weight, t);
                (left, right)
            }
        }
    }

    /// Sub-curve spanning native parameters `[t0, t1]`, `t0 <= t1`.
    ///
    /// For `Conic`, this is computed directly from the original control
    /// points via [`conic_range`] rather than by chaining two `split`
    /// calls: `split`'s weight renormalization is a Möbius (non-affine)
    /// reparametrization of its tail, so a second split's naively
    /// affine-remapped local `t1` would land on the wrong point. See
    /// `conic_range`'s doc comment.
    pub fn sub_curve(&self, t0: f32, t1: f32) -> CurveOp {
        let t0 = clamp01(t0);
        let t1 = clamp01(t1).max(t0);
        if t0 <= 0.0 && t1 >= 1.0 {
            return *self;
        }
        if self.kind == CurveKind::Conic {
            let (p0, p1, p2) = (self.pts[0], self.pts[1], self.pts[2]);
            return conic_range(p0, p1, p2, self.weight, t0, t1);
        }
        let (_, tail) = self.split(t0);
        // Re-map t1 into the tail's own [0,1] parameter range. Valid
        // for Line/Quad/Cubic: their `split` reparametrizes affinely.
        let local_t1 = if t1 >= 1.0 {
            1.0
        } else {
            ((t1 - t0) / (1.0 - t0)).max(0.0).min(1.0)
        };
        tail.split(local_t1).0
    }

    /// This curve traversed in the opposite direction.
    pub fn reverse(&self) -> CurveOp {
        match self.kind {
            CurveKind::Move => *self,
            CurveKind::Line => CurveOp::line(self.pts[1], self.pts[0]),
            CurveKind::Close => CurveOp::close(self.pts[1], self.pts[0]),
            CurveKind::Quad => CurveOp::quad(self.pts[2], self.pts[1], self.pts[0]),
            CurveKind::Cubic => CurveOp::cubic(self.pts[3], self.pts[2], self.pts[1], self.pts[0]),
            CurveKind::Conic => CurveOp::conic(self.pts[2], self.pts[1], self.pts[0], self.weight),
        }
    }
}

#[inline]
fn quad_eval(p0: Vector2F, p1: Vector2F, p2: Vector2F, t: f32) -> Vector2F {
    let q0 = p0.lerp(p1, t);
    let q1 = p1.lerp(p2, t);
    q0.lerp(q1, t)
}

#[inline]
fn cubic_eval(p0: Vector2F, p1: Vector2F, p2: Vector2F, p3: Vector2F, t: f32) -> Vector2F {
    let q0 = p0.lerp(p1, t);
    let q1 = p1.lerp(p2, t);
    let q2 = p2.lerp(p3, t);
    let r0 = q0.lerp(q1, t);
    let r1 = q1.lerp(q2, t);
    r0.lerp(r1, t)
}

/// Kaspar Fischer's control-point-deviation flatness bound, as used by
/// `pathfinder_content::segment::CubicSegment::is_flat` (there computed
/// over both hull edges at once via SIMD; here expressed edge by edge
/// since there's no SIMD backing store).
#[inline]
fn control_point_deviation(from: Vector2F, ctrl: Vector2F, to: Vector2F) -> f32 {
    let uv = ctrl.scale(3.0) - from.scale(2.0) - to;
    uv.length() * 0.25
}

struct Homogeneous {
    num: Vector2F,
    w: f32,
}

impl Homogeneous {
    #[inline]
    fn point(&self) -> Vector2F {
        if self.w.abs() <= EPSILON {
            self.num
        } else {
            self.num.scale(1.0 / self.w)
        }
    }
}

/// Evaluate a rational quadratic (weights 1, w, 1) at `t`, returning
/// position and unit tangent via the analytic rational derivative.
fn conic_eval_with_tangent(
    p0: Vector2F,
    p1: Vector2F,
    p2: Vector2F,
    w: f32,
    t: f32,
) -> (Vector2F, Vector2F) {
    let one_t = 1.0 - t;
    let b0 = one_t * one_t;
    let b1 = 2.0 * t * one_t * w;
    let b2 = t * t;
    let denom = b0 + b1 + b2;
    let numer = p0.scale(b0) + p1.scale(b1) + p2.scale(b2);
    let pos = if denom.abs() <= EPSILON {
        p0
    } else {
        numer.scale(1.0 / denom)
    };

    let d_b0 = -2.0 * one_t;
    let d_b1 = 2.0 * w * (1.0 - 2.0 * t);
    let d_b2 = 2.0 * t;
    let d_denom = d_b0 + d_b1 + d_b2;
    let d_numer = p0.scale(d_b0) + p1.scale(d_b1) + p2.scale(d_b2);

    // Quotient rule, direction only: N'D - N D'.
    let tangent_dir = d_numer.scale(denom) - numer.scale(d_denom);
    let tangent = if tangent_dir.is_zero() {
        (p2 - p0).normalize()
    } else {
        tangent_dir.normalize()
    };
    (pos, tangent)
}

/// The symmetric bilinear blossom of a quadratic Bézier lifted to
/// homogeneous coordinates: affine in each of `u` and `v` independently,
/// so evaluating it at `(t0, t0)`, `(t0, t1)`, `(t1, t1)` gives the exact
/// control points of the curve's `[t0, t1]` sub-range in a single step,
/// with no intermediate renormalization to compound.
fn conic_blossom(h0: &Homogeneous, h1: &Homogeneous, h2: &Homogeneous, u: f32, v: f32) -> Homogeneous {
    let b0 = (1.0 - u) * (1.0 - v);
    let b1 = u * (1.0 - v) + v * (1.0 - u);
    let b2 = u * v;
    Homogeneous {
        num: h0.num.scale(b0) + h1.num.scale(b1) + h2.num.scale(b2),
        w: h0.w * b0 + h1.w * b1 + h2.w * b2,
    }
}

/// Extracts the sub-range `[t0, t1]` of a rational quadratic (weights
/// `1, w, 1`) as an equivalent conic over local parameter `[0, 1]`.
///
/// Uses the homogeneous blossom above to get the three sub-range
/// control points directly from the *original* control points, then
/// renormalizes weight exactly once (the standard conic weight-
/// normalization identity, generalized from `w1/sqrt(w0 * w2)` to the
/// sub-range's own, generally non-unit, endpoint weights). This is the
/// closed-form replacement for chaining two `split`s, which would
/// instead compound two independent, incompatible Möbius
/// reparametrizations and land on the wrong point for `0 < t0` and
/// `t1 < 1`.
fn conic_range(p0: Vector2F, p1: Vector2F, p2: Vector2F, w: f32, t0: f32, t1: f32) -> CurveOp {
    let h0 = Homogeneous {
        num: p0,
        w: 1.0,
    };
    let h1 = Homogeneous {
        num: p1.scale(w),
        w,
    };
    let h2 = Homogeneous {
        num: p2,
        w: 1.0,
    };

    let q0 = conic_blossom(&h0, &h1, &h2, t0, t0);
    let q1 = conic_blossom(&h0, &h1, &h2, t0, t1);
    let q2 = conic_blossom(&h0, &h1, &h2, t1, t1);

    let denom = safe_sqrt(q0.w.max(EPSILON) * q2.w.max(EPSILON)).max(EPSILON);
    let weight = q1.w / denom;
    CurveOp::conic(q0.point(), q1.point(), q2.point(), weight)
}

/// Splits a rational quadratic at `t` into its `[0, t]` and `[t, 1]`
/// sub-ranges, each via [`conic_range`].
fn split_conic(p0: Vector2F, p1: Vector2F, p2: Vector2F, w: f32, t: f32) -> (CurveOp, CurveOp) {
    let t = clamp01(t);
    (
        conic_range(p0, p1, p2, w, 0.0, t),
        conic_range(p0, p1, p2, w, t, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::vec2f;
    use std::f32::consts::FRAC_1_SQRT_2;

    /// A quarter-circle conic from `(1,0)` to `(0,1)`, control point
    /// `(1,1)`, weight `sqrt(1/2)` — the same shape every rounded-rect
    /// corner is built from.
    fn quarter_circle_conic() -> CurveOp {
        CurveOp::conic(vec2f(1.0, 0.0), vec2f(1.0, 1.0), vec2f(0.0, 1.0), FRAC_1_SQRT_2)
    }

    #[test]
    fn conic_sub_curve_end_matches_direct_sample() {
        let conic = quarter_circle_conic();
        let sub = conic.sub_curve(0.2, 0.7);
        let (direct, _) = conic.sample(0.7);
        assert!(
            sub.end().approx_eq(direct, 0.001),
            "sub_curve(0.2, 0.7).end() = {:?}, expected sample(0.7) = {:?}",
            sub.end(),
            direct,
        );
    }

    #[test]
    fn conic_sub_curve_start_matches_direct_sample() {
        let conic = quarter_circle_conic();
        let sub = conic.sub_curve(0.2, 0.7);
        let (direct, _) = conic.sample(0.2);
        assert!(sub.start().approx_eq(direct, 0.001));
    }

    #[test]
    fn conic_sub_curve_stays_on_the_unit_circle() {
        // Every point of a quarter-circle conic centered on the origin
        // is distance 1 from the origin; a wrong sub-range would drift
        // off the arc, not just mis-time it.
        let conic = quarter_circle_conic();
        let sub = conic.sub_curve(0.2, 0.7);
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let (p, _) = sub.sample(t);
            assert!((p.length() - 1.0).abs() < 0.01, "point {:?} at local t {} left the unit circle", p, t);
        }
    }

    #[test]
    fn conic_sub_curve_of_the_full_range_is_unchanged() {
        let conic = quarter_circle_conic();
        let sub = conic.sub_curve(0.0, 1.0);
        assert!(sub.start().approx_eq(conic.start(), 0.0001));
        assert!(sub.end().approx_eq(conic.end(), 0.0001));
    }
}
