//! The contour contract and the `Contour` sum type.
//!
//! Dispatch is a tagged `enum` with one variant per shape plus a
//! shared trait, `ContourContract`, implemented both by each concrete
//! variant type and by `Contour` itself (which just matches and
//! delegates), rather than a per-instance method-table pointer or a
//! `Box<dyn ContourContract>` — a `Path` never needs to store contours
//! more heterogeneously than these four known shapes.

pub mod circle;
pub mod rect;
pub mod rounded_rect;
pub mod standard;

use crate::builder::PathBuilder;
use crate::curve::CurveOp;
use crate::measure::MeasureHandle;
use crate::rect::RectF;
use crate::vector::Vector2F;

bitflags::bitflags! {
    /// Flags describing a contour's shape, independent of its variant.
    pub struct PathFlags: u8 {
        /// The contour contains only straight segments.
        const FLAT = 0x01;
        /// The contour's endpoint coincides with its start and it emits
        /// an explicit close.
        const CLOSED = 0x02;
    }
}

/// Selects which incident tangent is reported at a seam.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The tangent of the curve arriving at this point.
    Start,
    /// The tangent of the curve leaving this point.
    End,
}

/// The result of a successful `closest_point` query.
#[derive(Clone, Copy, Debug)]
pub struct ClosestPoint {
    pub distance: f32,
    pub position: Vector2F,
    pub offset: f32,
    pub tangent: Vector2F,
}

/// The operations every contour variant supports.
///
/// There's no `copy`/`size`/`free_measure` here: in Rust, deep copy is
/// `Clone`, and a measure handle is an ordinary owned value released
/// by `Drop` once it goes out of scope. See DESIGN.md.
pub trait ContourContract {
    /// This contour's flags.
    fn flags(&self) -> PathFlags;

    /// The minimum axis-aligned rectangle containing the contour, or
    /// `None` if no non-degenerate bound exists (a single point).
    fn bounds(&self) -> Option<RectF>;

    /// The contour's start and end points.
    fn start_end(&self) -> (Vector2F, Vector2F);

    /// Appends an SVG-style textual description to `out`.
    fn print(&self, out: &mut String);

    /// Enumerates the contour as Move + Line/Quad/Cubic/Conic/Close
    /// operations, to within `tolerance` for closed-form curved
    /// variants. Returns `false` if `f` requested early termination.
    fn foreach(&self, tolerance: f32, f: &mut dyn FnMut(CurveOp) -> bool) -> bool;

    /// A new contour of the same variant, traversed in reverse.
    fn reverse(&self) -> Contour;

    /// Builds a measure handle and returns the contour's total arc
    /// length.
    fn init_measure(&self, tolerance: f32) -> (MeasureHandle, f32);

    /// Position and unit tangent at arc length `distance`.
    fn point(&self, handle: &MeasureHandle, distance: f32, direction: Direction) -> (Vector2F, Vector2F);

    /// Signed curvature and, when non-zero, the osculating-circle
    /// center, at arc length `distance`.
    fn curvature(&self, handle: &MeasureHandle, distance: f32) -> (f32, Option<Vector2F>);

    /// The nearest point on the contour to `query`, if within
    /// `threshold`.
    fn closest_point(
        &self,
        handle: &MeasureHandle,
        tolerance: f32,
        query: Vector2F,
        threshold: f32,
    ) -> Option<ClosestPoint>;

    /// Appends the sub-contour on arc-length range `[start, end]` to
    /// `builder`.
    fn add_segment(
        &self,
        handle: &MeasureHandle,
        builder: &mut dyn PathBuilder,
        emit_move: bool,
        start: f32,
        end: f32,
    );

    /// Signed crossing number of a downward horizontal ray from `query`
    /// through the contour's edges.
    fn winding(&self, handle: &MeasureHandle, query: Vector2F) -> i32;
}

/// Signed crossing contribution of one directed polygon edge `a -> b`
/// for a downward horizontal ray cast from `query`, shared by every
/// variant's `winding` (straight-edge contours) implementation. Negative
/// winding is "inside" under this crate's convention: a contour wound in
/// its natural (clockwise-on-screen) construction order contributes -1
/// per enclosure, matching how every closed-form variant's own winding
/// rule (`RectContour`, `CircleContour`) is signed.
#[inline]
pub(crate) fn crossing(query: Vector2F, a: Vector2F, b: Vector2F) -> i32 {
    if a.y() <= query.y() && query.y() < b.y() {
        if (b - a).det(query - a) > 0.0 {
            -1
        } else {
            0
        }
    } else if b.y() <= query.y() && query.y() < a.y() {
        if (b - a).det(query - a) < 0.0 {
            1
        } else {
            0
        }
    } else {
        0
    }
}

/// A single connected piece of a path.
#[derive(Clone, Debug)]
pub enum Contour {
    Standard(standard::StandardContour),
    Rect(rect::RectContour),
    RoundedRect(rounded_rect::RoundedRectContour),
    Circle(circle::CircleContour),
}

macro_rules! dispatch {
    ($self:expr, $name:ident $(, $arg:expr)*) => {
        match $self {
            Contour::Standard(c) => c.$name($($arg),*),
            Contour::Rect(c) => c.$name($($arg),*),
            Contour::RoundedRect(c) => c.$name($($arg),*),
            Contour::Circle(c) => c.$name($($arg),*),
        }
    };
}

impl ContourContract for Contour {
    fn flags(&self) -> PathFlags {
        dispatch!(self, flags)
    }

    fn bounds(&self) -> Option<RectF> {
        dispatch!(self, bounds)
    }

    fn start_end(&self) -> (Vector2F, Vector2F) {
        dispatch!(self, start_end)
    }

    fn print(&self, out: &mut String) {
        dispatch!(self, print, out)
    }

    fn foreach(&self, tolerance: f32, f: &mut dyn FnMut(CurveOp) -> bool) -> bool {
        dispatch!(self, foreach, tolerance, f)
    }

    fn reverse(&self) -> Contour {
        dispatch!(self, reverse)
    }

    fn init_measure(&self, tolerance: f32) -> (MeasureHandle, f32) {
        dispatch!(self, init_measure, tolerance)
    }

    fn point(&self, handle: &MeasureHandle, distance: f32, direction: Direction) -> (Vector2F, Vector2F) {
        dispatch!(self, point, handle, distance, direction)
    }

    fn curvature(&self, handle: &MeasureHandle, distance: f32) -> (f32, Option<Vector2F>) {
        dispatch!(self, curvature, handle, distance)
    }

    fn closest_point(
        &self,
        handle: &MeasureHandle,
        tolerance: f32,
        query: Vector2F,
        threshold: f32,
    ) -> Option<ClosestPoint> {
        dispatch!(self, closest_point, handle, tolerance, query, threshold)
    }

    fn add_segment(
        &self,
        handle: &MeasureHandle,
        builder: &mut dyn PathBuilder,
        emit_move: bool,
        start: f32,
        end: f32,
    ) {
        dispatch!(self, add_segment, handle, builder, emit_move, start, end)
    }

    fn winding(&self, handle: &MeasureHandle, query: Vector2F) -> i32 {
        dispatch!(self, winding, handle, query)
    }
}
