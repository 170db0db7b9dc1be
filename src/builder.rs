//! The path builder interface consumed by the contour core.
//! Grounded on `pathfinder_content::outline::Contour`'s own
//! `push_point`/`push_segment`/`close` methods and on
//! `Outline::from_segments`'s move/close bookkeeping, generalized into a
//! standalone collaborator so `add_segment`, `reverse`, and
//! `RoundedRect::foreach`'s Standard-contour delegation can all write
//! through the same seam.

use crate::contour::standard::StandardContour;
use crate::contour::Contour;
use crate::curve::CurveOp;
use crate::path::Path;
use crate::vector::Vector2F;

/// Operations a path builder must support.
pub trait PathBuilder {
    fn move_to(&mut self, to: Vector2F);
    fn line_to(&mut self, to: Vector2F);
    fn quad_to(&mut self, ctrl: Vector2F, to: Vector2F);
    fn cubic_to(&mut self, ctrl0: Vector2F, ctrl1: Vector2F, to: Vector2F);
    fn conic_to(&mut self, ctrl: Vector2F, to: Vector2F, weight: f32);
    fn close(&mut self);
    /// Appends an existing [`CurveOp`] verbatim (its `from` must equal
    /// the builder's current pen position).
    fn pathop_to(&mut self, op: &CurveOp);
}

/// A concrete, in-memory path builder that accumulates `Standard`
/// contours.
#[derive(Debug, Default)]
pub struct PathBuilderImpl {
    contours: Vec<Contour>,
    current: Vec<CurveOp>,
    pen: Vector2F,
    has_started: bool,
}

impl PathBuilderImpl {
    #[inline]
    pub fn new() -> PathBuilderImpl {
        PathBuilderImpl::default()
    }

    fn flush_current(&mut self) {
        if self.current.len() > 1 {
            self.contours.push(Contour::Standard(StandardContour::from_ops(std::mem::take(&mut self.current))));
        } else {
            self.current.clear();
        }
        self.has_started = false;
    }

    /// Appends an already-built contour verbatim, flattening it to
    /// `Standard` ops via `foreach`.
    pub fn add_contour(&mut self, contour: &dyn crate::contour::ContourContract, tolerance: f32) {
        self.flush_current();
        let mut ops = Vec::new();
        contour.foreach(tolerance, &mut |op| {
            ops.push(op);
            true
        });
        if !ops.is_empty() {
            self.contours.push(Contour::Standard(StandardContour::from_ops(ops)));
        }
    }

    /// Finishes building and returns the assembled path.
    pub fn free_to_path(mut self) -> Path {
        self.flush_current();
        Path::from_contours(self.contours)
    }
}

impl PathBuilder for PathBuilderImpl {
    fn move_to(&mut self, to: Vector2F) {
        self.flush_current();
        self.current.push(CurveOp::mv(to));
        self.pen = to;
        self.has_started = true;
    }

    fn line_to(&mut self, to: Vector2F) {
        debug_assert!(self.has_started, "line_to before move_to");
        self.current.push(CurveOp::line(self.pen, to));
        self.pen = to;
    }

    fn quad_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        debug_assert!(self.has_started, "quad_to before move_to");
        self.current.push(CurveOp::quad(self.pen, ctrl, to));
        self.pen = to;
    }

    fn cubic_to(&mut self, ctrl0: Vector2F, ctrl1: Vector2F, to: Vector2F) {
        debug_assert!(self.has_started, "cubic_to before move_to");
        self.current.push(CurveOp::cubic(self.pen, ctrl0, ctrl1, to));
        self.pen = to;
    }

    fn conic_to(&mut self, ctrl: Vector2F, to: Vector2F, weight: f32) {
        debug_assert!(self.has_started, "conic_to before move_to");
        self.current.push(CurveOp::conic(self.pen, ctrl, to, weight));
        self.pen = to;
    }

    fn close(&mut self) {
        debug_assert!(self.has_started, "close before move_to");
        let start = self
            .current
            .first()
            .map(|op| op.start())
            .unwrap_or(self.pen);
        self.current.push(CurveOp::close(self.pen, start));
        self.pen = start;
    }

    fn pathop_to(&mut self, op: &CurveOp) {
        debug_assert!(self.has_started, "pathop_to before move_to");
        self.current.push(*op);
        self.pen = op.end();
    }
}
