//! The general curve-sequence contour variant: an arbitrary chain of
//! Move/Line/Quad/Cubic/Conic/Close ops. Grounded on
//! `pathfinder_content::outline::Contour`, whose `points: Vec<Vector2F>`
//! plus a packed per-point flags byte is generalized here into a
//! points pool plus a parallel op-descriptor array (each descriptor
//! names its kind, the index of its own last point in the pool, and,
//! for `Conic`, its rational weight) so an op's control points are
//! found by slicing the pool instead of re-deriving them from flags.

use log::debug;

use crate::builder::PathBuilder;
use crate::curve::{CurveKind, CurveOp};
use crate::line_segment::LineSegment2F;
use crate::measure::{MeasureHandle, MeasureRecord, MeasureTable};
use crate::rect::{self, RectF};
use crate::util::sanitize_tolerance;
use crate::vector::Vector2F;

use super::{ClosestPoint, Contour, ContourContract, Direction, PathFlags};

#[derive(Clone, Copy, Debug)]
struct StdOp {
    kind: CurveKind,
    /// Index into `points` of this op's own last point. For `Move`,
    /// the point itself; for every other kind, the control points are
    /// `points[point_index - (count-2) ..= point_index]`, with the
    /// op's start point being the *previous* op's `point_index`.
    point_index: u32,
    weight: f32,
}

/// A contour built from an explicit chain of curve operations.
#[derive(Clone, Debug)]
pub struct StandardContour {
    points: Vec<Vector2F>,
    ops: Vec<StdOp>,
    flags: PathFlags,
    bounds: Option<RectF>,
}

impl StandardContour {
    /// Builds a `StandardContour` from a materialized op chain, as
    /// produced by a [`PathBuilder`]. `ops[0]` must be a `Move`.
    pub fn from_ops(ops: Vec<CurveOp>) -> StandardContour {
        debug_assert!(!ops.is_empty(), "a contour needs at least a Move");
        debug_assert_eq!(ops[0].kind(), CurveKind::Move, "first op must be Move");

        let mut points = Vec::with_capacity(ops.len() + 1);
        let mut std_ops = Vec::with_capacity(ops.len());
        points.push(ops[0].start());
        std_ops.push(StdOp {
            kind: CurveKind::Move,
            point_index: 0,
            weight: 0.0,
        });

        for op in &ops[1..] {
            match op.kind() {
                CurveKind::Move => debug_assert!(false, "a contour has exactly one Move"),
                CurveKind::Line => {
                    points.push(op.end());
                }
                CurveKind::Quad => {
                    points.push(op.points()[1]);
                    points.push(op.end());
                }
                CurveKind::Cubic => {
                    points.push(op.points()[1]);
                    points.push(op.points()[2]);
                    points.push(op.end());
                }
                CurveKind::Conic => {
                    points.push(op.points()[1]);
                    points.push(op.end());
                }
                CurveKind::Close => {
                    debug_assert!(
                        op.end().approx_eq(points[0], crate::util::EPSILON),
                        "Close must return to the contour's start point"
                    );
                }
            }
            let point_index = if op.kind() == CurveKind::Close {
                0
            } else {
                (points.len() - 1) as u32
            };
            std_ops.push(StdOp {
                kind: op.kind(),
                point_index,
                weight: op.weight(),
            });
        }

        let closed = std_ops.last().map_or(false, |op| op.kind == CurveKind::Close);
        let flat = std_ops[1..]
            .iter()
            .all(|op| matches!(op.kind, CurveKind::Line | CurveKind::Close));
        let mut flags = PathFlags::empty();
        if closed {
            flags.insert(PathFlags::CLOSED);
        }
        if flat {
            flags.insert(PathFlags::FLAT);
        }

        let mut bounds: Option<RectF> = None;
        let mut acc = RectF::default();
        for (index, point) in points.iter().enumerate() {
            rect::union_rect(&mut acc, *point, index == 0);
        }
        if acc.size().x() > 0.0 && acc.size().y() > 0.0 {
            bounds = Some(acc);
        }

        StandardContour {
            points,
            ops: std_ops,
            flags,
            bounds,
        }
    }

    fn materialize(&self, index: usize) -> CurveOp {
        let op = &self.ops[index];
        let prev_end = if index == 0 { 0 } else { self.ops[index - 1].point_index as usize };
        let from = self.points[prev_end];
        match op.kind {
            CurveKind::Move => CurveOp::mv(self.points[op.point_index as usize]),
            CurveKind::Line => CurveOp::line(from, self.points[op.point_index as usize]),
            CurveKind::Quad => {
                let end = op.point_index as usize;
                CurveOp::quad(from, self.points[end - 1], self.points[end])
            }
            CurveKind::Cubic => {
                let end = op.point_index as usize;
                CurveOp::cubic(from, self.points[end - 2], self.points[end - 1], self.points[end])
            }
            CurveKind::Conic => {
                let end = op.point_index as usize;
                CurveOp::conic(from, self.points[end - 1], self.points[end], op.weight)
            }
            CurveKind::Close => CurveOp::close(from, self.points[0]),
        }
    }

    fn materialized_ops(&self) -> Vec<CurveOp> {
        (0..self.ops.len()).map(|i| self.materialize(i)).collect()
    }

    fn table<'a>(&self, handle: &'a MeasureHandle) -> &'a MeasureTable {
        match handle {
            MeasureHandle::Standard(table) => table,
            _ => unreachable!("StandardContour requires a Standard measure handle"),
        }
    }

    /// Builds a measure table without wrapping it in a [`MeasureHandle`];
    /// used directly by `RoundedRectContour`, which owns the table
    /// itself inside `MeasureHandle::RoundedRect`.
    pub(crate) fn build_table(&self, tolerance: f32) -> MeasureTable {
        MeasureTable::build(&self.materialized_ops(), sanitize_tolerance(tolerance))
    }

    pub(crate) fn point_with_table(&self, table: &MeasureTable, distance: f32, direction: Direction) -> (Vector2F, Vector2F) {
        point_impl(self, table, distance, direction)
    }

    pub(crate) fn curvature_with_table(&self, table: &MeasureTable, distance: f32) -> (f32, Option<Vector2F>) {
        curvature_impl(self, table, distance)
    }

    pub(crate) fn closest_point_with_table(
        &self,
        table: &MeasureTable,
        tolerance: f32,
        query: Vector2F,
        threshold: f32,
    ) -> Option<ClosestPoint> {
        closest_point_impl(self, table, tolerance, query, threshold)
    }

    pub(crate) fn add_segment_with_table(
        &self,
        table: &MeasureTable,
        builder: &mut dyn PathBuilder,
        emit_move: bool,
        start: f32,
        end: f32,
    ) {
        add_segment_impl(self, table, builder, emit_move, start, end)
    }

    pub(crate) fn winding_with_table(&self, table: &MeasureTable, query: Vector2F) -> i32 {
        winding_impl(self, table, query)
    }
}

#[inline]
fn local_u(record: &MeasureRecord, distance: f32) -> f32 {
    let span = record.end - record.start;
    if span <= 0.0 {
        0.0
    } else {
        ((distance - record.start) / span).max(0.0).min(1.0)
    }
}

#[inline]
fn native_t(record: &MeasureRecord, distance: f32) -> f32 {
    let u = local_u(record, distance);
    record.start_param + (record.end_param - record.start_param) * u
}

fn eval_record(op: &CurveOp, record: &MeasureRecord, u: f32) -> (Vector2F, Vector2F) {
    let t = record.start_param + (record.end_param - record.start_param) * u;
    op.sample(t)
}

/// Emits a materialized op's tail (everything but its `Move`-equivalent
/// start) onto `builder`, demoting `Close` to a plain line since it may
/// no longer be the chain's final op.
fn emit_tail(builder: &mut dyn PathBuilder, op: &CurveOp) {
    match op.kind() {
        CurveKind::Move => {}
        CurveKind::Line | CurveKind::Close => builder.line_to(op.end()),
        CurveKind::Quad => builder.quad_to(op.points()[1], op.end()),
        CurveKind::Cubic => builder.cubic_to(op.points()[1], op.points()[2], op.end()),
        CurveKind::Conic => builder.conic_to(op.points()[1], op.end(), op.weight()),
    }
}

fn emit_record_range(
    builder: &mut dyn PathBuilder,
    op: &CurveOp,
    record: &MeasureRecord,
    a: f32,
    b: f32,
    emit_start: bool,
) {
    use crate::flatten::FlattenReason;
    match record.reason {
        FlattenReason::Straight => {
            let p0 = record.start_point.lerp(record.end_point, local_u(record, a));
            let p1 = record.start_point.lerp(record.end_point, local_u(record, b));
            if emit_start {
                builder.move_to(p0);
            }
            builder.line_to(p1);
        }
        FlattenReason::Short => {
            let t0 = native_t(record, a);
            let t1 = native_t(record, b);
            let sub = op.sub_curve(t0, t1);
            if emit_start {
                builder.move_to(sub.start());
            }
            emit_tail(builder, &sub);
        }
    }
}

impl ContourContract for StandardContour {
    fn flags(&self) -> PathFlags {
        self.flags
    }

    fn bounds(&self) -> Option<RectF> {
        self.bounds
    }

    fn start_end(&self) -> (Vector2F, Vector2F) {
        (self.points[0], self.materialize(self.ops.len() - 1).end())
    }

    fn print(&self, out: &mut String) {
        crate::printer::print_ops(&self.materialized_ops(), out);
    }

    fn foreach(&self, _tolerance: f32, f: &mut dyn FnMut(CurveOp) -> bool) -> bool {
        for index in 0..self.ops.len() {
            if !f(self.materialize(index)) {
                return false;
            }
        }
        true
    }

    fn reverse(&self) -> Contour {
        let closed = self.flags.contains(PathFlags::CLOSED);
        let materialized = self.materialized_ops();
        let edges = &materialized[1..];
        let new_start = materialized.last().unwrap().end();

        let mut new_ops = Vec::with_capacity(materialized.len() + 1);
        new_ops.push(CurveOp::mv(new_start));
        for op in edges.iter().rev() {
            let mut reversed = op.reverse();
            if reversed.kind() == CurveKind::Close {
                reversed = CurveOp::line(reversed.start(), reversed.end());
            }
            new_ops.push(reversed);
        }
        if closed {
            let end_of_chain = new_ops.last().unwrap().end();
            new_ops.push(CurveOp::close(end_of_chain, new_start));
        }

        Contour::Standard(StandardContour::from_ops(new_ops))
    }

    fn init_measure(&self, tolerance: f32) -> (MeasureHandle, f32) {
        let table = self.build_table(tolerance);
        let length = table.length();
        (MeasureHandle::Standard(table), length)
    }

    fn point(&self, handle: &MeasureHandle, distance: f32, direction: Direction) -> (Vector2F, Vector2F) {
        point_impl(self, self.table(handle), distance, direction)
    }

    fn curvature(&self, handle: &MeasureHandle, distance: f32) -> (f32, Option<Vector2F>) {
        curvature_impl(self, self.table(handle), distance)
    }

    fn closest_point(
        &self,
        handle: &MeasureHandle,
        tolerance: f32,
        query: Vector2F,
        threshold: f32,
    ) -> Option<ClosestPoint> {
        closest_point_impl(self, self.table(handle), tolerance, query, threshold)
    }

    fn add_segment(
        &self,
        handle: &MeasureHandle,
        builder: &mut dyn PathBuilder,
        emit_move: bool,
        start: f32,
        end: f32,
    ) {
        add_segment_impl(self, self.table(handle), builder, emit_move, start, end)
    }

    fn winding(&self, handle: &MeasureHandle, query: Vector2F) -> i32 {
        winding_impl(self, self.table(handle), query)
    }
}

fn point_impl(contour: &StandardContour, table: &MeasureTable, distance: f32, direction: Direction) -> (Vector2F, Vector2F) {
    if table.is_empty() {
        return (contour.points[0], Vector2F::zero());
    }
    let distance = distance.max(0.0);
    let idx = table.find(distance);
    let record = &table.records()[idx];
    let at_seam = (distance - record.start).abs() <= crate::util::EPSILON;

    if direction == Direction::Start && at_seam {
        if idx > 0 {
            let prev = &table.records()[idx - 1];
            let op = contour.materialize(prev.op_index);
            return eval_record(&op, prev, 1.0);
        } else if contour.flags.contains(PathFlags::CLOSED) {
            let last = table.records().last().unwrap();
            let op = contour.materialize(last.op_index);
            return eval_record(&op, last, 1.0);
        }
    }

    let op = contour.materialize(record.op_index);
    eval_record(&op, record, local_u(record, distance))
}

fn curvature_impl(contour: &StandardContour, table: &MeasureTable, distance: f32) -> (f32, Option<Vector2F>) {
    if table.is_empty() {
        return (0.0, None);
    }
    let idx = table.find(distance.max(0.0));
    let record = &table.records()[idx];
    let op = contour.materialize(record.op_index);
    let t = record.start_param + (record.end_param - record.start_param) * local_u(record, distance.max(0.0));
    op.curvature(t)
}

fn closest_point_impl(
    contour: &StandardContour,
    table: &MeasureTable,
    tolerance: f32,
    query: Vector2F,
    threshold: f32,
) -> Option<ClosestPoint> {
    if table.is_empty() {
        return None;
    }
    let tolerance = sanitize_tolerance(tolerance);
    let mut threshold = threshold;
    let mut best: Option<ClosestPoint> = None;
    let mut last_point = contour.points[0];
    const STEP: f32 = 1.0 / 1024.0;

    for record in table.records() {
        let chord = LineSegment2F::new(last_point, record.end_point);
        let chord_t = chord.clamped_project(query);
        let chord_point = chord.sample(chord_t);
        let chord_dist = chord_point.distance_to(query);

        if chord_dist <= threshold + 1.0 {
            debug!(
                "closest_point_impl(): record [{}, {}] chord_dist {} threshold {}",
                record.start, record.end, chord_dist, threshold
            );
            let op = contour.materialize(record.op_index);
            let eval = |progress: f32| -> (Vector2F, f32) {
                let pos = eval_record(&op, record, progress).0;
                (pos, pos.distance_to(query))
            };

            let mut progress = chord_t;
            let (_, mut best_dist) = eval(progress);

            let mut p = progress;
            loop {
                let next = p + STEP;
                if next > 1.0 {
                    break;
                }
                let (_, d) = eval(next);
                if d < best_dist {
                    best_dist = d;
                    p = next;
                } else {
                    break;
                }
            }
            progress = p;
            let mut p = progress;
            loop {
                let prev = p - STEP;
                if prev < 0.0 {
                    break;
                }
                let (_, d) = eval(prev);
                if d < best_dist {
                    best_dist = d;
                    p = prev;
                } else {
                    break;
                }
            }
            progress = p;

            if best_dist <= threshold {
                let (position, _) = eval(progress);
                let t = record.start_param + (record.end_param - record.start_param) * progress;
                let (_, tangent) = op.sample(t);
                let offset = record.start + (record.end - record.start) * progress;
                let candidate = ClosestPoint {
                    distance: best_dist,
                    position,
                    offset,
                    tangent,
                };
                if best_dist <= tolerance {
                    return Some(candidate);
                }
                threshold = best_dist - tolerance;
                best = Some(candidate);
            }
        }

        last_point = record.end_point;
    }

    best
}

fn add_segment_impl(
    contour: &StandardContour,
    table: &MeasureTable,
    builder: &mut dyn PathBuilder,
    emit_move: bool,
    start: f32,
    end: f32,
) {
    if table.is_empty() {
        if emit_move {
            builder.move_to(contour.points[0]);
        }
        return;
    }
    let total = table.length();
    let start = start.max(0.0).min(total);
    let end = end.max(start).min(total);

    if (end - start).abs() <= crate::util::EPSILON {
        if emit_move {
            let (pos, _) = point_impl(contour, table, start, Direction::End);
            builder.move_to(pos);
        }
        return;
    }

    if start <= crate::util::EPSILON
        && end >= total - crate::util::EPSILON
        && contour.flags.contains(PathFlags::CLOSED)
    {
        if emit_move {
            builder.move_to(contour.points[0]);
        }
        for index in 1..contour.ops.len() {
            let op = contour.materialize(index);
            if op.kind() == CurveKind::Close {
                builder.close();
            } else {
                emit_tail(builder, &op);
            }
        }
        return;
    }

    let si = table.find(start);
    let ei = table.find(end);
    let mut first = true;
    for i in si..=ei {
        let record = &table.records()[i];
        let op = contour.materialize(record.op_index);
        let a = if i == si { start } else { record.start };
        let b = if i == ei { end } else { record.end };
        if (b - a).abs() <= 0.0 {
            continue;
        }
        emit_record_range(builder, &op, record, a, b, first && emit_move);
        first = false;
    }
}

fn winding_impl(contour: &StandardContour, table: &MeasureTable, query: Vector2F) -> i32 {
    let mut winding = 0;
    let mut a = contour.points[0];
    for record in table.records() {
        let b = record.end_point;
        winding += super::crossing(query, a, b);
        a = b;
    }
    winding += super::crossing(query, a, contour.points[0]);
    winding
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::vec2f;

    fn triangle() -> StandardContour {
        StandardContour::from_ops(vec![
            CurveOp::mv(vec2f(0.0, 0.0)),
            CurveOp::line(vec2f(0.0, 0.0), vec2f(10.0, 0.0)),
            CurveOp::line(vec2f(10.0, 0.0), vec2f(10.0, 10.0)),
            CurveOp::close(vec2f(10.0, 10.0), vec2f(0.0, 0.0)),
        ])
    }

    #[test]
    fn closed_flat_triangle_flags() {
        let tri = triangle();
        assert!(tri.flags().contains(PathFlags::CLOSED));
        assert!(tri.flags().contains(PathFlags::FLAT));
    }

    #[test]
    fn measure_length_matches_perimeter() {
        let tri = triangle();
        let (handle, length) = tri.init_measure(0.01);
        assert!((length - (10.0 + 10.0 + (200.0f32).sqrt())).abs() < 0.01);
        let (p, _) = tri.point(&handle, 0.0, Direction::End);
        assert!(p.approx_eq(vec2f(0.0, 0.0), 0.01));
    }

    #[test]
    fn winding_inside_vs_outside() {
        let tri = triangle();
        let (handle, _) = tri.init_measure(0.01);
        assert_eq!(tri.winding(&handle, vec2f(5.0, 1.0)), -1);
        assert_eq!(tri.winding(&handle, vec2f(-5.0, -5.0)), 0);
    }

    #[test]
    fn reverse_swaps_winding_sign() {
        let tri = triangle();
        let reversed = tri.reverse();
        let (fwd_handle, _) = tri.init_measure(0.01);
        let (rev_handle, _) = reversed.init_measure(0.01);
        let query = vec2f(5.0, 1.0);
        assert_eq!(tri.winding(&fwd_handle, query), -reversed.winding(&rev_handle, query));
    }

    #[test]
    fn add_segment_full_range_round_trips() {
        let tri = triangle();
        let (handle, length) = tri.init_measure(0.01);
        let mut builder = crate::builder::PathBuilderImpl::new();
        tri.add_segment(&handle, &mut builder, true, 0.0, length);
        let path = builder.free_to_path();
        assert_eq!(path.contours().len(), 1);
    }
}
