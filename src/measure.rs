//! The arc-length measure table: a sorted index over flattened chords
//! that turns "point at distance" into an O(log n) binary search.
//! `pathfinder_content` has no arc-length parameterization at all, so
//! this is new functionality, built directly on this crate's own
//! flatness-driven decomposition (`flatten.rs`).

use crate::curve::CurveOp;
use crate::flatten::{self, FlattenReason};
use crate::vector::Vector2F;

/// One entry of the measure table: a flattened chord plus the native
/// curve parameter range and owning op it covers.
#[derive(Clone, Copy, Debug)]
pub struct MeasureRecord {
    pub start: f32,
    pub end: f32,
    pub start_param: f32,
    pub end_param: f32,
    pub start_point: Vector2F,
    pub end_point: Vector2F,
    pub op_index: usize,
    pub reason: FlattenReason,
}

/// A built arc-length index over a `Standard` contour's ops.
#[derive(Clone, Debug, Default)]
pub struct MeasureTable {
    records: Vec<MeasureRecord>,
    length: f32,
}

impl MeasureTable {
    /// Builds a measure table by flattening every non-`Move` op of
    /// `ops` at `tolerance`, dropping zero-length chords.
    pub fn build(ops: &[CurveOp], tolerance: f32) -> MeasureTable {
        let mut records = Vec::new();
        let mut running = 0.0f32;
        let mut chords = Vec::new();

        for (op_index, op) in ops.iter().enumerate() {
            if op.kind() == crate::curve::CurveKind::Move {
                continue;
            }
            chords.clear();
            flatten::flatten(op, tolerance, &mut chords);
            for chord in &chords {
                let len = chord.from.distance_to(chord.to);
                if len <= 0.0 {
                    continue;
                }
                records.push(MeasureRecord {
                    start: running,
                    end: running + len,
                    start_param: chord.from_t,
                    end_param: chord.to_t,
                    start_point: chord.from,
                    end_point: chord.to,
                    op_index,
                    reason: chord.reason,
                });
                running += len;
            }
        }

        MeasureTable {
            records,
            length: running,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn records(&self) -> &[MeasureRecord] {
        &self.records
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Binary-searches for the record containing `distance`, clamping
    /// to the last record if `distance` exceeds the total length.
    pub fn find(&self, distance: f32) -> usize {
        debug_assert!(distance >= 0.0, "distance must be non-negative");
        if self.records.is_empty() {
            return 0;
        }
        if distance >= self.length {
            return self.records.len() - 1;
        }

        let (mut lo, mut hi) = (0usize, self.records.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let record = &self.records[mid];
            if record.end <= distance {
                lo = mid + 1;
            } else if record.start > distance {
                hi = mid;
            } else {
                return mid;
            }
        }
        lo.min(self.records.len() - 1)
    }
}

/// An owned measure handle, returned by `init_measure`.
/// `Rect`/`Circle` carry no data; `Standard` owns its table; `RoundedRect`
/// lazily builds an equivalent `Standard` contour and owns its handle.
#[derive(Clone, Debug)]
pub enum MeasureHandle {
    None,
    Standard(MeasureTable),
    RoundedRect {
        standard: Box<crate::contour::standard::StandardContour>,
        table: MeasureTable,
    },
}
