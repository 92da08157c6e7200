//! The arrangement store: segments, their crossings, and the incidence graph.
//!
//! All three lists are append-only. A segment's id is its position in
//! `segments` at the time it was inserted, an intersection's id is its
//! position in `intersections`, and nothing is ever removed or renumbered,
//! so ids handed to the shell stay valid for the whole session.
//!
//! ## Insertion
//!
//! 1. Store the new segment under the next id
//! 2. Intersect it against every earlier segment
//! 3. Link the new crossings to each other in order along the new segment
//! 4. Splice each crossing into the chain of the segment it crossed,
//!    linking it to its new neighbors there
//! 5. Commit the crossings
//!
//! Splicing never removes the edge that used to join the two neighbors, so
//! after a crossing lands between two existing ones the graph carries a
//! "long" edge next to the two short ones. See [`crate::planar`] for a pass
//! that drops those.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::intersect::intersect;

// ============================================================================
// HANDLES
// ============================================================================
//
// ## Rust Lesson #5: Newtypes
//
// Segment ids and intersection ids are both just integers, and in JS it is
// easy to pass one where the other was meant. Wrapping each in its own
// one-field struct costs nothing at runtime, but the compiler now refuses
// `chain(intersection_id)`.

/// Stable handle of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub usize);

/// Stable handle of an intersection (a graph node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntersectionId(pub usize);

impl SegmentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl IntersectionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.0)
    }
}

// ============================================================================
// DATA
// ============================================================================

/// A committed cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub start: Point,
    pub end: Point,
}

/// A crossing between a newly inserted segment and an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub id: IntersectionId,
    pub point: Point,
    /// The segment whose insertion created this crossing.
    pub segment1: SegmentId,
    /// The earlier segment it crossed.
    pub segment2: SegmentId,
    /// Distance from `segment1`'s start.
    pub t1: f64,
    /// Distance from `segment2`'s start.
    pub t2: f64,
}

/// A link between two crossings that are adjacent along some segment.
///
/// Undirected in meaning; `from` is whichever end the insertion step wrote
/// first. Duplicates are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: IntersectionId,
    pub to: IntersectionId,
}

impl Segment {
    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Unit direction from start to end.
    #[inline]
    pub fn direction(&self) -> Point {
        (self.end - self.start) / self.length()
    }

}

impl Intersection {
    /// Distance along `segment` if this crossing lies on it.
    pub fn t_along(&self, segment: SegmentId) -> Option<f64> {
        if self.segment1 == segment {
            Some(self.t1)
        } else if self.segment2 == segment {
            Some(self.t2)
        } else {
            None
        }
    }

    #[inline]
    pub fn lies_on(&self, segment: SegmentId) -> bool {
        self.segment1 == segment || self.segment2 == segment
    }
}

impl GraphEdge {
    #[inline]
    pub fn new(from: IntersectionId, to: IntersectionId) -> Self {
        Self { from, to }
    }

    /// True if the edge joins `a` and `b`, in either direction.
    #[inline]
    pub fn connects(&self, a: IntersectionId, b: IntersectionId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The end that is not `node`, if `node` is an end at all.
    #[inline]
    pub fn other(&self, node: IntersectionId) -> Option<IntersectionId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a segment was refused.
///
/// A refused segment leaves the arrangement untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrangementError {
    /// A coordinate was NaN or infinite.
    NonFinite { start: Point, end: Point },
    /// Start and end coincide.
    Degenerate { at: Point },
}

impl fmt::Display for ArrangementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrangementError::NonFinite { start, end } => write!(
                f,
                "segment ({}, {}) -> ({}, {}) has a non-finite coordinate",
                start.x, start.y, end.x, end.y
            ),
            ArrangementError::Degenerate { at } => {
                write!(f, "zero-length segment at ({}, {})", at.x, at.y)
            }
        }
    }
}

impl std::error::Error for ArrangementError {}

// ============================================================================
// ARRANGEMENT
// ============================================================================

/// What one insertion added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReport {
    pub segment: SegmentId,
    /// Ids of the new intersections.
    pub intersections: Range<usize>,
    /// Indices of the new edges in [`Arrangement::graph`].
    pub edges: Range<usize>,
}

impl InsertReport {
    pub fn intersection_ids(&self) -> impl Iterator<Item = IntersectionId> + '_ {
        self.intersections.clone().map(IntersectionId)
    }

    #[inline]
    pub fn crossing_count(&self) -> usize {
        self.intersections.len()
    }
}

/// Owned copy of the whole state, for the rendering shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub segments: Vec<Segment>,
    pub intersections: Vec<Intersection>,
    pub graph: Vec<GraphEdge>,
}

/// Segments, crossings and the incidence graph, grown one cut at a time.
#[derive(Debug, Clone, Default)]
pub struct Arrangement {
    segments: Vec<Segment>,
    intersections: Vec<Intersection>,
    graph: Vec<GraphEdge>,
}

impl Arrangement {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    #[inline]
    pub fn graph(&self) -> &[GraphEdge] {
        &self.graph
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.index())
    }

    #[inline]
    pub fn intersection(&self, id: IntersectionId) -> Option<&Intersection> {
        self.intersections.get(id.index())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Crossings on `segment`, nearest its start first.
    ///
    /// Crossings at the same distance are ordered by id.
    pub fn chain(&self, segment: SegmentId) -> Vec<IntersectionId> {
        let mut chain: Vec<(f64, IntersectionId)> = self
            .intersections
            .iter()
            .filter_map(|ix| ix.t_along(segment).map(|t| (t, ix.id)))
            .collect();
        chain.sort_by(chain_order);
        chain.into_iter().map(|(_, id)| id).collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.segments.clone(),
            intersections: self.intersections.clone(),
            graph: self.graph.clone(),
        }
    }

    /// Add a cut from `start` to `end`.
    ///
    /// Refuses non-finite or zero-length input before touching any state.
    pub fn insert(&mut self, start: Point, end: Point) -> Result<InsertReport, ArrangementError> {
        if !start.is_finite() || !end.is_finite() {
            tracing::warn!("insert: refusing non-finite segment");
            return Err(ArrangementError::NonFinite { start, end });
        }
        if (end - start).length() == 0.0 {
            tracing::warn!("insert: refusing zero-length segment at ({}, {})", start.x, start.y);
            return Err(ArrangementError::Degenerate { at: start });
        }

        let id = SegmentId(self.segments.len());
        let segment = Segment { id, start, end };
        let first_ix = self.intersections.len();
        let first_edge = self.graph.len();

        // Crossings against every earlier segment, ids continuing the store
        let mut pending: Vec<Intersection> = Vec::new();
        for other in &self.segments {
            if let Some(hit) = intersect(&segment, other) {
                pending.push(Intersection {
                    id: IntersectionId(first_ix + pending.len()),
                    point: hit.point,
                    segment1: id,
                    segment2: other.id,
                    t1: hit.t1,
                    t2: hit.t2,
                });
            }
        }
        self.segments.push(segment);

        // The new segment's own chain is built from scratch
        let mut along_new: Vec<(f64, IntersectionId)> =
            pending.iter().map(|ix| (ix.t1, ix.id)).collect();
        along_new.sort_by(chain_order);
        for pair in along_new.windows(2) {
            self.graph.push(GraphEdge::new(pair[0].1, pair[1].1));
        }

        for ix in &pending {
            self.splice(ix);
        }

        self.intersections.extend(pending);

        tracing::debug!(
            "insert: segment {} crossed {} segments, {} new edges",
            id,
            self.intersections.len() - first_ix,
            self.graph.len() - first_edge
        );

        #[cfg(debug_assertions)]
        self.check_integrity();

        Ok(InsertReport {
            segment: id,
            intersections: first_ix..self.intersections.len(),
            edges: first_edge..self.graph.len(),
        })
    }

    /// Wire an uncommitted crossing to its neighbors on the earlier segment.
    ///
    /// ## Rust Lesson #6: Borrowing While Mutating
    ///
    /// `ix` is borrowed from the caller's `pending` list, not from `self`,
    /// so reading it while pushing onto `self.graph` is fine. Had it been a
    /// reference into `self.intersections`, the compiler would reject the
    /// push: you cannot hold `&self.x` across `&mut self.y` through `&mut self`.
    fn splice(&mut self, ix: &Intersection) {
        let crossed = ix.segment2;

        let mut chain: Vec<(f64, IntersectionId)> = self
            .intersections
            .iter()
            .chain(std::iter::once(ix))
            .filter_map(|c| c.t_along(crossed).map(|t| (t, c.id)))
            .collect();
        chain.sort_by(chain_order);

        let Some(j) = chain.iter().position(|&(_, id)| id == ix.id) else {
            return;
        };

        if j > 0 {
            self.graph.push(GraphEdge::new(chain[j - 1].1, ix.id));
        }
        if j + 1 < chain.len() {
            self.graph.push(GraphEdge::new(ix.id, chain[j + 1].1));
        }

        tracing::trace!(
            "splice: {} at position {} of {} on {}",
            ix.id,
            j,
            chain.len(),
            crossed
        );
    }

    #[cfg(debug_assertions)]
    fn check_integrity(&self) {
        for (idx, seg) in self.segments.iter().enumerate() {
            debug_assert_eq!(seg.id.index(), idx, "Segment {} stored at index {}", seg.id, idx);
        }
        for (idx, ix) in self.intersections.iter().enumerate() {
            debug_assert_eq!(ix.id.index(), idx, "Intersection {} stored at index {}", ix.id, idx);
            debug_assert!(
                ix.segment1 != ix.segment2,
                "Intersection {} crosses segment {} with itself",
                ix.id,
                ix.segment1
            );
            debug_assert!(
                ix.segment2 < ix.segment1 && ix.segment1.0 < self.segments.len(),
                "Intersection {} references {} / {} out of order",
                ix.id,
                ix.segment1,
                ix.segment2
            );
        }
        for (idx, edge) in self.graph.iter().enumerate() {
            debug_assert!(
                edge.from.0 < self.intersections.len() && edge.to.0 < self.intersections.len(),
                "Edge {} references a missing intersection: {} -> {}",
                idx,
                edge.from,
                edge.to
            );
            let (from, to) = (&self.intersections[edge.from.index()], &self.intersections[edge.to.index()]);
            debug_assert!(
                to.lies_on(from.segment1) || to.lies_on(from.segment2),
                "Edge {} joins {} and {}, which share no segment",
                idx,
                edge.from,
                edge.to
            );
        }
    }
}

/// Order chain entries by distance, then by id.
///
/// `+ 0.0` folds `-0.0` into `0.0` so an endpoint touch computed as `-0.0`
/// does not sort ahead of one computed as `0.0`.
fn chain_order(a: &(f64, IntersectionId), b: &(f64, IntersectionId)) -> Ordering {
    (a.0 + 0.0)
        .total_cmp(&(b.0 + 0.0))
        .then_with(|| a.1.cmp(&b.1))
}

// ============================================================================
// TESTS
// ============================================================================
