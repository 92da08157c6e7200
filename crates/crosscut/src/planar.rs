//! Optional clean-up of the incidence graph.
//!
//! Insertion only ever appends edges, so after a crossing is spliced
//! between two existing ones the graph still carries the old edge that
//! joined them directly, and the same pair can be linked more than once.
//! Consumers that want the plain subdivision (one edge per pair of
//! neighboring crossings) run this pass on demand; the arrangement itself
//! is never modified.

use std::collections::HashSet;

use crate::arrangement::{Arrangement, GraphEdge, IntersectionId};

/// Unordered key for an edge.
#[inline]
fn pair_key(a: IntersectionId, b: IntersectionId) -> (usize, usize) {
    if a <= b { (a.0, b.0) } else { (b.0, a.0) }
}

/// Pairs of crossings that are neighbors along at least one segment.
fn adjacent_pairs(arrangement: &Arrangement) -> HashSet<(usize, usize)> {
    let mut pairs = HashSet::new();
    for segment in arrangement.segments() {
        let chain = arrangement.chain(segment.id);
        for window in chain.windows(2) {
            pairs.insert(pair_key(window[0], window[1]));
        }
    }
    pairs
}

/// One edge per pair of neighboring crossings.
///
/// Edges are emitted segment by segment, in chain order, and point away
/// from the segment's start.
pub fn minimal_edges(arrangement: &Arrangement) -> Vec<GraphEdge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for segment in arrangement.segments() {
        let chain = arrangement.chain(segment.id);
        for window in chain.windows(2) {
            if seen.insert(pair_key(window[0], window[1])) {
                edges.push(GraphEdge::new(window[0], window[1]));
            }
        }
    }

    edges
}

/// Indices into [`Arrangement::graph`] of edges a minimal graph would not have.
///
/// An edge is redundant if it repeats a pair already linked earlier in the
/// list, or if its two crossings are no longer neighbors on any segment
/// (a later crossing was spliced between them).
pub fn redundant_edges(arrangement: &Arrangement) -> Vec<usize> {
    let adjacent = adjacent_pairs(arrangement);
    let mut seen = HashSet::new();

    arrangement
        .graph()
        .iter()
        .enumerate()
        .filter(|(_, edge)| {
            let key = pair_key(edge.from, edge.to);
            !adjacent.contains(&key) || !seen.insert(key)
        })
        .map(|(idx, _)| idx)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
