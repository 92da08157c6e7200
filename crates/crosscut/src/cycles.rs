//! Closed-loop enumeration over the incidence graph.
//!
//! Finds every simple walk that leaves a start node and comes back to it.
//! The search is bounded three ways (emitted loops, path depth, total
//! work), so a dense graph degrades into a truncated answer instead of
//! freezing the caller's event loop.
//!
//! ## Rust Lesson #7: Explicit Stacks vs Recursion
//!
//! The obvious way to write a depth-first search is a recursive function.
//! Rust has no tail calls and the native stack is small, so deep recursion
//! can overflow and abort the whole program. Keeping the pending work in a
//! `Vec` used as a stack gives the same visiting order, lives on the heap,
//! and lets us count and stop the work at any point.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arrangement::{GraphEdge, IntersectionId};

/// How stored edges are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// Only `from -> to`, as stored.
    #[default]
    Directed,
    /// Both ways. Every loop is then reported once per orientation.
    Undirected,
}

/// Bounds on a cycle search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleLimits {
    /// Most loops to report.
    /// Default: 1024
    pub max_paths: usize,
    /// Most nodes on a partial path, start included.
    /// Default: 256
    pub max_depth: usize,
    /// Most partial paths to expand.
    /// Default: 100_000
    pub max_steps: usize,
    pub direction: EdgeDirection,
}

impl Default for CycleLimits {
    fn default() -> Self {
        Self {
            max_paths: 1024,
            max_depth: 256,
            max_steps: 100_000,
            direction: EdgeDirection::Directed,
        }
    }
}

impl CycleLimits {
    pub fn with_direction(direction: EdgeDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }
}

/// A closed walk: first and last node are the start node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle(pub Vec<IntersectionId>);

impl Cycle {
    #[inline]
    pub fn nodes(&self) -> &[IntersectionId] {
        &self.0
    }

    /// Number of edges walked.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which bound stopped a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Paths(usize),
    Depth(usize),
    Steps(usize),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Paths(n) => write!(f, "more than {} loops", n),
            Limit::Depth(n) => write!(f, "paths longer than {} nodes", n),
            Limit::Steps(n) => write!(f, "more than {} expansions", n),
        }
    }
}

/// Error type for cycle searches.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleError {
    /// The start node does not exist.
    UnknownStart(IntersectionId),
    /// A bound was hit. `partial` holds every loop found before stopping.
    Truncated { partial: Vec<Cycle>, limit: Limit },
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleError::UnknownStart(id) => write!(f, "no intersection {}", id),
            CycleError::Truncated { partial, limit } => write!(
                f,
                "cycle search truncated at {} ({} loops found)",
                limit,
                partial.len()
            ),
        }
    }
}

impl std::error::Error for CycleError {}

impl CycleError {
    /// Loops found before the search stopped, if any.
    pub fn partial(&self) -> &[Cycle] {
        match self {
            CycleError::Truncated { partial, .. } => partial,
            CycleError::UnknownStart(_) => &[],
        }
    }
}

/// A path under construction, with its own visited set.
struct PartialPath {
    nodes: Vec<IntersectionId>,
    visited: HashSet<IntersectionId>,
}

impl PartialPath {
    fn new(start: IntersectionId) -> Self {
        Self {
            nodes: vec![start],
            visited: HashSet::from([start]),
        }
    }

    fn extended(&self, next: IntersectionId) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(next);
        let mut visited = self.visited.clone();
        visited.insert(next);
        Self { nodes, visited }
    }

    fn closed(&self, start: IntersectionId) -> Cycle {
        let mut nodes = self.nodes.clone();
        nodes.push(start);
        Cycle(nodes)
    }
}

/// Neighbor lists, sorted and de-duplicated so parallel edges do not
/// produce repeated loops.
fn adjacency(graph: &[GraphEdge], direction: EdgeDirection) -> Vec<Vec<IntersectionId>> {
    let size = graph
        .iter()
        .map(|e| e.from.0.max(e.to.0) + 1)
        .max()
        .unwrap_or(0);

    let mut adj: Vec<Vec<IntersectionId>> = vec![Vec::new(); size];
    for edge in graph {
        adj[edge.from.0].push(edge.to);
        if direction == EdgeDirection::Undirected {
            adj[edge.to.0].push(edge.from);
        }
    }
    for list in &mut adj {
        list.sort();
        list.dedup();
    }
    adj
}

/// Enumerate the loops through `start`.
///
/// A path is reported when one of its edges leads back to `start`; edges
/// into any other node already on the path are not followed, so the search
/// terminates on every graph, including ones with loops that avoid `start`.
/// Loops come out in depth-first order, lower node ids first.
///
/// In undirected mode a loop needs at least three distinct nodes; walking
/// one edge out and back does not count.
///
/// A start node that no edge touches simply has no loops.
pub fn find_cycles(
    graph: &[GraphEdge],
    start: IntersectionId,
    limits: &CycleLimits,
) -> Result<Vec<Cycle>, CycleError> {
    let adj = adjacency(graph, limits.direction);
    let min_nodes = match limits.direction {
        EdgeDirection::Directed => 2,
        EdgeDirection::Undirected => 3,
    };

    let mut cycles: Vec<Cycle> = Vec::new();
    let mut stack = vec![PartialPath::new(start)];
    let mut steps = 0usize;
    let mut depth_hit = false;

    while let Some(path) = stack.pop() {
        steps += 1;
        if steps > limits.max_steps {
            return Err(truncated(cycles, Limit::Steps(limits.max_steps)));
        }

        let Some(&current) = path.nodes.last() else {
            continue;
        };
        let neighbors = adj.get(current.0).map(Vec::as_slice).unwrap_or(&[]);

        let mut extensions = Vec::new();
        for &next in neighbors {
            if next == start {
                if path.nodes.len() >= min_nodes {
                    if cycles.len() == limits.max_paths {
                        return Err(truncated(cycles, Limit::Paths(limits.max_paths)));
                    }
                    cycles.push(path.closed(start));
                }
                continue;
            }
            if path.visited.contains(&next) {
                continue;
            }
            if path.nodes.len() >= limits.max_depth {
                depth_hit = true;
                continue;
            }
            extensions.push(next);
        }

        // Reversed so the lowest neighbor is expanded first
        for &next in extensions.iter().rev() {
            stack.push(path.extended(next));
        }
    }

    if depth_hit {
        return Err(truncated(cycles, Limit::Depth(limits.max_depth)));
    }

    tracing::debug!(
        "find_cycles: {} loops through {} in {} steps",
        cycles.len(),
        start,
        steps
    );
    Ok(cycles)
}

fn truncated(partial: Vec<Cycle>, limit: Limit) -> CycleError {
    tracing::warn!(
        "find_cycles: stopped at {}, returning {} loops",
        limit,
        partial.len()
    );
    CycleError::Truncated { partial, limit }
}

// ============================================================================
// TESTS
// ============================================================================
