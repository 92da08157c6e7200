//! The controller a drawing shell talks to.
//!
//! A `Session` owns the arrangement plus the little bit of gesture state
//! the shell needs: where the current drag started and whether debug
//! overlays are on. Each completed drag is one insertion, run to
//! completion before the next event is handled.

use std::fmt;

use crate::arrangement::{
    Arrangement, ArrangementError, GraphEdge, InsertReport, Intersection, IntersectionId, Snapshot,
};
use crate::cycles::{Cycle, CycleError, CycleLimits, find_cycles};
use crate::geometry::Point;
use crate::snap::{SnapConfig, snap_to_axis};

/// Error type for drag handling.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// `end_drag` without a matching `begin_drag`.
    NoPendingDrag,
    /// The finished drag was refused by the arrangement.
    Arrangement(ArrangementError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoPendingDrag => write!(f, "drag ended without a start point"),
            SessionError::Arrangement(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Arrangement(e) => Some(e),
            SessionError::NoPendingDrag => None,
        }
    }
}

impl From<ArrangementError> for SessionError {
    fn from(e: ArrangementError) -> Self {
        SessionError::Arrangement(e)
    }
}

/// What the shell draws on top of the cuts when debugging.
#[derive(Debug, Clone, Copy)]
pub struct Overlays<'a> {
    pub intersections: &'a [Intersection],
    pub graph: &'a [GraphEdge],
}

/// Arrangement plus gesture state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    arrangement: Arrangement,
    snap: SnapConfig,
    pending: Option<Point>,
    debug: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snap(snap: SnapConfig) -> Self {
        Self {
            snap,
            ..Self::default()
        }
    }

    #[inline]
    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    #[inline]
    pub fn snap_config(&self) -> &SnapConfig {
        &self.snap
    }

    pub fn snapshot(&self) -> Snapshot {
        self.arrangement.snapshot()
    }

    /// Remember where a drag started. A second call replaces the first.
    pub fn begin_drag(&mut self, point: Point) {
        self.pending = Some(point);
    }

    #[inline]
    pub fn pending_start(&self) -> Option<Point> {
        self.pending
    }

    pub fn cancel_drag(&mut self) {
        self.pending = None;
    }

    /// End point a drag to `point` would commit, after snapping.
    ///
    /// Lets the shell preview the cut while the button is still held.
    pub fn preview_end(&self, point: Point, snap: bool) -> Option<Point> {
        let start = self.pending?;
        Some(if snap {
            snap_to_axis(start, point, &self.snap)
        } else {
            point
        })
    }

    /// Finish the drag at `point` and insert the cut.
    ///
    /// With `snap` set the end point goes through the axis snap first.
    /// The pending start is consumed either way, so a refused drag does not
    /// leak into the next one.
    pub fn end_drag(&mut self, point: Point, snap: bool) -> Result<InsertReport, SessionError> {
        let start = self.pending.take().ok_or(SessionError::NoPendingDrag)?;
        let end = if snap {
            snap_to_axis(start, point, &self.snap)
        } else {
            point
        };
        Ok(self.arrangement.insert(start, end)?)
    }

    /// Insert a cut directly, bypassing gesture state.
    pub fn cut(&mut self, start: Point, end: Point, snap: bool) -> Result<InsertReport, SessionError> {
        self.begin_drag(start);
        self.end_drag(end, snap)
    }

    #[inline]
    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, on: bool) {
        self.debug = on;
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    /// Intersections and graph edges, only while debugging is on.
    pub fn overlays(&self) -> Option<Overlays<'_>> {
        self.debug.then(|| Overlays {
            intersections: self.arrangement.intersections(),
            graph: self.arrangement.graph(),
        })
    }

    /// Loops through `start` in the current graph.
    pub fn find_cycles(
        &self,
        start: IntersectionId,
        limits: &CycleLimits,
    ) -> Result<Vec<Cycle>, CycleError> {
        if self.arrangement.intersection(start).is_none() {
            return Err(CycleError::UnknownStart(start));
        }
        find_cycles(self.arrangement.graph(), start, limits)
    }
}

// ============================================================================
// TESTS
// ============================================================================
