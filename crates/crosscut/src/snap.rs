//! Axis snapping for freshly drawn cuts.
//!
//! When the shell's snap modifier is held, a drag that is almost vertical
//! or almost horizontal is straightened before it is inserted. The end
//! point moves; the start point and the drawn length stay put.

use crate::geometry::Point;

/// Configuration for axis snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    /// Slope magnitude above which a drag counts as vertical. Its
    /// reciprocal is the horizontal threshold, so the two cases never
    /// overlap and mirror each other under swapping axes. Must be at
    /// least 1; below that the thresholds cross.
    /// Default: 50.0
    pub ratio: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { ratio: 50.0 }
    }
}

impl SnapConfig {
    /// Ratios below 1 (and NaN) are raised to 1.
    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio: ratio.max(1.0),
        }
    }
}

/// Which axis a drag would snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapAxis {
    None,
    Vertical,
    Horizontal,
}

/// Decide which axis, if any, the drag from `start` to `end` snaps to.
///
/// A zero-length drag has an undefined slope and never snaps.
pub fn classify(start: Point, end: Point, config: &SnapConfig) -> SnapAxis {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    // dx == 0 gives an infinite slope, which is vertical
    let slope = (dy / dx).abs();

    if slope > config.ratio {
        SnapAxis::Vertical
    } else if slope < 1.0 / config.ratio {
        SnapAxis::Horizontal
    } else {
        SnapAxis::None
    }
}

/// Return the end point after snapping.
///
/// The snapped segment keeps the drawn Euclidean length and the direction
/// of travel along the kept axis.
pub fn snap_to_axis(start: Point, end: Point, config: &SnapConfig) -> Point {
    let delta = end - start;
    let length = delta.length();

    match classify(start, end, config) {
        SnapAxis::Vertical => Point::new(start.x, start.y + delta.y.signum() * length),
        SnapAxis::Horizontal => Point::new(start.x + delta.x.signum() * length, start.y),
        SnapAxis::None => end,
    }
}

// ============================================================================
// TESTS
// ============================================================================
