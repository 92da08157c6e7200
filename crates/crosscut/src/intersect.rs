//! Segment-segment intersection.
//!
//! Each segment is written in arc-length form, `start + v * t` with `v` the
//! unit direction, so the solved parameters come out as distances along each
//! segment rather than 0..1 fractions. The arrangement sorts chains by these
//! distances directly.

use crate::arrangement::Segment;
use crate::geometry::{Mat2, Point, solve};

/// Where two segments cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub point: Point,
    /// Distance from the first segment's start to `point`.
    pub t1: f64,
    /// Distance from the second segment's start to `point`.
    pub t2: f64,
}

/// Find where segment `a` crosses segment `b`.
///
/// Solves `v1 * t1 - v2 * t2 = b.start - a.start` by inverting the 2x2
/// direction matrix. Returns `None` when:
/// - either segment has zero length
/// - the directions are parallel or anti-parallel (singular matrix), which
///   includes colinear overlap
/// - the crossing lies outside either segment's extent
///
/// Endpoint touches count: both ranges are closed.
pub fn intersect(a: &Segment, b: &Segment) -> Option<Crossing> {
    intersect_points(a.start, a.end, b.start, b.end)
}

/// [`intersect`] on raw endpoints, for callers that have no stored segment.
pub fn intersect_points(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Crossing> {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let len1 = d1.length();
    let len2 = d2.length();

    // The arrangement rejects these up front; never divide by zero here.
    if len1 == 0.0 || len2 == 0.0 {
        return None;
    }

    let v1 = d1 / len1;
    let v2 = d2 / len2;

    let m = Mat2::from_columns(v1, -v2);
    let t = solve(m, b0 - a0)?;
    let (t1, t2) = (t.x, t.y);

    if !(0.0..=len1).contains(&t1) || !(0.0..=len2).contains(&t2) {
        return None;
    }

    Some(Crossing {
        point: a0 + v1 * t1,
        t1,
        t2,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn perpendicular_cross() {
        let hit = intersect_points(p(0.0, 0.0), p(4.0, 0.0), p(2.0, -2.0), p(2.0, 2.0)).unwrap();
        assert_eq!(hit.point, p(2.0, 0.0));
        assert_eq!(hit.t1, 2.0);
        assert_eq!(hit.t2, 2.0);
    }

    #[test]
    fn offsets_follow_argument_order() {
        // Same pair, swapped: t1 is now measured along the vertical segment
        let hit = intersect_points(p(2.0, -2.0), p(2.0, 6.0), p(0.0, 0.0), p(8.0, 0.0)).unwrap();
        assert!((hit.t1 - 2.0).abs() < 1e-12);
        assert!((hit.t2 - 2.0).abs() < 1e-12);
        assert!((hit.point.x - 2.0).abs() < 1e-12);
        assert!(hit.point.y.abs() < 1e-12);
    }

    #[test]
    fn offsets_are_distances_not_fractions() {
        let hit = intersect_points(p(0.0, 0.0), p(10.0, 0.0), p(7.0, -5.0), p(7.0, 5.0)).unwrap();
        assert!((hit.t1 - 7.0).abs() < 1e-12);
        assert!((hit.t2 - 5.0).abs() < 1e-12);
    }

    #[test]
    fn outside_extent_is_none() {
        // Crosses the infinite line of A, but past A's end
        assert!(intersect_points(p(0.0, 0.0), p(1.0, 0.0), p(2.0, -2.0), p(2.0, 2.0)).is_none());
        // Crosses the infinite line of B, but past B's end
        assert!(intersect_points(p(0.0, 0.0), p(4.0, 0.0), p(2.0, 1.0), p(2.0, 3.0)).is_none());
    }

    #[test]
    fn parallel_is_none() {
        assert!(intersect_points(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)).is_none());
    }

    #[test]
    fn anti_parallel_and_colinear_are_none() {
        assert!(intersect_points(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)).is_none());
        // Overlapping colinear segments are not reported either
        assert!(intersect_points(p(0.0, 0.0), p(4.0, 0.0), p(2.0, 0.0), p(6.0, 0.0)).is_none());
    }

    #[test]
    fn endpoint_touch_counts() {
        let hit = intersect_points(p(0.0, 0.0), p(4.0, 0.0), p(4.0, 0.0), p(4.0, 3.0)).unwrap();
        assert_eq!(hit.t1, 4.0);
        assert_eq!(hit.t2, 0.0);
    }

    #[test]
    fn zero_length_is_none() {
        assert!(intersect_points(p(1.0, 1.0), p(1.0, 1.0), p(0.0, 0.0), p(2.0, 2.0)).is_none());
        assert!(intersect_points(p(0.0, 0.0), p(2.0, 2.0), p(1.0, 1.0), p(1.0, 1.0)).is_none());
    }

    #[test]
    fn diagonal_cross() {
        let hit = intersect_points(p(0.0, 0.0), p(4.0, 4.0), p(0.0, 4.0), p(4.0, 0.0)).unwrap();
        assert!((hit.point.x - 2.0).abs() < 1e-9);
        assert!((hit.point.y - 2.0).abs() < 1e-9);
        let half_diag = (8.0f64).sqrt();
        assert!((hit.t1 - half_diag).abs() < 1e-9);
        assert!((hit.t2 - half_diag).abs() < 1e-9);
    }
}
