//! SVG import - turn the strokes of a drawing into cuts.
//!
//! Uses usvg to resolve the document (CSS, shapes, transforms) and walks
//! the tree, emitting every straight edge of every path.
//!
//! ## Curve Flattening
//!
//! The arrangement only knows straight segments, so Bézier curves are
//! flattened with lyon_geom first. Each flattened piece becomes its own cut.

use crate::geometry::Point;
use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use usvg::tiny_skia_path::{PathSegment, Transform};

/// Error type for SVG import.
///
/// ## Rust Lesson #8: Error Handling
///
/// Rust uses `Result<T, E>` instead of exceptions:
/// - `Ok(value)` = success
/// - `Err(error)` = failure
///
/// An error is just a value. Implementing `Display` and
/// `std::error::Error` lets callers print it or box it like any other.
#[derive(Debug)]
pub enum SvgError {
    ParseError(String),
    NoSegments,
}

impl std::fmt::Display for SvgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SvgError::ParseError(msg) => write!(f, "SVG parse error: {}", msg),
            SvgError::NoSegments => write!(f, "No line segments found in SVG"),
        }
    }
}

impl std::error::Error for SvgError {}

/// Tolerance for curve flattening, in user units.
const CURVE_TOLERANCE: f32 = 0.1;

/// Points closer than this on both axes count as the same point.
const DEDUP_EPSILON: f64 = 1e-6;

/// Extract every straight edge from an SVG document, in document order.
///
/// ## Rust Lesson #9: The ? Operator
///
/// `expression?` is sugar for:
/// ```text
/// match expression {
///     Ok(v) => v,
///     Err(e) => return Err(e.into()),
/// }
/// ```
/// `map_err` first turns usvg's error into ours so the types line up.
pub fn extract_segments_from_svg(svg_content: &str) -> Result<Vec<(Point, Point)>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut segments = Vec::new();
    extract_from_group(tree.root(), &mut segments);

    tracing::debug!("svg import: {} segments", segments.len());

    if segments.is_empty() {
        Err(SvgError::NoSegments)
    } else {
        Ok(segments)
    }
}

fn extract_from_group(group: &usvg::Group, segments: &mut Vec<(Point, Point)>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, segments),
            usvg::Node::Path(path) => path_segments(path, segments),
            // Text and images carry no cuts
            _ => {}
        }
    }
}

/// Map a local path point through the path's absolute transform.
fn to_world(ts: &Transform, x: f32, y: f32) -> Point {
    Point::new(
        (ts.sx * x + ts.kx * y + ts.tx) as f64,
        (ts.ky * x + ts.sy * y + ts.ty) as f64,
    )
}

/// Append the edges of one subpath, plus the closing edge if asked.
fn flush_subpath(points: &mut Vec<Point>, closed: bool, segments: &mut Vec<(Point, Point)>) {
    points.dedup_by(|a, b| {
        (a.x - b.x).abs() < DEDUP_EPSILON && (a.y - b.y).abs() < DEDUP_EPSILON
    });

    for pair in points.windows(2) {
        segments.push((pair[0], pair[1]));
    }

    if closed && points.len() >= 3 {
        let first = points[0];
        let last = points[points.len() - 1];
        if first.distance(last) > DEDUP_EPSILON {
            segments.push((last, first));
        }
    }

    points.clear();
}

fn path_segments(path: &usvg::Path, segments: &mut Vec<(Point, Point)>) {
    let ts = path.abs_transform();
    let mut points: Vec<Point> = Vec::new();
    let mut last: Option<(f32, f32)> = None;
    let mut subpath_start: Option<(f32, f32)> = None;

    for cmd in path.data().segments() {
        match cmd {
            PathSegment::MoveTo(p) => {
                flush_subpath(&mut points, false, segments);
                points.push(to_world(&ts, p.x, p.y));
                last = Some((p.x, p.y));
                subpath_start = last;
            }
            PathSegment::LineTo(p) => {
                points.push(to_world(&ts, p.x, p.y));
                last = Some((p.x, p.y));
            }
            PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |piece| {
                        points.push(to_world(&ts, piece.to.x, piece.to.y));
                    });
                } else {
                    points.push(to_world(&ts, p.x, p.y));
                }
                last = Some((p.x, p.y));
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |piece| {
                        points.push(to_world(&ts, piece.to.x, piece.to.y));
                    });
                } else {
                    points.push(to_world(&ts, p.x, p.y));
                }
                last = Some((p.x, p.y));
            }
            PathSegment::Close => {
                let start = points.first().copied();
                flush_subpath(&mut points, true, segments);
                // A segment after Z without a MoveTo restarts at the subpath start
                if let Some(start) = start {
                    points.push(start);
                }
                last = subpath_start;
            }
        }
    }

    flush_subpath(&mut points, false, segments);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_gives_four_edges() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect x="10" y="10" width="80" height="80"/>
            </svg>
        "#;

        let segments = extract_segments_from_svg(svg).unwrap();
        assert_eq!(segments.len(), 4);
        // Closed: the last edge returns to the first point
        assert_eq!(segments[3].1, segments[0].0);
    }

    #[test]
    fn open_polyline() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M 0,0 L 10,0 L 10,10" fill="none" stroke="black"/>
            </svg>
        "#;

        let segments = extract_segments_from_svg(svg).unwrap();
        assert_eq!(
            segments,
            vec![
                (Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
                (Point::new(10.0, 0.0), Point::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn duplicate_points_dropped() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M 0,0 L 10,0 L 10,0 L 20,0" fill="none" stroke="black"/>
            </svg>
        "#;

        let segments = extract_segments_from_svg(svg).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn two_subpaths_stay_separate() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M 0,0 L 10,0 M 0,5 L 10,5" fill="none" stroke="black"/>
            </svg>
        "#;

        let segments = extract_segments_from_svg(svg).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].0, Point::new(0.0, 5.0));
    }

    #[test]
    fn group_transform_applied() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <g transform="translate(10,0)">
                    <path d="M 0,0 L 10,0" fill="none" stroke="black"/>
                </g>
            </svg>
        "#;

        let segments = extract_segments_from_svg(svg).unwrap();
        assert_eq!(segments, vec![(Point::new(10.0, 0.0), Point::new(20.0, 0.0))]);
    }

    #[test]
    fn curve_is_flattened() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M 10,10 C 40,10 60,90 90,90" fill="none" stroke="black"/>
            </svg>
        "#;

        let segments = extract_segments_from_svg(svg).unwrap();
        assert!(segments.len() > 5,
            "Bézier should flatten to many segments, got {}",
            segments.len());
        // Pieces chain end to start
        for pair in segments.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn empty_document() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
            </svg>
        "#;

        assert!(matches!(extract_segments_from_svg(svg), Err(SvgError::NoSegments)));
    }

    #[test]
    fn invalid_document() {
        let result = extract_segments_from_svg("this is not svg");
        assert!(matches!(result, Err(SvgError::ParseError(_))));
    }
}
