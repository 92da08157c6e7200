//! Common utilities shared across CLI commands.

use std::fs;

use serde::Serialize;
use crosscut::{GraphEdge, Point, Session, Snapshot, minimal_edges};

/// Output format for an arrangement.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Parse the value after a flag, exiting with a message if it is missing or bad.
pub fn parse_flag<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(raw) = args.get(i) else {
        eprintln!("Error: {} needs a value", flag);
        std::process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for {}: {}", flag, raw);
        std::process::exit(1);
    })
}

/// Axis-aligned bounds of every segment endpoint, as (min_x, min_y, max_x, max_y).
pub fn bounds(snapshot: &Snapshot) -> Option<(f64, f64, f64, f64)> {
    let mut points = snapshot.segments.iter().flat_map(|s| [s.start, s.end]);
    let first = points.next()?;

    let init = (first.x, first.y, first.x, first.y);
    Some(points.fold(init, |(x0, y0, x1, y1), p| {
        (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
    }))
}

/// Bounds grown by a margin, with a floor so a single axis-aligned cut
/// still gets a usable box.
pub fn padded_bounds(snapshot: &Snapshot) -> (f64, f64, f64, f64) {
    let Some((min_x, min_y, max_x, max_y)) = bounds(snapshot) else {
        return (0.0, 0.0, 100.0, 100.0);
    };
    let pad = ((max_x - min_x).max(max_y - min_y) * 0.05).max(1.0);
    (min_x - pad, min_y - pad, max_x + pad, max_y + pad)
}

fn point_of(snapshot: &Snapshot, id: crosscut::IntersectionId) -> Option<Point> {
    snapshot.intersections.get(id.index()).map(|ix| ix.point)
}

/// Render an arrangement as SVG.
///
/// Cuts are black. With `debug` set, graph edges are drawn in blue and
/// intersections as small red dots on top.
pub fn snapshot_to_svg(snapshot: &Snapshot, debug: bool) -> String {
    let (min_x, min_y, max_x, max_y) = padded_bounds(snapshot);
    let marker = ((max_x - min_x).max(max_y - min_y) * 0.005).max(0.1);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}">
<g id="cuts" stroke="black" stroke-width="{:.2}" fill="none">
"#,
        min_x,
        min_y,
        max_x - min_x,
        max_y - min_y,
        marker * 0.5
    ));

    for seg in &snapshot.segments {
        svg.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
            seg.start.x, seg.start.y, seg.end.x, seg.end.y
        ));
    }
    svg.push_str("</g>\n");

    if debug {
        svg.push_str(&format!(
            "<g id=\"graph\" stroke=\"blue\" stroke-width=\"{:.2}\" fill=\"none\">\n",
            marker * 0.5
        ));
        for edge in &snapshot.graph {
            let (Some(a), Some(b)) = (point_of(snapshot, edge.from), point_of(snapshot, edge.to))
            else {
                continue;
            };
            svg.push_str(&format!(
                "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
                a.x, a.y, b.x, b.y
            ));
        }
        svg.push_str("</g>\n");

        svg.push_str("<g id=\"intersections\" fill=\"red\">\n");
        for ix in &snapshot.intersections {
            svg.push_str(&format!(
                "  <circle id=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>\n",
                ix.id, ix.point.x, ix.point.y, marker
            ));
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

/// JSON output: the snapshot, plus the cleaned-up graph when debugging.
#[derive(Serialize)]
struct JsonArrangement<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimal_graph: Option<Vec<GraphEdge>>,
}

pub fn session_to_json(session: &Session, debug: bool) -> Result<String, String> {
    let snapshot = session.snapshot();
    let output = JsonArrangement {
        snapshot: &snapshot,
        minimal_graph: debug.then(|| minimal_edges(session.arrangement())),
    };
    serde_json::to_string_pretty(&output).map_err(|e| format!("Failed to serialize JSON: {}", e))
}

/// Render a session in the requested format.
pub fn render(session: &Session, format: OutputFormat, debug: bool) -> Result<String, String> {
    match format {
        OutputFormat::Svg => Ok(snapshot_to_svg(&session.snapshot(), debug)),
        OutputFormat::Json => session_to_json(session, debug),
    }
}

/// Write output to a file, or stdout for `None` / `-`.
pub fn write_output(output: &str, output_path: Option<&str>) -> Result<(), String> {
    match output_path {
        Some("-") | None => {
            println!("{}", output);
            Ok(())
        }
        Some(path) => {
            fs::write(path, output).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            eprintln!("Wrote: {}", path);
            Ok(())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn crossing_session() -> Session {
        let mut session = Session::new();
        session.cut(Point::new(0.0, 0.0), Point::new(10.0, 0.0), false).unwrap();
        session.cut(Point::new(2.0, -1.0), Point::new(2.0, 1.0), false).unwrap();
        session.cut(Point::new(8.0, -1.0), Point::new(8.0, 1.0), false).unwrap();
        session
    }

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::from_name("SVG"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("png"), None);
    }

    #[test]
    fn bounds_cover_endpoints() {
        let snapshot = crossing_session().snapshot();
        assert_eq!(bounds(&snapshot), Some((0.0, -1.0, 10.0, 1.0)));
        assert_eq!(bounds(&Snapshot::default()), None);
    }

    #[test]
    fn svg_has_cuts_only_without_debug() {
        let svg = snapshot_to_svg(&crossing_session().snapshot(), false);
        assert_eq!(svg.matches("<line").count(), 3);
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn svg_debug_overlays() {
        let svg = snapshot_to_svg(&crossing_session().snapshot(), true);
        // 3 cuts + 1 graph edge
        assert_eq!(svg.matches("<line").count(), 4);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("id=\"i1\""));
    }

    #[test]
    fn json_round_trips_snapshot() {
        let session = crossing_session();
        let json = session_to_json(&session, false).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session.snapshot());
        assert!(!json.contains("minimal_graph"));

        let debug = session_to_json(&session, true).unwrap();
        assert!(debug.contains("minimal_graph"));
    }
}
