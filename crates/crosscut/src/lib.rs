//! # crosscut
//!
//! Incremental planar line-segment arrangement engine.
//!
//! Every inserted segment is tested against all earlier ones; each crossing
//! becomes a node of an append-only incidence graph, and closed loops in
//! that graph can be enumerated on demand.
//!
//! ## Rust Lesson #4: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod arrangement;
pub mod cycles;
pub mod geometry;
pub mod intersect;
pub mod planar;
pub mod session;
pub mod snap;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use arrangement::{
    Arrangement, ArrangementError, GraphEdge, InsertReport, Intersection, IntersectionId, Segment,
    SegmentId, Snapshot,
};
pub use cycles::{Cycle, CycleError, CycleLimits, EdgeDirection, Limit, find_cycles};
pub use geometry::{Mat2, Point};
pub use intersect::{Crossing, intersect};
pub use planar::{minimal_edges, redundant_edges};
pub use session::{Overlays, Session, SessionError};
pub use snap::{SnapAxis, SnapConfig, snap_to_axis};
pub use svg::{SvgError, extract_segments_from_svg};
