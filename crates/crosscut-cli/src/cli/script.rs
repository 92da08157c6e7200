//! Drag scripts: a recorded sequence of mouse drags.
//!
//! Scripts are YAML files (or JSON when the extension is `.json`) that
//! replay drags through a [`Session`] exactly as the canvas would.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use crosscut::{Point, Session, SnapConfig};

/// A complete drag script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragScript {
    /// Slope threshold for axis snapping (default: 50)
    #[serde(default = "default_snap_ratio")]
    pub snap_ratio: f64,

    /// Drags in the order they were made
    #[serde(default)]
    pub drags: Vec<Drag>,
}

fn default_snap_ratio() -> f64 {
    SnapConfig::default().ratio
}

/// One mouse drag: button down at `from`, up at `to`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Drag {
    pub from: [f64; 2],
    pub to: [f64; 2],

    /// Snap modifier held on release
    #[serde(default)]
    pub snap: bool,
}

/// Counts from replaying a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub applied: usize,
    pub rejected: usize,
}

impl DragScript {
    /// Load a script, picking the parser from the file extension.
    pub fn load(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path, e))?;

        let is_json = Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let script: DragScript = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| format!("Failed to parse script {}: {}", path, e))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| format!("Failed to parse script {}: {}", path, e))?
        };

        script.validate().map_err(|e| format!("{}: {}", path, e))?;
        Ok(script)
    }

    /// Reject settings the snap policy cannot use.
    pub fn validate(&self) -> Result<(), String> {
        if self.snap_ratio.is_nan() || self.snap_ratio < 1.0 {
            return Err(format!("snap_ratio must be at least 1, got {}", self.snap_ratio));
        }
        Ok(())
    }

    /// A fresh session configured by this script.
    pub fn session(&self) -> Session {
        Session::with_snap(SnapConfig::with_ratio(self.snap_ratio))
    }

    /// Replay every drag into `session`.
    ///
    /// Refused drags are logged and skipped; the rest of the script still
    /// runs. `force_snap` holds the modifier for every drag.
    pub fn replay(&self, session: &mut Session, force_snap: bool) -> ReplayOutcome {
        let mut outcome = ReplayOutcome::default();

        for (idx, drag) in self.drags.iter().enumerate() {
            let from = Point::new(drag.from[0], drag.from[1]);
            let to = Point::new(drag.to[0], drag.to[1]);

            match session.cut(from, to, drag.snap || force_snap) {
                Ok(report) => {
                    tracing::debug!("drag {}: {} crossings", idx, report.crossing_count());
                    outcome.applied += 1;
                }
                Err(e) => {
                    tracing::warn!("drag {} skipped: {}", idx, e);
                    outcome.rejected += 1;
                }
            }
        }

        outcome
    }
}

// ============================================================================
// TESTS
// ============================================================================
