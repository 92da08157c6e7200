//! Integration tests for crosscut CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crosscut"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn help_lists_commands() {
    let output = run(&["help"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    for command in ["replay", "import", "cycles", "benchmark"] {
        assert!(stderr.contains(command), "usage should mention '{}'", command);
    }
}

#[test]
fn replay_produces_svg() {
    let output = run(&["replay", &fixture("grid.yaml")]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert_eq!(stdout.matches("<line").count(), 4, "One line per cut");
    assert!(!stdout.contains("<circle"), "No overlays without --debug");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn replay_debug_draws_overlays() {
    let output = run(&["replay", &fixture("grid.yaml"), "--debug"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("<circle").count(), 4);
    assert!(stdout.contains("id=\"graph\""));
}

#[test]
fn replay_produces_json() {
    let output = run(&["replay", &fixture("grid.yaml"), "-f", "json"]);
    assert!(output.status.success());

    let value = json(&output);
    assert_eq!(value["segments"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["intersections"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["graph"].as_array().map(Vec::len), Some(4));
    assert!(value.get("minimal_graph").is_none());
}

#[test]
fn json_script_keeps_long_edge() {
    let output = run(&["replay", &fixture("splice.json"), "-f", "json", "--debug"]);
    assert!(output.status.success());

    let value = json(&output);
    // Splicing the middle crossing appends two edges and keeps the old one
    assert_eq!(value["graph"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["minimal_graph"].as_array().map(Vec::len), Some(2));
}

#[test]
fn replay_honors_snap_flags() {
    let output = run(&["replay", &fixture("snap.yaml"), "-f", "json"]);
    assert!(output.status.success());

    let value = json(&output);
    assert_eq!(value["segments"][0]["end"]["y"].as_f64(), Some(0.0));
    // The second drag is steep but not steep enough to snap
    assert_eq!(value["segments"][1]["end"]["x"].as_f64(), Some(51.0));
    assert_eq!(value["intersections"].as_array().map(Vec::len), Some(1));
}

#[test]
fn replay_writes_output_file() {
    let mut out = std::env::temp_dir();
    out.push(format!("crosscut-replay-{}.svg", std::process::id()));
    let out_str = out.to_string_lossy().into_owned();

    let output = run(&["replay", &fixture("grid.yaml"), "-o", &out_str]);
    assert!(output.status.success());

    let written = std::fs::read_to_string(&out).expect("output file should exist");
    assert!(written.contains("<svg"));
    let _ = std::fs::remove_file(&out);
}

#[test]
fn replay_missing_script_fails() {
    let output = run(&["replay", &fixture("does-not-exist.yaml")]);
    assert!(!output.status.success());
}

#[test]
fn cycles_undirected_grid() {
    let output = run(&["cycles", &fixture("grid.yaml"), "--start", "0", "--undirected"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["i0 -> i1 -> i3 -> i2 -> i0", "i0 -> i2 -> i3 -> i1 -> i0"]);
}

#[test]
fn cycles_directed_grid_is_empty() {
    let output = run(&["cycles", &fixture("grid.yaml"), "--start", "i0"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn cycles_truncated_still_succeeds() {
    let output = run(&[
        "cycles", &fixture("grid.yaml"), "--start", "0", "--undirected", "--max-paths", "1",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stderr.contains("Warning"), "truncation should warn, got: {}", stderr);
}

#[test]
fn cycles_unknown_start_fails() {
    let output = run(&["cycles", &fixture("grid.yaml"), "--start", "99"]);
    assert!(!output.status.success());
}

#[test]
fn import_svg_edges() {
    let output = run(&["import", &fixture("square.svg"), "-f", "json"]);
    assert!(output.status.success());

    let value = json(&output);
    // Four rectangle edges plus the horizontal path
    assert_eq!(value["segments"].as_array().map(Vec::len), Some(5));
    // The path crosses both vertical sides
    let crossings = value["intersections"].as_array().map(Vec::len).unwrap_or(0);
    assert!(crossings >= 2, "expected at least 2 intersections, got {}", crossings);
}

#[test]
fn benchmark_command_runs() {
    let output = run(&["benchmark", "-n", "50", "--seed", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CROSSCUT BENCHMARK"));
    assert!(stdout.contains("Intersections:"));
}

#[test]
fn benchmark_is_deterministic() {
    let first = run(&["benchmark", "-n", "40", "--seed", "11"]);
    let second = run(&["benchmark", "-n", "40", "--seed", "11"]);

    let counts = |out: &Output| -> String {
        String::from_utf8_lossy(&out.stdout)
            .lines()
            .filter(|l| l.contains("Intersections:") || l.contains("Graph edges:"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(counts(&first), counts(&second));
}

#[test]
fn benchmark_rejects_empty_square() {
    for size in ["0", "-5", "NaN"] {
        let output = run(&["benchmark", "-n", "10", "--size", size]);
        assert!(!output.status.success(), "--size {} should fail", size);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("--size"), "got: {}", stderr);
    }
}
