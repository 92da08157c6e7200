//! crosscut - interactive line-segment arrangement canvas
//!
//! Usage:
//!   crosscut [script]                   Launch TUI, optionally preloading a drag script
//!   crosscut replay <script>            Replay a drag script, print the arrangement
//!   crosscut import <svg>               Turn SVG edges into cuts
//!   crosscut cycles <script> --start N  Enumerate loops through an intersection
//!   crosscut benchmark                  Time random insertions

use std::env;

mod cli;
mod tui;

use cli::{cmd_benchmark, cmd_cycles, cmd_import, cmd_replay};

/// Log to stderr, filtered by `RUST_LOG`.
///
/// Only the batch commands get a subscriber; the TUI owns the terminal.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crosscut=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Check for CLI subcommands
    if args.len() >= 2 {
        match args[1].as_str() {
            "replay" => {
                init_logging();
                cmd_replay(&args[2..]);
                return;
            }
            "import" => {
                init_logging();
                cmd_import(&args[2..]);
                return;
            }
            "cycles" => {
                init_logging();
                cmd_cycles(&args[2..]);
                return;
            }
            "benchmark" => {
                init_logging();
                cmd_benchmark(&args[2..]);
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
            _ => {}
        }
    }

    // Launch TUI
    let script_path = args.get(1).map(String::as_str);

    if let Err(e) = tui::run_tui(script_path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("crosscut - incremental planar line-segment arrangements");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} [script.yaml]                    Launch TUI", prog);
    eprintln!("  {} replay <script> [options]", prog);
    eprintln!("  {} import <svg> [options]", prog);
    eprintln!("  {} cycles <script> --start <id> [options]", prog);
    eprintln!("  {} benchmark [-n <count>] [--seed <s>] [--size <side>]", prog);
    eprintln!();
    eprintln!("Replay / import options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>     Output format: svg, json (default: svg)");
    eprintln!("  --debug                Include intersections and graph edges");
    eprintln!("  --snap                 Replay only: snap every drag");
    eprintln!();
    eprintln!("Cycles options:");
    eprintln!("  --max-paths <n>        Stop after this many cycles (default: 1024)");
    eprintln!("  --max-depth <n>        Longest path to explore (default: 256)");
    eprintln!("  --undirected           Walk graph edges in both directions");
    eprintln!();
    eprintln!("Drag scripts are YAML (or JSON by extension):");
    eprintln!("  snap_ratio: 50");
    eprintln!("  drags:");
    eprintln!("    - {{ from: [0, 0], to: [10, 0] }}");
    eprintln!("    - {{ from: [2, -1], to: [2, 1], snap: true }}");
    eprintln!();
    eprintln!("TUI Controls:");
    eprintln!("  mouse drag    Cut from press to release");
    eprintln!("  Shift / s     Snap near-axis cuts (s is sticky)");
    eprintln!("  g             Toggle intersection and graph overlays");
    eprintln!("  c             Cycles through the last intersection");
    eprintln!("  Esc           Cancel drag");
    eprintln!("  q             Quit");
}
