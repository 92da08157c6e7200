//! Replay command implementation.

use super::common::{OutputFormat, parse_flag, render, write_output};
use super::script::DragScript;

/// Execute the replay command.
pub fn cmd_replay(args: &[String]) {
    let mut script_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut format = OutputFormat::Svg;
    let mut debug = false;
    let mut snap = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(&args[i]);
                }
            }
            "-f" | "--format" => {
                i += 1;
                let name: String = parse_flag(args, i, "--format");
                format = OutputFormat::from_name(&name).unwrap_or_else(|| {
                    eprintln!("Unknown format: {}. Use 'svg' or 'json'.", name);
                    std::process::exit(1);
                });
            }
            "--debug" => {
                debug = true;
            }
            "--snap" => {
                snap = true;
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            path if !path.starts_with('-') => {
                if script_path.is_none() {
                    script_path = Some(path);
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let script_path = script_path.unwrap_or_else(|| {
        eprintln!("Error: drag script required");
        print_usage();
        std::process::exit(1);
    });

    let script = DragScript::load(script_path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut session = script.session();
    session.set_debug(debug);
    let outcome = script.replay(&mut session, snap);

    let arrangement = session.arrangement();
    eprintln!(
        "Replayed {} drags ({} skipped): {} segments, {} intersections, {} edges",
        outcome.applied + outcome.rejected,
        outcome.rejected,
        arrangement.segments().len(),
        arrangement.intersections().len(),
        arrangement.graph().len()
    );

    let output = render(&session, format, session.debug()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = write_output(&output, output_path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: crosscut replay <script.yaml> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>     Output format: svg, json (default: svg)");
    eprintln!("  --debug                Include intersections and graph edges");
    eprintln!("  --snap                 Snap every drag, as if the modifier were held");
}
