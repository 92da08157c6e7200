//! Import command implementation.

use std::fs;
use std::io::{self, Read as IoRead};

use crosscut::{Session, extract_segments_from_svg};

use super::common::{OutputFormat, parse_flag, render, write_output};

/// Execute the import command.
pub fn cmd_import(args: &[String]) {
    let mut svg_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut format = OutputFormat::Svg;
    let mut debug = false;

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
            "-h" | "--help" => {
                print_usage();
                return;
            }
            path => {
                if svg_path.is_none() {
                    svg_path = Some(path);
                }
            }
        }
        i += 1;
    }

    let svg_path = svg_path.unwrap_or_else(|| {
        eprintln!("Error: SVG file required (use '-' for stdin)");
        print_usage();
        std::process::exit(1);
    });

    // Read SVG content from file or stdin
    let svg_content = if svg_path == "-" {
        eprintln!("Reading SVG from stdin...");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).unwrap_or_else(|e| {
            eprintln!("Error: failed to read stdin: {}", e);
            std::process::exit(1);
        });
        buffer
    } else {
        eprintln!("Loading: {}", svg_path);
        fs::read_to_string(svg_path).unwrap_or_else(|e| {
            eprintln!("Error: failed to read {}: {}", svg_path, e);
            std::process::exit(1);
        })
    };

    let segments = extract_segments_from_svg(&svg_content).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut session = Session::new();
    session.set_debug(debug);

    let mut skipped = 0;
    for (start, end) in segments.iter().copied() {
        if let Err(e) = session.cut(start, end, false) {
            tracing::warn!("skipping cut: {}", e);
            skipped += 1;
        }
    }

    let arrangement = session.arrangement();
    eprintln!(
        "Imported {} cuts ({} skipped): {} intersections, {} edges",
        segments.len() - skipped,
        skipped,
        arrangement.intersections().len(),
        arrangement.graph().len()
    );

    let output = render(&session, format, debug).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = write_output(&output, output_path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: crosscut import <input.svg> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  -f, --format <fmt>     Output format: svg, json (default: svg)");
    eprintln!("  --debug                Include intersections and graph edges");
    eprintln!();
    eprintln!("Every straight edge of every path becomes one cut, in document order.");
}
