//! Cycles command implementation.

use crosscut::{Cycle, CycleError, CycleLimits, EdgeDirection, IntersectionId};

use super::common::parse_flag;
use super::script::DragScript;

/// Accept `3` or `i3`.
fn parse_intersection_id(raw: &str) -> Option<IntersectionId> {
    raw.strip_prefix('i').unwrap_or(raw).parse().ok().map(IntersectionId)
}

/// `i0 -> i1 -> i3 -> i0`
pub fn format_cycle(cycle: &Cycle) -> String {
    cycle
        .nodes()
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Execute the cycles command.
pub fn cmd_cycles(args: &[String]) {
    let mut script_path: Option<&str> = None;
    let mut start: Option<IntersectionId> = None;
    let mut limits = CycleLimits::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--start" | "-s" => {
                i += 1;
                let raw: String = parse_flag(args, i, "--start");
                start = Some(parse_intersection_id(&raw).unwrap_or_else(|| {
                    eprintln!("Error: invalid intersection id: {}", raw);
                    std::process::exit(1);
                }));
            }
            "--max-paths" => {
                i += 1;
                limits.max_paths = parse_flag(args, i, "--max-paths");
            }
            "--max-depth" => {
                i += 1;
                limits.max_depth = parse_flag(args, i, "--max-depth");
            }
            "--undirected" => {
                limits.direction = EdgeDirection::Undirected;
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

    let start = start.unwrap_or_else(|| {
        eprintln!("Error: --start <id> required");
        print_usage();
        std::process::exit(1);
    });

    let script = DragScript::load(script_path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut session = script.session();
    script.replay(&mut session, false);

    let cycles = match session.find_cycles(start, &limits) {
        Ok(cycles) => cycles,
        Err(CycleError::Truncated { partial, limit }) => {
            eprintln!(
                "Warning: search truncated ({}); showing {} cycles found so far",
                limit,
                partial.len()
            );
            partial
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cycles.is_empty() {
        eprintln!("No cycles through {}", start);
    }
    for cycle in &cycles {
        println!("{}", format_cycle(cycle));
    }
}

fn print_usage() {
    eprintln!("Usage: crosscut cycles <script.yaml> --start <id> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --start <id>       Intersection to start from (e.g. 0 or i0)");
    eprintln!("  --max-paths <n>        Stop after this many cycles (default: 1024)");
    eprintln!("  --max-depth <n>        Longest path to explore (default: 256)");
    eprintln!("  --undirected           Walk graph edges in both directions");
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_with_or_without_prefix() {
        assert_eq!(parse_intersection_id("3"), Some(IntersectionId(3)));
        assert_eq!(parse_intersection_id("i12"), Some(IntersectionId(12)));
        assert_eq!(parse_intersection_id("x"), None);
        assert_eq!(parse_intersection_id("-1"), None);
    }

    #[test]
    fn cycle_formatting() {
        let cycle = Cycle(vec![IntersectionId(0), IntersectionId(2), IntersectionId(0)]);
        assert_eq!(format_cycle(&cycle), "i0 -> i2 -> i0");
    }
}
