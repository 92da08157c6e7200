//! Benchmark command implementation.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crosscut::{Arrangement, Point, redundant_edges};

use super::common::parse_flag;

/// Side length of the benchmark square; must be positive and finite.
pub fn check_size(size: f64) -> Result<f64, String> {
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(format!("--size must be a positive number, got {}", size))
    }
}

/// Random cuts inside a `size` x `size` square.
///
/// `size` must pass [`check_size`]; an empty range panics in the RNG.
pub fn random_segments(count: usize, seed: u64, size: f64) -> Vec<(Point, Point)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let a = Point::new(rng.random_range(0.0..size), rng.random_range(0.0..size));
            let b = Point::new(rng.random_range(0.0..size), rng.random_range(0.0..size));
            (a, b)
        })
        .collect()
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) {
    let mut count: usize = 500;
    let mut seed: u64 = 42;
    let mut size: f64 = 1000.0;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--count" => {
                i += 1;
                count = parse_flag(args, i, "--count");
            }
            "--seed" => {
                i += 1;
                seed = parse_flag(args, i, "--seed");
            }
            "--size" => {
                i += 1;
                size = parse_flag(args, i, "--size");
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let size = check_size(size).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let segments = random_segments(count, seed, size);

    let mut arrangement = Arrangement::new();
    let start = Instant::now();

    let mut rejected = 0;
    for (a, b) in segments {
        if arrangement.insert(a, b).is_err() {
            rejected += 1;
        }
    }

    let elapsed = start.elapsed();
    let inserted = count - rejected;
    let redundant = redundant_edges(&arrangement).len();

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  CROSSCUT BENCHMARK: {} RANDOM CUTS", count);
    println!("═══════════════════════════════════════════════");
    println!("  Seed: {}", seed);
    println!("  Segments: {}", arrangement.segments().len());
    println!("  Intersections: {}", arrangement.intersections().len());
    println!("  Graph edges: {} ({} redundant)", arrangement.graph().len(), redundant);
    println!("  Time: {:?}", elapsed);
    println!("  Time (ms): {:.2}", elapsed.as_secs_f64() * 1000.0);
    if inserted > 0 {
        println!("  Avg per insert: {:.3}ms", elapsed.as_secs_f64() * 1000.0 / inserted as f64);
    }
    println!("═══════════════════════════════════════════════");
}

fn print_usage() {
    eprintln!("Usage: crosscut benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --count <n>        Number of random cuts (default: 500)");
    eprintln!("  --seed <s>             RNG seed (default: 42)");
    eprintln!("  --size <n>             Side of the square cuts are drawn in (default: 1000)");
    eprintln!();
    eprintln!("Times incremental insertion of random segments.");
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_segments() {
        assert_eq!(random_segments(20, 7, 100.0), random_segments(20, 7, 100.0));
        assert_ne!(random_segments(20, 7, 100.0), random_segments(20, 8, 100.0));
    }

    #[test]
    fn size_must_be_positive_and_finite() {
        assert_eq!(check_size(10.0), Ok(10.0));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(check_size(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn segments_stay_in_square() {
        for (a, b) in random_segments(100, 1, 50.0) {
            for p in [a, b] {
                assert!((0.0..50.0).contains(&p.x) && (0.0..50.0).contains(&p.y));
            }
        }
    }
}
