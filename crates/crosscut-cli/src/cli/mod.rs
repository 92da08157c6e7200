//! CLI command implementations.
//!
//! This module contains the implementations for the batch subcommands:
//! - `replay` - Replay a drag script and print the arrangement
//! - `import` - Turn the edges of an SVG into cuts
//! - `cycles` - Enumerate loops through an intersection
//! - `benchmark` - Time insertion of random cuts

pub mod common;
pub mod script;
pub mod replay;
pub mod import;
pub mod cycles;
pub mod benchmark;

pub use replay::cmd_replay;
pub use import::cmd_import;
pub use cycles::cmd_cycles;
pub use benchmark::cmd_benchmark;
