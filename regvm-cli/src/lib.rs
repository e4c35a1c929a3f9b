//! regvm command-line front end.
//!
//! Plays the buffer provider and reporting roles around the engine: it
//! reads raw buffer images from disk, fills input slots, runs the engine
//! and prints output slots or a memory dump.

pub mod args;
pub mod commands;
pub mod demo;

/// Exit code for usage, I/O and image errors.
pub const EXIT_INPUT: i32 = 1;

/// Exit code for engine faults and failed demo checks.
pub const EXIT_RUNTIME: i32 = 2;
