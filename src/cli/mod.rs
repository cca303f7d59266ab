//! CLI module for toolr - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for querying and mutating
//! the robot's tool pool.

pub mod commands;

pub use commands::Cli;
