//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - list / active / exists / params: read-only pool queries
//! - add / update / switch / remove / replace: pool mutations (IDLE only)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// toolr - online tool configuration for robot manipulators
#[derive(Parser, Debug)]
#[command(name = "toolr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all configured tools
    List,

    /// Show the currently active tool
    Active,

    /// Check whether a tool exists in the pool
    Exists {
        /// Tool name to check
        name: String,
    },

    /// Show the parameters of a tool
    Params {
        /// Tool name to query
        name: String,
    },

    /// Add a new tool to the pool
    Add {
        /// Name of the new tool, must be unique
        name: String,

        /// JSON file with the tool parameters
        #[arg(short, long)]
        params: PathBuf,
    },

    /// Update the parameters of an existing tool
    Update {
        /// Name of the tool to update
        name: String,

        /// JSON file with the new parameters
        #[arg(short, long)]
        params: PathBuf,
    },

    /// Switch the active tool
    Switch {
        /// Name of the tool to activate ("Flange" for no tool)
        name: String,
    },

    /// Remove a tool from the pool
    Remove {
        /// Name of the tool to remove
        name: String,
    },

    /// Replace a tool definition (remove then add; not atomic)
    Replace {
        /// Name of the tool to replace
        name: String,

        /// JSON file with the replacement parameters
        #[arg(short, long)]
        params: PathBuf,
    },
}
