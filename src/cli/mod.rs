//! CLI command definitions for the configurator binary
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod show;

use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};
use show::{SettingsArgs, ShowArgs};

/// Layered configuration loader
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the configuration and print it
    Show(ShowArgs),

    /// Print the files that would be loaded, in order
    Plan(SettingsArgs),

    /// Print the named directories
    Paths(PathsArgs),

    /// Print the active environment name
    Env,
}

/// Arguments for the paths subcommand
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}
