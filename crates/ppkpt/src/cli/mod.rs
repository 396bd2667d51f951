//! Command-line interface for ppkpt.
//!
//! This module provides the CLI structure and command definitions for the
//! `lapor` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AnalyzeCommand, ConfigCommand, DashboardCommand, FacultyArg, ListCommand, LoginCommand,
    OutputFormat, SeedCommand, ShowCommand, StatusArg, SubmitCommand, UpdateCommand,
};

/// lapor - Campus incident reporting and case management
///
/// File misconduct reports, review and annotate them as an administrator,
/// and summarize handling status per faculty.
#[derive(Debug, Parser)]
#[command(name = "lapor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// File a new report
    Submit(SubmitCommand),

    /// List reports (admin)
    List(ListCommand),

    /// Show one report in full (admin)
    Show(ShowCommand),

    /// Update a report's status and investigation fields (admin)
    Update(UpdateCommand),

    /// Show status and faculty aggregates
    Dashboard(DashboardCommand),

    /// Run the AI analysis collaborator on a report (admin)
    Analyze(AnalyzeCommand),

    /// Open the administrator session
    Login(LoginCommand),

    /// Close the administrator session
    Logout,

    /// Load the built-in sample reports
    Seed(SeedCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
