//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Short title of the complaint
    #[arg(short, long)]
    pub title: String,

    /// Free-text narrative of the incident
    #[arg(short, long)]
    pub description: String,

    /// Faculty the incident is attributed to
    #[arg(short, long, value_enum)]
    pub faculty: FacultyArg,

    /// Date the incident happened (YYYY-MM-DD)
    #[arg(short, long)]
    pub incident_date: NaiveDate,

    /// Reporter's name
    #[arg(long)]
    pub reporter_name: Option<String>,

    /// Reporter's student or staff number
    #[arg(long)]
    pub reporter_id: Option<String>,

    /// File anonymously (identity fields are replaced with a sentinel)
    #[arg(short, long)]
    pub anonymous: bool,

    /// Path to an evidence file to attach
    #[arg(short, long, value_name = "FILE")]
    pub evidence: Option<PathBuf>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filter by status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Filter by faculty
    #[arg(short, long, value_enum)]
    pub faculty: Option<FacultyArg>,

    /// Maximum number of results
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Report id
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Report id
    pub id: String,

    /// New status (current status is kept if omitted)
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Victim identities
    #[arg(long)]
    pub victims: Option<String>,

    /// Witness identities
    #[arg(long)]
    pub witnesses: Option<String>,

    /// Investigation notes
    #[arg(long)]
    pub investigation: Option<String>,

    /// Recommended disciplinary action
    #[arg(long)]
    pub sanction: Option<String>,

    /// Path to a signed sanction decree to attach
    #[arg(long, value_name = "FILE")]
    pub sanction_file: Option<PathBuf>,
}

/// Dashboard command arguments.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Analyze command arguments.
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Report id
    pub id: String,

    /// Cache the assessment on the report
    #[arg(long)]
    pub save: bool,
}

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Administrator username
    #[arg(short, long)]
    pub username: String,

    /// Administrator password
    #[arg(short, long)]
    pub password: String,
}

/// Seed command arguments.
#[derive(Debug, Args)]
pub struct SeedCommand {
    /// Replace existing reports
    #[arg(long)]
    pub force: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Status argument for filtering and updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Filed, not yet acted on
    Unresolved,
    /// Being followed up
    InProgress,
    /// Handling finished
    Resolved,
}

impl From<StatusArg> for crate::report::ReportStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Unresolved => Self::Unresolved,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Resolved => Self::Resolved,
        }
    }
}

/// Faculty argument for submission and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FacultyArg {
    /// Fakultas Ekonomi
    Ekonomi,
    /// Fakultas Hukum
    Hukum,
    /// Fakultas Teknik
    Teknik,
    /// Fakultas Kedokteran
    Kedokteran,
    /// Fakultas Pertanian
    Pertanian,
    /// Fakultas Keguruan dan Ilmu Pendidikan
    Fkip,
    /// Fakultas Ilmu Sosial dan Ilmu Politik
    Fisip,
    /// Fakultas MIPA
    Mipa,
    /// Fakultas Ilmu Komputer
    Fasilkom,
    /// Fakultas Kesehatan Masyarakat
    Fkm,
}

impl From<FacultyArg> for crate::report::Faculty {
    fn from(arg: FacultyArg) -> Self {
        match arg {
            FacultyArg::Ekonomi => Self::Ekonomi,
            FacultyArg::Hukum => Self::Hukum,
            FacultyArg::Teknik => Self::Teknik,
            FacultyArg::Kedokteran => Self::Kedokteran,
            FacultyArg::Pertanian => Self::Pertanian,
            FacultyArg::Fkip => Self::Fkip,
            FacultyArg::Fisip => Self::Fisip,
            FacultyArg::Mipa => Self::Mipa,
            FacultyArg::Fasilkom => Self::Fasilkom,
            FacultyArg::Fkm => Self::Fkm,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Faculty, ReportStatus};

    #[test]
    fn test_status_arg_conversion() {
        assert_eq!(
            ReportStatus::from(StatusArg::Unresolved),
            ReportStatus::Unresolved
        );
        assert_eq!(
            ReportStatus::from(StatusArg::InProgress),
            ReportStatus::InProgress
        );
        assert_eq!(
            ReportStatus::from(StatusArg::Resolved),
            ReportStatus::Resolved
        );
    }

    #[test]
    fn test_faculty_arg_conversion_covers_all() {
        let args = [
            FacultyArg::Ekonomi,
            FacultyArg::Hukum,
            FacultyArg::Teknik,
            FacultyArg::Kedokteran,
            FacultyArg::Pertanian,
            FacultyArg::Fkip,
            FacultyArg::Fisip,
            FacultyArg::Mipa,
            FacultyArg::Fasilkom,
            FacultyArg::Fkm,
        ];
        let converted: Vec<Faculty> = args.iter().map(|&a| a.into()).collect();
        assert_eq!(converted, Faculty::ALL.to_vec());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_update_command_debug() {
        let cmd = UpdateCommand {
            id: "REP-1".to_string(),
            status: Some(StatusArg::Resolved),
            victims: None,
            witnesses: None,
            investigation: None,
            sanction: None,
            sanction_file: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("REP-1"));
        assert!(debug_str.contains("Resolved"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
