//! Command-line definitions.

use clap::{Parser, Subcommand, ValueEnum};
use smartcity_client::{FeedbackStatus, FloodReportStatus, WaterLevel};
use smartcity_core::{FeedbackAction, FloodAction};
use std::path::PathBuf;

/// SmartCity administration console
#[derive(Parser, Debug)]
#[command(name = "smartcity-admin")]
#[command(version)]
#[command(about = "Administer users, event banners, feedback and flood reports")]
pub struct Cli {
    /// Backend API base URL, overriding the configuration
    #[arg(long, env = "SMARTCITY_API_URL", global = true)]
    pub base_url: Option<String>,

    /// Configuration file to load instead of config/*.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 📊 Overview: counts, recent activity and status breakdowns
    Dashboard,

    /// 👥 List registered users
    Users {
        /// Filter by email or full name (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// 📢 Manage event banners
    #[command(subcommand)]
    Events(EventCommands),

    /// 💬 Triage citizen feedback
    #[command(subcommand)]
    Feedback(FeedbackCommands),

    /// 🌊 Review flood reports
    #[command(subcommand)]
    Flood(FloodCommands),
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List every banner
    List,

    /// Create a banner
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image_url: String,
    },

    /// Edit a banner; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Delete a banner after confirmation
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum FeedbackCommands {
    /// List feedback, optionally filtered by status
    List {
        #[arg(short, long, value_parser = feedback_status)]
        status: Option<FeedbackStatus>,
    },

    /// Move one feedback item through its lifecycle
    Review {
        id: i64,
        #[arg(short, long, value_enum)]
        action: FeedbackActionArg,
        /// Override the target status (resolved or rejected feedback only)
        #[arg(short, long, value_parser = feedback_status)]
        status: Option<FeedbackStatus>,
        /// Admin response; defaults to the current response
        #[arg(short, long)]
        response: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FloodCommands {
    /// List flood reports, optionally filtered by status
    List {
        #[arg(short, long, value_parser = flood_status)]
        status: Option<FloodReportStatus>,
    },

    /// Approve, reject or update one flood report
    Review {
        id: i64,
        #[arg(short, long, value_enum)]
        action: FloodActionArg,
        /// Override the target status (already reviewed reports only)
        #[arg(short, long, value_parser = flood_status)]
        status: Option<FloodReportStatus>,
        /// Low, Medium, High or Dangerous; required to approve
        #[arg(short, long, value_parser = water_level)]
        water_level: Option<WaterLevel>,
        /// Admin note
        #[arg(short, long)]
        note: Option<String>,
        /// Run the AI image analysis first and use its suggestion
        #[arg(long)]
        ai: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedbackActionArg {
    Accept,
    Reject,
    Resolve,
    Details,
}

impl From<FeedbackActionArg> for FeedbackAction {
    fn from(arg: FeedbackActionArg) -> Self {
        match arg {
            FeedbackActionArg::Accept => Self::Accept,
            FeedbackActionArg::Reject => Self::Reject,
            FeedbackActionArg::Resolve => Self::Resolve,
            FeedbackActionArg::Details => Self::ViewDetails,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FloodActionArg {
    Approve,
    Reject,
    Details,
}

impl From<FloodActionArg> for FloodAction {
    fn from(arg: FloodActionArg) -> Self {
        match arg {
            FloodActionArg::Approve => Self::Approve,
            FloodActionArg::Reject => Self::Reject,
            FloodActionArg::Details => Self::ViewDetails,
        }
    }
}

fn feedback_status(value: &str) -> Result<FeedbackStatus, String> {
    let status = FeedbackStatus::parse(value);
    if status.is_recognized() {
        Ok(status)
    } else {
        Err(format!(
            "expected one of Pending, Processing, Resolved, Rejected; got '{value}'"
        ))
    }
}

fn flood_status(value: &str) -> Result<FloodReportStatus, String> {
    let status = FloodReportStatus::parse(value);
    if status.is_recognized() {
        Ok(status)
    } else {
        Err(format!(
            "expected one of Pending, Approved, Rejected; got '{value}'"
        ))
    }
}

fn water_level(value: &str) -> Result<WaterLevel, String> {
    let level = WaterLevel::parse(value);
    if level.is_assessable() {
        Ok(level)
    } else {
        Err(format!(
            "expected one of Low, Medium, High, Dangerous; got '{value}'"
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_help() {
        assert!(Cli::try_parse_from(["smartcity-admin", "--help"]).is_err());
    }

    #[test]
    fn test_flood_review_arguments() {
        let cli = Cli::try_parse_from([
            "smartcity-admin",
            "flood",
            "review",
            "7",
            "--action",
            "approve",
            "--water-level",
            "high",
        ])
        .unwrap();

        match cli.command {
            Commands::Flood(FloodCommands::Review {
                id,
                action,
                water_level,
                ai,
                ..
            }) => {
                assert_eq!(id, 7);
                assert_eq!(action, FloodActionArg::Approve);
                assert_eq!(water_level, Some(WaterLevel::High));
                assert!(!ai);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!(
            Cli::try_parse_from(["smartcity-admin", "feedback", "list", "--status", "Closed"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from([
                "smartcity-admin",
                "flood",
                "review",
                "1",
                "--action",
                "approve",
                "--water-level",
                "Unknown",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "smartcity-admin",
            "users",
            "--base-url",
            "https://city.example.com/api",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("https://city.example.com/api"));
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
