//! SmartCity admin console.
//!
//! One subcommand per page of the admin dashboard:
//!
//! ```text
//! smartcity-admin [OPTIONS] <COMMAND>
//!
//! Commands:
//!   dashboard  Overview: counts, recent activity and status breakdowns
//!   users      List registered users
//!   events     Manage event banners
//!   feedback   Triage citizen feedback
//!   flood      Review flood reports
//! ```
//!
//! # Examples
//!
//! ```text
//! smartcity-admin feedback review 1 --action accept --response "Đang xử lý"
//! smartcity-admin flood review 7 --action approve --water-level High
//! smartcity-admin flood review 7 --action approve --ai
//! ```

pub mod commands;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use handler::{connect, exit_code, run};
