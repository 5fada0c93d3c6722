//! Common utilities and shared types for the SmartCity admin tools.
//!
//! This crate provides foundational components used across all workspace crates:
//!
//! - **Configuration**: Backend and image settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use smartcity_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Backend: {}", config.api.base_url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::{ApiConfig, Config, ImageConfig};
pub use error::{AppError, AppResult};
