//! Typed client for the SmartCity admin REST API.
//!
//! - **Models**: wire records and request bodies ([`models`])
//! - **Statuses**: closed enumerations with a visible fallback ([`status`])
//! - **Envelopes**: the one place response wrappers are unwrapped ([`envelope`])
//! - **Images**: emulator host alias rewriting ([`images`])
//! - **Transport**: the [`AdminApi`] seam and its reqwest implementation
//!
//! # Example
//!
//! ```no_run
//! use smartcity_client::{AdminApi, HttpAdminClient};
//! use smartcity_common::{AppResult, Config};
//!
//! async fn pending_reports() -> AppResult<usize> {
//!     let client = HttpAdminClient::new(&Config::load()?)?;
//!     let reports = client
//!         .list_flood_reports(Some(&smartcity_client::FloodReportStatus::Pending))
//!         .await?;
//!     Ok(reports.len())
//! }
//! ```

pub mod api;
pub mod envelope;
pub mod http;
pub mod images;
pub mod models;
pub mod status;
pub mod timestamp;

pub use api::{AdminApi, SharedAdminApi};
pub use http::{HttpAdminClient, WATER_LEVEL_REQUIRED, sanitize_flood_review};
pub use images::{HasImage, ImageRewrite};
pub use models::{
    ANONYMOUS, AiAnalysisResult, EventBanner, EventBannerInput, FeedbackItem,
    FeedbackResponseRequest, FloodReport, FloodReviewRequest, RecordId, User, UserRef,
    author_name,
};
pub use status::{AiConfidence, FeedbackStatus, FloodReportStatus, WaterLevel};
