//! Admin backend abstraction.
//!
//! The list views, review workflows and dashboard talk to the backend only
//! through [`AdminApi`], so they can run against [`crate::HttpAdminClient`]
//! in production and an in-memory fake in tests.

use async_trait::async_trait;
use smartcity_common::AppResult;
use std::sync::Arc;

use crate::models::{
    AiAnalysisResult, EventBanner, EventBannerInput, FeedbackItem, FeedbackResponseRequest,
    FloodReport, FloodReviewRequest, User,
};
use crate::status::{FeedbackStatus, FloodReportStatus};

/// Operations the admin dashboard performs against the backend.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /floodreports/admin/all?status=`
    async fn list_flood_reports(
        &self,
        status: Option<&FloodReportStatus>,
    ) -> AppResult<Vec<FloodReport>>;

    /// `PUT /floodreports/admin/{id}/review`
    ///
    /// Implementations must refuse an Approved review without a water
    /// level and must never send a water level with any other status.
    async fn review_flood_report(&self, id: i64, review: &FloodReviewRequest) -> AppResult<()>;

    /// `POST /aifloodanalysis/analyze/{id}`
    async fn analyze_flood_image(&self, id: i64) -> AppResult<AiAnalysisResult>;

    /// `GET /feedback/admin/all?status=`
    async fn list_feedback(&self, status: Option<&FeedbackStatus>) -> AppResult<Vec<FeedbackItem>>;

    /// `PUT /feedback/admin/{id}/respond`
    async fn respond_to_feedback(&self, id: i64, response: &FeedbackResponseRequest)
    -> AppResult<()>;

    /// `GET /EventBanners`
    async fn list_event_banners(&self) -> AppResult<Vec<EventBanner>>;

    /// `POST /EventBanners`
    async fn create_event_banner(&self, input: &EventBannerInput) -> AppResult<()>;

    /// `PUT /EventBanners/{id}`
    async fn update_event_banner(&self, id: i64, input: &EventBannerInput) -> AppResult<()>;

    /// `DELETE /EventBanners/{id}`
    async fn delete_event_banner(&self, id: i64) -> AppResult<()>;

    /// `GET /auth/users`
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Shared handle to an [`AdminApi`] implementation.
pub type SharedAdminApi = Arc<dyn AdminApi>;
