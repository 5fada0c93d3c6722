//! In-memory [`AdminApi`] that records every call.
//!
//! Behaves like a small backend: writes update the stored records, list
//! calls honor the status filter, and configured failures are returned
//! instead of data.

use async_trait::async_trait;
use smartcity_client::{
    AdminApi, AiAnalysisResult, EventBanner, EventBannerInput, FeedbackItem,
    FeedbackResponseRequest, FeedbackStatus, FloodReport, FloodReportStatus, FloodReviewRequest,
    User, sanitize_flood_review,
};
use smartcity_common::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Endpoint selector for injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListFloodReports,
    ReviewFloodReport,
    AnalyzeFloodImage,
    ListFeedback,
    RespondToFeedback,
    ListEventBanners,
    CreateEventBanner,
    UpdateEventBanner,
    DeleteEventBanner,
    ListUsers,
}

/// A call that reached the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListFloodReports(Option<FloodReportStatus>),
    ReviewFloodReport(i64, FloodReviewRequest),
    AnalyzeFloodImage(i64),
    ListFeedback(Option<FeedbackStatus>),
    RespondToFeedback(i64, FeedbackResponseRequest),
    ListEventBanners,
    CreateEventBanner(EventBannerInput),
    UpdateEventBanner(i64, EventBannerInput),
    DeleteEventBanner(i64),
    ListUsers,
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    banners: Vec<EventBanner>,
    feedback: Vec<FeedbackItem>,
    flood_reports: Vec<FloodReport>,
    analysis: Option<AiAnalysisResult>,
    failures: HashMap<Endpoint, AppError>,
    calls: Vec<Call>,
    next_banner_id: i64,
}

/// Recording fake backend.
#[derive(Default)]
pub struct RecordingApi {
    state: Mutex<State>,
}

impl RecordingApi {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the stored users.
    pub fn set_users(&self, users: Vec<User>) {
        self.state().users = users;
    }

    /// Replace the stored event banners.
    pub fn set_banners(&self, banners: Vec<EventBanner>) {
        let mut state = self.state();
        state.next_banner_id = banners.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        state.banners = banners;
    }

    /// Replace the stored feedback.
    pub fn set_feedback(&self, feedback: Vec<FeedbackItem>) {
        self.state().feedback = feedback;
    }

    /// Replace the stored flood reports.
    pub fn set_flood_reports(&self, reports: Vec<FloodReport>) {
        self.state().flood_reports = reports;
    }

    /// Result returned by the image analysis endpoint.
    pub fn set_analysis(&self, analysis: AiAnalysisResult) {
        self.state().analysis = Some(analysis);
    }

    /// Make `endpoint` fail with `error` until [`Self::recover`] is called.
    pub fn fail(&self, endpoint: Endpoint, error: AppError) {
        self.state().failures.insert(endpoint, error);
    }

    /// Remove an injected failure.
    pub fn recover(&self, endpoint: Endpoint) {
        self.state().failures.remove(&endpoint);
    }

    /// Calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Record `call`, then return the injected failure for `endpoint`, if any.
    fn enter(&self, endpoint: Endpoint, call: Call) -> AppResult<MutexGuard<'_, State>> {
        let mut state = self.state();
        state.calls.push(call);
        if let Some(err) = state.failures.get(&endpoint).cloned() {
            return Err(err);
        }
        Ok(state)
    }
}

fn not_found(kind: &str, id: i64) -> AppError {
    AppError::api(404, Some(format!("{kind} {id} not found")))
}

#[async_trait]
impl AdminApi for RecordingApi {
    async fn list_flood_reports(
        &self,
        status: Option<&FloodReportStatus>,
    ) -> AppResult<Vec<FloodReport>> {
        let state = self.enter(
            Endpoint::ListFloodReports,
            Call::ListFloodReports(status.cloned()),
        )?;
        Ok(state
            .flood_reports
            .iter()
            .filter(|r| status.is_none_or(|s| &r.status == s))
            .cloned()
            .collect())
    }

    async fn review_flood_report(&self, id: i64, review: &FloodReviewRequest) -> AppResult<()> {
        // Refused requests never leave the client.
        let review = sanitize_flood_review(review)?;
        let mut state = self.enter(
            Endpoint::ReviewFloodReport,
            Call::ReviewFloodReport(id, review.clone()),
        )?;
        let report = state
            .flood_reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("Flood report", id))?;
        report.status = review.status;
        report.water_level = review.water_level;
        report.admin_note = Some(review.admin_note);
        Ok(())
    }

    async fn analyze_flood_image(&self, id: i64) -> AppResult<AiAnalysisResult> {
        let state = self.enter(Endpoint::AnalyzeFloodImage, Call::AnalyzeFloodImage(id))?;
        state
            .analysis
            .clone()
            .ok_or_else(|| AppError::api(503, Some("AI service unavailable".to_string())))
    }

    async fn list_feedback(&self, status: Option<&FeedbackStatus>) -> AppResult<Vec<FeedbackItem>> {
        let state = self.enter(Endpoint::ListFeedback, Call::ListFeedback(status.cloned()))?;
        Ok(state
            .feedback
            .iter()
            .filter(|f| status.is_none_or(|s| &f.status == s))
            .cloned()
            .collect())
    }

    async fn respond_to_feedback(
        &self,
        id: i64,
        response: &FeedbackResponseRequest,
    ) -> AppResult<()> {
        let mut state = self.enter(
            Endpoint::RespondToFeedback,
            Call::RespondToFeedback(id, response.clone()),
        )?;
        let item = state
            .feedback
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| not_found("Feedback", id))?;
        item.status = response.status.clone();
        item.admin_response = Some(response.response.clone());
        Ok(())
    }

    async fn list_event_banners(&self) -> AppResult<Vec<EventBanner>> {
        let state = self.enter(Endpoint::ListEventBanners, Call::ListEventBanners)?;
        Ok(state.banners.clone())
    }

    async fn create_event_banner(&self, input: &EventBannerInput) -> AppResult<()> {
        let mut state = self.enter(
            Endpoint::CreateEventBanner,
            Call::CreateEventBanner(input.clone()),
        )?;
        let id = state.next_banner_id.max(1);
        state.next_banner_id = id + 1;
        state.banners.push(EventBanner {
            id,
            title: input.title.clone(),
            description: Some(input.description.clone()),
            image_url: Some(input.image_url.clone()),
            created_at: Some(chrono::Utc::now()),
        });
        Ok(())
    }

    async fn update_event_banner(&self, id: i64, input: &EventBannerInput) -> AppResult<()> {
        let mut state = self.enter(
            Endpoint::UpdateEventBanner,
            Call::UpdateEventBanner(id, input.clone()),
        )?;
        let banner = state
            .banners
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("Event banner", id))?;
        banner.title = input.title.clone();
        banner.description = Some(input.description.clone());
        banner.image_url = Some(input.image_url.clone());
        Ok(())
    }

    async fn delete_event_banner(&self, id: i64) -> AppResult<()> {
        let mut state = self.enter(Endpoint::DeleteEventBanner, Call::DeleteEventBanner(id))?;
        let before = state.banners.len();
        state.banners.retain(|b| b.id != id);
        if state.banners.len() == before {
            return Err(not_found("Event banner", id));
        }
        Ok(())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let state = self.enter(Endpoint::ListUsers, Call::ListUsers)?;
        Ok(state.users.clone())
    }
}
