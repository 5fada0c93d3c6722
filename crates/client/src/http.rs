//! reqwest-backed [`AdminApi`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use smartcity_common::{AppError, AppResult, Config};
use tracing::{debug, info, warn};
use url::Url;
use validator::Validate;

use crate::api::AdminApi;
use crate::envelope;
use crate::images::ImageRewrite;
use crate::models::{
    AiAnalysisResult, EventBanner, EventBannerInput, FeedbackItem, FeedbackResponseRequest,
    FloodReport, FloodReviewRequest, User,
};
use crate::status::{FeedbackStatus, FloodReportStatus};

/// Message returned when an approval is attempted without a water level.
pub const WATER_LEVEL_REQUIRED: &str =
    "Vui lòng đánh giá mức độ ngập (waterLevel) trước khi duyệt!";

/// HTTP client for the SmartCity admin endpoints.
#[derive(Clone)]
pub struct HttpAdminClient {
    http: Client,
    base_url: Url,
    images: ImageRewrite,
}

impl HttpAdminClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(&config.api.user_agent)
            .timeout(std::time::Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: parse_base_url(&config.api.base_url)?,
            images: ImageRewrite::from_config(&config.images),
        })
    }

    /// The base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::Internal(format!("Invalid endpoint {path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "Sending admin API request");
        Ok(self.http.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = AppError::api(status.as_u16(), envelope::error_message(&body));
        warn!(status = status.as_u16(), error = %err, "Admin API request failed");
        Err(err)
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Value> {
        let request = self.request(Method::GET, path)?.query(query);
        read_json(self.send(request).await?).await
    }

    async fn send_json<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> AppResult<()> {
        let request = self.request(method, path)?.json(body);
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn list_flood_reports(
        &self,
        status: Option<&FloodReportStatus>,
    ) -> AppResult<Vec<FloodReport>> {
        let query = status_query(status.map(FloodReportStatus::as_str));
        let body = self.get_json("floodreports/admin/all", &query).await?;
        let mut reports: Vec<FloodReport> = envelope::decode_list(body)?;
        self.images.apply_all(&mut reports);
        Ok(reports)
    }

    async fn review_flood_report(&self, id: i64, review: &FloodReviewRequest) -> AppResult<()> {
        let body = sanitize_flood_review(review)?;
        self.send_json(Method::PUT, &format!("floodreports/admin/{id}/review"), &body)
            .await?;
        info!(report_id = id, status = %body.status, "Flood report reviewed");
        Ok(())
    }

    async fn analyze_flood_image(&self, id: i64) -> AppResult<AiAnalysisResult> {
        let request = self.request(Method::POST, &format!("aifloodanalysis/analyze/{id}"))?;
        let body = read_json(self.send(request).await?).await?;
        let result: AiAnalysisResult = envelope::decode_record(body, Some("aiAnalysis"))?;
        info!(
            report_id = id,
            water_level = %result.water_level,
            confidence = %result.confidence,
            "AI flood analysis finished"
        );
        Ok(result)
    }

    async fn list_feedback(&self, status: Option<&FeedbackStatus>) -> AppResult<Vec<FeedbackItem>> {
        let query = status_query(status.map(FeedbackStatus::as_str));
        let body = self.get_json("feedback/admin/all", &query).await?;
        envelope::decode_list(body)
    }

    async fn respond_to_feedback(
        &self,
        id: i64,
        response: &FeedbackResponseRequest,
    ) -> AppResult<()> {
        self.send_json(Method::PUT, &format!("feedback/admin/{id}/respond"), response)
            .await?;
        info!(feedback_id = id, status = %response.status, "Feedback answered");
        Ok(())
    }

    async fn list_event_banners(&self) -> AppResult<Vec<EventBanner>> {
        let body = self.get_json("EventBanners", &[]).await?;
        let mut banners: Vec<EventBanner> = envelope::decode_list(body)?;
        self.images.apply_all(&mut banners);
        Ok(banners)
    }

    async fn create_event_banner(&self, input: &EventBannerInput) -> AppResult<()> {
        input.validate()?;
        self.send_json(Method::POST, "EventBanners", input).await?;
        info!(title = %input.title, "Event banner created");
        Ok(())
    }

    async fn update_event_banner(&self, id: i64, input: &EventBannerInput) -> AppResult<()> {
        input.validate()?;
        self.send_json(Method::PUT, &format!("EventBanners/{id}"), input)
            .await?;
        info!(banner_id = id, "Event banner updated");
        Ok(())
    }

    async fn delete_event_banner(&self, id: i64) -> AppResult<()> {
        let request = self.request(Method::DELETE, &format!("EventBanners/{id}"))?;
        self.send(request).await?;
        info!(banner_id = id, "Event banner deleted");
        Ok(())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let body = self.get_json("auth/users", &[]).await?;
        envelope::decode_list(body)
    }
}

/// Enforce the approval rule on an outgoing review.
///
/// Approved requires an assessable water level; every other status is sent
/// without one.
pub fn sanitize_flood_review(review: &FloodReviewRequest) -> AppResult<FloodReviewRequest> {
    let water_level = if review.status == FloodReportStatus::Approved {
        match &review.water_level {
            Some(level) if level.is_assessable() => Some(level.clone()),
            _ => return Err(AppError::Validation(WATER_LEVEL_REQUIRED.to_string())),
        }
    } else {
        None
    };

    Ok(FloodReviewRequest {
        status: review.status.clone(),
        admin_note: review.admin_note.clone(),
        water_level,
    })
}

fn status_query(status: Option<&str>) -> Vec<(&'static str, &str)> {
    status
        .filter(|s| !s.is_empty())
        .map(|s| vec![("status", s)])
        .unwrap_or_default()
}

fn parse_base_url(raw: &str) -> AppResult<Url> {
    // Url::join drops the last path segment unless it ends with a slash.
    let normalized = format!("{}/", raw.trim().trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| AppError::Config(format!("Invalid base URL {raw}: {e}")))
}

async fn read_json(response: Response) -> AppResult<Value> {
    let text = response
        .text()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(AppError::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::status::WaterLevel;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = Config::default().with_base_url("http://localhost:5000/api");
        let client = HttpAdminClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("floodreports/admin/7/review").unwrap().as_str(),
            "http://localhost:5000/api/floodreports/admin/7/review"
        );
        assert_eq!(
            client.endpoint("/EventBanners").unwrap().as_str(),
            "http://localhost:5000/api/EventBanners"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = Config::default().with_base_url("not a url");
        assert!(matches!(
            HttpAdminClient::new(&config),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_status_query_omits_empty_filter() {
        assert!(status_query(None).is_empty());
        assert!(status_query(Some("")).is_empty());
        assert_eq!(status_query(Some("Pending")), vec![("status", "Pending")]);
    }

    #[test]
    fn test_sanitize_rejects_approval_without_level() {
        let review = FloodReviewRequest {
            status: FloodReportStatus::Approved,
            admin_note: String::new(),
            water_level: None,
        };
        assert_eq!(
            sanitize_flood_review(&review).unwrap_err(),
            AppError::Validation(WATER_LEVEL_REQUIRED.to_string())
        );

        let review = FloodReviewRequest {
            water_level: Some(WaterLevel::Unknown),
            ..review
        };
        assert!(sanitize_flood_review(&review).is_err());
    }

    #[test]
    fn test_sanitize_strips_level_from_other_statuses() {
        for status in [FloodReportStatus::Rejected, FloodReportStatus::Pending] {
            let review = FloodReviewRequest {
                status: status.clone(),
                admin_note: "ghi chú".to_string(),
                water_level: Some(WaterLevel::High),
            };
            let sanitized = sanitize_flood_review(&review).unwrap();
            assert_eq!(sanitized.status, status);
            assert!(sanitized.water_level.is_none());
        }
    }
}
