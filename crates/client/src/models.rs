//! Records exchanged with the SmartCity backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

use crate::status::{AiConfidence, FeedbackStatus, FloodReportStatus, WaterLevel};
use crate::timestamp;

/// Shown wherever a record has no identifiable author.
pub const ANONYMOUS: &str = "Ẩn danh";

/// User identifier; the auth service issues either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Author embedded in feedback and flood reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserRef {
    /// Best available human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        [&self.full_name, &self.username, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
            .unwrap_or(ANONYMOUS)
    }
}

/// Display name of an optional author.
#[must_use]
pub fn author_name(user: Option<&UserRef>) -> &str {
    user.map_or(ANONYMOUS, UserRef::display_name)
}

/// Registered citizen account. Read-only from the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Full name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.username.as_deref())
            .unwrap_or(ANONYMOUS)
    }
}

/// Citizen feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub status: FeedbackStatus,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub admin_response: Option<String>,
}

/// Citizen-submitted flood observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodReport {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub status: FloodReportStatus,
    #[serde(default)]
    pub water_level: Option<WaterLevel>,
    #[serde(default)]
    pub admin_note: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FloodReport {
    /// Whether the report carries an image the analysis can look at.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Water level for display; missing means not assessed.
    #[must_use]
    pub fn water_level_or_unknown(&self) -> WaterLevel {
        self.water_level.clone().unwrap_or(WaterLevel::Unknown)
    }

    /// Map search link for the report's coordinates.
    #[must_use]
    pub fn map_link(&self) -> Option<String> {
        let (lat, lon) = (self.latitude?, self.longitude?);
        Some(format!(
            "http://google.com/maps/search/?api=1&query={lat},{lon}"
        ))
    }
}

/// Promotional or informational banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBanner {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of the AI image analysis. Never persisted client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysisResult {
    pub water_level: WaterLevel,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub estimated_depth: String,
    pub confidence: AiConfidence,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub analysis: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: String,
}

/// Body of `PUT /floodreports/admin/{id}/review`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodReviewRequest {
    pub status: FloodReportStatus,
    pub admin_note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_level: Option<WaterLevel>,
}

/// Body of `PUT /feedback/admin/{id}/respond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackResponseRequest {
    pub status: FeedbackStatus,
    pub response: String,
}

/// Body of banner create and update calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventBannerInput {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub image_url: String,
}

impl EventBannerInput {
    /// Prefill a form from an existing banner.
    #[must_use]
    pub fn from_banner(banner: &EventBanner) -> Self {
        Self {
            title: banner.title.clone(),
            description: banner.description.clone().unwrap_or_default(),
            image_url: banner.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Free text the backend may send as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flood_report_decodes_camel_case() {
        let report: FloodReport = serde_json::from_value(json!({
            "id": 7,
            "title": "Ngập đường Nguyễn Huệ",
            "address": "Quận 1",
            "latitude": 10.7769,
            "longitude": 106.7009,
            "imageUrl": "http://10.0.2.2:5000/uploads/7.jpg",
            "status": "Pending",
            "waterLevel": null,
            "createdAt": "2024-10-05T08:30:00",
            "user": { "fullName": "Trần Thị B" }
        }))
        .unwrap();

        assert_eq!(report.status, FloodReportStatus::Pending);
        assert!(report.water_level.is_none());
        assert_eq!(report.water_level_or_unknown(), WaterLevel::Unknown);
        assert!(report.has_image());
        assert!(report.created_at.is_some());
        assert_eq!(author_name(report.user.as_ref()), "Trần Thị B");
        assert_eq!(
            report.map_link().unwrap(),
            "http://google.com/maps/search/?api=1&query=10.7769,106.7009"
        );
    }

    #[test]
    fn test_null_free_text_decodes_as_empty() {
        let banner: EventBanner =
            serde_json::from_value(json!({ "id": 3, "title": null })).unwrap();
        assert_eq!(banner.title, "");

        let analysis: AiAnalysisResult = serde_json::from_value(json!({
            "waterLevel": "Medium",
            "estimatedDepth": null,
            "confidence": "Low",
            "analysis": null,
            "recommendations": "Theo dõi thêm"
        }))
        .unwrap();
        assert_eq!(analysis.water_level, WaterLevel::Medium);
        assert!(analysis.estimated_depth.is_empty());
        assert!(analysis.analysis.is_empty());
        assert_eq!(analysis.recommendations, "Theo dõi thêm");
    }

    #[test]
    fn test_user_accepts_snake_case_created_at_and_string_id() {
        let user: User = serde_json::from_value(json!({
            "id": "5f0c",
            "email": "a@example.com",
            "created_at": "2024-01-02T03:04:05Z"
        }))
        .unwrap();
        assert_eq!(user.id, RecordId::Text("5f0c".to_string()));
        assert!(user.created_at.is_some());
        assert_eq!(user.display_name(), ANONYMOUS);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let user = UserRef {
            username: Some("nguyenvana".to_string()),
            email: Some("a@example.com".to_string()),
            ..UserRef::default()
        };
        assert_eq!(user.display_name(), "nguyenvana");
        assert_eq!(author_name(None), ANONYMOUS);
    }

    #[test]
    fn test_flood_review_omits_absent_water_level() {
        let body = serde_json::to_value(FloodReviewRequest {
            status: FloodReportStatus::Rejected,
            admin_note: "Ảnh không rõ".to_string(),
            water_level: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "status": "Rejected", "adminNote": "Ảnh không rõ" }));
    }

    #[test]
    fn test_banner_input_requires_all_fields() {
        let input = EventBannerInput {
            title: "Lễ hội".to_string(),
            description: "  ".to_string(),
            image_url: "https://cdn.example.com/b.png".to_string(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));

        let input = EventBannerInput {
            description: "Mô tả".to_string(),
            ..input
        };
        assert!(input.validate().is_ok());
    }
}
