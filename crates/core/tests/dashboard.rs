//! Dashboard aggregation integration tests

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{TimeZone, Utc};
use smartcity_client::{
    EventBanner, FeedbackItem, FeedbackStatus, FloodReport, FloodReportStatus, RecordId, User,
};
use smartcity_common::AppError;
use smartcity_core::testing::{Endpoint, RecordingApi};
use smartcity_core::{ActivityKind, Dashboard, Source};
use std::sync::Arc;

fn user(id: i64) -> User {
    User {
        id: RecordId::Int(id),
        email: Some(format!("user{id}@example.com")),
        full_name: Some(format!("Người dùng {id}")),
        username: None,
        phone_number: None,
        created_at: Some(Utc.with_ymd_and_hms(2024, 10, 1, 9, 0, 0).unwrap()),
    }
}

fn banner(id: i64) -> EventBanner {
    EventBanner {
        id,
        title: format!("Sự kiện {id}"),
        description: None,
        image_url: None,
        created_at: None,
    }
}

fn feedback(id: i64, status: FeedbackStatus) -> FeedbackItem {
    FeedbackItem {
        id,
        title: format!("Góp ý {id}"),
        description: None,
        category: None,
        status,
        user: None,
        created_at: None,
        admin_response: None,
    }
}

fn flood(id: i64, status: FloodReportStatus) -> FloodReport {
    FloodReport {
        id,
        title: format!("Ngập {id}"),
        description: None,
        address: None,
        latitude: None,
        longitude: None,
        image_url: None,
        status,
        water_level: None,
        admin_note: None,
        user: None,
        created_at: Some(Utc.with_ymd_and_hms(2024, 10, 5, 8, 0, 0).unwrap()),
    }
}

fn seeded_api() -> Arc<RecordingApi> {
    let api = Arc::new(RecordingApi::default());
    api.set_users(vec![user(1), user(2)]);
    api.set_banners(vec![banner(1)]);
    api.set_feedback(vec![
        feedback(1, FeedbackStatus::Pending),
        feedback(2, FeedbackStatus::Resolved),
        feedback(3, FeedbackStatus::Pending),
    ]);
    api.set_flood_reports(vec![
        flood(1, FloodReportStatus::Pending),
        flood(2, FloodReportStatus::Approved),
    ]);
    api
}

#[tokio::test]
async fn full_load_populates_everything() {
    let api = seeded_api();
    let mut dashboard = Dashboard::new(api.clone());

    let outcome = dashboard.load().await;
    let snapshot = dashboard.snapshot();

    assert!(outcome.is_complete());
    assert_eq!(api.calls().len(), 4);
    assert_eq!(snapshot.stats.users, 2);
    assert_eq!(snapshot.stats.events, 1);
    assert_eq!(snapshot.stats.feedbacks, 3);
    assert_eq!(snapshot.stats.pending_feedbacks, 2);
    assert_eq!(snapshot.stats.flood_reports, 2);
    assert_eq!(snapshot.stats.pending_flood_reports, 1);
    assert_eq!(snapshot.recent_activity[0].kind, ActivityKind::Flood);
    assert_eq!(snapshot.recent_activity.len(), 7);
}

#[tokio::test]
async fn failed_feedback_fetch_leaves_other_counts_populated() {
    let api = seeded_api();
    api.fail(
        Endpoint::ListFeedback,
        AppError::Network("connection reset".to_string()),
    );
    let mut dashboard = Dashboard::new(api.clone());

    let outcome = dashboard.load().await;
    let snapshot = dashboard.snapshot();

    assert!(outcome.failed(Source::Feedback));
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(snapshot.stats.users, 2);
    assert_eq!(snapshot.stats.events, 1);
    assert_eq!(snapshot.stats.flood_reports, 2);
    assert_eq!(snapshot.stats.feedbacks, 0);
    assert!(snapshot.feedback_status.is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_copy() {
    let api = seeded_api();
    let mut dashboard = Dashboard::new(api.clone());
    assert!(dashboard.load().await.is_complete());

    api.set_flood_reports(vec![flood(9, FloodReportStatus::Pending)]);
    api.fail(
        Endpoint::ListFeedback,
        AppError::api(500, Some("Internal Server Error".to_string())),
    );
    let outcome = dashboard.load().await;
    let snapshot = dashboard.snapshot();

    assert!(!outcome.is_complete());
    assert_eq!(snapshot.stats.feedbacks, 3);
    assert_eq!(snapshot.stats.flood_reports, 1);

    api.recover(Endpoint::ListFeedback);
    assert!(dashboard.load().await.is_complete());
}
