//! Overview page: counts, recent activity and status histograms.
//!
//! The four collections are fetched concurrently. Each source keeps its
//! last good copy, so a failed fetch leaves that source's numbers as they
//! were while the others refresh.

use chrono::{DateTime, Utc};
use serde::Serialize;
use smartcity_client::{
    EventBanner, FeedbackItem, FeedbackStatus, FloodReport, FloodReportStatus, RecordId,
    SharedAdminApi, User, author_name,
};
use smartcity_common::{AppError, AppResult};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use super::presentation::{format_time_ago, status_color};

const RECENT_FLOODS: usize = 5;
const RECENT_FEEDBACK: usize = 5;
const RECENT_USERS: usize = 3;
const ACTIVITY_LIMIT: usize = 10;
const RECENT_BANNERS: usize = 3;

/// Headline counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: usize,
    pub events: usize,
    pub feedbacks: usize,
    pub flood_reports: usize,
    pub pending_flood_reports: usize,
    pub pending_feedbacks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Flood,
    Feedback,
    User,
}

impl ActivityKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Flood => "🌊",
            Self::Feedback => "💬",
            Self::User => "👤",
        }
    }
}

/// One line of the recent activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub kind: ActivityKind,
    pub text: String,
    pub subtext: String,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub id: Option<RecordId>,
}

impl Activity {
    /// Accent color; new users are always blue.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match (&self.kind, &self.status) {
            (ActivityKind::User, _) => "#3b82f6",
            (_, Some(status)) => status_color(status),
            (_, None) => status_color(""),
        }
    }

    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        format_time_ago(self.created_at, now)
    }

    fn flood(report: &FloodReport) -> Self {
        Self {
            kind: ActivityKind::Flood,
            text: format!("Báo cáo ngập: {}", report.title),
            subtext: format!(
                "{} - {}",
                author_name(report.user.as_ref()),
                report.address.as_deref().unwrap_or("Không rõ địa điểm")
            ),
            status: Some(report.status.to_string()),
            created_at: report.created_at,
            id: Some(RecordId::Int(report.id)),
        }
    }

    fn feedback(item: &FeedbackItem) -> Self {
        Self {
            kind: ActivityKind::Feedback,
            text: format!("Feedback: {}", item.title),
            subtext: format!(
                "{} - {}",
                author_name(item.user.as_ref()),
                item.category.as_deref().unwrap_or("General")
            ),
            status: Some(item.status.to_string()),
            created_at: item.created_at,
            id: Some(RecordId::Int(item.id)),
        }
    }

    fn user(user: &User) -> Self {
        Self {
            kind: ActivityKind::User,
            text: format!("User mới: {}", user.display_name()),
            subtext: user.email.clone().unwrap_or_default(),
            status: None,
            created_at: user.created_at,
            id: Some(user.id.clone()),
        }
    }
}

/// Everything the overview page renders, derived from the cached collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_activity: Vec<Activity>,
    pub flood_status: BTreeMap<String, usize>,
    pub feedback_status: BTreeMap<String, usize>,
    pub recent_banners: Vec<EventBanner>,
}

/// A collection the dashboard fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Users,
    EventBanners,
    Feedback,
    FloodReports,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Users => "users",
            Self::EventBanners => "event banners",
            Self::Feedback => "feedback",
            Self::FloodReports => "flood reports",
        })
    }
}

/// Which fetches of the last load failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub failures: Vec<(Source, AppError)>,
}

impl LoadOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failed(&self, source: Source) -> bool {
        self.failures.iter().any(|(s, _)| *s == source)
    }
}

/// Overview page state.
pub struct Dashboard {
    api: SharedAdminApi,
    users: Vec<User>,
    banners: Vec<EventBanner>,
    feedback: Vec<FeedbackItem>,
    floods: Vec<FloodReport>,
}

impl Dashboard {
    #[must_use]
    pub const fn new(api: SharedAdminApi) -> Self {
        Self {
            api,
            users: Vec::new(),
            banners: Vec::new(),
            feedback: Vec::new(),
            floods: Vec::new(),
        }
    }

    /// Fetch all four collections concurrently.
    ///
    /// Never fails as a whole; failures are reported in the outcome and the
    /// affected collection keeps its previous copy.
    pub async fn load(&mut self) -> LoadOutcome {
        let (users, banners, feedback, floods) = tokio::join!(
            self.api.list_users(),
            self.api.list_event_banners(),
            self.api.list_feedback(None),
            self.api.list_flood_reports(None),
        );

        let mut outcome = LoadOutcome::default();
        keep_last_good(&mut self.users, users, Source::Users, &mut outcome);
        keep_last_good(&mut self.banners, banners, Source::EventBanners, &mut outcome);
        keep_last_good(&mut self.feedback, feedback, Source::Feedback, &mut outcome);
        keep_last_good(&mut self.floods, floods, Source::FloodReports, &mut outcome);
        debug!(failures = outcome.failures.len(), "Dashboard loaded");
        outcome
    }

    /// Derived view of the cached collections.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        summarize(&self.users, &self.banners, &self.feedback, &self.floods)
    }
}

fn keep_last_good<T>(
    slot: &mut Vec<T>,
    result: AppResult<Vec<T>>,
    source: Source,
    outcome: &mut LoadOutcome,
) {
    match result {
        Ok(items) => *slot = items,
        Err(err) => {
            warn!(%source, error = %err, "Dashboard fetch failed");
            outcome.failures.push((source, err));
        }
    }
}

fn histogram<'a>(statuses: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for status in statuses {
        let key = if status.is_empty() { "Unknown" } else { status };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Newest `n` records by creation time; undated records sort last.
fn newest<T>(items: &[T], n: usize, created_at: impl Fn(&T) -> Option<DateTime<Utc>>) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| Reverse(created_at(item)));
    sorted.truncate(n);
    sorted
}

/// Pure projection of the four collections.
#[must_use]
pub fn summarize(
    users: &[User],
    banners: &[EventBanner],
    feedback: &[FeedbackItem],
    floods: &[FloodReport],
) -> DashboardSnapshot {
    let stats = DashboardStats {
        users: users.len(),
        events: banners.len(),
        feedbacks: feedback.len(),
        flood_reports: floods.len(),
        pending_flood_reports: floods
            .iter()
            .filter(|r| r.status == FloodReportStatus::Pending)
            .count(),
        pending_feedbacks: feedback
            .iter()
            .filter(|f| f.status == FeedbackStatus::Pending)
            .count(),
    };

    let mut recent_activity: Vec<Activity> = newest(floods, RECENT_FLOODS, |r| r.created_at)
        .into_iter()
        .map(Activity::flood)
        .chain(
            newest(feedback, RECENT_FEEDBACK, |f| f.created_at)
                .into_iter()
                .map(Activity::feedback),
        )
        .chain(
            newest(users, RECENT_USERS, |u| u.created_at)
                .into_iter()
                .map(Activity::user),
        )
        .collect();
    recent_activity.sort_by_key(|a| Reverse(a.created_at));
    recent_activity.truncate(ACTIVITY_LIMIT);

    let mut recent_banners: Vec<EventBanner> = banners.to_vec();
    recent_banners.sort_by_key(|b| (Reverse(b.created_at), Reverse(b.id)));
    recent_banners.truncate(RECENT_BANNERS);

    DashboardSnapshot {
        stats,
        recent_activity,
        flood_status: histogram(floods.iter().map(|r| r.status.as_str())),
        feedback_status: histogram(feedback.iter().map(|f| f.status.as_str())),
        recent_banners,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 10, 5, 8, 0, 0).unwrap() + Duration::minutes(minutes))
    }

    fn flood(id: i64, status: FloodReportStatus, created_at: Option<DateTime<Utc>>) -> FloodReport {
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
            created_at,
        }
    }

    fn feedback(id: i64, status: FeedbackStatus, created_at: Option<DateTime<Utc>>) -> FeedbackItem {
        FeedbackItem {
            id,
            title: format!("Góp ý {id}"),
            description: None,
            category: None,
            status,
            user: None,
            created_at,
            admin_response: None,
        }
    }

    fn banner(id: i64, created_at: Option<DateTime<Utc>>) -> EventBanner {
        EventBanner {
            id,
            title: format!("Banner {id}"),
            description: None,
            image_url: None,
            created_at,
        }
    }

    #[test]
    fn test_stats_and_histograms() {
        let floods = vec![
            flood(1, FloodReportStatus::Pending, at(0)),
            flood(2, FloodReportStatus::Pending, at(1)),
            flood(3, FloodReportStatus::Approved, at(2)),
            flood(4, FloodReportStatus::parse("Archived"), at(3)),
        ];
        let items = vec![
            feedback(1, FeedbackStatus::Pending, at(0)),
            feedback(2, FeedbackStatus::Resolved, at(1)),
        ];

        let snapshot = summarize(&[], &[], &items, &floods);

        assert_eq!(snapshot.stats.flood_reports, 4);
        assert_eq!(snapshot.stats.pending_flood_reports, 2);
        assert_eq!(snapshot.stats.pending_feedbacks, 1);
        assert_eq!(snapshot.flood_status["Pending"], 2);
        assert_eq!(snapshot.flood_status["Archived"], 1);
        assert_eq!(snapshot.feedback_status.len(), 2);
    }

    #[test]
    fn test_activity_feed_is_capped_and_newest_first() {
        let floods: Vec<_> = (0..8)
            .map(|i| flood(i, FloodReportStatus::Pending, at(i)))
            .collect();
        let mut items: Vec<_> = (0..7)
            .map(|i| feedback(i, FeedbackStatus::Pending, at(i * 2)))
            .collect();
        items.push(feedback(99, FeedbackStatus::Pending, None));

        let snapshot = summarize(&[], &[], &items, &floods);
        let feed = &snapshot.recent_activity;

        assert_eq!(feed.len(), ACTIVITY_LIMIT);
        assert!(feed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        // Top five of each source only.
        assert!(feed.iter().all(|a| a.created_at.is_some()));
        assert_eq!(feed[0].text, "Feedback: Góp ý 6");
        assert_eq!(feed[0].subtext, "Ẩn danh - General");
    }

    #[test]
    fn test_undated_activity_sorts_last() {
        let floods = vec![flood(1, FloodReportStatus::Approved, None)];
        let items = vec![feedback(2, FeedbackStatus::Pending, at(0))];

        let snapshot = summarize(&[], &[], &items, &floods);

        assert_eq!(snapshot.recent_activity[0].kind, ActivityKind::Feedback);
        assert_eq!(snapshot.recent_activity[1].kind, ActivityKind::Flood);
        assert_eq!(
            snapshot.recent_activity[1].subtext,
            "Ẩn danh - Không rõ địa điểm"
        );
        assert_eq!(snapshot.recent_activity[1].color(), "#10b981");
    }

    #[test]
    fn test_recent_banners() {
        let banners = vec![
            banner(1, at(5)),
            banner(2, None),
            banner(3, at(9)),
            banner(4, at(1)),
            banner(5, at(9)),
        ];

        let snapshot = summarize(&[], &banners, &[], &[]);
        let ids: Vec<i64> = snapshot.recent_banners.iter().map(|b| b.id).collect();

        assert_eq!(ids, vec![5, 3, 1]);
    }
}
