//! Output Formatting
//!
//! Every renderer returns the text to print so commands can be tested
//! without capturing stdout.

use chrono::{DateTime, Utc};
use serde::Serialize;
use smartcity_client::{EventBanner, FeedbackItem, FloodReport, User, author_name};
use smartcity_common::{AppError, AppResult};
use smartcity_core::{DashboardSnapshot, FeedbackBoard, FloodReportBoard, Presentable};
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::commands::OutputFormat;

/// Render `data` as pretty JSON.
pub fn json<T: Serialize + ?Sized>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data).map_err(|e| AppError::Internal(e.to_string()))
}

/// Pick the JSON form or the table form.
pub fn render<T: Serialize + ?Sized>(
    data: &T,
    format: OutputFormat,
    table: impl FnOnce() -> String,
) -> AppResult<String> {
    match format {
        OutputFormat::Json => json(data),
        OutputFormat::Table => Ok(table()),
    }
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    let shown = truncate(text, width);
    let fill = width.saturating_sub(shown.chars().count());
    format!("{shown}{}", " ".repeat(fill))
}

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%d/%m/%Y %H:%M").to_string())
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count() + 2));
}

/// Table of users.
#[must_use]
pub fn users_table(users: &[&User]) -> String {
    let mut out = String::new();
    heading(&mut out, "👥 Quản lý Users");
    let _ = writeln!(
        out,
        "{} {} {} {} {}",
        pad("ID", 8),
        pad("Email", 30),
        pad("Họ tên", 24),
        pad("SĐT", 14),
        "Ngày tạo"
    );
    for user in users {
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            pad(&user.id.to_string(), 8),
            pad(user.email.as_deref().unwrap_or("-"), 30),
            pad(user.display_name(), 24),
            pad(user.phone_number.as_deref().unwrap_or("-"), 14),
            date(user.created_at)
        );
    }
    if users.is_empty() {
        let _ = writeln!(out, "Không có user nào.");
    }
    out
}

/// Table of event banners.
#[must_use]
pub fn banners_table(banners: &[EventBanner]) -> String {
    let mut out = String::new();
    heading(&mut out, "📢 Quản lý Sự kiện");
    let _ = writeln!(
        out,
        "{} {} {} {}",
        pad("ID", 6),
        pad("Tiêu đề", 28),
        pad("Mô tả", 36),
        "Hình ảnh"
    );
    for banner in banners {
        let _ = writeln!(
            out,
            "{} {} {} {}",
            pad(&banner.id.to_string(), 6),
            pad(&banner.title, 28),
            pad(banner.description.as_deref().unwrap_or("-"), 36),
            banner.image_url.as_deref().unwrap_or("-")
        );
    }
    if banners.is_empty() {
        let _ = writeln!(out, "Chưa có banner nào.");
    }
    out
}

/// Table of feedback with the row buttons each item offers.
#[must_use]
pub fn feedback_table(items: &[FeedbackItem]) -> String {
    let mut out = String::new();
    heading(&mut out, "💬 Quản lý Feedback");
    let _ = writeln!(
        out,
        "{} {} {} {} {} {}",
        pad("ID", 6),
        pad("Tiêu đề", 28),
        pad("Danh mục", 16),
        pad("Người gửi", 20),
        pad("Trạng thái", 18),
        "Thao tác"
    );
    for item in items {
        let actions: Vec<&str> = FeedbackBoard::actions_for(item)
            .iter()
            .map(|a| a.label())
            .collect();
        let _ = writeln!(
            out,
            "{} {} {} {} {} {}",
            pad(&item.id.to_string(), 6),
            pad(&item.title, 28),
            pad(item.category.as_deref().unwrap_or("General"), 16),
            pad(author_name(item.user.as_ref()), 20),
            pad(&item.status.badge().plain(), 18),
            actions.join(" | ")
        );
    }
    if items.is_empty() {
        let _ = writeln!(out, "Không có feedback nào.");
    }
    out
}

/// Table of flood reports with the row buttons each report offers.
#[must_use]
pub fn flood_table(reports: &[FloodReport]) -> String {
    let mut out = String::new();
    heading(&mut out, "🌊 Quản lý Báo cáo Ngập");
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} {}",
        pad("ID", 6),
        pad("Tiêu đề", 26),
        pad("Địa chỉ", 24),
        pad("Mức độ", 16),
        pad("Trạng thái", 14),
        pad("Ảnh", 4),
        "Thao tác"
    );
    for report in reports {
        let actions: Vec<&str> = FloodReportBoard::actions_for(report)
            .iter()
            .map(|a| a.label())
            .collect();
        let _ = writeln!(
            out,
            "{} {} {} {} {} {} {}",
            pad(&report.id.to_string(), 6),
            pad(&report.title, 26),
            pad(report.address.as_deref().unwrap_or("-"), 24),
            pad(&report.water_level_or_unknown().badge().plain(), 16),
            pad(&report.status.badge().plain(), 14),
            pad(if report.has_image() { "📷" } else { "-" }, 4),
            actions.join(" | ")
        );
    }
    if reports.is_empty() {
        let _ = writeln!(out, "Không có báo cáo nào.");
    }
    out
}

fn histogram(out: &mut String, title: &str, counts: &BTreeMap<String, usize>) {
    let _ = writeln!(out, "{title}:");
    if counts.is_empty() {
        let _ = writeln!(out, "  (không có dữ liệu)");
    }
    for (status, count) in counts {
        let _ = writeln!(out, "  {} {count}", pad(status, 12));
    }
}

/// Overview page.
#[must_use]
pub fn dashboard(snapshot: &DashboardSnapshot, now: DateTime<Utc>) -> String {
    let stats = &snapshot.stats;
    let mut out = String::new();
    heading(&mut out, "📊 Tổng quan");
    let _ = writeln!(out, "👥 Users:              {}", stats.users);
    let _ = writeln!(out, "📢 Sự kiện:            {}", stats.events);
    let _ = writeln!(
        out,
        "💬 Feedback:           {} ({} chờ xử lý)",
        stats.feedbacks, stats.pending_feedbacks
    );
    let _ = writeln!(
        out,
        "🌊 Báo cáo ngập:       {} ({} chờ duyệt)",
        stats.flood_reports, stats.pending_flood_reports
    );
    let _ = writeln!(out);

    histogram(&mut out, "Trạng thái báo cáo ngập", &snapshot.flood_status);
    histogram(&mut out, "Trạng thái feedback", &snapshot.feedback_status);
    let _ = writeln!(out);

    let _ = writeln!(out, "Hoạt động gần đây:");
    if snapshot.recent_activity.is_empty() {
        let _ = writeln!(out, "  Chưa có hoạt động nào");
    }
    for activity in &snapshot.recent_activity {
        let _ = writeln!(
            out,
            "  {} {} ({})",
            activity.kind.icon(),
            activity.text,
            activity.time_ago(now)
        );
        if !activity.subtext.is_empty() {
            let _ = writeln!(out, "     {}", activity.subtext);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Sự kiện mới nhất:");
    if snapshot.recent_banners.is_empty() {
        let _ = writeln!(out, "  Chưa có sự kiện nào");
    }
    for banner in &snapshot.recent_banners {
        let _ = writeln!(out, "  #{} {}", banner.id, banner.title);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcity_client::{FeedbackStatus, FloodReportStatus, WaterLevel};
    use smartcity_core::summarize;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Ngập", 10), "Ngập");
        assert_eq!(truncate("Ngập đường Nguyễn Huệ", 8), "Ngập đư…");
    }

    #[test]
    fn test_feedback_table_lists_row_actions() {
        let item = FeedbackItem {
            id: 1,
            title: "Đèn đường hỏng".to_string(),
            description: None,
            category: None,
            status: FeedbackStatus::Pending,
            user: None,
            created_at: None,
            admin_response: None,
        };

        let table = feedback_table(&[item]);

        assert!(table.starts_with("💬 Quản lý Feedback"));
        assert!(table.contains("⏳ Chờ xử lý"));
        assert!(table.contains("🔄 Tiếp nhận | ❌ Từ chối"));
        assert!(table.contains("General"));
    }

    #[test]
    fn test_flood_table_shows_water_level() {
        let report = FloodReport {
            id: 7,
            title: "Ngập sâu".to_string(),
            description: None,
            address: None,
            latitude: None,
            longitude: None,
            image_url: None,
            status: FloodReportStatus::Approved,
            water_level: Some(WaterLevel::High),
            admin_note: None,
            user: None,
            created_at: None,
        };

        let table = flood_table(&[report]);

        assert!(table.contains("🔴 Cao"));
        assert!(table.contains("👁️ Chi tiết"));
    }

    #[test]
    fn test_empty_dashboard() {
        let text = dashboard(&summarize(&[], &[], &[], &[]), Utc::now());
        assert!(text.contains("Chưa có hoạt động nào"));
        assert!(text.contains("(0 chờ duyệt)"));
    }
}
