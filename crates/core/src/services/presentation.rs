//! Display metadata for statuses and severities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use smartcity_client::{FeedbackStatus, FloodReportStatus, WaterLevel};

/// Badge shown for a status or severity value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub icon: &'static str,
    pub label: String,
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

/// Palette entries shared by several badges.
#[derive(Clone, Copy)]
struct Palette {
    background: &'static str,
    text: &'static str,
    border: &'static str,
}

const AMBER: Palette = Palette {
    background: "#fef3c7",
    text: "#92400e",
    border: "#f59e0b",
};
const GREEN: Palette = Palette {
    background: "#d1fae5",
    text: "#065f46",
    border: "#10b981",
};
const RED: Palette = Palette {
    background: "#fee2e2",
    text: "#991b1b",
    border: "#ef4444",
};
const BLUE: Palette = Palette {
    background: "#dbeafe",
    text: "#1e40af",
    border: "#3b82f6",
};
const PURPLE: Palette = Palette {
    background: "#fae8ff",
    text: "#701a75",
    border: "#a855f7",
};
const GRAY: Palette = Palette {
    background: "#f3f4f6",
    text: "#4b5563",
    border: "#9ca3af",
};

fn badge(icon: &'static str, label: &str, palette: Palette) -> StatusBadge {
    StatusBadge {
        icon,
        label: label.to_string(),
        background: palette.background,
        text: palette.text,
        border: palette.border,
    }
}

/// Neutral badge for values the dashboard does not know.
fn unrecognized(raw: &str) -> StatusBadge {
    badge("❔", raw, GRAY)
}

/// Values that render as a [`StatusBadge`].
pub trait Presentable {
    /// Badge for this value.
    fn badge(&self) -> StatusBadge;
}

impl Presentable for FeedbackStatus {
    fn badge(&self) -> StatusBadge {
        match self {
            Self::Pending => badge("⏳", "Chờ xử lý", AMBER),
            Self::Processing => badge("🔄", "Đang xử lý", BLUE),
            Self::Resolved => badge("✅", "Đã giải quyết", GREEN),
            Self::Rejected => badge("❌", "Từ chối", RED),
            Self::Unrecognized(raw) => unrecognized(raw),
        }
    }
}

impl Presentable for FloodReportStatus {
    fn badge(&self) -> StatusBadge {
        match self {
            Self::Pending => badge("⏳", "Chờ duyệt", AMBER),
            Self::Approved => badge("✅", "Đã duyệt", GREEN),
            Self::Rejected => badge("❌", "Từ chối", RED),
            Self::Unrecognized(raw) => unrecognized(raw),
        }
    }
}

impl Presentable for WaterLevel {
    fn badge(&self) -> StatusBadge {
        match self {
            Self::Low => badge("🟢", "Thấp", GREEN),
            Self::Medium => badge("🟡", "Trung bình", AMBER),
            Self::High => badge("🔴", "Cao", RED),
            Self::Dangerous => badge("🟣", "Nguy hiểm", PURPLE),
            Self::Unknown => badge("⚪", "Chưa đánh giá", GRAY),
            Self::Unrecognized(raw) => unrecognized(raw),
        }
    }
}

impl StatusBadge {
    /// Icon and label, for plain-text output.
    #[must_use]
    pub fn plain(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

/// Accent color used for a status in the activity feed and charts.
#[must_use]
pub fn status_color(status: &str) -> &'static str {
    match status {
        "Pending" => "#f59e0b",
        "Approved" | "Resolved" => "#10b981",
        "Rejected" => "#ef4444",
        "Processing" => "#3b82f6",
        _ => "#6b7280",
    }
}

/// Relative age of a timestamp, as shown in the activity feed.
#[must_use]
pub fn format_time_ago(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return "Không rõ".to_string();
    };
    let minutes = (now - timestamp).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Vừa xong".to_string()
    } else if minutes < 60 {
        format!("{minutes} phút trước")
    } else if hours < 24 {
        format!("{hours} giờ trước")
    } else {
        format!("{days} ngày trước")
    }
}

/// Label of a water level option in the selector, e.g. `🔴 Cao (High) - Trên 40cm`.
#[must_use]
pub fn water_level_option(level: &WaterLevel) -> String {
    let badge = level.badge();
    format!(
        "{} {} ({}) - {}",
        badge.icon,
        badge.label,
        level.as_str(),
        level.description()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_known_badges() {
        assert_eq!(FloodReportStatus::Pending.badge().label, "Chờ duyệt");
        assert_eq!(FeedbackStatus::Processing.badge().icon, "🔄");
        assert_eq!(WaterLevel::Dangerous.badge().border, "#a855f7");
        assert_eq!(WaterLevel::Unknown.badge().label, "Chưa đánh giá");
    }

    #[test]
    fn test_unrecognized_badge_shows_raw_value() {
        let badge = FeedbackStatus::parse("Escalated").badge();
        assert_eq!(badge.icon, "❔");
        assert_eq!(badge.label, "Escalated");
        assert_eq!(badge.plain(), "❔ Escalated");
    }

    #[test]
    fn test_status_color() {
        assert_eq!(status_color("Resolved"), "#10b981");
        assert_eq!(status_color("Whatever"), "#6b7280");
    }

    #[test]
    fn test_format_time_ago() {
        let now = Utc::now();
        assert_eq!(format_time_ago(None, now), "Không rõ");
        assert_eq!(format_time_ago(Some(now), now), "Vừa xong");
        assert_eq!(
            format_time_ago(Some(now - Duration::minutes(5)), now),
            "5 phút trước"
        );
        assert_eq!(
            format_time_ago(Some(now - Duration::hours(3)), now),
            "3 giờ trước"
        );
        assert_eq!(
            format_time_ago(Some(now - Duration::days(2)), now),
            "2 ngày trước"
        );
    }

    #[test]
    fn test_water_level_option() {
        assert_eq!(
            water_level_option(&WaterLevel::High),
            "🔴 Cao (High) - Trên 40cm"
        );
    }
}
