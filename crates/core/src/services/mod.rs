//! Page-level services of the admin dashboard.

#![allow(missing_docs)]

pub mod dashboard;
pub mod events;
pub mod feedback;
pub mod flood;
pub mod list_view;
pub mod presentation;
pub mod users;

pub use dashboard::{
    Activity, ActivityKind, Dashboard, DashboardSnapshot, DashboardStats, LoadOutcome, Source,
    summarize,
};
pub use events::{BannerForm, DELETE_PROMPT, DeleteOutcome, EventBannerBoard};
pub use feedback::{FeedbackAction, FeedbackBoard, FeedbackReview, RESPONSE_REQUIRED};
pub use flood::{
    AiAssist, FloodAction, FloodReportBoard, FloodReview, NO_IMAGE, NOTE_PLACEHOLDER,
    WATER_LEVEL_MISSING, ai_note,
};
pub use list_view::ListView;
pub use presentation::{Presentable, StatusBadge, format_time_ago, status_color, water_level_option};
pub use users::UserDirectory;
