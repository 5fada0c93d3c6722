//! Feedback triage page and its review workflow.

use smartcity_client::{FeedbackItem, FeedbackResponseRequest, FeedbackStatus, SharedAdminApi};
use smartcity_common::{AppError, AppResult};
use tracing::info;

use super::list_view::ListView;

/// Shown when a review is submitted without a response.
pub const RESPONSE_REQUIRED: &str = "Vui lòng nhập phản hồi của admin.";

/// Row button on the feedback list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackAction {
    /// Pending to Processing.
    Accept,
    /// Pending to Rejected.
    Reject,
    /// Processing to Resolved.
    Resolve,
    /// Open a terminal record with its current status.
    ViewDetails,
}

impl FeedbackAction {
    /// Buttons offered for a record in `status`.
    #[must_use]
    pub const fn available_for(status: &FeedbackStatus) -> &'static [Self] {
        match status {
            FeedbackStatus::Pending => &[Self::Accept, Self::Reject],
            FeedbackStatus::Processing => &[Self::Resolve],
            _ => &[Self::ViewDetails],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accept => "🔄 Tiếp nhận",
            Self::Reject => "❌ Từ chối",
            Self::Resolve => "✅ Giải quyết",
            Self::ViewDetails => "👁️ Chi tiết",
        }
    }

    /// Status the review starts with when this button is pressed.
    fn target(self, current: &FeedbackStatus) -> FeedbackStatus {
        match self {
            Self::Accept => FeedbackStatus::Processing,
            Self::Reject => FeedbackStatus::Rejected,
            Self::Resolve => FeedbackStatus::Resolved,
            Self::ViewDetails => current.clone(),
        }
    }
}

/// Working copy of one feedback record while the operator reviews it.
///
/// Dropping the review discards every working field; the list is never
/// touched until a submit succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackReview {
    item: FeedbackItem,
    target: FeedbackStatus,
    response: String,
}

impl FeedbackReview {
    /// Start a review of `item` from one of its row buttons.
    pub fn open(item: FeedbackItem, action: FeedbackAction) -> AppResult<Self> {
        if !FeedbackAction::available_for(&item.status).contains(&action) {
            return Err(AppError::Validation(format!(
                "Action {action:?} is not available for feedback in status {}",
                item.status
            )));
        }
        let target = action.target(&item.status);
        let response = item.admin_response.clone().unwrap_or_default();
        Ok(Self {
            item,
            target,
            response,
        })
    }

    /// The record under review, as loaded.
    #[must_use]
    pub const fn item(&self) -> &FeedbackItem {
        &self.item
    }

    #[must_use]
    pub const fn target_status(&self) -> &FeedbackStatus {
        &self.target
    }

    #[must_use]
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Statuses offered by the manual override selector.
    ///
    /// Empty unless the record already reached Resolved or Rejected, or
    /// carries a status this console does not know.
    #[must_use]
    pub fn override_options(&self) -> Vec<FeedbackStatus> {
        if self.item.status.is_terminal() || !self.item.status.is_recognized() {
            FeedbackStatus::ALL.to_vec()
        } else {
            Vec::new()
        }
    }

    /// Pick a different target status through the override selector.
    pub fn set_target_status(&mut self, status: FeedbackStatus) -> AppResult<()> {
        if !self.override_options().contains(&status) {
            return Err(AppError::Validation(format!(
                "Cannot move feedback {} to {status}",
                self.item.id
            )));
        }
        self.target = status;
        Ok(())
    }

    pub fn set_response(&mut self, response: impl Into<String>) {
        self.response = response.into();
    }

    /// Submit stays disabled while the response is blank.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.response.trim().is_empty()
    }

    /// Modal heading; also used as the submit label.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.target {
            FeedbackStatus::Processing => "Xác nhận tiếp nhận",
            FeedbackStatus::Resolved => "Xác nhận giải quyết",
            FeedbackStatus::Rejected => "Xác nhận từ chối",
            FeedbackStatus::Pending => "Xác nhận chuyển sang Chờ xử lý",
            FeedbackStatus::Unrecognized(_) => "Cập nhật trạng thái",
        }
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        self.title()
    }

    /// Example text for the response field.
    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        match self.target {
            FeedbackStatus::Processing => {
                "VD: Chúng tôi đã ghi nhận phản ánh và sẽ xử lý trong 7 ngày tới. Cảm ơn bạn!"
            }
            FeedbackStatus::Resolved => "VD: Vấn đề đã được khắc phục. Cảm ơn bạn đã góp ý!",
            _ => "VD: Phản ánh không hợp lệ vì...",
        }
    }

    /// Guidance shown under the response field.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self.target {
            FeedbackStatus::Pending => Some("Ghi rõ lý do cần chuyển lại trạng thái Chờ xử lý."),
            FeedbackStatus::Processing => Some("Thông báo cho người dùng rằng bạn đang xử lý"),
            FeedbackStatus::Resolved => Some("Giải thích cách bạn đã giải quyết vấn đề"),
            FeedbackStatus::Rejected => Some("Nêu rõ lý do từ chối"),
            FeedbackStatus::Unrecognized(_) => None,
        }
    }

    /// Request body for the respond endpoint. The response is sent as typed.
    pub fn build_request(&self) -> AppResult<FeedbackResponseRequest> {
        if !self.can_submit() {
            return Err(AppError::Validation(RESPONSE_REQUIRED.to_string()));
        }
        Ok(FeedbackResponseRequest {
            status: self.target.clone(),
            response: self.response.clone(),
        })
    }
}

/// Feedback list with a server-side status filter.
pub struct FeedbackBoard {
    api: SharedAdminApi,
    filter: Option<FeedbackStatus>,
    feedback: ListView<FeedbackItem>,
}

impl FeedbackBoard {
    #[must_use]
    pub fn new(api: SharedAdminApi) -> Self {
        Self {
            api,
            filter: None,
            feedback: ListView::default(),
        }
    }

    /// Fetch feedback matching the current filter.
    pub async fn load(&mut self) -> AppResult<()> {
        let result = self.api.list_feedback(self.filter.as_ref()).await;
        self.feedback.apply(result)
    }

    /// Change the status filter and reload.
    pub async fn set_filter(&mut self, filter: Option<FeedbackStatus>) -> AppResult<()> {
        self.filter = filter;
        self.load().await
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&FeedbackStatus> {
        self.filter.as_ref()
    }

    #[must_use]
    pub const fn feedback(&self) -> &ListView<FeedbackItem> {
        &self.feedback
    }

    /// Row buttons for a record.
    #[must_use]
    pub const fn actions_for(item: &FeedbackItem) -> &'static [FeedbackAction] {
        FeedbackAction::available_for(&item.status)
    }

    /// Open a review of cached record `id`.
    pub fn open_review(&self, id: i64, action: FeedbackAction) -> AppResult<FeedbackReview> {
        let item = self
            .feedback
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Feedback {id}")))?;
        FeedbackReview::open(item.clone(), action)
    }

    /// Send the review, then reload the list.
    ///
    /// On failure the review is left as it was so the operator can retry.
    pub async fn submit(&mut self, review: &FeedbackReview) -> AppResult<()> {
        let request = review.build_request()?;
        let id = review.item.id;
        self.api.respond_to_feedback(id, &request).await?;
        info!(feedback_id = id, status = %request.status, "Feedback review submitted");
        self.reload_after_write().await;
        Ok(())
    }

    /// Reload after a successful review; a failed reload is kept as the
    /// list error and does not undo the review.
    async fn reload_after_write(&mut self) {
        let _ = self.load().await;
    }
}
