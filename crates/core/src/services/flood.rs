//! Flood report review page, including the AI image analysis assist.

use smartcity_client::{
    AiAnalysisResult, FloodReport, FloodReportStatus, FloodReviewRequest, SharedAdminApi,
    WaterLevel,
};
use smartcity_common::{AppError, AppResult};
use tracing::{info, warn};

use super::list_view::ListView;

/// Shown when an approval is submitted without a water level.
pub const WATER_LEVEL_MISSING: &str = "Vui lòng chọn mức độ ngập trước khi duyệt!";

/// Shown when the analysis is requested for a report without an image.
pub const NO_IMAGE: &str = "Báo cáo không có hình ảnh để phân tích!";

/// Placeholder of the admin note field.
pub const NOTE_PLACEHOLDER: &str = "Nhập ghi chú (tùy chọn)...";

/// Row button on the flood report list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloodAction {
    Approve,
    Reject,
    /// Open a reviewed report with its current status.
    ViewDetails,
}

impl FloodAction {
    /// Buttons offered for a report in `status`.
    #[must_use]
    pub const fn available_for(status: &FloodReportStatus) -> &'static [Self] {
        match status {
            FloodReportStatus::Pending => &[Self::Approve, Self::Reject],
            _ => &[Self::ViewDetails],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "✅ Duyệt",
            Self::Reject => "❌ Từ chối",
            Self::ViewDetails => "👁️ Chi tiết",
        }
    }

    fn target(self, current: &FloodReportStatus) -> FloodReportStatus {
        match self {
            Self::Approve => FloodReportStatus::Approved,
            Self::Reject => FloodReportStatus::Rejected,
            Self::ViewDetails => current.clone(),
        }
    }
}

/// Progress of the AI assist within one review.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AiAssist {
    #[default]
    Idle,
    Analyzing,
    Done(AiAnalysisResult),
    Failed(String),
}

/// Working copy of one flood report while the operator reviews it.
#[derive(Debug, Clone, PartialEq)]
pub struct FloodReview {
    report: FloodReport,
    target: FloodReportStatus,
    water_level: Option<WaterLevel>,
    note: String,
    ai: AiAssist,
}

impl FloodReview {
    /// Start a review of `report` from one of its row buttons.
    ///
    /// The report's own water level and note seed the working fields.
    pub fn open(report: FloodReport, action: FloodAction) -> AppResult<Self> {
        if !FloodAction::available_for(&report.status).contains(&action) {
            return Err(AppError::Validation(format!(
                "Action {action:?} is not available for a flood report in status {}",
                report.status
            )));
        }
        let target = action.target(&report.status);
        let mut review = Self {
            note: report.admin_note.clone().unwrap_or_default(),
            water_level: None,
            target,
            report,
            ai: AiAssist::Idle,
        };
        review.water_level = review.seeded_water_level();
        Ok(review)
    }

    /// Level carried over when the working status is Approved.
    fn seeded_water_level(&self) -> Option<WaterLevel> {
        if self.target != FloodReportStatus::Approved {
            return None;
        }
        self.report
            .water_level
            .clone()
            .filter(WaterLevel::is_assessable)
    }

    #[must_use]
    pub const fn report(&self) -> &FloodReport {
        &self.report
    }

    #[must_use]
    pub const fn target_status(&self) -> &FloodReportStatus {
        &self.target
    }

    #[must_use]
    pub const fn water_level(&self) -> Option<&WaterLevel> {
        self.water_level.as_ref()
    }

    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    #[must_use]
    pub const fn ai(&self) -> &AiAssist {
        &self.ai
    }

    /// Statuses offered by the manual override selector; empty for Pending reports.
    #[must_use]
    pub fn override_options(&self) -> Vec<FloodReportStatus> {
        if self.report.status == FloodReportStatus::Pending {
            Vec::new()
        } else {
            FloodReportStatus::ALL.to_vec()
        }
    }

    /// Pick a different target status through the override selector.
    ///
    /// Leaving Approved clears the water level; returning to it restores
    /// the level the report already had.
    pub fn set_target_status(&mut self, status: FloodReportStatus) -> AppResult<()> {
        if !self.override_options().contains(&status) {
            return Err(AppError::Validation(format!(
                "Cannot move flood report {} to {status}",
                self.report.id
            )));
        }
        self.target = status;
        self.water_level = self.seeded_water_level();
        Ok(())
    }

    /// Levels the selector offers; only shown while approving.
    #[must_use]
    pub fn water_level_options(&self) -> Vec<WaterLevel> {
        if self.target == FloodReportStatus::Approved {
            WaterLevel::ASSESSABLE.to_vec()
        } else {
            Vec::new()
        }
    }

    pub fn set_water_level(&mut self, level: WaterLevel) -> AppResult<()> {
        if !self.water_level_options().contains(&level) {
            return Err(AppError::Validation(format!(
                "Water level {level} cannot be selected while the status is {}",
                self.target
            )));
        }
        self.water_level = Some(level);
        Ok(())
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Approvals need an assessed water level; everything else can go.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.target != FloodReportStatus::Approved
            || self
                .water_level
                .as_ref()
                .is_some_and(WaterLevel::is_assessable)
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match (&self.report.status, &self.target) {
            (FloodReportStatus::Pending, FloodReportStatus::Approved) => "✅ Duyệt báo cáo",
            (FloodReportStatus::Pending, _) => "❌ Từ chối báo cáo",
            _ => "🔄 Cập nhật/Xem chi tiết báo cáo",
        }
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.target {
            FloodReportStatus::Approved => "✅ Xác nhận Duyệt",
            FloodReportStatus::Rejected => "❌ Xác nhận Từ chối",
            _ => "🔄 Cập nhật",
        }
    }

    /// Request body for the review endpoint. Only approvals carry a level.
    pub fn build_request(&self) -> AppResult<FloodReviewRequest> {
        if !self.can_submit() {
            return Err(AppError::Validation(WATER_LEVEL_MISSING.to_string()));
        }
        let water_level = if self.target == FloodReportStatus::Approved {
            self.water_level.clone()
        } else {
            None
        };
        Ok(FloodReviewRequest {
            status: self.target.clone(),
            admin_note: self.note.clone(),
            water_level,
        })
    }

    /// The analysis trigger is usable.
    #[must_use]
    pub fn can_analyze(&self) -> bool {
        self.report.has_image() && self.ai != AiAssist::Analyzing
    }

    #[must_use]
    pub fn analyze_label(&self) -> &'static str {
        if self.ai == AiAssist::Analyzing {
            "⏳ Đang phân tích..."
        } else {
            "🚀 Phân tích ngay"
        }
    }

    /// Mark the analysis as in flight.
    pub fn begin_analysis(&mut self) -> AppResult<()> {
        if !self.report.has_image() {
            return Err(AppError::Validation(NO_IMAGE.to_string()));
        }
        if self.ai == AiAssist::Analyzing {
            return Err(AppError::Validation(
                "Analysis is already running".to_string(),
            ));
        }
        self.ai = AiAssist::Analyzing;
        Ok(())
    }

    /// Record the analysis outcome.
    ///
    /// Success fills in a structured note, and the water level while the
    /// working status is Approved. Failure leaves both untouched.
    pub fn finish_analysis(&mut self, result: AppResult<AiAnalysisResult>) -> AppResult<()> {
        match result {
            Ok(analysis) => {
                self.water_level = Some(analysis.water_level.clone())
                    .filter(|level| {
                        self.target == FloodReportStatus::Approved && level.is_assessable()
                    });
                self.note = ai_note(&analysis);
                self.ai = AiAssist::Done(analysis);
                Ok(())
            }
            Err(err) => {
                self.ai = AiAssist::Failed(err.user_message());
                Err(err)
            }
        }
    }
}

/// Admin note prefilled from an analysis.
#[must_use]
pub fn ai_note(analysis: &AiAnalysisResult) -> String {
    format!(
        "🤖 AI Phân tích:\n\n📊 Độ sâu ước tính: {}\n🎯 Độ tin cậy: {}\n\n📝 Chi tiết:\n{}\n\n💡 Khuyến nghị:\n{}",
        analysis.estimated_depth, analysis.confidence, analysis.analysis, analysis.recommendations
    )
}

/// Flood report list with a server-side status filter.
pub struct FloodReportBoard {
    api: SharedAdminApi,
    filter: Option<FloodReportStatus>,
    reports: ListView<FloodReport>,
}

impl FloodReportBoard {
    #[must_use]
    pub fn new(api: SharedAdminApi) -> Self {
        Self {
            api,
            filter: None,
            reports: ListView::default(),
        }
    }

    pub async fn load(&mut self) -> AppResult<()> {
        let result = self.api.list_flood_reports(self.filter.as_ref()).await;
        self.reports.apply(result)
    }

    /// Change the status filter and reload.
    pub async fn set_filter(&mut self, filter: Option<FloodReportStatus>) -> AppResult<()> {
        self.filter = filter;
        self.load().await
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&FloodReportStatus> {
        self.filter.as_ref()
    }

    #[must_use]
    pub const fn reports(&self) -> &ListView<FloodReport> {
        &self.reports
    }

    #[must_use]
    pub const fn actions_for(report: &FloodReport) -> &'static [FloodAction] {
        FloodAction::available_for(&report.status)
    }

    /// Open a review of cached report `id`.
    pub fn open_review(&self, id: i64, action: FloodAction) -> AppResult<FloodReview> {
        let report = self
            .reports
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Flood report {id}")))?;
        FloodReview::open(report.clone(), action)
    }

    /// Run the AI analysis for the report under review.
    ///
    /// Only the review's working fields change; nothing is submitted.
    pub async fn analyze(&self, review: &mut FloodReview) -> AppResult<()> {
        review.begin_analysis()?;
        let id = review.report.id;
        let result = self.api.analyze_flood_image(id).await;
        if let Err(err) = &result {
            warn!(report_id = id, error = %err, "AI flood analysis failed");
        }
        review.finish_analysis(result)
    }

    /// Send the review, then reload the list.
    pub async fn submit(&mut self, review: &FloodReview) -> AppResult<()> {
        let request = review.build_request()?;
        let id = review.report.id;
        self.api.review_flood_report(id, &request).await?;
        info!(
            report_id = id,
            status = %request.status,
            water_level = ?request.water_level,
            "Flood report review submitted"
        );
        self.reload_after_write().await;
        Ok(())
    }

    /// Reload after a successful review; a failed reload is kept as the
    /// list error and does not undo the review.
    async fn reload_after_write(&mut self) {
        let _ = self.load().await;
    }
}
