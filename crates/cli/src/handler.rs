//! Command Handlers

use chrono::Utc;
use smartcity_client::{
    EventBanner, EventBannerInput, FeedbackStatus, FloodReportStatus, HttpAdminClient,
    SharedAdminApi, WaterLevel,
};
use smartcity_common::{AppError, AppResult, Config};
use smartcity_core::{
    AiAssist, BannerForm, Dashboard, DeleteOutcome, EventBannerBoard, FeedbackBoard,
    FloodReportBoard, RESPONSE_REQUIRED, UserDirectory, WATER_LEVEL_MISSING,
};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, warn};

use crate::commands::{
    Cli, Commands, EventCommands, FeedbackActionArg, FeedbackCommands, FloodActionArg,
    FloodCommands, OutputFormat,
};
use crate::output;

const SAVED: &str = "✅ Cập nhật thành công!";

/// Build the HTTP backend client from configuration and flags.
pub fn connect(cli: &Cli) -> AppResult<SharedAdminApi> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = HttpAdminClient::new(&config)?;
    info!(base_url = %client.base_url(), "Using backend");
    Ok(Arc::new(client))
}

/// Run one command and return what it prints.
///
/// `confirm` is asked before a banner is deleted.
pub async fn run(
    cli: &Cli,
    api: SharedAdminApi,
    confirm: impl FnOnce(&EventBanner) -> bool + Send,
) -> AppResult<String> {
    let format = cli.format;
    match &cli.command {
        Commands::Dashboard => handle_dashboard(api, format).await,
        Commands::Users { search } => handle_users(api, search.as_deref(), format).await,
        Commands::Events(command) => handle_events(api, command, format, confirm).await,
        Commands::Feedback(command) => handle_feedback(api, command, format).await,
        Commands::Flood(command) => handle_flood(api, command, format).await,
    }
}

async fn handle_dashboard(api: SharedAdminApi, format: OutputFormat) -> AppResult<String> {
    let mut dashboard = Dashboard::new(api);
    let outcome = dashboard.load().await;
    let snapshot = dashboard.snapshot();

    let mut out = output::render(&snapshot, format, || {
        output::dashboard(&snapshot, Utc::now())
    })?;
    if format == OutputFormat::Table {
        for (source, err) in &outcome.failures {
            let _ = writeln!(
                out,
                "⚠️ Không tải được {source}: {}",
                err.user_message()
            );
        }
    }
    Ok(out)
}

async fn handle_users(
    api: SharedAdminApi,
    search: Option<&str>,
    format: OutputFormat,
) -> AppResult<String> {
    let mut directory = UserDirectory::new(api);
    directory.load().await?;
    let users = directory.filter(search.unwrap_or_default());
    output::render(&users, format, || output::users_table(&users))
}

async fn handle_events(
    api: SharedAdminApi,
    command: &EventCommands,
    format: OutputFormat,
    confirm: impl FnOnce(&EventBanner) -> bool + Send,
) -> AppResult<String> {
    let mut board = EventBannerBoard::new(api);
    board.load().await?;

    let message = match command {
        EventCommands::List => None,
        EventCommands::Create {
            title,
            description,
            image_url,
        } => {
            let form = BannerForm::create(EventBannerInput {
                title: title.clone(),
                description: description.clone(),
                image_url: image_url.clone(),
            });
            board.save(&form).await?;
            Some("✅ Đã thêm banner.".to_string())
        }
        EventCommands::Update {
            id,
            title,
            description,
            image_url,
        } => {
            let banner = board
                .get(*id)
                .ok_or_else(|| AppError::NotFound(format!("Event banner {id}")))?;
            let mut form = BannerForm::edit(banner);
            if let Some(title) = title {
                form.input.title.clone_from(title);
            }
            if let Some(description) = description {
                form.input.description.clone_from(description);
            }
            if let Some(image_url) = image_url {
                form.input.image_url.clone_from(image_url);
            }
            board.save(&form).await?;
            Some(format!("✅ Đã cập nhật banner #{id}."))
        }
        EventCommands::Delete { id, yes } => {
            let yes = *yes;
            match board.delete(*id, |b| yes || confirm(b)).await? {
                DeleteOutcome::Deleted => Some(format!("🗑️ Đã xóa banner #{id}.")),
                DeleteOutcome::Cancelled => Some("Đã hủy.".to_string()),
            }
        }
    };

    let banners = board.banners().items();
    let mut out = output::render(banners, format, || output::banners_table(banners))?;
    if let (Some(message), OutputFormat::Table) = (message, format) {
        out.insert_str(0, &format!("{message}\n\n"));
    }
    Ok(out)
}

async fn handle_feedback(
    api: SharedAdminApi,
    command: &FeedbackCommands,
    format: OutputFormat,
) -> AppResult<String> {
    let mut board = FeedbackBoard::new(api);
    match command {
        FeedbackCommands::List { status } => {
            board.set_filter(status.clone()).await?;
            let items = board.feedback().items();
            output::render(items, format, || output::feedback_table(items))
        }
        FeedbackCommands::Review {
            id,
            action,
            status,
            response,
        } => {
            review_feedback(
                &mut board,
                *id,
                *action,
                status.clone(),
                response.as_deref(),
                format,
            )
            .await
        }
    }
}

async fn review_feedback(
    board: &mut FeedbackBoard,
    id: i64,
    action: FeedbackActionArg,
    status: Option<FeedbackStatus>,
    response: Option<&str>,
    format: OutputFormat,
) -> AppResult<String> {
    board.load().await?;
    let mut review = board.open_review(id, action.into())?;
    if let Some(status) = status {
        review.set_target_status(status)?;
    }
    if let Some(response) = response {
        review.set_response(response);
    }
    if !review.can_submit() {
        return Err(AppError::Validation(RESPONSE_REQUIRED.to_string()));
    }

    board.submit(&review).await?;
    let updated = board.feedback().find(|f| f.id == id);
    output::render(&updated, format, || {
        format!(
            "{}: #{id} → {}\n{SAVED}\n",
            review.title(),
            review.target_status()
        )
    })
}

async fn handle_flood(
    api: SharedAdminApi,
    command: &FloodCommands,
    format: OutputFormat,
) -> AppResult<String> {
    let mut board = FloodReportBoard::new(api);
    match command {
        FloodCommands::List { status } => {
            board.set_filter(status.clone()).await?;
            let reports = board.reports().items();
            output::render(reports, format, || output::flood_table(reports))
        }
        FloodCommands::Review {
            id,
            action,
            status,
            water_level,
            note,
            ai,
        } => {
            let edits = FloodEdits {
                status: status.clone(),
                water_level: water_level.clone(),
                note: note.clone(),
                ai: *ai,
            };
            review_flood(&mut board, *id, *action, edits, format).await
        }
    }
}

struct FloodEdits {
    status: Option<FloodReportStatus>,
    water_level: Option<WaterLevel>,
    note: Option<String>,
    ai: bool,
}

async fn review_flood(
    board: &mut FloodReportBoard,
    id: i64,
    action: FloodActionArg,
    edits: FloodEdits,
    format: OutputFormat,
) -> AppResult<String> {
    board.load().await?;
    let mut review = board.open_review(id, action.into())?;
    if let Some(status) = edits.status {
        review.set_target_status(status)?;
    }

    let mut out = String::new();
    if edits.ai {
        // Explicit flags below still win over the suggestion.
        board.analyze(&mut review).await?;
        if let AiAssist::Done(analysis) = review.ai() {
            let _ = writeln!(
                out,
                "🤖 AI: {} ({}, độ tin cậy {})\n",
                analysis.water_level, analysis.estimated_depth, analysis.confidence
            );
        }
    }
    if let Some(level) = edits.water_level {
        review.set_water_level(level)?;
    }
    if let Some(note) = edits.note {
        review.set_note(note);
    }
    if !review.can_submit() {
        warn!(report_id = id, "Approval refused without a water level");
        return Err(AppError::Validation(WATER_LEVEL_MISSING.to_string()));
    }

    board.submit(&review).await?;
    let updated = board.reports().find(|r| r.id == id);
    if format == OutputFormat::Json {
        return output::json(&updated);
    }
    let _ = writeln!(out, "{}: #{id}", review.title());
    let _ = writeln!(out, "{} → {}", review.submit_label(), review.target_status());
    if let Some(level) = review.water_level() {
        let _ = writeln!(out, "{}", smartcity_core::water_level_option(level));
    }
    let _ = writeln!(out, "{SAVED}");
    Ok(out)
}

/// Process exit code for a failed command.
#[must_use]
pub const fn exit_code(err: &AppError) -> i32 {
    match err {
        AppError::Internal(_) => 1,
        AppError::Validation(_) => 2,
        AppError::NotFound(_) => 3,
        AppError::Config(_) => 4,
        AppError::Network(_) => 5,
        AppError::Api { .. } => 6,
        AppError::Decode(_) => 7,
    }
}
