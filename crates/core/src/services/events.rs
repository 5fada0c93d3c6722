//! Event banner page.

use smartcity_client::{EventBanner, EventBannerInput, SharedAdminApi};
use smartcity_common::{AppError, AppResult};
use tracing::info;
use validator::Validate;

use super::list_view::ListView;

/// Question asked before a banner is deleted.
pub const DELETE_PROMPT: &str = "Bạn có chắc muốn xóa Banner này?";

/// Create-or-edit form for a banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerForm {
    /// Banner being edited; `None` creates a new one.
    pub editing: Option<i64>,
    pub input: EventBannerInput,
}

impl BannerForm {
    /// Blank form for a new banner.
    #[must_use]
    pub fn create(input: EventBannerInput) -> Self {
        Self {
            editing: None,
            input,
        }
    }

    /// Form prefilled from an existing banner.
    #[must_use]
    pub fn edit(banner: &EventBanner) -> Self {
        Self {
            editing: Some(banner.id),
            input: EventBannerInput::from_banner(banner),
        }
    }

    /// Heading of the form.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Sửa Event Banner"
        } else {
            "Thêm Event Banner mới"
        }
    }
}

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
}

/// Event banner list with create, update and delete.
pub struct EventBannerBoard {
    api: SharedAdminApi,
    banners: ListView<EventBanner>,
}

impl EventBannerBoard {
    /// Create an empty board; call [`Self::load`] to populate it.
    #[must_use]
    pub fn new(api: SharedAdminApi) -> Self {
        Self {
            api,
            banners: ListView::default(),
        }
    }

    /// Fetch every banner, replacing the local cache.
    pub async fn load(&mut self) -> AppResult<()> {
        let result = self.api.list_event_banners().await;
        self.banners.apply(result)
    }

    /// The cached collection.
    #[must_use]
    pub const fn banners(&self) -> &ListView<EventBanner> {
        &self.banners
    }

    /// Cached banner by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&EventBanner> {
        self.banners.find(|b| b.id == id)
    }

    /// Submit a form: create or update, then reload.
    ///
    /// On failure the cache is left untouched so the form can be retried.
    pub async fn save(&mut self, form: &BannerForm) -> AppResult<()> {
        form.input.validate().map_err(|_| {
            AppError::Validation("Vui lòng điền đủ Title, Description và Image URL.".to_string())
        })?;

        match form.editing {
            Some(id) => self.api.update_event_banner(id, &form.input).await?,
            None => self.api.create_event_banner(&form.input).await?,
        }
        info!(banner_id = ?form.editing, title = %form.input.title, "Event banner saved");
        self.reload_after_write().await;
        Ok(())
    }

    /// Delete a banner after `confirm` approves it, then reload.
    pub async fn delete(
        &mut self,
        id: i64,
        confirm: impl FnOnce(&EventBanner) -> bool + Send,
    ) -> AppResult<DeleteOutcome> {
        let banner = self
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Event banner {id}")))?;
        if !confirm(banner) {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.api.delete_event_banner(id).await?;
        info!(banner_id = id, "Event banner deleted");
        self.reload_after_write().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Reload after a successful write; a failed reload is kept as the
    /// page error and does not undo the write.
    async fn reload_after_write(&mut self) {
        let _ = self.load().await;
    }
}
