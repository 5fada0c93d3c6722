//! Locally cached collection backing each list page.

use chrono::{DateTime, Utc};
use smartcity_common::AppResult;
use tracing::warn;

/// A collection fetched from the backend, replaced wholesale on every load.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            loaded_at: None,
        }
    }
}

impl<T> ListView<T> {
    /// Record the outcome of a fetch.
    ///
    /// Success replaces the cache and clears the error. Failure keeps the
    /// previous items but sets the error, which hides them from [`Self::visible`].
    pub fn apply(&mut self, result: AppResult<Vec<T>>) -> AppResult<()> {
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.loaded_at = Some(Utc::now());
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "List load failed");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Items to render, or `None` while the last load failed.
    #[must_use]
    pub fn visible(&self) -> Option<&[T]> {
        if self.error.is_some() {
            None
        } else {
            Some(&self.items)
        }
    }

    /// Last successfully loaded items, regardless of the error state.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Message of the last failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the cache was last replaced.
    #[must_use]
    pub const fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Whether no load has succeeded yet.
    #[must_use]
    pub const fn is_unloaded(&self) -> bool {
        self.loaded_at.is_none()
    }

    /// First item matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use smartcity_common::AppError;

    #[test]
    fn test_success_replaces_and_clears_error() {
        let mut view = ListView::default();
        assert!(view.is_unloaded());

        view.apply(Ok(vec![1, 2])).unwrap();
        assert_eq!(view.visible().unwrap(), &[1, 2]);

        view.apply(Ok(vec![3])).unwrap();
        assert_eq!(view.items(), &[3]);
        assert!(view.error().is_none());
        assert!(view.loaded_at().is_some());
    }

    #[test]
    fn test_failure_hides_items_but_keeps_them() {
        let mut view = ListView::default();
        view.apply(Ok(vec![1])).unwrap();

        let err = view
            .apply(Err(AppError::Network("connection refused".into())))
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
        assert!(view.visible().is_none());
        assert_eq!(view.error(), Some("connection refused"));
        assert_eq!(view.items(), &[1]);

        view.apply(Ok(vec![])).unwrap();
        assert_eq!(view.visible().unwrap(), &[] as &[i32]);
    }
}
