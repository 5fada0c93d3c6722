//! User directory page.

use smartcity_client::{SharedAdminApi, User};
use smartcity_common::AppResult;

use super::list_view::ListView;

/// Read-only list of registered users with a local search box.
pub struct UserDirectory {
    api: SharedAdminApi,
    users: ListView<User>,
}

impl UserDirectory {
    /// Create an empty directory; call [`Self::load`] to populate it.
    #[must_use]
    pub fn new(api: SharedAdminApi) -> Self {
        Self {
            api,
            users: ListView::default(),
        }
    }

    /// Fetch every user, replacing the local cache.
    pub async fn load(&mut self) -> AppResult<()> {
        let result = self.api.list_users().await;
        self.users.apply(result)
    }

    /// The cached collection.
    #[must_use]
    pub const fn users(&self) -> &ListView<User> {
        &self.users
    }

    /// Users whose email or full name contains `query`, ignoring case.
    ///
    /// Filters the cache only; nothing is fetched.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&User> {
        let needle = query.trim().to_lowercase();
        self.users
            .items()
            .iter()
            .filter(|user| needle.is_empty() || matches_query(user, &needle))
            .collect()
    }
}

fn matches_query(user: &User, needle: &str) -> bool {
    [user.email.as_deref(), user.full_name.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}
