// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filtering of the users overview.

use teamtune_api::UserInfo;
use teamtune_domain::{Role, UserStatus};

/// Search and dropdown filters of the users overview.
///
/// An empty search and `None` dropdowns match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of the name or email.
    pub search: String,
    /// Only users holding this role.
    pub role: Option<Role>,
    /// Only users in this status.
    pub status: Option<UserStatus>,
}

impl UserFilter {
    /// Returns true if `user` passes every filter.
    #[must_use]
    pub fn matches(&self, user: &UserInfo) -> bool {
        let needle: String = self.search.trim().to_lowercase();
        let search_ok: bool = needle.is_empty()
            || user.full_name.to_lowercase().contains(&needle)
            || user.email.to_lowercase().contains(&needle);

        search_ok
            && self.role.is_none_or(|role| user.role == role)
            && self.status.is_none_or(|status| user.status == status)
    }

    /// Returns the users that pass every filter, in their original order.
    #[must_use]
    pub fn apply(&self, users: &[UserInfo]) -> Vec<UserInfo> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }
}

/// Maps a users-overview tab to the status it shows. `all` shows every
/// status.
#[must_use]
pub fn status_for_tab(tab: &str) -> Option<UserStatus> {
    tab.parse::<UserStatus>().ok()
}

/// Counts shown on the users overview header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    /// All users.
    pub total: usize,
    /// Active users.
    pub active: usize,
    /// Users awaiting approval.
    pub pending: usize,
    /// Blocked users.
    pub blocked: usize,
}

impl UserStats {
    /// Counts `users` by status.
    #[must_use]
    pub fn from_users(users: &[UserInfo]) -> Self {
        users.iter().fold(
            Self {
                total: users.len(),
                ..Self::default()
            },
            |mut stats, user| {
                match user.status {
                    UserStatus::Active => stats.active += 1,
                    UserStatus::Pending => stats.pending += 1,
                    UserStatus::Blocked => stats.blocked += 1,
                }
                stats
            },
        )
    }
}
