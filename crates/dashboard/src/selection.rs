// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk-mode selection of users on the users overview.
//!
//! The selection only ever holds ids of rendered, non-admin users. Admin
//! rows have no checkbox: toggling them is a no-op and they are never part
//! of "select all".

use teamtune_api::UserInfo;
use teamtune_domain::{LifecycleAction, Role};

/// Bulk confirmation dialog currently shown, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulkDialog {
    /// No dialog is open.
    #[default]
    Closed,
    /// Confirmation for the given bulk action is open.
    Confirm(LifecycleAction),
}

/// Selected user ids plus the bulk-mode flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    active: bool,
    selected: Vec<String>,
    dialog: BulkDialog,
}

impl SelectionSet {
    /// Creates an inactive, empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            selected: Vec::new(),
            dialog: BulkDialog::Closed,
        }
    }

    /// Enters bulk mode with an empty selection.
    pub fn enter_bulk_mode(&mut self) {
        self.selected.clear();
        self.active = true;
    }

    /// Leaves bulk mode, clearing the selection and closing any open
    /// bulk confirmation dialog.
    pub fn exit_bulk_mode(&mut self) {
        self.selected.clear();
        self.active = false;
        self.dialog = BulkDialog::Closed;
    }

    /// Clears the selection but stays in bulk mode.
    pub fn cancel(&mut self) {
        self.selected.clear();
    }

    /// Returns true while bulk mode is on.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Flips membership of `user_id`.
    ///
    /// No-op for admins and outside bulk mode.
    pub fn toggle(&mut self, user_id: &str, role: Role) {
        if !self.active || role.is_admin() {
            return;
        }
        if let Some(index) = self.selected.iter().position(|id| id == user_id) {
            self.selected.remove(index);
        } else {
            self.selected.push(user_id.to_string());
        }
    }

    /// Selects every eligible user in `pool`, or clears the selection if
    /// it already holds exactly those users.
    ///
    /// A user is eligible when it is not an admin and `predicate` accepts
    /// it. Each eligible user is selected once, however often `pool` lists
    /// it. No-op outside bulk mode.
    pub fn select_all_eligible<F>(&mut self, pool: &[UserInfo], predicate: F)
    where
        F: Fn(&UserInfo) -> bool,
    {
        if !self.active {
            return;
        }
        let mut eligible: Vec<String> = Vec::new();
        for user in pool.iter().filter(|u| !u.role.is_admin() && predicate(u)) {
            // A pool can list the same user twice, e.g. across merged pages.
            if !eligible.contains(&user.id) {
                eligible.push(user.id.clone());
            }
        }

        let same_set: bool = eligible.len() == self.selected.len()
            && eligible.iter().all(|id| self.selected.contains(id));
        if same_set {
            self.selected.clear();
        } else {
            self.selected = eligible;
        }
    }

    /// Drops selected ids that are no longer rendered as eligible rows.
    ///
    /// Called whenever the visible pool changes, e.g. after a filter edit.
    pub fn retain_visible(&mut self, pool: &[UserInfo]) {
        self.selected
            .retain(|id| pool.iter().any(|u| &u.id == id && !u.role.is_admin()));
    }

    /// Returns true if `user_id` is selected.
    #[must_use]
    pub fn contains(&self, user_id: &str) -> bool {
        self.selected.iter().any(|id| id == user_id)
    }

    /// Selected ids, in selection order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.selected
    }

    /// Number of selected users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Opens the confirmation dialog for `action`.
    pub const fn open_dialog(&mut self, action: LifecycleAction) {
        self.dialog = BulkDialog::Confirm(action);
    }

    /// Dismisses the confirmation dialog. The selection is kept.
    pub const fn close_dialog(&mut self) {
        self.dialog = BulkDialog::Closed;
    }

    /// The dialog currently shown.
    #[must_use]
    pub const fn dialog(&self) -> BulkDialog {
        self.dialog
    }
}
