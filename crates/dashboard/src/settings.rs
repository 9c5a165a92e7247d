// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Confirm-then-save editing of the organization settings.

use teamtune_api::{SettingsInfo, UpdateSettingsRequest};
use tracing::{info, warn};

use crate::error::DashboardError;
use crate::notification::Notification;
use crate::registry::UserRegistry;

/// Edits a draft of the settings and saves it after confirmation.
///
/// The draft is only sent once [`Self::request_save`] has opened the
/// confirmation and [`Self::confirm`] accepts it. A failed save keeps the
/// draft so it can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEditor {
    saved: SettingsInfo,
    draft: SettingsInfo,
    confirming: bool,
    notifications: Vec<Notification>,
}

impl SettingsEditor {
    /// Starts editing from `saved`.
    #[must_use]
    pub fn new(saved: SettingsInfo) -> Self {
        Self {
            draft: saved.clone(),
            saved,
            confirming: false,
            notifications: Vec::new(),
        }
    }

    /// Loads the current settings from `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be read.
    pub async fn load<R: UserRegistry>(registry: &R) -> Result<Self, DashboardError> {
        Ok(Self::new(registry.get_settings().await?))
    }

    /// The settings as last stored by the registry.
    #[must_use]
    pub const fn saved(&self) -> &SettingsInfo {
        &self.saved
    }

    /// The settings being edited.
    #[must_use]
    pub const fn draft(&self) -> &SettingsInfo {
        &self.draft
    }

    /// Mutable access to the draft.
    pub const fn draft_mut(&mut self) -> &mut SettingsInfo {
        &mut self.draft
    }

    /// Returns true if the draft differs from the stored settings.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    /// Returns true while the save confirmation is open.
    #[must_use]
    pub const fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Opens the save confirmation.
    pub const fn request_save(&mut self) {
        self.confirming = true;
    }

    /// Closes the confirmation without saving. The draft is kept.
    pub const fn cancel(&mut self) {
        self.confirming = false;
    }

    /// Throws the draft away.
    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
        self.confirming = false;
    }

    /// Notifications raised so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Removes and returns all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Sends the draft after the confirmation was accepted.
    ///
    /// On success the stored settings and the draft both become what the
    /// registry returned, which may be normalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the confirmation is not open, or the registry
    /// rejects or fails the update.
    pub async fn confirm<R: UserRegistry>(
        &mut self,
        registry: &R,
    ) -> Result<SettingsInfo, DashboardError> {
        if !self.confirming {
            return Err(DashboardError::Validation(String::from(
                "Save must be requested before it is confirmed",
            )));
        }
        self.confirming = false;

        let request: UpdateSettingsRequest = UpdateSettingsRequest {
            organization: self.draft.organization.clone(),
            authentication: self.draft.authentication,
        };
        match registry.update_settings(&request).await {
            Ok(stored) => {
                info!(name = %stored.organization.name, "Settings saved");
                self.saved = stored.clone();
                self.draft = stored.clone();
                self.notifications.push(Notification::success(
                    "Settings Updated",
                    "Your changes have been saved successfully.",
                ));
                Ok(stored)
            }
            Err(e) => {
                warn!(error = %e, "Saving settings failed");
                self.notifications.push(Notification::error(
                    "Error",
                    "Failed to save settings. Please try again.",
                ));
                Err(e)
            }
        }
    }
}

/// Splits a comma-separated domain list, dropping blank entries.
#[must_use]
pub fn parse_domain_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(ToString::to_string)
        .collect()
}
