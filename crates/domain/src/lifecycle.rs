// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User lifecycle actions and their eligibility rules.
//!
//! Every action an admin can take on a user account (approve, reject,
//! block, unblock, delete) is checked here against the user's current
//! role and status. Admin accounts are never eligible. A failed check is
//! a per-user outcome: bulk operations record it and move on to the
//! next user.

use crate::error::DomainError;
use crate::types::{User, UserStatus};
use serde::{Deserialize, Serialize};

/// An admin action that changes a user's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    /// Pending → active, optionally assigning role and department.
    Approve,
    /// Pending → blocked, recording a reason.
    Reject,
    /// Active → blocked.
    Block,
    /// Blocked → active.
    Unblock,
    /// Removes the user permanently.
    Delete,
}

impl LifecycleAction {
    /// Returns the past-tense verb used in result field names and messages.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::Block => "blocked",
            Self::Unblock => "unblocked",
            Self::Delete => "deleted",
        }
    }

    /// Returns the command name recorded in audit events.
    #[must_use]
    pub const fn audit_name(&self) -> &'static str {
        match self {
            Self::Approve => "ApproveUsers",
            Self::Reject => "RejectUsers",
            Self::Block => "BlockUsers",
            Self::Unblock => "UnblockUsers",
            Self::Delete => "DeleteUsers",
        }
    }

    /// Returns the status a user ends up in, or `None` when the user is
    /// removed.
    #[must_use]
    pub const fn target_status(&self) -> Option<UserStatus> {
        match self {
            Self::Approve | Self::Unblock => Some(UserStatus::Active),
            Self::Reject | Self::Block => Some(UserStatus::Blocked),
            Self::Delete => None,
        }
    }

    /// Checks whether this action may be applied to `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user holds the admin role
    /// - The user is already in the target status
    /// - The user's current status does not permit the transition
    pub fn check(&self, user: &User) -> Result<(), DomainError> {
        if user.is_admin() {
            return Err(DomainError::AdminNotEligible {
                action: self.verb(),
            });
        }

        let Some(target) = self.target_status() else {
            return Ok(());
        };

        validate_transition(*self, user.status, target)
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &str = match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Block => "block",
            Self::Unblock => "unblock",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

fn validate_transition(
    action: LifecycleAction,
    from: UserStatus,
    to: UserStatus,
) -> Result<(), DomainError> {
    let allowed: bool = matches!(
        (action, from),
        (
            LifecycleAction::Approve | LifecycleAction::Reject,
            UserStatus::Pending
        ) | (LifecycleAction::Block, UserStatus::Active)
            | (LifecycleAction::Unblock, UserStatus::Blocked)
    );
    if allowed {
        return Ok(());
    }

    if from == to {
        return Err(DomainError::AlreadyInStatus(from));
    }

    let reason: &'static str = match (action, from) {
        (LifecycleAction::Approve, UserStatus::Blocked) => "blocked users must be unblocked",
        (LifecycleAction::Reject, _) => "only pending registrations can be rejected",
        (LifecycleAction::Block, UserStatus::Pending) => {
            "pending users must be approved or rejected"
        }
        (LifecycleAction::Unblock, UserStatus::Pending) => "pending users must be approved",
        _ => "transition not permitted by lifecycle rules",
    };

    Err(DomainError::InvalidStatusTransition { from, to, reason })
}
