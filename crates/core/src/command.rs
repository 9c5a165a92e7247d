// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use teamtune_domain::{DepartmentId, LifecycleAction, Role, Settings, UserId};

/// A command represents operator or system intent as data only.
///
/// Commands are the only way to request registry state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new user awaiting approval.
    RegisterUser {
        /// The user's display name.
        full_name: String,
        /// The user's email address.
        email: String,
        /// The role the user registered for.
        role: Role,
    },
    /// Provision an active admin account.
    CreateAdmin {
        /// The admin's display name.
        full_name: String,
        /// The admin's email address.
        email: String,
    },
    /// Approve pending users.
    ApproveUsers {
        /// The users to approve.
        user_ids: Vec<UserId>,
        /// Role to assign on approval, replacing the registered one.
        role: Option<Role>,
        /// Department to assign on approval.
        department_id: Option<DepartmentId>,
    },
    /// Reject pending registrations.
    RejectUsers {
        /// The users to reject.
        user_ids: Vec<UserId>,
        /// Reason recorded on each rejected user.
        reason: Option<String>,
    },
    /// Permanently remove users.
    DeleteUsers {
        /// The users to delete.
        user_ids: Vec<UserId>,
    },
    /// Block active users.
    BlockUsers {
        /// The users to block.
        user_ids: Vec<UserId>,
    },
    /// Restore access for blocked users.
    UnblockUsers {
        /// The users to unblock.
        user_ids: Vec<UserId>,
    },
    /// Create a department.
    CreateDepartment {
        /// The department name.
        name: String,
    },
    /// Rename an active department.
    RenameDepartment {
        /// The department to rename.
        department_id: DepartmentId,
        /// The new name.
        name: String,
    },
    /// Archive a department.
    ArchiveDepartment {
        /// The department to archive.
        department_id: DepartmentId,
    },
    /// Replace the organization settings.
    UpdateSettings {
        /// The new settings.
        settings: Settings,
    },
}

impl Command {
    /// Returns the lifecycle action this command performs, if it is a
    /// user lifecycle command.
    #[must_use]
    pub const fn lifecycle_action(&self) -> Option<LifecycleAction> {
        match self {
            Self::ApproveUsers { .. } => Some(LifecycleAction::Approve),
            Self::RejectUsers { .. } => Some(LifecycleAction::Reject),
            Self::DeleteUsers { .. } => Some(LifecycleAction::Delete),
            Self::BlockUsers { .. } => Some(LifecycleAction::Block),
            Self::UnblockUsers { .. } => Some(LifecycleAction::Unblock),
            Self::RegisterUser { .. }
            | Self::CreateAdmin { .. }
            | Self::CreateDepartment { .. }
            | Self::RenameDepartment { .. }
            | Self::ArchiveDepartment { .. }
            | Self::UpdateSettings { .. } => None,
        }
    }
}
