// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::UserStatus;

/// Errors that can occur during domain validation.
///
/// The `Display` form of the lifecycle variants is used verbatim as the
/// per-item failure reason in bulk operation results, so those messages
/// are short and lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Full name is empty or invalid.
    InvalidName(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Role string is not a known role.
    InvalidRole(String),
    /// Status string is not a known status.
    InvalidStatus(String),
    /// Department name is empty or invalid.
    InvalidDepartmentName(String),
    /// Another user already uses this email address.
    DuplicateEmail(String),
    /// Another department already uses this name.
    DuplicateDepartment(String),
    /// The user does not exist.
    UserNotFound(String),
    /// The department does not exist.
    DepartmentNotFound(String),
    /// The department is archived and cannot be assigned or edited.
    DepartmentArchived(String),
    /// Admin accounts are excluded from lifecycle operations.
    AdminNotEligible {
        /// The lifecycle action that was attempted.
        action: &'static str,
    },
    /// Approving a user into the admin role is not permitted.
    AdminRoleNotAssignable,
    /// The user is already in the status the action would produce.
    AlreadyInStatus(UserStatus),
    /// The transition is not allowed from the user's current status.
    InvalidStatusTransition {
        /// The current status.
        from: UserStatus,
        /// The attempted target status.
        to: UserStatus,
        /// Why the transition is rejected.
        reason: &'static str,
    },
    /// A bulk operation was requested with no user identifiers.
    EmptySelection,
    /// A settings field is empty, malformed or out of range.
    InvalidSetting {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
    /// The email's domain is not on the organization's allow-list.
    EmailDomainNotAllowed(String),
    /// The organization already has its maximum number of accounts.
    UserLimitReached(usize),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidRole(role) => write!(
                f,
                "Invalid role: '{role}'. Must be one of admin, project_manager, team_lead, employee"
            ),
            Self::InvalidStatus(status) => write!(
                f,
                "Invalid status: '{status}'. Must be one of active, pending, blocked"
            ),
            Self::InvalidDepartmentName(msg) => write!(f, "Invalid department name: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "A user with email '{email}' already exists")
            }
            Self::DuplicateDepartment(name) => {
                write!(f, "A department named '{name}' already exists")
            }
            Self::UserNotFound(_) => write!(f, "user not found"),
            Self::DepartmentNotFound(id) => write!(f, "Department '{id}' not found"),
            Self::DepartmentArchived(name) => write!(f, "Department '{name}' is archived"),
            Self::AdminNotEligible { action } => {
                write!(f, "admin users cannot be {action}")
            }
            Self::AdminRoleNotAssignable => {
                write!(f, "Users cannot be approved into the admin role")
            }
            Self::AlreadyInStatus(status) => write!(f, "already {status}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "cannot move from {from} to {to}: {reason}")
            }
            Self::EmptySelection => write!(f, "No users selected"),
            Self::InvalidSetting { field, message } => {
                write!(f, "Invalid setting '{field}': {message}")
            }
            Self::EmailDomainNotAllowed(domain) => {
                write!(f, "Email domain '{domain}' is not allowed")
            }
            Self::UserLimitReached(limit) => {
                write!(f, "The organization has reached its limit of {limit} users")
            }
        }
    }
}

impl std::error::Error for DomainError {}
