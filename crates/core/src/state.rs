// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use teamtune_audit::{AuditEvent, StateSnapshot};
use teamtune_domain::{
    Department, DepartmentId, DepartmentStatus, DomainError, LifecycleAction, Role, Settings, User,
    UserId, UserStatus,
};

/// The complete registry state: every user, every department and the
/// organization settings.
///
/// State is never mutated in place by command application; `apply`
/// returns a new state alongside the audit event describing the change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// All users, in registration order.
    pub users: Vec<User>,
    /// All departments, in creation order.
    pub departments: Vec<Department>,
    /// Organization settings.
    pub settings: Settings,
    /// Sequence used to mint user identifiers.
    user_seq: u64,
    /// Sequence used to mint department identifiers.
    department_seq: u64,
}

impl State {
    /// Creates an empty registry with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            departments: Vec::new(),
            settings: Settings::default(),
            user_seq: 0,
            department_seq: 0,
        }
    }

    /// Looks up a user by identifier.
    #[must_use]
    pub fn user(&self, user_id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == user_id)
    }

    /// Looks up a user that must exist.
    ///
    /// Used by single-user endpoints that report a missing user as an
    /// error rather than an empty result.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The identifier to look up
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` if no user has this identifier.
    pub fn require_user(&self, user_id: &UserId) -> Result<&User, DomainError> {
        self.user(user_id)
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))
    }

    /// Looks up a department by identifier.
    #[must_use]
    pub fn department(&self, department_id: &DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| &d.id == department_id)
    }

    /// Counts users per status.
    #[must_use]
    pub fn stats(&self) -> UserStats {
        let count = |status: UserStatus| self.users.iter().filter(|u| u.status == status).count();
        UserStats {
            total: self.users.len(),
            active: count(UserStatus::Active),
            pending: count(UserStatus::Pending),
            blocked: count(UserStatus::Blocked),
        }
    }

    /// Counts users holding `role`.
    #[must_use]
    pub fn count_role(&self, role: Role) -> usize {
        self.users.iter().filter(|u| u.role == role).count()
    }

    /// Counts users assigned to the named department.
    #[must_use]
    pub fn count_department_members(&self, department_name: &str) -> usize {
        self.users
            .iter()
            .filter(|u| u.department.as_deref() == Some(department_name))
            .count()
    }

    /// Returns the departments that still accept members.
    pub fn active_departments(&self) -> impl Iterator<Item = &Department> {
        self.departments
            .iter()
            .filter(|d| d.status == DepartmentStatus::Active)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let stats: UserStats = self.stats();
        StateSnapshot::new(format!(
            "users={},active={},pending={},blocked={},departments={}",
            stats.total,
            stats.active,
            stats.pending,
            stats.blocked,
            self.departments.len()
        ))
    }

    pub(crate) fn next_user_id(&mut self) -> UserId {
        self.user_seq += 1;
        UserId::new(&format!("usr-{}", self.user_seq))
    }

    pub(crate) fn next_department_id(&mut self) -> DepartmentId {
        self.department_seq += 1;
        DepartmentId::new(&format!("dep-{}", self.department_seq))
    }
}

/// Per-status user counts shown on the users overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    /// All users.
    pub total: usize,
    /// Users with status active.
    pub active: usize,
    /// Users awaiting approval.
    pub pending: usize,
    /// Blocked users.
    pub blocked: usize,
}

/// One user a lifecycle command could not be applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// The user the command targeted.
    pub user_id: UserId,
    /// Human-readable reason.
    pub error: String,
}

impl ItemFailure {
    /// Creates a failure entry.
    #[must_use]
    pub const fn new(user_id: UserId, error: String) -> Self {
        Self { user_id, error }
    }
}

/// Per-user results of one lifecycle command.
///
/// Every requested identifier (after duplicate removal) appears in exactly
/// one of `succeeded` or `failed`, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOutcome {
    /// The action that was applied.
    pub action: LifecycleAction,
    /// Users the action was applied to.
    pub succeeded: Vec<UserId>,
    /// Users the action could not be applied to.
    pub failed: Vec<ItemFailure>,
}

impl BulkOutcome {
    /// Number of distinct users the command targeted.
    #[must_use]
    pub fn total_requested(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// What a successfully applied command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A user account was created.
    UserCreated(UserId),
    /// A lifecycle command was applied to a set of users.
    Bulk(BulkOutcome),
    /// A department was created or changed.
    Department(DepartmentId),
    /// The organization settings were replaced.
    SettingsUpdated,
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// What the command produced.
    pub outcome: CommandOutcome,
}
