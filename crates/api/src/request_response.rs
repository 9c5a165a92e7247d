// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Bulk lifecycle responses share one logical shape,
//! [`BulkOperationResult`], but each action names its success fields after
//! its verb on the wire (`total_approved`/`approved`,
//! `total_rejected`/`rejected`, ...).

use serde::{Deserialize, Serialize};
use teamtune_domain::{DepartmentStatus, LifecycleAction, Role, UserStatus};
use time::OffsetDateTime;

/// API request to register a new user.
///
/// Self-registration: no actor is required and the user starts pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    /// The user's display name.
    pub full_name: String,
    /// The user's email address.
    pub email: String,
    /// The requested role (`project_manager`, `team_lead`, `employee`).
    pub role: String,
}

/// API request to approve pending users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkApproveRequest {
    /// The users to approve.
    pub user_ids: Vec<String>,
    /// Role to assign to every approved user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Department to assign to every approved user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
}

/// API request to reject pending registrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRejectRequest {
    /// The users to reject.
    pub user_ids: Vec<String>,
    /// Reason recorded on each rejected user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// API request to delete users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// The users to delete.
    pub user_ids: Vec<String>,
}

/// One user a lifecycle operation could not be applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    /// The user the operation targeted.
    pub user_id: String,
    /// Human-readable reason.
    pub error: String,
}

/// Verb-independent result of a lifecycle operation.
///
/// Every requested user appears in exactly one of `succeeded` or `failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkOperationResult {
    /// The action that was applied.
    pub action: LifecycleAction,
    /// Number of distinct users requested.
    pub total_requested: usize,
    /// Users the action was applied to.
    pub succeeded: Vec<String>,
    /// Users the action could not be applied to.
    pub failed: Vec<FailedItem>,
}

impl BulkOperationResult {
    /// Number of users the action was applied to.
    #[must_use]
    pub fn total_succeeded(&self) -> usize {
        self.succeeded.len()
    }

    /// Number of users the action could not be applied to.
    #[must_use]
    pub fn total_failed(&self) -> usize {
        self.total_requested.saturating_sub(self.succeeded.len())
    }
}

/// Declares the wire form of a bulk result for one lifecycle action.
macro_rules! bulk_response {
    ($(#[$meta:meta])* $name:ident, $action:expr, $total:ident, $list:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            /// Number of distinct users requested.
            pub total_requested: usize,
            /// Number of users the action was applied to.
            pub $total: usize,
            /// Users the action was applied to.
            pub $list: Vec<String>,
            /// Users the action could not be applied to, with reasons.
            pub failed: Vec<FailedItem>,
        }

        impl From<BulkOperationResult> for $name {
            fn from(result: BulkOperationResult) -> Self {
                Self {
                    total_requested: result.total_requested,
                    $total: result.succeeded.len(),
                    $list: result.succeeded,
                    failed: result.failed,
                }
            }
        }

        impl From<$name> for BulkOperationResult {
            fn from(response: $name) -> Self {
                Self {
                    action: $action,
                    total_requested: response.total_requested,
                    succeeded: response.$list,
                    failed: response.failed,
                }
            }
        }
    };
}

bulk_response!(
    /// API response for `POST /users/bulk/approve`.
    BulkApproveResponse,
    LifecycleAction::Approve,
    total_approved,
    approved
);
bulk_response!(
    /// API response for `POST /users/bulk/reject`.
    BulkRejectResponse,
    LifecycleAction::Reject,
    total_rejected,
    rejected
);
bulk_response!(
    /// API response for bulk and single-user delete.
    BulkDeleteResponse,
    LifecycleAction::Delete,
    total_deleted,
    deleted
);
bulk_response!(
    /// API response for `POST /users/{id}/block`.
    BlockUserResponse,
    LifecycleAction::Block,
    total_blocked,
    blocked
);
bulk_response!(
    /// API response for `POST /users/{id}/unblock`.
    UnblockUserResponse,
    LifecycleAction::Unblock,
    total_unblocked,
    unblocked
);

/// User information as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The user's identifier.
    pub id: String,
    /// The user's display name.
    pub full_name: String,
    /// The user's email address.
    pub email: String,
    /// The user's role.
    pub role: Role,
    /// The user's account status.
    pub status: UserStatus,
    /// Department label, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// Reason recorded when the registration was rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// API response listing users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// All users, in registration order.
    pub users: Vec<UserInfo>,
}

/// API request to create or rename a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentNameRequest {
    /// The department name.
    pub name: String,
}

/// Department information as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentInfo {
    /// The department identifier.
    pub id: String,
    /// The department name.
    pub name: String,
    /// Whether the department accepts members.
    pub status: DepartmentStatus,
    /// Number of users assigned to the department.
    pub member_count: usize,
    /// When the department was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// API response listing departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDepartmentsResponse {
    /// All departments, in creation order.
    pub departments: Vec<DepartmentInfo>,
}

/// Role catalog entry with the number of users holding the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    /// The role.
    pub role: Role,
    /// Human-readable label.
    pub label: String,
    /// One-line description.
    pub description: String,
    /// Capabilities granted by the role.
    pub permissions: Vec<String>,
    /// Number of users holding the role.
    pub user_count: usize,
}

/// API response listing roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRolesResponse {
    /// All roles, in display order.
    pub roles: Vec<RoleInfo>,
}

/// Organization section of the settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSettingsInfo {
    /// Display name of the organization.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Email domains new accounts may use. Empty allows every domain.
    #[serde(default)]
    pub allowed_domains: Vec<String>,
    /// Maximum number of accounts.
    pub max_users: usize,
    /// Timezone label.
    pub timezone: String,
}

/// Authentication section of the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationSettingsInfo {
    /// New accounts must verify their email address.
    pub require_email_verification: bool,
    /// Minimum password length.
    pub password_min_length: u8,
    /// Hours before an idle session expires.
    pub session_timeout_hours: u32,
    /// Users must set up a second factor.
    pub two_factor_enabled: bool,
}

/// API response for `GET /settings` and `PUT /settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsInfo {
    /// Organization profile and account limits.
    pub organization: OrganizationSettingsInfo,
    /// Sign-in policy.
    pub authentication: AuthenticationSettingsInfo,
}

/// API request to replace the organization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    /// Organization profile and account limits.
    pub organization: OrganizationSettingsInfo,
    /// Sign-in policy.
    pub authentication: AuthenticationSettingsInfo,
}

/// Serializable representation of an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event ID.
    pub event_id: Option<i64>,
    /// The actor ID.
    pub actor_id: String,
    /// The actor type.
    pub actor_type: String,
    /// The cause ID.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action_name: String,
    /// Optional action details.
    pub action_details: Option<String>,
    /// State before the transition.
    pub before_snapshot: String,
    /// State after the transition.
    pub after_snapshot: String,
}

/// API response listing the audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// Recorded events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
