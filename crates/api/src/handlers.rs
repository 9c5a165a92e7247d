// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler functions for the registry API.
//!
//! Handlers are pure: they take the current state and return the new state
//! together with the audit event and the response. The caller decides
//! whether to commit the result.

use std::str::FromStr;

use teamtune::{
    BulkOutcome, Command, CommandOutcome, State, TransitionResult, apply,
};
use teamtune_audit::{Actor, AuditEvent, AuditTimeline, Cause};
use teamtune_domain::{
    AuthenticationSettings, Department, DepartmentId, DomainError, LifecycleAction,
    OrganizationSettings, Role, Settings, User, UserId, role_catalog,
};
use time::OffsetDateTime;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AuditEventInfo, AuditTimelineResponse, AuthenticationSettingsInfo, BlockUserResponse,
    BulkApproveRequest, BulkApproveResponse, BulkDeleteRequest, BulkDeleteResponse,
    BulkOperationResult, BulkRejectRequest, BulkRejectResponse, DepartmentInfo,
    DepartmentNameRequest, FailedItem, ListDepartmentsResponse, ListRolesResponse,
    ListUsersResponse, OrganizationSettingsInfo, RegisterUserRequest, RoleInfo, SettingsInfo,
    UnblockUserResponse, UpdateSettingsRequest, UserInfo,
};

/// The result of an API operation that includes both the response and the audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
    /// The new state after the operation.
    pub new_state: State,
}

/// Converts a domain user into its API representation.
#[must_use]
pub fn user_to_info(user: &User) -> UserInfo {
    UserInfo {
        id: user.id.value().to_string(),
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        role: user.role,
        status: user.status,
        department: user.department.clone(),
        rejection_reason: user.rejection_reason.clone(),
        created_at: user.created_at,
    }
}

fn department_to_info(state: &State, department: &Department) -> DepartmentInfo {
    DepartmentInfo {
        id: department.id.value().to_string(),
        name: department.name.clone(),
        status: department.status,
        member_count: state.count_department_members(&department.name),
        created_at: department.created_at,
    }
}

fn audit_event_to_info(event: &AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id: event.event_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    }
}

/// Converts a core bulk outcome into the verb-independent API result.
#[must_use]
pub fn bulk_outcome_to_result(outcome: &BulkOutcome) -> BulkOperationResult {
    BulkOperationResult {
        action: outcome.action,
        total_requested: outcome.total_requested(),
        succeeded: outcome
            .succeeded
            .iter()
            .map(|id| id.value().to_string())
            .collect(),
        failed: outcome
            .failed
            .iter()
            .map(|f| FailedItem {
                user_id: f.user_id.value().to_string(),
                error: f.error.clone(),
            })
            .collect(),
    }
}

fn parse_user_ids(user_ids: &[String]) -> Vec<UserId> {
    user_ids.iter().map(|id| UserId::new(id)).collect()
}

/// Applies a lifecycle command on behalf of an admin.
fn run_lifecycle(
    state: &State,
    command: Command,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<BulkOperationResult>, ApiError> {
    let action: LifecycleAction = command.lifecycle_action().ok_or_else(|| ApiError::Internal {
        message: String::from("not a lifecycle command"),
    })?;
    AuthorizationService::authorize_admin_action(authenticated_actor, action.audit_name())?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition_result: TransitionResult =
        apply(state, command, actor, cause, now).map_err(translate_core_error)?;

    let CommandOutcome::Bulk(outcome) = &transition_result.outcome else {
        return Err(ApiError::Internal {
            message: format!("{action} did not produce a bulk outcome"),
        });
    };

    Ok(ApiResult {
        response: bulk_outcome_to_result(outcome),
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

fn map_response<T, U: From<T>>(result: ApiResult<T>) -> ApiResult<U> {
    ApiResult {
        response: U::from(result.response),
        audit_event: result.audit_event,
        new_state: result.new_state,
    }
}

/// Lists all users.
#[must_use]
pub fn list_users(state: &State) -> ListUsersResponse {
    ListUsersResponse {
        users: state.users.iter().map(user_to_info).collect(),
    }
}

/// Registers a new user awaiting approval.
///
/// This is the self-registration path: no authenticated actor is required,
/// and the event is attributed to the system actor.
///
/// # Arguments
///
/// * `state` - The current registry state
/// * `request` - The registration request
/// * `cause` - The cause or reason for this action
/// * `now` - The registration time
///
/// # Errors
///
/// Returns an error if:
/// - The role is unknown or is the admin role
/// - The name or email fails validation
/// - The email is already registered
pub fn register_user(
    state: &State,
    request: RegisterUserRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<UserInfo>, ApiError> {
    let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;
    if role.is_admin() {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("self_registration_role"),
            message: String::from("Admin accounts cannot be self-registered"),
        });
    }

    let command: Command = Command::RegisterUser {
        full_name: request.full_name,
        email: request.email,
        role,
    };
    let transition_result: TransitionResult =
        apply(state, command, Actor::system(), cause, now).map_err(translate_core_error)?;

    let CommandOutcome::UserCreated(user_id) = &transition_result.outcome else {
        return Err(ApiError::Internal {
            message: String::from("registration did not produce a user"),
        });
    };
    let user: &User = transition_result
        .new_state
        .require_user(user_id)
        .map_err(translate_domain_error)?;
    let response: UserInfo = user_to_info(user);

    Ok(ApiResult {
        response,
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

/// Approves pending users, optionally assigning a role and department.
///
/// Per-user problems (unknown id, admin user, wrong status) do not fail the
/// call; they are listed in the response's `failed` entries.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - No user ids were given
/// - The role is unknown or is the admin role
/// - The department does not exist or is archived
pub fn bulk_approve(
    state: &State,
    request: BulkApproveRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<BulkApproveResponse>, ApiError> {
    let role: Option<Role> = request
        .role
        .as_deref()
        .map(Role::from_str)
        .transpose()
        .map_err(translate_domain_error)?;
    let command: Command = Command::ApproveUsers {
        user_ids: parse_user_ids(&request.user_ids),
        role,
        department_id: request.department_id.as_deref().map(DepartmentId::new),
    };
    run_lifecycle(state, command, authenticated_actor, cause, now).map(map_response)
}

/// Rejects pending registrations, recording an optional reason.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or no user ids were given.
pub fn bulk_reject(
    state: &State,
    request: BulkRejectRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<BulkRejectResponse>, ApiError> {
    let command: Command = Command::RejectUsers {
        user_ids: parse_user_ids(&request.user_ids),
        reason: request.reason,
    };
    run_lifecycle(state, command, authenticated_actor, cause, now).map(map_response)
}

/// Permanently deletes users.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or no user ids were given.
pub fn bulk_delete(
    state: &State,
    request: &BulkDeleteRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<BulkDeleteResponse>, ApiError> {
    let command: Command = Command::DeleteUsers {
        user_ids: parse_user_ids(&request.user_ids),
    };
    run_lifecycle(state, command, authenticated_actor, cause, now).map(map_response)
}

/// Blocks a single active user.
///
/// The response has the bulk shape with one item.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn block_user(
    state: &State,
    user_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<BlockUserResponse>, ApiError> {
    let command: Command = Command::BlockUsers {
        user_ids: vec![UserId::new(user_id)],
    };
    run_lifecycle(state, command, authenticated_actor, cause, now).map(map_response)
}

/// Unblocks a single blocked user.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn unblock_user(
    state: &State,
    user_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<UnblockUserResponse>, ApiError> {
    let command: Command = Command::UnblockUsers {
        user_ids: vec![UserId::new(user_id)],
    };
    run_lifecycle(state, command, authenticated_actor, cause, now).map(map_response)
}

/// Deletes a single user.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn delete_user(
    state: &State,
    user_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<BulkDeleteResponse>, ApiError> {
    let command: Command = Command::DeleteUsers {
        user_ids: vec![UserId::new(user_id)],
    };
    run_lifecycle(state, command, authenticated_actor, cause, now).map(map_response)
}

/// Lists all departments with their member counts.
#[must_use]
pub fn list_departments(state: &State) -> ListDepartmentsResponse {
    ListDepartmentsResponse {
        departments: state
            .departments
            .iter()
            .map(|d| department_to_info(state, d))
            .collect(),
    }
}

/// Applies a department command and returns the affected department.
fn run_department_command(
    state: &State,
    command: Command,
    action: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<DepartmentInfo>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, action)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition_result: TransitionResult =
        apply(state, command, actor, cause, now).map_err(translate_core_error)?;

    let CommandOutcome::Department(department_id) = &transition_result.outcome else {
        return Err(ApiError::Internal {
            message: format!("{action} did not produce a department"),
        });
    };
    let department: &Department = transition_result
        .new_state
        .department(department_id)
        .ok_or_else(|| {
            translate_domain_error(DomainError::DepartmentNotFound(department_id.to_string()))
        })?;
    let response: DepartmentInfo = department_to_info(&transition_result.new_state, department);

    Ok(ApiResult {
        response,
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

/// Creates a department.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The name is empty or too long
/// - Another department already uses the name
pub fn create_department(
    state: &State,
    request: DepartmentNameRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<DepartmentInfo>, ApiError> {
    let command: Command = Command::CreateDepartment { name: request.name };
    run_department_command(
        state,
        command,
        "create_department",
        authenticated_actor,
        cause,
        now,
    )
}

/// Renames a department and relabels its members.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The department does not exist or is archived
/// - The name is invalid or already in use
pub fn rename_department(
    state: &State,
    department_id: &str,
    request: DepartmentNameRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<DepartmentInfo>, ApiError> {
    let command: Command = Command::RenameDepartment {
        department_id: DepartmentId::new(department_id),
        name: request.name,
    };
    run_department_command(
        state,
        command,
        "rename_department",
        authenticated_actor,
        cause,
        now,
    )
}

/// Archives a department.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, or the department does
/// not exist or is already archived.
pub fn archive_department(
    state: &State,
    department_id: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<DepartmentInfo>, ApiError> {
    let command: Command = Command::ArchiveDepartment {
        department_id: DepartmentId::new(department_id),
    };
    run_department_command(
        state,
        command,
        "archive_department",
        authenticated_actor,
        cause,
        now,
    )
}

/// Lists the role catalog with the number of users holding each role.
#[must_use]
pub fn list_roles(state: &State) -> ListRolesResponse {
    ListRolesResponse {
        roles: role_catalog()
            .iter()
            .map(|descriptor| RoleInfo {
                role: descriptor.role,
                label: descriptor.role.label().to_string(),
                description: descriptor.description.to_string(),
                permissions: descriptor
                    .permissions
                    .iter()
                    .map(|p| (*p).to_string())
                    .collect(),
                user_count: state.count_role(descriptor.role),
            })
            .collect(),
    }
}

fn settings_to_info(settings: &Settings) -> SettingsInfo {
    let organization: &OrganizationSettings = &settings.organization;
    let authentication: &AuthenticationSettings = &settings.authentication;
    SettingsInfo {
        organization: OrganizationSettingsInfo {
            name: organization.name.clone(),
            description: organization.description.clone(),
            allowed_domains: organization.allowed_domains.clone(),
            max_users: organization.max_users,
            timezone: organization.timezone.clone(),
        },
        authentication: AuthenticationSettingsInfo {
            require_email_verification: authentication.require_email_verification,
            password_min_length: authentication.password_min_length,
            session_timeout_hours: authentication.session_timeout_hours,
            two_factor_enabled: authentication.two_factor_enabled,
        },
    }
}

/// Returns the organization settings.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn get_settings(
    state: &State,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SettingsInfo, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "get_settings")?;
    Ok(settings_to_info(&state.settings))
}

/// Replaces the organization settings.
///
/// The new allowed domains and user limit apply to accounts created
/// afterwards; existing accounts are not revisited.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - A field is empty, malformed or out of range
/// - The user limit is below the current number of accounts
pub fn update_settings(
    state: &State,
    request: UpdateSettingsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<SettingsInfo>, ApiError> {
    AuthorizationService::authorize_admin_action(authenticated_actor, "update_settings")?;

    let organization: OrganizationSettingsInfo = request.organization;
    let authentication: AuthenticationSettingsInfo = request.authentication;
    let settings: Settings = Settings {
        organization: OrganizationSettings {
            name: organization.name,
            description: organization.description,
            allowed_domains: organization.allowed_domains,
            max_users: organization.max_users,
            timezone: organization.timezone,
        },
        authentication: AuthenticationSettings {
            require_email_verification: authentication.require_email_verification,
            password_min_length: authentication.password_min_length,
            session_timeout_hours: authentication.session_timeout_hours,
            two_factor_enabled: authentication.two_factor_enabled,
        },
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let transition_result: TransitionResult = apply(
        state,
        Command::UpdateSettings { settings },
        actor,
        cause,
        now,
    )
    .map_err(translate_core_error)?;
    let response: SettingsInfo = settings_to_info(&transition_result.new_state.settings);

    Ok(ApiResult {
        response,
        audit_event: transition_result.audit_event,
        new_state: transition_result.new_state,
    })
}

/// Returns the recorded audit timeline, oldest first.
#[must_use]
pub fn get_audit_timeline(timeline: &AuditTimeline) -> AuditTimelineResponse {
    AuditTimelineResponse {
        events: timeline.events().iter().map(audit_event_to_info).collect(),
    }
}
