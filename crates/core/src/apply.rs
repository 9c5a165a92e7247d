// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{BulkOutcome, CommandOutcome, ItemFailure, State, TransitionResult};
use teamtune_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use teamtune_domain::{
    Department, DepartmentId, DepartmentStatus, DomainError, LifecycleAction, Role, Settings, User,
    UserId, UserStatus, validate_department_name, validate_department_name_unique,
    validate_email, validate_email_unique, validate_full_name, validate_settings,
};
use time::OffsetDateTime;

/// Field changes applied to each user a lifecycle command succeeds on.
#[derive(Debug, Clone, Default)]
struct LifecycleEffects {
    role: Option<Role>,
    department: Option<String>,
    rejection_reason: Option<String>,
}

/// Applies a command to the registry, producing a new state and audit event.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The time recorded on created records
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, audit event, and outcome
/// * `Err(CoreError)` if the command is rejected as a whole
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation
/// - A new account's email domain is not allowed, or the user limit is reached
/// - A lifecycle command names no users
/// - A referenced department does not exist or is archived
///
/// Lifecycle commands never fail because of an individual user; those
/// failures are reported in the `BulkOutcome`.
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = state.to_snapshot();
    let mut new_state: State = state.clone();

    let (action, outcome): (Action, CommandOutcome) = match command {
        Command::RegisterUser {
            full_name,
            email,
            role,
        } => {
            let user_id: UserId =
                create_user(&mut new_state, &full_name, &email, role, UserStatus::Pending, now)?;
            let action: Action = Action::new(
                String::from("RegisterUser"),
                Some(format!("Registered {user_id} ({email}) as {role}")),
            );
            (action, CommandOutcome::UserCreated(user_id))
        }
        Command::CreateAdmin { full_name, email } => {
            let user_id: UserId = create_user(
                &mut new_state,
                &full_name,
                &email,
                Role::Admin,
                UserStatus::Active,
                now,
            )?;
            let action: Action = Action::new(
                String::from("CreateAdmin"),
                Some(format!("Provisioned admin {user_id} ({email})")),
            );
            (action, CommandOutcome::UserCreated(user_id))
        }
        Command::ApproveUsers {
            user_ids,
            role,
            department_id,
        } => {
            if role.is_some_and(|r| r.is_admin()) {
                return Err(CoreError::DomainViolation(
                    DomainError::AdminRoleNotAssignable,
                ));
            }
            let department: Option<String> = department_id
                .map(|id| resolve_assignable_department(state, &id))
                .transpose()?;
            let effects: LifecycleEffects = LifecycleEffects {
                role,
                department,
                rejection_reason: None,
            };
            apply_lifecycle(&mut new_state, LifecycleAction::Approve, &user_ids, &effects)?
        }
        Command::RejectUsers { user_ids, reason } => {
            let effects: LifecycleEffects = LifecycleEffects {
                rejection_reason: reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
                ..LifecycleEffects::default()
            };
            apply_lifecycle(&mut new_state, LifecycleAction::Reject, &user_ids, &effects)?
        }
        Command::DeleteUsers { user_ids } => apply_lifecycle(
            &mut new_state,
            LifecycleAction::Delete,
            &user_ids,
            &LifecycleEffects::default(),
        )?,
        Command::BlockUsers { user_ids } => apply_lifecycle(
            &mut new_state,
            LifecycleAction::Block,
            &user_ids,
            &LifecycleEffects::default(),
        )?,
        Command::UnblockUsers { user_ids } => apply_lifecycle(
            &mut new_state,
            LifecycleAction::Unblock,
            &user_ids,
            &LifecycleEffects::default(),
        )?,
        Command::CreateDepartment { name } => {
            validate_department_name(&name)?;
            validate_department_name_unique(&new_state.departments, &name, None)?;

            let department_id: DepartmentId = new_state.next_department_id();
            let department: Department = Department::new(department_id.clone(), &name, now);
            let action: Action = Action::new(
                String::from("CreateDepartment"),
                Some(format!("Created department {department_id} '{}'", department.name)),
            );
            new_state.departments.push(department);
            (action, CommandOutcome::Department(department_id))
        }
        Command::RenameDepartment {
            department_id,
            name,
        } => {
            validate_department_name(&name)?;
            let old_name: String = resolve_assignable_department(state, &department_id)?;
            validate_department_name_unique(&new_state.departments, &name, Some(&department_id))?;

            let new_name: String = name.trim().to_string();
            for department in &mut new_state.departments {
                if department.id == department_id {
                    department.name.clone_from(&new_name);
                }
            }
            // Users carry the department label, not the identifier.
            for user in &mut new_state.users {
                if user.department.as_deref() == Some(old_name.as_str()) {
                    user.department = Some(new_name.clone());
                }
            }

            let action: Action = Action::new(
                String::from("RenameDepartment"),
                Some(format!(
                    "Renamed department {department_id} from '{old_name}' to '{new_name}'"
                )),
            );
            (action, CommandOutcome::Department(department_id))
        }
        Command::ArchiveDepartment { department_id } => {
            let name: String = resolve_assignable_department(state, &department_id)?;
            for department in &mut new_state.departments {
                if department.id == department_id {
                    department.status = DepartmentStatus::Archived;
                }
            }
            let action: Action = Action::new(
                String::from("ArchiveDepartment"),
                Some(format!("Archived department {department_id} '{name}'")),
            );
            (action, CommandOutcome::Department(department_id))
        }
        Command::UpdateSettings { settings } => {
            let settings: Settings = settings.normalized();
            validate_settings(&settings, new_state.users.len())?;

            let changed: Vec<&str> = [
                ("organization", settings.organization != state.settings.organization),
                (
                    "authentication",
                    settings.authentication != state.settings.authentication,
                ),
            ]
            .into_iter()
            .filter(|(_, changed)| *changed)
            .map(|(section, _)| section)
            .collect();
            let details: String = if changed.is_empty() {
                String::from("No settings changed")
            } else {
                format!("Updated {} settings", changed.join(" and "))
            };

            new_state.settings = settings;
            let action: Action = Action::new(String::from("UpdateSettings"), Some(details));
            (action, CommandOutcome::SettingsUpdated)
        }
    };

    let after: StateSnapshot = new_state.to_snapshot();
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

    Ok(TransitionResult {
        new_state,
        audit_event,
        outcome,
    })
}

/// Removes repeated identifiers, keeping the first occurrence of each.
#[must_use]
pub fn dedupe_user_ids(user_ids: &[UserId]) -> Vec<UserId> {
    let mut seen: HashSet<&UserId> = HashSet::with_capacity(user_ids.len());
    user_ids
        .iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

fn create_user(
    state: &mut State,
    full_name: &str,
    email: &str,
    role: Role,
    status: UserStatus,
    now: OffsetDateTime,
) -> Result<UserId, CoreError> {
    validate_full_name(full_name)?;
    validate_email(email)?;
    if !state.settings.allows_email(email) {
        let domain: &str = email.trim().rsplit_once('@').map_or("", |(_, d)| d);
        return Err(CoreError::DomainViolation(
            DomainError::EmailDomainNotAllowed(domain.to_lowercase()),
        ));
    }
    validate_email_unique(&state.users, email)?;
    if state.users.len() >= state.settings.organization.max_users {
        return Err(CoreError::DomainViolation(DomainError::UserLimitReached(
            state.settings.organization.max_users,
        )));
    }

    let user_id: UserId = state.next_user_id();
    let mut user: User = User::new(user_id.clone(), full_name, email, role, now);
    user.status = status;
    state.users.push(user);
    Ok(user_id)
}

/// Returns the name of an existing, active department.
fn resolve_assignable_department(
    state: &State,
    department_id: &DepartmentId,
) -> Result<String, CoreError> {
    let department: &Department = state
        .department(department_id)
        .ok_or_else(|| DomainError::DepartmentNotFound(department_id.to_string()))?;
    if department.is_archived() {
        return Err(CoreError::DomainViolation(DomainError::DepartmentArchived(
            department.name.clone(),
        )));
    }
    Ok(department.name.clone())
}

/// Applies one lifecycle action to each requested user independently.
///
/// Only an empty request fails the command. Every other problem (unknown
/// user, admin user, wrong status) is recorded against that user and
/// processing continues with the next one.
fn apply_lifecycle(
    state: &mut State,
    action: LifecycleAction,
    user_ids: &[UserId],
    effects: &LifecycleEffects,
) -> Result<(Action, CommandOutcome), CoreError> {
    let requested: Vec<UserId> = dedupe_user_ids(user_ids);
    if requested.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::EmptySelection));
    }

    let mut succeeded: Vec<UserId> = Vec::with_capacity(requested.len());
    let mut failed: Vec<ItemFailure> = Vec::new();

    for user_id in requested {
        let Some(index) = state.users.iter().position(|u| u.id == user_id) else {
            let reason: String = DomainError::UserNotFound(user_id.to_string()).to_string();
            failed.push(ItemFailure::new(user_id, reason));
            continue;
        };

        if let Err(err) = action.check(&state.users[index]) {
            failed.push(ItemFailure::new(user_id, err.to_string()));
            continue;
        }

        match action.target_status() {
            None => {
                state.users.remove(index);
            }
            Some(status) => {
                let user: &mut User = &mut state.users[index];
                user.status = status;
                if let Some(role) = effects.role {
                    user.role = role;
                }
                if let Some(department) = &effects.department {
                    user.department = Some(department.clone());
                }
                match action {
                    LifecycleAction::Reject => {
                        user.rejection_reason.clone_from(&effects.rejection_reason);
                    }
                    LifecycleAction::Approve | LifecycleAction::Unblock => {
                        user.rejection_reason = None;
                    }
                    LifecycleAction::Block | LifecycleAction::Delete => {}
                }
            }
        }
        succeeded.push(user_id);
    }

    let outcome: BulkOutcome = BulkOutcome {
        action,
        succeeded,
        failed,
    };
    let mut details: String = format!(
        "{} {} of {}",
        action.verb(),
        outcome.succeeded.len(),
        outcome.total_requested()
    );
    if !outcome.failed.is_empty() {
        let failed_ids: Vec<&str> = outcome.failed.iter().map(|f| f.user_id.value()).collect();
        details.push_str(&format!(" (failed: {})", failed_ids.join(", ")));
    }

    let audit_action: Action = Action::new(action.audit_name().to_string(), Some(details));
    Ok((audit_action, CommandOutcome::Bulk(outcome)))
}
