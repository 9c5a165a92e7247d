// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo data loaded with `--seed`.

use teamtune::{Command, CommandOutcome, TransitionResult, apply};
use teamtune_api::{ApiError, ApiResult, Registry, translate_core_error};
use teamtune_audit::{Actor, Cause};
use teamtune_domain::{DepartmentId, Role, UserId};
use time::OffsetDateTime;

const DEPARTMENTS: [&str; 4] = ["Engineering", "Design", "Marketing", "Operations"];

/// `(full name, email, role)` of the demo registrations.
const REGISTRATIONS: [(&str, &str, Role); 8] = [
    ("Priya Raman", "priya.raman@example.com", Role::ProjectManager),
    ("Marcus Cole", "marcus.cole@example.com", Role::TeamLead),
    ("Sofia Lind", "sofia.lind@example.com", Role::TeamLead),
    ("Daniel Okafor", "daniel.okafor@example.com", Role::Employee),
    ("Hana Sato", "hana.sato@example.com", Role::Employee),
    ("Luis Ortega", "luis.ortega@example.com", Role::Employee),
    ("Amelia Brooks", "amelia.brooks@example.com", Role::Employee),
    ("Noah Fischer", "noah.fischer@example.com", Role::Employee),
];

/// Applies one command as the system actor and commits it.
fn seed_command(
    registry: &mut Registry,
    command: Command,
    now: OffsetDateTime,
) -> Result<CommandOutcome, ApiError> {
    let cause: Cause = Cause::new(String::from("seed"), String::from("Demo data"));
    let result: TransitionResult = apply(registry.state(), command, Actor::system(), cause, now)
        .map_err(translate_core_error)?;
    let outcome: CommandOutcome = result.outcome.clone();
    registry.commit(ApiResult {
        response: (),
        audit_event: result.audit_event,
        new_state: result.new_state,
    });
    Ok(outcome)
}

/// Builds a registry with an admin, departments, and users in every status.
///
/// The first five registrations are approved into departments, one of
/// those is then blocked, and the rest stay pending.
///
/// # Errors
///
/// Returns an error if any seed command is rejected.
pub fn seed_demo_registry(now: OffsetDateTime) -> Result<Registry, ApiError> {
    let mut registry: Registry = Registry::new();

    seed_command(
        &mut registry,
        Command::CreateAdmin {
            full_name: String::from("Ada Admin"),
            email: String::from("admin@example.com"),
        },
        now,
    )?;

    let mut department_ids: Vec<DepartmentId> = Vec::with_capacity(DEPARTMENTS.len());
    for name in DEPARTMENTS {
        if let CommandOutcome::Department(id) = seed_command(
            &mut registry,
            Command::CreateDepartment {
                name: name.to_string(),
            },
            now,
        )? {
            department_ids.push(id);
        }
    }

    let mut user_ids: Vec<UserId> = Vec::with_capacity(REGISTRATIONS.len());
    for (full_name, email, role) in REGISTRATIONS {
        if let CommandOutcome::UserCreated(id) = seed_command(
            &mut registry,
            Command::RegisterUser {
                full_name: full_name.to_string(),
                email: email.to_string(),
                role,
            },
            now,
        )? {
            user_ids.push(id);
        }
    }

    for (user_id, department_id) in user_ids.iter().take(5).zip(department_ids.iter().cycle()) {
        seed_command(
            &mut registry,
            Command::ApproveUsers {
                user_ids: vec![user_id.clone()],
                role: None,
                department_id: Some(department_id.clone()),
            },
            now,
        )?;
    }

    if let Some(blocked) = user_ids.get(4) {
        seed_command(
            &mut registry,
            Command::BlockUsers {
                user_ids: vec![blocked.clone()],
            },
            now,
        )?;
    }

    Ok(registry)
}
