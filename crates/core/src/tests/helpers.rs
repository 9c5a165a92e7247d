// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CommandOutcome, State, TransitionResult, apply};
use teamtune_audit::{Actor, Cause};
use teamtune_domain::{DepartmentId, Role, UserId, UserStatus};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 12:00 UTC)
}

/// Applies a command that is expected to succeed.
pub fn apply_ok(state: &State, command: Command) -> TransitionResult {
    apply(
        state,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .expect("command should apply")
}

/// Registers a user and returns the updated state and the new identifier.
pub fn register(state: &State, name: &str, role: Role) -> (State, UserId) {
    let email: String = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let result: TransitionResult = apply_ok(
        state,
        Command::RegisterUser {
            full_name: name.to_string(),
            email,
            role,
        },
    );
    let CommandOutcome::UserCreated(user_id) = result.outcome else {
        panic!("expected a created user");
    };
    (result.new_state, user_id)
}

/// Builds the scenario registry: two pending employees and one admin.
///
/// Returns `(state, a, b, admin)`.
pub fn create_scenario_state() -> (State, UserId, UserId, UserId) {
    let state: State = State::new();
    let (state, a) = register(&state, "Alice Able", Role::Employee);
    let (state, b) = register(&state, "Bob Baker", Role::Employee);
    let result: TransitionResult = apply_ok(
        &state,
        Command::CreateAdmin {
            full_name: String::from("Carol Admin"),
            email: String::from("carol@example.com"),
        },
    );
    let CommandOutcome::UserCreated(admin) = result.outcome else {
        panic!("expected a created admin");
    };
    (result.new_state, a, b, admin)
}

/// Creates a department and returns the updated state and its identifier.
pub fn create_department(state: &State, name: &str) -> (State, DepartmentId) {
    let result: TransitionResult = apply_ok(
        state,
        Command::CreateDepartment {
            name: name.to_string(),
        },
    );
    let CommandOutcome::Department(department_id) = result.outcome else {
        panic!("expected a department");
    };
    (result.new_state, department_id)
}

pub fn status_of(state: &State, user_id: &UserId) -> UserStatus {
    state.user(user_id).expect("user exists").status
}
