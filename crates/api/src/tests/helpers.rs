// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use teamtune::{Command, CommandOutcome, TransitionResult, apply};
use teamtune_audit::{Actor, Cause};
use teamtune_domain::Role;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    ApiResult, AuthenticatedActor, DepartmentInfo, DepartmentNameRequest, RegisterUserRequest,
    Registry, UserInfo, create_department, register_user,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_team_lead() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("lead-456"), Role::TeamLead)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-01 12:00 UTC)
}

pub fn registration(full_name: &str, email: &str, role: &str) -> RegisterUserRequest {
    RegisterUserRequest {
        full_name: full_name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
    }
}

/// Registers a user through the API and commits the result.
pub fn register(registry: &mut Registry, full_name: &str, email: &str) -> String {
    let result: ApiResult<UserInfo> = register_user(
        registry.state(),
        registration(full_name, email, "employee"),
        create_test_cause(),
        test_now(),
    )
    .expect("registration should succeed");
    registry.commit(result).0.id
}

/// Builds a registry with two pending employees and an active admin.
///
/// Returns `(registry, a, b, admin)`.
pub fn create_test_registry() -> (Registry, String, String, String) {
    let mut registry: Registry = Registry::new();
    let a: String = register(&mut registry, "Alice Able", "alice@example.com");
    let b: String = register(&mut registry, "Bob Baker", "bob@example.com");

    let result: TransitionResult = apply(
        registry.state(),
        Command::CreateAdmin {
            full_name: String::from("Carol Admin"),
            email: String::from("carol@example.com"),
        },
        Actor::system(),
        create_test_cause(),
        test_now(),
    )
    .expect("admin provisioning should succeed");
    let CommandOutcome::UserCreated(admin) = &result.outcome else {
        panic!("expected a created admin");
    };
    let admin: String = admin.value().to_string();
    registry.commit(ApiResult {
        response: (),
        audit_event: result.audit_event,
        new_state: result.new_state,
    });

    (registry, a, b, admin)
}

pub fn add_department(registry: &mut Registry, name: &str) -> DepartmentInfo {
    let result: ApiResult<DepartmentInfo> = create_department(
        registry.state(),
        DepartmentNameRequest {
            name: name.to_string(),
        },
        &create_test_admin(),
        create_test_cause(),
        test_now(),
    )
    .expect("department creation should succeed");
    registry.commit(result).0
}
