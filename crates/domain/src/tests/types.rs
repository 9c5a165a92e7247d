// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;
use time::macros::datetime;

use crate::{
    Department, DepartmentId, DomainError, Role, User, UserId, UserStatus, describe_role,
    role_catalog,
};

fn create_test_user() -> User {
    User::new(
        UserId::new("usr-1"),
        "  Jane Doe ",
        "Jane.Doe@Example.com",
        Role::Employee,
        datetime!(2026-01-15 09:30 UTC),
    )
}

#[test]
fn test_new_user_is_pending_and_normalized() {
    let user: User = create_test_user();

    assert_eq!(user.status, UserStatus::Pending);
    assert_eq!(user.full_name, "Jane Doe");
    assert_eq!(user.email, "jane.doe@example.com");
    assert_eq!(user.department, None);
    assert!(!user.is_admin());
}

#[test]
fn test_role_round_trips_through_str() {
    for role in Role::ALL {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
    assert_eq!(Role::from_str("Team_Lead").unwrap(), Role::TeamLead);
}

#[test]
fn test_role_rejects_unknown_value() {
    let result = Role::from_str("owner");
    assert!(matches!(result, Err(DomainError::InvalidRole(_))));
}

#[test]
fn test_status_parse_and_display() {
    assert_eq!(UserStatus::from_str("blocked").unwrap(), UserStatus::Blocked);
    assert_eq!(UserStatus::Active.to_string(), "active");
    assert!(UserStatus::from_str("rejected").is_err());
}

#[test]
fn test_user_serializes_with_snake_case_enums() {
    let user: User = create_test_user();
    let json: serde_json::Value = serde_json::to_value(&user).unwrap();

    assert_eq!(json["id"], "usr-1");
    assert_eq!(json["role"], "employee");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["created_at"], "2026-01-15T09:30:00Z");
}

#[test]
fn test_department_starts_active() {
    let department: Department = Department::new(
        DepartmentId::new("dep-1"),
        " Engineering ",
        datetime!(2026-01-15 00:00 UTC),
    );
    assert_eq!(department.name, "Engineering");
    assert!(!department.is_archived());
}

#[test]
fn test_role_catalog_covers_every_role() {
    let catalog = role_catalog();
    assert_eq!(catalog.len(), Role::ALL.len());
    for role in Role::ALL {
        let descriptor = describe_role(role);
        assert_eq!(descriptor.role, role);
        assert_eq!(descriptor.permissions.len(), 5);
    }
}
