// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use crate::{DomainError, LifecycleAction, Role, User, UserId, UserStatus};

fn user_with(role: Role, status: UserStatus) -> User {
    let mut user: User = User::new(
        UserId::new("usr-1"),
        "Test User",
        "test@example.com",
        role,
        datetime!(2026-01-15 00:00 UTC),
    );
    user.status = status;
    user
}

#[test]
fn test_admin_is_never_eligible() {
    let admin: User = user_with(Role::Admin, UserStatus::Pending);

    for action in [
        LifecycleAction::Approve,
        LifecycleAction::Reject,
        LifecycleAction::Block,
        LifecycleAction::Unblock,
        LifecycleAction::Delete,
    ] {
        assert!(matches!(
            action.check(&admin),
            Err(DomainError::AdminNotEligible { .. })
        ));
    }
}

#[test]
fn test_approve_requires_pending() {
    let pending: User = user_with(Role::Employee, UserStatus::Pending);
    assert!(LifecycleAction::Approve.check(&pending).is_ok());

    let active: User = user_with(Role::Employee, UserStatus::Active);
    let err: DomainError = LifecycleAction::Approve.check(&active).unwrap_err();
    assert_eq!(err, DomainError::AlreadyInStatus(UserStatus::Active));
    assert_eq!(err.to_string(), "already active");

    let blocked: User = user_with(Role::Employee, UserStatus::Blocked);
    assert!(matches!(
        LifecycleAction::Approve.check(&blocked),
        Err(DomainError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn test_reject_requires_pending() {
    let pending: User = user_with(Role::TeamLead, UserStatus::Pending);
    assert!(LifecycleAction::Reject.check(&pending).is_ok());

    let blocked: User = user_with(Role::TeamLead, UserStatus::Blocked);
    assert_eq!(
        LifecycleAction::Reject.check(&blocked).unwrap_err(),
        DomainError::AlreadyInStatus(UserStatus::Blocked)
    );

    let active: User = user_with(Role::TeamLead, UserStatus::Active);
    assert!(matches!(
        LifecycleAction::Reject.check(&active),
        Err(DomainError::InvalidStatusTransition {
            reason: "only pending registrations can be rejected",
            ..
        })
    ));
}

#[test]
fn test_block_and_unblock_transitions() {
    let active: User = user_with(Role::ProjectManager, UserStatus::Active);
    let blocked: User = user_with(Role::ProjectManager, UserStatus::Blocked);
    let pending: User = user_with(Role::ProjectManager, UserStatus::Pending);

    assert!(LifecycleAction::Block.check(&active).is_ok());
    assert!(LifecycleAction::Block.check(&blocked).is_err());
    assert!(LifecycleAction::Block.check(&pending).is_err());

    assert!(LifecycleAction::Unblock.check(&blocked).is_ok());
    assert_eq!(
        LifecycleAction::Unblock.check(&active).unwrap_err(),
        DomainError::AlreadyInStatus(UserStatus::Active)
    );
    assert!(LifecycleAction::Unblock.check(&pending).is_err());
}

#[test]
fn test_delete_allowed_for_any_non_admin_status() {
    for status in [UserStatus::Active, UserStatus::Pending, UserStatus::Blocked] {
        let user: User = user_with(Role::Employee, status);
        assert!(LifecycleAction::Delete.check(&user).is_ok());
    }
}

#[test]
fn test_target_status_and_verbs() {
    assert_eq!(
        LifecycleAction::Approve.target_status(),
        Some(UserStatus::Active)
    );
    assert_eq!(
        LifecycleAction::Reject.target_status(),
        Some(UserStatus::Blocked)
    );
    assert_eq!(LifecycleAction::Delete.target_status(), None);
    assert_eq!(LifecycleAction::Reject.verb(), "rejected");
    assert_eq!(LifecycleAction::Unblock.audit_name(), "UnblockUsers");
}
