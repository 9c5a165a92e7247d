// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_test_admin, create_test_cause, create_test_registry, create_test_team_lead,
    registration, test_now,
};
use crate::{
    ApiError, ApiResult, Registry, SettingsInfo, UpdateSettingsRequest, get_settings,
    register_user, update_settings,
};

fn current(registry: &Registry) -> SettingsInfo {
    get_settings(registry.state(), &create_test_admin()).unwrap()
}

fn request_from(settings: SettingsInfo) -> UpdateSettingsRequest {
    UpdateSettingsRequest {
        organization: settings.organization,
        authentication: settings.authentication,
    }
}

#[test]
fn test_get_settings_returns_defaults_to_admins_only() {
    let registry: Registry = Registry::new();

    let settings: SettingsInfo = current(&registry);
    assert_eq!(settings.organization.name, "TeamTune Organization");
    assert_eq!(settings.organization.max_users, 500);
    assert!(settings.organization.allowed_domains.is_empty());
    assert!(settings.authentication.require_email_verification);

    let result = get_settings(registry.state(), &create_test_team_lead());
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_update_settings_is_audited_and_enforced_on_registration() {
    let (mut registry, _, _, _) = create_test_registry();
    let mut settings: SettingsInfo = current(&registry);
    settings.organization.allowed_domains = vec![String::from("Example.com")];
    settings.authentication.two_factor_enabled = true;

    let result: ApiResult<SettingsInfo> = update_settings(
        registry.state(),
        request_from(settings),
        &create_test_admin(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();
    assert_eq!(result.audit_event.action.name, "UpdateSettings");
    assert_eq!(result.audit_event.actor.id, "admin-123");
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Updated organization and authentication settings")
    );
    let (saved, _) = registry.commit(result);
    assert_eq!(saved.organization.allowed_domains, ["example.com"]);
    assert!(current(&registry).authentication.two_factor_enabled);

    let outside = register_user(
        registry.state(),
        registration("Eve Outside", "eve@gmail.com", "employee"),
        create_test_cause(),
        test_now(),
    );
    assert_eq!(
        outside.unwrap_err(),
        ApiError::DomainRuleViolation {
            rule: String::from("email_domain_not_allowed"),
            message: String::from("Email domain 'gmail.com' is not allowed for this organization"),
        }
    );

    let inside = register_user(
        registry.state(),
        registration("Dan Inside", "dan@example.com", "employee"),
        create_test_cause(),
        test_now(),
    );
    assert!(inside.is_ok());
}

#[test]
fn test_user_limit_is_reported_as_rule_violation() {
    let (mut registry, _, _, _) = create_test_registry();
    let mut settings: SettingsInfo = current(&registry);
    settings.organization.max_users = 3;
    let result: ApiResult<SettingsInfo> = update_settings(
        registry.state(),
        request_from(settings),
        &create_test_admin(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();
    registry.commit(result);

    let result = register_user(
        registry.state(),
        registration("Dan Fourth", "dan@example.com", "employee"),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "user_limit_reached"
    ));
}

#[test]
fn test_invalid_setting_is_invalid_input() {
    let (registry, _, _, _) = create_test_registry();
    let mut settings: SettingsInfo = current(&registry);
    settings.authentication.session_timeout_hours = 0;

    let result = update_settings(
        registry.state(),
        request_from(settings),
        &create_test_admin(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "session_timeout_hours"
    ));
}

#[test]
fn test_non_admin_cannot_update_settings() {
    let (registry, _, _, _) = create_test_registry();
    let settings: SettingsInfo = current(&registry);

    let result = update_settings(
        registry.state(),
        request_from(settings),
        &create_test_team_lead(),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
