// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// User limit of a new organization.
pub const DEFAULT_MAX_USERS: usize = 500;

/// Accepted range of the minimum password length.
pub const PASSWORD_LENGTH_RANGE: std::ops::RangeInclusive<u8> = 6..=32;

/// Accepted range of the session timeout, in hours.
pub const SESSION_TIMEOUT_RANGE: std::ops::RangeInclusive<u32> = 1..=168;

/// Organization-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSettings {
    /// Display name of the organization.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Email domains new accounts may use. Empty allows every domain.
    pub allowed_domains: Vec<String>,
    /// Maximum number of accounts, all statuses included.
    pub max_users: usize,
    /// Timezone label shown to users.
    pub timezone: String,
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            name: String::from("TeamTune Organization"),
            description: String::new(),
            allowed_domains: Vec::new(),
            max_users: DEFAULT_MAX_USERS,
            timezone: String::from("UTC"),
        }
    }
}

/// Sign-in policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationSettings {
    /// New accounts must verify their email address.
    pub require_email_verification: bool,
    /// Minimum password length, in characters.
    pub password_min_length: u8,
    /// Hours before an idle session expires.
    pub session_timeout_hours: u32,
    /// Users must set up a second factor.
    pub two_factor_enabled: bool,
}

impl Default for AuthenticationSettings {
    fn default() -> Self {
        Self {
            require_email_verification: true,
            password_min_length: 8,
            session_timeout_hours: 24,
            two_factor_enabled: false,
        }
    }
}

/// Settings edited on the admin settings page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Organization profile and account limits.
    pub organization: OrganizationSettings,
    /// Sign-in policy.
    pub authentication: AuthenticationSettings,
}

impl Settings {
    /// Returns these settings with text trimmed and domains lower-cased,
    /// de-duplicated and stripped of a leading `@`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let organization: &mut OrganizationSettings = &mut self.organization;
        organization.name = organization.name.trim().to_string();
        organization.description = organization.description.trim().to_string();
        organization.timezone = organization.timezone.trim().to_string();

        let mut domains: Vec<String> = Vec::with_capacity(organization.allowed_domains.len());
        for domain in &organization.allowed_domains {
            let domain: String = normalize_domain(domain);
            if !domain.is_empty() && !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        organization.allowed_domains = domains;
        self
    }

    /// Returns true if `email` may be used for a new account.
    ///
    /// Only the part after the last `@` is compared, case-insensitively.
    #[must_use]
    pub fn allows_email(&self, email: &str) -> bool {
        let allowed: &[String] = &self.organization.allowed_domains;
        if allowed.is_empty() {
            return true;
        }
        email
            .trim()
            .rsplit_once('@')
            .is_some_and(|(_, domain)| allowed.contains(&normalize_domain(domain)))
    }
}

fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_start_matches('@').to_lowercase()
}

/// Validates settings about to replace the current ones.
///
/// # Arguments
///
/// * `settings` - The new settings, already normalized
/// * `user_count` - Number of accounts that exist now
///
/// # Errors
///
/// Returns `DomainError::InvalidSetting` naming the first field that is
/// empty, malformed, out of range, or below the current account count.
pub fn validate_settings(settings: &Settings, user_count: usize) -> Result<(), DomainError> {
    let organization: &OrganizationSettings = &settings.organization;
    if organization.name.trim().is_empty() {
        return Err(invalid("name", "Organization name is required"));
    }
    if organization.timezone.trim().is_empty() {
        return Err(invalid("timezone", "Timezone is required"));
    }
    for domain in &organization.allowed_domains {
        let has_dotted_domain: bool =
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
        if domain.contains('@') || domain.chars().any(char::is_whitespace) || !has_dotted_domain {
            return Err(invalid(
                "allowed_domains",
                &format!("'{domain}' is not a valid domain"),
            ));
        }
    }
    if organization.max_users == 0 {
        return Err(invalid("max_users", "Maximum users must be at least 1"));
    }
    if organization.max_users < user_count {
        return Err(invalid(
            "max_users",
            &format!(
                "Maximum users cannot be below the current {user_count} accounts"
            ),
        ));
    }

    let authentication: &AuthenticationSettings = &settings.authentication;
    if !PASSWORD_LENGTH_RANGE.contains(&authentication.password_min_length) {
        return Err(invalid(
            "password_min_length",
            &format!(
                "Minimum password length must be between {} and {}",
                PASSWORD_LENGTH_RANGE.start(),
                PASSWORD_LENGTH_RANGE.end()
            ),
        ));
    }
    if !SESSION_TIMEOUT_RANGE.contains(&authentication.session_timeout_hours) {
        return Err(invalid(
            "session_timeout_hours",
            &format!(
                "Session timeout must be between {} and {} hours",
                SESSION_TIMEOUT_RANGE.start(),
                SESSION_TIMEOUT_RANGE.end()
            ),
        ));
    }
    Ok(())
}

fn invalid(field: &'static str, message: &str) -> DomainError {
    DomainError::InvalidSetting {
        field,
        message: message.to_string(),
    }
}
