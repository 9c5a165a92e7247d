// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Department, DepartmentId, User};

/// Maximum length of names and department names, in characters.
const MAX_NAME_LENGTH: usize = 100;

/// Validates a user's full name.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn validate_full_name(full_name: &str) -> Result<(), DomainError> {
    let trimmed: &str = full_name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates the shape of an email address.
///
/// Only the structure `local@domain.tld` is checked; deliverability is not.
///
/// # Errors
///
/// Returns an error if the address is empty or malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed: &str = email.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot contain whitespace",
        )));
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{trimmed}' is missing '@'"
        )));
    };
    if local.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{trimmed}' is not a valid address"
        )));
    }
    let has_dotted_domain: bool = domain
        .split('.')
        .all(|label| !label.is_empty())
        && domain.contains('.');
    if !has_dotted_domain {
        return Err(DomainError::InvalidEmail(format!(
            "'{domain}' is not a valid domain"
        )));
    }
    Ok(())
}

/// Validates that no other user already uses `email`.
///
/// Comparison is case-insensitive.
///
/// # Errors
///
/// Returns `DomainError::DuplicateEmail` if the address is taken.
pub fn validate_email_unique(users: &[User], email: &str) -> Result<(), DomainError> {
    let normalized: String = email.trim().to_lowercase();
    if users.iter().any(|u| u.email == normalized) {
        return Err(DomainError::DuplicateEmail(normalized));
    }
    Ok(())
}

/// Validates a department name.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn validate_department_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidDepartmentName(String::from(
            "Department name is required",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidDepartmentName(format!(
            "Department name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates that no other department uses `name`.
///
/// `exclude` skips one department, so a rename to the department's own
/// name (or a case change of it) is accepted.
///
/// # Errors
///
/// Returns `DomainError::DuplicateDepartment` if the name is taken.
pub fn validate_department_name_unique(
    departments: &[Department],
    name: &str,
    exclude: Option<&DepartmentId>,
) -> Result<(), DomainError> {
    let normalized: String = name.trim().to_lowercase();
    let taken: bool = departments
        .iter()
        .filter(|d| Some(&d.id) != exclude)
        .any(|d| d.name.to_lowercase() == normalized);
    if taken {
        return Err(DomainError::DuplicateDepartment(name.trim().to_string()));
    }
    Ok(())
}
