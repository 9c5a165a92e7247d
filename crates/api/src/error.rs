// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use teamtune::CoreError;
use teamtune_domain::DomainError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Per-user failures of a bulk operation are never reported through this
/// type; they are part of the successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("full_name"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!(
                "Unknown role '{role}'. Must be one of admin, project_manager, team_lead, employee"
            ),
        },
        DomainError::InvalidStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status '{status}'. Must be one of active, pending, blocked"),
        },
        DomainError::InvalidDepartmentName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::EmptySelection => ApiError::InvalidInput {
            field: String::from("user_ids"),
            message: String::from("No users selected"),
        },
        DomainError::DuplicateEmail(email) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("A user with email '{email}' already exists"),
        },
        DomainError::DuplicateDepartment(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_department_name"),
            message: format!("A department named '{name}' already exists"),
        },
        DomainError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User '{id}' does not exist"),
        },
        DomainError::DepartmentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Department"),
            message: format!("Department '{id}' does not exist"),
        },
        DomainError::DepartmentArchived(name) => ApiError::DomainRuleViolation {
            rule: String::from("department_archived"),
            message: format!("Department '{name}' is archived"),
        },
        DomainError::AdminNotEligible { action } => ApiError::DomainRuleViolation {
            rule: String::from("admin_not_eligible"),
            message: format!("Admin users cannot be {action}"),
        },
        DomainError::AdminRoleNotAssignable => ApiError::DomainRuleViolation {
            rule: String::from("admin_role_not_assignable"),
            message: String::from("Users cannot be approved into the admin role"),
        },
        err @ (DomainError::AlreadyInStatus(_) | DomainError::InvalidStatusTransition { .. }) => {
            ApiError::DomainRuleViolation {
                rule: String::from("user_lifecycle"),
                message: err.to_string(),
            }
        }
        DomainError::InvalidSetting { field, message } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        DomainError::EmailDomainNotAllowed(domain) => ApiError::DomainRuleViolation {
            rule: String::from("email_domain_not_allowed"),
            message: format!("Email domain '{domain}' is not allowed for this organization"),
        },
        err @ DomainError::UserLimitReached(_) => ApiError::DomainRuleViolation {
            rule: String::from("user_limit_reached"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
