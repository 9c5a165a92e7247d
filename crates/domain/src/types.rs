// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Opaque, stable identifier of a user.
///
/// Identifiers are assigned by the registry and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps an identifier value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque, stable identifier of a department.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(String);

impl DepartmentId {
    /// Wraps an identifier value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The role a user holds in the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full system access. Never eligible for lifecycle operations.
    Admin,
    /// Manages projects and the teams assigned to them.
    ProjectManager,
    /// Leads a team of employees.
    TeamLead,
    /// Standard team member.
    Employee,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 4] = [
        Self::Admin,
        Self::ProjectManager,
        Self::TeamLead,
        Self::Employee,
    ];

    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ProjectManager => "project_manager",
            Self::TeamLead => "team_lead",
            Self::Employee => "employee",
        }
    }

    /// Returns the human-readable label of the role.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::ProjectManager => "Project Manager",
            Self::TeamLead => "Team Lead",
            Self::Employee => "Employee",
        }
    }

    /// Returns true for the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "project_manager" => Ok(Self::ProjectManager),
            "team_lead" => Ok(Self::TeamLead),
            "employee" => Ok(Self::Employee),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// May sign in and use the dashboard.
    Active,
    /// Registered, awaiting approval by an admin.
    #[default]
    Pending,
    /// Sign-in disabled, either by an admin or by rejection.
    Blocked,
}

impl UserStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Blocked => "blocked",
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "blocked" => Ok(Self::Blocked),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user record owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Contact and login email, unique case-insensitively.
    pub email: String,
    /// Organizational role.
    pub role: Role,
    /// Account status.
    pub status: UserStatus,
    /// Department label, if assigned.
    pub department: Option<String>,
    /// Reason recorded when the registration was rejected.
    pub rejection_reason: Option<String>,
    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Creates a newly registered user in the pending state.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier assigned by the registry
    /// * `full_name` - The user's display name
    /// * `email` - The user's email address
    /// * `role` - The role the user registered for
    /// * `created_at` - Registration time
    #[must_use]
    pub fn new(
        id: UserId,
        full_name: &str,
        email: &str,
        role: Role,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            full_name: full_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role,
            status: UserStatus::Pending,
            department: None,
            rejection_reason: None,
            created_at,
        }
    }

    /// Returns true if this user holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Whether a department is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentStatus {
    /// Accepts members.
    #[default]
    Active,
    /// Retained for history; no new members.
    Archived,
}

impl std::fmt::Display for DepartmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Archived => f.write_str("archived"),
        }
    }
}

/// A department users can be assigned to on approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Stable identifier.
    pub id: DepartmentId,
    /// Display name, unique case-insensitively.
    pub name: String,
    /// Whether the department accepts members.
    pub status: DepartmentStatus,
    /// When the department was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Department {
    /// Creates a new active department.
    #[must_use]
    pub fn new(id: DepartmentId, name: &str, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            status: DepartmentStatus::Active,
            created_at,
        }
    }

    /// Returns true if the department is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        matches!(self.status, DepartmentStatus::Archived)
    }
}
