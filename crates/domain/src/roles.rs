// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Static role catalog shown on the roles overview.
//!
//! Roles are defined at the system level and are read-only from the
//! dashboard.

use crate::types::Role;

/// Description and capabilities of one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDescriptor {
    /// The role being described.
    pub role: Role,
    /// One-line description.
    pub description: &'static str,
    /// Capabilities granted by the role.
    pub permissions: &'static [&'static str],
}

const CATALOG: [RoleDescriptor; 4] = [
    RoleDescriptor {
        role: Role::Admin,
        description: "Full system access with user management and configuration capabilities",
        permissions: &[
            "Manage all users and roles",
            "Configure system settings",
            "View all projects and data",
            "Approve/reject user registrations",
            "Access admin dashboard",
        ],
    },
    RoleDescriptor {
        role: Role::ProjectManager,
        description: "Manages projects, teams, and oversees project delivery",
        permissions: &[
            "Create and manage projects",
            "Assign team members to projects",
            "View project analytics and reports",
            "Manage project timelines",
            "Access project management tools",
        ],
    },
    RoleDescriptor {
        role: Role::TeamLead,
        description: "Leads development teams and manages team member activities",
        permissions: &[
            "Manage assigned team members",
            "View team performance metrics",
            "Assign tasks to team members",
            "Review team deliverables",
            "Access team collaboration tools",
        ],
    },
    RoleDescriptor {
        role: Role::Employee,
        description: "Standard team member with access to assigned projects and tasks",
        permissions: &[
            "View assigned projects and tasks",
            "Update task status and progress",
            "Collaborate with team members",
            "Access personal dashboard",
            "Submit time tracking data",
        ],
    },
];

/// Returns the catalog of all roles, in display order.
#[must_use]
pub const fn role_catalog() -> &'static [RoleDescriptor] {
    &CATALOG
}

/// Looks up the descriptor for a single role.
#[must_use]
pub fn describe_role(role: Role) -> RoleDescriptor {
    CATALOG
        .iter()
        .copied()
        .find(|d| d.role == role)
        .unwrap_or(RoleDescriptor {
            role,
            description: "",
            permissions: &[],
        })
}
