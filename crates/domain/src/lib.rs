// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod lifecycle;
mod roles;
mod settings;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use lifecycle::LifecycleAction;
pub use roles::{RoleDescriptor, describe_role, role_catalog};
pub use settings::{
    AuthenticationSettings, DEFAULT_MAX_USERS, OrganizationSettings, PASSWORD_LENGTH_RANGE,
    SESSION_TIMEOUT_RANGE, Settings, validate_settings,
};
pub use types::{
    Department, DepartmentId, DepartmentStatus, Role, User, UserId, UserStatus,
};
pub use validation::{
    validate_department_name, validate_department_name_unique, validate_email,
    validate_email_unique, validate_full_name,
};
