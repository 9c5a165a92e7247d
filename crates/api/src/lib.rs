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
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod registry;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, authenticate_stub};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, archive_department, block_user, bulk_approve, bulk_delete,
    bulk_outcome_to_result, bulk_reject, create_department, delete_user, get_audit_timeline,
    get_settings, list_departments, list_roles, list_users, register_user, rename_department,
    unblock_user, update_settings, user_to_info,
};
pub use registry::Registry;
pub use request_response::{
    AuditEventInfo, AuditTimelineResponse, AuthenticationSettingsInfo, BlockUserResponse,
    BulkApproveRequest, BulkApproveResponse, BulkDeleteRequest, BulkDeleteResponse,
    BulkOperationResult, BulkRejectRequest, BulkRejectResponse, DepartmentInfo,
    DepartmentNameRequest, FailedItem, ListDepartmentsResponse, ListRolesResponse,
    ListUsersResponse, OrganizationSettingsInfo, RegisterUserRequest, RoleInfo, SettingsInfo,
    UnblockUserResponse, UpdateSettingsRequest, UserInfo,
};
