// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use teamtune_api::{
    AuthenticationSettingsInfo, BulkApproveRequest, BulkDeleteRequest, BulkOperationResult,
    BulkRejectRequest, DepartmentInfo, FailedItem, OrganizationSettingsInfo, RoleInfo,
    SettingsInfo, UpdateSettingsRequest, UserInfo,
};
use teamtune_domain::{LifecycleAction, Role, UserStatus};
use time::macros::datetime;

use crate::{DashboardError, UserRegistry};

pub fn user(id: &str, full_name: &str, role: Role, status: UserStatus) -> UserInfo {
    UserInfo {
        id: id.to_string(),
        full_name: full_name.to_string(),
        email: format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
        role,
        status,
        department: None,
        rejection_reason: None,
        created_at: datetime!(2026-03-01 12:00 UTC),
    }
}

/// `[A(pending), B(pending), C(admin)]`.
pub fn pending_pool() -> Vec<UserInfo> {
    vec![
        user("A", "Alice Able", Role::Employee, UserStatus::Pending),
        user("B", "Bob Baker", Role::TeamLead, UserStatus::Pending),
        user("C", "Carol Chief", Role::Admin, UserStatus::Active),
    ]
}

pub fn default_settings() -> SettingsInfo {
    SettingsInfo {
        organization: OrganizationSettingsInfo {
            name: String::from("TeamTune Organization"),
            description: String::new(),
            allowed_domains: Vec::new(),
            max_users: 500,
            timezone: String::from("UTC"),
        },
        authentication: AuthenticationSettingsInfo {
            require_email_verification: true,
            password_min_length: 8,
            session_timeout_hours: 24,
            two_factor_enabled: false,
        },
    }
}

pub fn result(
    action: LifecycleAction,
    total_requested: usize,
    succeeded: &[&str],
    failed: &[(&str, &str)],
) -> BulkOperationResult {
    BulkOperationResult {
        action,
        total_requested,
        succeeded: succeeded.iter().map(|id| (*id).to_string()).collect(),
        failed: failed
            .iter()
            .map(|(id, error)| FailedItem {
                user_id: (*id).to_string(),
                error: (*error).to_string(),
            })
            .collect(),
    }
}

/// In-memory registry applying lifecycle rules to a fixed user list.
///
/// `fail_next` makes the next lifecycle call fail as a whole;
/// `script` replaces the next lifecycle result verbatim; `hang` makes
/// lifecycle calls wait forever. `settings` starts as
/// [`default_settings`] when unset.
#[derive(Debug, Default)]
pub struct MockRegistry {
    pub users: Mutex<Vec<UserInfo>>,
    pub calls: AtomicUsize,
    pub fail_next: Mutex<Option<DashboardError>>,
    pub script: Mutex<Option<BulkOperationResult>>,
    pub last_ids: Mutex<Vec<String>>,
    pub hang: AtomicBool,
    pub settings: Mutex<Option<SettingsInfo>>,
}

impl MockRegistry {
    pub fn with_users(users: Vec<UserInfo>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn status_of(&self, id: &str) -> Option<UserStatus> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.status)
    }

    pub fn set_hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    async fn stall_if_hung(&self) {
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }

    fn run(
        &self,
        action: LifecycleAction,
        user_ids: &[String],
    ) -> Result<BulkOperationResult, DashboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ids.lock().unwrap() = user_ids.to_vec();
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        if let Some(scripted) = self.script.lock().unwrap().take() {
            return Ok(scripted);
        }

        let mut users = self.users.lock().unwrap();
        let mut succeeded: Vec<String> = Vec::new();
        let mut failed: Vec<FailedItem> = Vec::new();
        for id in user_ids {
            let Some(index) = users.iter().position(|u| &u.id == id) else {
                failed.push(FailedItem {
                    user_id: id.clone(),
                    error: String::from("user not found"),
                });
                continue;
            };
            let current = &users[index];
            let error: Option<String> = if current.role.is_admin() {
                Some(format!("admin users cannot be {}", action.verb()))
            } else {
                match action.target_status() {
                    Some(target) if current.status == target => {
                        Some(format!("already {}", current.status))
                    }
                    Some(_)
                        if !matches!(
                            (action, current.status),
                            (
                                LifecycleAction::Approve | LifecycleAction::Reject,
                                UserStatus::Pending
                            ) | (LifecycleAction::Block, UserStatus::Active)
                                | (LifecycleAction::Unblock, UserStatus::Blocked)
                        ) =>
                    {
                        Some(format!("cannot {action} a {} user", current.status))
                    }
                    _ => None,
                }
            };
            if let Some(error) = error {
                failed.push(FailedItem {
                    user_id: id.clone(),
                    error,
                });
                continue;
            }
            match action.target_status() {
                Some(target) => users[index].status = target,
                None => {
                    users.remove(index);
                }
            }
            succeeded.push(id.clone());
        }

        Ok(BulkOperationResult {
            action,
            total_requested: user_ids.len(),
            succeeded,
            failed,
        })
    }
}

#[async_trait]
impl UserRegistry for MockRegistry {
    async fn list_users(&self) -> Result<Vec<UserInfo>, DashboardError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn list_departments(&self) -> Result<Vec<DepartmentInfo>, DashboardError> {
        Ok(Vec::new())
    }

    async fn list_roles(&self) -> Result<Vec<RoleInfo>, DashboardError> {
        Ok(Vec::new())
    }

    async fn bulk_approve(
        &self,
        request: &BulkApproveRequest,
    ) -> Result<BulkOperationResult, DashboardError> {
        self.stall_if_hung().await;
        self.run(LifecycleAction::Approve, &request.user_ids)
    }

    async fn bulk_reject(
        &self,
        request: &BulkRejectRequest,
    ) -> Result<BulkOperationResult, DashboardError> {
        self.stall_if_hung().await;
        self.run(LifecycleAction::Reject, &request.user_ids)
    }

    async fn bulk_delete(
        &self,
        request: &BulkDeleteRequest,
    ) -> Result<BulkOperationResult, DashboardError> {
        self.stall_if_hung().await;
        self.run(LifecycleAction::Delete, &request.user_ids)
    }

    async fn block_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError> {
        self.stall_if_hung().await;
        self.run(LifecycleAction::Block, &[user_id.to_string()])
    }

    async fn unblock_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError> {
        self.stall_if_hung().await;
        self.run(LifecycleAction::Unblock, &[user_id.to_string()])
    }

    async fn delete_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError> {
        self.stall_if_hung().await;
        self.run(LifecycleAction::Delete, &[user_id.to_string()])
    }

    async fn get_settings(&self) -> Result<SettingsInfo, DashboardError> {
        Ok(self
            .settings
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(default_settings))
    }

    async fn update_settings(
        &self,
        request: &UpdateSettingsRequest,
    ) -> Result<SettingsInfo, DashboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        if request.organization.name.trim().is_empty() {
            return Err(DashboardError::Server {
                status: 400,
                message: String::from("Invalid input for field 'name': Organization name is required"),
            });
        }
        let mut stored: SettingsInfo = SettingsInfo {
            organization: request.organization.clone(),
            authentication: request.authentication,
        };
        stored.organization.allowed_domains = stored
            .organization
            .allowed_domains
            .iter()
            .map(|d| d.trim().to_lowercase())
            .collect();
        *self.settings.lock().unwrap() = Some(stored.clone());
        Ok(stored)
    }
}
