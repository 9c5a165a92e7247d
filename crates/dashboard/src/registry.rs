// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access to the user registry service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use teamtune_api::{
    BlockUserResponse, BulkApproveRequest, BulkApproveResponse, BulkDeleteRequest,
    BulkDeleteResponse, BulkOperationResult, BulkRejectRequest, BulkRejectResponse,
    DepartmentInfo, ListDepartmentsResponse, ListRolesResponse, ListUsersResponse, RoleInfo,
    SettingsInfo, UnblockUserResponse, UpdateSettingsRequest, UserInfo,
};
use tracing::{debug, warn};

use crate::error::DashboardError;

/// Operations the dashboard needs from the registry.
///
/// Every lifecycle call is a single request. Per-user failures come back
/// inside the `BulkOperationResult`; an `Err` means the call as a whole
/// failed and nothing should be assumed about the registry's state.
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Lists all users.
    async fn list_users(&self) -> Result<Vec<UserInfo>, DashboardError>;

    /// Lists all departments.
    async fn list_departments(&self) -> Result<Vec<DepartmentInfo>, DashboardError>;

    /// Lists the role catalog.
    async fn list_roles(&self) -> Result<Vec<RoleInfo>, DashboardError>;

    /// Approves pending users.
    async fn bulk_approve(
        &self,
        request: &BulkApproveRequest,
    ) -> Result<BulkOperationResult, DashboardError>;

    /// Rejects pending registrations.
    async fn bulk_reject(
        &self,
        request: &BulkRejectRequest,
    ) -> Result<BulkOperationResult, DashboardError>;

    /// Deletes users.
    async fn bulk_delete(
        &self,
        request: &BulkDeleteRequest,
    ) -> Result<BulkOperationResult, DashboardError>;

    /// Blocks one user.
    async fn block_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError>;

    /// Unblocks one user.
    async fn unblock_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError>;

    /// Deletes one user.
    async fn delete_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError>;

    /// Reads the organization settings.
    async fn get_settings(&self) -> Result<SettingsInfo, DashboardError>;

    /// Replaces the organization settings and returns them as stored.
    async fn update_settings(
        &self,
        request: &UpdateSettingsRequest,
    ) -> Result<SettingsInfo, DashboardError>;
}

/// Connection settings for [`HttpRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL of the registry service, e.g. `http://127.0.0.1:3000`.
    pub base_url: String,
    /// Identifier sent as the acting user.
    pub actor_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RegistryConfig {
    /// Creates a configuration with the default 30 second timeout.
    #[must_use]
    pub fn new(base_url: &str, actor_id: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            actor_id: actor_id.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Returns this configuration with a different timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body returned by the registry.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Path of a single-user resource. `user_id` is percent-encoded so it
/// always stays one path segment.
pub fn user_path(user_id: &str, action: Option<&str>) -> String {
    let segment = urlencoding::encode(user_id);
    action.map_or_else(
        || format!("/users/{segment}"),
        |action| format!("/users/{segment}/{action}"),
    )
}

/// `UserRegistry` over HTTP.
///
/// Requests are sent as the admin dashboard operator identified by
/// `RegistryConfig::actor_id`.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: Client,
    base_url: String,
    actor_id: String,
}

impl HttpRegistry {
    /// Creates a client for the registry at `config.base_url`.
    ///
    /// A missing scheme is filled in with `http://` and a trailing slash
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &RegistryConfig) -> Result<Self, DashboardError> {
        let trimmed: &str = config.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(DashboardError::Validation(String::from(
                "Registry URL cannot be empty",
            )));
        }
        let base_url: String = if trimmed.starts_with("http://") || trimmed.starts_with("https://")
        {
            trimmed.to_string()
        } else {
            warn!(url = %trimmed, "Registry URL has no scheme, assuming http");
            format!("http://{trimmed}")
        };

        let client: Client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            actor_id: config.actor_id.clone(),
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for a registry path.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.build_url(path))
            .header("x-actor-id", &self.actor_id)
            .header("x-actor-role", "admin")
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, DashboardError> {
        let response: reqwest::Response = request.send().await?;
        let status: StatusCode = response.status();
        debug!(status = %status, url = %response.url(), "Registry responded");

        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice::<T>(&bytes)
                .map_err(|e| DashboardError::Decode(e.to_string()));
        }

        let text: String = response.text().await.unwrap_or_default();
        let message: String = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or_else(|_| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    text
                }
            });
        Err(DashboardError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl UserRegistry for HttpRegistry {
    async fn list_users(&self) -> Result<Vec<UserInfo>, DashboardError> {
        let response: ListUsersResponse = self.execute(self.request(Method::GET, "/users")).await?;
        Ok(response.users)
    }

    async fn list_departments(&self) -> Result<Vec<DepartmentInfo>, DashboardError> {
        let response: ListDepartmentsResponse = self
            .execute(self.request(Method::GET, "/departments"))
            .await?;
        Ok(response.departments)
    }

    async fn list_roles(&self) -> Result<Vec<RoleInfo>, DashboardError> {
        let response: ListRolesResponse =
            self.execute(self.request(Method::GET, "/roles")).await?;
        Ok(response.roles)
    }

    async fn bulk_approve(
        &self,
        request: &BulkApproveRequest,
    ) -> Result<BulkOperationResult, DashboardError> {
        let response: BulkApproveResponse = self
            .execute(
                self.request(Method::POST, "/users/bulk/approve")
                    .json(request),
            )
            .await?;
        Ok(response.into())
    }

    async fn bulk_reject(
        &self,
        request: &BulkRejectRequest,
    ) -> Result<BulkOperationResult, DashboardError> {
        let response: BulkRejectResponse = self
            .execute(self.request(Method::POST, "/users/bulk/reject").json(request))
            .await?;
        Ok(response.into())
    }

    async fn bulk_delete(
        &self,
        request: &BulkDeleteRequest,
    ) -> Result<BulkOperationResult, DashboardError> {
        let response: BulkDeleteResponse = self
            .execute(self.request(Method::POST, "/users/bulk/delete").json(request))
            .await?;
        Ok(response.into())
    }

    async fn block_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError> {
        let response: BlockUserResponse = self
            .execute(self.request(Method::POST, &user_path(user_id, Some("block"))))
            .await?;
        Ok(response.into())
    }

    async fn unblock_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError> {
        let response: UnblockUserResponse = self
            .execute(self.request(Method::POST, &user_path(user_id, Some("unblock"))))
            .await?;
        Ok(response.into())
    }

    async fn delete_user(&self, user_id: &str) -> Result<BulkOperationResult, DashboardError> {
        let response: BulkDeleteResponse = self
            .execute(self.request(Method::DELETE, &user_path(user_id, None)))
            .await?;
        Ok(response.into())
    }

    async fn get_settings(&self) -> Result<SettingsInfo, DashboardError> {
        self.execute(self.request(Method::GET, "/settings")).await
    }

    async fn update_settings(
        &self,
        request: &UpdateSettingsRequest,
    ) -> Result<SettingsInfo, DashboardError> {
        self.execute(self.request(Method::PUT, "/settings").json(request))
            .await
    }
}
