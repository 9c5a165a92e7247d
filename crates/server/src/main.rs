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
#![allow(clippy::multiple_crate_versions)]

mod seed;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use teamtune_api::{
    ApiError, ApiResult, AuditTimelineResponse, AuthenticatedActor, BlockUserResponse,
    BulkApproveRequest, BulkApproveResponse, BulkDeleteRequest, BulkDeleteResponse,
    BulkRejectRequest, BulkRejectResponse, DepartmentInfo, DepartmentNameRequest,
    ListDepartmentsResponse, ListRolesResponse, ListUsersResponse, RegisterUserRequest, Registry,
    SettingsInfo, UnblockUserResponse, UpdateSettingsRequest, UserInfo, archive_department,
    authenticate_stub, block_user, bulk_approve, bulk_delete, bulk_reject, create_department,
    delete_user, get_audit_timeline, get_settings, list_departments, list_roles, list_users,
    register_user, rename_department, unblock_user, update_settings,
};
use teamtune_audit::Cause;
use teamtune_domain::Role;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Header carrying the acting user's identifier.
const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the acting user's role.
const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// `TeamTune` Server - HTTP server for the `TeamTune` user registry
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Load demo departments and users on startup
    #[arg(long)]
    seed: bool,
}

/// Application state shared across handlers.
///
/// The registry sits behind a single lock that is held for the whole of
/// each mutating request, so overlapping bulk requests are applied one
/// after another.
#[derive(Clone)]
struct AppState {
    /// The registry state and audit timeline.
    registry: Arc<Mutex<Registry>>,
    /// Sequence used to label request causes.
    request_seq: Arc<AtomicU64>,
}

impl AppState {
    fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            request_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Builds the audit cause for one incoming request.
    fn next_cause(&self, action: &str) -> Cause {
        let seq: u64 = self.request_seq.fetch_add(1, Ordering::Relaxed) + 1;
        Cause::new(format!("req-{seq}"), format!("Dashboard request: {action}"))
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Internal error");
        } else {
            warn!(status = %status, error = %err, "Request rejected");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    Role::from_str(role_str).map_err(|_| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!(
            "Invalid role: '{role_str}'. Must be one of admin, project_manager, team_lead, employee"
        ),
    })
}

/// Reads the actor identity from the request headers.
fn authenticate(headers: &HeaderMap) -> Result<AuthenticatedActor, HttpError> {
    let header = |name: &str| -> Result<String, HttpError> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                HttpError::from(ApiError::AuthenticationFailed {
                    reason: format!("missing {name} header"),
                })
            })
    };
    let actor_id: String = header(ACTOR_ID_HEADER)?;
    let role: Role = parse_role(&header(ACTOR_ROLE_HEADER)?)?;
    authenticate_stub(actor_id, role).map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Handler for GET `/users` endpoint.
async fn handle_list_users(AxumState(app_state): AxumState<AppState>) -> Json<ListUsersResponse> {
    let registry = app_state.registry.lock().await;
    Json(list_users(registry.state()))
}

/// Handler for POST `/users` endpoint.
///
/// Self-registration; no actor headers are required.
async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserInfo>), HttpError> {
    info!(email = %req.email, role = %req.role, "Handling register_user request");

    let cause: Cause = app_state.next_cause("register_user");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<UserInfo> =
        register_user(registry.state(), req, cause, OffsetDateTime::now_utc())?;
    let (user, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, user_id = %user.id, "Registered user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for POST `/users/bulk/approve` endpoint.
async fn handle_bulk_approve(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BulkApproveRequest>,
) -> Result<Json<BulkApproveResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        count = req.user_ids.len(),
        role = ?req.role,
        department_id = ?req.department_id,
        "Handling bulk approve request"
    );

    let cause: Cause = app_state.next_cause("bulk_approve");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<BulkApproveResponse> = bulk_approve(
        registry.state(),
        req,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (response, event_id) = registry.commit(result);
    drop(registry);

    info!(
        event_id,
        total_requested = response.total_requested,
        total_approved = response.total_approved,
        failed = response.failed.len(),
        "Bulk approve complete"
    );
    Ok(Json(response))
}

/// Handler for POST `/users/bulk/reject` endpoint.
async fn handle_bulk_reject(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BulkRejectRequest>,
) -> Result<Json<BulkRejectResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        count = req.user_ids.len(),
        "Handling bulk reject request"
    );

    let cause: Cause = app_state.next_cause("bulk_reject");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<BulkRejectResponse> = bulk_reject(
        registry.state(),
        req,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (response, event_id) = registry.commit(result);
    drop(registry);

    info!(
        event_id,
        total_requested = response.total_requested,
        total_rejected = response.total_rejected,
        failed = response.failed.len(),
        "Bulk reject complete"
    );
    Ok(Json(response))
}

/// Handler for POST `/users/bulk/delete` endpoint.
async fn handle_bulk_delete(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        count = req.user_ids.len(),
        "Handling bulk delete request"
    );

    let cause: Cause = app_state.next_cause("bulk_delete");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<BulkDeleteResponse> = bulk_delete(
        registry.state(),
        &req,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (response, event_id) = registry.commit(result);
    drop(registry);

    info!(
        event_id,
        total_requested = response.total_requested,
        total_deleted = response.total_deleted,
        failed = response.failed.len(),
        "Bulk delete complete"
    );
    Ok(Json(response))
}

/// Handler for POST `/users/{id}/block` endpoint.
async fn handle_block_user(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BlockUserResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, user_id = %user_id, "Handling block_user request");

    let cause: Cause = app_state.next_cause("block_user");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<BlockUserResponse> = block_user(
        registry.state(),
        &user_id,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (response, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, blocked = response.total_blocked, "Block complete");
    Ok(Json(response))
}

/// Handler for POST `/users/{id}/unblock` endpoint.
async fn handle_unblock_user(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<UnblockUserResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, user_id = %user_id, "Handling unblock_user request");

    let cause: Cause = app_state.next_cause("unblock_user");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<UnblockUserResponse> = unblock_user(
        registry.state(),
        &user_id,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (response, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, unblocked = response.total_unblocked, "Unblock complete");
    Ok(Json(response))
}

/// Handler for DELETE `/users/{id}` endpoint.
async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BulkDeleteResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, user_id = %user_id, "Handling delete_user request");

    let cause: Cause = app_state.next_cause("delete_user");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<BulkDeleteResponse> = delete_user(
        registry.state(),
        &user_id,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (response, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, deleted = response.total_deleted, "Delete complete");
    Ok(Json(response))
}

/// Handler for GET `/departments` endpoint.
async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
) -> Json<ListDepartmentsResponse> {
    let registry = app_state.registry.lock().await;
    Json(list_departments(registry.state()))
}

/// Handler for POST `/departments` endpoint.
async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<DepartmentNameRequest>,
) -> Result<(StatusCode, Json<DepartmentInfo>), HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, name = %req.name, "Handling create_department request");

    let cause: Cause = app_state.next_cause("create_department");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<DepartmentInfo> = create_department(
        registry.state(),
        req,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (department, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, department_id = %department.id, "Created department");
    Ok((StatusCode::CREATED, Json(department)))
}

/// Handler for PUT `/departments/{id}` endpoint.
async fn handle_rename_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<DepartmentNameRequest>,
) -> Result<Json<DepartmentInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        department_id = %department_id,
        name = %req.name,
        "Handling rename_department request"
    );

    let cause: Cause = app_state.next_cause("rename_department");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<DepartmentInfo> = rename_department(
        registry.state(),
        &department_id,
        req,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (department, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, department_id = %department.id, "Renamed department");
    Ok(Json(department))
}

/// Handler for POST `/departments/{id}/archive` endpoint.
async fn handle_archive_department(
    AxumState(app_state): AxumState<AppState>,
    Path(department_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DepartmentInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        department_id = %department_id,
        "Handling archive_department request"
    );

    let cause: Cause = app_state.next_cause("archive_department");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<DepartmentInfo> = archive_department(
        registry.state(),
        &department_id,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (department, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, department_id = %department.id, "Archived department");
    Ok(Json(department))
}

/// Handler for GET `/settings` endpoint.
async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<SettingsInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let registry = app_state.registry.lock().await;
    Ok(Json(get_settings(registry.state(), &actor)?))
}

/// Handler for PUT `/settings` endpoint.
async fn handle_update_settings(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsInfo>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, "Handling update_settings request");

    let cause: Cause = app_state.next_cause("update_settings");
    let mut registry = app_state.registry.lock().await;
    let result: ApiResult<SettingsInfo> = update_settings(
        registry.state(),
        req,
        &actor,
        cause,
        OffsetDateTime::now_utc(),
    )?;
    let (settings, event_id) = registry.commit(result);
    drop(registry);

    info!(event_id, "Updated settings");
    Ok(Json(settings))
}

/// Handler for GET `/roles` endpoint.
async fn handle_list_roles(AxumState(app_state): AxumState<AppState>) -> Json<ListRolesResponse> {
    let registry = app_state.registry.lock().await;
    Json(list_roles(registry.state()))
}

/// Handler for GET `/audit` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
) -> Json<AuditTimelineResponse> {
    let registry = app_state.registry.lock().await;
    Json(get_audit_timeline(registry.timeline()))
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/users", get(handle_list_users).post(handle_register_user))
        .route("/users/bulk/approve", post(handle_bulk_approve))
        .route("/users/bulk/reject", post(handle_bulk_reject))
        .route("/users/bulk/delete", post(handle_bulk_delete))
        .route("/users/{id}", delete(handle_delete_user))
        .route("/users/{id}/block", post(handle_block_user))
        .route("/users/{id}/unblock", post(handle_unblock_user))
        .route(
            "/departments",
            get(handle_list_departments).post(handle_create_department),
        )
        .route("/departments/{id}", put(handle_rename_department))
        .route("/departments/{id}/archive", post(handle_archive_department))
        .route(
            "/settings",
            get(handle_get_settings).put(handle_update_settings),
        )
        .route("/roles", get(handle_list_roles))
        .route("/audit", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing TeamTune Server");

    let registry: Registry = if args.seed {
        info!("Loading demo data");
        seed::seed_demo_registry(OffsetDateTime::now_utc())?
    } else {
        Registry::new()
    };

    let app: Router = build_router(AppState::new(registry));

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
