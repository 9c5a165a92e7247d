// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line admin dashboard for the TeamTune user registry.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::eyre};
use teamtune_api::{SettingsInfo, UserInfo};
use teamtune_dashboard::{
    BulkExecutor, BulkRequest, DashboardError, HttpRegistry, Notification, QueryParams,
    RegistryConfig, SelectionSet, SettingsEditor, TabPersistence, UserFilter, UserRegistry,
    UserStats, parse_domain_list, status_for_tab,
};
use teamtune_domain::{LifecycleAction, Role, UserStatus};
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_log::AsTrace;

/// Tabs of the users overview.
const USER_TABS: [&str; 4] = ["all", "active", "pending", "blocked"];

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run().await {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "teamtune", about = "TeamTune admin dashboard")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the registry service
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000")]
    registry_url: String,

    /// Identifier of the acting admin
    #[arg(long, global = true, default_value = "admin-cli")]
    actor_id: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    async fn run(self) -> Result<()> {
        let config: RegistryConfig = RegistryConfig::new(&self.registry_url, &self.actor_id)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        let registry: HttpRegistry = HttpRegistry::new(&config)?;
        self.command.run(registry).await
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// List users
    #[command(visible_alias = "ls")]
    Users {
        /// Case-insensitive name or email search
        #[arg(long, default_value = "")]
        search: String,

        /// Only users with this role
        #[arg(long)]
        role: Option<Role>,

        /// Only users in this status; overrides the tab
        #[arg(long)]
        status: Option<UserStatus>,

        /// Overview query string, e.g. `?tab=pending`
        #[arg(long, default_value = "")]
        query: String,
    },

    /// Approve pending users
    Approve {
        /// Users to approve
        #[arg(required = true)]
        user_ids: Vec<String>,

        /// Role to assign
        #[arg(long)]
        role: Option<Role>,

        /// Department to assign
        #[arg(long)]
        department: Option<String>,
    },

    /// Approve every pending user
    ApprovePending {
        /// Role to assign
        #[arg(long)]
        role: Option<Role>,

        /// Department to assign
        #[arg(long)]
        department: Option<String>,
    },

    /// Reject pending registrations
    Reject {
        /// Users to reject
        #[arg(required = true)]
        user_ids: Vec<String>,

        /// Reason recorded on each user
        #[arg(long)]
        reason: Option<String>,
    },

    /// Delete users
    Delete {
        /// Users to delete
        #[arg(required = true)]
        user_ids: Vec<String>,
    },

    /// Block one user
    Block {
        /// The user to block
        user_id: String,
    },

    /// Unblock one user
    Unblock {
        /// The user to unblock
        user_id: String,
    },

    /// Delete one user
    DeleteUser {
        /// The user to delete
        user_id: String,
    },

    /// List departments
    Departments,

    /// List roles
    Roles,

    /// Show the organization settings
    Settings,

    /// Change organization settings
    SetSettings(SettingsChanges),
}

/// Settings to change; omitted options keep their current value.
#[derive(Clone, Debug, clap::Args)]
struct SettingsChanges {
    /// Organization name
    #[arg(long)]
    name: Option<String>,

    /// Organization description
    #[arg(long)]
    description: Option<String>,

    /// Comma-separated email domains allowed for new accounts; empty allows all
    #[arg(long)]
    allowed_domains: Option<String>,

    /// Maximum number of accounts
    #[arg(long)]
    max_users: Option<usize>,

    /// Timezone label
    #[arg(long)]
    timezone: Option<String>,

    /// Require new accounts to verify their email
    #[arg(long)]
    require_email_verification: Option<bool>,

    /// Minimum password length
    #[arg(long)]
    password_min_length: Option<u8>,

    /// Session timeout in hours
    #[arg(long)]
    session_timeout_hours: Option<u32>,

    /// Require a second factor
    #[arg(long)]
    two_factor: Option<bool>,
}

impl SettingsChanges {
    fn apply_to(self, draft: &mut SettingsInfo) {
        let organization = &mut draft.organization;
        if let Some(name) = self.name {
            organization.name = name;
        }
        if let Some(description) = self.description {
            organization.description = description;
        }
        if let Some(domains) = self.allowed_domains {
            organization.allowed_domains = parse_domain_list(&domains);
        }
        if let Some(max_users) = self.max_users {
            organization.max_users = max_users;
        }
        if let Some(timezone) = self.timezone {
            organization.timezone = timezone;
        }

        let authentication = &mut draft.authentication;
        if let Some(required) = self.require_email_verification {
            authentication.require_email_verification = required;
        }
        if let Some(length) = self.password_min_length {
            authentication.password_min_length = length;
        }
        if let Some(hours) = self.session_timeout_hours {
            authentication.session_timeout_hours = hours;
        }
        if let Some(enabled) = self.two_factor {
            authentication.two_factor_enabled = enabled;
        }
    }
}

impl Command {
    async fn run(self, registry: HttpRegistry) -> Result<()> {
        match self {
            Self::Users {
                search,
                role,
                status,
                query,
            } => list_users(&registry, search, role, status, &query).await,
            Self::Approve {
                user_ids,
                role,
                department,
            } => {
                let request = BulkRequest::Approve {
                    role,
                    department_id: department,
                };
                run_bulk(registry, &request, Some(user_ids.as_slice())).await
            }
            Self::ApprovePending { role, department } => {
                let request = BulkRequest::Approve {
                    role,
                    department_id: department,
                };
                run_bulk(registry, &request, None).await
            }
            Self::Reject { user_ids, reason } => {
                run_bulk(registry, &BulkRequest::Reject { reason }, Some(user_ids.as_slice())).await
            }
            Self::Delete { user_ids } => {
                run_bulk(registry, &BulkRequest::Delete, Some(user_ids.as_slice())).await
            }
            Self::Block { user_id } => run_single(registry, LifecycleAction::Block, &user_id).await,
            Self::Unblock { user_id } => {
                run_single(registry, LifecycleAction::Unblock, &user_id).await
            }
            Self::DeleteUser { user_id } => {
                run_single(registry, LifecycleAction::Delete, &user_id).await
            }
            Self::Departments => list_departments(&registry).await,
            Self::Roles => list_roles(&registry).await,
            Self::Settings => {
                print_settings(&registry.get_settings().await?);
                Ok(())
            }
            Self::SetSettings(changes) => set_settings(&registry, changes).await,
        }
    }
}

async fn list_users(
    registry: &HttpRegistry,
    search: String,
    role: Option<Role>,
    status: Option<UserStatus>,
    query: &str,
) -> Result<()> {
    let mut tabs: TabPersistence = TabPersistence::new("all", &USER_TABS)?;
    let mut params: QueryParams = QueryParams::parse(query);
    let original: String = params.to_query_string();
    tabs.sync_url(&mut params);
    let corrected: String = params.to_query_string();
    if corrected != original {
        println!("Query corrected to {corrected}");
    }

    let filter = UserFilter {
        search,
        role,
        status: status.or_else(|| status_for_tab(tabs.active_tab())),
    };
    let users: Vec<UserInfo> = registry.list_users().await?;
    let stats: UserStats = UserStats::from_users(&users);
    println!(
        "{} users: {} active, {} pending, {} blocked",
        stats.total, stats.active, stats.pending, stats.blocked
    );
    println!("Tab: {}", tabs.active_tab());

    for user in filter.apply(&users) {
        println!(
            "{:<8} {:<24} {:<32} {:<16} {:<8} {}",
            user.id,
            user.full_name,
            user.email,
            user.role.label(),
            user.status,
            user.department.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn run_bulk(
    registry: HttpRegistry,
    request: &BulkRequest,
    user_ids: Option<&[String]>,
) -> Result<()> {
    let users: Vec<UserInfo> = registry.list_users().await?;
    let mut selection: SelectionSet = SelectionSet::new();
    selection.enter_bulk_mode();

    match user_ids {
        Some(ids) => {
            for id in ids {
                match users.iter().find(|u| &u.id == id) {
                    Some(user) if user.role.is_admin() => {
                        warn!(user_id = %id, "Admin users cannot be selected");
                    }
                    Some(user) => {
                        if !selection.contains(&user.id) {
                            selection.toggle(&user.id, user.role);
                        }
                    }
                    None => warn!(user_id = %id, "Unknown user, skipping"),
                }
            }
        }
        None => {
            selection.select_all_eligible(&users, |u| u.status == UserStatus::Pending);
        }
    }

    let mut executor: BulkExecutor<HttpRegistry> = BulkExecutor::new(registry);
    let outcome = executor.execute(request, &mut selection).await;
    print_notifications(&executor.take_notifications());

    match outcome {
        Ok(_) => {
            for line in executor.presenter().lines() {
                println!("{line}");
            }
            Ok(())
        }
        Err(DashboardError::Validation(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

async fn run_single(registry: HttpRegistry, action: LifecycleAction, user_id: &str) -> Result<()> {
    let users: Vec<UserInfo> = registry.list_users().await?;
    let user: UserInfo = users
        .into_iter()
        .find(|u| u.id == user_id)
        .ok_or_else(|| eyre!("User not found: {user_id}"))?;

    let mut executor: BulkExecutor<HttpRegistry> = BulkExecutor::new(registry);
    let outcome = executor.execute_single(action, &user).await;
    print_notifications(&executor.take_notifications());
    outcome.map(|_| ()).map_err(Into::into)
}

async fn list_departments(registry: &HttpRegistry) -> Result<()> {
    for department in registry.list_departments().await? {
        println!(
            "{:<8} {:<24} {:<10} {} members",
            department.id, department.name, department.status, department.member_count
        );
    }
    Ok(())
}

async fn list_roles(registry: &HttpRegistry) -> Result<()> {
    for role in registry.list_roles().await? {
        println!("{} ({} users)", role.label, role.user_count);
        println!("  {}", role.description);
        for permission in &role.permissions {
            println!("  - {permission}");
        }
    }
    Ok(())
}

async fn set_settings(registry: &HttpRegistry, changes: SettingsChanges) -> Result<()> {
    let mut editor: SettingsEditor = SettingsEditor::load(registry).await?;
    changes.apply_to(editor.draft_mut());
    if !editor.is_dirty() {
        println!("No changes");
        return Ok(());
    }

    editor.request_save();
    let outcome = editor.confirm(registry).await;
    print_notifications(&editor.take_notifications());
    print_settings(&outcome?);
    Ok(())
}

fn print_settings(settings: &SettingsInfo) {
    let organization = &settings.organization;
    let authentication = &settings.authentication;
    let domains: String = if organization.allowed_domains.is_empty() {
        String::from("any")
    } else {
        organization.allowed_domains.join(", ")
    };
    println!("Organization:      {}", organization.name);
    println!("Description:       {}", organization.description);
    println!("Allowed domains:   {domains}");
    println!("Max users:         {}", organization.max_users);
    println!("Timezone:          {}", organization.timezone);
    println!(
        "Verify email:      {}",
        authentication.require_email_verification
    );
    println!(
        "Password length:   {} minimum",
        authentication.password_min_length
    );
    println!(
        "Session timeout:   {} hours",
        authentication.session_timeout_hours
    );
    println!("Two-factor:        {}", authentication.two_factor_enabled);
}

fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        println!("{notification}");
    }
}
