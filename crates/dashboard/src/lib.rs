// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin dashboard state for the TeamTune user registry: bulk selection,
//! lifecycle operation submission, result summaries, tab persistence,
//! user filtering and settings editing, plus an HTTP client for the
//! registry.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod executor;
mod filters;
mod notification;
mod presenter;
mod registry;
mod selection;
mod settings;
mod tabs;

#[cfg(test)]
mod tests;

pub use error::DashboardError;
pub use executor::{BulkExecutor, BulkRequest, NO_RESULT_REPORTED, reconcile};
pub use filters::{UserFilter, UserStats, status_for_tab};
pub use notification::{Notification, NotificationKind};
pub use presenter::{MAX_LISTED_IDS, ResultPresenter, render};
pub use registry::{HttpRegistry, RegistryConfig, UserRegistry};
pub use selection::{BulkDialog, SelectionSet};
pub use settings::{SettingsEditor, parse_domain_list};
pub use tabs::{QueryParams, TAB_PARAM, TabPersistence};
