// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission of lifecycle operations to the registry.
//!
//! A bulk action is one registry call. The executor distinguishes two
//! failure levels:
//!
//! - the call itself fails: the selection is left as it was and a single
//!   error notification is raised
//! - the call succeeds with some users in `failed`: this is a normal
//!   result and goes to the [`ResultPresenter`]
//!
//! Nothing is retried automatically.

use std::collections::HashSet;

use teamtune_api::{
    BulkApproveRequest, BulkDeleteRequest, BulkOperationResult, BulkRejectRequest, FailedItem,
    UserInfo,
};
use teamtune_domain::{LifecycleAction, Role};
use tracing::{info, warn};

use crate::error::DashboardError;
use crate::notification::Notification;
use crate::presenter::{ResultPresenter, capitalize};
use crate::registry::UserRegistry;
use crate::selection::SelectionSet;

/// Reason attached to submitted ids the registry did not account for.
pub const NO_RESULT_REPORTED: &str = "no result reported";

/// A bulk action and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkRequest {
    /// Approve pending users, optionally assigning a role and department.
    Approve {
        /// Role given to every approved user.
        role: Option<Role>,
        /// Department given to every approved user.
        department_id: Option<String>,
    },
    /// Reject pending registrations.
    Reject {
        /// Reason recorded on each rejected user.
        reason: Option<String>,
    },
    /// Delete users.
    Delete,
}

impl BulkRequest {
    /// The lifecycle action this request performs.
    #[must_use]
    pub const fn action(&self) -> LifecycleAction {
        match self {
            Self::Approve { .. } => LifecycleAction::Approve,
            Self::Reject { .. } => LifecycleAction::Reject,
            Self::Delete => LifecycleAction::Delete,
        }
    }
}

/// Runs lifecycle operations against a [`UserRegistry`] and keeps the
/// dashboard state that depends on their outcome.
#[derive(Debug)]
pub struct BulkExecutor<R: UserRegistry> {
    registry: R,
    in_flight: HashSet<LifecycleAction>,
    notifications: Vec<Notification>,
    presenter: ResultPresenter,
}

impl<R: UserRegistry> BulkExecutor<R> {
    /// Creates an executor with no calls in flight.
    #[must_use]
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            in_flight: HashSet::new(),
            notifications: Vec::new(),
            presenter: ResultPresenter::new(),
        }
    }

    /// The registry this executor talks to.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Notifications raised so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Removes and returns all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// The result presenter.
    #[must_use]
    pub const fn presenter(&self) -> &ResultPresenter {
        &self.presenter
    }

    /// Dismisses the result summary.
    pub fn close_presenter(&mut self) {
        self.presenter.close();
    }

    /// Returns true while a call for `action` is outstanding.
    #[must_use]
    pub fn is_in_flight(&self, action: LifecycleAction) -> bool {
        self.in_flight.contains(&action)
    }

    /// Runs a bulk action over the current selection.
    ///
    /// On success the selection is cleared, bulk mode is exited and the
    /// result is shown in the presenter. On failure the selection is left
    /// untouched. Dropping the returned future before it completes
    /// releases the in-flight slot for the action.
    ///
    /// # Arguments
    ///
    /// * `request` - The action and its parameters
    /// * `selection` - The users to act on
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The selection is empty (no request is sent)
    /// - A call for the same action is already in flight
    /// - The registry call fails as a whole
    pub async fn execute(
        &mut self,
        request: &BulkRequest,
        selection: &mut SelectionSet,
    ) -> Result<BulkOperationResult, DashboardError> {
        let action: LifecycleAction = request.action();
        let submitted: Vec<String> = self.selected_ids(action, selection)?;

        let outcome: Result<BulkOperationResult, DashboardError> = {
            let _slot: InFlightSlot<'_> = InFlightSlot::claim(&mut self.in_flight, action)?;
            info!(
                action = %action,
                count = submitted.len(),
                "Submitting bulk operation"
            );
            submit_bulk(&self.registry, request, &submitted).await
        };

        self.complete_bulk(action, &submitted, outcome, selection)
    }

    /// Claims the in-flight slot for `action` and returns the ids to submit.
    ///
    /// For callers that drive the registry call themselves. Pairs with
    /// [`Self::finish`], which releases the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is empty or a call for `action`
    /// is already in flight.
    pub fn begin(
        &mut self,
        action: LifecycleAction,
        selection: &SelectionSet,
    ) -> Result<Vec<String>, DashboardError> {
        let submitted: Vec<String> = self.selected_ids(action, selection)?;
        if !self.in_flight.insert(action) {
            warn!(action = %action, "Bulk operation already in progress");
            return Err(DashboardError::Busy(action));
        }
        Ok(submitted)
    }

    /// Releases the slot claimed by [`Self::begin`] and applies the
    /// outcome of the call.
    ///
    /// # Errors
    ///
    /// Returns the call's error if it failed as a whole.
    pub fn finish(
        &mut self,
        action: LifecycleAction,
        submitted: &[String],
        outcome: Result<BulkOperationResult, DashboardError>,
        selection: &mut SelectionSet,
    ) -> Result<BulkOperationResult, DashboardError> {
        self.in_flight.remove(&action);
        self.complete_bulk(action, submitted, outcome, selection)
    }

    /// Blocks, unblocks or deletes a single user.
    ///
    /// Raises a success notification naming the user, or an error
    /// notification carrying the registry's reason. Dropping the returned
    /// future before it completes releases the in-flight slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is not a single-user action, a call
    /// for the same action is already in flight, or the call fails as a
    /// whole. A per-user refusal is returned as `Ok` with the user in
    /// `failed`.
    pub async fn execute_single(
        &mut self,
        action: LifecycleAction,
        user: &UserInfo,
    ) -> Result<BulkOperationResult, DashboardError> {
        if !matches!(
            action,
            LifecycleAction::Block | LifecycleAction::Unblock | LifecycleAction::Delete
        ) {
            return Err(DashboardError::Validation(format!(
                "{action} is not available for a single user"
            )));
        }

        let outcome: Result<BulkOperationResult, DashboardError> = {
            let _slot: InFlightSlot<'_> = InFlightSlot::claim(&mut self.in_flight, action)?;
            match action {
                LifecycleAction::Block => self.registry.block_user(&user.id).await,
                LifecycleAction::Unblock => self.registry.unblock_user(&user.id).await,
                _ => self.registry.delete_user(&user.id).await,
            }
        };

        let submitted: [String; 1] = [user.id.clone()];
        match outcome {
            Ok(result) => {
                let result: BulkOperationResult = reconcile(&submitted, result);
                if let Some(failure) = result.failed.first() {
                    warn!(user_id = %user.id, action = %action, reason = %failure.error, "Action refused");
                    self.notifications
                        .push(Notification::error("Error", &failure.error));
                } else {
                    let verb: &str = action.verb();
                    let title: String = format!("User {}", capitalize(verb));
                    info!(user_id = %user.id, action = %action, "Action applied");
                    self.notifications.push(Notification::success(
                        &title,
                        &format!("{} has been {verb} successfully", user.full_name),
                    ));
                }
                Ok(result)
            }
            Err(e) => {
                warn!(user_id = %user.id, action = %action, error = %e, "Action failed");
                self.notifications.push(Notification::error(
                    "Error",
                    &format!("Failed to {action} user"),
                ));
                Err(e)
            }
        }
    }

    /// Returns the selected ids, raising a validation notification when
    /// there are none.
    fn selected_ids(
        &mut self,
        action: LifecycleAction,
        selection: &SelectionSet,
    ) -> Result<Vec<String>, DashboardError> {
        if selection.is_empty() {
            let message: String = format!("Select at least one user to {action}");
            self.notifications
                .push(Notification::validation("No users selected", &message));
            return Err(DashboardError::Validation(message));
        }
        Ok(selection.ids().to_vec())
    }

    fn complete_bulk(
        &mut self,
        action: LifecycleAction,
        submitted: &[String],
        outcome: Result<BulkOperationResult, DashboardError>,
        selection: &mut SelectionSet,
    ) -> Result<BulkOperationResult, DashboardError> {
        match outcome {
            Ok(result) => {
                let result: BulkOperationResult = reconcile(submitted, result);
                info!(
                    action = %action,
                    requested = result.total_requested,
                    succeeded = result.total_succeeded(),
                    failed = result.total_failed(),
                    "Bulk operation completed"
                );
                selection.exit_bulk_mode();
                self.presenter.open(result.clone());
                Ok(result)
            }
            Err(e) => {
                warn!(action = %action, error = %e, "Bulk operation failed");
                self.notifications.push(Notification::error(
                    "Error",
                    &format!("Failed to {action} users"),
                ));
                Err(e)
            }
        }
    }
}

/// Holds an action's in-flight slot until dropped.
struct InFlightSlot<'a> {
    slots: &'a mut HashSet<LifecycleAction>,
    action: LifecycleAction,
}

impl<'a> InFlightSlot<'a> {
    fn claim(
        slots: &'a mut HashSet<LifecycleAction>,
        action: LifecycleAction,
    ) -> Result<Self, DashboardError> {
        if !slots.insert(action) {
            warn!(action = %action, "Operation already in progress");
            return Err(DashboardError::Busy(action));
        }
        Ok(Self { slots, action })
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.slots.remove(&self.action);
    }
}

async fn submit_bulk<R: UserRegistry>(
    registry: &R,
    request: &BulkRequest,
    user_ids: &[String],
) -> Result<BulkOperationResult, DashboardError> {
    let user_ids: Vec<String> = user_ids.to_vec();
    match request {
        BulkRequest::Approve {
            role,
            department_id,
        } => {
            let body: BulkApproveRequest = BulkApproveRequest {
                user_ids,
                role: role.map(|r| r.as_str().to_string()),
                department_id: department_id.clone(),
            };
            registry.bulk_approve(&body).await
        }
        BulkRequest::Reject { reason } => {
            let body: BulkRejectRequest = BulkRejectRequest {
                user_ids,
                reason: reason.clone(),
            };
            registry.bulk_reject(&body).await
        }
        BulkRequest::Delete => {
            let body: BulkDeleteRequest = BulkDeleteRequest { user_ids };
            registry.bulk_delete(&body).await
        }
    }
}

/// Aligns a registry result with the ids that were submitted.
///
/// The returned result accounts for every submitted id exactly once:
/// ids the registry did not mention are added to `failed` with
/// [`NO_RESULT_REPORTED`], and ids that were never submitted or appear
/// more than once are dropped. `total_requested` is the number of
/// distinct submitted ids.
#[must_use]
pub fn reconcile(submitted: &[String], result: BulkOperationResult) -> BulkOperationResult {
    let mut expected: Vec<&str> = Vec::with_capacity(submitted.len());
    for id in submitted {
        if !expected.contains(&id.as_str()) {
            expected.push(id);
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let succeeded: Vec<String> = result
        .succeeded
        .into_iter()
        .filter(|id| expected.contains(&id.as_str()) && seen.insert(id.clone()))
        .collect();
    let mut failed: Vec<FailedItem> = result
        .failed
        .into_iter()
        .filter(|item| {
            expected.contains(&item.user_id.as_str()) && seen.insert(item.user_id.clone())
        })
        .collect();

    for id in &expected {
        if !seen.contains(*id) {
            warn!(user_id = %id, "Registry did not report a result");
            failed.push(FailedItem {
                user_id: (*id).to_string(),
                error: String::from(NO_RESULT_REPORTED),
            });
        }
    }

    BulkOperationResult {
        action: result.action,
        total_requested: expected.len(),
        succeeded,
        failed,
    }
}
