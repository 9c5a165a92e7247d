// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use teamtune::State;
use teamtune_audit::AuditTimeline;

use crate::handlers::ApiResult;

/// The registry's committed state and its audit timeline.
///
/// Handlers compute results against `state()`; only `commit` changes the
/// registry, so a rejected request leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    state: State,
    timeline: AuditTimeline,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::new(),
            timeline: AuditTimeline::new(),
        }
    }

    /// Returns the committed state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Returns the audit timeline.
    #[must_use]
    pub const fn timeline(&self) -> &AuditTimeline {
        &self.timeline
    }

    /// Commits a handler result: replaces the state and records the event.
    ///
    /// Returns the response together with the assigned event ID.
    pub fn commit<T>(&mut self, result: ApiResult<T>) -> (T, i64) {
        let event_id: i64 = self.timeline.record(result.audit_event);
        self.state = result.new_state;
        (result.response, event_id)
    }
}
