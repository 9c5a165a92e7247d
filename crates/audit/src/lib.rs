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

/// Who made a change.
///
/// In the registry this is always an authenticated operator of the
/// admin dashboard; `actor_type` carries the operator's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Operator identifier, or `system`.
    pub id: String,
    /// Role of the operator, or `system`.
    pub actor_type: String,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor used for registry-internal changes such as seeding and
    /// self-registration.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// What triggered a change, usually one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// Request identifier.
    pub id: String,
    /// Short free-text description.
    pub description: String,
}

impl Cause {
    /// Creates a cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The command that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`ApproveUsers`", "`ArchiveDepartment`").
    pub name: String,
    /// Outcome summary, e.g. `approved 1 of 2`.
    pub details: Option<String>,
}

impl Action {
    /// Creates an action record.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact textual snapshot of registry state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Counts rendered as `key=value` pairs.
    pub data: String,
}

impl StateSnapshot {
    /// Wraps rendered snapshot text.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing a registry state transition.
///
/// Every successful state change produces exactly one audit event,
/// including bulk operations in which only some items succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Sequence number assigned when the event is recorded.
    /// `None` until the event has been appended to a timeline.
    pub event_id: Option<i64>,
    /// Who.
    pub actor: Actor,
    /// Why.
    pub cause: Cause,
    /// What.
    pub action: Action,
    /// Registry counts before the change.
    pub before: StateSnapshot,
    /// Registry counts after the change.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates an event that has not been recorded yet.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Returns this event stamped with a sequence number.
    #[must_use]
    pub fn with_event_id(self, event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..self
        }
    }
}

/// Append-only, in-order record of audit events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTimeline {
    events: Vec<AuditEvent>,
}

impl AuditTimeline {
    /// Creates an empty timeline.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event, assigning it the next sequence number.
    ///
    /// Returns the assigned event ID.
    pub fn record(&mut self, event: AuditEvent) -> i64 {
        let event_id: i64 = i64::try_from(self.events.len()).unwrap_or(i64::MAX - 1) + 1;
        self.events.push(event.with_event_id(event_id));
        event_id
    }

    /// Returns all recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Looks up a recorded event by ID.
    #[must_use]
    pub fn get(&self, event_id: i64) -> Option<&AuditEvent> {
        self.events.iter().find(|e| e.event_id == Some(event_id))
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
