// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User-facing notifications raised by dashboard operations.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The operation completed.
    Success,
    /// The input was rejected before anything was sent.
    Validation,
    /// The operation failed as a whole.
    Error,
}

/// A single toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a validation notification.
    #[must_use]
    pub fn validation(title: &str, message: &str) -> Self {
        Self {
            kind: NotificationKind::Validation,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(title: &str, message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
