// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only summary of a completed lifecycle operation.

use teamtune_api::BulkOperationResult;

/// Succeeded ids shown before the list is truncated.
pub const MAX_LISTED_IDS: usize = 10;

/// Holds the result of the last completed bulk call while it is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPresenter {
    current: Option<BulkOperationResult>,
}

impl ResultPresenter {
    /// Creates a closed presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Shows `result`, replacing whatever was shown before.
    pub fn open(&mut self, result: BulkOperationResult) {
        self.current = Some(result);
    }

    /// Dismisses the summary.
    pub fn close(&mut self) {
        self.current = None;
    }

    /// Returns true while a summary is shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// The result being shown, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&BulkOperationResult> {
        self.current.as_ref()
    }

    /// Renders the shown result as text lines. Empty when closed.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.current.as_ref().map_or_else(Vec::new, render)
    }
}

/// Renders `result` as text lines.
///
/// Shows the requested count and the one success count for the action,
/// then every failure with its reason, then the succeeded ids.
#[must_use]
pub fn render(result: &BulkOperationResult) -> Vec<String> {
    let verb: String = capitalize(result.action.verb());
    let mut lines: Vec<String> = vec![
        format!("Requested: {}", result.total_requested),
        format!("{verb}: {}", result.total_succeeded()),
    ];

    if !result.failed.is_empty() {
        lines.push(format!("Failed: {}", result.failed.len()));
        for item in &result.failed {
            lines.push(format!("  {}: {}", item.user_id, item.error));
        }
    }

    if !result.succeeded.is_empty() {
        let shown: Vec<&str> = result
            .succeeded
            .iter()
            .take(MAX_LISTED_IDS)
            .map(String::as_str)
            .collect();
        let mut listed: String = shown.join(", ");
        let hidden: usize = result.succeeded.len().saturating_sub(MAX_LISTED_IDS);
        if hidden > 0 {
            listed.push_str(&format!(" ... and {hidden} more"));
        }
        lines.push(format!("{verb} users: {listed}"));
    }

    lines
}

/// Upper-cases the first letter of `word`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
