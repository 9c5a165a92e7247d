// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the dashboard client.

use teamtune_domain::LifecycleAction;

/// Errors raised by dashboard operations.
///
/// All variants are whole-call failures. Per-user failures of a bulk
/// operation are part of a successful `BulkOperationResult`.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The operation was rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// A call for the same action is already in flight.
    #[error("a {0} request is already in progress")]
    Busy(LifecycleAction),
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The registry answered with an error status.
    #[error("registry returned {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the registry's error body.
        message: String,
    },
    /// The registry's response body did not have the expected shape.
    #[error("unexpected response from registry: {0}")]
    Decode(String),
}
