// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Why the upstream quote could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to open quote store: {0:#}")]
    Open(anyhow::Error),
    #[error("failed to insert quote: {0}")]
    Insert(#[source] sqlx::Error),
    #[error("quote insert did not finish within {0:?}")]
    Timeout(Duration),
}

/// Errors that end a relay request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
