// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, http::Uri, Json};

use super::AppState;
use crate::db::QuoteStore;
use crate::error::RelayError;
use crate::models::quote::{NewQuoteRecord, RawQuote};

/// `GET /cotacao`: fetch the current quote, answer with it, then store it.
pub async fn get_cotacao(State(state): State<Arc<AppState>>) -> Result<Json<RawQuote>, RelayError> {
    let quote = state.source.latest_quote().await.map_err(|e| {
        tracing::error!(error = %e, "failed to fetch quote");
        RelayError::Fetch(e)
    })?;

    spawn_persist(
        state.store.clone(),
        NewQuoteRecord::from_raw(&quote),
        state.persist_timeout,
    );

    Ok(Json(quote))
}

/// Stores a quote in the background. The task is detached from the request,
/// so a caller hanging up does not cancel it and a failed or slow insert never
/// reaches the response.
pub fn spawn_persist(
    store: QuoteStore,
    record: NewQuoteRecord,
    deadline: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match store.save(&record, deadline).await {
            Ok(id) => tracing::debug!(id, bid = record.bid, "quote saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save quote"),
        }
    })
}

pub async fn not_found(uri: Uri) -> StatusCode {
    tracing::info!(path = %uri.path(), "not found");
    StatusCode::NOT_FOUND
}
