// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

pub mod awesome_client;
pub mod cotacao;

pub use awesome_client::{AwesomeApiClient, QuoteSource};

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::db::QuoteStore;

pub const COTACAO_PATH: &str = "/cotacao";

pub struct AppState {
    pub source: Arc<dyn QuoteSource>,
    pub store: QuoteStore,
    pub persist_timeout: Duration,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(COTACAO_PATH, get(cotacao::get_cotacao))
        .fallback(cotacao::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
