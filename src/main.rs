// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;

use anyhow::{Context, Result};
use cotacao::api::{self, AppState, AwesomeApiClient};
use cotacao::config::Config;
use cotacao::db::QuoteStore;
use cotacao::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing();

    let store = QuoteStore::new(&config.database_url);
    // Open early so the first insert is not spent creating the schema; an
    // unavailable store is retried per request instead of stopping the relay.
    match store.pool().await {
        Ok(_) => tracing::info!("Quote store ready at {}", store.db_url()),
        Err(e) => tracing::warn!("Quote store unavailable, will retry per request: {e:#}"),
    }

    let source = AwesomeApiClient::new(config.upstream_url.clone(), config.fetch_timeout());
    let state = Arc::new(AppState {
        source: Arc::new(source),
        store,
        persist_timeout: config.persist_timeout(),
    });

    let router = api::router(state);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    axum::serve(listener, router).await?;
    Ok(())
}
