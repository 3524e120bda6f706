// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Result};
use axum::Router;
use sqlx::SqlitePool;

use crate::models::quotes::count_quotes;

/// Serves `router` on an ephemeral local port for the rest of the test.
pub async fn spawn_router(router: Router) -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}

/// Persistence runs in the background; poll until `expected` rows are stored.
pub async fn wait_for_rows(pool: &SqlitePool, expected: i64) -> Result<()> {
    for _ in 0..100 {
        if count_quotes(pool).await? >= expected {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    bail!("expected {expected} stored quotes, found {}", count_quotes(pool).await?)
}
