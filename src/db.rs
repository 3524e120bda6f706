// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use tokio::sync::OnceCell;

use crate::error::PersistError;
use crate::models::quote::NewQuoteRecord;
use crate::models::quotes::insert_quote;

pub async fn create_db_pool(db_url: &str) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url).await?;
    }

    // Connect to the database
    let pool = SqlitePool::connect(db_url).await?;

    // Run migrations
    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

/// Process-wide handle to the quote store.
///
/// The pool is opened on first use. If that fails the error goes back to the
/// caller and the next call tries again, so a store outage never takes the
/// relay down.
#[derive(Clone)]
pub struct QuoteStore {
    db_url: Arc<str>,
    pool: Arc<OnceCell<SqlitePool>>,
}

impl QuoteStore {
    pub fn new(db_url: &str) -> Self {
        Self {
            db_url: Arc::from(db_url),
            pool: Arc::new(OnceCell::new()),
        }
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            db_url: Arc::from(""),
            pool: Arc::new(OnceCell::new_with(Some(pool))),
        }
    }

    pub fn db_url(&self) -> &str {
        &self.db_url
    }

    pub async fn pool(&self) -> Result<&SqlitePool> {
        self.pool
            .get_or_try_init(|| create_db_pool(&self.db_url))
            .await
    }

    /// Opens the store if needed and inserts one quote, all within `deadline`.
    pub async fn save(&self, quote: &NewQuoteRecord, deadline: Duration) -> Result<i64, PersistError> {
        let insert = async {
            let pool = self.pool().await.map_err(PersistError::Open)?;
            insert_quote(pool, quote).await.map_err(PersistError::Insert)
        };

        tokio::time::timeout(deadline, insert)
            .await
            .map_err(|_| PersistError::Timeout(deadline))?
    }
}

#[cfg(test)]
pub async fn create_test_pool() -> Result<SqlitePool> {
    // Every connection to `sqlite::memory:` is a separate database, so keep one.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}
