// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use sqlx::sqlite::SqlitePool;

use super::quote::{NewQuoteRecord, QuoteRecord};

/// Insert a quote into the database, returning its id
pub async fn insert_quote(pool: &SqlitePool, quote: &NewQuoteRecord) -> sqlx::Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO cotacoes (
            code, codein, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&quote.code)
    .bind(&quote.codein)
    .bind(&quote.name)
    .bind(quote.high)
    .bind(quote.low)
    .bind(quote.var_bid)
    .bind(quote.pct_change)
    .bind(quote.bid)
    .bind(quote.ask)
    .bind(quote.timestamp)
    .bind(&quote.create_date)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn count_quotes(pool: &SqlitePool) -> Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM cotacoes")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Get the most recently stored quote
pub async fn get_latest_quote(pool: &SqlitePool) -> Result<Option<QuoteRecord>> {
    let record = sqlx::query_as::<_, QuoteRecord>(
        r#"
        SELECT *
        FROM cotacoes
        ORDER BY id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// List stored quotes, newest first
pub async fn list_quotes(pool: &SqlitePool, limit: i64) -> Result<Vec<QuoteRecord>> {
    let records = sqlx::query_as::<_, QuoteRecord>(
        r#"
        SELECT *
        FROM cotacoes
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::quote::sample_quote;
    use approx::assert_relative_eq;

    #[tokio::test]
    async fn test_insert_and_read_back() -> Result<()> {
        let pool = db::create_test_pool().await?;

        let record = NewQuoteRecord::from_raw(&sample_quote());
        let id = insert_quote(&pool, &record).await?;
        assert!(id > 0);

        let stored = get_latest_quote(&pool).await?.unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.code, "USD");
        assert_eq!(stored.codein, "BRL");
        assert_relative_eq!(stored.bid, 5.43, epsilon = 1e-9);
        assert_relative_eq!(stored.high, 5.50, epsilon = 1e-9);
        assert_eq!(stored.timestamp, record.timestamp);
        assert_eq!(stored.create_date, record.create_date);

        Ok(())
    }

    #[tokio::test]
    async fn test_zeroed_fields_are_still_inserted() -> Result<()> {
        let pool = db::create_test_pool().await?;

        let mut raw = sample_quote();
        raw.usdbrl.bid = "abc".to_string();
        insert_quote(&pool, &NewQuoteRecord::from_raw(&raw)).await?;

        let stored = get_latest_quote(&pool).await?.unwrap();
        assert_eq!(stored.bid, 0.0);
        assert_eq!(count_quotes(&pool).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_quotes_newest_first() -> Result<()> {
        let pool = db::create_test_pool().await?;
        assert!(get_latest_quote(&pool).await?.is_none());

        for bid in ["5.40", "5.41", "5.42"] {
            let mut raw = sample_quote();
            raw.usdbrl.bid = bid.to_string();
            insert_quote(&pool, &NewQuoteRecord::from_raw(&raw)).await?;
        }

        let quotes = list_quotes(&pool, 2).await?;
        assert_eq!(quotes.len(), 2);
        assert_relative_eq!(quotes[0].bid, 5.42, epsilon = 1e-9);
        assert_relative_eq!(quotes[1].bid, 5.41, epsilon = 1e-9);
        assert_eq!(count_quotes(&pool).await?, 3);

        Ok(())
    }
}
