// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload returned by `/json/last/USD-BRL`, re-served as-is by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    #[serde(rename = "USDBRL")]
    pub usdbrl: QuoteFields,
}

/// Every value arrives as text, numbers included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteFields {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub var_bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

/// A stored quote row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuoteRecord {
    pub id: i64,
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: f64,
    pub low: f64,
    pub var_bid: f64,
    pub pct_change: f64,
    pub bid: f64,
    pub ask: f64,
    pub timestamp: DateTime<Utc>,
    pub create_date: String,
    pub created_at: DateTime<Utc>,
}

/// Insert form of [`QuoteRecord`]; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuoteRecord {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: f64,
    pub low: f64,
    pub var_bid: f64,
    pub pct_change: f64,
    pub bid: f64,
    pub ask: f64,
    pub timestamp: DateTime<Utc>,
    pub create_date: String,
}

/// What the client keeps from the relay response.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentDollar {
    #[serde(rename = "USDBRL")]
    pub usdbrl: BidOnly,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BidOnly {
    pub bid: String,
}

#[derive(Debug, Error)]
pub enum FieldParseError {
    #[error("field `{field}`: `{value}` is not a decimal number")]
    Decimal { field: &'static str, value: String },
    #[error("field `{field}`: `{value}` is neither unix seconds nor RFC 3339")]
    Timestamp { field: &'static str, value: String },
}

pub fn parse_decimal(field: &'static str, value: &str) -> Result<f64, FieldParseError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldParseError::Decimal {
            field,
            value: value.to_string(),
        })
}

/// Unix seconds first (what the upstream API sends), then RFC 3339.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, FieldParseError> {
    let trimmed = value.trim();
    if let Ok(secs) = trimmed.parse::<i64>() {
        if let Some(ts) = DateTime::<Utc>::from_timestamp(secs, 0) {
            return Ok(ts);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| FieldParseError::Timestamp {
            field,
            value: value.to_string(),
        })
}

fn decimal_or_zero(field: &'static str, value: &str) -> f64 {
    parse_decimal(field, value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "defaulting quote field to zero");
        0.0
    })
}

impl NewQuoteRecord {
    /// Converts a fetched quote into its stored form. A field that fails to
    /// parse is logged and stored as zero (epoch for the timestamp) so the
    /// rest of the record is still saved.
    pub fn from_raw(raw: &RawQuote) -> Self {
        let q = &raw.usdbrl;
        let timestamp = parse_timestamp("timestamp", &q.timestamp).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "defaulting quote timestamp to epoch");
            DateTime::<Utc>::UNIX_EPOCH
        });

        Self {
            code: q.code.clone(),
            codein: q.codein.clone(),
            name: q.name.clone(),
            high: decimal_or_zero("high", &q.high),
            low: decimal_or_zero("low", &q.low),
            var_bid: decimal_or_zero("varBid", &q.var_bid),
            pct_change: decimal_or_zero("pctChange", &q.pct_change),
            bid: decimal_or_zero("bid", &q.bid),
            ask: decimal_or_zero("ask", &q.ask),
            timestamp,
            create_date: q.create_date.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_quote() -> RawQuote {
    RawQuote {
        usdbrl: QuoteFields {
            code: "USD".to_string(),
            codein: "BRL".to_string(),
            name: "Dólar Americano/Real Brasileiro".to_string(),
            high: "5.50".to_string(),
            low: "5.38".to_string(),
            var_bid: "0.0123".to_string(),
            pct_change: "0.23".to_string(),
            bid: "5.43".to_string(),
            ask: "5.4312".to_string(),
            timestamp: "1650000000".to_string(),
            create_date: "2022-04-15 02:20:00".to_string(),
        },
    }
}
