// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use reqwest::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::models::quote::CurrentDollar;

/// Ask the relay for the current quote; the deadline covers the body read.
pub async fn fetch_current_dollar(url: &str, timeout: Duration) -> Result<CurrentDollar> {
    let request = async {
        let response = Client::new()
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Relay request failed with status: {}", status);
        }

        response
            .json::<CurrentDollar>()
            .await
            .context("Failed to parse relay response")
    };

    tokio::time::timeout(timeout, request)
        .await
        .with_context(|| format!("Relay did not answer within {timeout:?}"))?
}

/// Write `Dólar: <bid>` to `path`, replacing whatever was there.
pub fn save_result_in_file(path: &Path, bid: &str) -> Result<()> {
    fs::write(path, format!("Dólar: {bid}"))
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub async fn run(url: &str, timeout: Duration, output: &Path) -> Result<String> {
    let current = fetch_current_dollar(url, timeout).await?;
    save_result_in_file(output, &current.usdbrl.bid)?;
    Ok(current.usdbrl.bid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::spawn_router;
    use axum::{http::StatusCode, routing::get, Router};

    fn mock_relay() -> Router {
        Router::new()
            .route(
                "/cotacao",
                get(|| async {
                    (
                        [(axum::http::header::CONTENT_TYPE, "application/json")],
                        r#"{"USDBRL":{"bid":"5.43"}}"#,
                    )
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    r#"{"USDBRL":{"bid":"5.43"}}"#
                }),
            )
            .route("/broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
    }

    #[tokio::test]
    async fn test_run_writes_bid_and_overwrites() -> Result<()> {
        let addr = spawn_router(mock_relay()).await?;
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("cotacao.txt");
        fs::write(&output, "Dólar: 9.99 from a much longer previous run\n")?;

        let bid = run(
            &format!("http://{addr}/cotacao"),
            Duration::from_millis(300),
            &output,
        )
        .await?;

        assert_eq!(bid, "5.43");
        assert_eq!(fs::read_to_string(&output)?, "Dólar: 5.43");
        Ok(())
    }

    #[tokio::test]
    async fn test_slow_relay_hits_deadline_and_leaves_file_alone() -> Result<()> {
        let addr = spawn_router(mock_relay()).await?;
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("cotacao.txt");

        let err = run(
            &format!("http://{addr}/slow"),
            Duration::from_millis(50),
            &output,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("did not answer"));
        assert!(!output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_relay_error_status_is_reported() -> Result<()> {
        let addr = spawn_router(mock_relay()).await?;
        let err = fetch_current_dollar(&format!("http://{addr}/broken"), Duration::from_millis(300))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
        Ok(())
    }
}
