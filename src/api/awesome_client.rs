// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use std::time::Duration;

use reqwest::Client;

use crate::error::FetchError;
use crate::models::quote::RawQuote;

pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

#[async_trait::async_trait]
pub trait QuoteSource: Send + Sync {
    async fn latest_quote(&self) -> Result<RawQuote, FetchError>;
}

/// Client for the AwesomeAPI `last` quote endpoint.
#[derive(Clone)]
pub struct AwesomeApiClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl AwesomeApiClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
        }
    }

    async fn request_quote(&self) -> Result<RawQuote, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<RawQuote>().await?)
    }
}

#[async_trait::async_trait]
impl QuoteSource for AwesomeApiClient {
    /// The deadline covers connect, headers and the full body read.
    async fn latest_quote(&self) -> Result<RawQuote, FetchError> {
        tokio::time::timeout(self.timeout, self.request_quote())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
    }
}
