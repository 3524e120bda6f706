// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::awesome_client::DEFAULT_UPSTREAM_URL;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub upstream_url: String,
    pub database_url: String,
    pub fetch_timeout_ms: u64,
    pub persist_timeout_ms: u64,
    pub relay_url: String,
    pub client_timeout_ms: u64,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            database_url: "sqlite://cotacao.db".to_string(),
            fetch_timeout_ms: 200,
            persist_timeout_ms: 10,
            relay_url: "http://localhost:8080/cotacao".to_string(),
            client_timeout_ms: 300,
            output_path: PathBuf::from("cotacao.txt"),
        }
    }
}

impl Config {
    /// Defaults, then `config.toml` if present, then `COTACAO_*` variables
    /// (a `.env` file is honoured).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = if Path::new(CONFIG_FILE).exists() {
            load_config(CONFIG_FILE)?
        } else {
            Config::default()
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_millis(self.client_timeout_ms)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = var("COTACAO_LISTEN_ADDR") {
            self.listen_addr = v;
        }
        if let Some(v) = var("COTACAO_UPSTREAM_URL") {
            self.upstream_url = v;
        }
        if let Some(v) = var("COTACAO_DATABASE_URL") {
            self.database_url = v;
        }
        if let Some(v) = var("COTACAO_RELAY_URL") {
            self.relay_url = v;
        }
        if let Some(v) = var("COTACAO_OUTPUT_PATH") {
            self.output_path = PathBuf::from(v);
        }

        for (key, slot) in [
            ("COTACAO_FETCH_TIMEOUT_MS", &mut self.fetch_timeout_ms),
            ("COTACAO_PERSIST_TIMEOUT_MS", &mut self.persist_timeout_ms),
            ("COTACAO_CLIENT_TIMEOUT_MS", &mut self.client_timeout_ms),
        ] {
            if let Some(v) = var(key) {
                *slot = v
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} must be a number of milliseconds, got `{v}`"))?;
            }
        }

        Ok(())
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
