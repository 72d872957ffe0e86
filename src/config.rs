//! Router Configuration
//!
//! Runtime knobs for the quote router: per-source timeout, RPC/endpoint
//! overrides and per-chain provider toggles. Loaded once at startup from
//! a TOML file and/or environment variables; immutable afterwards.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::chains::ChainContext;
use crate::types::Provider;

/// Default per-source quote budget (ms)
const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 3_000;

/// OpenOcean public API base
const DEFAULT_OPENOCEAN_URL: &str = "https://open-api.openocean.finance";

/// Main configuration for the quote router
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    // ========== Timeouts ==========
    /// Per-source quote budget in milliseconds. A source that exceeds it
    /// is recorded as a timeout rejection; it never delays the others.
    #[serde(default = "default_quote_timeout_ms")]
    pub quote_timeout_ms: u64,

    // ========== Endpoints ==========
    /// OpenOcean API base URL
    #[serde(default = "default_openocean_url")]
    pub openocean_url: String,

    /// Per-chain RPC overrides, keyed by chain id. Chains absent here use
    /// the static default from the chain table.
    #[serde(default)]
    pub rpc_overrides: HashMap<String, String>,

    // ========== Provider Toggles ==========
    /// Sources to skip at registry build time, as "chain_id:provider"
    /// entries (e.g. "10143:OpenOcean"). Mirrors commenting a provider
    /// out of the deployment table without a code change.
    #[serde(default)]
    pub disabled_sources: Vec<String>,
}

fn default_quote_timeout_ms() -> u64 {
    DEFAULT_QUOTE_TIMEOUT_MS
}

fn default_openocean_url() -> String {
    DEFAULT_OPENOCEAN_URL.to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            quote_timeout_ms: DEFAULT_QUOTE_TIMEOUT_MS,
            openocean_url: DEFAULT_OPENOCEAN_URL.to_string(),
            rpc_overrides: HashMap::new(),
            disabled_sources: Vec::new(),
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut rpc_overrides = HashMap::new();
        // RPC_OVERRIDES=10143=https://rpc.example,8453=https://other
        if let Ok(raw) = env::var("RPC_OVERRIDES") {
            for entry in raw.split(',') {
                if let Some((chain, url)) = entry.split_once('=') {
                    rpc_overrides.insert(chain.trim().to_string(), url.trim().to_string());
                }
            }
        }

        Ok(Self {
            quote_timeout_ms: env::var("QUOTE_TIMEOUT_MS")
                .unwrap_or_else(|_| DEFAULT_QUOTE_TIMEOUT_MS.to_string())
                .parse()
                .unwrap_or(DEFAULT_QUOTE_TIMEOUT_MS),
            openocean_url: env::var("OPENOCEAN_URL")
                .unwrap_or_else(|_| DEFAULT_OPENOCEAN_URL.to_string()),
            rpc_overrides,
            disabled_sources: env::var("DISABLED_SOURCES")
                .map(|s| s.split(',').map(|e| e.trim().to_string()).collect())
                .unwrap_or_default(),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Per-source quote budget
    pub fn quote_timeout(&self) -> Duration {
        Duration::from_millis(self.quote_timeout_ms)
    }

    /// RPC endpoint for a chain, honoring overrides
    pub fn rpc_url_for(&self, chain: &ChainContext) -> String {
        self.rpc_overrides
            .get(&chain.chain_id.to_string())
            .cloned()
            .unwrap_or_else(|| chain.rpc_url.to_string())
    }

    /// Whether a provider is switched off for a chain
    pub fn is_disabled(&self, chain_id: u64, provider: Provider) -> bool {
        let key = format!("{}:{}", chain_id, provider);
        self.disabled_sources.iter().any(|e| e.eq_ignore_ascii_case(&key))
    }
}
