//! Aggregator Registry
//!
//! Per-chain ordered lists of quote sources, built once at startup from
//! the static deployment table and the router configuration. Read-only
//! afterwards; list order only fixes fan-out and logging order, never
//! selection.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::chains::{
    self, ChainContext, AGGREGATOR_GATEWAY, CLOBER_CONTROLLER, OPENOCEAN_ROUTER,
};
use crate::config::RouterConfig;
use crate::sources::{CloberControllerSource, GatewaySource, OpenOceanSource, QuoteSource};
use crate::types::Provider;

/// Process-wide mapping from chain id to its registered quote sources
pub struct AggregatorRegistry {
    sources: HashMap<u64, Vec<Arc<dyn QuoteSource>>>,
}

impl AggregatorRegistry {
    /// Empty registry; sources added via `register`
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Append a source to a chain's fan-out list
    pub fn register(&mut self, chain_id: u64, source: Arc<dyn QuoteSource>) {
        self.sources.entry(chain_id).or_default().push(source);
    }

    /// Build the production registry, mirroring the per-chain deployment
    /// table: Base quotes through OpenOcean, Monad Testnet through the
    /// Clober controller plus a gateway-wrapped OpenOcean, Rise Sepolia
    /// through the controller alone.
    pub fn from_config(config: &RouterConfig) -> Self {
        let mut registry = Self::new();

        for chain in chains::SUPPORTED_CHAINS {
            for source in Self::chain_sources(chain, config) {
                registry.register(chain.chain_id, source);
            }
            info!(
                chain = chain.name,
                sources = registry.sources_for(chain.chain_id).len(),
                "registered quote sources"
            );
        }

        registry
    }

    fn chain_sources(chain: &ChainContext, config: &RouterConfig) -> Vec<Arc<dyn QuoteSource>> {
        let rpc_url = config.rpc_url_for(chain);
        let mut list: Vec<Arc<dyn QuoteSource>> = Vec::new();

        match chain.chain_id {
            chains::BASE => {
                if !config.is_disabled(chain.chain_id, Provider::OpenOcean) {
                    list.push(Arc::new(OpenOceanSource::new(
                        OPENOCEAN_ROUTER,
                        config.openocean_url.clone(),
                    )));
                }
            }
            chains::MONAD_TESTNET => {
                if !config.is_disabled(chain.chain_id, Provider::CloberV2) {
                    list.push(Arc::new(CloberControllerSource::new(
                        CLOBER_CONTROLLER,
                        rpc_url.clone(),
                    )));
                }
                if !config.is_disabled(chain.chain_id, Provider::OpenOcean) {
                    let inner: Arc<dyn QuoteSource> = Arc::new(OpenOceanSource::new(
                        OPENOCEAN_ROUTER,
                        config.openocean_url.clone(),
                    ));
                    list.push(Arc::new(GatewaySource::new(AGGREGATOR_GATEWAY, inner)));
                }
            }
            chains::RISE_SEPOLIA => {
                if !config.is_disabled(chain.chain_id, Provider::CloberV2) {
                    list.push(Arc::new(CloberControllerSource::new(
                        CLOBER_CONTROLLER,
                        rpc_url,
                    )));
                }
            }
            _ => {}
        }

        list
    }

    /// Ordered sources for a chain; empty (not an error) when the chain
    /// has none configured
    pub fn sources_for(&self, chain_id: u64) -> &[Arc<dyn QuoteSource>] {
        self.sources
            .get(&chain_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Chain ids with at least one registered source
    pub fn chains(&self) -> impl Iterator<Item = u64> + '_ {
        self.sources
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(id, _)| *id)
    }
}

impl Default for AggregatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_registry_layout() {
        let registry = AggregatorRegistry::from_config(&RouterConfig::default());

        assert_eq!(registry.sources_for(chains::BASE).len(), 1);
        assert_eq!(registry.sources_for(chains::MONAD_TESTNET).len(), 2);
        assert_eq!(registry.sources_for(chains::RISE_SEPOLIA).len(), 1);

        // fan-out order is the deployment-table order
        let monad = registry.sources_for(chains::MONAD_TESTNET);
        assert_eq!(monad[0].id().provider, Provider::CloberV2);
        assert_eq!(monad[1].id().provider, Provider::OpenOcean);
    }

    #[test]
    fn test_unconfigured_chain_is_empty_not_error() {
        let registry = AggregatorRegistry::from_config(&RouterConfig::default());
        assert!(registry.sources_for(1).is_empty());
        assert!(registry.sources_for(0).is_empty());
    }

    #[test]
    fn test_disabled_source_is_skipped() {
        let config = RouterConfig {
            disabled_sources: vec!["10143:OpenOcean".to_string()],
            ..Default::default()
        };
        let registry = AggregatorRegistry::from_config(&config);

        let monad = registry.sources_for(chains::MONAD_TESTNET);
        assert_eq!(monad.len(), 1);
        assert_eq!(monad[0].id().provider, Provider::CloberV2);
    }
}
