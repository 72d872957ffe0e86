//! Quote Router
//!
//! Fans a request out to every source registered for its chain, bounds
//! each call independently, and picks the winner by the post-slippage
//! floor. Individual source failures never abort the pass; they become
//! rejection entries. Only a malformed request fails `route` itself.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::RouterConfig;
use crate::error::{RouteError, SourceFailure};
use crate::registry::AggregatorRegistry;
use crate::types::{Provider, Quote, QuoteRequest, Rejection, RouteResult, SourceId};

pub struct Router {
    registry: AggregatorRegistry,
    quote_timeout: Duration,
}

impl Router {
    pub fn new(registry: AggregatorRegistry, quote_timeout: Duration) -> Self {
        Self {
            registry,
            quote_timeout,
        }
    }

    /// Production router: registry and timeout from configuration
    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(AggregatorRegistry::from_config(config), config.quote_timeout())
    }

    /// One routing pass: validate, fan out, select.
    ///
    /// Returns `Ok` with either a chosen quote or a full rejection list;
    /// `Err` only for requests rejected before any network call.
    pub async fn route(&self, request: &QuoteRequest) -> Result<RouteResult, RouteError> {
        request.validate()?;

        let sources = self.registry.sources_for(request.chain_id);
        if sources.is_empty() {
            warn!(chain_id = request.chain_id, "no sources registered for chain");
            return Ok(RouteResult {
                best: None,
                rejections: vec![Rejection::unsupported_chain(request.chain_id)],
            });
        }

        // Per-source budget, capped by the caller's overall deadline. All
        // sources start together, so capping each call finalizes the pass
        // at the deadline with whatever has arrived.
        let budget = match request.deadline {
            Some(deadline) => self.quote_timeout.min(deadline),
            None => self.quote_timeout,
        };

        let outcomes = join_all(sources.iter().map(|source| async move {
            let id = source.id();
            match tokio::time::timeout(budget, source.quote(request)).await {
                Ok(outcome) => (id, outcome),
                Err(_) => (id, Err(SourceFailure::Timeout(budget))),
            }
        }))
        .await;

        let mut best: Option<Quote> = None;
        let mut rejections = Vec::new();

        for (id, outcome) in outcomes {
            match outcome {
                Ok(quote) => {
                    debug!(
                        source = %id,
                        amount_out = %quote.amount_out,
                        min_amount_out = %quote.min_amount_out,
                        "quote received"
                    );
                    // Strict improvement only: registry order breaks full ties
                    match &best {
                        Some(current) if !beats(&quote, current) => {}
                        _ => best = Some(quote),
                    }
                }
                Err(reason) => {
                    warn!(source = %id, %reason, "source rejected");
                    rejections.push(Rejection { source: id, reason });
                }
            }
        }

        Ok(RouteResult { best, rejections })
    }
}

/// Whether `candidate` strictly outranks `current`.
///
/// Ranking is by guaranteed output (`min_amount_out`), then known gas
/// before unknown, then lowest gas. Deterministic for identical inputs.
fn beats(candidate: &Quote, current: &Quote) -> bool {
    if candidate.min_amount_out != current.min_amount_out {
        return candidate.min_amount_out > current.min_amount_out;
    }
    match (candidate.gas_estimate, current.gas_estimate) {
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (Some(a), Some(b)) => a < b,
        (None, None) => false,
    }
}

impl Rejection {
    /// Synthetic entry for a chain with no registered sources
    pub fn unsupported_chain(chain_id: u64) -> Self {
        Self {
            source: SourceId::new(Provider::Registry, alloy_primitives::Address::ZERO),
            reason: SourceFailure::Unavailable(format!("unsupported chain {}", chain_id)),
        }
    }
}

impl RouteResult {
    /// Collapse into the chosen quote, or the terminal routing failure
    pub fn require_best(self) -> Result<Quote, RouteError> {
        match self.best {
            Some(quote) => Ok(quote),
            None => Err(RouteError::AllSourcesFailed(self.rejections)),
        }
    }
}
