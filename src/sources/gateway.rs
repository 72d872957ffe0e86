//! Aggregator Router Gateway
//!
//! Decorator over another quote source. The gateway contract forwards
//! value and calldata to the inner aggregator's router transparently, so
//! only the execution path changes: the quote's target becomes the
//! gateway and the inner calldata is embedded as a payload parameter.
//! Economic terms pass through untouched.

use std::sync::Arc;

use alloy_primitives::Address;
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;

use crate::error::SourceFailure;
use crate::sources::QuoteSource;
use crate::types::{Quote, QuoteRequest, SourceId};

sol! {
    /// On-chain gateway that re-checks slippage and forwards the wrapped
    /// aggregator call
    interface IAggregatorGateway {
        function swap(
            address inToken,
            uint256 amountIn,
            address router,
            bytes calldata data
        ) external payable returns (uint256 amountOut);
    }
}

/// Gateway-wrapped quote source
pub struct GatewaySource {
    gateway: Address,
    inner: Arc<dyn QuoteSource>,
}

impl GatewaySource {
    pub fn new(gateway: Address, inner: Arc<dyn QuoteSource>) -> Self {
        Self { gateway, inner }
    }

    pub fn gateway(&self) -> Address {
        self.gateway
    }
}

#[async_trait]
impl QuoteSource for GatewaySource {
    /// Diagnostics keep the wrapped source's identity; the gateway only
    /// changes where the calldata is sent
    fn id(&self) -> SourceId {
        self.inner.id()
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, SourceFailure> {
        let inner_quote = self.inner.quote(request).await?;

        let calldata = IAggregatorGateway::swapCall {
            inToken: request.token_in,
            amountIn: request.amount_in,
            router: inner_quote.target,
            data: inner_quote.calldata.clone(),
        }
        .abi_encode();

        Ok(Quote {
            target: self.gateway,
            calldata: calldata.into(),
            ..inner_quote
        })
    }
}
