//! Clober v2 Controller Source
//!
//! Quotes by simulating the Controller's view preview via eth_call, then
//! builds the matching `swap` calldata with the slippage floor embedded.
//! Markets that require a Pyth price push carry an optional fee adapter;
//! its lookup failure is this source's failure, not the router's.

use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use tracing::debug;

use crate::chains::NATIVE_TOKEN;
use crate::error::SourceFailure;
use crate::oracle::PythFeeAdapter;
use crate::sources::QuoteSource;
use crate::types::{Provider as ProviderKind, Quote, QuoteRequest, SourceId};

sol! {
    /// Clober v2 Controller - execute-and-preview swap surface
    interface ICloberController {
        struct SwapParams {
            address inToken;
            address outToken;
            uint256 amountIn;
            uint256 minAmountOut;
            address recipient;
            uint64 deadline;
        }

        function previewSwap(SwapParams memory params)
            external view returns (uint256 amountOut, uint256 gasEstimate);

        function swap(SwapParams memory params)
            external payable returns (uint256 amountOut);
    }
}

/// Pyth price push required before executing on a market
#[derive(Debug, Clone)]
pub struct PricePush {
    pub adapter: PythFeeAdapter,
    /// Opaque update blobs, fetched off-band and passed through verbatim
    pub update_data: Vec<Bytes>,
}

/// On-chain quote source backed by one Controller deployment
pub struct CloberControllerSource {
    controller: Address,
    rpc_url: String,
    price_push: Option<PricePush>,
}

impl CloberControllerSource {
    pub fn new(controller: Address, rpc_url: String) -> Self {
        Self {
            controller,
            rpc_url,
            price_push: None,
        }
    }

    /// Attach a Pyth price push whose fee is added to the quote's value
    pub fn with_price_push(mut self, price_push: PricePush) -> Self {
        self.price_push = Some(price_push);
        self
    }

    fn swap_params(request: &QuoteRequest, min_amount_out: U256, deadline: u64) -> ICloberController::SwapParams {
        ICloberController::SwapParams {
            inToken: request.token_in,
            outToken: request.token_out,
            amountIn: request.amount_in,
            minAmountOut: min_amount_out,
            recipient: request.recipient,
            deadline,
        }
    }

    async fn call_contract(&self, calldata: Vec<u8>) -> Result<Vec<u8>, SourceFailure> {
        let provider = ProviderBuilder::new().connect_http(
            self.rpc_url
                .parse()
                .map_err(|e| SourceFailure::Unavailable(format!("bad rpc url: {}", e)))?,
        );

        let tx = TransactionRequest::default()
            .to(self.controller)
            .input(calldata.into());

        let result = provider.call(tx).await.map_err(|e| {
            let msg = e.to_string();
            // A reverted preview means the controller cannot fill the
            // pair/amount; everything else is transport trouble
            if msg.contains("revert") || msg.contains("execution reverted") {
                SourceFailure::NoLiquidity(msg)
            } else {
                SourceFailure::Unavailable(msg)
            }
        })?;

        Ok(result.to_vec())
    }
}

#[async_trait]
impl QuoteSource for CloberControllerSource {
    fn id(&self) -> SourceId {
        SourceId::new(ProviderKind::CloberV2, self.controller)
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, SourceFailure> {
        let expires_at = Quote::default_expiry();

        // Preview with a zero floor; the floor only matters for execution
        let preview = ICloberController::previewSwapCall {
            params: Self::swap_params(request, U256::ZERO, expires_at),
        }
        .abi_encode();

        let output = self.call_contract(preview).await?;
        if output.is_empty() {
            return Err(SourceFailure::NoLiquidity(
                "controller returned no data for pair".to_string(),
            ));
        }

        let decoded = ICloberController::previewSwapCall::abi_decode_returns(&output)
            .map_err(|e| SourceFailure::Unavailable(format!("preview decode failed: {}", e)))?;

        if decoded.amountOut.is_zero() {
            return Err(SourceFailure::NoLiquidity(format!(
                "no depth for {} -> {}",
                request.token_in, request.token_out
            )));
        }

        let amount_out = decoded.amountOut;
        let min_amount_out = request.min_amount_out(amount_out);

        let mut value = if request.token_in == NATIVE_TOKEN {
            request.amount_in
        } else {
            U256::ZERO
        };

        // Price-push markets pay the oracle fee on top of the swap value
        if let Some(push) = &self.price_push {
            let fee = push.adapter.get_update_fee(&push.update_data).await?;
            debug!("adding oracle update fee {} to swap value", fee);
            value += fee;
        }

        let calldata = ICloberController::swapCall {
            params: Self::swap_params(request, min_amount_out, expires_at),
        }
        .abi_encode();

        Ok(Quote {
            source: self.id(),
            amount_out,
            min_amount_out,
            calldata: calldata.into(),
            target: self.controller,
            value,
            gas_estimate: Some(decoded.gasEstimate.to::<u64>()),
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use alloy_sol_types::SolValue;

    fn request() -> QuoteRequest {
        QuoteRequest {
            chain_id: crate::chains::MONAD_TESTNET,
            token_in: NATIVE_TOKEN,
            token_out: address!("f817257fed379853cde0fa4f97ab987181b1e5ea"),
            amount_in: U256::from(1_000_000_000_000_000_000u128),
            recipient: address!("0000000000000000000000000000000000000001"),
            slippage_bps: 50,
            deadline: None,
        }
    }

    #[test]
    fn test_swap_calldata_embeds_slippage_floor() {
        let req = request();
        let min_out = U256::from(995u64);
        let calldata = ICloberController::swapCall {
            params: CloberControllerSource::swap_params(&req, min_out, 1_700_000_000),
        }
        .abi_encode();

        let decoded = ICloberController::swapCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.params.minAmountOut, min_out);
        assert_eq!(decoded.params.inToken, req.token_in);
        assert_eq!(decoded.params.outToken, req.token_out);
        assert_eq!(decoded.params.amountIn, req.amount_in);
        assert_eq!(decoded.params.recipient, req.recipient);
        assert_eq!(decoded.params.deadline, 1_700_000_000);
    }

    #[test]
    fn test_preview_return_decoding() {
        let encoded = (U256::from(995u64), U256::from(210_000u64)).abi_encode();
        let decoded = ICloberController::previewSwapCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(decoded.amountOut, U256::from(995u64));
        assert_eq!(decoded.gasEstimate.to::<u64>(), 210_000);
    }

    #[test]
    fn test_price_push_is_optional() {
        let bare = CloberControllerSource::new(
            crate::chains::CLOBER_CONTROLLER,
            "http://localhost:8545".to_string(),
        );
        assert!(bare.price_push.is_none());

        let push = PricePush {
            adapter: PythFeeAdapter::new(
                crate::chains::PYTH_ORACLE,
                "http://localhost:8545".to_string(),
            ),
            update_data: vec![Bytes::from(vec![0x01])],
        };
        let with_push = bare.with_price_push(push);
        assert!(with_push.price_push.is_some());
    }

    #[test]
    fn test_source_id_is_stable() {
        let source = CloberControllerSource::new(
            crate::chains::CLOBER_CONTROLLER,
            "http://localhost:8545".to_string(),
        );
        assert_eq!(source.id().provider, ProviderKind::CloberV2);
        assert_eq!(source.id().contract, crate::chains::CLOBER_CONTROLLER);
    }
}
