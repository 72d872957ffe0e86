//! Pyth Oracle Fee Adapter
//!
//! Read-only lookup of the fee a Pyth price push costs, needed by quote
//! sources whose execution pushes a price update before the swap. A
//! failed lookup is the calling source's failure, never the router's.

use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{sol, SolCall};
use tracing::debug;

use crate::error::OracleError;

sol! {
    /// Pyth price oracle - fee query for pushing price updates
    interface IPythOracle {
        function getUpdateFee(bytes[] calldata updateData)
            external view returns (uint256 feeAmount);
    }
}

/// One oracle deployment on one chain
#[derive(Debug, Clone)]
pub struct PythFeeAdapter {
    oracle: Address,
    rpc_url: String,
}

impl PythFeeAdapter {
    pub fn new(oracle: Address, rpc_url: String) -> Self {
        Self { oracle, rpc_url }
    }

    pub fn oracle(&self) -> Address {
        self.oracle
    }

    /// Fee (native-denominated) for pushing the given update blobs
    pub async fn get_update_fee(&self, update_data: &[Bytes]) -> Result<U256, OracleError> {
        let calldata = IPythOracle::getUpdateFeeCall {
            updateData: update_data.to_vec(),
        }
        .abi_encode();

        let provider = ProviderBuilder::new()
            .connect_http(
                self.rpc_url
                    .parse()
                    .map_err(|e| OracleError::Call(format!("bad rpc url: {}", e)))?,
            );

        let tx = TransactionRequest::default()
            .to(self.oracle)
            .input(calldata.into());

        let output = provider
            .call(tx)
            .await
            .map_err(|e| OracleError::Call(e.to_string()))?;

        let fee = IPythOracle::getUpdateFeeCall::abi_decode_returns(&output)
            .map_err(|e| OracleError::Decode(e.to_string()))?;

        debug!("Pyth update fee for {} blobs: {}", update_data.len(), fee);
        Ok(fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolValue;

    #[test]
    fn test_update_fee_calldata_shape() {
        let blobs = vec![Bytes::from(vec![0x01, 0x02]), Bytes::from(vec![0x03])];
        let calldata = IPythOracle::getUpdateFeeCall {
            updateData: blobs.clone(),
        }
        .abi_encode();

        // selector + ABI-encoded bytes[] round-trips
        let decoded = IPythOracle::getUpdateFeeCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.updateData, blobs);
    }

    #[test]
    fn test_fee_return_decoding() {
        let encoded = U256::from(42_000u64).abi_encode();
        let fee = IPythOracle::getUpdateFeeCall::abi_decode_returns(&encoded).unwrap();
        assert_eq!(fee, U256::from(42_000u64));
    }
}
