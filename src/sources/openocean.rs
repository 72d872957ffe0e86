//! OpenOcean HTTP Source
//!
//! Quotes via the public OpenOcean swap API and maps the response into
//! the common `Quote` shape. Fields the provider omits degrade
//! conservatively: a missing gas estimate stays unknown and sorts after
//! known values in tie-breaks; a missing output floor is recomputed
//! locally from the request's slippage.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use async_trait::async_trait;

use crate::error::SourceFailure;
use crate::sources::QuoteSource;
use crate::types::{Provider, Quote, QuoteRequest, SourceId};

/// HTTP budget for one quote call
const HTTP_TIMEOUT_SECS: u64 = 5;

// ============================================
// API RESPONSE TYPES
// ============================================

#[derive(Debug, Deserialize)]
struct SwapResponse {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<SwapData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapData {
    #[serde(default)]
    out_amount: Option<String>,
    #[serde(default)]
    min_out_amount: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    estimated_gas: Option<serde_json::Value>,
}

// ============================================
// SOURCE
// ============================================

/// One OpenOcean deployment: the public API plus the on-chain exchange
/// router the returned calldata targets
pub struct OpenOceanSource {
    router: Address,
    base_url: String,
    client: Client,
}

impl OpenOceanSource {
    pub fn new(router: Address, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            router,
            base_url,
            client,
        }
    }

    fn swap_url(&self, request: &QuoteRequest) -> String {
        // OpenOcean takes slippage as a percentage, not bps
        let slippage_pct = request.slippage_bps as f64 / 100.0;
        format!(
            "{}/v4/{}/swap?inTokenAddress={}&outTokenAddress={}&amount={}&slippage={}&account={}",
            self.base_url,
            request.chain_id,
            request.token_in,
            request.token_out,
            request.amount_in,
            slippage_pct,
            request.recipient,
        )
    }

    /// Map the provider payload into the common quote shape
    fn map_response(
        &self,
        request: &QuoteRequest,
        response: SwapResponse,
    ) -> Result<Quote, SourceFailure> {
        if response.code != 200 {
            return Err(SourceFailure::Unavailable(format!(
                "api code {}: {}",
                response.code,
                response.message.unwrap_or_default()
            )));
        }

        let data = response
            .data
            .ok_or_else(|| SourceFailure::Unavailable("response missing data".to_string()))?;

        let amount_out = parse_u256(data.out_amount.as_deref())
            .ok_or_else(|| SourceFailure::Unavailable("missing outAmount".to_string()))?;
        if amount_out.is_zero() {
            return Err(SourceFailure::NoLiquidity(format!(
                "no route for {} -> {}",
                request.token_in, request.token_out
            )));
        }

        let calldata: Bytes = data
            .data
            .as_deref()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| SourceFailure::Unavailable("missing swap calldata".to_string()))?;

        // `to` defaults to the known router if the provider omits it
        let target = data
            .to
            .as_deref()
            .and_then(|s| s.parse::<Address>().ok())
            .unwrap_or(self.router);

        // Provider floor when present, local slippage floor otherwise
        let min_amount_out = parse_u256(data.min_out_amount.as_deref())
            .filter(|floor| !floor.is_zero() && *floor <= amount_out)
            .unwrap_or_else(|| request.min_amount_out(amount_out));

        let value = parse_u256(data.value.as_deref()).unwrap_or(U256::ZERO);

        Ok(Quote {
            source: self.id(),
            amount_out,
            min_amount_out,
            calldata,
            target,
            value,
            gas_estimate: parse_gas(data.estimated_gas.as_ref()),
            expires_at: Quote::default_expiry(),
        })
    }
}

fn parse_u256(raw: Option<&str>) -> Option<U256> {
    raw.and_then(|s| s.parse::<U256>().ok())
}

/// The API reports gas as either a JSON number or a decimal string
fn parse_gas(raw: Option<&serde_json::Value>) -> Option<u64> {
    match raw {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl QuoteSource for OpenOceanSource {
    fn id(&self) -> SourceId {
        SourceId::new(Provider::OpenOcean, self.router)
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, SourceFailure> {
        let url = self.swap_url(request);
        debug!("OpenOcean quote: {}", url);

        let http = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceFailure::Unavailable(format!("request failed: {}", e)))?;

        if !http.status().is_success() {
            return Err(SourceFailure::Unavailable(format!(
                "http {}",
                http.status()
            )));
        }

        let response: SwapResponse = http
            .json()
            .await
            .map_err(|e| SourceFailure::Unavailable(format!("malformed payload: {}", e)))?;

        self.map_response(request, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn source() -> OpenOceanSource {
        OpenOceanSource::new(
            crate::chains::OPENOCEAN_ROUTER,
            "https://open-api.openocean.finance".to_string(),
        )
    }

    fn request() -> QuoteRequest {
        QuoteRequest {
            chain_id: crate::chains::MONAD_TESTNET,
            token_in: crate::chains::NATIVE_TOKEN,
            token_out: address!("f817257fed379853cde0fa4f97ab987181b1e5ea"),
            amount_in: U256::from(1_000_000_000_000_000_000u128),
            recipient: address!("0000000000000000000000000000000000000001"),
            slippage_bps: 50,
            deadline: None,
        }
    }

    #[test]
    fn test_swap_url_contains_request_fields() {
        let url = source().swap_url(&request());
        assert!(url.contains("/v4/10143/swap"));
        assert!(url.contains("amount=1000000000000000000"));
        assert!(url.contains("slippage=0.5"));
    }

    #[test]
    fn test_map_complete_response() {
        let response: SwapResponse = serde_json::from_str(
            r#"{
                "code": 200,
                "data": {
                    "outAmount": "995000000",
                    "minOutAmount": "990000000",
                    "to": "0x6352a56caadc4f1e25cd6c75970fa768a3304e64",
                    "data": "0xaabbcc",
                    "value": "1000000000000000000",
                    "estimatedGas": 310000
                }
            }"#,
        )
        .unwrap();

        let quote = source().map_response(&request(), response).unwrap();
        assert_eq!(quote.amount_out, U256::from(995_000_000u64));
        assert_eq!(quote.min_amount_out, U256::from(990_000_000u64));
        assert_eq!(quote.target, crate::chains::OPENOCEAN_ROUTER);
        assert_eq!(quote.calldata.as_ref(), &[0xaa, 0xbb, 0xcc]);
        assert_eq!(quote.gas_estimate, Some(310_000));
        assert!(quote.min_amount_out <= quote.amount_out);
    }

    #[test]
    fn test_map_response_defaults_missing_fields() {
        // no minOutAmount, no gas, no to: floor recomputed locally,
        // gas unknown, target falls back to the known router
        let response: SwapResponse = serde_json::from_str(
            r#"{
                "code": 200,
                "data": {
                    "outAmount": "1000000",
                    "data": "0x01"
                }
            }"#,
        )
        .unwrap();

        let req = request();
        let quote = source().map_response(&req, response).unwrap();
        assert_eq!(quote.min_amount_out, req.min_amount_out(U256::from(1_000_000u64)));
        assert_eq!(quote.gas_estimate, None);
        assert_eq!(quote.target, crate::chains::OPENOCEAN_ROUTER);
    }

    #[test]
    fn test_map_response_rejects_error_code() {
        let response: SwapResponse =
            serde_json::from_str(r#"{"code": 500, "message": "out of service"}"#).unwrap();
        let err = source().map_response(&request(), response).unwrap_err();
        assert!(matches!(err, SourceFailure::Unavailable(_)));
    }

    #[test]
    fn test_map_response_zero_output_is_no_liquidity() {
        let response: SwapResponse = serde_json::from_str(
            r#"{"code": 200, "data": {"outAmount": "0", "data": "0x"}}"#,
        )
        .unwrap();
        let err = source().map_response(&request(), response).unwrap_err();
        assert!(matches!(err, SourceFailure::NoLiquidity(_)));
    }

    #[test]
    fn test_gas_parses_number_or_string() {
        assert_eq!(parse_gas(Some(&serde_json::json!(21000))), Some(21_000));
        assert_eq!(parse_gas(Some(&serde_json::json!("21000"))), Some(21_000));
        assert_eq!(parse_gas(Some(&serde_json::json!(null))), None);
        assert_eq!(parse_gas(None), None);
    }
}
