//! Core Value Types
//!
//! Request/response shapes shared by the router and every quote source.
//! A `Quote` is produced fresh per request and never cached - prices move.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, Bytes, U256};

use crate::error::{SourceFailure, ValidationError};

/// Quotes older than this are considered stale by consumers
pub const QUOTE_TTL_SECS: u64 = 30;

/// Slippage denominator (1 bps = 0.01%)
pub const BPS_DENOMINATOR: u64 = 10_000;

// ============================================
// SOURCE IDENTITY
// ============================================

/// Which provider family a quote source belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    CloberV2,
    OpenOcean,
    /// Pseudo-provider for registry-level rejections (no source to name)
    Registry,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::CloberV2 => write!(f, "CloberV2"),
            Provider::OpenOcean => write!(f, "OpenOcean"),
            Provider::Registry => write!(f, "Registry"),
        }
    }
}

/// Identifies one registered quote source: the provider family plus the
/// contract (or router) it fronts. Stable across requests, used in logs
/// and rejection lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId {
    pub provider: Provider,
    pub contract: Address,
}

impl SourceId {
    pub fn new(provider: Provider, contract: Address) -> Self {
        Self { provider, contract }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.provider, self.contract)
    }
}

// ============================================
// REQUEST
// ============================================

/// Immutable input for one routing pass
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub chain_id: u64,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub recipient: Address,
    /// Slippage tolerance in basis points, [0, 10000)
    pub slippage_bps: u32,
    /// Overall budget for the routing pass. Sources still responding when
    /// it elapses are finalized as timeouts.
    pub deadline: Option<Duration>,
}

impl QuoteRequest {
    /// Reject malformed requests before any network call is issued
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount_in.is_zero() {
            return Err(ValidationError::ZeroAmount);
        }
        if self.token_in == self.token_out {
            return Err(ValidationError::SameToken);
        }
        if self.slippage_bps as u64 >= BPS_DENOMINATOR {
            return Err(ValidationError::SlippageOutOfRange(self.slippage_bps));
        }
        Ok(())
    }

    /// Conservative post-slippage floor for a raw output amount
    pub fn min_amount_out(&self, amount_out: U256) -> U256 {
        let keep = U256::from(BPS_DENOMINATOR - self.slippage_bps as u64);
        amount_out * keep / U256::from(BPS_DENOMINATOR)
    }
}

// ============================================
// QUOTE
// ============================================

/// One executable route from one source. The router only reads it; the
/// producing source is the sole writer.
#[derive(Debug, Clone)]
pub struct Quote {
    pub source: SourceId,
    /// Raw output amount reported by the source
    pub amount_out: U256,
    /// Output floor after slippage - what is actually guaranteed
    pub min_amount_out: U256,
    /// ABI-encoded swap call, valid for `target` as-is
    pub calldata: Bytes,
    /// Contract the calldata must be sent to
    pub target: Address,
    /// Native value to attach (native-token input and/or oracle update fee)
    pub value: U256,
    /// Gas estimate if the source reported one. None sorts after any
    /// known value in tie-breaks.
    pub gas_estimate: Option<u64>,
    /// Unix seconds after which the quote should not be executed
    pub expires_at: u64,
}

impl Quote {
    /// Expiry timestamp for a quote issued now
    pub fn default_expiry() -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        now + QUOTE_TTL_SECS
    }
}

// ============================================
// ROUTE RESULT
// ============================================

/// Why one source produced no usable quote this pass
#[derive(Debug, Clone)]
pub struct Rejection {
    pub source: SourceId,
    pub reason: SourceFailure,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

/// Outcome of one routing pass. `best` is Some on success; when it is
/// None the rejection list explains every source's failure, in registry
/// order. Sources that merely lost the comparison are not listed.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub best: Option<Quote>,
    pub rejections: Vec<Rejection>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn request(amount_in: u64, slippage_bps: u32) -> QuoteRequest {
        QuoteRequest {
            chain_id: crate::chains::MONAD_TESTNET,
            token_in: crate::chains::NATIVE_TOKEN,
            token_out: address!("f817257fed379853cde0fa4f97ab987181b1e5ea"),
            amount_in: U256::from(amount_in),
            recipient: address!("0000000000000000000000000000000000000001"),
            slippage_bps,
            deadline: None,
        }
    }

    #[test]
    fn test_validate_accepts_sane_request() {
        assert!(request(1_000_000, 50).validate().is_ok());
        assert!(request(1, 0).validate().is_ok());
        assert!(request(1, 9_999).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        assert_eq!(request(0, 50).validate(), Err(ValidationError::ZeroAmount));
    }

    #[test]
    fn test_validate_rejects_same_token() {
        let mut req = request(100, 50);
        req.token_out = req.token_in;
        assert_eq!(req.validate(), Err(ValidationError::SameToken));
    }

    #[test]
    fn test_validate_rejects_out_of_range_slippage() {
        assert_eq!(
            request(100, 10_000).validate(),
            Err(ValidationError::SlippageOutOfRange(10_000))
        );
        assert_eq!(
            request(100, 65_000).validate(),
            Err(ValidationError::SlippageOutOfRange(65_000))
        );
    }

    #[test]
    fn test_min_amount_out_applies_slippage() {
        let req = request(1, 50); // 0.5%
        assert_eq!(req.min_amount_out(U256::from(10_000u64)), U256::from(9_950u64));

        let req = request(1, 0);
        assert_eq!(req.min_amount_out(U256::from(12_345u64)), U256::from(12_345u64));
    }

    #[test]
    fn test_min_amount_out_never_exceeds_amount_out() {
        for bps in [0u32, 1, 50, 300, 9_999] {
            let req = request(1, bps);
            let out = U256::from(1_000_000_000u64);
            assert!(req.min_amount_out(out) <= out, "bps={}", bps);
        }
    }
}
