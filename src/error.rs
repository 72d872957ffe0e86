//! Failure Taxonomy
//!
//! Three layers, matching where a failure is allowed to surface:
//! - `ValidationError`: bad request, rejected before any network call
//! - `SourceFailure`: one quote source failed; recovered locally by the
//!   router and recorded as a rejection, never propagated
//! - `RouteError`: terminal failure of the whole route() call

use std::time::Duration;

use thiserror::Error;

use crate::types::Rejection;

/// Malformed quote request. Always reported to the caller before any
/// network or RPC call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount in must be greater than zero")]
    ZeroAmount,

    #[error("token in and token out are the same")]
    SameToken,

    #[error("slippage {0} bps is outside [0, 10000)")]
    SlippageOutOfRange(u32),

    #[error("chain {0} is not supported")]
    UnknownChain(u64),
}

/// RPC failure from the price oracle fee lookup. Owned by the quote
/// source that needed the fee, not by the router.
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("oracle call failed: {0}")]
    Call(String),

    #[error("oracle returned malformed fee data: {0}")]
    Decode(String),
}

/// Why a single quote source produced no usable quote.
#[derive(Debug, Clone, Error)]
pub enum SourceFailure {
    /// Network/RPC/HTTP error - the source could not be reached or answered
    /// with garbage
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The source did not answer within its per-call budget
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The source answered but cannot satisfy the requested pair/amount
    #[error("no liquidity: {0}")]
    NoLiquidity(String),

    /// Oracle update-fee lookup failed for a price-push market
    #[error("oracle fee lookup failed: {0}")]
    Oracle(#[from] OracleError),
}

/// Terminal failure of `route()`. Anything below this is caught and
/// converted into a rejection entry instead.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid request: {0}")]
    Invalid(#[from] ValidationError),

    #[error("all {} sources failed", .0.len())]
    AllSourcesFailed(Vec<Rejection>),
}
