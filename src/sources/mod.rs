//! Quote Sources
//!
//! One backend per provider behind a common trait. The router depends
//! only on `QuoteSource`; adding a provider never touches the router.
//!
//! - `clober`: on-chain read against the Clober v2 Controller
//! - `openocean`: HTTP call to the OpenOcean aggregator API
//! - `gateway`: decorator rewriting another source's calldata for an
//!   on-chain forwarding gateway

pub mod clober;
pub mod gateway;
pub mod openocean;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SourceFailure;
use crate::types::{Quote, QuoteRequest, SourceId};

pub use clober::CloberControllerSource;
pub use gateway::GatewaySource;
pub use openocean::OpenOceanSource;

/// A single backend capable of producing a swap quote.
///
/// Implementations hold no per-request mutable state and must be safe to
/// call concurrently. Each call either yields a fresh executable `Quote`
/// or a typed failure; nothing may panic across this boundary.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Stable identity for logs and rejection lists
    fn id(&self) -> SourceId;

    /// Produce a quote for the request, or explain why this source cannot
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, SourceFailure>;
}

#[async_trait]
impl<T: QuoteSource + ?Sized> QuoteSource for Arc<T> {
    fn id(&self) -> SourceId {
        (**self).id()
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<Quote, SourceFailure> {
        (**self).quote(request).await
    }
}
