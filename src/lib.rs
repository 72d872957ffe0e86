//! Multi-source swap quote router.
//!
//! Queries heterogeneous liquidity providers - the Clober v2 on-chain
//! controller, external HTTP aggregators, and a gateway contract that
//! forwards aggregator calldata - and selects the best executable route
//! for a token-to-token swap. The output is a signed-ready transaction
//! descriptor; signing and broadcasting live elsewhere.

pub mod chains;
pub mod config;
pub mod error;
pub mod oracle;
pub mod registry;
pub mod router;
pub mod sources;
pub mod types;

pub use chains::ChainContext;
pub use config::RouterConfig;
pub use error::{RouteError, SourceFailure, ValidationError};
pub use oracle::PythFeeAdapter;
pub use registry::AggregatorRegistry;
pub use router::Router;
pub use sources::QuoteSource;
pub use types::{Quote, QuoteRequest, Rejection, RouteResult};
