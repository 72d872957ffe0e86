//! Supported Chains - Static Context Table
//!
//! One immutable `ChainContext` per supported chain, built once at startup.
//! Mirrors the deployment surface of the Clober v2 frontend: Base mainnet
//! plus the Monad and Rise testnets.

use alloy_primitives::{address, Address};

// ============================================
// WELL-KNOWN ADDRESSES
// ============================================

/// Sentinel address used by aggregator APIs for the chain's native asset
pub const NATIVE_TOKEN: Address = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

/// Multicall3 - deployed at the same address on all EVM chains
pub const MULTICALL3: Address = address!("ca11bde05977b3631167028862be2a173976ca11");

// ============================================
// CHAIN IDS
// ============================================

pub const BASE: u64 = 8453;
pub const MONAD_TESTNET: u64 = 10143;
pub const RISE_SEPOLIA: u64 = 11155931;

// ============================================
// CHAIN CONTEXT
// ============================================

/// Immutable per-chain metadata. Loaded at process start, never mutated.
#[derive(Debug, Clone)]
pub struct ChainContext {
    pub chain_id: u64,
    pub name: &'static str,
    /// Sentinel address quote sources use for the native asset
    pub native_currency: Address,
    pub native_symbol: &'static str,
    pub native_decimals: u8,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    pub multicall3: Option<Address>,
    pub testnet: bool,
}

impl ChainContext {
    /// Look up the static context for a chain id
    pub fn find(chain_id: u64) -> Option<&'static ChainContext> {
        SUPPORTED_CHAINS.iter().find(|c| c.chain_id == chain_id)
    }
}

/// Every chain the router knows about, in registry fan-out order
pub static SUPPORTED_CHAINS: &[ChainContext] = &[
    ChainContext {
        chain_id: BASE,
        name: "Base",
        native_currency: NATIVE_TOKEN,
        native_symbol: "ETH",
        native_decimals: 18,
        rpc_url: "https://mainnet.base.org",
        explorer_url: "https://basescan.org",
        multicall3: Some(MULTICALL3),
        testnet: false,
    },
    ChainContext {
        chain_id: MONAD_TESTNET,
        name: "Monad Testnet",
        native_currency: NATIVE_TOKEN,
        native_symbol: "MON",
        native_decimals: 18,
        rpc_url: "https://testnet-rpc.monad.xyz",
        explorer_url: "https://testnet.monadexplorer.com",
        multicall3: Some(MULTICALL3),
        testnet: true,
    },
    ChainContext {
        chain_id: RISE_SEPOLIA,
        name: "RISE Testnet",
        native_currency: NATIVE_TOKEN,
        native_symbol: "ETH",
        native_decimals: 18,
        rpc_url: "https://testnet.riselabs.xyz",
        explorer_url: "https://explorer.testnet.riselabs.xyz",
        multicall3: Some(MULTICALL3),
        testnet: true,
    },
];

// ============================================
// DEPLOYMENT CONSTANTS
// ============================================

/// Clober v2 Controller (same address on Monad Testnet and Rise Sepolia)
pub const CLOBER_CONTROLLER: Address = address!("e64ace1bf550e57461cd4e24706633d7fac9d7b0");

/// Aggregator router gateway on Monad Testnet (wraps external aggregator calldata)
pub const AGGREGATOR_GATEWAY: Address = address!("fd845859628946b317a78a9250da251114fbd846");

/// OpenOcean exchange router (same address on most EVM chains)
pub const OPENOCEAN_ROUTER: Address = address!("6352a56caadc4f1e25cd6c75970fa768a3304e64");

/// Pyth price oracle on Monad Testnet (price pushes for futures markets)
pub const PYTH_ORACLE: Address = address!("2880ab155794e7179c9ee2e38200202908c17b43");
