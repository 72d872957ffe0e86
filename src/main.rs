//! Swap Router CLI
//!
//! Routes one quote request across every source registered for the
//! chain and prints the winning route plus the rejection list.
//!
//! Run with: cargo run -- --chain-id 10143 --token-in 0xeee... \
//!     --token-out 0xf81... --amount-in 1000000000000000000

use alloy_primitives::{Address, U256};
use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use console::style;
use tracing_subscriber::EnvFilter;

use swap_router::chains::{self, ChainContext};
use swap_router::{QuoteRequest, Router, RouterConfig};

#[derive(Parser, Debug)]
#[command(name = "swap-router", about = "Multi-source swap quote router")]
struct Args {
    /// Chain to route on (8453, 10143, 11155931)
    #[arg(long, default_value_t = chains::MONAD_TESTNET)]
    chain_id: u64,

    /// Input token address (0xeeee...eeee for the native asset)
    #[arg(long)]
    token_in: Address,

    /// Output token address
    #[arg(long)]
    token_out: Address,

    /// Input amount in the token's smallest unit
    #[arg(long)]
    amount_in: U256,

    /// Recipient of the swap output (defaults to the zero address for
    /// quote-only runs)
    #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
    recipient: Address,

    /// Slippage tolerance in basis points
    #[arg(long, default_value_t = 50)]
    slippage_bps: u32,

    /// Optional TOML config file; environment variables apply on top
    #[arg(long)]
    config: Option<String>,
}

fn print_banner(chain: &ChainContext) {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(format!(" SWAP ROUTER — {} ({})", chain.name, chain.chain_id))
            .cyan()
            .bold()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════").cyan()
    );
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RouterConfig::from_file(path)?,
        None => RouterConfig::from_env()?,
    };

    let chain = ChainContext::find(args.chain_id)
        .ok_or_else(|| eyre!("chain {} is not in the supported set", args.chain_id))?;
    print_banner(chain);

    let router = Router::from_config(&config);

    let request = QuoteRequest {
        chain_id: args.chain_id,
        token_in: args.token_in,
        token_out: args.token_out,
        amount_in: args.amount_in,
        recipient: args.recipient,
        slippage_bps: args.slippage_bps,
        deadline: None,
    };

    let result = router.route(&request).await?;

    for rejection in &result.rejections {
        println!("  {} {}", style("✗").red(), rejection);
    }

    match result.best {
        Some(quote) => {
            println!();
            println!(
                "  {} best route via {}",
                style("✓").green().bold(),
                style(quote.source).bold()
            );
            println!("    amount out      {}", quote.amount_out);
            println!("    guaranteed out  {}", quote.min_amount_out);
            println!("    target          {}", quote.target);
            println!("    value           {}", quote.value);
            match quote.gas_estimate {
                Some(gas) => println!("    est. gas        {}", gas),
                None => println!("    est. gas        unknown"),
            }
            println!("    expires at      {}", quote.expires_at);
            println!("    calldata        0x{}", hex::encode(&quote.calldata));
        }
        None => {
            println!();
            println!(
                "  {} no executable route ({} sources rejected)",
                style("✗").red().bold(),
                result.rejections.len()
            );
        }
    }

    Ok(())
}
