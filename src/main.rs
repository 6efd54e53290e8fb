//! lendcycle - Aave V2 demo workflow
//!
//! Run with: cargo run
//!
//! Wraps ETH into WETH, deposits it as collateral, borrows DAI against
//! it at 95% of capacity, and repays. Meant for a mainnet fork; every
//! consequential decision (rates, collateral valuation, liquidation)
//! lives in the deployed protocol, not here.

use alloy_network::EthereumWallet;
use alloy_primitives::utils::format_ether;
use alloy_provider::ProviderBuilder;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use color_eyre::eyre::{eyre, Result};
use console::style;
use std::str::FromStr;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod sizing;
mod workflow;

use config::{Config, RunLog};
use protocol::{AaveClient, LendingProtocol};

fn print_banner() {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(" LENDCYCLE - Aave V2 wrap / deposit / borrow / repay").cyan().bold()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lendcycle=info".parse()?),
        )
        .init();

    print_banner();

    let config = Config::from_env()?;

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        error!("Please check your .env file");
        return Err(e);
    }

    config.print_summary();
    println!();

    let key = config
        .private_key
        .as_deref()
        .ok_or_else(|| eyre!("PRIVATE_KEY is required"))?;
    let signer = PrivateKeySigner::from_str(key.trim_start_matches("0x"))
        .map_err(|e| eyre!("Failed to parse PRIVATE_KEY: {}", e))?
        .with_chain_id(Some(config.chain_id));
    let account = signer.address();
    info!("Running as {:?}", account);

    let wallet = EthereumWallet::from(signer);
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(config.rpc_url.parse()?);

    let client = AaveClient::connect(provider, account, &config).await?;
    println!("{} LendingPool: {:?}", style("✓").green(), client.pool());
    println!();

    let report = workflow::run(&client, &config).await?;

    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").green()
    );
    println!("{}", style(" ✅ WORKFLOW COMPLETE").green().bold());
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").green()
    );
    println!();
    println!("Summary:");
    println!("  • Wrapped:    {} WETH", format_ether(report.wrapped));
    println!("  • Deposited:  {} WETH", format_ether(report.deposited));
    println!("  • Borrowed:   {} DAI", format_ether(report.borrowed));
    println!("  • Repaid:     {} DAI", format_ether(report.repaid));
    println!(
        "  • Final debt: {} ETH (interest accrued between borrow and repay)",
        format_ether(report.after.total_debt_eth)
    );
    println!();

    if config.run_log {
        RunLog::from_report(&report).append_to_file(&config.run_log_path)?;
        println!(
            "{} Run logged to: {}",
            style("📝").cyan(),
            config.run_log_path
        );
    }

    Ok(())
}
