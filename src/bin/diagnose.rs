//! Diagnostic tool - Check configuration before running
//!
//! Run with: cargo run --bin diagnose
//!
//! Read-only: prints each setting and where it came from, no network
//! calls.

use std::env;

fn main() {
    println!("🔍 LENDCYCLE DIAGNOSTIC CHECK\n");

    // Load .env
    dotenvy::dotenv().ok();

    println!("═══════════════════════════════════════════════════");
    println!("                  CONFIGURATION                     ");
    println!("═══════════════════════════════════════════════════\n");

    let checks = [
        ("CHAIN_ID", "1", "Target chain (1 = mainnet / fork)"),
        ("DEPOSIT_AMOUNT_ETH", "0.1", "ETH wrapped and deposited"),
        (
            "WETH_ADDRESS",
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            "Wrapped Ether token",
        ),
        (
            "DAI_ADDRESS",
            "0x6B175474E89094C44Da98b954EedeAC495271d0F",
            "Borrowed asset",
        ),
        (
            "ADDRESSES_PROVIDER",
            "0xB53C1a33016B2DC2fF3653530bfF1848a515c8c5",
            "Aave V2 registry",
        ),
        (
            "DAI_ETH_FEED",
            "0x773616E4d11A78F511299002da57A0a94577F1f4",
            "Chainlink DAI/ETH aggregator",
        ),
        ("RUN_LOG", "true", "Append run records?"),
    ];

    for (key, default, desc) in checks {
        let value = env::var(key).unwrap_or_else(|_| default.to_string());
        let marker = if env::var(key).is_err() { "(default)" } else { "(from .env)" };
        println!("  {}: {} {}", key, value, marker);
        println!("    └─ {}\n", desc);
    }

    // RPC check
    let rpc = env::var("RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".to_string());
    let rpc_display = if rpc.len() > 50 {
        format!("{}...{}", &rpc[..30], &rpc[rpc.len() - 15..])
    } else {
        rpc.clone()
    };
    println!("  RPC_URL: {}", rpc_display);

    let has_key = env::var("PRIVATE_KEY").is_ok();

    println!("\n═══════════════════════════════════════════════════");
    println!("                     READINESS                      ");
    println!("═══════════════════════════════════════════════════\n");

    println!("  PRIVATE_KEY: {}", if has_key { "✅ Set" } else { "❌ Not set" });

    if !has_key {
        println!("\n  ⚠️  The workflow signs every transaction and will abort");
        println!("     at startup without PRIVATE_KEY. On an anvil/hardhat");
        println!("     fork, use one of the funded dev account keys.");
    } else {
        println!("\n  The run wraps ETH, deposits it, borrows DAI and repays.");
        println!("  Nothing is rolled back on failure - a run that dies after");
        println!("  the deposit leaves the deposit on-chain.");
    }

    println!("\n✅ Diagnostic complete!\n");
}
