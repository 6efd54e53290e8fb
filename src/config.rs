//! Runtime configuration for the lendcycle workflow
//!
//! Everything is env-var driven with Ethereum mainnet defaults, so the
//! binary runs unmodified against a mainnet fork. Only PRIVATE_KEY has
//! no default.

use alloy_primitives::{
    utils::{format_ether, parse_ether},
    Address, U256,
};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // ========== Network Settings ==========
    /// RPC URL (a mainnet fork like anvil/hardhat works fine)
    pub rpc_url: String,

    /// Chain ID bound to the signer (1 = Ethereum Mainnet, forks keep it)
    pub chain_id: u64,

    // ========== Wallet Settings ==========
    /// Private key of the account running the workflow (KEEP SECRET!)
    pub private_key: Option<String>,

    // ========== Workflow Settings ==========
    /// Amount of ETH to wrap and deposit as collateral, in ether units
    pub deposit_amount_eth: String,

    // ========== Contract Addresses ==========
    /// WETH token
    pub weth_address: String,

    /// DAI token (the borrowed asset)
    pub dai_address: String,

    /// Aave V2 LendingPoolAddressesProvider registry
    pub addresses_provider: String,

    /// Chainlink DAI/ETH price feed
    pub dai_eth_feed: String,

    // ========== Run Log ==========
    /// Enable/disable the per-run JSONL log
    pub run_log: bool,

    /// Path to append completed-run records to
    pub run_log_path: String,
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            rpc_url: env::var("RPC_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8545".to_string()),
            chain_id: env::var("CHAIN_ID")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            private_key: env::var("PRIVATE_KEY").ok(),
            deposit_amount_eth: env::var("DEPOSIT_AMOUNT_ETH")
                .unwrap_or_else(|_| "0.1".to_string()),
            weth_address: env::var("WETH_ADDRESS")
                .unwrap_or_else(|_| crate::protocol::WETH.to_string()),
            dai_address: env::var("DAI_ADDRESS")
                .unwrap_or_else(|_| crate::protocol::DAI.to_string()),
            addresses_provider: env::var("ADDRESSES_PROVIDER")
                .unwrap_or_else(|_| crate::protocol::ADDRESSES_PROVIDER.to_string()),
            dai_eth_feed: env::var("DAI_ETH_FEED")
                .unwrap_or_else(|_| crate::protocol::DAI_ETH_FEED.to_string()),
            run_log: env::var("RUN_LOG")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            run_log_path: env::var("RUN_LOG_PATH")
                .unwrap_or_else(|_| "./logs/runs.log".to_string()),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration before running
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.is_empty() || self.rpc_url.contains("YOUR_API_KEY") {
            return Err(eyre!("Invalid RPC_URL - point it at a node or mainnet fork"));
        }

        let key = self
            .private_key
            .as_deref()
            .ok_or_else(|| eyre!("PRIVATE_KEY is required"))?;
        if key.trim_start_matches("0x").len() != 64 {
            return Err(eyre!("PRIVATE_KEY must be 32 bytes of hex"));
        }

        let amount = self.deposit_amount_wei()?;
        if amount.is_zero() {
            return Err(eyre!(
                "DEPOSIT_AMOUNT_ETH must be positive (currently {})",
                self.deposit_amount_eth
            ));
        }

        // Fail fast on malformed addresses instead of mid-workflow
        self.weth()?;
        self.dai()?;
        self.registry()?;
        self.price_feed()?;

        Ok(())
    }

    /// Deposit amount in wei
    pub fn deposit_amount_wei(&self) -> Result<U256> {
        parse_ether(&self.deposit_amount_eth).map_err(|e| {
            eyre!(
                "Invalid DEPOSIT_AMOUNT_ETH '{}': {}",
                self.deposit_amount_eth,
                e
            )
        })
    }

    pub fn weth(&self) -> Result<Address> {
        parse_address("WETH_ADDRESS", &self.weth_address)
    }

    pub fn dai(&self) -> Result<Address> {
        parse_address("DAI_ADDRESS", &self.dai_address)
    }

    pub fn registry(&self) -> Result<Address> {
        parse_address("ADDRESSES_PROVIDER", &self.addresses_provider)
    }

    pub fn price_feed(&self) -> Result<Address> {
        parse_address("DAI_ETH_FEED", &self.dai_eth_feed)
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║               LENDCYCLE - CONFIGURATION                    ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ Chain ID:          {:^40} ║", self.chain_id);
        println!(
            "║ Deposit Amount:    {:^40} ║",
            format!("{} ETH", self.deposit_amount_eth)
        );
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ CONTRACTS                                                  ║");
        println!("║ WETH:         {} ║", self.weth_address);
        println!("║ DAI:          {} ║", self.dai_address);
        println!("║ Registry:     {} ║", self.addresses_provider);
        println!("║ DAI/ETH Feed: {} ║", self.dai_eth_feed);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!(
            "║ Private Key:       {:^40} ║",
            if self.private_key.is_some() { "✓ Configured" } else { "✗ Not Set" }
        );
        println!(
            "║ Run Log:           {:^40} ║",
            if self.run_log { "✓ Enabled" } else { "✗ Disabled" }
        );
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: 1,
            private_key: None,
            deposit_amount_eth: "0.1".to_string(),
            weth_address: crate::protocol::WETH.to_string(),
            dai_address: crate::protocol::DAI.to_string(),
            addresses_provider: crate::protocol::ADDRESSES_PROVIDER.to_string(),
            dai_eth_feed: crate::protocol::DAI_ETH_FEED.to_string(),
            run_log: true,
            run_log_path: "./logs/runs.log".to_string(),
        }
    }
}

fn parse_address(key: &str, value: &str) -> Result<Address> {
    Address::from_str(value).map_err(|e| eyre!("Invalid {} '{}': {}", key, value, e))
}

// ============================================
// RUN LOG
// ============================================

use chrono::{DateTime, Utc};
use std::io::Write;

/// Record of one completed workflow run, appended as a JSON line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLog {
    pub timestamp: DateTime<Utc>,
    pub account: String,
    pub pool: String,
    pub wrapped_eth: String,
    pub borrowed_dai: String,
    pub repaid_dai: String,
    pub final_collateral_eth: String,
    pub final_debt_eth: String,
}

impl RunLog {
    pub fn from_report(report: &crate::workflow::RunReport) -> Self {
        Self {
            timestamp: Utc::now(),
            account: format!("{:?}", report.account),
            pool: format!("{:?}", report.pool),
            wrapped_eth: format_ether(report.wrapped),
            borrowed_dai: format_ether(report.borrowed),
            repaid_dai: format_ether(report.repaid),
            final_collateral_eth: format_ether(report.after.total_collateral_eth),
            final_debt_eth: format_ether(report.after.total_debt_eth),
        }
    }

    /// Append this record to a file
    pub fn append_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;

        let json = serde_json::to_string(self)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chain_id, 1);
        assert_eq!(config.deposit_amount_eth, "0.1");
        assert!(config.private_key.is_none());
    }

    #[test]
    fn test_address_accessors() {
        let config = Config::default();
        assert_eq!(config.weth().unwrap(), crate::protocol::WETH);
        assert_eq!(config.dai().unwrap(), crate::protocol::DAI);
        assert_eq!(config.registry().unwrap(), crate::protocol::ADDRESSES_PROVIDER);
        assert_eq!(config.price_feed().unwrap(), crate::protocol::DAI_ETH_FEED);
    }

    #[test]
    fn test_deposit_amount_wei() {
        let config = Config::default();
        let wei = config.deposit_amount_wei().unwrap();
        assert_eq!(wei, parse_ether("0.1").unwrap());
    }

    #[test]
    fn test_validate_requires_private_key() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_key() {
        let config = Config {
            private_key: Some("0xdeadbeef".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let config = Config {
            private_key: Some(
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            ),
            deposit_amount_eth: "0".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let config = Config {
            private_key: Some(
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            ),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
