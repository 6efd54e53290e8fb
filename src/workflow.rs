//! The wrap → deposit → borrow → repay sequence
//!
//! Strictly serial: every step awaits its network round trip (and one
//! confirmation for writes) before the next begins. Nothing is rolled
//! back on failure - a revert after the deposit leaves the deposit
//! on-chain and ends the run.

use alloy_primitives::{utils::format_ether, Address, U256};
use console::style;
use eyre::Result;
use tracing::info;

use crate::config::Config;
use crate::protocol::{AccountData, LendingProtocol};
use crate::sizing;

/// Everything a completed run produced, for the final summary and the
/// run log
#[derive(Debug, Clone)]
pub struct RunReport {
    pub account: Address,
    pub pool: Address,
    pub wrapped: U256,
    pub deposited: U256,
    pub borrowed: U256,
    pub repaid: U256,
    pub price: U256,
    pub before: AccountData,
    pub after: AccountData,
}

fn print_account_data(data: &AccountData) {
    println!(
        "   Collateral: {} ETH | Debt: {} ETH | Available: {} ETH",
        format_ether(data.total_collateral_eth),
        format_ether(data.total_debt_eth),
        format_ether(data.available_borrows_eth),
    );
}

/// Run the full workflow against any [`LendingProtocol`] implementation
pub async fn run<C: LendingProtocol>(client: &C, config: &Config) -> Result<RunReport> {
    let weth = config.weth()?;
    let dai = config.dai()?;
    let pool = client.pool();
    let amount = config.deposit_amount_wei()?;

    // Step 1: wrap ETH into WETH
    println!("{}", style("Step 1: Wrapping ETH...").blue());
    let wrapped = client.wrap(amount).await?;
    println!(
        "{} Got {} WETH",
        style("✓").green(),
        format_ether(wrapped)
    );

    // Step 2: approve the pool, then deposit the wrapped balance
    println!("{}", style("Step 2: Depositing WETH as collateral...").blue());
    client.approve(weth, pool, amount).await?;
    info!("Approved pool {:?} for {} WETH", pool, format_ether(amount));
    client.deposit(weth, amount).await?;
    println!("{} Deposited {} WETH", style("✓").green(), format_ether(amount));

    // Step 3: account state after depositing
    println!("{}", style("Step 3: Querying account data...").blue());
    let before = client.account_data().await?;
    print_account_data(&before);

    // Step 4: size the borrow from the DAI/ETH quote
    println!("{}", style("Step 4: Sizing the borrow...").blue());
    let price = client.price().await?;
    println!("   DAI/ETH price: {} ETH", format_ether(price));
    let borrow = sizing::borrow_amount(before.available_borrows_eth, price)?;
    println!(
        "{} Will borrow {} DAI (95% of capacity)",
        style("✓").green(),
        format_ether(borrow)
    );

    // Step 5: borrow
    println!("{}", style("Step 5: Borrowing DAI...").blue());
    client.borrow(dai, borrow).await?;
    println!("{} Borrowed {} DAI", style("✓").green(), format_ether(borrow));

    let mid = client.account_data().await?;
    print_account_data(&mid);

    // Step 6: approve again, repay the same amount
    println!("{}", style("Step 6: Repaying DAI...").blue());
    client.approve(dai, pool, borrow).await?;
    info!("Approved pool {:?} for {} DAI", pool, format_ether(borrow));
    client.repay(dai, borrow).await?;
    println!("{} Repaid {} DAI", style("✓").green(), format_ether(borrow));

    // Step 7: final account state (debt won't be exactly zero - a few
    // blocks of interest accrued between borrow and repay)
    println!("{}", style("Step 7: Querying final account data...").blue());
    let after = client.account_data().await?;
    print_account_data(&after);

    Ok(RunReport {
        account: client.account(),
        pool,
        wrapped,
        deposited: amount,
        borrowed: borrow,
        repaid: borrow,
        price,
        before,
        after,
    })
}

// ============================================
// TESTS
// ============================================
