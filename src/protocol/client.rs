//! Lending protocol client
//!
//! The workflow only talks to [`LendingProtocol`], so the orchestration
//! in `workflow.rs` is testable against a mock. [`AaveClient`] is the
//! live implementation over an alloy HTTP provider with a wallet
//! filler: reads go through `eth_call`, writes are signed, submitted
//! and awaited for one confirmation. Nothing is retried; a revert or
//! transport fault ends the run.

use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::SolCall;
use eyre::{eyre, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::protocol::contracts::{
    IAggregatorV3, IErc20, ILendingPool, ILendingPoolAddressesProvider, IWeth, REFERRAL_CODE,
    STABLE_RATE_MODE,
};

/// Snapshot of `getUserAccountData`, all values ETH-denominated wei.
/// Stale as soon as any state-changing call lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountData {
    pub total_collateral_eth: U256,
    pub total_debt_eth: U256,
    pub available_borrows_eth: U256,
}

/// Capability seam over the lending protocol.
///
/// One method per remote operation the workflow performs. Write
/// methods return only after one confirmation.
#[allow(async_fn_in_trait)]
pub trait LendingProtocol {
    /// The account signing every call
    fn account(&self) -> Address;

    /// The resolved LendingPool address (the allowance spender)
    fn pool(&self) -> Address;

    /// Wrap native currency into WETH, return the resulting WETH balance
    async fn wrap(&self, amount: U256) -> Result<U256>;

    /// Grant `spender` an allowance of `amount` over `token`
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<()>;

    /// Deposit `amount` of `asset` as collateral
    async fn deposit(&self, asset: Address, amount: U256) -> Result<()>;

    /// Borrow `amount` of `asset` at the stable rate
    async fn borrow(&self, asset: Address, amount: U256) -> Result<()>;

    /// Repay `amount` of `asset` debt
    async fn repay(&self, asset: Address, amount: U256) -> Result<()>;

    /// Read the account's aggregate collateral/debt/borrowing power
    async fn account_data(&self) -> Result<AccountData>;

    /// Read the latest DAI/ETH quote (ETH per DAI, 18 decimals)
    async fn price(&self) -> Result<U256>;
}

/// Live Aave V2 client
pub struct AaveClient<P> {
    provider: P,
    account: Address,
    pool: Address,
    weth: Address,
    feed: Address,
}

impl<P: Provider> AaveClient<P> {
    /// Connect to the protocol: parse the configured addresses and
    /// resolve the live LendingPool from the registry. The pool is
    /// re-resolved on every run, never cached across runs.
    pub async fn connect(provider: P, account: Address, config: &Config) -> Result<Self> {
        let registry = config.registry()?;
        let weth = config.weth()?;
        let feed = config.price_feed()?;

        let data = ILendingPoolAddressesProvider::getLendingPoolCall {}.abi_encode();
        let tx = TransactionRequest::default().to(registry).input(data.into());
        let raw = provider
            .call(tx)
            .await
            .map_err(|e| eyre!("Registry lookup failed: {}", e))?;
        let pool = ILendingPoolAddressesProvider::getLendingPoolCall::abi_decode_returns(&raw)
            .map_err(|e| eyre!("Failed to decode getLendingPool result: {}", e))?;

        info!("Resolved LendingPool: {:?}", pool);

        Ok(Self {
            provider,
            account,
            pool,
            weth,
            feed,
        })
    }

    /// `eth_call` a view function
    async fn read(&self, to: Address, calldata: Vec<u8>) -> Result<Bytes> {
        let tx = TransactionRequest::default().to(to).input(calldata.into());
        self.provider
            .call(tx)
            .await
            .map_err(|e| eyre!("Read call to {:?} failed: {}", to, e))
    }

    /// Submit a state-changing transaction and wait for one confirmation
    async fn send(&self, tx: TransactionRequest, label: &str) -> Result<()> {
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| eyre!("{} submission failed: {}", label, e))?
            .with_required_confirmations(1)
            .get_receipt()
            .await
            .map_err(|e| eyre!("{} confirmation failed: {}", label, e))?;

        if !receipt.status() {
            return Err(eyre!("{} reverted (tx {:?})", label, receipt.transaction_hash));
        }

        debug!(
            "{} confirmed in block {:?} (tx {:?})",
            label, receipt.block_number, receipt.transaction_hash
        );

        Ok(())
    }
}

impl<P: Provider> LendingProtocol for AaveClient<P> {
    fn account(&self) -> Address {
        self.account
    }

    fn pool(&self) -> Address {
        self.pool
    }

    async fn wrap(&self, amount: U256) -> Result<U256> {
        let calldata = IWeth::depositCall {}.abi_encode();
        let tx = TransactionRequest::default()
            .from(self.account)
            .to(self.weth)
            .value(amount)
            .input(calldata.into());
        self.send(tx, "WETH deposit").await?;

        let raw = self
            .read(self.weth, IWeth::balanceOfCall { owner: self.account }.abi_encode())
            .await?;
        let balance = IWeth::balanceOfCall::abi_decode_returns(&raw)
            .map_err(|e| eyre!("Failed to decode balanceOf result: {}", e))?;

        Ok(balance)
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<()> {
        let calldata = IErc20::approveCall { spender, amount }.abi_encode();
        let tx = TransactionRequest::default()
            .from(self.account)
            .to(token)
            .input(calldata.into());
        self.send(tx, "ERC-20 approve").await
    }

    async fn deposit(&self, asset: Address, amount: U256) -> Result<()> {
        let calldata = ILendingPool::depositCall {
            asset,
            amount,
            onBehalfOf: self.account,
            referralCode: REFERRAL_CODE,
        }
        .abi_encode();
        let tx = TransactionRequest::default()
            .from(self.account)
            .to(self.pool)
            .input(calldata.into());
        self.send(tx, "Pool deposit").await
    }

    async fn borrow(&self, asset: Address, amount: U256) -> Result<()> {
        let calldata = ILendingPool::borrowCall {
            asset,
            amount,
            interestRateMode: STABLE_RATE_MODE,
            referralCode: REFERRAL_CODE,
            onBehalfOf: self.account,
        }
        .abi_encode();
        let tx = TransactionRequest::default()
            .from(self.account)
            .to(self.pool)
            .input(calldata.into());
        self.send(tx, "Pool borrow").await
    }

    async fn repay(&self, asset: Address, amount: U256) -> Result<()> {
        let calldata = ILendingPool::repayCall {
            asset,
            amount,
            rateMode: STABLE_RATE_MODE,
            onBehalfOf: self.account,
        }
        .abi_encode();
        let tx = TransactionRequest::default()
            .from(self.account)
            .to(self.pool)
            .input(calldata.into());
        self.send(tx, "Pool repay").await
    }

    async fn account_data(&self) -> Result<AccountData> {
        let raw = self
            .read(
                self.pool,
                ILendingPool::getUserAccountDataCall { user: self.account }.abi_encode(),
            )
            .await?;
        let ret = ILendingPool::getUserAccountDataCall::abi_decode_returns(&raw)
            .map_err(|e| eyre!("Failed to decode getUserAccountData result: {}", e))?;

        Ok(AccountData {
            total_collateral_eth: ret.totalCollateralETH,
            total_debt_eth: ret.totalDebtETH,
            available_borrows_eth: ret.availableBorrowsETH,
        })
    }

    async fn price(&self) -> Result<U256> {
        let raw = self
            .read(self.feed, IAggregatorV3::latestRoundDataCall {}.abi_encode())
            .await?;
        let ret = IAggregatorV3::latestRoundDataCall::abi_decode_returns(&raw)
            .map_err(|e| eyre!("Failed to decode latestRoundData result: {}", e))?;

        // Chainlink answers are int256; anything non-positive is garbage
        if ret.answer.is_negative() || ret.answer.is_zero() {
            return Err(eyre!("Price feed returned non-positive answer: {}", ret.answer));
        }

        Ok(ret.answer.into_raw())
    }
}
