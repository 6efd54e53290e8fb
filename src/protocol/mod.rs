//! Aave V2 protocol surface: contract interfaces and the client
//! implementing the workflow's capability seam.

mod client;
mod contracts;

pub use client::{AaveClient, AccountData, LendingProtocol};
pub use contracts::{
    IAggregatorV3, IErc20, ILendingPool, ILendingPoolAddressesProvider, IWeth,
    ADDRESSES_PROVIDER, DAI, DAI_ETH_FEED, REFERRAL_CODE, STABLE_RATE_MODE, WETH,
};
