//! Solidity interfaces and mainnet addresses for the Aave V2 workflow
//!
//! Only the entry points the workflow touches are declared. The full
//! protocol ABI is much larger; everything else is out of scope.

use alloy_primitives::{address, Address, U256};
use alloy_sol_types::sol;

// ============================================
// CONTRACT ADDRESSES (Ethereum Mainnet)
// ============================================

/// Wrapped Ether
pub const WETH: Address = address!("C02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

/// DAI stablecoin
pub const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

/// Aave V2 LendingPoolAddressesProvider - the registry that resolves
/// the live LendingPool (the pool itself is upgradeable, this is not)
pub const ADDRESSES_PROVIDER: Address = address!("B53C1a33016B2DC2fF3653530bfF1848a515c8c5");

/// Chainlink DAI/ETH aggregator (answer = ETH per 1 DAI, 18 decimals)
pub const DAI_ETH_FEED: Address = address!("773616E4d11A78F511299002da57A0a94577F1f4");

// ============================================
// PROTOCOL PARAMETERS
// ============================================

/// Aave interest rate mode: 1 = stable, 2 = variable
pub const STABLE_RATE_MODE: U256 = U256::from_limbs([1, 0, 0, 0]);

/// Aave referral program code (0 = no referral)
pub const REFERRAL_CODE: u16 = 0;

// ============================================
// SOLIDITY INTERFACES
// ============================================

sol! {
    /// WETH9 - canonical wrapped ether
    interface IWeth {
        function deposit() external payable;
        function balanceOf(address owner) external view returns (uint256);
    }

    /// Minimal ERC-20 surface (allowance grants only)
    interface IErc20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Aave V2 registry
    interface ILendingPoolAddressesProvider {
        function getLendingPool() external view returns (address);
    }

    /// Aave V2 LendingPool
    interface ILendingPool {
        function deposit(
            address asset,
            uint256 amount,
            address onBehalfOf,
            uint16 referralCode
        ) external;

        function borrow(
            address asset,
            uint256 amount,
            uint256 interestRateMode,
            uint16 referralCode,
            address onBehalfOf
        ) external;

        function repay(
            address asset,
            uint256 amount,
            uint256 rateMode,
            address onBehalfOf
        ) external returns (uint256);

        function getUserAccountData(address user)
            external
            view
            returns (
                uint256 totalCollateralETH,
                uint256 totalDebtETH,
                uint256 availableBorrowsETH,
                uint256 currentLiquidationThreshold,
                uint256 ltv,
                uint256 healthFactor
            );
    }

    /// Chainlink aggregator
    interface IAggregatorV3 {
        function latestRoundData()
            external
            view
            returns (
                uint80 roundId,
                int256 answer,
                uint256 startedAt,
                uint256 updatedAt,
                uint80 answeredInRound
            );
    }
}
