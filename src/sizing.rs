//! Borrow sizing - the only local arithmetic in the workflow
//!
//! The pool reports borrowing power in ETH; the Chainlink DAI/ETH feed
//! quotes ETH per DAI with 18 decimals. Converting to DAI therefore
//! divides by the quote. A fixed 95% margin keeps the request below the
//! protocol's maximum-borrow cap.

use alloy_primitives::U256;
use eyre::{eyre, Result};

/// 1e18, the fixed-point scale shared by ETH amounts and the feed
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Fraction of borrowing power to actually request, in basis points
pub const SAFETY_MARGIN_BPS: u64 = 9_500;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Compute the DAI amount (in wei) to borrow given `available_eth`
/// borrowing power (ETH wei) and the feed's ETH-per-DAI `price`
/// (18 decimals).
///
/// Exactly `available * 0.95 / price` in floor division; zero
/// borrowing power yields zero, a zero price is an error.
pub fn borrow_amount(available_eth: U256, price: U256) -> Result<U256> {
    if price.is_zero() {
        return Err(eyre!("Price must be positive"));
    }

    let numerator = available_eth
        .checked_mul(U256::from(SAFETY_MARGIN_BPS))
        .and_then(|v| v.checked_mul(WAD))
        .ok_or_else(|| eyre!("Borrow sizing overflow: available={}", available_eth))?;
    let denominator = U256::from(BPS_DENOMINATOR)
        .checked_mul(price)
        .ok_or_else(|| eyre!("Borrow sizing overflow: price={}", price))?;

    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::utils::parse_ether;

    #[test]
    fn test_known_conversion() {
        // 1 ETH of borrowing power at 0.0005 ETH/DAI -> 1900 DAI
        let available = parse_ether("1").unwrap();
        let price = parse_ether("0.0005").unwrap();
        let amount = borrow_amount(available, price).unwrap();
        assert_eq!(amount, parse_ether("1900").unwrap());
    }

    #[test]
    fn test_exact_formula() {
        let available = U256::from(123_456_789_000_000_000u64); // ~0.123 ETH
        let price = U256::from(300_000_000_000_000u64); // 0.0003 ETH/DAI
        let amount = borrow_amount(available, price).unwrap();

        let expected = available * U256::from(9_500) * WAD / (U256::from(10_000) * price);
        assert_eq!(amount, expected);
    }

    #[test]
    fn test_always_below_unmargined_cap() {
        let availables = [
            U256::from(1u64),
            U256::from(1_000u64),
            parse_ether("0.1").unwrap(),
            parse_ether("1").unwrap(),
            parse_ether("1000000").unwrap(),
        ];
        let prices = [
            U256::from(1u64),
            U256::from(500_000_000_000_000u64),
            parse_ether("0.003").unwrap(),
            WAD,
        ];

        for available in availables {
            for price in prices {
                let amount = borrow_amount(available, price).unwrap();
                let cap = available * WAD / price;
                if cap.is_zero() {
                    assert!(amount.is_zero());
                } else {
                    assert!(
                        amount < cap,
                        "amount {} not below cap {} (available={}, price={})",
                        amount,
                        cap,
                        available,
                        price
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_available_yields_zero() {
        let amount = borrow_amount(U256::ZERO, parse_ether("0.0005").unwrap()).unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn test_zero_price_is_error() {
        assert!(borrow_amount(parse_ether("1").unwrap(), U256::ZERO).is_err());
    }

    #[test]
    fn test_overflow_is_error() {
        assert!(borrow_amount(U256::MAX, U256::from(1u64)).is_err());
    }
}
