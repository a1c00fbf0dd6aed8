//! Valuation rules for individual holdings.
//!
//! These functions are pure: they work on data already fetched for one level
//! of holdings. Fund positions additionally need the value of the target fund,
//! which the valuation service resolves recursively.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::constants::{PERCENT_FRACTION_LIMIT, PERCENT_SCALE};
use crate::errors::{Error, Result};
use crate::investments::Investment;
use crate::transactions::{sum_by_type, Transaction, TransactionType};

/// Latest known price per ISIN. Absent keys and `None` values both mean "no price".
pub type PriceMap = HashMap<String, Option<Decimal>>;

/// Shares held multiplied by the latest price.
///
/// Zero when the stock has no ISIN or no price is known, whatever the share
/// count. A negative share count with a known price gives a negative value.
pub fn stock_value(
    investment: &Investment,
    transactions: &[Transaction],
    prices: &PriceMap,
) -> Result<Decimal> {
    let Some(isin) = investment.security_id() else {
        return Ok(Decimal::ZERO);
    };

    let shares = sum_by_type(transactions, TransactionType::Shares)?;
    if shares.is_zero() {
        return Ok(Decimal::ZERO);
    }

    match prices.get(isin).copied().flatten() {
        Some(price) => shares.checked_mul(price).ok_or_else(|| {
            Error::Overflow(format!(
                "{} shares of {} at price {}",
                shares, investment.id, price
            ))
        }),
        None => Ok(Decimal::ZERO),
    }
}

/// Land value plus building value.
pub fn real_estate_value(transactions: &[Transaction]) -> Result<Decimal> {
    let estate = sum_by_type(transactions, TransactionType::Estate)?;
    let building = sum_by_type(transactions, TransactionType::Building)?;
    estate
        .checked_add(building)
        .ok_or_else(|| Error::Overflow(format!("estate {} plus building {}", estate, building)))
}

/// Fraction of the target fund held by a fund position, `None` when the
/// recorded percentages sum to zero.
pub fn fund_stake(transactions: &[Transaction]) -> Result<Option<Decimal>> {
    let raw = sum_by_type(transactions, TransactionType::Percentage)?;
    if raw.is_zero() {
        Ok(None)
    } else {
        Ok(Some(normalize_percent(raw)))
    }
}

/// Magnitudes above 1 are percentages (20 -> 0.2); anything else is already a
/// fraction. Applies to both signs.
pub fn normalize_percent(raw: Decimal) -> Decimal {
    if raw.abs() > PERCENT_FRACTION_LIMIT {
        raw / PERCENT_SCALE
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(investment_id: &str, transaction_type: TransactionType, value: Decimal) -> Transaction {
        Transaction::new(
            investment_id,
            NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
            transaction_type,
            value,
        )
    }

    fn prices(entries: &[(&str, Option<Decimal>)]) -> PriceMap {
        entries
            .iter()
            .map(|(isin, price)| (isin.to_string(), *price))
            .collect()
    }

    #[test]
    fn test_stock_value_multiplies_share_sum_by_price() {
        let stock = Investment::stock("S1", Some("US123"));
        let transactions = vec![
            tx("S1", TransactionType::Shares, dec!(10)),
            tx("S1", TransactionType::Shares, dec!(5)),
        ];

        let value = stock_value(&stock, &transactions, &prices(&[("US123", Some(dec!(100)))]));
        assert_eq!(value.unwrap(), dec!(1500));
    }

    #[test]
    fn test_stock_value_without_price_is_zero() {
        let stock = Investment::stock("S1", Some("US123"));
        let transactions = vec![tx("S1", TransactionType::Shares, dec!(10))];

        assert_eq!(
            stock_value(&stock, &transactions, &prices(&[])).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            stock_value(&stock, &transactions, &prices(&[("US123", None)])).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_stock_value_without_isin_is_zero() {
        let stock = Investment::stock("S1", None);
        let transactions = vec![tx("S1", TransactionType::Shares, dec!(10))];

        assert_eq!(
            stock_value(&stock, &transactions, &prices(&[("US123", Some(dec!(100)))])).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_stock_value_negative_shares() {
        let stock = Investment::stock("S1", Some("US123"));
        let transactions = vec![
            tx("S1", TransactionType::Shares, dec!(10)),
            tx("S1", TransactionType::Shares, dec!(-15)),
        ];

        let value = stock_value(&stock, &transactions, &prices(&[("US123", Some(dec!(20)))]));
        assert_eq!(value.unwrap(), dec!(-100));
    }

    #[test]
    fn test_stock_value_overflow_is_an_error() {
        let stock = Investment::stock("S1", Some("US123"));
        let transactions = vec![tx("S1", TransactionType::Shares, Decimal::MAX)];

        let err = stock_value(&stock, &transactions, &prices(&[("US123", Some(dec!(2)))]))
            .unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
    }

    #[test]
    fn test_real_estate_value_adds_estate_and_building() {
        let transactions = vec![
            tx("R1", TransactionType::Estate, dec!(200000)),
            tx("R1", TransactionType::Building, dec!(50000)),
            tx("R1", TransactionType::Building, dec!(-5000)),
            tx("R1", TransactionType::Shares, dec!(7)),
        ];

        assert_eq!(real_estate_value(&transactions).unwrap(), dec!(245000));
    }

    #[test]
    fn test_real_estate_value_overflow_is_an_error() {
        let transactions = vec![
            tx("R1", TransactionType::Estate, Decimal::MAX),
            tx("R1", TransactionType::Building, Decimal::MAX),
        ];

        assert!(matches!(
            real_estate_value(&transactions),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_normalize_percent() {
        assert_eq!(normalize_percent(dec!(20)), dec!(0.2));
        assert_eq!(normalize_percent(dec!(0.20)), dec!(0.2));
        assert_eq!(normalize_percent(dec!(-20)), dec!(-0.2));
        assert_eq!(normalize_percent(dec!(-0.5)), dec!(-0.5));
        // 1 is a whole fund, not one percent
        assert_eq!(normalize_percent(dec!(1)), dec!(1));
        assert_eq!(normalize_percent(dec!(1.01)), dec!(0.0101));
    }

    #[test]
    fn test_fund_stake_zero_sum_is_none() {
        assert_eq!(fund_stake(&[]).unwrap(), None);

        let cancelled = vec![
            tx("FP1", TransactionType::Percentage, dec!(30)),
            tx("FP1", TransactionType::Percentage, dec!(-30)),
        ];
        assert_eq!(fund_stake(&cancelled).unwrap(), None);

        let stake = vec![tx("FP1", TransactionType::Percentage, dec!(50))];
        assert_eq!(fund_stake(&stake).unwrap(), Some(dec!(0.5)));
    }
}
