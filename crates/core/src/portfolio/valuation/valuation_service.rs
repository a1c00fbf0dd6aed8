use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use super::valuation_calculator::{fund_stake, real_estate_value, stock_value, PriceMap};
use super::{PortfolioValuation, PortfolioValuationServiceTrait, TypeComposition};
use crate::errors::{Error, Result};
use crate::investments::{Investment, InvestmentClass, InvestmentRepositoryTrait};
use crate::ownership::{OwnerType, OwnershipRepositoryTrait};
use crate::quotes::QuoteRepositoryTrait;
use crate::transactions::{Transaction, TransactionRepositoryTrait};

/// Everything needed to value the direct holdings of one owner.
///
/// Loaded with one bulk call per repository, so the number of repository
/// round-trips grows with the depth of fund nesting, not with the number of
/// holdings.
#[derive(Default)]
struct HoldingsLevel {
    holding_ids: Vec<String>,
    investments: HashMap<String, Investment>,
    transactions: HashMap<String, Vec<Transaction>>,
    prices: PriceMap,
}

impl HoldingsLevel {
    fn transactions_for(&self, investment_id: &str) -> &[Transaction] {
        self.transactions
            .get(investment_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Values investor portfolios, resolving fund positions through the holdings
/// of the funds they point to.
#[derive(Clone)]
pub struct PortfolioValuationService {
    ownership_repository: Arc<dyn OwnershipRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    quote_repository: Arc<dyn QuoteRepositoryTrait>,
}

impl PortfolioValuationService {
    pub fn new(
        ownership_repository: Arc<dyn OwnershipRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        quote_repository: Arc<dyn QuoteRepositoryTrait>,
    ) -> Self {
        Self {
            ownership_repository,
            investment_repository,
            transaction_repository,
            quote_repository,
        }
    }

    async fn load_level(
        &self,
        owner_type: OwnerType,
        owner_id: &str,
        reference_date: NaiveDate,
    ) -> Result<HoldingsLevel> {
        let holding_ids = self
            .ownership_repository
            .get_owned_investment_ids(owner_type, owner_id)
            .await?;
        if holding_ids.is_empty() {
            return Ok(HoldingsLevel::default());
        }

        let investments = self.investment_repository.get_by_ids(&holding_ids).await?;
        let transactions = self
            .transaction_repository
            .get_up_to_date_by_investment_ids(&holding_ids, reference_date)
            .await?;

        let mut seen = HashSet::new();
        let isins: Vec<String> = holding_ids
            .iter()
            .filter_map(|id| investments.get(id))
            .filter_map(Investment::security_id)
            .filter(|isin| seen.insert(*isin))
            .map(str::to_string)
            .collect();

        let prices = if isins.is_empty() {
            PriceMap::new()
        } else {
            self.quote_repository
                .get_latest_prices(&isins, reference_date)
                .await?
        };

        Ok(HoldingsLevel {
            holding_ids,
            investments,
            transactions,
            prices,
        })
    }

    async fn investment_value(
        &self,
        investment: &Investment,
        level: &HoldingsLevel,
        reference_date: NaiveDate,
        fund_guard: &mut HashSet<String>,
    ) -> Result<Decimal> {
        let transactions = level.transactions_for(&investment.id);

        match &investment.class {
            InvestmentClass::Stock { .. } => stock_value(investment, transactions, &level.prices),
            InvestmentClass::RealEstate { .. } => real_estate_value(transactions),
            InvestmentClass::Fund { .. } => {
                self.fund_position_value(investment, transactions, reference_date, fund_guard)
                    .await
            }
            InvestmentClass::Unknown { .. } => Ok(Decimal::ZERO),
        }
    }

    async fn fund_position_value(
        &self,
        position: &Investment,
        transactions: &[Transaction],
        reference_date: NaiveDate,
        fund_guard: &mut HashSet<String>,
    ) -> Result<Decimal> {
        let Some(stake) = fund_stake(transactions)? else {
            return Ok(Decimal::ZERO);
        };

        let Some(fund_id) = position.fund_reference() else {
            warn!(
                "Fund position investment_id={} has no fund_id. Skipping.",
                position.id
            );
            return Ok(Decimal::ZERO);
        };

        // The guard holds the funds on the current path only, so a fund
        // reached again through a sibling branch is valued normally.
        if !fund_guard.insert(fund_id.to_string()) {
            warn!(
                "Cyclic fund dependency detected at fund_id={} (via investment_id={}). Skipping this branch (value=0).",
                fund_id, position.id
            );
            return Ok(Decimal::ZERO);
        }

        let fund_total = self.fund_total(fund_id, reference_date, fund_guard).await;
        fund_guard.remove(fund_id);

        let fund_total = fund_total?;
        stake.checked_mul(fund_total).ok_or_else(|| {
            Error::Overflow(format!(
                "stake {} of fund {} valued at {}",
                stake, fund_id, fund_total
            ))
        })
    }

    /// Sum of the values of every holding of `fund_id`.
    fn fund_total<'a>(
        &'a self,
        fund_id: &'a str,
        reference_date: NaiveDate,
        fund_guard: &'a mut HashSet<String>,
    ) -> BoxFuture<'a, Result<Decimal>> {
        async move {
            let level = self
                .load_level(OwnerType::Fund, fund_id, reference_date)
                .await?;

            let mut total = Decimal::ZERO;
            for holding_id in &level.holding_ids {
                let Some(investment) = level.investments.get(holding_id) else {
                    warn!(
                        "Fund holding metadata not found for investment_id={} in fund_id={}. Skipping.",
                        holding_id, fund_id
                    );
                    continue;
                };

                let value = self
                    .investment_value(investment, &level, reference_date, fund_guard)
                    .await?;
                total = checked_total(total, value, fund_id)?;
            }

            debug!(
                "Fund {} valued at {} on {} ({} holdings)",
                fund_id,
                total,
                reference_date,
                level.holding_ids.len()
            );
            Ok(total)
        }
        .boxed()
    }
}

fn checked_total(total: Decimal, value: Decimal, owner_id: &str) -> Result<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| Error::Overflow(format!("holdings total of {}", owner_id)))
}

#[async_trait]
impl PortfolioValuationServiceTrait for PortfolioValuationService {
    async fn calculate(
        &self,
        investor_id: &str,
        reference_date: NaiveDate,
    ) -> Result<PortfolioValuation> {
        let start = Instant::now();
        let level = self
            .load_level(OwnerType::Investor, investor_id, reference_date)
            .await?;

        let mut total_value = Decimal::ZERO;
        let mut composition_by_type: Vec<TypeComposition> = Vec::new();

        for holding_id in &level.holding_ids {
            let Some(investment) = level.investments.get(holding_id) else {
                warn!(
                    "Investment metadata not found for investment_id={}. Skipping.",
                    holding_id
                );
                continue;
            };

            let mut fund_guard = HashSet::new();
            let value = self
                .investment_value(investment, &level, reference_date, &mut fund_guard)
                .await?;
            if value.is_zero() {
                continue;
            }
            let Some(investment_type) = investment.investment_type() else {
                continue;
            };

            total_value = checked_total(total_value, value, investor_id)?;
            match composition_by_type
                .iter_mut()
                .find(|c| c.investment_type == investment_type)
            {
                Some(bucket) => bucket.value = checked_total(bucket.value, value, investor_id)?,
                None => composition_by_type.push(TypeComposition {
                    investment_type,
                    value,
                }),
            }
        }

        // Stable sort keeps first-seen order for equal values.
        composition_by_type.sort_by(|a, b| b.value.cmp(&a.value));

        debug!(
            "Valued portfolio of investor {} on {}: total={} ({} holdings) in {:?}",
            investor_id,
            reference_date,
            total_value,
            level.holding_ids.len(),
            start.elapsed()
        );

        Ok(PortfolioValuation {
            total_value,
            composition_by_type,
        })
    }
}
