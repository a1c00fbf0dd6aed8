use std::sync::Arc;

use portfolio_calculator_core::{
    investments::InvestmentRepositoryTrait, ownership::OwnershipRepositoryTrait,
    quotes::QuoteRepositoryTrait, transactions::TransactionRepositoryTrait,
    PortfolioValuationService, PortfolioValuationServiceTrait,
};
use portfolio_calculator_storage_sqlite::{
    db, InvestmentRepository, OwnershipRepository, QuoteRepository, TransactionRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub valuation_service: Arc<dyn PortfolioValuationServiceTrait>,
    pub ownership_repository: Arc<dyn OwnershipRepositoryTrait>,
    pub investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    pub transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    pub quote_repository: Arc<dyn QuoteRepositoryTrait>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded to it as well.
pub fn init_tracing() {
    let log_format = std::env::var("PC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let ownership_repository: Arc<dyn OwnershipRepositoryTrait> =
        Arc::new(OwnershipRepository::new(pool.clone(), writer.clone()));
    let investment_repository: Arc<dyn InvestmentRepositoryTrait> =
        Arc::new(InvestmentRepository::new(pool.clone(), writer.clone()));
    let transaction_repository: Arc<dyn TransactionRepositoryTrait> =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let quote_repository: Arc<dyn QuoteRepositoryTrait> =
        Arc::new(QuoteRepository::new(pool.clone(), writer));

    let valuation_service = Arc::new(PortfolioValuationService::new(
        ownership_repository.clone(),
        investment_repository.clone(),
        transaction_repository.clone(),
        quote_repository.clone(),
    ));

    Ok(Arc::new(AppState {
        valuation_service,
        ownership_repository,
        investment_repository,
        transaction_repository,
        quote_repository,
    }))
}
