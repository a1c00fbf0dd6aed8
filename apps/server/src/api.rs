use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderValue,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use portfolio_calculator_core::PortfolioValuation;
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
struct PortfolioValueQuery {
    #[serde(rename = "investorId")]
    investor_id: Option<String>,
    date: Option<String>,
}

async fn get_portfolio_value(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PortfolioValueQuery>,
) -> ApiResult<Json<PortfolioValuation>> {
    let investor_id = q
        .investor_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("investorId is required".to_string()))?;
    let date = q
        .date
        .ok_or_else(|| ApiError::BadRequest("date is required".to_string()))?;
    let reference_date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| ApiError::BadRequest(format!("Invalid date '{}': {}", date, e)))?;

    let valuation = state
        .valuation_service
        .calculate(&investor_id, reference_date)
        .await?;
    Ok(Json(valuation))
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }

    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/portfolio/value", get(get_portfolio_value));

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
