use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use portfolio_calculator_core::{
    investments::Investment,
    ownership::{OwnerType, OwnershipLink},
    quotes::Quote,
    transactions::{Transaction, TransactionType},
};
use portfolio_calculator_server::{api::app_router, build_state, config::Config, AppState};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use tower::ServiceExt;

async fn build_test_app() -> (Router, Arc<AppState>, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state.clone(), &config), state, tmp)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_portfolio(state: &AppState) {
    state
        .investment_repository
        .upsert_many(&[
            Investment::stock("S1", Some("US123")),
            Investment::real_estate("R1", Some("Berlin")),
            Investment::fund("FP1", Some("FondsA")),
            Investment::stock("S2", Some("US999")),
        ])
        .await
        .unwrap();
    state
        .ownership_repository
        .upsert_links(&[
            OwnershipLink::new(OwnerType::Investor, "Investor1", "S1"),
            OwnershipLink::new(OwnerType::Investor, "Investor1", "R1"),
            OwnershipLink::new(OwnerType::Investor, "Investor1", "FP1"),
            OwnershipLink::new(OwnerType::Fund, "FondsA", "S2"),
        ])
        .await
        .unwrap();
    state
        .transaction_repository
        .insert_many(&[
            Transaction::new("S1", date(2019, 1, 1), TransactionType::Shares, dec!(10)),
            Transaction::new("S1", date(2019, 6, 1), TransactionType::Shares, dec!(5)),
            Transaction::new("R1", date(2018, 1, 1), TransactionType::Estate, dec!(200000)),
            Transaction::new("R1", date(2018, 1, 1), TransactionType::Building, dec!(50000)),
            Transaction::new("R1", date(2019, 3, 1), TransactionType::Building, dec!(-5000)),
            Transaction::new("FP1", date(2019, 1, 1), TransactionType::Percentage, dec!(20)),
            Transaction::new("S2", date(2019, 1, 1), TransactionType::Shares, dec!(100)),
        ])
        .await
        .unwrap();
    state
        .quote_repository
        .insert_many(&[
            Quote::new("US123", date(2019, 12, 30), dec!(100)),
            Quote::new("US123", date(2020, 1, 2), dec!(300)),
            Quote::new("US999", date(2019, 12, 30), dec!(50)),
        ])
        .await
        .unwrap();
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn healthz_returns_ok() {
    let (app, _state, _tmp) = build_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn portfolio_value_with_composition() {
    let (app, state, _tmp) = build_test_app().await;
    seed_portfolio(&state).await;

    let (status, json) = get_json(
        &app,
        "/api/v1/portfolio/value?investorId=Investor1&date=2019-12-31",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 1500 (stock) + 245000 (real estate) + 20% of 5000 (fund)
    assert_eq!(json["totalValue"].as_f64(), Some(247500.0));

    let composition = json["compositionByType"].as_array().unwrap();
    let entries: Vec<(&str, f64)> = composition
        .iter()
        .map(|c| (c["type"].as_str().unwrap(), c["value"].as_f64().unwrap()))
        .collect();
    assert_eq!(
        entries,
        vec![("RealEstate", 245000.0), ("Stock", 1500.0), ("Fund", 1000.0)]
    );
}

#[tokio::test]
async fn unknown_investor_has_empty_portfolio() {
    let (app, _state, _tmp) = build_test_app().await;

    let (status, json) = get_json(
        &app,
        "/api/v1/portfolio/value?investorId=Nobody&date=2019-12-31",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalValue"].as_f64(), Some(0.0));
    assert!(json["compositionByType"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let (app, _state, _tmp) = build_test_app().await;

    for uri in [
        "/api/v1/portfolio/value?date=2019-12-31",
        "/api/v1/portfolio/value?investorId=%20&date=2019-12-31",
        "/api/v1/portfolio/value?investorId=Investor1",
        "/api/v1/portfolio/value?investorId=Investor1&date=31.12.2019",
    ] {
        let (status, json) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["code"], 400);
        assert!(json["message"].is_string());
    }
}

#[tokio::test]
async fn unreadable_stored_investment_is_an_internal_error() {
    let (app, state, tmp) = build_test_app().await;
    state
        .ownership_repository
        .upsert_links(&[OwnershipLink::new(OwnerType::Investor, "Investor1", "B1")])
        .await
        .unwrap();
    let conn = rusqlite::Connection::open(tmp.path().join("test.db")).unwrap();
    conn.execute(
        "INSERT INTO investments (id, investment_type, isin, city, fund_id) \
         VALUES ('B1', 'Bond', NULL, NULL, NULL)",
        [],
    )
    .unwrap();

    let (status, json) = get_json(
        &app,
        "/api/v1/portfolio/value?investorId=Investor1&date=2019-12-31",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], 500);
    assert!(json["message"].is_string());
}
