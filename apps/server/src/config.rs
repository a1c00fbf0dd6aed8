use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    /// Requests still running after this are answered with a timeout and
    /// their valuation future is dropped.
    pub request_timeout: Duration,
}

impl Config {
    /// Reads the `PC_*` environment variables, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("PC_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid PC_LISTEN_ADDR")?;
        let db_path = std::env::var("PC_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.into());
        let cors_allow = parse_origins(
            &std::env::var("PC_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms = match std::env::var("PC_REQUEST_TIMEOUT_MS") {
            Ok(raw) => parse_timeout_ms(&raw),
            Err(_) => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_timeout_ms(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => ms,
        _ => {
            tracing::warn!(
                "Invalid PC_REQUEST_TIMEOUT_MS '{}', using {} ms",
                raw,
                DEFAULT_REQUEST_TIMEOUT_MS
            );
            DEFAULT_REQUEST_TIMEOUT_MS
        }
    }
}
