//! Server settings read from the environment.

use std::path::PathBuf;

use axum::http::HeaderValue;
use termgraph_core::defaults;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub catalogue_path: PathBuf,
    pub allowed_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `TERMGRAPH_CATALOGUE` and `ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| defaults::SERVER_HOST.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults::SERVER_PORT);
        let catalogue_path = std::env::var("TERMGRAPH_CATALOGUE")
            .unwrap_or_else(|_| defaults::CATALOGUE_PATH.to_string())
            .into();
        let allowed_origins = parse_allowed_origins(
            &std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        Self {
            host,
            port,
            catalogue_path,
            allowed_origins,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated origin whitelist, skipping invalid entries.
/// A blank list yields the development defaults.
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    let raw = if raw.trim().is_empty() {
        DEFAULT_ALLOWED_ORIGINS
    } else {
        raw
    };

    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
