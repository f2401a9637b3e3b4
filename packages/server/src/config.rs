use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use magma::{AggregateConfig, SourceConfig};

const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://puncakdonasi.vercel.app,http://127.0.0.1:5173,http://localhost:5173";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub magma_base_url: String,
    pub scrape_concurrency: usize,
    pub scrape_timeout_secs: u64,
    pub http_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            allowed_origins: parse_origins(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            magma_base_url: env::var("MAGMA_BASE_URL")
                .unwrap_or_else(|_| magma::DEFAULT_BASE_URL.to_string()),
            scrape_concurrency: env::var("SCRAPE_CONCURRENCY")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .context("SCRAPE_CONCURRENCY must be a valid number")?,
            scrape_timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("SCRAPE_TIMEOUT_SECS must be a valid number")?,
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a valid number")?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
        })
    }

    pub fn source_config(&self) -> Result<SourceConfig> {
        SourceConfig::new(&self.magma_base_url).context("MAGMA_BASE_URL must be an http(s) URL")
    }

    pub fn aggregate_config(&self) -> AggregateConfig {
        AggregateConfig::new()
            .with_concurrency(self.scrape_concurrency)
            .with_fetch_timeout(Duration::from_secs(self.scrape_timeout_secs))
    }

    /// Timeout for a single upstream HTTP request.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
