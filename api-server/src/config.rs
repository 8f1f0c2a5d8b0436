//! Configuration module

use std::env;
use std::net::IpAddr;

use darkscan_core::DetectorConfig;

/// Default page fetch timeout (seconds)
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Browser-like user agent; many storefronts refuse unknown clients.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Timeout for fetching a page in /detect-from-url
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent when fetching pages
    pub user_agent: String,

    /// Allowed CORS origin (any when unset)
    pub cors_allow_origin: Option<String>,

    /// Environment (development, production)
    pub environment: String,

    /// Detection pipeline settings
    pub detector: DetectorConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::from([0, 0, 0, 0])),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),

            user_agent: env::var("FETCH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),

            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN")
                .ok()
                .filter(|o| !o.trim().is_empty() && o.trim() != "*"),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            detector: DetectorConfig::from_env(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
