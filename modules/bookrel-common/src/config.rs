use std::env;

use crate::BookRelError;

const DEFAULT_NLP_BASE_URL: &str = "http://localhost:8001";
const DEFAULT_NLP_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Neo4j
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,

    // Extraction service
    pub nlp_base_url: String,
    pub nlp_timeout_secs: u64,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, BookRelError> {
        Ok(Self {
            neo4j_uri: required_env("NEO4J_URI")?,
            neo4j_user: required_env("NEO4J_USER")?,
            neo4j_password: required_env("NEO4J_PASSWORD")?,
            nlp_base_url: env::var("NLP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NLP_BASE_URL.to_string()),
            nlp_timeout_secs: parsed_env("NLP_TIMEOUT_SECS", DEFAULT_NLP_TIMEOUT_SECS)?,
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: parsed_env("WEB_PORT", 8080)?,
        })
    }
}

fn required_env(key: &str) -> Result<String, BookRelError> {
    env::var(key).map_err(|_| BookRelError::Config(format!("{key} environment variable is required")))
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, BookRelError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BookRelError::Config(format!("{key} must be a number, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}
