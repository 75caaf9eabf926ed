use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_HISTORY_LIMIT: i64 = 20;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset, history is kept in memory for the lifetime of the process.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Request body limit for upload endpoints.
    pub max_upload_bytes: usize,
    /// Maximum entries returned per history list.
    pub history_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            history_limit: parse_env("HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let port: u16 = parse_env("RESUME_MATCHER_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_MATCHER_TEST_BAD_LIMIT", "twenty");
        let parsed: Result<i64> = parse_env("RESUME_MATCHER_TEST_BAD_LIMIT", 20);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_blank_optional_is_none() {
        std::env::set_var("RESUME_MATCHER_TEST_BLANK_URL", "  ");
        assert_eq!(optional_env("RESUME_MATCHER_TEST_BLANK_URL"), None);
    }
}
