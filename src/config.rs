use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

pub const DEFAULT_CDN_BASE_URL: &str = "https://cdn.poehali.dev/music/";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub cdn_base_url: String,
    pub max_upload_bytes: usize,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            cdn_base_url: env::var("CDN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CDN_BASE_URL.to_string()),
            max_upload_bytes: match env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

/// Where the database connection string comes from.
///
/// The string is resolved on every request rather than captured at startup,
/// so a deployment can gain or lose its database without a restart.
#[derive(Debug, Clone)]
pub enum DatabaseUrlSource {
    /// Read the named environment variable each time.
    Env(String),
    Fixed(Option<String>),
}

impl DatabaseUrlSource {
    pub fn from_env() -> Self {
        Self::Env("DATABASE_URL".to_string())
    }

    /// Empty values count as missing.
    pub fn resolve(&self) -> Option<String> {
        let url = match self {
            Self::Env(var) => env::var(var).ok(),
            Self::Fixed(url) => url.clone(),
        };
        url.filter(|u| !u.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_source_treats_blank_as_missing() {
        assert_eq!(DatabaseUrlSource::Fixed(None).resolve(), None);
        assert_eq!(DatabaseUrlSource::Fixed(Some("  ".into())).resolve(), None);
        assert_eq!(
            DatabaseUrlSource::Fixed(Some("postgres://db/tracks".into())).resolve(),
            Some("postgres://db/tracks".to_string())
        );
    }

    #[test]
    fn env_source_reads_unset_variable_as_missing() {
        let source = DatabaseUrlSource::Env("TRACK_CATALOG_TEST_UNSET_DSN".to_string());
        assert_eq!(source.resolve(), None);
    }
}
