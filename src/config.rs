// src/config.rs
use crate::errors::ServerError;
use std::env;
use std::net::SocketAddr;

/// Where stored assets are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    /// Path segment of the static-asset mount, without slashes.
    /// Example: "media"
    pub mount_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            mount_prefix: "media".to_string(),
        }
    }
}

impl MediaConfig {
    pub fn new(mount_prefix: &str) -> Self {
        Self {
            mount_prefix: mount_prefix.trim_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub schema_path: String,
    pub addr: SocketAddr,
    pub max_workers: usize,
    pub media: MediaConfig,
    /// Host used for absolute URLs when a request carries no Host header.
    pub default_host: String,
    /// `EnvFilter` directive, e.g. "info" or "kalunwa=debug".
    pub log_level: String,
    /// Take the URL scheme from `X-Forwarded-Proto`. Only safe behind a
    /// proxy that sets the header itself.
    pub trust_forwarded_proto: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "kalunwa.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            media: MediaConfig::default(),
            default_host: "localhost".to_string(),
            log_level: "info".to_string(),
            trust_forwarded_proto: false,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `KALUNWA_*` environment variables.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("KALUNWA_DB") {
            cfg.db_path = v;
        }
        if let Some(v) = lookup("KALUNWA_SCHEMA") {
            cfg.schema_path = v;
        }
        if let Some(v) = lookup("KALUNWA_ADDR") {
            cfg.addr = v
                .parse()
                .map_err(|e| ServerError::BadRequest(format!("KALUNWA_ADDR: {e}")))?;
        }
        if let Some(v) = lookup("KALUNWA_WORKERS") {
            cfg.max_workers = match v.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ServerError::BadRequest(format!(
                        "KALUNWA_WORKERS: expected a positive integer, got {v:?}"
                    )))
                }
            };
        }
        if let Some(v) = lookup("KALUNWA_MEDIA_PREFIX") {
            let media = MediaConfig::new(&v);
            if media.mount_prefix.is_empty() {
                return Err(ServerError::BadRequest(
                    "KALUNWA_MEDIA_PREFIX: mount prefix cannot be empty".into(),
                ));
            }
            cfg.media = media;
        }
        if let Some(v) = lookup("KALUNWA_DEFAULT_HOST") {
            cfg.default_host = v;
        }
        if let Some(v) = lookup("KALUNWA_LOG") {
            cfg.log_level = v;
        }
        if let Some(v) = lookup("KALUNWA_TRUST_FORWARDED_PROTO") {
            cfg.trust_forwarded_proto = parse_flag("KALUNWA_TRUST_FORWARDED_PROTO", &v)?;
        }

        Ok(cfg)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ServerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ServerError::BadRequest(format!(
            "{name}: expected true or false, got {value:?}"
        ))),
    }
}
