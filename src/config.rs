use anyhow::Result;
use serde::Deserialize;
use std::env;

/// Backend origin used when neither DLQ_API_BASE nor DLQ_API is set.
pub const DEFAULT_BACKEND: &str = "http://127.0.0.1:8099";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                host: env::var("DLQ_DASH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("DLQ_DASH_PORT")
                    .unwrap_or_else(|_| "8098".to_string())
                    .parse()?,
            },
            backend: BackendConfig {
                base_url: backend_base_url(),
            },
        })
    }
}

/// Resolve the DLQ backend origin from the environment.
///
/// DLQ_API_BASE wins over the older DLQ_API name; blank values are treated
/// as unset.
pub fn backend_base_url() -> String {
    pick_base(env::var("DLQ_API_BASE").ok(), env::var("DLQ_API").ok())
}

fn pick_base(api_base: Option<String>, api: Option<String>) -> String {
    let picked = [api_base, api]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND.to_string());
    picked.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_base_prefers_api_base() {
        let base = pick_base(
            Some("http://dlq.lan:8099".to_string()),
            Some("http://other:9000".to_string()),
        );
        assert_eq!(base, "http://dlq.lan:8099");
    }

    #[test]
    fn test_pick_base_falls_back_to_api() {
        let base = pick_base(None, Some("http://other:9000/".to_string()));
        assert_eq!(base, "http://other:9000");
    }

    #[test]
    fn test_pick_base_ignores_blank_values() {
        let base = pick_base(Some("   ".to_string()), None);
        assert_eq!(base, DEFAULT_BACKEND);
    }

    #[test]
    fn test_pick_base_strips_trailing_slashes() {
        let base = pick_base(Some("http://dlq.lan:8099///".to_string()), None);
        assert_eq!(base, "http://dlq.lan:8099");
    }
}
