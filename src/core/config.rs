use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::error::AppError;

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// REST backend, e.g. `https://api.stockpick.example`.
    pub api_base_url: String,
    /// Push channel for notification events.
    pub ws_url: String,

    /// Bearer token taken straight from the environment.
    /// Takes precedence over `token_file`.
    pub access_token: Option<String>,
    /// JSON token file written by the auth flow.
    pub token_file: Option<PathBuf>,

    /// Default page size for list views.
    pub page_limit: u32,
    /// Delay for free-text search debouncing.
    pub search_debounce: Duration,
}

impl AppConfig {
    /// Env:
    /// - ADMIN_API_BASE_URL (required)
    /// - ADMIN_WS_URL (default: derived from the base URL, path /ws/notifications)
    /// - ADMIN_ACCESS_TOKEN or ADMIN_TOKEN_FILE (one is required to talk to the backend)
    /// - ADMIN_PAGE_LIMIT (default 10)
    /// - ADMIN_SEARCH_DEBOUNCE_MS (default 300)
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url = env_nonempty("ADMIN_API_BASE_URL")
            .ok_or(AppError::MissingEnv("ADMIN_API_BASE_URL"))?;

        let ws_url = match env_nonempty("ADMIN_WS_URL") {
            Some(v) => v,
            None => derive_ws_url(&api_base_url)?,
        };

        let access_token = env_nonempty("ADMIN_ACCESS_TOKEN");
        let token_file = env_nonempty("ADMIN_TOKEN_FILE").map(PathBuf::from);

        let page_limit = env_u32("ADMIN_PAGE_LIMIT")
            .filter(|v| *v > 0)
            .unwrap_or(10);
        let debounce_ms = env_u64("ADMIN_SEARCH_DEBOUNCE_MS")
            .filter(|v| *v > 0)
            .unwrap_or(300);

        Ok(Self {
            api_base_url,
            ws_url,
            access_token,
            token_file,
            page_limit,
            search_debounce: Duration::from_millis(debounce_ms),
        })
    }
}

/// Derive the websocket endpoint from the REST base URL.
///
/// `https://api.example` becomes `wss://api.example/ws/notifications`.
pub fn derive_ws_url(api_base_url: &str) -> Result<String, AppError> {
    let mut url = Url::parse(api_base_url)
        .map_err(|e| AppError::Config(format!("invalid ADMIN_API_BASE_URL: {e}")))?;

    let scheme = match url.scheme() {
        "https" => "wss",
        "http" => "ws",
        other => {
            return Err(AppError::Config(format!(
                "unsupported ADMIN_API_BASE_URL scheme: {other}"
            )))
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| AppError::Config("cannot derive websocket scheme".to_string()))?;
    url.set_path("/ws/notifications");
    url.set_query(None);

    Ok(url.to_string())
}
