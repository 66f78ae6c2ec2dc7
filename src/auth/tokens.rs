use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{AppConfig, AppError};

/// Tokens issued by the backend's auth flow.
///
/// Session protocol internals are the backend's business; this client only
/// stores what it was handed and sends the access token back as a bearer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
}

/// Bearer token source: either a plain env token or a JSON token file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: Option<PathBuf>,
    tokens: SessionTokens,
}

impl TokenStore {
    /// ADMIN_ACCESS_TOKEN wins over ADMIN_TOKEN_FILE when both are set.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        if let Some(token) = config.access_token.as_deref() {
            return Ok(Self {
                path: None,
                tokens: SessionTokens {
                    access_token: token.to_string(),
                    refresh_token: None,
                    user_id: None,
                },
            });
        }
        match config.token_file.as_deref() {
            Some(path) => Self::load(path),
            None => Err(AppError::MissingEnv("ADMIN_ACCESS_TOKEN")),
        }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        let tokens: SessionTokens = serde_json::from_str(&text)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            tokens,
        })
    }

    pub fn bearer(&self) -> &str {
        &self.tokens.access_token
    }

    pub fn tokens(&self) -> &SessionTokens {
        &self.tokens
    }

    /// Swap in freshly issued tokens and persist them when file-backed.
    pub fn replace(&mut self, tokens: SessionTokens) -> Result<(), AppError> {
        self.tokens = tokens;
        if let Some(path) = self.path.as_deref() {
            let text = serde_json::to_string_pretty(&self.tokens)?;
            std::fs::write(path, text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_token_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stockpick-admin-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn load_replace_roundtrip() {
        let path = temp_token_path("roundtrip");
        std::fs::write(
            &path,
            r#"{"access_token":"tok-1","refresh_token":"ref-1","user_id":"admin-7"}"#,
        )
        .unwrap();

        let mut store = TokenStore::load(&path).unwrap();
        assert_eq!(store.bearer(), "tok-1");
        assert_eq!(store.tokens().user_id.as_deref(), Some("admin-7"));

        store
            .replace(SessionTokens {
                access_token: "tok-2".to_string(),
                refresh_token: None,
                user_id: Some("admin-7".to_string()),
            })
            .unwrap();

        let reloaded = TokenStore::load(&path).unwrap();
        assert_eq!(reloaded.bearer(), "tok-2");
        assert!(reloaded.tokens().refresh_token.is_none());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(TokenStore::load(Path::new("/nonexistent/tokens.json")).is_err());
    }
}
