use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required env var: {0}")]
    MissingEnv(&'static str),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Admin API error: {0}")]
    Api(String),

    #[error("Notification socket error: {0}")]
    Ws(String),

    #[error("{0}")]
    Validation(String),
}
