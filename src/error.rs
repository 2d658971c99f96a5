use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppraisalError {
    #[error("invalid review pair: {0}")]
    InvalidPair(String),

    #[error("invalid ratings: {0}")]
    InvalidRatings(String),

    #[error("unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("cycle file error: {0}")]
    CycleParse(String),

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppraisalError>;
