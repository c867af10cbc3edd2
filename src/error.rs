use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid page url: {0}")]
    InvalidUrl(String),
    #[error("proxy list unavailable: {0}")]
    ProxyList(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for ScrapeError {
    fn from(e: serde_json::Error) -> Self {
        ScrapeError::Other(e.to_string())
    }
}
