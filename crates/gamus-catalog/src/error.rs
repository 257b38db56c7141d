use gamus_core::ports::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("auth error: {0}")]
  Auth(String),

  #[error("unexpected status {status}: {message}")]
  Status { status: u16, message: String },

  #[error("decode error: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("config error: {0}")]
  Config(String),
}

impl From<CatalogError> for SearchError {
  fn from(err: CatalogError) -> Self {
    match err {
      CatalogError::Http(e) => SearchError::Transport(e.to_string()),
      CatalogError::Auth(msg) => SearchError::Auth(msg),
      CatalogError::Status { status, message } => SearchError::Remote { status, message },
      CatalogError::Decode(e) => SearchError::Decode(e.to_string()),
      CatalogError::Config(msg) => SearchError::Transport(msg),
    }
  }
}
