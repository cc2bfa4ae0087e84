use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("{what} (status {status})")]
  Endpoint { what: &'static str, status: StatusCode },
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("failed to decode response: {0}")]
  Decode(#[from] serde_json::Error),
}

impl ClientError {
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      ClientError::Endpoint { status, .. } => Some(*status),
      _ => None,
    }
  }
}
