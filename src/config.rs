use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self {
      base_url,
      connect_timeout: None,
    }
  }

  pub fn from_env() -> Self {
    Self::new(env::var("TASKCTL_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into()))
  }
}
