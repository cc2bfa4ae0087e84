use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, error};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
  Account, AccountStats, CreateTaskRequest, Health, ServiceConfig, StopResponse, Task,
};
use crate::stream::LogStream;

/// One instance per backend; every call is an independent round trip and
/// the client keeps no state across calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
  http: Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.connect_timeout {
      builder = builder.connect_timeout(timeout);
    }
    Ok(Self {
      http: builder.build()?,
      base_url: config.base_url,
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn check(resp: Response, what: &'static str) -> Result<Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
      error!("{} (status {})", what, status);
      return Err(ClientError::Endpoint { what, status });
    }
    Ok(resp)
  }

  async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
  }

  pub async fn health(&self) -> Result<Health, ClientError> {
    let resp = self.http.get(self.url("/health")).send().await?;
    Self::decode(Self::check(resp, "health check failed")?).await
  }

  pub async fn get_config(&self) -> Result<ServiceConfig, ClientError> {
    let resp = self.http.get(self.url("/config")).send().await?;
    Self::decode(Self::check(resp, "config fetch failed")?).await
  }

  pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, ClientError> {
    let resp = self
      .http
      .post(self.url("/tasks"))
      .json(&request)
      .send()
      .await?;
    let task: Task = Self::decode(Self::check(resp, "task creation failed")?).await?;
    info!("created task {} (count {})", task.id, task.count);
    Ok(task)
  }

  pub async fn get_task(&self, task_id: &str) -> Result<Task, ClientError> {
    let resp = self
      .http
      .get(self.url(&format!("/tasks/{}", task_id)))
      .send()
      .await?;
    Self::decode(Self::check(resp, "task not found")?).await
  }

  pub async fn stop_task(&self, task_id: &str) -> Result<StopResponse, ClientError> {
    let resp = self
      .http
      .delete(self.url(&format!("/tasks/{}", task_id)))
      .send()
      .await?;
    let stopped: StopResponse = Self::decode(Self::check(resp, "task stop failed")?).await?;
    info!("stopped task {}", task_id);
    Ok(stopped)
  }

  /// Opens the SSE log channel for a task. The returned stream stays open
  /// until the server finishes the task, the transport drops, or the caller
  /// drops the handle.
  pub async fn subscribe_logs(&self, task_id: &str) -> Result<LogStream, ClientError> {
    let resp = self
      .http
      .get(self.url(&format!("/tasks/{}/logs", task_id)))
      .send()
      .await?;
    let resp = Self::check(resp, "log subscription failed")?;
    Ok(LogStream::spawn(resp.bytes_stream()))
  }

  pub async fn accounts(&self) -> Result<Vec<Account>, ClientError> {
    let resp = self.http.get(self.url("/accounts")).send().await?;
    Self::decode(Self::check(resp, "account fetch failed")?).await
  }

  pub async fn account_stats(&self) -> Result<AccountStats, ClientError> {
    let resp = self.http.get(self.url("/accounts/stats")).send().await?;
    Self::decode(Self::check(resp, "account stats fetch failed")?).await
  }

  // No schema exists for the remote listing, so the body stays raw JSON.
  pub async fn remote_accounts(&self) -> Result<Value, ClientError> {
    let resp = self.http.get(self.url("/accounts/remote")).send().await?;
    Self::decode(Self::check(resp, "remote account fetch failed")?).await
  }
}
