use serde::{Serialize, Deserialize};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
  #[default]
  Merge,
  Replace,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduleOptions {
  pub schedule_enabled: bool,
  pub interval_hours: f64,
  pub run_now: bool,
}

// Schedule fields land in the body only when the caller supplies them.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
  pub count: u32,
  pub upload_mode: UploadMode,
  #[serde(flatten)]
  pub schedule: Option<ScheduleOptions>,
}

impl CreateTaskRequest {
  pub fn new(count: u32) -> Self {
    Self {
      count,
      upload_mode: UploadMode::default(),
      schedule: None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
  Pending,
  Running,
  Completed,
  Failed,
  Stopped,
}

impl TaskStatus {
  pub fn is_terminal(self) -> bool {
    matches!(self, TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Stopped)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub id: String,
  pub status: TaskStatus,
  pub count: u32,
  #[serde(default)]
  pub success_count: u32,
  #[serde(default)]
  pub fail_count: u32,
  #[serde(default)]
  pub total_time: f64,
  #[serde(default)]
  pub avg_time: f64,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopResponse {
  pub message: String,
  #[serde(default)]
  pub task: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
  pub status: String,
  pub version: String,
  pub uptime: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
  pub mail_api: String,
  pub mail_key_set: bool,
  pub headless_mode: bool,
  pub concurrent_tasks: u32,
  pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
  pub id: String,
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub disabled: bool,
  #[serde(default)]
  pub expires_at: Option<String>,
  #[serde(default)]
  pub conversation_count: u32,
  #[serde(default)]
  pub remaining_display: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccountStats {
  pub total: u32,
  pub active: u32,
  pub disabled: u32,
  pub expired: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
  pub task_id: String,
  pub timestamp: String,
  pub level: String,
  pub message: String,
}

#[derive(Debug, Clone)]
pub enum LogEvent {
  Log(LogRecord),
  Status(String),
}
