use anyhow::{Context, Result, bail};
use futures::StreamExt;
use std::env;
use taskctl::client::ApiClient;
use taskctl::config::ClientConfig;
use taskctl::format::{format_duration, format_time};
use taskctl::models::{CreateTaskRequest, LogEvent, Task, UploadMode};

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt::init();
  let args: Vec<String> = env::args().skip(1).collect();
  let client = ApiClient::new(ClientConfig::from_env())?;

  match args.first().map(String::as_str) {
    Some("health") => {
      let health = client.health().await?;
      println!(
        "{} v{} (up {})",
        health.status,
        health.version,
        format_duration(health.uptime)
      );
    }
    Some("config") => {
      let config = client.get_config().await?;
      println!("version:          {}", config.version);
      println!("mail api:         {}", config.mail_api);
      println!("mail key set:     {}", config.mail_key_set);
      println!("headless mode:    {}", config.headless_mode);
      println!("concurrent tasks: {}", config.concurrent_tasks);
    }
    Some("create") => {
      let count = match args.get(1) {
        Some(raw) => raw.parse().context("count must be a positive integer")?,
        None => 5,
      };
      let upload_mode = match args.get(2).map(String::as_str) {
        Some("replace") => UploadMode::Replace,
        Some("merge") | None => UploadMode::Merge,
        Some(other) => bail!("unknown upload mode: {}", other),
      };
      let task = client
        .create_task(CreateTaskRequest {
          count,
          upload_mode,
          schedule: None,
        })
        .await?;
      print_task(&task);
    }
    Some("status") => {
      let task = client.get_task(task_id_arg(&args)?).await?;
      print_task(&task);
    }
    Some("stop") => {
      let stopped = client.stop_task(task_id_arg(&args)?).await?;
      println!("{}", stopped.message);
    }
    Some("watch") => {
      let mut logs = client.subscribe_logs(task_id_arg(&args)?).await?;
      while let Some(event) = logs.next().await {
        match event? {
          LogEvent::Log(record) => println!("[{}] {}", record.level, record.message),
          LogEvent::Status(status) => {
            println!("task finished: {}", status);
            break;
          }
        }
      }
    }
    Some("accounts") => {
      for account in client.accounts().await? {
        let state = if account.disabled { "disabled" } else { account.status.as_str() };
        println!(
          "{}  {}  expires: {}",
          account.id,
          state,
          account.expires_at.as_deref().unwrap_or("-")
        );
      }
    }
    Some("stats") => {
      let stats = client.account_stats().await?;
      println!(
        "total {} | active {} | disabled {} | expired {}",
        stats.total, stats.active, stats.disabled, stats.expired
      );
    }
    _ => {
      eprintln!(
        "usage: taskctl <health|config|create [count] [merge|replace]|status <id>|stop <id>|watch <id>|accounts|stats>"
      );
    }
  }
  Ok(())
}

fn task_id_arg(args: &[String]) -> Result<&str> {
  args.get(1).map(String::as_str).context("missing task id")
}

fn print_task(task: &Task) {
  println!("task {}", task.id);
  println!("  status:   {:?}", task.status);
  println!("  progress: {}/{} ok, {} failed", task.success_count, task.count, task.fail_count);
  println!("  avg time: {}", format_duration(task.avg_time));
  println!(
    "  created:  {}",
    format_time(Some(task.created_at.and_utc().timestamp_millis()))
  );
  println!(
    "  updated:  {}",
    format_time(Some(task.updated_at.and_utc().timestamp_millis()))
  );
}
