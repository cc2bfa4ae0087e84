use futures::StreamExt;
use taskctl::client::ApiClient;
use taskctl::config::ClientConfig;
use taskctl::error::ClientError;
use taskctl::models::LogEvent;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
  ApiClient::new(ClientConfig::new(server.uri())).unwrap()
}

async fn mount_logs(server: &MockServer, task_id: &str, body: &str) {
  Mock::given(method("GET"))
    .and(path(format!("/tasks/{}/logs", task_id)))
    .respond_with(ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream"))
    .mount(server)
    .await;
}

#[tokio::test]
async fn log_events_parse_into_records() {
  let server = MockServer::start().await;
  let body = concat!(
    "event: log\n",
    "data: {\"task_id\":\"t1\",\"timestamp\":\"2026-08-27T10:00:00\",\"level\":\"INFO\",\"message\":\"started\"}\n",
    "\n",
    "event: status\n",
    "data: completed\n",
    "\n",
  );
  mount_logs(&server, "t1", body).await;

  let mut logs = client_for(&server).subscribe_logs("t1").await.unwrap();

  match logs.next().await.unwrap().unwrap() {
    LogEvent::Log(record) => {
      assert_eq!(record.task_id, "t1");
      assert_eq!(record.level, "INFO");
      assert_eq!(record.message, "started");
    }
    other => panic!("expected log event, got {:?}", other),
  }

  match logs.next().await.unwrap().unwrap() {
    LogEvent::Status(status) => assert_eq!(status, "completed"),
    other => panic!("expected status event, got {:?}", other),
  }

  assert!(logs.next().await.is_none());
}

#[tokio::test]
async fn unnamed_events_are_skipped() {
  let server = MockServer::start().await;
  let body = concat!(
    "data: keepalive\n",
    "\n",
    "event: status\n",
    "data: stopped\n",
    "\n",
  );
  mount_logs(&server, "t2", body).await;

  let mut logs = client_for(&server).subscribe_logs("t2").await.unwrap();
  match logs.next().await.unwrap().unwrap() {
    LogEvent::Status(status) => assert_eq!(status, "stopped"),
    other => panic!("expected status event, got {:?}", other),
  }
}

#[tokio::test]
async fn malformed_log_payload_surfaces_a_decode_error() {
  let server = MockServer::start().await;
  let body = concat!("event: log\n", "data: {not json\n", "\n");
  mount_logs(&server, "t3", body).await;

  let mut logs = client_for(&server).subscribe_logs("t3").await.unwrap();
  let err = logs.next().await.unwrap().unwrap_err();
  assert!(matches!(err, ClientError::Decode(_)));
  assert!(logs.next().await.is_none());
}

#[tokio::test]
async fn subscribing_to_a_missing_task_fails_up_front() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/tasks/nope/logs"))
    .respond_with(ResponseTemplate::new(404))
    .mount(&server)
    .await;

  let err = client_for(&server).subscribe_logs("nope").await.unwrap_err();
  assert!(err.to_string().contains("log subscription failed"));
}

#[tokio::test]
async fn close_releases_the_subscription() {
  let server = MockServer::start().await;
  let body = concat!(
    "event: status\n",
    "data: running\n",
    "\n",
    "event: status\n",
    "data: completed\n",
    "\n",
  );
  mount_logs(&server, "t4", body).await;

  let mut logs = client_for(&server).subscribe_logs("t4").await.unwrap();
  assert!(logs.next().await.is_some());
  logs.close();
}
