use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;

use crate::error::ClientError;
use crate::models::{LogEvent, LogRecord};

static CHANNEL_CAPACITY: usize = 16;

/// Typed view of a task's SSE log channel.
///
/// Yields `LogEvent` items in transport order. A malformed `log` payload
/// surfaces as a `Decode` error item and ends the stream; a transport error
/// ends the stream after a diagnostic only. Dropping the handle aborts the
/// forwarding task and releases the connection, so nothing is delivered
/// after close.
#[derive(Debug)]
pub struct LogStream {
  rx: ReceiverStream<Result<LogEvent, ClientError>>,
  worker: JoinHandle<()>,
}

impl LogStream {
  pub(crate) fn spawn<S>(bytes: S) -> Self
  where
    S: Stream<Item = reqwest::Result<Bytes>> + Send + Unpin + 'static,
  {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let worker = tokio::spawn(forward_events(bytes, tx));
    Self {
      rx: ReceiverStream::new(rx),
      worker,
    }
  }

  pub fn close(self) {}
}

impl Stream for LogStream {
  type Item = Result<LogEvent, ClientError>;

  fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    Pin::new(&mut self.rx).poll_next(cx)
  }
}

impl Drop for LogStream {
  fn drop(&mut self) {
    self.worker.abort();
  }
}

async fn forward_events<S>(bytes: S, tx: mpsc::Sender<Result<LogEvent, ClientError>>)
where
  S: Stream<Item = reqwest::Result<Bytes>> + Unpin,
{
  let mut events = bytes.eventsource();
  while let Some(next) = events.next().await {
    match next {
      Ok(sse) => {
        let item = match sse.event.as_str() {
          "log" => match serde_json::from_str::<LogRecord>(&sse.data) {
            Ok(record) => Ok(LogEvent::Log(record)),
            Err(e) => {
              let _ = tx.send(Err(ClientError::Decode(e))).await;
              return;
            }
          },
          "status" => Ok(LogEvent::Status(sse.data)),
          _ => continue,
        };
        if tx.send(item).await.is_err() {
          // receiver dropped
          return;
        }
      }
      Err(e) => {
        warn!("log stream disconnected: {}", e);
        return;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::stream;

  fn sse_stream(body: &'static str) -> impl Stream<Item = reqwest::Result<Bytes>> + Send + Unpin {
    stream::iter(vec![Ok(Bytes::from_static(body.as_bytes()))])
  }

  #[test]
  fn truncated_stream_ends_cleanly() {
    tokio_test::block_on(async {
      // chunk ends mid-event, then the source stops: no items, clean end
      let mut logs = LogStream::spawn(sse_stream("event: log\ndata: {\"task_id\""));
      assert!(logs.next().await.is_none());
    });
  }

  #[test]
  fn status_events_carry_the_raw_payload() {
    tokio_test::block_on(async {
      let mut logs = LogStream::spawn(sse_stream("event: status\ndata: done\n\n"));
      match logs.next().await.unwrap().unwrap() {
        LogEvent::Status(status) => assert_eq!(status, "done"),
        other => panic!("expected status event, got {:?}", other),
      }
      assert!(logs.next().await.is_none());
    });
  }
}
