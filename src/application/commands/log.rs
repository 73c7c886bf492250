//! `log`: 로그 소스를 구독해 취소될 때까지 출력으로 흘려보낸다.
//!
//! 생산자 스레드의 콜백은 청크를 큐에 넣기만 하고, 핸들러는 `poll_interval`마다
//! 큐를 통째로 비워 출력한다. 락은 큐 교체 동안에만 잡으며 sleep이나 출력 중에는 잡지 않는다.
//!
//! 종료 시에는 리스너를 먼저 해제하고 큐를 한 번 더 비운다.
//! 해제 이전에 포맷된 청크는 하나도 버리지 않는다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::subscription::Subscription;
use crate::application::console::CommandHandler;
use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, LogSource, OutputSink};

pub struct LogCommand {
    source: Arc<dyn LogSource>,
    poll_interval: Duration,
}

impl LogCommand {
    pub fn new(source: Arc<dyn LogSource>, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
        }
    }
}

#[async_trait]
impl CommandHandler for LogCommand {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        _args: &[String],
        cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError> {
        let mut subscription =
            Subscription::start(Arc::clone(&self.source), |record| Some(record.render_chunk()));
        let listener = subscription.id().0;
        debug!(listener, "log tail started");

        while !cancel.is_cancelled() {
            subscription.drain(out);
            tokio::time::sleep(self.poll_interval).await;
        }

        subscription.release();
        subscription.drain(out);
        debug!(listener, "log tail stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    use super::*;
    use crate::application::console::MemorySink;
    use crate::application::ports::{CancelFlag, ListenerId, LogCallback};
    use crate::domain::log_record::{LogRecord, Severity};

    #[derive(Default)]
    struct FakeSource {
        next_id: AtomicU64,
        listeners: Mutex<BTreeMap<ListenerId, Arc<LogCallback>>>,
        removals: AtomicUsize,
        // 구독 직후(첫 drain 이전) 다른 스레드에서 내보낼 메시지
        backlog: Vec<String>,
    }

    impl FakeSource {
        fn with_backlog(messages: &[&str]) -> Self {
            Self {
                backlog: messages.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn listener_count(&self) -> usize {
            self.listeners.lock().unwrap().len()
        }
    }

    fn record(message: &str) -> LogRecord {
        LogRecord {
            timestamp: 0,
            severity: Severity::Info,
            message: message.to_string(),
        }
    }

    impl LogSource for FakeSource {
        fn add_listener(&self, callback: LogCallback) -> ListenerId {
            let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
            let callback = Arc::new(callback);
            self.listeners.lock().unwrap().insert(id, Arc::clone(&callback));

            let backlog = self.backlog.clone();
            std::thread::spawn(move || {
                for message in backlog {
                    (*callback)(&record(&message));
                }
            })
            .join()
            .unwrap();
            id
        }

        fn remove_listener(&self, id: ListenerId) -> bool {
            self.removals.fetch_add(1, Ordering::SeqCst);
            self.listeners.lock().unwrap().remove(&id).is_some()
        }
    }

    #[tokio::test]
    async fn backlog_is_flushed_in_order_when_cancelled_before_first_drain() {
        let source = Arc::new(FakeSource::with_backlog(&["one", "two", "three"]));
        let command = LogCommand::new(source.clone(), Duration::from_millis(5));
        let mut sink = MemorySink::new();

        command.run(&mut sink, &[], &|| true).await.unwrap();

        assert_eq!(sink.text(), "[INFO] one\n[INFO] two\n[INFO] three\n");
        assert_eq!(source.listener_count(), 0);
        assert_eq!(source.removals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stops_within_a_poll_interval_after_cancel() {
        let source = Arc::new(FakeSource::with_backlog(&["a", "b"]));
        let command = LogCommand::new(source.clone(), Duration::from_millis(5));
        let polls = AtomicUsize::new(0);
        let cancel = move || polls.fetch_add(1, Ordering::SeqCst) >= 3;
        let mut sink = MemorySink::new();

        command.run(&mut sink, &[], &cancel).await.unwrap();

        assert_eq!(sink.lines(), vec!["[INFO] a", "[INFO] b"]);
        assert_eq!(source.listener_count(), 0);
    }

    #[tokio::test]
    async fn dropping_the_running_future_still_unsubscribes_once() {
        let source = Arc::new(FakeSource::default());
        let command = LogCommand::new(source.clone(), Duration::from_millis(5));
        let flag = CancelFlag::new();
        let mut sink = MemorySink::new();

        let result = tokio::time::timeout(
            Duration::from_millis(30),
            command.run(&mut sink, &[], &flag),
        )
        .await;

        assert!(result.is_err(), "never-cancelled tail must still be running");
        assert_eq!(source.listener_count(), 0);
        assert_eq!(source.removals.load(Ordering::SeqCst), 1);
    }
}
