//! 로그 소스 구독 가드.
//!
//! 생산자 스레드의 콜백은 청크를 큐에 넣기만 하고, 핸들러가 자기 컨텍스트에서 큐를 비운다.
//! 락은 큐 교체 동안에만 잡으며 출력 중에는 잡지 않는다.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::application::ports::{ListenerId, LogSource, OutputSink};
use crate::domain::log_record::LogRecord;

type ChunkQueue = Arc<Mutex<VecDeque<String>>>;

/// 리스너 등록을 정확히 한 번 해제하는 가드.
/// 명시적 해제 없이 빠져나가도(오류, future drop) `Drop`에서 해제된다.
pub(super) struct Subscription {
    source: Arc<dyn LogSource>,
    id: ListenerId,
    active: bool,
    queue: ChunkQueue,
}

impl Subscription {
    /// `format`이 `Some`을 돌려준 레코드만 큐에 쌓는다.
    pub(super) fn start<F>(source: Arc<dyn LogSource>, format: F) -> Self
    where
        F: Fn(&LogRecord) -> Option<String> + Send + Sync + 'static,
    {
        let queue = ChunkQueue::default();
        let producer = Arc::clone(&queue);
        let id = source.add_listener(Box::new(move |record| {
            if let Some(chunk) = format(record) {
                producer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push_back(chunk);
            }
        }));

        Self {
            source,
            id,
            active: true,
            queue,
        }
    }

    pub(super) fn id(&self) -> ListenerId {
        self.id
    }

    /// 쌓인 청크를 통째로 꺼내 순서대로 쓴다.
    pub(super) fn drain(&self, out: &mut dyn OutputSink) {
        let pending =
            std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner));
        for chunk in pending {
            out.write_str(&chunk);
        }
    }

    /// 이후로는 새 청크가 들어오지 않는다. 이미 쌓인 청크는 `drain`으로 꺼낼 수 있다.
    pub(super) fn release(&mut self) {
        if std::mem::take(&mut self.active) {
            self.source.remove_listener(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
