//! 프로세스 전역 로그 버퍼.
//!
//! 최근 로그를 고정 크기 링으로 보관하고, 등록된 리스너에게 레코드를 즉시 전달한다.
//! 리스너는 레코드를 만든 스레드에서 호출된다.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::application::ports::{ListenerId, LogCallback, LogSource};
use crate::domain::log_record::{LogRecord, Severity};

pub struct LogBuffer {
    capacity: usize,
    records: Mutex<VecDeque<LogRecord>>,
    // 호출 중에는 read lock을 잡는다. 해제(write)는 진행 중인 콜백이 끝날 때까지 기다린다.
    listeners: RwLock<BTreeMap<ListenerId, LogCallback>>,
    next_id: AtomicU64,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity.min(4096))),
            listeners: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn push(&self, record: LogRecord) {
        if self.capacity > 0 {
            let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
            if records.len() == self.capacity {
                records.pop_front();
            }
            records.push_back(record.clone());
        }

        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for callback in listeners.values() {
            callback(&record);
        }
    }

    /// 현재 시각으로 레코드를 만들어 넣는다.
    pub fn write(&self, severity: Severity, message: impl Into<String>) {
        self.push(LogRecord {
            timestamp: unix_now(),
            severity,
            message: message.into(),
        });
    }

    /// 오래된 것부터 최대 `limit`개.
    pub fn recent(&self, limit: usize) -> Vec<LogRecord> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let skip = records.len().saturating_sub(limit);
        records.iter().skip(skip).cloned().collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl LogSource for LogBuffer {
    fn add_listener(&self, callback: LogCallback) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, callback);
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
