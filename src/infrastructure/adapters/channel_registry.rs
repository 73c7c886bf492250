//! 메모리 채널 테이블. 호스트 서비스가 갱신하고 `chan`이 읽는다.

use std::sync::{PoisonError, RwLock};

use crate::application::ports::ChannelDirectory;
use crate::domain::channel::ChannelEntry;

#[derive(Default)]
pub struct ChannelRegistry {
    channels: RwLock<Vec<ChannelEntry>>,
}

impl ChannelRegistry {
    pub fn new(channels: Vec<ChannelEntry>) -> Self {
        Self {
            channels: RwLock::new(channels),
        }
    }

    /// 같은 id가 있으면 교체하고, 없으면 끝에 추가한다.
    pub fn upsert(&self, entry: ChannelEntry) {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        match channels.iter_mut().find(|c| c.id == entry.id) {
            Some(existing) => *existing = entry,
            None => channels.push(entry),
        }
    }
}

impl ChannelDirectory for ChannelRegistry {
    fn snapshot(&self) -> Vec<ChannelEntry> {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
