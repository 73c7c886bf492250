//! 채널 테이블 항목.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::peer::PeerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelStatus {
    #[default]
    None,
    Wait,
    Connect,
    Request,
    Close,
    Receive,
    Broadcast,
    Abort,
    Search,
    NoHosts,
    Idle,
    Error,
    NotFound,
}

impl ChannelStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelStatus::None => "NONE",
            ChannelStatus::Wait => "WAIT",
            ChannelStatus::Connect => "CONNECT",
            ChannelStatus::Request => "REQUEST",
            ChannelStatus::Close => "CLOSE",
            ChannelStatus::Receive => "RECEIVE",
            ChannelStatus::Broadcast => "BROADCAST",
            ChannelStatus::Abort => "ABORT",
            ChannelStatus::Search => "SEARCH",
            ChannelStatus::NoHosts => "NOHOSTS",
            ChannelStatus::Idle => "IDLE",
            ChannelStatus::Error => "ERROR",
            ChannelStatus::NotFound => "NOTFOUND",
        }
    }
}

impl fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `chan` 명령 한 줄에 해당하는 채널 스냅샷.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChannelEntry {
    pub name: String,
    pub id: PeerId,
    #[serde(default)]
    pub status: ChannelStatus,
}

impl ChannelEntry {
    pub fn render_line(&self) -> String {
        format!("{} {} {}", self.name, self.id, self.status)
    }
}
