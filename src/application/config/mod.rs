//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::channel::ChannelEntry;
use crate::domain::filter::FilterSpec;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DNS_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_PEER_PORT: u16 = 7144;
pub const DEFAULT_PEER_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 콘솔 런타임 설정
    #[serde(default)]
    pub console: ConsoleConfig,
    /// 제어 소켓 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub dns: DnsConfig,
    /// `helo` 핸드셰이크 설정
    #[serde(default)]
    pub peer: PeerConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// 필터 테이블 초기값
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<FilterSpec>>,
    /// 채널 테이블 초기값
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ChannelEntry>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ConsoleConfig {
    /// 스트리밍 핸들러의 drain/취소 확인 주기(ms)
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    /// Unix 도메인 소켓 경로
    pub socket_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HttpConfig {
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DnsConfig {
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PeerConfig {
    /// 포트를 생략한 `helo` 대상에 쓰는 기본 포트
    pub default_port: Option<u16>,
    /// 접속/읽기 타임아웃(ms)
    pub timeout_ms: Option<u64>,
    /// 핸드셰이크에서 보낼 agent 문자열
    pub agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    /// 최근 로그 보관 개수
    pub capacity: Option<usize>,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        let ms = self
            .console
            .poll_interval_ms
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
            .max(1);
        Duration::from_millis(ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http.timeout_ms.unwrap_or(DEFAULT_HTTP_TIMEOUT_MS))
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns.timeout_ms.unwrap_or(DEFAULT_DNS_TIMEOUT_MS))
    }

    pub fn peer_default_port(&self) -> u16 {
        self.peer.default_port.unwrap_or(DEFAULT_PEER_PORT)
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_millis(self.peer.timeout_ms.unwrap_or(DEFAULT_PEER_TIMEOUT_MS))
    }

    pub fn peer_agent(&self) -> String {
        self.peer
            .agent
            .clone()
            .unwrap_or_else(|| format!("ctlshell/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn log_capacity(&self) -> usize {
        self.log.capacity.unwrap_or(DEFAULT_LOG_CAPACITY)
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        if other.console.poll_interval_ms.is_some() {
            self.console.poll_interval_ms = other.console.poll_interval_ms;
        }
        if other.server.socket_path.is_some() {
            self.server.socket_path = other.server.socket_path;
        }
        if other.http.timeout_ms.is_some() {
            self.http.timeout_ms = other.http.timeout_ms;
        }
        if other.dns.timeout_ms.is_some() {
            self.dns.timeout_ms = other.dns.timeout_ms;
        }
        if other.peer.default_port.is_some() {
            self.peer.default_port = other.peer.default_port;
        }
        if other.peer.timeout_ms.is_some() {
            self.peer.timeout_ms = other.peer.timeout_ms;
        }
        if other.peer.agent.is_some() {
            self.peer.agent = other.peer.agent;
        }
        if other.log.capacity.is_some() {
            self.log.capacity = other.log.capacity;
        }
        // 테이블 초기값은 목록 단위로 교체한다.
        if other.filters.is_some() {
            self.filters = other.filters;
        }
        if other.channels.is_some() {
            self.channels = other.channels;
        }
    }
}
