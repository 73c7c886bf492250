//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.
//!
//! 콘솔 핸들러는 전역 상태 대신 이 포트들을 통해서만 호스트 서비스에 접근한다.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::application::error::CommandError;
use crate::domain::channel::ChannelEntry;
use crate::domain::filter::ServFilter;
use crate::domain::log_record::LogRecord;
use crate::domain::peer::{PeerHost, PeerId};

/// 명령 출력 대상. 소유권은 호출자에게 있고 핸들러는 쓰기만 한다.
///
/// 쓰기 실패는 핸들러에 전달하지 않는다. 실패 처리는 sink 구현(세션)의 몫이다.
pub trait OutputSink: Send {
    fn write_bytes(&mut self, bytes: &[u8]);

    fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    fn write_line(&mut self, line: &str) {
        self.write_str(line);
        self.write_bytes(b"\n");
    }

    fn write_line_fmt(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(line) => self.write_line(line),
            None => self.write_line(&args.to_string()),
        }
    }
}

/// "지금 멈춰야 하는가"를 묻는 부작용 없는 질의.
pub trait CancelPredicate: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

impl<F> CancelPredicate for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// 여러 컨텍스트가 공유하는 취소 플래그.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl CancelPredicate for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 로그 리스너 등록 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// 로그 생산자 스레드에서 호출되는 콜백.
pub type LogCallback = Box<dyn Fn(&LogRecord) + Send + Sync>;

/// 비동기 로그 이벤트 소스.
pub trait LogSource: Send + Sync {
    fn add_listener(&self, callback: LogCallback) -> ListenerId;
    /// 이미 해제된 id면 `false`를 돌려준다.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// 채널 테이블 읽기 전용 스냅샷 포트.
pub trait ChannelDirectory: Send + Sync {
    fn snapshot(&self) -> Vec<ChannelEntry>;
}

/// 접속 필터 테이블 포트.
pub trait FilterTable: Send + Sync {
    fn snapshot(&self) -> Vec<ServFilter>;
    /// 패턴에 ban 플래그를 추가한다. 없는 패턴이면 새로 만든다.
    fn ban(&self, pattern: &str) -> ServFilter;
}

/// DNS 정/역방향 조회 포트.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>, CommandError>;
    async fn reverse(&self, ip: IpAddr) -> Result<Option<String>, CommandError>;
}

/// 단순 HTTP GET 포트.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, CommandError>;
}

/// 핸드셰이크 중 주고받은 원시 바이트 기록.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub written: Vec<u8>,
    pub read: Vec<u8>,
}

/// 핸드셰이크 성공 시 상대가 알려준 정보.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerHello {
    pub remote_id: PeerId,
    pub agent: String,
}

/// 피어 프로토콜 핸드셰이크 포트.
#[async_trait]
pub trait PeerGreeter: Send + Sync {
    /// 실패하더라도 그때까지의 송수신 바이트는 `transcript`에 남아 있어야 한다.
    async fn greet(
        &self,
        host: &PeerHost,
        transcript: &mut Transcript,
    ) -> Result<PeerHello, CommandError>;
}
