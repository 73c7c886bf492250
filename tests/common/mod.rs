//! 통합 테스트 공용 fake 포트와 콘솔 조립.
#![allow(dead_code)]

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use ctlshell::application::commands::Collaborators;
use ctlshell::application::config::Config;
use ctlshell::application::console::{Console, MemorySink};
use ctlshell::application::error::CommandError;
use ctlshell::application::ports::{
    HostResolver, HttpFetcher, PeerGreeter, PeerHello, Transcript,
};
use ctlshell::domain::peer::{PeerHost, PeerId};
use ctlshell::infrastructure::adapters::{ChannelRegistry, FilterRegistry};
use ctlshell::infrastructure::logging::LogBuffer;
use ctlshell::interface::composition::AppComposition;

/// 외부 호출 횟수. 사용법 오류 경로에서 0이어야 한다.
#[derive(Default)]
pub struct Calls {
    pub resolver: AtomicUsize,
    pub fetcher: AtomicUsize,
    pub greeter: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.resolver.load(Ordering::SeqCst)
            + self.fetcher.load(Ordering::SeqCst)
            + self.greeter.load(Ordering::SeqCst)
    }
}

struct FakeResolver(Arc<Calls>);

#[async_trait]
impl HostResolver for FakeResolver {
    async fn lookup(&self, name: &str) -> Result<Vec<IpAddr>, CommandError> {
        self.0.resolver.fetch_add(1, Ordering::SeqCst);
        match name {
            "node.example" => Ok(vec!["192.0.2.7".parse().unwrap()]),
            _ => Err(CommandError::Lookup {
                name: name.to_string(),
                reason: "no addresses".into(),
            }),
        }
    }

    async fn reverse(&self, _ip: IpAddr) -> Result<Option<String>, CommandError> {
        self.0.resolver.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

struct FakeFetcher(Arc<Calls>);

#[async_trait]
impl HttpFetcher for FakeFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>, CommandError> {
        self.0.fetcher.fetch_add(1, Ordering::SeqCst);
        Ok(format!("body of {url}\n").into_bytes())
    }
}

struct FakeGreeter(Arc<Calls>);

#[async_trait]
impl PeerGreeter for FakeGreeter {
    async fn greet(
        &self,
        _host: &PeerHost,
        transcript: &mut Transcript,
    ) -> Result<PeerHello, CommandError> {
        self.0.greeter.fetch_add(1, Ordering::SeqCst);
        transcript.written.extend_from_slice(b"pcp\n");
        Ok(PeerHello {
            remote_id: PeerId([0x11; 16]),
            agent: "fake/1".into(),
        })
    }
}

pub struct Harness {
    pub console: Console,
    pub calls: Arc<Calls>,
    pub log: Arc<LogBuffer>,
}

impl Harness {
    pub fn new() -> Self {
        let calls = Arc::new(Calls::default());
        let log = Arc::new(LogBuffer::new(64));
        let collaborators = Collaborators {
            log_source: log.clone(),
            resolver: Arc::new(FakeResolver(calls.clone())),
            fetcher: Arc::new(FakeFetcher(calls.clone())),
            greeter: Arc::new(FakeGreeter(calls.clone())),
            filters: Arc::new(FilterRegistry::default()),
            channels: Arc::new(ChannelRegistry::default()),
        };
        let mut config = Config::default();
        config.console.poll_interval_ms = Some(5);

        let composition = AppComposition::with_collaborators(config, &collaborators);
        Self {
            console: composition.console().clone(),
            calls,
            log,
        }
    }

    /// 취소 없이 한 줄을 실행하고 출력 줄을 돌려준다.
    pub async fn run(&self, line: &str) -> Vec<String> {
        let mut out = MemorySink::new();
        self.console.dispatch(line, &mut out, &|| false).await;
        out.lines()
    }
}
