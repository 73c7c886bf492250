//! 기본 콘솔 명령 모음과 등록 함수.
//!
//! 새 명령은 `CommandHandler`를 구현하고 `register_builtins`에 한 줄 추가하면 된다.

mod chan;
mod echo;
mod filter;
mod get;
mod helo;
mod log;
mod nslookup;
mod subscription;

use std::sync::Arc;

use crate::application::config::Config;
use crate::application::console::ConsoleBuilder;
use crate::application::ports::{
    ChannelDirectory, FilterTable, HostResolver, HttpFetcher, LogSource, PeerGreeter,
};

pub use chan::ChanCommand;
pub use echo::EchoCommand;
pub use filter::FilterCommand;
pub use get::GetCommand;
pub use helo::HeloCommand;
pub use log::LogCommand;
pub use nslookup::NslookupCommand;

/// 기본 명령들이 호출하는 호스트 서비스 묶음.
#[derive(Clone)]
pub struct Collaborators {
    pub log_source: Arc<dyn LogSource>,
    pub resolver: Arc<dyn HostResolver>,
    pub fetcher: Arc<dyn HttpFetcher>,
    pub greeter: Arc<dyn PeerGreeter>,
    pub filters: Arc<dyn FilterTable>,
    pub channels: Arc<dyn ChannelDirectory>,
}

/// `log`, `nslookup`, `helo`, `filter`, `get`, `chan`, `echo`를 등록한다.
pub fn register_builtins(
    builder: ConsoleBuilder,
    collaborators: &Collaborators,
    config: &Config,
) -> ConsoleBuilder {
    builder
        .register(LogCommand::new(
            Arc::clone(&collaborators.log_source),
            config.poll_interval(),
        ))
        .register(NslookupCommand::new(Arc::clone(&collaborators.resolver)))
        .register(HeloCommand::new(
            Arc::clone(&collaborators.greeter),
            Arc::clone(&collaborators.log_source),
            config.peer_default_port(),
        ))
        .register(FilterCommand::new(Arc::clone(&collaborators.filters)))
        .register(GetCommand::new(Arc::clone(&collaborators.fetcher)))
        .register(ChanCommand::new(Arc::clone(&collaborators.channels)))
        .register(EchoCommand)
}
