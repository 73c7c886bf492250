//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod channel_registry;
mod filter_registry;
mod http_fetcher;
mod stdout_sink;
mod system_resolver;

pub use channel_registry::ChannelRegistry;
pub use filter_registry::FilterRegistry;
pub use http_fetcher::ReqwestFetcher;
pub use stdout_sink::StdoutSink;
pub use system_resolver::SystemResolver;
