//! 로그 수집: 프로세스 로그를 메모리에 보관하고 `log` 명령에 전달한다.

mod buffer;
mod layer;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use buffer::LogBuffer;
pub use layer::LogBufferLayer;

/// stderr 출력 + 로그 버퍼 layer로 전역 subscriber를 설치한다.
/// `RUST_LOG`가 없으면 `info` 수준을 사용한다.
pub fn init_tracing(buffer: Arc<LogBuffer>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(LogBufferLayer::new(buffer))
        .init();
}
