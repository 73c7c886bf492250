//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::application::commands::{Collaborators, register_builtins};
use crate::application::config::Config;
use crate::application::console::Console;
use crate::domain::filter::ServFilter;
use crate::domain::peer::PeerId;
use crate::infrastructure::adapters::{
    ChannelRegistry, FilterRegistry, ReqwestFetcher, SystemResolver,
};
use crate::infrastructure::logging::LogBuffer;
use crate::infrastructure::peer::PcpGreeter;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config: Config,
    console: Console,
}

impl AppComposition {
    /// 설정과 프로세스 로그 버퍼로 기본 어댑터를 만들어 콘솔을 조립한다.
    pub fn new(config: Config, log_buffer: Arc<LogBuffer>) -> Result<Self> {
        let collaborators = default_collaborators(&config, log_buffer)?;
        Ok(Self::with_collaborators(config, &collaborators))
    }

    /// 포트 구현을 외부에서 주입한다. 임베딩/테스트용.
    pub fn with_collaborators(config: Config, collaborators: &Collaborators) -> Self {
        let console = register_builtins(Console::builder(), collaborators, &config).build();
        Self { config, console }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }
}

fn default_collaborators(config: &Config, log_buffer: Arc<LogBuffer>) -> Result<Collaborators> {
    let fetcher =
        ReqwestFetcher::new(config.http_timeout()).context("failed to build HTTP client")?;

    // 세션 ID는 프로세스마다 새로 만든다.
    let session_id = PeerId(*Uuid::new_v4().as_bytes());

    let filters: Vec<ServFilter> = config
        .filters
        .iter()
        .flatten()
        .map(|spec| spec.to_filter())
        .collect();
    let channels = config.channels.clone().unwrap_or_default();

    Ok(Collaborators {
        log_source: log_buffer,
        resolver: Arc::new(SystemResolver::new(config.dns_timeout())),
        fetcher: Arc::new(fetcher),
        greeter: Arc::new(PcpGreeter::new(
            config.peer_agent(),
            session_id,
            config.peer_timeout(),
        )),
        filters: Arc::new(FilterRegistry::new(filters)),
        channels: Arc::new(ChannelRegistry::new(channels)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::console::MemorySink;

    #[tokio::test]
    async fn seeded_tables_are_visible_through_the_console() {
        let config: Config = serde_json::from_str(
            r#"{
                "filters": [{"pattern": "10.0.0.*", "flags": ["banned", "private"]}],
                "channels": [{"name": "radio", "id": "000102030405060708090A0B0C0D0E0F", "status": "receive"}]
            }"#,
        )
        .unwrap();
        let composition = AppComposition::new(config, Arc::new(LogBuffer::new(16))).unwrap();
        let console = composition.console();

        let mut out = MemorySink::new();
        console.dispatch("filter show", &mut out, &|| true).await;
        console.dispatch("chan", &mut out, &|| true).await;

        assert_eq!(
            out.lines(),
            vec![
                format!("{:<20} {}", "10.0.0.*", "banned private"),
                "radio 000102030405060708090A0B0C0D0E0F RECEIVE".to_string(),
            ]
        );
    }

    #[test]
    fn every_builtin_is_registered() {
        let composition =
            AppComposition::new(Config::default(), Arc::new(LogBuffer::new(16))).unwrap();
        let names: Vec<_> = composition.console().command_names().collect();
        assert_eq!(
            names,
            vec!["chan", "echo", "filter", "get", "helo", "log", "nslookup"]
        );
    }
}
