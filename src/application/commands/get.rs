//! `get URL`: 응답 본문을 그대로 출력한다.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::console::CommandHandler;
use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, HttpFetcher, OutputSink};

pub struct GetCommand {
    fetcher: Arc<dyn HttpFetcher>,
}

impl GetCommand {
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl CommandHandler for GetCommand {
    fn name(&self) -> &'static str {
        "get"
    }

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        args: &[String],
        _cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError> {
        let [url] = args else {
            out.write_line("Usage: get URL");
            return Ok(());
        };

        let body = self.fetcher.get(url).await?;
        out.write_bytes(&body);
        Ok(())
    }
}
