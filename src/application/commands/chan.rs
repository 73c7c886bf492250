//! `chan`: 채널 테이블 스냅샷을 한 줄씩 출력한다.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::console::CommandHandler;
use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, ChannelDirectory, OutputSink};

pub struct ChanCommand {
    channels: Arc<dyn ChannelDirectory>,
}

impl ChanCommand {
    pub fn new(channels: Arc<dyn ChannelDirectory>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl CommandHandler for ChanCommand {
    fn name(&self) -> &'static str {
        "chan"
    }

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        _args: &[String],
        _cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError> {
        for entry in self.channels.snapshot() {
            out.write_line(&entry.render_line());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::console::MemorySink;
    use crate::domain::channel::{ChannelEntry, ChannelStatus};
    use crate::domain::peer::PeerId;

    struct Fixed(Vec<ChannelEntry>);

    impl ChannelDirectory for Fixed {
        fn snapshot(&self) -> Vec<ChannelEntry> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn empty_table_prints_nothing() {
        let command = ChanCommand::new(Arc::new(Fixed(Vec::new())));
        let mut sink = MemorySink::new();
        command.run(&mut sink, &[], &|| false).await.unwrap();
        assert!(sink.as_bytes().is_empty());
    }

    #[tokio::test]
    async fn prints_name_id_and_status() {
        let command = ChanCommand::new(Arc::new(Fixed(vec![ChannelEntry {
            name: "radio".into(),
            id: PeerId([0xAB; 16]),
            status: ChannelStatus::Receive,
        }])));
        let mut sink = MemorySink::new();
        command.run(&mut sink, &[], &|| false).await.unwrap();
        assert_eq!(
            sink.lines(),
            vec![format!("radio {} RECEIVE", "AB".repeat(16))]
        );
    }
}
