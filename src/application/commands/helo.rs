//! `helo [-v] HOST`: 피어에 접속해 핸드셰이크만 수행하고 끊는다.

use std::sync::Arc;

use async_trait::async_trait;

use super::subscription::Subscription;
use crate::application::console::CommandHandler;
use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, LogSource, OutputSink, PeerGreeter, Transcript};
use crate::domain::dump::{ascii_dump, hexdump};
use crate::domain::log_record::{LogRecord, Severity};
use crate::domain::options::split_options;
use crate::domain::peer::PeerHost;

pub struct HeloCommand {
    greeter: Arc<dyn PeerGreeter>,
    log_source: Arc<dyn LogSource>,
    default_port: u16,
}

impl HeloCommand {
    pub fn new(
        greeter: Arc<dyn PeerGreeter>,
        log_source: Arc<dyn LogSource>,
        default_port: u16,
    ) -> Self {
        Self {
            greeter,
            log_source,
            default_port,
        }
    }
}

#[async_trait]
impl CommandHandler for HeloCommand {
    fn name(&self) -> &'static str {
        "helo"
    }

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        args: &[String],
        _cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError> {
        let parsed = split_options(args, &["-v"]);
        let [target] = parsed.positionals.as_slice() else {
            out.write_line("Usage: helo [-v] HOST");
            return Ok(());
        };

        let host = PeerHost::parse(target, self.default_port)?;
        out.write_line_fmt(format_args!("HELO {host}"));

        // 핸드셰이크 동안 올라온 경고/오류 로그를 콘솔에도 보여 준다.
        let mut relay = Subscription::start(Arc::clone(&self.log_source), relay_line);
        let mut transcript = Transcript::default();
        let result = self.greeter.greet(&host, &mut transcript).await;
        relay.release();
        relay.drain(out);

        if let Ok(hello) = &result {
            out.write_line_fmt(format_args!("Remote ID: {}", hello.remote_id));
            out.write_line_fmt(format_args!("Remote agent: {}", hello.agent));
            out.write_line("OK");
        }

        // 실패한 경우에도 오류 줄보다 먼저 전송 기록을 남긴다.
        if parsed.has("-v") {
            write_dump(out, "written", &transcript.written);
            write_dump(out, "read", &transcript.read);
        }

        result.map(|_| ())
    }
}

fn relay_line(record: &LogRecord) -> Option<String> {
    let prefix = match record.severity {
        Severity::Error => "Error",
        Severity::Warn => "Warning",
        Severity::Info | Severity::Debug => return None,
    };
    Some(format!("{prefix}: {}\n", record.message))
}

fn write_dump(out: &mut dyn OutputSink, direction: &str, bytes: &[u8]) {
    out.write_line_fmt(format_args!("--- {} bytes {direction}", bytes.len()));
    if !bytes.is_empty() {
        out.write_line(&ascii_dump(bytes));
        out.write_line(&hexdump(bytes));
    }
}
