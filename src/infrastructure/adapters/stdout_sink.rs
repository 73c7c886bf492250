//! 표준 출력 sink. REPL/`exec`에서 사용한다.
//!
//! 쓰기가 실패하면(예: 파이프 상대가 먼저 종료) 명령의 취소 플래그를 세운다.

use std::io::{self, Write};

use tracing::debug;

use crate::application::ports::{CancelFlag, OutputSink};

pub struct StdoutSink<W = io::Stdout> {
    out: W,
    cancel: CancelFlag,
}

impl StdoutSink {
    pub fn new(cancel: CancelFlag) -> Self {
        Self::with_writer(io::stdout(), cancel)
    }
}

impl<W: Write + Send> StdoutSink<W> {
    pub fn with_writer(out: W, cancel: CancelFlag) -> Self {
        Self { out, cancel }
    }
}

impl<W: Write + Send> OutputSink for StdoutSink<W> {
    fn write_bytes(&mut self, bytes: &[u8]) {
        let result = self.out.write_all(bytes).and_then(|()| self.out.flush());
        if let Err(err) = result {
            debug!(error = %err, "stdout write failed, cancelling command");
            self.cancel.cancel();
        }
    }
}
