//! 연결 하나에 대응하는 콘솔 세션.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::debug;

use super::MAX_LINE_LENGTH;
use crate::application::console::Console;
use crate::application::ports::{CancelPredicate, OutputSink};

enum Input {
    Line(String),
    TooLong,
}

/// 상대가 읽기를 닫았거나, 쓰기가 실패했거나, 서버가 종료 중이면 참.
struct SessionCancel {
    closed: Arc<AtomicBool>,
    shutdown: watch::Receiver<bool>,
}

impl CancelPredicate for SessionCancel {
    fn is_cancelled(&self) -> bool {
        self.closed.load(Ordering::SeqCst) || *self.shutdown.borrow()
    }
}

/// writer 태스크가 아직 소켓에 쓰지 못한 출력의 상한(바이트).
/// 대기 중인 출력이 없을 때는 이보다 큰 청크 하나도 받아들인다.
pub(super) const MAX_PENDING_OUTPUT: usize = 1024 * 1024;
const OUTPUT_QUEUE_CHUNKS: usize = 1024;

/// sink와 writer 태스크가 공유하는 출력 큐 상태.
#[derive(Default)]
struct Outbox {
    pending: AtomicUsize,
    overflowed: AtomicBool,
}

/// writer 태스크로 바이트를 넘기는 sink. 핸들러 쪽에서는 절대 막히지 않는다.
///
/// 상대가 읽지 않아 큐가 상한을 넘으면 청크를 버리고 세션을 취소 상태로 만든다.
struct ChannelSink {
    tx: mpsc::Sender<Vec<u8>>,
    outbox: Arc<Outbox>,
    closed: Arc<AtomicBool>,
}

impl ChannelSink {
    fn overflow(&self) {
        if !self.outbox.overflowed.swap(true, Ordering::SeqCst) {
            debug!("control session output stalled, cancelling");
        }
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl OutputSink for ChannelSink {
    fn write_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() || self.outbox.overflowed.load(Ordering::SeqCst) {
            return;
        }

        let queued = self.outbox.pending.load(Ordering::SeqCst);
        if queued > 0 && queued + bytes.len() > MAX_PENDING_OUTPUT {
            self.overflow();
            return;
        }

        self.outbox.pending.fetch_add(bytes.len(), Ordering::SeqCst);
        match self.tx.try_send(bytes.to_vec()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.outbox.pending.fetch_sub(bytes.len(), Ordering::SeqCst);
                self.overflow();
            }
            // writer가 이미 끝났다면 세션은 취소 상태다.
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.outbox.pending.fetch_sub(bytes.len(), Ordering::SeqCst);
                self.closed.store(true, Ordering::SeqCst);
            }
        }
    }
}

pub(super) async fn run_session<R, W>(
    reader: R,
    writer: W,
    console: Console,
    shutdown: watch::Receiver<bool>,
) where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let closed = Arc::new(AtomicBool::new(false));
    let (input_tx, mut input_rx) = mpsc::channel(8);
    let (output_tx, output_rx) = mpsc::channel(OUTPUT_QUEUE_CHUNKS);
    let outbox = Arc::new(Outbox::default());

    let reader_task = tokio::spawn(read_lines(reader, input_tx, Arc::clone(&closed)));
    let writer_task = tokio::spawn(write_output(
        writer,
        output_rx,
        Arc::clone(&outbox),
        Arc::clone(&closed),
    ));

    let cancel = SessionCancel {
        closed: Arc::clone(&closed),
        shutdown: shutdown.clone(),
    };
    let mut sink = ChannelSink {
        tx: output_tx,
        outbox: Arc::clone(&outbox),
        closed: Arc::clone(&closed),
    };
    let mut shutdown = shutdown;

    loop {
        let input = tokio::select! {
            input = input_rx.recv() => input,
            _ = shutdown.wait_for(|&v| v) => None,
        };
        let Some(input) = input else {
            break;
        };

        match input {
            Input::Line(line) => console.dispatch(&line, &mut sink, &cancel).await,
            Input::TooLong => {
                sink.write_line("Error: command too long");
                break;
            }
        }

        if closed.load(Ordering::SeqCst) && input_rx.is_empty() {
            break;
        }
    }

    reader_task.abort();
    drop(sink);
    // 읽지 않는 상대에게 남은 출력을 밀어 넣느라 세션이 멈추지 않게 한다.
    if outbox.overflowed.load(Ordering::SeqCst) {
        writer_task.abort();
    }
    let _ = writer_task.await;
    debug!("control session ended");
}

async fn read_lines<R>(reader: R, tx: mpsc::Sender<Input>, closed: Arc<AtomicBool>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let limit = MAX_LINE_LENGTH as u64 + 1;
        let read = (&mut reader).take(limit).read_until(b'\n', &mut buf).await;

        let input = match read {
            Ok(0) => break,
            Ok(_) => match buf.strip_suffix(b"\n") {
                Some(line) => Input::Line(decode_line(line)),
                None if buf.len() > MAX_LINE_LENGTH => Input::TooLong,
                // EOF 직전의 줄바꿈 없는 마지막 줄
                None => Input::Line(decode_line(&buf)),
            },
            Err(err) => {
                debug!(error = %err, "control session read failed");
                break;
            }
        };

        let stop = matches!(input, Input::TooLong);
        if tx.send(input).await.is_err() || stop {
            break;
        }
    }

    closed.store(true, Ordering::SeqCst);
}

fn decode_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

async fn write_output<W>(
    mut writer: W,
    mut rx: mpsc::Receiver<Vec<u8>>,
    outbox: Arc<Outbox>,
    closed: Arc<AtomicBool>,
) where
    W: AsyncWrite + Unpin,
{
    while let Some(bytes) = rx.recv().await {
        let result = async {
            writer.write_all(&bytes).await?;
            writer.flush().await
        }
        .await;
        outbox.pending.fetch_sub(bytes.len(), Ordering::SeqCst);

        if let Err(err) = result {
            debug!(error = %err, "control session write failed");
            closed.store(true, Ordering::SeqCst);
            return;
        }
    }
    let _ = writer.shutdown().await;
}
