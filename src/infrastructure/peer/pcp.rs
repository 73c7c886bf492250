//! TCP 위에서 PCP 핸드셰이크(`pcp\n` -> `helo` -> `oleh` -> `quit`)를 수행하는 어댑터.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use super::atom::{self, Atom, read_atom};
use crate::application::error::CommandError;
use crate::application::ports::{PeerGreeter, PeerHello, Transcript};
use crate::domain::peer::{PeerHost, PeerId};

pub const PCP_CONNECT: atom::AtomId = *b"pcp\n";
pub const HELO: atom::AtomId = *b"helo";
pub const OLEH: atom::AtomId = *b"oleh";
pub const QUIT: atom::AtomId = *b"quit";
pub const AGENT: atom::AtomId = *b"agnt";
pub const VERSION: atom::AtomId = *b"ver\0";
pub const SESSION_ID: atom::AtomId = *b"sid\0";

pub const PCP_CONNECT_VERSION: u32 = 1;
pub const PCP_CLIENT_VERSION: u32 = 1218;
pub const PCP_ERROR_QUIT: u32 = 1000;

pub struct PcpGreeter {
    agent: String,
    session_id: PeerId,
    timeout: Duration,
}

impl PcpGreeter {
    pub fn new(agent: String, session_id: PeerId, timeout: Duration) -> Self {
        Self {
            agent,
            session_id,
            timeout,
        }
    }

    fn hello_atoms(&self) -> [Atom; 2] {
        [
            Atom::int(PCP_CONNECT, PCP_CONNECT_VERSION),
            Atom::parent(
                HELO,
                vec![
                    Atom::string(AGENT, &self.agent),
                    Atom::int(VERSION, PCP_CLIENT_VERSION),
                    Atom::bytes(SESSION_ID, self.session_id.as_bytes()),
                ],
            ),
        ]
    }

    async fn limit<T, F>(&self, what: String, fut: F) -> Result<T, CommandError>
    where
        F: Future<Output = std::io::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CommandError::timeout(what, self.timeout)),
        }
    }
}

#[async_trait]
impl PeerGreeter for PcpGreeter {
    async fn greet(
        &self,
        host: &PeerHost,
        transcript: &mut Transcript,
    ) -> Result<PeerHello, CommandError> {
        let mut stream = self
            .limit(
                format!("connect to {host}"),
                TcpStream::connect((host.host.as_str(), host.port)),
            )
            .await?;
        debug!(%host, "peer connected");

        for atom in self.hello_atoms() {
            send(&mut stream, &atom, transcript, self.timeout).await?;
        }

        let reply = self
            .limit(
                format!("reply from {host}"),
                read_atom(&mut stream, &mut transcript.read),
            )
            .await?;

        let outcome = interpret_reply(&reply);
        if let Err(err) = &outcome {
            warn!(%host, error = %err, "peer rejected handshake");
        }

        // 결과와 관계없이 정중하게 끊는다. 상대가 이미 닫았을 수 있으므로 실패는 무시한다.
        let quit = Atom::int(QUIT, PCP_ERROR_QUIT);
        if let Err(err) = send(&mut stream, &quit, transcript, self.timeout).await {
            warn!(%host, error = %err, "failed to send quit");
        }
        let _ = stream.shutdown().await;

        outcome
    }
}

async fn send<W>(
    writer: &mut W,
    atom: &Atom,
    transcript: &mut Transcript,
    timeout: Duration,
) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    atom.encode(&mut buf);
    transcript.written.extend_from_slice(&buf);

    match tokio::time::timeout(timeout, writer.write_all(&buf)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(CommandError::timeout(
            format!("sending '{}'", atom::display_id(atom.id())),
            timeout,
        )),
    }
}

fn interpret_reply(reply: &Atom) -> Result<PeerHello, CommandError> {
    match reply.id() {
        OLEH => {
            let remote_id = reply
                .child(SESSION_ID)
                .and_then(Atom::data)
                .and_then(|data| <[u8; 16]>::try_from(data).ok())
                .map(PeerId)
                .ok_or_else(|| CommandError::protocol("'oleh' without session id"))?;
            let agent = reply
                .child(AGENT)
                .and_then(Atom::as_text)
                .unwrap_or_default();
            Ok(PeerHello { remote_id, agent })
        }
        QUIT => {
            let code = reply.as_int().unwrap_or_default();
            Err(CommandError::protocol(format!("remote quit ({code})")))
        }
        other => Err(CommandError::protocol(format!(
            "unexpected '{}' atom",
            atom::display_id(other)
        ))),
    }
}
