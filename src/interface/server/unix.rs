//! Unix 도메인 소켓 제어 서버.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::net::UnixListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::session::run_session;
use crate::application::console::Console;

pub struct ControlServer {
    listener: UnixListener,
    socket_path: PathBuf,
}

impl ControlServer {
    /// 소켓 파일을 만들고 listen을 시작한다. 남아 있던 소켓 파일은 지운다.
    pub fn bind(socket_path: &Path) -> Result<Self> {
        if let Some(parent) = socket_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create socket dir: {}", parent.display())
            })?;
        }

        remove_stale(socket_path)?;

        let listener = UnixListener::bind(socket_path).with_context(|| {
            format!("failed to bind unix socket at {}", socket_path.display())
        })?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// `shutdown`이 참이 될 때까지 연결을 받는다. 연결마다 세션 태스크 하나.
    pub async fn run(self, console: Console, shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(path = %self.socket_path.display(), "control socket listening");
        let mut stop = shutdown.clone();

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, _addr)) => {
                        debug!("control connection accepted");
                        let (reader, writer) = stream.into_split();
                        tokio::spawn(run_session(
                            reader,
                            writer,
                            console.clone(),
                            shutdown.clone(),
                        ));
                    }
                    Err(err) => warn!(error = %err, "control socket accept failed"),
                },
                _ = stop.wait_for(|&v| v) => {
                    info!("control socket shutting down");
                    break;
                }
            }
        }

        drop(self.listener);
        remove_stale(&self.socket_path)
    }
}

fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err)
            .with_context(|| format!("failed to remove stale socket: {}", path.display())),
    }
}
