//! `ctlshell` 바이너리 진입점.

use std::sync::Arc;

use anyhow::Result;
use ctlshell::infrastructure::config::Config;
use ctlshell::infrastructure::logging::{LogBuffer, init_tracing};
use ctlshell::interface::cli::{Cli, CliAction, run_line, run_repl};
use ctlshell::interface::composition::AppComposition;

#[tokio::main]
async fn main() {
    let action = Cli::parse_action();

    if let Err(err) = run(action).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(action: CliAction) -> Result<()> {
    if action == CliAction::InspectConfig {
        println!("{}", Config::inspect_pretty_json()?);
        return Ok(());
    }

    let config = Config::load()?;
    let log_buffer = Arc::new(LogBuffer::new(config.log_capacity()));
    init_tracing(Arc::clone(&log_buffer));

    let composition = AppComposition::new(config, log_buffer)?;
    let console = composition.console();

    match action {
        CliAction::Interactive => run_repl(console).await,
        CliAction::Exec(line) => {
            run_line(console, &line).await;
            Ok(())
        }
        CliAction::Serve { socket } => serve(&composition, socket).await,
        CliAction::InspectConfig => Ok(()),
    }
}

#[cfg(unix)]
async fn serve(composition: &AppComposition, socket: Option<std::path::PathBuf>) -> Result<()> {
    use ctlshell::interface::server::ControlServer;

    let path = socket.unwrap_or_else(|| composition.config().socket_path());
    let server = ControlServer::bind(&path)?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    server.run(composition.console().clone(), shutdown_rx).await
}

#[cfg(not(unix))]
async fn serve(_composition: &AppComposition, _socket: Option<std::path::PathBuf>) -> Result<()> {
    anyhow::bail!("control socket is only available on Unix")
}
