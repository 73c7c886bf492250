//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ctlshell")]
#[command(version, about = "Interactive command console for a running node")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a single command line and exit
    Exec {
        /// Command line, tokenized like console input (quote it in your shell)
        line: String,
    },
    /// Serve the console over a Unix domain socket
    Serve {
        /// Socket path (defaults to server.socket_path or the runtime dir)
        #[arg(long)]
        socket: Option<PathBuf>,
    },
    /// Show effective merged config and searched paths
    Config,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Interactive,
    Exec(String),
    Serve { socket: Option<PathBuf> },
    InspectConfig,
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            None => CliAction::Interactive,
            Some(Commands::Exec { line }) => CliAction::Exec(line),
            Some(Commands::Serve { socket }) => CliAction::Serve { socket },
            Some(Commands::Config) => CliAction::InspectConfig,
        }
    }
}
