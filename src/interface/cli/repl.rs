//! `ctlshell` 대화형 쉘(REPL).
//!
//! 한 줄씩 읽어 콘솔에 넘긴다. 명령 실행 중 Ctrl-C는 그 명령만 취소한다.

use std::io::{self, Write};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::application::console::Console;
use crate::application::ports::CancelFlag;
use crate::infrastructure::adapters::StdoutSink;

const PROMPT: &str = "ctlshell> ";

pub async fn run_repl(console: &Console) -> Result<()> {
    print_welcome(console);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        let Some(line) = line else {
            println!();
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") && !console.contains(input) {
            break;
        }

        run_line(console, input).await;
    }

    Ok(())
}

/// 명령 하나를 stdout으로 실행한다. Ctrl-C나 stdout 쓰기 실패가 취소 플래그를 세운다.
pub async fn run_line(console: &Console, line: &str) {
    let cancel = CancelFlag::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received, cancelling command");
                cancel.cancel();
            }
        })
    };

    let mut out = StdoutSink::new(cancel.clone());
    console.dispatch(line, &mut out, &cancel).await;
    watcher.abort();
}

fn print_welcome(console: &Console) {
    let names: Vec<&str> = console.command_names().collect();
    println!("ctlshell {}", env!("CARGO_PKG_VERSION"));
    println!("commands: {}", names.join(", "));
    println!("Ctrl-C cancels a running command, Ctrl-D exits.");
}
