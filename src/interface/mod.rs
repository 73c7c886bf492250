//! Interface layer
//! CLI/REPL, 제어 소켓, 조립 루트를 제공한다.

pub mod cli;
pub mod composition;
#[cfg(unix)]
pub mod server;
