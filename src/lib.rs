//! ctlshell library root.
//! 실행 중인 노드에 붙는 대화형 명령 콘솔. 계층을 외부에 노출한다.

use std::sync::Arc;

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::console::{Console, MemorySink};
use infrastructure::config::Config;
use infrastructure::logging::LogBuffer;
use interface::composition::AppComposition;

/// 병합된 설정으로 기본 콘솔을 조립한다.
pub fn build_console(log_buffer: Arc<LogBuffer>) -> Result<Console> {
    let composition = AppComposition::new(Config::load()?, log_buffer)?;
    Ok(composition.console().clone())
}

/// 명령줄 하나를 취소 없이 실행하고 출력을 문자열로 돌려준다.
pub async fn run_line(console: &Console, line: &str) -> String {
    let mut out = MemorySink::new();
    console.dispatch(line, &mut out, &|| false).await;
    out.text()
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    Config::inspect_pretty_json()
}
