//! 모든 콘솔 명령이 따르는 핸들러 계약.

use async_trait::async_trait;

use crate::application::error::CommandError;
use crate::application::ports::{CancelPredicate, OutputSink};

/// 이름 하나에 묶이는 상태 없는 명령 구현.
///
/// - 출력은 쓴 순서대로 호출자에게 전달된다.
/// - 오래 실행되는 핸들러는 `cancel`을 주기적으로 확인하고, 참이 되면 한 주기 안에 반환한다.
/// - 인자 개수/형식 오류는 usage 줄을 직접 쓰고 `Ok(())`로 끝낸다.
/// - 조회 실패나 I/O 오류처럼 예외적인 상황만 `Err`로 올린다.
/// - 획득한 자원은 어떤 경로로 끝나든 해제한다.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        out: &mut dyn OutputSink,
        args: &[String],
        cancel: &dyn CancelPredicate,
    ) -> Result<(), CommandError>;
}
