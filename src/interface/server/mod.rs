//! 제어 소켓 서버.
//!
//! 한 줄이 명령 하나이고, 명령 출력은 그대로 되돌려 보낸다.
//! 연결마다 세션 하나가 독립적으로 돌고, 세션 안에서는 한 번에 한 명령만 실행한다.

mod session;
mod unix;

pub use unix::ControlServer;

/// 한 명령줄의 최대 길이(바이트, 줄바꿈 제외).
pub const MAX_LINE_LENGTH: usize = 64 * 1024;
