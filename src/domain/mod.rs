//! Domain layer
//! 명령줄 문법과 콘솔이 다루는 값 객체를 외부 의존성 없이 표현한다.

pub mod channel;
pub mod dump;
pub mod filter;
pub mod log_record;
pub mod options;
pub mod peer;
pub mod tokenizer;
