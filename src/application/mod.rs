//! Application layer
//! 콘솔 런타임(핸들러 계약, 디스패치 테이블)과 기본 명령을 정의하고
//! 포트(추상 인터페이스)를 통해 인프라를 사용한다.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod ports;
