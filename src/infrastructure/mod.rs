//! Infrastructure layer
//! 외부 시스템(네트워크/파일시스템/tracing)과 직접 통신하는 구현체 집합.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod peer;
