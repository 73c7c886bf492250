//! 로그 버퍼가 보관/전파하는 로그 레코드.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// unix epoch 초
    pub timestamp: u64,
    pub severity: Severity,
    pub message: String,
}

impl LogRecord {
    /// `log` 명령이 내보내는 한 덩어리(`[SEVERITY] message\n`).
    pub fn render_chunk(&self) -> String {
        format!("[{}] {}\n", self.severity, self.message)
    }
}
