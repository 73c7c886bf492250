//! 핸들러가 디스패처로 올려 보내는 도메인 오류.
//!
//! 여기 정의된 오류만 `Error: <message>` 한 줄로 렌더링된다.
//! 패닉은 모델링된 오류가 아니므로 디스패처가 잡지 않는다.

use std::time::Duration;

use thiserror::Error;

use crate::domain::peer::InvalidHost;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("'{0}' not found")]
    NotFound(String),

    #[error("'{name}' not found: {reason}")]
    Lookup { name: String, reason: String },

    #[error(transparent)]
    InvalidHost(#[from] InvalidHost),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("{what} timed out after {}ms", .after.as_millis())]
    Timeout { what: String, after: Duration },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CommandError {
    pub fn timeout(what: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            what: what.into(),
            after,
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_single_line_and_human_readable() {
        let err = CommandError::Lookup {
            name: "nowhere.invalid".into(),
            reason: "no addresses".into(),
        };
        assert_eq!(err.to_string(), "'nowhere.invalid' not found: no addresses");

        let err = CommandError::timeout("connect to 10.0.0.1:7144", Duration::from_millis(1500));
        assert_eq!(err.to_string(), "connect to 10.0.0.1:7144 timed out after 1500ms");

        let err: CommandError = InvalidHost("a b".into()).into();
        assert_eq!(err.to_string(), "invalid host 'a b'");
    }
}
