//! 피어 식별자와 접속 대상 주소.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// 16바이트 피어/채널 식별자. 대문자 hex 32자로 표시한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PeerId(pub [u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid id '{0}': expected 32 hex digits")]
pub struct InvalidPeerId(String);

impl PeerId {
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl FromStr for PeerId {
    type Err = InvalidPeerId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.len() != 32 || !raw.is_ascii() {
            return Err(InvalidPeerId(s.to_string()));
        }

        let mut bytes = [0u8; 16];
        for (idx, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&raw[idx * 2..idx * 2 + 2], 16)
                .map_err(|_| InvalidPeerId(s.to_string()))?;
        }
        Ok(PeerId(bytes))
    }
}

impl Serialize for PeerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// `helo` 대상 주소(`host[:port]`, IPv6는 `[addr]:port`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerHost {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid host '{0}'")]
pub struct InvalidHost(pub String);

impl PeerHost {
    /// 포트가 없으면 `default_port`를 사용한다.
    pub fn parse(input: &str, default_port: u16) -> Result<Self, InvalidHost> {
        let raw = input.trim();
        let invalid = || InvalidHost(input.to_string());

        if let Some(rest) = raw.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
            let port = match tail {
                "" => default_port,
                _ => parse_port(tail.strip_prefix(':').ok_or_else(invalid)?).ok_or_else(invalid)?,
            };
            if host.is_empty() {
                return Err(invalid());
            }
            return Ok(Self {
                host: host.to_string(),
                port,
            });
        }

        // 콜론이 두 개 이상이면 괄호 없는 IPv6 주소로 본다.
        let (host, port) = match raw.split_once(':') {
            Some((host, port)) if !port.contains(':') => {
                (host, parse_port(port).ok_or_else(invalid)?)
            }
            _ => (raw, default_port),
        };

        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(invalid());
        }
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.parse::<u16>().ok().filter(|port| *port != 0)
}

impl fmt::Display for PeerHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
