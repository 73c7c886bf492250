//! reqwest 기반 HTTP GET 어댑터.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use url::Url;

use crate::application::error::CommandError;
use crate::application::ports::HttpFetcher;

pub struct ReqwestFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ctlshell/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>, CommandError> {
        let parsed = parse_http_url(url)?;

        let map_err = |err: reqwest::Error| {
            if err.is_timeout() {
                CommandError::timeout(format!("GET {url}"), self.timeout)
            } else {
                CommandError::Http(err.to_string())
            }
        };

        let resp = self.client.get(parsed).send().await.map_err(map_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CommandError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(map_err)?;
        Ok(body.to_vec())
    }
}

fn parse_http_url(url: &str) -> Result<Url, CommandError> {
    let invalid = |reason: String| CommandError::InvalidUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
