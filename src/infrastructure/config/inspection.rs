//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::{LoadedConfig, default_socket_path};
use crate::application::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub config: Config,
    pub effective: EffectiveSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub poll_interval_ms: u128,
    pub socket_path: String,
    pub http_timeout_ms: u128,
    pub dns_timeout_ms: u128,
    pub peer_default_port: u16,
    pub peer_timeout_ms: u128,
    pub peer_agent: String,
    pub log_capacity: usize,
    pub filter_count: usize,
    pub channel_count: usize,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let cfg = &loaded.config;
        let effective = EffectiveSettings {
            poll_interval_ms: cfg.poll_interval().as_millis(),
            socket_path: cfg
                .server
                .socket_path
                .clone()
                .unwrap_or_else(default_socket_path)
                .display()
                .to_string(),
            http_timeout_ms: cfg.http_timeout().as_millis(),
            dns_timeout_ms: cfg.dns_timeout().as_millis(),
            peer_default_port: cfg.peer_default_port(),
            peer_timeout_ms: cfg.peer_timeout().as_millis(),
            peer_agent: cfg.peer_agent(),
            log_capacity: cfg.log_capacity(),
            filter_count: cfg.filters.as_ref().map_or(0, Vec::len),
            channel_count: cfg.channels.as_ref().map_or(0, Vec::len),
        };

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            config: loaded.config,
            effective,
        }
    }
}
