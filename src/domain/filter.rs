//! 접속 필터 테이블 항목.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FilterFlags: u32 {
        const BAN = 0x01;
        const NETWORK = 0x02;
        const DIRECT = 0x04;
        const PRIVATE = 0x08;
    }
}

// 출력 순서가 곧 라벨 순서다.
const LABELS: [(FilterFlags, &str); 4] = [
    (FilterFlags::BAN, "banned"),
    (FilterFlags::NETWORK, "network"),
    (FilterFlags::DIRECT, "direct"),
    (FilterFlags::PRIVATE, "private"),
];

impl FilterFlags {
    pub fn labels(self) -> Vec<&'static str> {
        LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect()
    }

    /// 설정 파일의 라벨(`banned`, `ban`, `network`, ...)을 플래그로 해석한다.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "ban" | "banned" => Some(FilterFlags::BAN),
            "network" => Some(FilterFlags::NETWORK),
            "direct" => Some(FilterFlags::DIRECT),
            "private" => Some(FilterFlags::PRIVATE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServFilter {
    pub pattern: String,
    pub flags: FilterFlags,
}

impl ServFilter {
    pub fn render_line(&self) -> String {
        format!("{:<20} {}", self.pattern, self.flags.labels().join(" "))
    }
}

/// 설정 파일에서 읽는 필터 표현.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterSpec {
    pub pattern: String,
    #[serde(default)]
    pub flags: Vec<String>,
}

impl FilterSpec {
    /// 알 수 없는 라벨은 무시한다.
    pub fn to_filter(&self) -> ServFilter {
        let flags = self
            .flags
            .iter()
            .filter_map(|label| FilterFlags::from_label(label))
            .fold(FilterFlags::empty(), |acc, flag| acc | flag);
        ServFilter {
            pattern: self.pattern.clone(),
            flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_pads_pattern_and_lists_labels_in_fixed_order() {
        let filter = ServFilter {
            pattern: "192.168.0.*".to_string(),
            flags: FilterFlags::PRIVATE | FilterFlags::BAN | FilterFlags::DIRECT,
        };
        assert_eq!(filter.render_line(), "192.168.0.*          banned direct private");
    }

    #[test]
    fn spec_labels_are_case_insensitive_and_unknown_ones_are_dropped() {
        let spec = FilterSpec {
            pattern: "*".to_string(),
            flags: vec!["Network".into(), "bogus".into(), "ban".into()],
        };
        assert_eq!(spec.to_filter().flags, FilterFlags::NETWORK | FilterFlags::BAN);
    }
}
