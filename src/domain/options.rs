//! 토큰을 불리언 플래그와 위치 인자로 나누는 규칙.

use std::collections::BTreeSet;

/// 플래그 분리 결과.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub flags: BTreeSet<String>,
    pub positionals: Vec<String>,
}

impl ParsedArgs {
    pub fn has(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}

/// `known_flags`에 있는 토큰은 플래그로 소비하고 나머지는 순서대로 위치 인자로 남긴다.
/// `--` 이후 토큰은 플래그 검사 없이 그대로 위치 인자가 된다.
pub fn split_options(args: &[String], known_flags: &[&str]) -> ParsedArgs {
    let mut parsed = ParsedArgs::default();

    for (idx, arg) in args.iter().enumerate() {
        if arg == "--" {
            parsed.positionals.extend(args[idx + 1..].iter().cloned());
            break;
        }
        if known_flags.contains(&arg.as_str()) {
            parsed.flags.insert(arg.clone());
        } else {
            parsed.positionals.push(arg.clone());
        }
    }

    parsed
}
