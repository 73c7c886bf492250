//! 명령줄 문자열을 단어 토큰 목록으로 분해하는 토크나이저.
//!
//! 규칙:
//! - 따옴표 밖의 공백은 토큰을 끝내고, 연속 공백은 빈 토큰을 만들지 않는다.
//! - `"`로 시작한 구간 안에서는 `\`가 다음 한 글자를 그대로 취한다.
//! - 닫는 `"`는 항상 현재 토큰을 내보낸다. 따라서 `a"b"c`는 `["ab", "c"]`가 된다.
//! - `""`는 빈 토큰 하나를 만든다.

use thiserror::Error;

/// 따옴표/이스케이프가 닫히지 않은 명령줄.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("Premature end of quoted string")]
    PrematureEndOfQuotedString,
    #[error("Premature end of escaped character")]
    PrematureEndOfEscape,
}

/// 명령줄을 토큰 목록으로 변환한다. 실패 시 부분 결과는 돌려주지 않는다.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            ' ' => {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            '"' => {
                loop {
                    match chars.next() {
                        None => return Err(TokenizeError::PrematureEndOfQuotedString),
                        Some('\\') => match chars.next() {
                            None => return Err(TokenizeError::PrematureEndOfEscape),
                            Some(escaped) => word.push(escaped),
                        },
                        Some('"') => break,
                        Some(other) => word.push(other),
                    }
                }
                words.push(std::mem::take(&mut word));
            }
            other => word.push(other),
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    Ok(words)
}
