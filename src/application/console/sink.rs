//! 메모리에 출력을 모으는 sink. 임베딩/테스트용.

use crate::application::ports::OutputSink;

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Vec<u8>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    /// 줄 단위로 나눈 출력. 마지막 줄바꿈 뒤의 빈 줄은 포함하지 않는다.
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(ToString::to_string).collect()
    }
}

impl OutputSink for MemorySink {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}
