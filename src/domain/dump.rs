//! 바이트 열을 사람이 읽을 수 있는 형태로 덤프한다. (`helo -v` 전송 기록용)

const BYTES_PER_LINE: usize = 16;

/// 출력 가능한 ASCII는 그대로, 나머지는 `.`으로 바꾼다.
pub fn ascii_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
        .collect()
}

/// `offset  hex...  |ascii|` 형식의 16바이트 단위 hex 덤프.
pub fn hexdump(bytes: &[u8]) -> String {
    let mut lines = Vec::new();
    for (idx, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        lines.push(format!(
            "{:08x}  {:<width$}  |{}|",
            idx * BYTES_PER_LINE,
            hex.join(" "),
            ascii_dump(chunk),
            width = BYTES_PER_LINE * 3 - 1
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_dump_masks_control_bytes() {
        assert_eq!(ascii_dump(b"pcp\n\x01\x00\x00\x00"), "pcp.....");
    }

    #[test]
    fn hexdump_pads_short_last_line() {
        let dump = hexdump(b"0123456789abcdefXY");
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "00000000  30 31 32 33 34 35 36 37 38 39 61 62 63 64 65 66  |0123456789abcdef|"
        );
        assert!(lines[1].starts_with("00000010  58 59 "));
        assert!(lines[1].ends_with("  |XY|"));
        assert_eq!(lines[0].len(), lines[1].len() + 14);
    }

    #[test]
    fn empty_input_dumps_nothing() {
        assert_eq!(hexdump(b""), "");
    }
}
