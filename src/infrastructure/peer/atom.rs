//! PCP atom 인코더/디코더.
//!
//! atom = 4바이트 id + 4바이트 little-endian 길이 + 데이터.
//! 길이의 최상위 비트가 켜져 있으면 부모 atom이고, 나머지 비트는 자식 개수다.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

pub type AtomId = [u8; 4];

const PARENT_BIT: u32 = 0x8000_0000;
const MAX_DATA_LEN: u32 = 1024 * 1024;
const MAX_CHILDREN: u32 = 1024;
const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Leaf { id: AtomId, data: Vec<u8> },
    Parent { id: AtomId, children: Vec<Atom> },
}

impl Atom {
    pub fn int(id: AtomId, value: u32) -> Self {
        Atom::Leaf {
            id,
            data: value.to_le_bytes().to_vec(),
        }
    }

    pub fn bytes(id: AtomId, data: &[u8]) -> Self {
        Atom::Leaf {
            id,
            data: data.to_vec(),
        }
    }

    /// NUL 종료 문자열 atom.
    pub fn string(id: AtomId, value: &str) -> Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        Atom::Leaf { id, data }
    }

    pub fn parent(id: AtomId, children: Vec<Atom>) -> Self {
        Atom::Parent { id, children }
    }

    pub fn id(&self) -> AtomId {
        match self {
            Atom::Leaf { id, .. } | Atom::Parent { id, .. } => *id,
        }
    }

    pub fn child(&self, id: AtomId) -> Option<&Atom> {
        match self {
            Atom::Parent { children, .. } => children.iter().find(|c| c.id() == id),
            Atom::Leaf { .. } => None,
        }
    }

    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Atom::Leaf { data, .. } => Some(data),
            Atom::Parent { .. } => None,
        }
    }

    pub fn as_int(&self) -> Option<u32> {
        let data: [u8; 4] = self.data()?.try_into().ok()?;
        Some(u32::from_le_bytes(data))
    }

    pub fn as_text(&self) -> Option<String> {
        let data = self.data()?;
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        Some(String::from_utf8_lossy(&data[..end]).into_owned())
    }

    pub fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            Atom::Leaf { id, data } => {
                buf.extend_from_slice(id);
                buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
                buf.extend_from_slice(data);
            }
            Atom::Parent { id, children } => {
                buf.extend_from_slice(id);
                buf.extend_from_slice(&(children.len() as u32 | PARENT_BIT).to_le_bytes());
                for child in children {
                    child.encode(buf);
                }
            }
        }
    }
}

/// `id`를 사람이 읽을 수 있게 표시한다. (`ver\0` -> `ver`)
pub fn display_id(id: AtomId) -> String {
    String::from_utf8_lossy(&id)
        .trim_end_matches('\0')
        .escape_debug()
        .to_string()
}

/// atom 하나를 끝까지 읽는다. 읽은 원시 바이트는 `record`에 덧붙인다.
pub async fn read_atom<R>(reader: &mut R, record: &mut Vec<u8>) -> io::Result<Atom>
where
    R: AsyncRead + Unpin,
{
    // (부모 id, 남은 자식 수, 읽은 자식들)
    let mut stack: Vec<(AtomId, u32, Vec<Atom>)> = Vec::new();

    loop {
        let (id, len) = read_header(reader, record).await?;

        let mut finished = if len & PARENT_BIT != 0 {
            let count = len & !PARENT_BIT;
            if count > MAX_CHILDREN || stack.len() >= MAX_DEPTH {
                return Err(invalid(format!("atom '{}' is too large", display_id(id))));
            }
            if count > 0 {
                stack.push((id, count, Vec::with_capacity(count as usize)));
                continue;
            }
            Atom::Parent {
                id,
                children: Vec::new(),
            }
        } else {
            if len > MAX_DATA_LEN {
                return Err(invalid(format!("atom '{}' is too large", display_id(id))));
            }
            let mut data = vec![0u8; len as usize];
            reader.read_exact(&mut data).await?;
            record.extend_from_slice(&data);
            Atom::Leaf { id, data }
        };

        // 완성된 atom을 부모에 붙이고, 부모가 채워지면 위로 올라간다.
        loop {
            match stack.last_mut() {
                None => return Ok(finished),
                Some((_, remaining, children)) => {
                    children.push(finished);
                    *remaining -= 1;
                    if *remaining > 0 {
                        break;
                    }
                }
            }
            let Some((id, _, children)) = stack.pop() else {
                return Err(invalid("atom stack underflow".to_string()));
            };
            finished = Atom::Parent { id, children };
        }
    }
}

async fn read_header<R>(reader: &mut R, record: &mut Vec<u8>) -> io::Result<(AtomId, u32)>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 8];
    reader.read_exact(&mut header).await?;
    record.extend_from_slice(&header);

    let id = [header[0], header[1], header[2], header[3]];
    let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    Ok((id, len))
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_header_carries_child_count() {
        let mut buf = Vec::new();
        Atom::parent(*b"helo", vec![Atom::int(*b"ver\0", 1218)]).encode(&mut buf);
        assert_eq!(&buf[..8], b"helo\x01\x00\x00\x80");
        assert_eq!(&buf[8..12], b"ver\0");
        assert_eq!(&buf[12..16], &4u32.to_le_bytes());
        assert_eq!(&buf[16..], &1218u32.to_le_bytes());
    }

    #[tokio::test]
    async fn nested_atoms_are_read_back_and_recorded() {
        let atom = Atom::parent(
            *b"oleh",
            vec![
                Atom::string(*b"agnt", "PeerCast/0.1218"),
                Atom::parent(*b"host", vec![]),
                Atom::parent(*b"xtra", vec![Atom::int(*b"port", 7144)]),
                Atom::bytes(*b"sid\0", &[7; 16]),
            ],
        );
        let mut wire = Vec::new();
        atom.encode(&mut wire);
        wire.extend_from_slice(b"trailing");

        let mut reader = wire.as_slice();
        let mut record = Vec::new();
        let decoded = read_atom(&mut reader, &mut record).await.unwrap();

        assert_eq!(decoded, atom);
        assert_eq!(record.len(), wire.len() - b"trailing".len());
        assert_eq!(reader, b"trailing");
        assert_eq!(
            decoded.child(*b"agnt").and_then(Atom::as_text).as_deref(),
            Some("PeerCast/0.1218")
        );
        assert_eq!(
            decoded.child(*b"xtra").and_then(|x| x.child(*b"port")).and_then(Atom::as_int),
            Some(7144)
        );
    }

    #[tokio::test]
    async fn truncated_input_is_an_error_but_keeps_partial_record() {
        let mut wire = Vec::new();
        Atom::string(*b"agnt", "abc").encode(&mut wire);
        wire.truncate(10);

        let mut record = Vec::new();
        let err = read_atom(&mut wire.as_slice(), &mut record).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(record.len(), 8);
    }

    #[tokio::test]
    async fn oversized_leaf_is_rejected_before_allocation() {
        let mut wire = b"junk".to_vec();
        wire.extend_from_slice(&(MAX_DATA_LEN + 1).to_le_bytes());
        let err = read_atom(&mut wire.as_slice(), &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn ids_display_without_padding() {
        assert_eq!(display_id(*b"ver\0"), "ver");
        assert_eq!(display_id(*b"pcp\n"), "pcp\\n");
    }
}
