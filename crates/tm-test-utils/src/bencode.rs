//! Minimal bencode writer used to build descriptor fixtures.

/// A value to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bencode {
    Int(i64),
    Bytes(Vec<u8>),
    List(Vec<Bencode>),
    /// Entries are written in the given order
    Dict(Vec<(Vec<u8>, Bencode)>),
}

impl Bencode {
    pub fn str(s: &str) -> Self {
        Self::Bytes(s.as_bytes().to_vec())
    }

    /// Build a dictionary from string keys.
    pub fn dict<'a>(entries: impl IntoIterator<Item = (&'a str, Bencode)>) -> Self {
        Self::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.as_bytes().to_vec(), v))
                .collect(),
        )
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf);
        buf
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Int(i) => {
                buf.push(b'i');
                buf.extend_from_slice(i.to_string().as_bytes());
                buf.push(b'e');
            }
            Self::Bytes(b) => {
                buf.extend_from_slice(b.len().to_string().as_bytes());
                buf.push(b':');
                buf.extend_from_slice(b);
            }
            Self::List(items) => {
                buf.push(b'l');
                for item in items {
                    item.encode_into(buf);
                }
                buf.push(b'e');
            }
            Self::Dict(entries) => {
                buf.push(b'd');
                for (key, value) in entries {
                    Self::Bytes(key.clone()).encode_into(buf);
                    value.encode_into(buf);
                }
                buf.push(b'e');
            }
        }
    }
}

/// A realistic single-file descriptor declaring `name`.
pub fn torrent_bytes(name: &str) -> Vec<u8> {
    Bencode::dict([
        ("announce", Bencode::str("http://tracker.example.com/announce")),
        ("created by", Bencode::str("tm-test-utils")),
        (
            "info",
            Bencode::dict([
                ("length", Bencode::Int(1024)),
                ("name", Bencode::str(name)),
                ("piece length", Bencode::Int(16384)),
                ("pieces", Bencode::Bytes(vec![0u8; 20])),
            ]),
        ),
    ])
    .encode()
}
