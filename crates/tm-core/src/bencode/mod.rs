//! Bencode decoding for torrent descriptors ([BEP-3]).
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Only decoding is provided; nothing in torrent-match writes descriptors.
//!
//! ```
//! use tm_core::bencode::decode;
//!
//! let value = decode(b"d4:infod4:name8:Show.S01ee").unwrap();
//! let name = value.get(b"info").and_then(|info| info.get(b"name"));
//! assert_eq!(name.and_then(|n| n.as_str()), Some("Show.S01"));
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod error;
mod value;

pub use decode::{MAX_DEPTH, decode, decode_prefix};
pub use error::BencodeError;
pub use value::Value;
