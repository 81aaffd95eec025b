//! rust-bencode-decoder
//!
//! Decodes Bencode, the serialization format of BitTorrent metainfo files and
//! peer/DHT messages, and projects the decoded tree onto typed Rust values.
//!
//! Decoding happens in three layers:
//!
//! - [`decode::Cursor`] reads bytes from an in-memory buffer
//! - [`decode::Parser`] turns bytes into a [`Value`] tree
//! - [`Project`] writes a [`Value`] into a caller-owned destination
//!
//! ```
//! use rust_bencode_decoder::{bencode_record, from_bytes};
//!
//! #[derive(Debug, Default)]
//! struct FileEntry {
//!     length: u64,
//!     path: Vec<String>,
//! }
//!
//! bencode_record!(FileEntry { length, path });
//!
//! let mut entry = FileEntry::default();
//! from_bytes(&b"d6:lengthi512e4:pathl3:dir8:file.txtee"[..], &mut entry).unwrap();
//! assert_eq!(entry.length, 512);
//! assert_eq!(entry.path, vec!["dir", "file.txt"]);
//! ```

pub mod decode;
pub mod error;
pub mod project;
pub mod value;

pub use decode::{DecodeOptions, Decoder};
pub use error::{DecodeError, PathSegment, Result};
pub use project::Project;
pub use value::{Dict, Value};

use bytes::Bytes;
use std::io::Read;

/// Read `reader` to the end, decode it and project it onto `dest`
pub fn from_reader<R: Read, T: Project + ?Sized>(reader: R, dest: &mut T) -> Result<()> {
    Decoder::new(reader)?.decode(dest)
}

/// Decode `data` and project it onto `dest`
pub fn from_bytes<T: Project + ?Sized>(data: impl Into<Bytes>, dest: &mut T) -> Result<()> {
    Decoder::from_bytes(data)?.decode(dest)
}

/// Decode `data` into a [`Value`], wrapping several top-level values in a list
pub fn decode_value(data: impl Into<Bytes>) -> Result<Value> {
    Decoder::from_bytes(data)?.decode_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }

    #[derive(Debug, Default)]
    struct Person {
        age: i64,
        name: String,
        email: String,
    }

    bencode_record!(Person {
        age = "age",
        name = "name",
        email = "email",
    });

    #[derive(Debug, Default)]
    struct TorrentFile {
        length: u64,
        path: Vec<String>,
    }

    bencode_record!(TorrentFile { length, path });

    #[derive(Debug, Default)]
    struct Info {
        name: String,
        piece_length: u64,
        pieces: Bytes,
        private: bool,
        files: Vec<TorrentFile>,
        length: Option<u64>,
    }

    bencode_record!(Info {
        name,
        piece_length = "piece length",
        pieces,
        private,
        files,
        length,
    });

    #[derive(Debug, Default)]
    struct Metainfo {
        announce: String,
        announce_list: Vec<Vec<String>>,
        creation_date: i64,
        comment: Option<String>,
        info: Info,
        info_raw: Value,
    }

    bencode_record!(Metainfo {
        announce,
        announce_list = "announce-list",
        creation_date = "creation date",
        comment,
        info,
        info_raw = "info",
    });

    #[derive(Serialize)]
    struct WireFile {
        length: i64,
        path: Vec<String>,
    }

    #[derive(Serialize)]
    struct WireInfo {
        files: Vec<WireFile>,
        name: String,
        #[serde(rename = "piece length")]
        piece_length: i64,
        #[serde(with = "serde_bytes")]
        pieces: Vec<u8>,
        private: i64,
    }

    #[derive(Serialize)]
    struct WireMetainfo {
        announce: String,
        #[serde(rename = "announce-list")]
        announce_list: Vec<Vec<String>>,
        #[serde(rename = "creation date")]
        creation_date: i64,
        info: WireInfo,
    }

    #[test]
    fn test_text_round_trip_with_binary_bytes() {
        for text in ["", "spam", "a\u{0}b", "tab\there\r\n", "naïve"] {
            let mut encoded = format!("{}:", text.len()).into_bytes();
            encoded.extend_from_slice(text.as_bytes());

            let mut decoded = String::new();
            from_bytes(encoded, &mut decoded).unwrap();
            assert_eq!(decoded, text);
        }
    }

    #[test]
    fn test_integer_round_trip() {
        for n in [0i64, 1, -1, 42, -42, i64::MAX, i64::MIN] {
            let mut decoded = 0i64;
            from_bytes(format!("i{}e", n).into_bytes(), &mut decoded).unwrap();
            assert_eq!(decoded, n);
        }
    }

    #[test]
    fn test_leading_zeros_accepted() {
        let mut decoded = 0i64;
        from_bytes(&b"i007e"[..], &mut decoded).unwrap();
        assert_eq!(decoded, 7);
    }

    #[test]
    fn test_list_length_and_order() {
        let mut items: Vec<String> = Vec::new();
        from_bytes(&b"l1:c1:a1:be"[..], &mut items).unwrap();
        assert_eq!(items, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_dict_to_record() {
        init_tracing();
        let mut person = Person::default();
        from_bytes(&b"d3:agei30e4:name3:Joee"[..], &mut person).unwrap();

        assert_eq!(person.age, 30);
        assert_eq!(person.name, "Joe");
        assert_eq!(person.email, "");
    }

    #[test]
    fn test_truncated_string() {
        let mut text = String::new();
        let err = from_bytes(&b"5:ab"[..], &mut text).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedString { declared: 5, available: 2, .. }));
    }

    #[test]
    fn test_unterminated_list() {
        let mut items: Vec<String> = Vec::new();
        let err = from_bytes(&b"l4:spam"[..], &mut items).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_concatenated_messages() {
        let mut numbers: Vec<i64> = Vec::new();
        from_bytes(&b"i1ei2ei3e"[..], &mut numbers).unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_reader() {
        let mut person = Person::default();
        from_reader(&b"d4:name3:Ann5:email7:a@b.come"[..], &mut person).unwrap();
        assert_eq!(person.name, "Ann");
        assert_eq!(person.email, "a@b.com");
    }

    #[test]
    fn test_decode_value() {
        let value = decode_value(&b"d3:key5:valuee"[..]).unwrap();
        assert_eq!(value.get(b"key").and_then(Value::as_str), Some("value"));
    }

    #[test]
    fn test_metainfo_matches_serde_bencode() -> anyhow::Result<()> {
        init_tracing();
        let pieces: Vec<u8> = (0..40).collect();
        let wire = WireMetainfo {
            announce: "udp://tracker.example.com:6969/announce".to_string(),
            announce_list: vec![
                vec!["udp://tracker.example.com:6969/announce".to_string()],
                vec!["http://backup.example.com/announce".to_string()],
            ],
            creation_date: 1_700_000_000,
            info: WireInfo {
                files: vec![
                    WireFile { length: 1024, path: vec!["docs".to_string(), "a.txt".to_string()] },
                    WireFile { length: 2048, path: vec!["b.bin".to_string()] },
                ],
                name: "bundle".to_string(),
                piece_length: 16384,
                pieces: pieces.clone(),
                private: 1,
            },
        };
        let encoded = serde_bencode::to_bytes(&wire)?;

        let mut metainfo = Metainfo::default();
        from_bytes(encoded, &mut metainfo)?;

        assert_eq!(metainfo.announce, wire.announce);
        assert_eq!(metainfo.announce_list, wire.announce_list);
        assert_eq!(metainfo.creation_date, 1_700_000_000);
        assert_eq!(metainfo.comment, None);
        assert_eq!(metainfo.info.name, "bundle");
        assert_eq!(metainfo.info.piece_length, 16384);
        assert_eq!(metainfo.info.pieces.as_ref(), pieces.as_slice());
        assert!(metainfo.info.private);
        assert_eq!(metainfo.info.length, None);
        assert_eq!(metainfo.info.files.len(), 2);
        assert_eq!(metainfo.info.files[0].path, vec!["docs", "a.txt"]);
        assert_eq!(metainfo.info.files[1].length, 2048);
        assert_eq!(metainfo.info_raw.get(b"name").and_then(Value::as_str), Some("bundle"));
        Ok(())
    }

    #[test]
    fn test_metainfo_error_path() {
        let mut metainfo = Metainfo::default();
        let err = from_bytes(
            &b"d4:infod5:filesld6:lengthi-1eeeee"[..],
            &mut metainfo,
        )
        .unwrap_err();

        assert_eq!(err.path().as_deref(), Some("info.files[0].length"));
        assert!(matches!(err.root(), DecodeError::TypeMismatch { expected: "u64", .. }));
    }
}
