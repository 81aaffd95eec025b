//! Bencode decoding
//!
//! This module turns raw bytes into [`Value`](crate::Value) trees.

pub mod cursor;
pub mod decoder;
pub mod options;
pub mod parser;

pub use cursor::Cursor;
pub use decoder::Decoder;
pub use options::DecodeOptions;
pub use parser::Parser;
