//! Top-level decode driver
//!
//! Reads the whole source, parses every top-level value, then projects the
//! result onto the caller's destination in one pass.

use bytes::Bytes;
use std::io::Read;
use tracing::debug;

use crate::decode::options::DecodeOptions;
use crate::decode::parser::Parser;
use crate::error::{DecodeError, Result};
use crate::project::Project;
use crate::value::Value;

/// Decoder over a fully materialised input buffer.
///
/// Decoding does not consume the decoder: every call starts from the first
/// byte with a fresh cursor.
#[derive(Debug, Clone)]
pub struct Decoder {
    data: Bytes,
    options: DecodeOptions,
}

impl Decoder {
    /// Read `reader` to the end and create a decoder over its bytes
    pub fn new<R: Read>(reader: R) -> Result<Self> {
        Self::with_options(reader, DecodeOptions::default())
    }

    /// Read `reader` to the end and create a decoder with the given options.
    ///
    /// The reader is dropped, and so closed, before this returns.
    pub fn with_options<R: Read>(mut reader: R, options: DecodeOptions) -> Result<Self> {
        options.validate()?;

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        drop(reader);

        debug!("Read {} bytes from source", data.len());
        Self::from_bytes_with_options(data, options)
    }

    /// Create a decoder over bytes already in memory
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        Self::from_bytes_with_options(data, DecodeOptions::default())
    }

    /// Create a decoder over bytes already in memory with the given options
    pub fn from_bytes_with_options(data: impl Into<Bytes>, options: DecodeOptions) -> Result<Self> {
        options.validate()?;

        let data = data.into();
        if data.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        Ok(Self { data, options })
    }

    /// Number of input bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; an empty source is rejected on construction
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Options in effect
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Parse every top-level value in input order
    pub fn decode_values(&self) -> Result<Vec<Value>> {
        let mut parser = Parser::with_options(self.data.clone(), self.options);
        parser.parse_stream()
    }

    /// Parse the input into a single value.
    ///
    /// A lone top-level value is returned as is; back-to-back values are
    /// wrapped in a [`Value::List`] in input order.
    pub fn decode_value(&self) -> Result<Value> {
        let mut values = self.decode_values()?;
        if values.len() == 1 {
            return Ok(values.remove(0));
        }
        debug!("Input holds {} top-level values, projecting as a list", values.len());
        Ok(Value::List(values))
    }

    /// Parse the input and project it onto `dest`
    pub fn decode<T: Project + ?Sized>(&self, dest: &mut T) -> Result<()> {
        debug!("Decoding {} bytes", self.data.len());
        let value = self.decode_value()?;
        dest.project(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode_record;
    use std::io::Cursor as IoCursor;

    #[derive(Debug, Default)]
    struct Person {
        age: i64,
        name: String,
        email: String,
    }

    bencode_record!(Person { age, name, email });

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_decode_from_reader() {
        let decoder = Decoder::new(IoCursor::new(b"d3:agei30e4:name3:Joee".to_vec())).unwrap();
        let mut person = Person::default();
        decoder.decode(&mut person).unwrap();

        assert_eq!(person.age, 30);
        assert_eq!(person.name, "Joe");
        assert_eq!(person.email, "");
    }

    #[test]
    fn test_empty_reader() {
        let err = Decoder::new(IoCursor::new(Vec::new())).unwrap_err();
        assert!(matches!(err, DecodeError::EmptyInput));
    }

    #[test]
    fn test_empty_bytes() {
        assert!(matches!(Decoder::from_bytes(Bytes::new()), Err(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_reader_error() {
        let err = Decoder::new(FailingReader).unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = DecodeOptions::new().with_max_depth(0);
        let err = Decoder::from_bytes_with_options(Bytes::from_static(b"i1e"), options).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidOptions { .. }));
    }

    #[test]
    fn test_single_value_not_wrapped() {
        let decoder = Decoder::from_bytes(Bytes::from_static(b"li1ei2ee")).unwrap();
        let mut numbers: Vec<i64> = Vec::new();
        decoder.decode(&mut numbers).unwrap();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_stream_of_values_projected_as_list() {
        let decoder = Decoder::from_bytes(Bytes::from_static(b"i1ei2ei3e")).unwrap();
        let mut numbers: Vec<i64> = Vec::new();
        decoder.decode(&mut numbers).unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_stream_of_records() {
        let decoder =
            Decoder::from_bytes(Bytes::from_static(b"d3:agei1eed3:agei2eed3:agei3ee")).unwrap();
        let mut people: Vec<Person> = Vec::new();
        decoder.decode(&mut people).unwrap();
        assert_eq!(people.iter().map(|p| p.age).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_is_repeatable() {
        let decoder = Decoder::from_bytes(Bytes::from_static(b"4:spam")).unwrap();
        let mut first = String::new();
        let mut second = String::new();
        decoder.decode(&mut first).unwrap();
        decoder.decode(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_error_propagates() {
        let decoder = Decoder::from_bytes(Bytes::from_static(b"i1e5:ab")).unwrap();
        let mut numbers: Vec<i64> = Vec::new();
        let err = decoder.decode(&mut numbers).unwrap_err();
        assert!(matches!(err, DecodeError::TruncatedString { declared: 5, .. }));
        assert!(numbers.is_empty());
    }

    #[test]
    fn test_decode_values() {
        let decoder = Decoder::from_bytes(Bytes::from_static(b"4:spami3e")).unwrap();
        let values = decoder.decode_values().unwrap();
        assert_eq!(values, vec![Value::string("spam"), Value::Integer(3)]);
    }

    #[test]
    fn test_decode_into_open_value() {
        let decoder = Decoder::from_bytes(Bytes::from_static(b"d1:ali1ei2eee")).unwrap();
        let mut slot = Value::Nothing;
        decoder.decode(&mut slot).unwrap();
        assert_eq!(
            slot.get(b"a"),
            Some(&Value::List(vec![Value::Integer(1), Value::Integer(2)]))
        );
    }
}
